// file: src/extractor/html.rs
// description: fetches article pages and scrapes title, publish date and paragraph text
// reference: https://docs.rs/scraper

use super::ArticleExtractor;
use crate::config::ExtractionConfig;
use crate::error::{PipelineError, Result};
use crate::models::ExtractedDocument;
use crate::utils::text::{collapse_whitespace, truncate_chars};
use crate::utils::validation::Validator;
use async_trait::async_trait;
use chrono::DateTime;
use lazy_static::lazy_static;
use reqwest::Client;
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, HeaderMap, HeaderValue};
use scraper::{Html, Selector};
use std::time::Duration;
use tracing::{debug, warn};

lazy_static! {
    static ref TITLE: Selector = Selector::parse("title").expect("TITLE selector is valid");

    static ref OG_TITLE: Selector = Selector::parse(r#"meta[property="og:title"]"#)
        .expect("OG_TITLE selector is valid");

    static ref HEADING: Selector = Selector::parse("h1").expect("HEADING selector is valid");

    static ref PUBLISHED_META: Selector =
        Selector::parse(r#"meta[property="article:published_time"]"#)
            .expect("PUBLISHED_META selector is valid");

    static ref TIME: Selector = Selector::parse("time").expect("TIME selector is valid");

    static ref PARAGRAPH: Selector = Selector::parse("p").expect("PARAGRAPH selector is valid");
}

const MAX_REDIRECTS: usize = 5;

pub struct HtmlArticleExtractor {
    client: Client,
    max_text_chars: usize,
}

impl HtmlArticleExtractor {
    pub fn new(config: &ExtractionConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static(
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            ),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.5"));

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .build()
            .map_err(|e| {
                PipelineError::Config(format!("Failed to build article client: {}", e))
            })?;

        Ok(Self {
            client,
            max_text_chars: config.max_text_chars,
        })
    }

    async fn fetch_html(&self, url: &str) -> Result<String> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| PipelineError::Transport(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PipelineError::Transport(format!("HTTP {} for {}", status, url)));
        }

        response
            .text()
            .await
            .map_err(|e| PipelineError::Transport(format!("Failed to read body: {}", e)))
    }

    async fn try_extract(&self, url: &str) -> Result<ExtractedDocument> {
        Validator::validate_url(url)?;
        let html = self.fetch_html(url).await?;
        parse_article(&html, url, self.max_text_chars)
    }
}

#[async_trait]
impl ArticleExtractor for HtmlArticleExtractor {
    async fn extract_article(&self, url: &str) -> Option<ExtractedDocument> {
        debug!(url = %url, "Extracting article");

        match self.try_extract(url).await {
            Ok(document) => {
                debug!(url = %url, chars = document.text.chars().count(), "Extracted article");
                Some(document)
            }
            Err(e) => {
                warn!(url = %url, "Skipping article: {}", e);
                None
            }
        }
    }
}

/// Builds a document from raw HTML. Body text is the newline-joined text of
/// every `<p>`, cut to `max_text_chars` characters.
pub fn parse_article(html: &str, url: &str, max_text_chars: usize) -> Result<ExtractedDocument> {
    let document = Html::parse_document(html);

    let title = extract_title(&document).unwrap_or_default();
    let text = extract_body(&document, max_text_chars);

    if title.is_empty() && text.is_empty() {
        return Err(PipelineError::Parse(format!(
            "No readable content found at {}",
            url
        )));
    }

    Ok(ExtractedDocument::new(
        title,
        text,
        extract_publish_date(&document),
        url.to_string(),
    ))
}

fn extract_title(document: &Html) -> Option<String> {
    first_text(document, &TITLE)
        .or_else(|| {
            document
                .select(&OG_TITLE)
                .next()
                .and_then(|el| el.value().attr("content"))
                .map(collapse_whitespace)
                .filter(|t| !t.is_empty())
        })
        .or_else(|| first_text(document, &HEADING))
}

fn first_text(document: &Html, selector: &Selector) -> Option<String> {
    document
        .select(selector)
        .next()
        .map(|el| collapse_whitespace(&el.text().collect::<String>()))
        .filter(|t| !t.is_empty())
}

fn extract_publish_date(document: &Html) -> Option<String> {
    let meta = document
        .select(&PUBLISHED_META)
        .next()
        .and_then(|el| el.value().attr("content"))
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(str::to_string);

    let raw = meta.or_else(|| {
        document.select(&TIME).next().and_then(|el| {
            el.value()
                .attr("datetime")
                .map(|d| d.trim().to_string())
                .filter(|d| !d.is_empty())
                .or_else(|| {
                    Some(collapse_whitespace(&el.text().collect::<String>()))
                        .filter(|d| !d.is_empty())
                })
        })
    })?;

    Some(normalize_date(&raw))
}

/// RFC 3339 timestamps become `YYYY-MM-DD HH:MM:SS+HH:MM`; anything else is
/// kept as published.
fn normalize_date(raw: &str) -> String {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S%:z").to_string())
        .unwrap_or_else(|_| raw.to_string())
}

fn extract_body(document: &Html, max_text_chars: usize) -> String {
    let paragraphs: Vec<String> = document
        .select(&PARAGRAPH)
        .map(|p| collapse_whitespace(&p.text().collect::<String>()))
        .filter(|p| !p.is_empty())
        .collect();

    truncate_chars(&paragraphs.join("\n"), max_text_chars).to_string()
}
