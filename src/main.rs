// file: src/main.rs
// description: commandline application entry point with command handling
// reference: application bootstrap and orchestration

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use research_assistant::utils::logging::{format_error, format_info, format_success, format_warning};
use research_assistant::{
    ArticleExtractor, Config, ExportFormat, HtmlArticleExtractor, PipelineError, ProgressTracker,
    ReportWriter, ResearchPipeline, SearchClient, SerpApiClient,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "research_assistant")]
#[command(version)]
#[command(about = "Search the web, extract sources and write a cited research summary", long_about = None)]
struct Cli {
    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = "config/default.toml"
    )]
    config: PathBuf,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    color: bool,

    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search, extract, summarize and export a report for a topic
    Research {
        /// Free-text research topic
        query: String,

        #[arg(short = 'n', long, value_name = "NUM")]
        num_results: Option<usize>,

        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        #[arg(short, long, value_enum)]
        format: Option<ExportFormat>,

        /// Articles fetched at once
        #[arg(long, value_name = "NUM")]
        concurrency: Option<usize>,

        #[arg(long)]
        no_progress: bool,
    },

    /// Print the search hits for a query
    Search {
        query: String,

        #[arg(short = 'n', long, value_name = "NUM")]
        num_results: Option<usize>,
    },

    /// Print the extracted article for a single URL
    Extract { url: String },

    /// Render a saved markdown summary to PDF
    Render {
        input: PathBuf,

        #[arg(short, long)]
        query: String,

        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    research_assistant::utils::logging::init_logger(cli.color, cli.verbose);
    colored::control::set_override(cli.color);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", format_error(&error_banner(&e)));
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    info!("Research Assistant");

    let config = if cli.config.exists() {
        info!("Loading configuration from: {}", cli.config.display());
        Config::load(Some(cli.config.as_path())).context("Failed to load configuration")?
    } else {
        warn!(
            "Config file {} not found, using defaults and environment",
            cli.config.display()
        );
        Config::load(None).context("Failed to load configuration")?
    };

    match cli.command {
        Commands::Research {
            query,
            num_results,
            output,
            format,
            concurrency,
            no_progress,
        } => {
            let mut config = config;
            if let Some(num) = num_results {
                config.search.num_results = num;
            }
            if let Some(dir) = output {
                config.export.output_dir = dir;
            }
            if let Some(format) = format {
                config.export.format = format;
            }
            if let Some(concurrency) = concurrency {
                config.extraction.concurrency = concurrency;
            }
            config.validate()?;

            cmd_research(&config, &query, !no_progress, cli.color).await?;
        }
        Commands::Search { query, num_results } => {
            let num = num_results.unwrap_or(config.search.num_results);
            cmd_search(&config, &query, num).await?;
        }
        Commands::Extract { url } => {
            cmd_extract(&config, &url).await?;
        }
        Commands::Render {
            input,
            query,
            output,
        } => {
            let output = output.unwrap_or_else(|| config.export.output_dir.clone());
            cmd_render(&input, &query, output)?;
        }
    }

    Ok(())
}

fn error_banner(e: &anyhow::Error) -> String {
    match e.downcast_ref::<PipelineError>() {
        Some(pipeline_error) => format!("{} failure: {:#}", pipeline_error.kind(), e),
        None => format!("{:#}", e),
    }
}

async fn cmd_research(config: &Config, query: &str, show_progress: bool, colored: bool) -> Result<()> {
    info!("Researching: {}", query);

    let pipeline =
        ResearchPipeline::from_config(config).context("Failed to initialize research pipeline")?;

    let mut tracker = if show_progress {
        ProgressTracker::new(colored)
    } else {
        ProgressTracker::hidden()
    };

    let report = pipeline.run_with_progress(query, &mut tracker).await?;

    println!();
    println!("{}", format_success(&format!("Research Report: {}", report.query)));
    println!();
    println!("{}", report.markdown());
    println!();
    println!("Sources:");
    for (idx, doc) in report.documents.iter().enumerate() {
        if doc.has_known_date() {
            println!("  {}. {} ({})", idx + 1, doc.title, doc.publish_date);
        } else {
            println!("  {}. {}", idx + 1, doc.title);
        }
        println!("     {}", doc.url);
    }

    if report.stats.extraction_failures > 0 {
        println!(
            "{}",
            format_warning(&format!(
                "{} of {} source(s) could not be extracted",
                report.stats.extraction_failures, report.stats.hits_found
            ))
        );
    }

    let writer = ReportWriter::new(&config.export.output_dir)
        .context("Failed to prepare output directory")?;
    let written = writer.write(&report.summary, &report.query, config.export.format)?;

    println!();
    for path in written.paths() {
        println!("{}", format_info(&format!("Saved {}", path.display())));
    }

    info!(
        "Extraction success rate {:.1}% in {:.2}s",
        report.stats.success_rate(),
        report.stats.duration.as_secs_f64()
    );

    Ok(())
}

async fn cmd_search(config: &Config, query: &str, num_results: usize) -> Result<()> {
    info!("Searching for: {}", query);

    let client = SerpApiClient::new(&config.search).context("Failed to create search client")?;
    let hits = client.search(query, num_results).await?;

    if hits.is_empty() {
        println!("\nNo results found for query: \"{}\"\n", query);
        return Ok(());
    }

    println!("\nSearch Results for: \"{}\"\n", query);
    println!("{}", "=".repeat(80));

    for (idx, hit) in hits.iter().enumerate() {
        println!("\n{}. {}", idx + 1, hit.display_title());
        println!("   {}", hit.link.as_deref().unwrap_or("(no link)"));
    }

    println!("\n{}", "=".repeat(80));
    Ok(())
}

async fn cmd_extract(config: &Config, url: &str) -> Result<()> {
    let extractor = HtmlArticleExtractor::new(&config.extraction)
        .context("Failed to create article extractor")?;

    let Some(doc) = extractor.extract_article(url).await else {
        anyhow::bail!("Could not extract readable content from {}", url);
    };

    println!("\nTitle: {}", doc.title);
    println!("Date:  {}", doc.publish_date);
    println!("URL:   {}", doc.url);
    println!("Chars: {}\n", doc.text.chars().count());
    println!("{}", doc.text);

    Ok(())
}

fn cmd_render(input: &Path, query: &str, output: PathBuf) -> Result<()> {
    let summary = std::fs::read_to_string(input)
        .with_context(|| format!("Failed to read {}", input.display()))?;

    let writer = ReportWriter::new(output).context("Failed to prepare output directory")?;
    let written = writer.write(&summary, query, ExportFormat::Pdf)?;

    for path in written.paths() {
        println!("{}", format_info(&format!("Saved {}", path.display())));
    }

    Ok(())
}
