// file: src/exporter/pdf.rs
// description: paginated pdf rendering of a research summary
// reference: https://docs.rs/printpdf/0.7

use crate::error::{PipelineError, Result};
use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument};

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 20.0;
const TITLE_SIZE_PT: f32 = 16.0;
const BODY_SIZE_PT: f32 = 11.0;
const LINE_SPACING: f32 = 1.4;
const SPACER_MM: f32 = 6.0;
const PARAGRAPH_GAP_MM: f32 = 1.5;
const PT_TO_MM: f32 = 0.352_778;
// Helvetica averages about half an em per glyph
const AVG_GLYPH_EM: f32 = 0.5;
const LAYER_NAME: &str = "Layer 1";

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PlacedLine {
    pub text: String,
    pub size_pt: f32,
    pub bold: bool,
    /// Baseline, measured from the bottom edge of the page
    pub y_mm: f32,
}

/// Lays out title and body into pages without touching the PDF backend.
pub(crate) fn layout(summary: &str, query: &str) -> Vec<Vec<PlacedLine>> {
    let mut cursor = LayoutCursor::new();

    let title = format!("Research Report: {}", query.trim());
    for line in wrap_text(&to_pdf_text(&title), chars_per_line(TITLE_SIZE_PT)) {
        cursor.place(line, TITLE_SIZE_PT, true);
    }
    cursor.skip(SPACER_MM);

    let body_width = chars_per_line(BODY_SIZE_PT);
    for paragraph in summary.lines() {
        let paragraph = paragraph.trim_end();
        if paragraph.trim().is_empty() {
            cursor.skip(line_height_mm(BODY_SIZE_PT) / 2.0);
            continue;
        }

        for line in wrap_text(&to_pdf_text(paragraph), body_width) {
            cursor.place(line, BODY_SIZE_PT, false);
        }
        cursor.skip(PARAGRAPH_GAP_MM);
    }

    cursor.finish()
}

/// Renders the report: bold title, a spacer, then one paragraph per summary
/// line, flowing onto as many A4 pages as needed.
pub fn export_pdf(summary: &str, query: &str) -> Result<Vec<u8>> {
    let pages = layout(summary, query);
    let title = format!("Research Report: {}", query.trim());

    let (doc, first_page, first_layer) = PdfDocument::new(
        to_pdf_text(&title),
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        LAYER_NAME.to_string(),
    );

    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| PipelineError::Export(format!("Failed to load font: {}", e)))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| PipelineError::Export(format!("Failed to load font: {}", e)))?;

    for (index, lines) in pages.iter().enumerate() {
        let layer = if index == 0 {
            doc.get_page(first_page).get_layer(first_layer)
        } else {
            let (page, layer) = doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), LAYER_NAME);
            doc.get_page(page).get_layer(layer)
        };

        for line in lines {
            let font: &IndirectFontRef = if line.bold { &bold } else { &regular };
            layer.use_text(
                line.text.clone(),
                line.size_pt,
                Mm(MARGIN_MM),
                Mm(line.y_mm),
                font,
            );
        }
    }

    doc.save_to_bytes()
        .map_err(|e| PipelineError::Export(format!("Failed to write PDF: {}", e)))
}

struct LayoutCursor {
    pages: Vec<Vec<PlacedLine>>,
    y_mm: f32,
}

impl LayoutCursor {
    fn new() -> Self {
        Self {
            pages: vec![Vec::new()],
            y_mm: PAGE_HEIGHT_MM - MARGIN_MM,
        }
    }

    fn place(&mut self, text: String, size_pt: f32, bold: bool) {
        let height = line_height_mm(size_pt);
        if self.y_mm - height < MARGIN_MM {
            self.pages.push(Vec::new());
            self.y_mm = PAGE_HEIGHT_MM - MARGIN_MM;
        }

        self.y_mm -= height;
        if let Some(page) = self.pages.last_mut() {
            page.push(PlacedLine {
                text,
                size_pt,
                bold,
                y_mm: self.y_mm,
            });
        }
    }

    fn skip(&mut self, mm: f32) {
        self.y_mm = (self.y_mm - mm).max(MARGIN_MM);
    }

    fn finish(self) -> Vec<Vec<PlacedLine>> {
        self.pages
    }
}

fn line_height_mm(size_pt: f32) -> f32 {
    size_pt * PT_TO_MM * LINE_SPACING
}

fn chars_per_line(size_pt: f32) -> usize {
    let text_width = PAGE_WIDTH_MM - 2.0 * MARGIN_MM;
    let glyph_width = size_pt * PT_TO_MM * AVG_GLYPH_EM;
    ((text_width / glyph_width).floor() as usize).max(1)
}

/// Greedy word wrap; words longer than a line are split.
fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();

        while word.len() > max_chars {
            if current_len > 0 {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let rest = word.split_off(max_chars);
            lines.push(word.into_iter().collect());
            word = rest;
        }

        if word.is_empty() {
            continue;
        }

        let needed = if current_len == 0 { word.len() } else { current_len + 1 + word.len() };
        if needed > max_chars {
            lines.push(std::mem::take(&mut current));
            current_len = 0;
        }

        if current_len > 0 {
            current.push(' ');
            current_len += 1;
        }
        current.extend(word.iter());
        current_len += word.len();
    }

    if current_len > 0 {
        lines.push(current);
    }

    lines
}

/// The built-in Type1 fonts only cover a single-byte encoding, so typographic
/// punctuation is transliterated and anything else non-ASCII becomes `?`.
fn to_pdf_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());

    for c in text.chars() {
        match c {
            '\u{2018}' | '\u{2019}' | '\u{201A}' | '\u{2032}' => out.push('\''),
            '\u{201C}' | '\u{201D}' | '\u{201E}' | '\u{2033}' => out.push('"'),
            '\u{2010}'..='\u{2015}' | '\u{2212}' => out.push('-'),
            '\u{2022}' | '\u{25CF}' | '\u{25AA}' | '\u{00B7}' => out.push('-'),
            '\u{2026}' => out.push_str("..."),
            '\u{00A0}' | '\t' => out.push(' '),
            c if c.is_ascii() && !c.is_ascii_control() => out.push(c),
            c if c.is_control() => {}
            _ => out.push('?'),
        }
    }

    out
}
