//! PDF rendering of the report content contract.
//!
//! Layout mirrors the deployed export: A4 portrait, built-in Helvetica,
//! a top-down y-cursor with a page break when the cursor passes the bottom
//! margin, and one labeled block per section in the contract's order.

mod layout;

pub use crate::layout::wrap_text;

use crate::layout::{
    BODY_SIZE_PT, BOTTOM_MARGIN_MM, HEADING_SIZE_PT, LABEL_SIZE_PT, MARGIN_MM, MAX_BODY_CHARS,
    PAGE_HEIGHT_MM, PAGE_WIDTH_MM, TITLE_SIZE_PT, line_height_mm,
};
use pdl_core::report::ReportDocument;
use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("pdf generation failed: {message}")]
    Pdf { message: String },
    #[error("could not write report: {0}")]
    Io(#[from] std::io::Error),
}

struct PageWriter {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    // Distance from the top edge, in millimetres.
    cursor: f32,
}

impl PageWriter {
    fn new(title: &str) -> Result<Self, ReportError> {
        let (doc, page, layer) =
            PdfDocument::new(title, Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "content");
        let regular = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(pdf_err)?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(pdf_err)?;
        let layer = doc.get_page(page).get_layer(layer);
        Ok(Self {
            doc,
            layer,
            regular,
            bold,
            cursor: MARGIN_MM,
        })
    }

    fn ensure_space(&mut self, needed_mm: f32) {
        if self.cursor + needed_mm <= PAGE_HEIGHT_MM - BOTTOM_MARGIN_MM {
            return;
        }
        let (page, layer) =
            self.doc
                .add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "content");
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.cursor = MARGIN_MM;
    }

    fn write_line(&mut self, text: &str, size_pt: f32, bold: bool) {
        let height = line_height_mm(size_pt);
        self.ensure_space(height);
        let font = if bold { &self.bold } else { &self.regular };
        self.layer.use_text(
            text,
            size_pt,
            Mm(MARGIN_MM),
            Mm(PAGE_HEIGHT_MM - self.cursor - height),
            font,
        );
        self.cursor += height;
    }

    fn write_wrapped(&mut self, text: &str, size_pt: f32, bold: bool) {
        for line in wrap_text(text, MAX_BODY_CHARS) {
            self.write_line(&line, size_pt, bold);
        }
    }

    fn gap(&mut self, mm: f32) {
        self.cursor += mm;
    }

    fn labeled_block(&mut self, label: &str, body: &str) {
        self.write_line(label, LABEL_SIZE_PT, true);
        self.write_wrapped(body, BODY_SIZE_PT, false);
        self.gap(4.0);
    }

    fn heading(&mut self, text: &str) {
        self.gap(2.0);
        self.write_line(text, HEADING_SIZE_PT, true);
        self.gap(2.0);
    }

    fn footer_and_finish(mut self, footer: &str) -> Result<Vec<u8>, ReportError> {
        self.layer.use_text(
            footer,
            8.0,
            Mm(MARGIN_MM),
            Mm(BOTTOM_MARGIN_MM / 2.0),
            &self.regular,
        );
        self.doc.save_to_bytes().map_err(pdf_err)
    }
}

fn pdf_err(err: printpdf::Error) -> ReportError {
    ReportError::Pdf {
        message: err.to_string(),
    }
}

/// Render the report to PDF bytes.
pub fn render(report: &ReportDocument) -> Result<Vec<u8>, ReportError> {
    let mut writer = PageWriter::new(&report.title)?;

    writer.write_line(&report.title, TITLE_SIZE_PT, true);
    writer.write_line(&report.subtitle, BODY_SIZE_PT, false);
    writer.write_line(
        &format!("Generated on: {}", report.generated_on.format("%d/%m/%Y")),
        BODY_SIZE_PT,
        false,
    );

    writer.heading("BASIC INFORMATION");
    writer.write_line(&format!("Program: {}", report.program_name), BODY_SIZE_PT, false);
    writer.write_line(
        &format!("Session date: {}", report.session_date),
        BODY_SIZE_PT,
        false,
    );
    writer.write_line(&format!("Topic: {}", report.topic), BODY_SIZE_PT, false);

    writer.heading("LEARNINGS & COMMITMENTS");
    writer.labeled_block("Key Learnings:", &report.learnings);
    writer.labeled_block("Commitments, Objectives & Goals:", &report.commitments);

    if !report.outcome_sections.is_empty() {
        writer.heading("ACTIONS & RESULTS");
        for section in &report.outcome_sections {
            writer.labeled_block(&format!("{}:", section.label), &section.body);
        }
    }

    if report.recommendation_score.is_some() || report.general_feedback.is_some() {
        writer.heading("ASSESSMENT");
        if let Some(score) = report.recommendation_score {
            writer.labeled_block("Recommendation Score:", &format!("{score}/10"));
        }
        if let Some(feedback) = &report.general_feedback {
            writer.labeled_block("General Feedback:", feedback);
        }
    }

    writer.footer_and_finish(&report.footer)
}

/// Render and write to disk.
pub fn save_to(report: &ReportDocument, path: &std::path::Path) -> Result<(), ReportError> {
    let bytes = render(report)?;
    std::fs::write(path, bytes)?;
    Ok(())
}
