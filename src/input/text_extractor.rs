//! Text extraction from various file formats

use crate::error::{Result, SentimentError};
use crate::input::file_detector::FileType;
use docx_rs::{read_docx, DocumentChild, Paragraph, ParagraphChild, RunChild};
use log::debug;
use std::io::{Cursor, Read};
use std::panic;
use xml::reader::EventReader;
use zip::ZipArchive;

/// Main document part of a Word package
const DOCUMENT_PART: &str = "word/document.xml";

pub trait TextExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String>;
}

/// Route raw bytes to the extractor for their declared type.
pub fn extract(bytes: &[u8], file_type: FileType) -> Result<String> {
    match file_type {
        FileType::PlainText => PlainTextExtractor.extract(bytes),
        FileType::Pdf => PdfExtractor.extract(bytes),
        FileType::WordDocument => DocxExtractor.extract(bytes),
        FileType::Unsupported => Err(SentimentError::UnsupportedFormat(
            "expected one of .txt, .pdf, .docx".to_string(),
        )),
    }
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String> {
        let content = std::str::from_utf8(bytes)
            .map_err(|e| SentimentError::Decode(format!("file is not valid UTF-8: {}", e)))?;
        Ok(content.trim().to_string())
    }
}

pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String> {
        // pdf-extract panics on some malformed documents instead of returning an error.
        // The default hook is swapped out for the call so the panic is logged, not printed.
        let previous_hook = panic::take_hook();
        panic::set_hook(Box::new(|info| debug!("pdf-extract panicked: {}", info)));
        let outcome = panic::catch_unwind(|| pdf_extract::extract_text_from_mem_by_pages(bytes));
        panic::set_hook(previous_hook);

        let pages = outcome
            .map_err(|_| SentimentError::Extraction("PDF parser aborted on malformed input".to_string()))?
            .map_err(|e| SentimentError::Extraction(format!("Failed to extract text from PDF: {}", e)))?;

        debug!("PDF pages: {}", pages.len());
        Ok(join_pages(pages))
    }
}

/// Join page texts with a single space, skipping pages that produced nothing.
pub fn join_pages(pages: Vec<String>) -> String {
    let texts: Vec<String> = pages.into_iter().filter(|page| !page.is_empty()).collect();
    texts.join(" ").trim().to_string()
}

pub struct DocxExtractor;

impl TextExtractor for DocxExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String> {
        // docx-rs does not terminate on a truncated document part
        check_document_xml(bytes)?;

        let docx = read_docx(bytes)
            .map_err(|e| SentimentError::Extraction(format!("Failed to parse DOCX: {:?}", e)))?;

        // Body paragraphs only; tables and other block content are not part of the review text
        let paragraphs: Vec<String> = docx
            .document
            .children
            .iter()
            .filter_map(|child| match child {
                DocumentChild::Paragraph(para) => Some(paragraph_text(para)),
                _ => None,
            })
            .collect();
        debug!("DOCX paragraphs: {}", paragraphs.len());

        Ok(paragraphs.join("\n").trim().to_string())
    }
}

/// Parse the main document part to the end, failing on any XML error.
fn check_document_xml(bytes: &[u8]) -> Result<()> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| SentimentError::Extraction(format!("Failed to open DOCX archive: {}", e)))?;
    let mut part = archive
        .by_name(DOCUMENT_PART)
        .map_err(|e| SentimentError::Extraction(format!("DOCX has no {}: {}", DOCUMENT_PART, e)))?;

    let mut xml = Vec::new();
    part.read_to_end(&mut xml)
        .map_err(|e| SentimentError::Extraction(format!("Failed to read {}: {}", DOCUMENT_PART, e)))?;

    for event in EventReader::new(xml.as_slice()) {
        event.map_err(|e| SentimentError::Extraction(format!("Malformed {}: {}", DOCUMENT_PART, e)))?;
    }
    Ok(())
}

fn paragraph_text(para: &Paragraph) -> String {
    let mut text = String::new();
    push_paragraph_children(&para.children, &mut text);
    text
}

fn push_paragraph_children(children: &[ParagraphChild], text: &mut String) {
    for child in children {
        match child {
            ParagraphChild::Run(run) => {
                for rc in &run.children {
                    match rc {
                        RunChild::Text(t) => text.push_str(&t.text),
                        RunChild::Tab(_) => text.push('\t'),
                        RunChild::Break(_) => text.push('\n'),
                        _ => {}
                    }
                }
            }
            ParagraphChild::Hyperlink(link) => push_paragraph_children(&link.children, text),
            _ => {}
        }
    }
}
