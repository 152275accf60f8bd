//! Word backends: Office Open XML (`.docx`) and legacy binary (`.doc`).

use std::io::{Cursor, Read};

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use tracing::debug;
use zip::ZipArchive;

use crate::errors::ExtractError;
use crate::extraction::{DocumentExtractor, DocumentFormat};

const DOCUMENT_PART: &str = "word/document.xml";
const ZIP_SIGNATURE: &[u8] = b"PK\x03\x04";
const OLE_SIGNATURE: &[u8] = &[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];

/// Shortest printable run kept by the legacy scanner.
const MIN_RUN_CHARS: usize = 4;

/// Compound-file directory names that show up as UTF-16 runs in every `.doc`.
const OLE_DIRECTORY_NAMES: &[&str] = &[
    "Root Entry",
    "WordDocument",
    "0Table",
    "1Table",
    "Data",
    "CompObj",
    "ObjectPool",
    "SummaryInformation",
    "DocumentSummaryInformation",
];

static WORD_MARKUP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"(?s)<w:t(?:\s[^>]*)?/>",
        r"|<w:t(?:\s[^>]*[^/>])?>(.*?)</w:t>",
        r"|<w:tab\s*/>",
        r"|<w:(?:br|cr)(?:\s[^>]*)?/>",
        r"|</w:p>",
    ))
    .expect("word markup regex")
});

static XML_ENTITY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"&(#x[0-9a-fA-F]+|#[0-9]+|amp|lt|gt|quot|apos);").expect("xml entity regex")
});

// ────────────────────────────────────────────────────────────────────────────
// .docx
// ────────────────────────────────────────────────────────────────────────────

/// Reads the main document part out of the OOXML zip container.
pub struct DocxExtractor;

impl DocumentExtractor for DocxExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractError> {
        let mut archive = ZipArchive::new(Cursor::new(bytes)).map_err(|e| {
            ExtractError::parse(DocumentFormat::Docx, format!("not a zip container: {e}"))
        })?;

        let mut xml = String::new();
        let mut part = archive.by_name(DOCUMENT_PART).map_err(|e| {
            ExtractError::parse(DocumentFormat::Docx, format!("missing {DOCUMENT_PART}: {e}"))
        })?;
        part.read_to_string(&mut xml).map_err(|e| {
            ExtractError::parse(DocumentFormat::Docx, format!("unreadable {DOCUMENT_PART}: {e}"))
        })?;

        Ok(document_xml_to_text(&xml))
    }
}

/// Flattens WordprocessingML into text: runs verbatim, a tab per `<w:tab/>`,
/// a newline per break and per closed paragraph. Empty self-closing runs
/// (`<w:t xml:space="preserve"/>`) contribute nothing.
fn document_xml_to_text(xml: &str) -> String {
    let mut text = String::with_capacity(xml.len() / 4);

    for caps in WORD_MARKUP.captures_iter(xml) {
        if let Some(run) = caps.get(1) {
            text.push_str(&decode_entities(run.as_str()));
            continue;
        }
        let tag = caps.get(0).map(|m| m.as_str()).unwrap_or_default();
        if tag.starts_with("<w:tab") {
            text.push('\t');
        } else if tag.starts_with("<w:t") {
            continue;
        } else {
            text.push('\n');
        }
    }

    text
}

fn decode_entities(raw: &str) -> String {
    if !raw.contains('&') {
        return raw.to_string();
    }
    XML_ENTITY
        .replace_all(raw, |caps: &Captures| {
            let entity = &caps[1];
            let decoded = match entity {
                "amp" => Some('&'),
                "lt" => Some('<'),
                "gt" => Some('>'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                _ => {
                    let code = if let Some(hex) = entity.strip_prefix("#x") {
                        u32::from_str_radix(hex, 16).ok()
                    } else {
                        entity[1..].parse::<u32>().ok()
                    };
                    code.and_then(char::from_u32)
                }
            };
            decoded.map(String::from).unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

// ────────────────────────────────────────────────────────────────────────────
// .doc
// ────────────────────────────────────────────────────────────────────────────

/// Lossy reader for Word 97-2003 binaries.
///
/// Files that are really OOXML under a `.doc` name are routed to
/// [`DocxExtractor`]. Genuine compound files are scanned for printable runs,
/// both as UTF-16LE and as 8-bit text, and the richer reading wins.
pub struct LegacyWordExtractor;

impl DocumentExtractor for LegacyWordExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractError> {
        if bytes.starts_with(ZIP_SIGNATURE) {
            debug!("Legacy .doc upload is an OOXML container; using docx reader");
            return DocxExtractor.extract(bytes);
        }
        if !bytes.starts_with(OLE_SIGNATURE) {
            return Err(ExtractError::parse(
                DocumentFormat::Doc,
                "missing compound file signature",
            ));
        }

        let wide = utf16_runs(bytes);
        let narrow = ascii_runs(bytes);
        let text = if letter_count(&wide) >= letter_count(&narrow) {
            wide
        } else {
            narrow
        };

        Ok(text)
    }
}

fn utf16_runs(bytes: &[u8]) -> String {
    let chars = bytes
        .chunks_exact(2)
        .map(|pair| u32::from(u16::from_le_bytes([pair[0], pair[1]])))
        .map(|unit| char::from_u32(unit).filter(|c| is_document_char(*c)));
    collect_runs(chars)
}

fn ascii_runs(bytes: &[u8]) -> String {
    let chars = bytes.iter().map(|&b| {
        let c = char::from(b);
        (c.is_ascii_graphic() || matches!(c, ' ' | '\t' | '\r' | '\n')).then_some(c)
    });
    collect_runs(chars)
}

/// Latin text plus the punctuation and bullets resumes commonly use. Anything
/// wider is almost always binary noise read as UTF-16.
fn is_document_char(c: char) -> bool {
    match c {
        '\t' | '\r' | '\n' => true,
        c if c.is_control() => false,
        '\u{20}'..='\u{24F}' | '\u{2010}'..='\u{2027}' | '\u{25CF}' => true,
        _ => false,
    }
}

fn collect_runs(chars: impl Iterator<Item = Option<char>>) -> String {
    let mut runs: Vec<String> = Vec::new();
    let mut current = String::new();

    let mut flush = |current: &mut String| {
        let run = current.trim();
        if run.chars().count() >= MIN_RUN_CHARS && !OLE_DIRECTORY_NAMES.contains(&run) {
            runs.push(run.replace('\r', "\n"));
        }
        current.clear();
    };

    for c in chars {
        match c {
            Some(c) => current.push(c),
            None => flush(&mut current),
        }
    }
    flush(&mut current);

    runs.join("\n")
}

fn letter_count(text: &str) -> usize {
    text.chars().filter(|c| c.is_alphabetic()).count()
}
