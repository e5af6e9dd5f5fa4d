//! Extraction of `cServico` records from the calculator's XML response.

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::core::quote::{RawQuoteRecord, QUOTE_FIELDS};
use crate::utils::error::{CorreiosError, Result};

const RECORD_TAG: &[u8] = b"cServico";

fn malformed(e: impl std::fmt::Display) -> CorreiosError {
    CorreiosError::MalformedResponse {
        message: e.to_string(),
    }
}

/// Maps a tag name onto the carrier field name it represents, ignoring case.
fn field_name(tag: &[u8]) -> Option<&'static str> {
    QUOTE_FIELDS
        .iter()
        .copied()
        .find(|field| field.as_bytes().eq_ignore_ascii_case(tag))
}

/// Parses every `cServico` element into a raw record. Unknown child
/// elements are ignored.
pub fn quote_records(xml: &str) -> Result<Vec<RawQuoteRecord>> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut records = Vec::new();
    let mut current: Option<RawQuoteRecord> = None;
    let mut field: Option<&'static str> = None;

    loop {
        match reader.read_event().map_err(malformed)? {
            Event::Start(tag) => {
                let name = tag.name();
                if name.as_ref().eq_ignore_ascii_case(RECORD_TAG) {
                    current = Some(RawQuoteRecord::new());
                } else if let Some(record) = current.as_mut() {
                    field = field_name(name.as_ref());
                    if let Some(field) = field {
                        record.entry(field.to_string()).or_default();
                    }
                }
            }
            Event::Empty(tag) => {
                if let (Some(record), Some(field)) = (current.as_mut(), field_name(tag.name().as_ref())) {
                    record.insert(field.to_string(), String::new());
                }
            }
            Event::Text(text) => {
                if let (Some(record), Some(field)) = (current.as_mut(), field) {
                    let value = text.unescape().map_err(malformed)?;
                    record.entry(field.to_string()).or_default().push_str(&value);
                }
            }
            Event::CData(data) => {
                if let (Some(record), Some(field)) = (current.as_mut(), field) {
                    let value = String::from_utf8_lossy(&data.into_inner()).into_owned();
                    record.entry(field.to_string()).or_default().push_str(value.trim());
                }
            }
            Event::End(tag) => {
                if tag.name().as_ref().eq_ignore_ascii_case(RECORD_TAG) {
                    if let Some(record) = current.take() {
                        records.push(record);
                    }
                }
                field = None;
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if current.is_some() {
        return Err(malformed("unterminated cServico element"));
    }

    Ok(records)
}
