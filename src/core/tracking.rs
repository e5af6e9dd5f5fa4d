//! Rebuilds a tracking history from the flattened cells of the carrier's
//! tracking table.

use chrono::NaiveDateTime;
use regex::Regex;
use std::sync::OnceLock;

use crate::domain::model::TrackingEvent;
use crate::utils::error::{CorreiosError, Result};

const TIMESTAMP_FORMAT: &str = "%d/%m/%Y %H:%M";
const FACILITY_SEPARATOR: &str = " - ";

fn timestamp_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^\d{2}/\d{2}/\d{4} \d{2}:\d{2}$").expect("timestamp pattern is valid")
    })
}

/// An event while scanning: its timestamp and every fragment up to the next
/// timestamp.
#[derive(Debug)]
struct PendingEvent {
    timestamp: NaiveDateTime,
    data: Vec<String>,
}

/// Reconstructs tracking events, most recent first.
///
/// `fragments` are the table cells read left-to-right, top-to-bottom with
/// the header cells already removed. A fragment shaped `dd/mm/yyyy HH:MM`
/// opens an event; the fragments after it are its location and description.
pub fn reconstruct(fragments: &[String]) -> Result<Vec<TrackingEvent>> {
    let mut pending: Vec<PendingEvent> = Vec::new();

    for fragment in fragments {
        let text = fragment.trim();

        if let Some(timestamp) = parse_timestamp(text) {
            pending.push(PendingEvent {
                timestamp,
                data: Vec::new(),
            });
        } else if let Some(current) = pending.last_mut() {
            current.data.push(text.to_string());
        } else {
            tracing::debug!(fragment = text, "skipping fragment before first event");
        }
    }

    if pending.is_empty() {
        return Err(CorreiosError::not_found(
            "no tracking events found for this object",
        ));
    }

    // 頁面是新到舊；先反轉，同一分鐘的事件在穩定排序後仍是舊到新
    pending.reverse();
    pending.sort_by_key(|event| event.timestamp);

    let mut last_facility: Option<String> = None;
    let mut events: Vec<TrackingEvent> = pending
        .into_iter()
        .map(|event| {
            let mut data = event.data.into_iter();
            let location = data.next().unwrap_or_default();
            let description = data
                .filter(|text| !text.is_empty())
                .collect::<Vec<_>>()
                .join(" ");

            let (facility, city_state) = match location.rsplit_once(FACILITY_SEPARATOR) {
                Some((facility, city_state)) => {
                    let facility = facility.trim().to_string();
                    last_facility = Some(facility.clone());
                    (Some(facility), city_state)
                }
                None => (last_facility.clone(), location.as_str()),
            };

            let (city, state) = split_city_state(city_state);

            TrackingEvent {
                timestamp: event.timestamp,
                description,
                facility,
                city,
                state,
            }
        })
        .collect();

    events.reverse();
    Ok(events)
}

fn parse_timestamp(text: &str) -> Option<NaiveDateTime> {
    if !timestamp_pattern().is_match(text) {
        return None;
    }
    NaiveDateTime::parse_from_str(text, TIMESTAMP_FORMAT).ok()
}

/// "CURITIBA/PR" -> ("CURITIBA", "PR")
pub(crate) fn split_city_state(text: &str) -> (String, String) {
    match text.split_once('/') {
        Some((city, state)) => (city.trim().to_string(), state.trim().to_string()),
        None => (text.trim().to_string(), String::new()),
    }
}
