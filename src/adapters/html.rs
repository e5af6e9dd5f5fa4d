//! Text extraction from carrier HTML pages.

use scraper::{Html, Selector};

use crate::utils::error::{CorreiosError, Result};

fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| {
        CorreiosError::invalid_argument("selector", format!("'{}': {}", selector, e))
    })
}

/// Returns the trimmed text of every element matching `selector`, in
/// document order.
pub fn select_texts(document: &str, selector: &str) -> Result<Vec<String>> {
    let selector = parse_selector(selector)?;
    let html = Html::parse_document(document);

    Ok(html
        .select(&selector)
        .map(|element| element.text().collect::<String>().trim().to_string())
        .collect())
}

/// Whether at least one element matches `selector`.
pub fn contains(document: &str, selector: &str) -> Result<bool> {
    let selector = parse_selector(selector)?;
    let html = Html::parse_document(document);
    let found = html.select(&selector).next().is_some();
    Ok(found)
}
