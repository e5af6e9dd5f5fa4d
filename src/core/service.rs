use crate::adapters::{html, xml};
use crate::core::address::parse_address;
use crate::core::params::quote_params;
use crate::core::quote::Quote;
use crate::core::tracking::reconstruct;
use crate::domain::model::{Address, QuoteRequest, TrackingEvent};
use crate::domain::ports::{ConfigProvider, Params, Transport};
use crate::utils::error::{CorreiosError, Result};
use crate::utils::validation::{validate_postal_code, validate_tracking_code};

const ADDRESS_CELLS: &str = "table.tmptabela td";
const TRACKING_TABLE: &str = "table";
const TRACKING_CELLS: &str = "table td";
/// Data / Local / Situação
const TRACKING_HEADER_CELLS: usize = 3;

/// Client for the carrier's quote, address and tracking services.
pub struct Correios<T: Transport, C: ConfigProvider> {
    transport: T,
    config: C,
}

impl<T: Transport, C: ConfigProvider> Correios<T, C> {
    pub fn new(transport: T, config: C) -> Self {
        Self { transport, config }
    }

    /// Prices and lead times for every service in `request`.
    pub async fn calculate_shipping(&self, request: &QuoteRequest) -> Result<Vec<Quote>> {
        let origin = validate_postal_code("origin", &request.origin)?;
        let destination = validate_postal_code("destination", &request.destination)?;

        let params = quote_params(request, &origin, &destination, self.config.credentials());
        tracing::info!(
            "Requesting quotes {} -> {} for services {}",
            origin,
            destination,
            request.services.join(",")
        );

        let body = self
            .transport
            .get(self.config.quote_endpoint(), &params)
            .await?;

        let quotes = xml::quote_records(&body)?
            .iter()
            .map(Quote::from_record)
            .collect::<Result<Vec<_>>>()?;

        for quote in quotes.iter().filter(|quote| quote.has_error()) {
            tracing::warn!(
                "Service {} answered with error {}: {}",
                quote.service_code(),
                quote.error_code(),
                quote.error_message()
            );
        }

        tracing::info!("Received {} quotes", quotes.len());
        Ok(quotes)
    }

    /// Address registered for `postal_code`.
    pub async fn find_address(&self, postal_code: &str) -> Result<Address> {
        let postal_code = validate_postal_code("postal_code", postal_code)?;

        let mut form = Params::new();
        form.insert("relaxation".to_string(), postal_code.clone());
        form.insert("tipoCEP".to_string(), "ALL".to_string());
        form.insert("semelhante".to_string(), "N".to_string());

        tracing::info!("Looking up address for postal code {}", postal_code);
        let body = self
            .transport
            .post(self.config.address_endpoint(), &form)
            .await?;

        let fragments = html::select_texts(&body, ADDRESS_CELLS)?;
        tracing::debug!("Address page yielded {} fragments", fragments.len());

        parse_address(&fragments)
    }

    /// Tracking history for `code`, most recent event first.
    pub async fn track(&self, code: &str) -> Result<Vec<TrackingEvent>> {
        let code = validate_tracking_code("code", code)?;

        let mut query = Params::new();
        query.insert("P_LINGUA".to_string(), "001".to_string());
        query.insert("P_TIPO".to_string(), "001".to_string());
        query.insert("P_COD_UNI".to_string(), code.clone());

        tracing::info!("Tracking object {}", code);
        let body = self
            .transport
            .get(self.config.tracking_endpoint(), &query)
            .await?;

        if !html::contains(&body, TRACKING_TABLE)? {
            return Err(CorreiosError::not_found(format!(
                "no tracking data available for {}",
                code
            )));
        }

        let fragments = html::select_texts(&body, TRACKING_CELLS)?;
        let events = reconstruct(fragments.get(TRACKING_HEADER_CELLS..).unwrap_or_default())?;

        tracing::info!("Object {} has {} tracking events", code, events.len());
        Ok(events)
    }
}
