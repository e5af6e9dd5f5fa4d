use crate::domain::model::Credentials;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::collections::BTreeMap;

/// Query string or form body sent to the carrier.
pub type Params = BTreeMap<String, String>;

/// HTTP exchange with the carrier. Implementations return the raw response
/// body and report failures as transport errors, which callers propagate
/// untouched.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: &str, query: &Params) -> Result<String>;
    async fn post(&self, url: &str, body: &Params) -> Result<String>;
}

pub trait ConfigProvider: Send + Sync {
    fn quote_endpoint(&self) -> &str;
    fn address_endpoint(&self) -> &str;
    fn tracking_endpoint(&self) -> &str;
    fn credentials(&self) -> Option<&Credentials>;
}
