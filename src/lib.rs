pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::ClientConfig;

pub use adapters::http::ReqwestTransport;
pub use crate::core::{
    package::normalize,
    quote::{MoneyField, Quote},
    service::Correios,
};
pub use domain::model::{
    Address, Credentials, PackageSpec, QuoteRequest, Service, Shape, TrackingEvent,
};
pub use utils::error::{CorreiosError, ErrorKind, Result};
