pub mod address;
pub mod package;
pub mod params;
pub mod quote;
pub mod service;
pub mod tracking;

pub use crate::domain::model::{Address, PackageSpec, QuoteRequest, Shape, TrackingEvent};
pub use crate::domain::ports::{ConfigProvider, Params, Transport};
pub use crate::utils::error::Result;
