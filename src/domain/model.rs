use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::utils::error::CorreiosError;

/// Physical packaging category, each with its own dimension table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    Box,
    Roll,
    Envelope,
}

impl Shape {
    /// `nCdFormato` code expected by the carrier.
    pub fn code(&self) -> u8 {
        match self {
            Self::Box => 1,
            Self::Roll => 2,
            Self::Envelope => 3,
        }
    }
}

impl FromStr for Shape {
    type Err = CorreiosError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "box" | "caixa" | "1" => Ok(Self::Box),
            "roll" | "rolo" | "2" => Ok(Self::Roll),
            "envelope" | "3" => Ok(Self::Envelope),
            other => Err(CorreiosError::invalid_argument(
                "shape",
                format!("unknown package shape '{}'", other),
            )),
        }
    }
}

/// Package dimensions in centimetres, weight in kilograms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PackageSpec {
    pub shape: Shape,
    pub weight_kg: f64,
    pub length: f64,
    pub width: f64,
    pub height: f64,
    pub diameter: f64,
}

impl Default for PackageSpec {
    fn default() -> Self {
        Self {
            shape: Shape::Box,
            weight_kg: 0.3,
            length: 16.0,
            width: 11.0,
            height: 2.0,
            diameter: 5.0,
        }
    }
}

/// Known carrier services.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Service {
    Pac,
    Sedex,
    SedexACobrar,
    Sedex10,
    SedexHoje,
    ESedex,
}

impl Service {
    pub const ALL: [Service; 6] = [
        Service::Pac,
        Service::Sedex,
        Service::SedexACobrar,
        Service::Sedex10,
        Service::SedexHoje,
        Service::ESedex,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Self::Pac => "41106",
            Self::Sedex => "40010",
            Self::SedexACobrar => "40045",
            Self::Sedex10 => "40215",
            Self::SedexHoje => "40290",
            Self::ESedex => "81019",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Pac => "PAC",
            Self::Sedex => "SEDEX",
            Self::SedexACobrar => "SEDEX a Cobrar",
            Self::Sedex10 => "SEDEX 10",
            Self::SedexHoje => "SEDEX Hoje",
            Self::ESedex => "e-SEDEX",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim();
        Self::ALL.into_iter().find(|service| service.code() == code)
    }
}

/// Contract credentials (`nCdEmpresa` / `sDsSenha`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub user: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuoteRequest {
    pub origin: String,
    pub destination: String,
    pub services: Vec<String>,
    pub package: PackageSpec,
    pub declared_value: Option<Decimal>,
    pub hand_delivery: bool,
    pub return_receipt: bool,
    pub credentials: Option<Credentials>,
    /// When false the package is sent exactly as given.
    pub adjust_package: bool,
}

impl QuoteRequest {
    pub fn new(origin: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
            services: vec![
                Service::Pac.code().to_string(),
                Service::Sedex.code().to_string(),
            ],
            package: PackageSpec::default(),
            declared_value: None,
            hand_delivery: false,
            return_receipt: false,
            credentials: None,
            adjust_package: true,
        }
    }

    pub fn with_services<I, S>(mut self, services: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.services = services.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_package(mut self, package: PackageSpec) -> Self {
        self.package = package;
        self
    }

    pub fn with_declared_value(mut self, value: Decimal) -> Self {
        self.declared_value = Some(value);
        self
    }

    pub fn with_hand_delivery(mut self, enabled: bool) -> Self {
        self.hand_delivery = enabled;
        self
    }

    pub fn with_return_receipt(mut self, enabled: bool) -> Self {
        self.return_receipt = enabled;
        self
    }

    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    pub fn with_package_adjustment(mut self, enabled: bool) -> Self {
        self.adjust_package = enabled;
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub street: Option<String>,
    pub street_extra: Option<String>,
    pub district: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackingEvent {
    pub timestamp: NaiveDateTime,
    pub description: String,
    pub facility: Option<String>,
    pub city: String,
    pub state: String,
}
