use crate::domain::model::{PackageSpec, QuoteRequest, Shape};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;

#[derive(Debug, Clone, Parser)]
#[command(name = "correios")]
#[command(about = "Shipping quotes, address lookup and tracking for Correios")]
pub struct CliConfig {
    /// Path to TOML configuration file (defaults are used when absent)
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Price and delivery estimate between two postal codes
    Quote(QuoteArgs),
    /// Address registered for a postal code
    Address {
        postal_code: String,
    },
    /// Tracking history of an object, most recent first
    Track {
        code: String,
    },
}

#[derive(Debug, Clone, Args)]
pub struct QuoteArgs {
    #[arg(long)]
    pub from: String,

    #[arg(long)]
    pub to: String,

    /// Comma separated service codes (PAC=41106, SEDEX=40010, ...)
    #[arg(long, value_delimiter = ',', default_values_t = vec!["41106".to_string(), "40010".to_string()])]
    pub services: Vec<String>,

    #[arg(long, default_value = "box")]
    pub shape: Shape,

    #[arg(long, default_value_t = 0.3)]
    pub weight: f64,

    #[arg(long, default_value_t = 16.0)]
    pub length: f64,

    #[arg(long, default_value_t = 11.0)]
    pub width: f64,

    #[arg(long, default_value_t = 2.0)]
    pub height: f64,

    #[arg(long, default_value_t = 5.0)]
    pub diameter: f64,

    #[arg(long)]
    pub declared_value: Option<Decimal>,

    #[arg(long)]
    pub hand_delivery: bool,

    #[arg(long)]
    pub return_receipt: bool,

    /// Send the package dimensions exactly as given
    #[arg(long)]
    pub no_adjust: bool,

    /// Dispatch date used for the delivery estimate (YYYY-MM-DD, default today)
    #[arg(long)]
    pub dispatch_date: Option<NaiveDate>,
}

impl QuoteArgs {
    pub fn to_request(&self) -> QuoteRequest {
        let package = PackageSpec {
            shape: self.shape,
            weight_kg: self.weight,
            length: self.length,
            width: self.width,
            height: self.height,
            diameter: self.diameter,
        };

        let mut request = QuoteRequest::new(self.from.clone(), self.to.clone())
            .with_services(self.services.iter().cloned())
            .with_package(package)
            .with_hand_delivery(self.hand_delivery)
            .with_return_receipt(self.return_receipt)
            .with_package_adjustment(!self.no_adjust);

        if let Some(value) = self.declared_value {
            request = request.with_declared_value(value);
        }

        request
    }
}
