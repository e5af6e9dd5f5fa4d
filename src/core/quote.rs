//! Quote model built from one carrier `cServico` record.

use chrono::{Datelike, Days, NaiveDate, Weekday};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;
use std::str::FromStr;

use crate::domain::model::Service;
use crate::utils::error::{CorreiosError, Result};

/// Raw quote record as delivered by the markup layer, keyed by carrier
/// field name.
pub type RawQuoteRecord = BTreeMap<String, String>;

/// Carrier field names read from a raw record.
pub const QUOTE_FIELDS: [&str; 11] = [
    "Codigo",
    "Valor",
    "PrazoEntrega",
    "ValorSemAdicionais",
    "ValorMaoPropria",
    "ValorAvisoRecebimento",
    "ValorValorDeclarado",
    "EntregaDomiciliar",
    "EntregaSabado",
    "Erro",
    "MsgErro",
];

const CURRENCY_PREFIX: &str = "R$ ";

/// Monetary fields of a [`Quote`] that can be formatted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoneyField {
    Price,
    PriceBase,
    PriceHandDelivery,
    PriceReturnReceipt,
    PriceDeclaredValue,
}

impl FromStr for MoneyField {
    type Err = CorreiosError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "price" => Ok(Self::Price),
            "price_base" => Ok(Self::PriceBase),
            "price_hand_delivery" => Ok(Self::PriceHandDelivery),
            "price_return_receipt" => Ok(Self::PriceReturnReceipt),
            "price_declared_value" => Ok(Self::PriceDeclaredValue),
            other => Err(CorreiosError::invalid_argument(
                "field",
                format!("'{}' is not a monetary field", other),
            )),
        }
    }
}

/// One service's price and lead time. Read-only once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Quote {
    service_code: String,
    price: Decimal,
    price_base: Decimal,
    price_hand_delivery: Decimal,
    price_return_receipt: Decimal,
    price_declared_value: Decimal,
    lead_time_days: u32,
    home_delivery: bool,
    saturday_delivery: bool,
    error_code: String,
    error_message: String,
}

impl Quote {
    /// Builds a quote from one raw record, renaming the carrier fields once.
    pub fn from_record(record: &RawQuoteRecord) -> Result<Self> {
        if record.is_empty() {
            return Err(CorreiosError::invalid_argument(
                "record",
                "shipping data is required to build a quote",
            ));
        }

        let field = |name: &str| required(record, name);

        Ok(Self {
            service_code: field("Codigo")?.trim().to_string(),
            price: parse_money("Valor", field("Valor")?)?,
            price_base: parse_money("ValorSemAdicionais", field("ValorSemAdicionais")?)?,
            price_hand_delivery: parse_money("ValorMaoPropria", field("ValorMaoPropria")?)?,
            price_return_receipt: parse_money(
                "ValorAvisoRecebimento",
                field("ValorAvisoRecebimento")?,
            )?,
            price_declared_value: parse_money(
                "ValorValorDeclarado",
                field("ValorValorDeclarado")?,
            )?,
            lead_time_days: parse_days(field("PrazoEntrega")?)?,
            home_delivery: parse_flag(field("EntregaDomiciliar")?),
            saturday_delivery: parse_flag(field("EntregaSabado")?),
            error_code: field("Erro")?.trim().to_string(),
            error_message: field("MsgErro")?.trim().to_string(),
        })
    }

    pub fn service_code(&self) -> &str {
        &self.service_code
    }

    pub fn lead_time_days(&self) -> u32 {
        self.lead_time_days
    }

    pub fn home_delivery(&self) -> bool {
        self.home_delivery
    }

    pub fn saturday_delivery(&self) -> bool {
        self.saturday_delivery
    }

    pub fn error_code(&self) -> &str {
        &self.error_code
    }

    pub fn error_message(&self) -> &str {
        &self.error_message
    }

    pub fn service(&self) -> Option<Service> {
        Service::from_code(&self.service_code)
    }

    /// Human-readable service name; `None` for codes outside the known table.
    pub fn service_name(&self) -> Option<&'static str> {
        self.service().map(|service| service.name())
    }

    /// 錯誤碼 "0" 或空字串代表沒有錯誤
    pub fn has_error(&self) -> bool {
        !self.error_code.trim().trim_start_matches('0').is_empty()
    }

    pub fn amount(&self, field: MoneyField) -> Decimal {
        match field {
            MoneyField::Price => self.price,
            MoneyField::PriceBase => self.price_base,
            MoneyField::PriceHandDelivery => self.price_hand_delivery,
            MoneyField::PriceReturnReceipt => self.price_return_receipt,
            MoneyField::PriceDeclaredValue => self.price_declared_value,
        }
    }

    /// Delivery date for a package dispatched on `dispatch`.
    ///
    /// A Saturday arrival without Saturday delivery moves to Monday and a
    /// Sunday arrival moves to Monday. Only one correction is applied.
    /// A date past the calendar range is `InvalidArgument`.
    pub fn estimated_delivery_date(&self, dispatch: NaiveDate) -> Result<NaiveDate> {
        let shift = |date: NaiveDate, days: u64| {
            date.checked_add_days(Days::new(days)).ok_or_else(|| {
                CorreiosError::invalid_argument(
                    "dispatch",
                    format!(
                        "{} plus {} days is out of the calendar range",
                        dispatch, self.lead_time_days
                    ),
                )
            })
        };

        let arrival = shift(dispatch, u64::from(self.lead_time_days))?;

        match arrival.weekday() {
            Weekday::Sat if !self.saturday_delivery => shift(arrival, 2),
            Weekday::Sun => shift(arrival, 1),
            _ => Ok(arrival),
        }
    }

    /// Formats a monetary field as `1.234,56`, optionally prefixed with `R$ `.
    pub fn format_currency(&self, field: &str, with_prefix: bool) -> Result<String> {
        let field = MoneyField::from_str(field)?;
        let formatted = format_brl(self.amount(field));

        Ok(if with_prefix {
            format!("{}{}", CURRENCY_PREFIX, formatted)
        } else {
            formatted
        })
    }
}

fn required<'a>(record: &'a RawQuoteRecord, name: &str) -> Result<&'a str> {
    record.get(name).map(String::as_str).ok_or_else(|| {
        CorreiosError::invalid_argument("record", format!("missing field '{}'", name))
    })
}

/// "1.234,56" / "1550" -> minor units -> major units.
fn parse_money(name: &str, raw: &str) -> Result<Decimal> {
    let digits: String = raw
        .trim()
        .chars()
        .filter(|c| *c != ',' && *c != '.')
        .collect();

    if digits.is_empty() {
        return Ok(Decimal::ZERO);
    }

    let minor_units: i64 = digits.parse().map_err(|_| {
        CorreiosError::invalid_argument(name, format!("'{}' is not a monetary amount", raw))
    })?;

    Ok(Decimal::new(minor_units, 2))
}

fn parse_days(raw: &str) -> Result<u32> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(0);
    }

    raw.parse().map_err(|_| {
        CorreiosError::invalid_argument("PrazoEntrega", format!("'{}' is not a day count", raw))
    })
}

fn parse_flag(raw: &str) -> bool {
    raw.trim() == "S"
}

fn format_brl(amount: Decimal) -> String {
    let rounded = amount.round_dp(2);
    let text = format!("{:.2}", rounded.abs());
    let (integer, fraction) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (index, digit) in integer.chars().enumerate() {
        if index > 0 && (integer.len() - index) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };

    format!("{}{},{}", sign, grouped, fraction)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> RawQuoteRecord {
        [
            ("Codigo", "41106"),
            ("Valor", "15,50"),
            ("PrazoEntrega", "11"),
            ("ValorSemAdicionais", "15,50"),
            ("ValorMaoPropria", "0,00"),
            ("ValorAvisoRecebimento", "0,00"),
            ("ValorValorDeclarado", "0,00"),
            ("EntregaDomiciliar", "S"),
            ("EntregaSabado", "S"),
            ("Erro", "010"),
            (
                "MsgErro",
                "O CEP de destino está sujeito a condições especiais de entrega.",
            ),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    }

    /// sample_record 覆寫部分欄位
    fn quote_with(overrides: &[(&str, &str)]) -> Quote {
        let mut record = sample_record();
        for (name, value) in overrides {
            record.insert(name.to_string(), value.to_string());
        }
        Quote::from_record(&record).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_from_record_converts_fields() {
        let quote = Quote::from_record(&sample_record()).unwrap();

        assert_eq!(quote.service_code(), "41106");
        assert_eq!(quote.price, Decimal::new(1550, 2));
        assert_eq!(quote.price_hand_delivery, Decimal::ZERO);
        assert_eq!(quote.lead_time_days(), 11);
        assert!(quote.home_delivery());
        assert!(quote.saturday_delivery());
        assert_eq!(quote.error_code(), "010");
        assert_eq!(quote.service_name(), Some("PAC"));
    }

    #[test]
    fn test_minor_units_without_separator() {
        let mut record = sample_record();
        record.insert("Valor".to_string(), "1550".to_string());
        record.insert("ValorSemAdicionais".to_string(), "1.234,56".to_string());

        let quote = Quote::from_record(&record).unwrap();
        assert_eq!(quote.price, Decimal::new(1550, 2));
        assert_eq!(quote.price_base, Decimal::new(123456, 2));
    }

    #[test]
    fn test_empty_record_is_rejected() {
        let err = Quote::from_record(&RawQuoteRecord::new()).unwrap_err();
        assert!(matches!(err, CorreiosError::InvalidArgument { .. }));
    }

    #[test]
    fn test_missing_field_is_rejected() {
        let mut record = sample_record();
        record.remove("EntregaSabado");

        let err = Quote::from_record(&record).unwrap_err();
        assert!(err.to_string().contains("EntregaSabado"));
    }

    #[test]
    fn test_unknown_service_has_no_name() {
        let mut record = sample_record();
        record.insert("Codigo".to_string(), "99999".to_string());

        let quote = Quote::from_record(&record).unwrap();
        assert_eq!(quote.service_name(), None);
    }

    #[test]
    fn test_flags_other_than_s_are_false() {
        let mut record = sample_record();
        record.insert("EntregaDomiciliar".to_string(), "N".to_string());
        record.insert("EntregaSabado".to_string(), "s".to_string());

        let quote = Quote::from_record(&record).unwrap();
        assert!(!quote.home_delivery());
        assert!(!quote.saturday_delivery());
    }

    #[test]
    fn test_has_error() {
        let quote = Quote::from_record(&sample_record()).unwrap();
        assert!(quote.has_error());

        let quote = quote_with(&[("Erro", "0")]);
        assert!(!quote.has_error());
    }

    #[test]
    fn test_delivery_date_on_weekday() {
        let quote = Quote::from_record(&sample_record()).unwrap();
        // 2015-05-07 週四 + 11 天 = 2015-05-18 週一
        assert_eq!(
            quote.estimated_delivery_date(date(2015, 5, 7)).unwrap(),
            date(2015, 5, 18)
        );
    }

    #[test]
    fn test_delivery_date_saturday_rolls_to_monday() {
        let quote = quote_with(&[("PrazoEntrega", "2"), ("EntregaSabado", "N")]);

        // 2015-05-07 + 2 = 2015-05-09 週六
        assert_eq!(
            quote.estimated_delivery_date(date(2015, 5, 7)).unwrap(),
            date(2015, 5, 11)
        );

        let quote = quote_with(&[("PrazoEntrega", "2"), ("EntregaSabado", "S")]);
        assert_eq!(
            quote.estimated_delivery_date(date(2015, 5, 7)).unwrap(),
            date(2015, 5, 9)
        );
    }

    #[test]
    fn test_delivery_date_sunday_rolls_to_monday() {
        let quote = quote_with(&[("PrazoEntrega", "3")]);

        // 2015-05-07 + 3 = 2015-05-10 週日
        assert_eq!(
            quote.estimated_delivery_date(date(2015, 5, 7)).unwrap(),
            date(2015, 5, 11)
        );
    }

    #[test]
    fn test_delivery_date_out_of_range_is_an_error() {
        let quote = quote_with(&[("PrazoEntrega", "4000000000")]);
        assert_eq!(quote.lead_time_days(), 4_000_000_000);

        let err = quote.estimated_delivery_date(date(2015, 5, 7)).unwrap_err();
        assert!(matches!(err, CorreiosError::InvalidArgument { .. }));

        let quote = quote_with(&[("PrazoEntrega", "1")]);
        let err = quote.estimated_delivery_date(NaiveDate::MAX).unwrap_err();
        assert!(matches!(err, CorreiosError::InvalidArgument { .. }));
    }

    #[test]
    fn test_format_currency() {
        let quote = Quote::from_record(&sample_record()).unwrap();

        assert_eq!(quote.format_currency("price", true).unwrap(), "R$ 15,50");
        assert_eq!(quote.format_currency("price", false).unwrap(), "15,50");
        assert_eq!(
            quote.format_currency("price_declared_value", true).unwrap(),
            "R$ 0,00"
        );
    }

    #[test]
    fn test_format_currency_thousands() {
        assert_eq!(format_brl(Decimal::new(123456789, 2)), "1.234.567,89");
        assert_eq!(format_brl(Decimal::new(100000, 2)), "1.000,00");
        assert_eq!(format_brl(Decimal::new(99999, 2)), "999,99");
    }

    #[test]
    fn test_format_currency_unknown_field() {
        let quote = Quote::from_record(&sample_record()).unwrap();
        let err = quote.format_currency("valor", true).unwrap_err();

        assert!(matches!(err, CorreiosError::InvalidArgument { .. }));
    }
}
