use crate::utils::error::{CorreiosError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

const POSTAL_CODE_LENGTH: usize = 8;

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(CorreiosError::invalid_argument(
            field_name,
            "URL cannot be empty",
        ));
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(CorreiosError::invalid_argument(
                field_name,
                format!("Unsupported URL scheme: {}", scheme),
            )),
        },
        Err(e) => Err(CorreiosError::invalid_argument(
            field_name,
            format!("Invalid URL format: {}", e),
        )),
    }
}

pub fn validate_positive_number(field_name: &str, value: u64, min_value: u64) -> Result<()> {
    if value < min_value {
        return Err(CorreiosError::invalid_argument(
            field_name,
            format!("Value must be at least {}", min_value),
        ));
    }
    Ok(())
}

/// 驗證 CEP：去掉連字號後必須是 8 位數字，回傳正規化後的字串
pub fn validate_postal_code(field_name: &str, value: &str) -> Result<String> {
    let digits = value.trim().replace('-', "");

    if digits.len() != POSTAL_CODE_LENGTH || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(CorreiosError::invalid_argument(
            field_name,
            format!(
                "'{}' is not a valid postal code, expected {} digits",
                value, POSTAL_CODE_LENGTH
            ),
        ));
    }

    Ok(digits)
}

/// 驗證追蹤碼：兩個字母 + 9 位數字 + 兩個字母，例如 SS123456789BR
pub fn validate_tracking_code(field_name: &str, value: &str) -> Result<String> {
    let code = value.trim().to_ascii_uppercase();
    let bytes = code.as_bytes();

    let well_formed = bytes.len() == 13
        && bytes[..2].iter().all(u8::is_ascii_alphabetic)
        && bytes[2..11].iter().all(u8::is_ascii_digit)
        && bytes[11..].iter().all(u8::is_ascii_alphabetic);

    if !well_formed {
        return Err(CorreiosError::invalid_argument(
            field_name,
            format!("'{}' is not a valid tracking code", value),
        ));
    }

    Ok(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("endpoints.quote", "https://example.com").is_ok());
        assert!(validate_url("endpoints.quote", "http://example.com").is_ok());
        assert!(validate_url("endpoints.quote", "").is_err());
        assert!(validate_url("endpoints.quote", "invalid-url").is_err());
        assert!(validate_url("endpoints.quote", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("http.timeout_seconds", 5, 1).is_ok());
        assert!(validate_positive_number("http.timeout_seconds", 0, 1).is_err());
    }

    #[test]
    fn test_validate_postal_code() {
        assert_eq!(validate_postal_code("cep", "01310-100").unwrap(), "01310100");
        assert_eq!(validate_postal_code("cep", "70040010").unwrap(), "70040010");
        assert!(validate_postal_code("cep", "7004001").is_err());
        assert!(validate_postal_code("cep", "7004001A").is_err());
        assert!(validate_postal_code("cep", "").is_err());
        assert!(validate_postal_code("cep", "700.40-010").is_err());
    }

    #[test]
    fn test_validate_tracking_code() {
        assert_eq!(
            validate_tracking_code("code", "ss123456789br").unwrap(),
            "SS123456789BR"
        );
        assert!(validate_tracking_code("code", "SS12345678BR").is_err());
        assert!(validate_tracking_code("code", "1S123456789BR").is_err());
        assert!(validate_tracking_code("code", "SS123456789B1").is_err());
    }
}
