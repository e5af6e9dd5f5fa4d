use crate::domain::model::Credentials;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{CorreiosError, Result};
use crate::utils::validation::{validate_positive_number, validate_url, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_QUOTE_ENDPOINT: &str = "http://ws.correios.com.br/calculador/CalcPrecoPrazo.aspx";
pub const DEFAULT_ADDRESS_ENDPOINT: &str =
    "http://www.buscacep.correios.com.br/sistemas/buscacep/resultadoBuscaCepEndereco.cfm";
pub const DEFAULT_TRACKING_ENDPOINT: &str = "http://websro.correios.com.br/sro_bin/txect01$.QueryList";

const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
const DEFAULT_USER_AGENT: &str = concat!("correios-rs/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub endpoints: EndpointConfig,
    pub credentials: Option<Credentials>,
    #[serde(default)]
    pub http: HttpConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointConfig {
    pub quote: String,
    pub address: String,
    pub tracking: String,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            quote: DEFAULT_QUOTE_ENDPOINT.to_string(),
            address: DEFAULT_ADDRESS_ENDPOINT.to_string(),
            tracking: DEFAULT_TRACKING_ENDPOINT.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub timeout_seconds: u64,
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl HttpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl ClientConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(CorreiosError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| CorreiosError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${CORREIOS_PASSWORD})，未設定的保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| CorreiosError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

impl Validate for ClientConfig {
    fn validate(&self) -> Result<()> {
        validate_url("endpoints.quote", &self.endpoints.quote)?;
        validate_url("endpoints.address", &self.endpoints.address)?;
        validate_url("endpoints.tracking", &self.endpoints.tracking)?;
        validate_positive_number("http.timeout_seconds", self.http.timeout_seconds, 1)?;

        if let Some(credentials) = &self.credentials {
            if credentials.user.trim().is_empty() {
                return Err(CorreiosError::invalid_argument(
                    "credentials.user",
                    "Value cannot be empty when credentials are given",
                ));
            }
        }

        Ok(())
    }
}

impl ConfigProvider for ClientConfig {
    fn quote_endpoint(&self) -> &str {
        &self.endpoints.quote
    }

    fn address_endpoint(&self) -> &str {
        &self.endpoints.address
    }

    fn tracking_endpoint(&self) -> &str {
        &self.endpoints.tracking
    }

    fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }
}
