use rust_decimal::Decimal;

use crate::core::package::normalize;
use crate::domain::model::{Credentials, QuoteRequest};
use crate::domain::ports::Params;

/// 價格與時效都要 (nIndicaCalculo=3)
const CALCULATION_KIND: &str = "3";
const RESPONSE_FORMAT: &str = "xml";

/// Builds the query parameters for the price/lead-time calculator.
///
/// `origin` and `destination` must already be validated. Request-level
/// credentials take precedence over `fallback_credentials`.
pub fn quote_params(
    request: &QuoteRequest,
    origin: &str,
    destination: &str,
    fallback_credentials: Option<&Credentials>,
) -> Params {
    let package = if request.adjust_package {
        normalize(&request.package)
    } else {
        request.package
    };

    let credentials = request.credentials.as_ref().or(fallback_credentials);
    let (user, password) = credentials
        .map(|c| (c.user.clone(), c.password.clone()))
        .unwrap_or_default();

    let declared_value = request.declared_value.unwrap_or(Decimal::ZERO);

    let mut params = Params::new();
    params.insert("nCdEmpresa".to_string(), user);
    params.insert("sDsSenha".to_string(), password);
    params.insert("nCdServico".to_string(), request.services.join(","));
    params.insert("sCepOrigem".to_string(), origin.to_string());
    params.insert("sCepDestino".to_string(), destination.to_string());
    params.insert("nVlPeso".to_string(), package.weight_kg.to_string());
    params.insert("nCdFormato".to_string(), package.shape.code().to_string());
    params.insert("nVlComprimento".to_string(), package.length.to_string());
    params.insert("nVlAltura".to_string(), package.height.to_string());
    params.insert("nVlLargura".to_string(), package.width.to_string());
    params.insert("nVlDiametro".to_string(), package.diameter.to_string());
    params.insert("sCdMaoPropria".to_string(), yes_no(request.hand_delivery));
    params.insert("nVlValorDeclarado".to_string(), declared_value.to_string());
    params.insert("sCdAvisoRecebimento".to_string(), yes_no(request.return_receipt));
    params.insert("nIndicaCalculo".to_string(), CALCULATION_KIND.to_string());
    params.insert("StrRetorno".to_string(), RESPONSE_FORMAT.to_string());
    params
}

fn yes_no(flag: bool) -> String {
    let value = if flag { "S" } else { "N" };
    value.to_string()
}
