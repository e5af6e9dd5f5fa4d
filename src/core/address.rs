use crate::core::tracking::split_city_state;
use crate::domain::model::Address;
use crate::utils::error::{CorreiosError, Result};

const STREET_EXTRA_SEPARATOR: &str = " - ";

/// Builds an [`Address`] from the cells of the address search result.
///
/// Two cells (city-wide postal codes): `city/state`, postal code.
/// Four cells: street, district, `city/state`, postal code.
pub fn parse_address(fragments: &[String]) -> Result<Address> {
    match fragments {
        [] => Err(CorreiosError::not_found("no address found for this postal code")),
        [city_state, postal_code] => {
            let (city, state) = split_city_state(city_state);
            Ok(Address {
                city: non_empty(city),
                state: non_empty(state),
                postal_code: non_empty(postal_code.trim().to_string()),
                ..Address::default()
            })
        }
        [street, district, city_state, postal_code, rest @ ..] => {
            if !rest.is_empty() {
                tracing::debug!(extra = rest.len(), "ignoring trailing address fragments");
            }

            let (street, street_extra) = match street.split_once(STREET_EXTRA_SEPARATOR) {
                Some((street, extra)) => (
                    street.trim().to_string(),
                    non_empty(extra.trim().to_string()),
                ),
                None => (street.trim().to_string(), None),
            };
            let (city, state) = split_city_state(city_state);

            Ok(Address {
                street: non_empty(street),
                street_extra,
                district: non_empty(district.trim().to_string()),
                city: non_empty(city),
                state: non_empty(state),
                postal_code: non_empty(postal_code.trim().to_string()),
            })
        }
        other => Err(CorreiosError::not_found(format!(
            "unexpected address layout with {} fields",
            other.len()
        ))),
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}
