use rust_decimal::Decimal;
use std::str::FromStr;

use super::types::Quantity;
use super::units::CargoUnit;

/// Literal prefix of the `infCte@Id` attribute.
pub const ACCESS_KEY_PREFIX: &str = "CTe";

/// Truncate a date-time such as `2024-03-10T08:15:00-03:00` to `2024-03-10`.
///
/// Only the leading `DDDD-DD-DD` shape is checked; anything else is returned
/// unchanged so that callers always get a value back.
pub fn date_only(value: &str) -> String {
    let bytes = value.as_bytes();
    let shaped = bytes.len() >= 10
        && bytes[..10].iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });
    if shaped {
        value[..10].to_string()
    } else {
        value.to_string()
    }
}

/// Strip the `CTe` prefix from an `infCte@Id` value.
pub fn access_key(id: &str) -> String {
    id.strip_prefix(ACCESS_KEY_PREFIX).unwrap_or(id).to_string()
}

/// Parse an amount or quantity; empty or unparseable text is zero.
pub fn decimal_or_zero(value: &str) -> Decimal {
    if value.is_empty() {
        return Decimal::ZERO;
    }
    Decimal::from_str(value)
        .or_else(|_| Decimal::from_scientific(value))
        .unwrap_or(Decimal::ZERO)
}

/// Declared weight in kilograms.
///
/// Each entry in a mass unit overwrites the running value, so the last such
/// entry in document order wins. Entries in other units are ignored.
pub fn weight_kg(quantities: &[Quantity]) -> Decimal {
    quantities.iter().fold(Decimal::ZERO, |weight, q| {
        CargoUnit::from_code(&q.unit_code)
            .and_then(|unit| unit.to_kilograms(q.amount))
            .unwrap_or(weight)
    })
}

/// Join the non-empty parts with `", "`.
pub fn join_non_empty<'a>(parts: impl IntoIterator<Item = &'a str>) -> String {
    parts
        .into_iter()
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

/// `municipality/region`, or whichever half is present.
pub fn place(municipality: &str, region: &str) -> String {
    match (municipality.is_empty(), region.is_empty()) {
        (false, false) => format!("{municipality}/{region}"),
        (false, true) => municipality.to_string(),
        (true, false) => region.to_string(),
        (true, true) => String::new(),
    }
}
