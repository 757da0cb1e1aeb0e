//! # cte-extract
//!
//! Field extractor for Brazilian electronic freight waybills (CT-e, model 57).
//!
//! Reads the XML of one CT-e, optionally inside a `cteProc` envelope, and
//! produces a flat [`CteRecord`](crate::core::CteRecord): parties, cargo,
//! values, vehicle and driver, linked NF-e keys. Issuers disagree on wrappers,
//! cardinality and date formats; the extractor tolerates all of that and only
//! fails when the document lacks `infCte`, `ide` or `vPrest`.
//!
//! All monetary values and weights use [`rust_decimal::Decimal`], never
//! floating point.
//!
//! ## Quick Start
//!
//! ```rust
//! # #[cfg(feature = "xml")] {
//! use rust_decimal_macros::dec;
//!
//! let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
//! <cteProc versao="4.00"><CTe><infCte Id="CTe35240312345678000190570010000001231000001234">
//!   <ide><nCT>123</nCT><serie>1</serie><dhEmi>2024-03-10T08:15:00-03:00</dhEmi><modal>01</modal></ide>
//!   <vPrest><vTPrest>1500.00</vTPrest><vRec>1500.00</vRec></vPrest>
//!   <infCTeNorm><infCarga><infQ><cUnid>02</cUnid><qCarga>1.5</qCarga></infQ></infCarga></infCTeNorm>
//! </infCte></CTe></cteProc>"#;
//!
//! let record = cte_extract::cte::from_xml(xml).unwrap();
//! assert_eq!(record.number, "123");
//! assert_eq!(record.issue_date, "2024-03-10");
//! assert_eq!(record.cargo.weight_kg, dec!(1500));
//! assert_eq!(record.values.total, dec!(1500.00));
//! # }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` (default) | Document tree, record types, extraction |
//! | `xml` (default) | `quick-xml` reader producing the tree |
//! | `json` | Adapter for trees rendered as JSON by other converters |
//! | `upload` | File-name and encoding checks for upload endpoints |
//! | `all` | Everything |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "core")]
pub mod cte;

#[cfg(feature = "xml")]
pub mod xml;

#[cfg(feature = "json")]
pub mod json;

#[cfg(feature = "upload")]
pub mod upload;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;
