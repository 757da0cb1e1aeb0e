//! CT-e (Conhecimento de Transporte Eletrônico, model 57) field extraction.
//!
//! Turns a parsed document tree into a flat [`CteRecord`](crate::core::CteRecord).
//!
//! # Pipeline
//!
//! 1. **Root**: find `infCte` under `cteProc/CTe`, `CTe`, or the first
//!    top-level element, in that order ([`resolve_root`]).
//! 2. **Sections**: identification, parties, cargo, transport, values and
//!    linked invoices are read with defaults for anything absent.
//! 3. **Normalize**: dates are truncated to `YYYY-MM-DD`, unit-coded
//!    quantities become a weight in kilograms, codes become labels.
//!
//! Only a missing root, `ide` or `vPrest` is an error.
//!
//! # Example
//!
//! ```
//! # #[cfg(feature = "xml")] {
//! let xml = r#"<CTe><infCte Id="CTe3524" versao="4.00">
//!     <ide><nCT>42</nCT><dhEmi>2024-03-10T08:15:00-03:00</dhEmi><modal>01</modal></ide>
//!     <vPrest><vTPrest>1500.00</vTPrest><vRec>1500.00</vRec></vPrest>
//! </infCte></CTe>"#;
//!
//! let record = cte_extract::cte::from_xml(xml).unwrap();
//! assert_eq!(record.access_key, "3524");
//! assert_eq!(record.issue_date, "2024-03-10");
//! assert_eq!(record.modal, "Rodoviário");
//! # }
//! ```

mod assemble;
mod party;
mod root;
mod sections;

pub use assemble::{extract, extract_optional};
pub use party::{PartyRole, extract_party, party_from};
pub use root::{RootShape, resolve_root};
pub use sections::{
    Identification, extract_cargo, extract_identification, extract_invoice_keys,
    extract_transport, extract_values,
};

#[cfg(any(feature = "xml", feature = "json"))]
use crate::core::{CteError, CteRecord};

/// Read `xml` with default [`ParseOptions`](crate::xml::ParseOptions) and
/// extract the record.
#[cfg(feature = "xml")]
pub fn from_xml(xml: &str) -> Result<CteRecord, CteError> {
    let tree = crate::xml::parse(xml)?;
    extract(&tree)
}

/// Extract the record from a JSON rendering of the document tree, as
/// emitted by JSON-producing XML parsers.
#[cfg(feature = "json")]
pub fn from_json(json: &str) -> Result<CteRecord, CteError> {
    let tree = crate::json::parse(json)?;
    extract(&tree)
}
