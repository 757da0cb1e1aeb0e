//! Core types: the document tree, the extracted record, errors, code tables
//! and normalizers.
//!
//! Nothing in here knows where the tree came from; the `xml` and `json`
//! features provide readers that produce a [`Node`].

pub mod codes;
mod error;
pub mod normalize;
mod options;
mod tree;
mod types;
pub mod units;

pub use codes::{ServiceTaker, TransportModal};
pub use error::*;
pub use options::ParseOptions;
pub use tree::*;
pub use types::*;
pub use units::CargoUnit;
