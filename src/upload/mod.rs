//! Checks an upload endpoint performs before handing a file to the extractor.
//!
//! ```
//! use cte_extract::upload::extract_upload;
//!
//! let err = extract_upload(Some("nota.pdf"), b"%PDF-1.7").unwrap_err();
//! assert!(err.to_string().contains("nota.pdf"));
//! ```

use tracing::debug;

use crate::core::{CteError, CteRecord};

/// Extension accepted for uploaded documents (compared case-insensitively).
pub const ACCEPTED_EXTENSION: &str = "xml";

/// Validate an uploaded file and extract its record.
///
/// `file_name` is `None` when the document arrived as a raw request body,
/// in which case no extension check applies.
pub fn extract_upload(file_name: Option<&str>, bytes: &[u8]) -> Result<CteRecord, CteError> {
    if let Some(name) = file_name {
        check_extension(name)?;
    }
    let text = decode(bytes)?;
    debug!(
        bytes = bytes.len(),
        file = file_name.unwrap_or("-"),
        "extracting uploaded CT-e"
    );
    crate::cte::from_xml(text)
}

/// Reject file names that do not end in `.xml`.
pub fn check_extension(file_name: &str) -> Result<(), CteError> {
    let accepted = file_name.rsplit_once('.').is_some_and(|(stem, ext)| {
        !stem.is_empty() && ext.eq_ignore_ascii_case(ACCEPTED_EXTENSION)
    });
    if accepted {
        Ok(())
    } else {
        Err(CteError::UnsupportedFile(file_name.to_string()))
    }
}

/// UTF-8 text of the upload, without a byte-order mark.
pub fn decode(bytes: &[u8]) -> Result<&str, CteError> {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    std::str::from_utf8(bytes)
        .map_err(|e| CteError::Malformed(format!("arquivo não está em UTF-8: {e}")))
}
