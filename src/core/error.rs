use thiserror::Error;

/// Errors that can occur while reading or extracting a CT-e document.
///
/// Messages are in Portuguese because they are shown verbatim to the
/// back-office operator who uploaded the document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum CteError {
    /// The document could not be turned into a tree at all.
    #[error("XML inválido ou mal formado: {0}")]
    Malformed(String),

    /// No `infCte` element under any known wrapper shape.
    #[error("estrutura do CT-e não encontrada (infCte ausente)")]
    RootNotFound,

    /// The `ide` block is missing from `infCte`.
    #[error("bloco de identificação (ide) ausente no CT-e")]
    MissingIdentification,

    /// The `vPrest` block is missing from `infCte`.
    #[error("bloco de valores da prestação (vPrest) ausente no CT-e")]
    MissingValues,

    /// An uploaded file was rejected before extraction.
    #[error("arquivo não suportado: {0} (envie um arquivo .xml)")]
    UnsupportedFile(String),
}

impl CteError {
    /// True for errors caused by the shape of an otherwise readable document.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Self::RootNotFound | Self::MissingIdentification | Self::MissingValues
        )
    }
}
