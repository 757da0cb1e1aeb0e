//! Enumerated CT-e codes mapped to the labels shown in the back office.
//!
//! Unknown codes are not an error: the label functions hand the raw code
//! back so that a newer layout never breaks extraction.

/// `modal`: transport mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransportModal {
    /// 01
    Road,
    /// 02
    Air,
    /// 03
    Waterway,
    /// 04
    Rail,
    /// 05
    Pipeline,
    /// 06
    Multimodal,
}

impl TransportModal {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Road => "01",
            Self::Air => "02",
            Self::Waterway => "03",
            Self::Rail => "04",
            Self::Pipeline => "05",
            Self::Multimodal => "06",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "01" => Some(Self::Road),
            "02" => Some(Self::Air),
            "03" => Some(Self::Waterway),
            "04" => Some(Self::Rail),
            "05" => Some(Self::Pipeline),
            "06" => Some(Self::Multimodal),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Road => "Rodoviário",
            Self::Air => "Aéreo",
            Self::Waterway => "Aquaviário",
            Self::Rail => "Ferroviário",
            Self::Pipeline => "Dutoviário",
            Self::Multimodal => "Multimodal",
        }
    }
}

/// Label for a `modal` code, or the code itself when unknown.
pub fn modal_label(code: &str) -> String {
    TransportModal::from_code(code)
        .map(|m| m.label().to_string())
        .unwrap_or_else(|| code.to_string())
}

/// `toma`: which party takes (pays for) the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceTaker {
    /// 0
    Sender,
    /// 1
    Expeditor,
    /// 2
    Receiver,
    /// 3
    Recipient,
    /// 4: a third party identified in `toma4`.
    Other,
}

impl ServiceTaker {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "0" => Some(Self::Sender),
            "1" => Some(Self::Expeditor),
            "2" => Some(Self::Receiver),
            "3" => Some(Self::Recipient),
            "4" => Some(Self::Other),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Sender => "Remetente",
            Self::Expeditor => "Expedidor",
            Self::Receiver => "Recebedor",
            Self::Recipient => "Destinatário",
            Self::Other => "Outros",
        }
    }
}

/// Label for a `toma` code, or the code itself when unknown.
pub fn taker_label(code: &str) -> String {
    ServiceTaker::from_code(code)
        .map(|t| t.label().to_string())
        .unwrap_or_else(|| code.to_string())
}

/// Label for a `tpAmb` code, or the code itself when unknown.
pub fn environment_label(code: &str) -> String {
    match code {
        "1" => "Produção".to_string(),
        "2" => "Homologação".to_string(),
        other => other.to_string(),
    }
}
