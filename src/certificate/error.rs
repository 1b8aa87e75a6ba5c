use super::FieldKey;
use crate::layout::GeometryError;
use crate::PDFError;
use std::path::PathBuf;
use thiserror::Error;

/// Reasons a certificate could not be produced. When one of these is returned,
/// no output file has been written.
#[derive(Error, Debug)]
pub enum CertificateError {
    #[error("required field `{0}` is missing or empty")]
    MissingField(FieldKey),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Parse(#[from] toml::de::Error),

    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error("failed to render certificate: {0}")]
    Render(#[from] PDFError),

    #[error("failed to write {path}: {source}")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Problems that were worked around while drawing. The certificate is still
/// produced, minus the affected element.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Warning {
    #[error("logo {0} does not exist, drawing the wordmark only")]
    LogoMissing(PathBuf),

    #[error("logo {path} could not be loaded: {reason}")]
    LogoLoadFailure { path: PathBuf, reason: String },

    #[error("scan code could not be encoded: {0}")]
    CodeEncodingFailure(String),
}
