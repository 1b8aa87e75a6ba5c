use thiserror::Error;

/// Errors raised by the PDF drawing surface
#[derive(Error, Debug)]
pub enum PDFError {
    #[error(transparent)]
    /// An I/O error occurred
    Io(#[from] std::io::Error),

    #[error(transparent)]
    /// An image could not be loaded or decoded
    Image(#[from] crate::image::ImageError),

    #[error("no object reference was generated for the {0}")]
    /// A page referred to an object that was never registered with the document
    MissingReference(&'static str),

    #[error("document has no pages")]
    /// Writing was attempted before any page was added
    NoPages,
}
