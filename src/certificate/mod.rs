//! Single-page timestamping certificates.
//!
//! A [`CertificateRecord`] holds the values to print, a [`CertificateConfig`]
//! describes the page, and a [`CertificateGenerator`] draws one onto the other:
//!
//! ```
//! use cert_gen::certificate::*;
//!
//! let record: CertificateRecord = FieldKey::ALL
//!     .iter()
//!     .map(|key| (*key, format!("{} value", key.name())))
//!     .collect();
//!
//! let rendered = CertificateGenerator::default()
//!     .render(&record, &CertificateOptions::default())
//!     .expect("renders");
//!
//! assert!(rendered.bytes.starts_with(b"%PDF-"));
//! assert_eq!(rendered.report.field_lines.len(), 11);
//! assert!(!rendered.report.scan_code_placed);
//! ```

mod compose;
pub use compose::*;

mod config;
pub use config::*;

mod error;
pub use error::*;

mod generator;
pub use generator::*;

mod record;
pub use record::*;

mod scan_code;
pub use scan_code::*;
