use super::compose::{Composer, Composition, FieldLayout};
use super::config::CertificateConfig;
use super::record::{CertificateRecord, FieldKey, PROJECT_FIELDS, TIMESTAMPING_FIELDS};
use super::{CertificateError, Warning};
use crate::document::Document;
use crate::info::Info;
use chrono::{DateTime, FixedOffset};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// Optional inputs to a single render
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CertificateOptions {
    /// Encoded into a scan code in the bottom right corner when non-empty
    pub scan_url: Option<String>,
    /// PNG or JPEG drawn above the wordmark
    pub logo_path: Option<PathBuf>,
    /// Written to the document information. Left out when `None`, so that the
    /// same inputs always give the same bytes
    pub creation_date: Option<DateTime<FixedOffset>>,
}

/// What was drawn, and what had to be left out
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CertificateReport {
    pub warnings: Vec<Warning>,
    pub logo_placed: bool,
    pub scan_code_placed: bool,
    /// Every field in drawing order, with the lines its value was split into
    pub field_lines: Vec<FieldLayout>,
}

/// A rendered certificate held in memory
pub struct RenderedCertificate {
    pub bytes: Vec<u8>,
    pub report: CertificateReport,
}

/// Renders certificate records to PDF. Holds only configuration, so one generator
/// can be shared across any number of renders.
///
/// ```no_run
/// use cert_gen::certificate::{CertificateGenerator, CertificateOptions, CertificateRecord};
///
/// let record = CertificateRecord::from_toml_str(&std::fs::read_to_string("record.toml")?)?;
/// let options = CertificateOptions {
///     scan_url: Some("https://cpf3.org".to_string()),
///     ..CertificateOptions::default()
/// };
///
/// let report = CertificateGenerator::default().generate("certificate.pdf", &record, &options)?;
/// for warning in report.warnings.iter() {
///     eprintln!("{warning}");
/// }
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct CertificateGenerator {
    config: CertificateConfig,
}

impl CertificateGenerator {
    pub fn new(config: CertificateConfig) -> Result<CertificateGenerator, CertificateError> {
        config.validate()?;
        Ok(CertificateGenerator { config })
    }

    pub fn config(&self) -> &CertificateConfig {
        &self.config
    }

    /// Lay out the certificate without rendering it. The returned document holds
    /// a single page.
    pub fn compose(
        &self,
        record: &CertificateRecord,
        options: &CertificateOptions,
    ) -> Result<(Document, CertificateReport), CertificateError> {
        record.validate()?;
        let certificate_id = record.require(FieldKey::CertificateId)?;

        let config = &self.config;
        let mut composer = Composer::new(config);

        composer.draw_background();
        composer.draw_header(certificate_id);

        let y = config.page.height() - config.page.margin() - config.spacing.intro_top;
        let y = composer.draw_intro(y);

        let y = composer.draw_section(&config.text.project_section, y, config.palette.accent);
        let y = composer.draw_fields(record, &PROJECT_FIELDS, y)?;
        let y = composer.draw_separator(y);
        let y = composer.draw_section(&config.text.timestamping_section, y, config.palette.accent);
        let y = composer.draw_fields(record, &TIMESTAMPING_FIELDS, y)?;
        debug!(cursor = %y, "fields laid out");

        composer.draw_footer(options.logo_path.as_deref());

        if let Some(url) = options.scan_url.as_deref() {
            let scan = &config.scan_code;
            let x = config.page.width() - config.page.margin() - scan.right_inset;
            composer.embed_scan_code(url, x, scan.bottom, scan.size);
        }

        composer.draw_border();

        let Composition {
            mut document,
            warnings,
            fields,
            logo_placed,
            scan_code_placed,
        } = composer.finish();

        let mut info = Info::new();
        info.title(&config.text.title).subject(certificate_id);
        if let Some(date) = options.creation_date {
            info.creation_date(date);
        }
        document.set_info(info);

        Ok((
            document,
            CertificateReport {
                warnings,
                logo_placed,
                scan_code_placed,
                field_lines: fields,
            },
        ))
    }

    /// Render the certificate into memory
    pub fn render(
        &self,
        record: &CertificateRecord,
        options: &CertificateOptions,
    ) -> Result<RenderedCertificate, CertificateError> {
        let (document, report) = self.compose(record, options)?;
        let bytes = document.render()?;
        Ok(RenderedCertificate { bytes, report })
    }

    /// Render the certificate and write it to `output`.
    ///
    /// The file only appears once it is complete: the PDF is written next to
    /// `output` under a temporary name and then renamed over it. On error nothing
    /// is left behind and any existing file at `output` is untouched.
    pub fn generate<P: AsRef<Path>>(
        &self,
        output: P,
        record: &CertificateRecord,
        options: &CertificateOptions,
    ) -> Result<CertificateReport, CertificateError> {
        let output = output.as_ref();
        let RenderedCertificate { bytes, report } = self.render(record, options)?;

        write_atomically(output, &bytes).map_err(|source| CertificateError::OutputWrite {
            path: output.to_path_buf(),
            source,
        })?;

        info!(
            path = %output.display(),
            bytes = bytes.len(),
            warnings = report.warnings.len(),
            "certificate written"
        );
        Ok(report)
    }
}

fn write_atomically(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(bytes)?;
    file.as_file().sync_all()?;
    file.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::Pt;

    #[test]
    fn invalid_config_is_rejected_up_front() {
        let mut config = CertificateConfig::default();
        config.fonts.value_size = Pt(0.0);
        assert!(matches!(
            CertificateGenerator::new(config),
            Err(CertificateError::InvalidConfig(_))
        ));
    }

    #[test]
    fn incomplete_record_is_rejected_before_drawing() {
        let record = CertificateRecord::new().with(FieldKey::CertificateId, "abc");
        let result = CertificateGenerator::default().compose(&record, &CertificateOptions::default());
        assert!(matches!(
            result,
            Err(CertificateError::MissingField(FieldKey::ProjectId))
        ));
    }

    #[test]
    fn writing_into_missing_directory_fails() {
        let dir = tempfile::tempdir().expect("tempdir");
        let output = dir.path().join("missing").join("certificate.pdf");
        let err = write_atomically(&output, b"%PDF-").expect_err("parent doesn't exist");
        assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
    }
}
