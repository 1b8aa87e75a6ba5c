//! Writes `certificate.pdf` for a sample timestamping record.
//!
//! ```text
//! cargo run --example certificate -- [config.toml] [logo.png]
//! ```
//!
//! Set `RUST_LOG=cert_gen=debug` to watch the layout decisions.

use cert_gen::certificate::{
    CertificateConfig, CertificateGenerator, CertificateOptions, CertificateRecord, FieldKey,
};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => CertificateConfig::from_toml_str(&std::fs::read_to_string(path)?)?,
        None => CertificateConfig::default(),
    };
    let logo_path = args.next().map(PathBuf::from);

    let record = CertificateRecord::new()
        .with(FieldKey::CertificateId, "891a43a8-d0e9-4dc2-9aad-d7aeb8bddc89")
        .with(FieldKey::ProjectId, "c6c535ce-cacd-435b-94af-002792817e75")
        .with(FieldKey::ProjectTitle, "CPF3")
        .with(FieldKey::SubmittedBy, "Giuseppe Canale")
        .with(FieldKey::Content, "1 file + Project cover")
        .with(
            FieldKey::Fingerprint,
            "4fe7b050ae4020d6baf57ee6663f3790465ea6e22efc1f00cf2c0faa8adabbe2",
        )
        .with(FieldKey::RegistrationDate, "Aug 27, 2025 at 01:42:18 UTC")
        .with(FieldKey::Authority, "DigiCert, Inc.")
        .with(
            FieldKey::Tsa,
            "C=US/O=DigiCert, Inc./CN=DigiCert SHA256 RSA4096 Timestamp Responder 2025 1",
        )
        .with(FieldKey::SerialNumber, "00E0F685106A87AB6FC11EE1A95C9BE96B")
        .with(FieldKey::Status, "CONFIRMED")
        .with(FieldKey::Policy, "2.16.840.1.114412.7.1");

    let options = CertificateOptions {
        scan_url: Some("https://cpf3.org".to_string()),
        logo_path,
        creation_date: None,
    };

    let generator = CertificateGenerator::new(config)?;
    let report = generator.generate("certificate.pdf", &record, &options)?;
    for warning in report.warnings.iter() {
        eprintln!("warning: {warning}");
    }

    Ok(())
}
