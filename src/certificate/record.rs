use super::CertificateError;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;

/// The fixed set of values a certificate presents
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKey {
    CertificateId,
    ProjectId,
    ProjectTitle,
    SubmittedBy,
    Content,
    Fingerprint,
    RegistrationDate,
    Authority,
    Tsa,
    SerialNumber,
    Status,
    Policy,
}

/// Fields of the "Project Data" section, in drawing order
pub const PROJECT_FIELDS: [FieldKey; 5] = [
    FieldKey::ProjectId,
    FieldKey::ProjectTitle,
    FieldKey::SubmittedBy,
    FieldKey::Content,
    FieldKey::Fingerprint,
];

/// Fields of the "Timestamping Data" section, in drawing order
pub const TIMESTAMPING_FIELDS: [FieldKey; 6] = [
    FieldKey::RegistrationDate,
    FieldKey::Authority,
    FieldKey::Tsa,
    FieldKey::SerialNumber,
    FieldKey::Status,
    FieldKey::Policy,
];

impl FieldKey {
    pub const ALL: [FieldKey; 12] = [
        FieldKey::CertificateId,
        FieldKey::ProjectId,
        FieldKey::ProjectTitle,
        FieldKey::SubmittedBy,
        FieldKey::Content,
        FieldKey::Fingerprint,
        FieldKey::RegistrationDate,
        FieldKey::Authority,
        FieldKey::Tsa,
        FieldKey::SerialNumber,
        FieldKey::Status,
        FieldKey::Policy,
    ];

    /// The key as written in record files
    pub fn name(&self) -> &'static str {
        match self {
            FieldKey::CertificateId => "certificate_id",
            FieldKey::ProjectId => "project_id",
            FieldKey::ProjectTitle => "project_title",
            FieldKey::SubmittedBy => "submitted_by",
            FieldKey::Content => "content",
            FieldKey::Fingerprint => "fingerprint",
            FieldKey::RegistrationDate => "registration_date",
            FieldKey::Authority => "authority",
            FieldKey::Tsa => "tsa",
            FieldKey::SerialNumber => "serial_number",
            FieldKey::Status => "status",
            FieldKey::Policy => "policy",
        }
    }

    /// The label printed in front of the value
    pub fn label(&self) -> &'static str {
        match self {
            FieldKey::CertificateId => "Certificate ID:",
            FieldKey::ProjectId => "Project ID:",
            FieldKey::ProjectTitle => "Project Title:",
            FieldKey::SubmittedBy => "Submitted by:",
            FieldKey::Content => "Content:",
            FieldKey::Fingerprint => "Fingerprint:",
            FieldKey::RegistrationDate => "Registration Date:",
            FieldKey::Authority => "Authority:",
            FieldKey::Tsa => "TSA:",
            FieldKey::SerialNumber => "Serial number:",
            FieldKey::Status => "Status:",
            FieldKey::Policy => "Policy:",
        }
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The values printed on one certificate, keyed by [`FieldKey`].
///
/// Records can be built in code or read from TOML:
///
/// ```
/// use cert_gen::certificate::{CertificateRecord, FieldKey};
///
/// let record = CertificateRecord::from_toml_str(r#"
///     certificate_id = "891a43a8-d0e9-4dc2-9aad-d7aeb8bddc89"
///     fingerprint = "4fe7b050ae4020d6"
/// "#).expect("valid toml");
///
/// assert_eq!(record.get(FieldKey::Fingerprint), Some("4fe7b050ae4020d6"));
/// assert!(record.validate().is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct CertificateRecord {
    fields: BTreeMap<FieldKey, String>,
}

impl CertificateRecord {
    pub fn new() -> CertificateRecord {
        CertificateRecord::default()
    }

    pub fn from_toml_str(s: &str) -> Result<CertificateRecord, CertificateError> {
        toml::from_str(s).map_err(CertificateError::from)
    }

    /// Set a value, modifying `self`
    pub fn set<S: ToString>(&mut self, key: FieldKey, value: S) -> &mut Self {
        self.fields.insert(key, value.to_string());
        self
    }

    /// Set a value, consuming and returning `self`
    pub fn with<S: ToString>(mut self, key: FieldKey, value: S) -> Self {
        self.set(key, value);
        self
    }

    pub fn remove(&mut self, key: FieldKey) -> Option<String> {
        self.fields.remove(&key)
    }

    pub fn get(&self, key: FieldKey) -> Option<&str> {
        self.fields.get(&key).map(String::as_str)
    }

    /// The value for `key`, which must be present and non-empty
    pub fn require(&self, key: FieldKey) -> Result<&str, CertificateError> {
        match self.get(key) {
            Some(value) if !value.is_empty() => Ok(value),
            _ => Err(CertificateError::MissingField(key)),
        }
    }

    /// Check that every field the certificate prints is present and non-empty,
    /// reporting the first missing one in [`FieldKey::ALL`] order
    pub fn validate(&self) -> Result<(), CertificateError> {
        FieldKey::ALL
            .iter()
            .try_for_each(|key| self.require(*key).map(|_| ()))
    }
}

impl<S: ToString> FromIterator<(FieldKey, S)> for CertificateRecord {
    fn from_iter<T: IntoIterator<Item = (FieldKey, S)>>(iter: T) -> Self {
        CertificateRecord {
            fields: iter
                .into_iter()
                .map(|(key, value)| (key, value.to_string()))
                .collect(),
        }
    }
}
