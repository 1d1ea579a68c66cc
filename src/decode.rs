//! Human-readable summaries of PEM-encoded certificates, requests and keys.

use std::fmt;
use std::path::Path;

use rsa::BigUint;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::cert::extensions::ExtendedKeyUsageOption;
use crate::cert::params::DistinguishedName;
use crate::cert::{Certificate, SignatureAlgorithm};
use crate::csr::CertificateRequest;
use crate::error::{CertForgeError, Result};
use crate::key::KeyPair;
use crate::pem_utils::{
    CERTIFICATE_LABEL, CERTIFICATE_REQUEST_LABEL, PRIVATE_KEY_LABEL, RSA_PRIVATE_KEY_LABEL,
    first_block,
};

/// Fields extracted from a certificate.
#[derive(Debug, Clone)]
pub struct CertificateSummary {
    pub subject: DistinguishedName,
    pub issuer: DistinguishedName,
    /// Serial number in decimal.
    pub serial_number: String,
    pub not_before: OffsetDateTime,
    pub not_after: OffsetDateTime,
    pub signature_algorithm: SignatureAlgorithm,
    pub dns_names: Vec<String>,
    pub self_signed: bool,
    pub key_usage: Vec<&'static str>,
    pub extended_key_usage: Vec<ExtendedKeyUsageOption>,
    /// The cA flag, when basic constraints are present.
    pub is_ca: Option<bool>,
}

impl CertificateSummary {
    pub fn from_certificate(cert: &Certificate) -> Self {
        let tbs = &cert.inner.tbs_certificate;
        Self {
            subject: DistinguishedName::from_x509_name(&tbs.subject),
            issuer: DistinguishedName::from_x509_name(&tbs.issuer),
            serial_number: BigUint::from_bytes_be(cert.serial_number()).to_string(),
            not_before: cert.not_before(),
            not_after: cert.not_after(),
            signature_algorithm: cert.signature_algorithm(),
            dns_names: cert.dns_names(),
            self_signed: cert.is_self_signed(),
            key_usage: cert.key_usage().map(|ku| ku.names()).unwrap_or_default(),
            extended_key_usage: cert.extended_key_usage(),
            is_ca: cert.basic_constraints().map(|bc| bc.is_ca),
        }
    }
}

/// Fields extracted from a certification request.
#[derive(Debug, Clone)]
pub struct RequestSummary {
    pub subject: DistinguishedName,
    pub signature_algorithm: SignatureAlgorithm,
    pub dns_names: Vec<String>,
    /// Why the signature check failed, if it did.
    pub signature_error: Option<String>,
}

impl RequestSummary {
    pub fn from_request(csr: &CertificateRequest) -> Self {
        Self {
            subject: csr.subject(),
            signature_algorithm: csr.signature_algorithm(),
            dns_names: csr.dns_names(),
            signature_error: csr.verify_signature().err().map(|e| e.to_string()),
        }
    }

    pub fn signature_valid(&self) -> bool {
        self.signature_error.is_none()
    }
}

/// Fields extracted from an RSA private key.
#[derive(Debug, Clone)]
pub struct KeySummary {
    pub bits: usize,
    pub public_exponent: String,
    /// Lowercase hex SHA-256 of the DER SubjectPublicKeyInfo.
    pub fingerprint: String,
    /// Why the consistency check failed, if it did.
    pub validation_error: Option<String>,
}

impl KeySummary {
    pub fn from_key(key: &KeyPair) -> Result<Self> {
        Ok(Self {
            bits: key.bits(),
            public_exponent: key.public_exponent().to_string(),
            fingerprint: key.fingerprint_sha256()?,
            validation_error: key.validate().err().map(|e| e.to_string()),
        })
    }
}

/// The result of decoding one PEM block.
#[derive(Debug, Clone)]
pub enum Decoded {
    Certificate(CertificateSummary),
    Request(RequestSummary),
    PrivateKey(KeySummary),
}

/// Reads `path` and decodes the first PEM block in it.
pub fn decode_file(path: &Path) -> Result<Decoded> {
    let input = std::fs::read(path)?;
    decode_pem(&input)
}

/// Decodes the first PEM block in `input`, dispatching on its label.
pub fn decode_pem(input: &[u8]) -> Result<Decoded> {
    let block = first_block(input)?;
    let der = block.contents();

    match block.tag() {
        CERTIFICATE_LABEL => {
            let cert = Certificate::from_der(der).map_err(|e| {
                CertForgeError::DecodingError(format!("failed to parse certificate: {e}"))
            })?;
            Ok(Decoded::Certificate(CertificateSummary::from_certificate(
                &cert,
            )))
        }
        CERTIFICATE_REQUEST_LABEL => {
            let csr = CertificateRequest::from_der(der).map_err(|e| {
                CertForgeError::DecodingError(format!("failed to parse CSR: {e}"))
            })?;
            Ok(Decoded::Request(RequestSummary::from_request(&csr)))
        }
        RSA_PRIVATE_KEY_LABEL => {
            let key = KeyPair::import_from_pkcs1_der(der)?;
            Ok(Decoded::PrivateKey(KeySummary::from_key(&key)?))
        }
        PRIVATE_KEY_LABEL => {
            let key = KeyPair::import_from_pkcs8_der(der)?;
            Ok(Decoded::PrivateKey(KeySummary::from_key(&key)?))
        }
        other => Err(CertForgeError::UnsupportedBlockType(other.to_string())),
    }
}

fn write_names(f: &mut fmt::Formatter<'_>, names: &[String]) -> fmt::Result {
    if names.is_empty() {
        return Ok(());
    }
    writeln!(f)?;
    writeln!(f, "Subject Alternative Names:")?;
    for name in names {
        writeln!(f, "  DNS: {name}")?;
    }
    Ok(())
}

fn rfc3339(at: OffsetDateTime) -> std::result::Result<String, fmt::Error> {
    at.format(&Rfc3339).map_err(|_| fmt::Error)
}

impl fmt::Display for CertificateSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Certificate Information ===")?;
        writeln!(f)?;
        writeln!(f, "Subject: {}", self.subject)?;
        writeln!(f, "Issuer: {}", self.issuer)?;
        writeln!(f, "Serial Number: {}", self.serial_number)?;
        writeln!(f, "Not Before: {}", rfc3339(self.not_before)?)?;
        writeln!(f, "Not After: {}", rfc3339(self.not_after)?)?;
        writeln!(f, "Signature Algorithm: {}", self.signature_algorithm)?;
        write_names(f, &self.dns_names)?;

        writeln!(f)?;
        writeln!(f, "Self-signed: {}", self.self_signed)?;
        if let Some(is_ca) = self.is_ca {
            writeln!(f, "CA: {is_ca}")?;
        }
        writeln!(f)?;
        writeln!(f, "Key Usage:")?;
        for usage in &self.key_usage {
            writeln!(f, "  {usage}")?;
        }
        if !self.extended_key_usage.is_empty() {
            writeln!(f)?;
            writeln!(f, "Extended Key Usage:")?;
            for usage in &self.extended_key_usage {
                writeln!(f, "  {usage}")?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for RequestSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Certificate Signing Request Information ===")?;
        writeln!(f)?;
        writeln!(f, "Subject: {}", self.subject)?;
        writeln!(f, "Signature Algorithm: {}", self.signature_algorithm)?;
        write_names(f, &self.dns_names)?;
        writeln!(f)?;
        writeln!(f, "Signature Valid: {}", self.signature_valid())?;
        if let Some(err) = &self.signature_error {
            writeln!(f, "Signature Error: {err}")?;
        }
        Ok(())
    }
}

impl fmt::Display for KeySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== RSA Private Key Information ===")?;
        writeln!(f)?;
        writeln!(f, "Key Size: {} bits", self.bits)?;
        writeln!(f, "Public Exponent: {}", self.public_exponent)?;
        writeln!(f, "Public Key Fingerprint (SHA-256): {}", self.fingerprint)?;
        writeln!(f)?;
        match &self.validation_error {
            None => writeln!(f, "Key is valid"),
            Some(err) => writeln!(f, "Key Validation Error: {err}"),
        }
    }
}

impl fmt::Display for Decoded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decoded::Certificate(summary) => fmt::Display::fmt(summary, f),
            Decoded::Request(summary) => fmt::Display::fmt(summary, f),
            Decoded::PrivateKey(summary) => fmt::Display::fmt(summary, f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cert::params::{CertificateParams, Subject, Validity};
    use crate::key::KeySize;
    use crate::pem_utils::der_to_pem;

    fn subject() -> Subject {
        Subject::builder()
            .common_name("decode.example".to_string())
            .organization("Example Corp".to_string())
            .build()
    }

    #[test]
    fn certificate_summary_lists_profile() {
        let key = KeyPair::generate_rsa(KeySize::Rsa2048).unwrap();
        let params = CertificateParams::builder()
            .subject(subject())
            .validity(Validity::for_days(10).unwrap())
            .build();
        let cert = Certificate::new_self_signed(&params, &key).unwrap();

        let Decoded::Certificate(summary) = decode_pem(cert.to_pem().unwrap().as_bytes()).unwrap()
        else {
            panic!("expected a certificate");
        };
        assert_eq!(summary.subject.to_string(), "CN=decode.example, O=Example Corp");
        assert_eq!(summary.issuer, summary.subject);
        assert!(summary.self_signed);
        assert_eq!(summary.is_ca, Some(false));
        assert_eq!(summary.dns_names, vec!["decode.example"]);
        assert_eq!(
            summary.serial_number,
            BigUint::from_bytes_be(cert.serial_number()).to_string()
        );

        let text = summary.to_string();
        assert!(text.starts_with("=== Certificate Information ===\n\n"));
        assert!(text.contains("Signature Algorithm: SHA256-RSA\n"));
        assert!(text.contains("  DNS: decode.example\n"));
        assert!(text.contains("Self-signed: true\n"));
        assert!(text.contains("Key Usage:\n  Digital Signature\n  Key Encipherment\n"));
        assert!(text.contains("Extended Key Usage:\n  Server Authentication\n"));
    }

    #[test]
    fn foreign_issuer_is_reported_as_not_self_signed() {
        let key = KeyPair::generate_rsa(KeySize::Rsa2048).unwrap();
        let params = CertificateParams::builder()
            .subject(subject())
            .validity(Validity::for_days(10).unwrap())
            .build();
        let mut cert = Certificate::new_self_signed(&params, &key).unwrap();
        // the signature no longer matches, which decoding does not check
        cert.inner.tbs_certificate.issuer = Subject::builder()
            .common_name("other".to_string())
            .build()
            .as_x509_name()
            .unwrap();

        let mut summary = CertificateSummary::from_certificate(&cert);
        assert!(!summary.self_signed);
        assert_eq!(summary.issuer.to_string(), "CN=other");

        let text = summary.to_string();
        assert!(text.contains("Issuer: CN=other\n"));
        assert!(text.contains("\nSelf-signed: false\n"));

        summary.key_usage.clear();
        let text = summary.to_string();
        assert!(text.contains("\nKey Usage:\n"));
        assert!(!text.contains("Digital Signature"));
    }

    #[test]
    fn request_summary_reports_signature_state() {
        let key = KeyPair::generate_rsa(KeySize::Rsa2048).unwrap();
        let csr = CertificateRequest::new(&subject(), &["a.example".to_string()], &key).unwrap();

        let Decoded::Request(summary) = decode_pem(csr.to_pem().unwrap().as_bytes()).unwrap()
        else {
            panic!("expected a request");
        };
        assert!(summary.signature_valid());
        assert_eq!(summary.dns_names, vec!["a.example"]);
        assert!(summary.to_string().contains("Signature Valid: true\n"));

        let mut der = csr.to_der().unwrap();
        let last = der.len() - 1;
        der[last] ^= 0xff;
        let tampered = der_to_pem(&der, CERTIFICATE_REQUEST_LABEL);
        let Decoded::Request(summary) = decode_pem(tampered.as_bytes()).unwrap() else {
            panic!("expected a request");
        };
        assert!(!summary.signature_valid());
        let text = summary.to_string();
        assert!(text.contains("Signature Valid: false\n"));
        assert!(text.contains("Signature Error: "));
    }

    #[test]
    fn key_summary_reports_size_and_fingerprint() {
        let key = KeyPair::generate_rsa(KeySize::Rsa2048).unwrap();
        let Decoded::PrivateKey(summary) =
            decode_pem(key.to_pkcs1_pem().unwrap().as_bytes()).unwrap()
        else {
            panic!("expected a key");
        };
        assert_eq!(summary.bits, 2048);
        assert_eq!(summary.public_exponent, "65537");
        assert_eq!(summary.fingerprint, key.fingerprint_sha256().unwrap());
        assert!(summary.to_string().ends_with("Key is valid\n"));
    }

    #[test]
    fn rejects_unknown_labels_and_non_pem() {
        let other = der_to_pem(&[0x05, 0x00], "PUBLIC KEY");
        assert!(matches!(
            decode_pem(other.as_bytes()),
            Err(CertForgeError::UnsupportedBlockType(label)) if label == "PUBLIC KEY"
        ));
        assert!(matches!(
            decode_pem(b"definitely not pem"),
            Err(CertForgeError::Pem(_))
        ));
    }
}
