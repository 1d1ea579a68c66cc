use std::fmt;

use const_oid::AssociatedOid;
use der::{Any, Decode, Encode, Tag, TagNumber, Tagged, oid::ObjectIdentifier};

use crate::error::CertForgeError;
use crate::oid::{
    OID_EKU_CLIENT_AUTH, OID_EKU_CODE_SIGNING, OID_EKU_EMAIL_PROTECTION, OID_EKU_OCSP_SIGNING,
    OID_EKU_SERVER_AUTH, OID_EKU_TIME_STAMPING, OID_SUBJECT_ALT_NAME,
};

/// Trait for converting to and from X.509 extensions.
///
/// This trait provides methods to encode and decode X.509 extension values.
///
/// # Example
/// ```
/// use certforge::cert::extensions::{SubjectAltName, ToAndFromX509Extension};
/// let san = SubjectAltName { names: vec!["example.com".to_string()] };
/// let encoded = san.to_x509_extension_value().unwrap();
/// let decoded = SubjectAltName::from_x509_extension_value(&encoded).unwrap();
/// assert_eq!(san.names, decoded.names);
/// ```
pub trait ToAndFromX509Extension {
    /// The Object Identifier (OID) for the extension.
    const OID: ObjectIdentifier;

    /// Encodes the extension into a DER-encoded byte vector.
    fn to_x509_extension_value(&self) -> Result<Vec<u8>, CertForgeError>;

    /// Decodes the extension from a DER-encoded byte slice.
    fn from_x509_extension_value(extension: &[u8]) -> Result<Self, CertForgeError>
    where
        Self: Sized;
}

fn encoding_error(err: der::Error) -> CertForgeError {
    CertForgeError::EncodingError(err.to_string())
}

/// `dNSName [2] IA5String` inside `GeneralNames`: context-specific class,
/// tag number 2, primitive.
const DNS_NAME_TAG: Tag = Tag::ContextSpecific {
    constructed: false,
    number: TagNumber::N2,
};

/// DER-encodes `names` as a SAN extension value: a SEQUENCE of raw
/// context-specific `[2]` values whose contents are the name bytes.
pub fn encode_san_extension(names: &[String]) -> Result<Vec<u8>, CertForgeError> {
    let entries = names
        .iter()
        .map(|name| {
            if !name.is_ascii() {
                return Err(CertForgeError::InvalidInput(format!(
                    "DNS name {name:?} is not an IA5String"
                )));
            }
            Any::new(DNS_NAME_TAG, name.as_bytes().to_vec()).map_err(encoding_error)
        })
        .collect::<Result<Vec<_>, _>>()?;
    entries.to_der().map_err(encoding_error)
}

/// Extracts the DNS names from a SAN extension value.
///
/// Returns `None` when the value is not a well-formed SEQUENCE (or carries
/// trailing bytes). Entries other than `dNSName` are skipped.
pub fn decode_san_extension(value: &[u8]) -> Option<Vec<String>> {
    let entries = Vec::<Any>::from_der(value).ok()?;
    Some(
        entries
            .iter()
            .filter(|entry| entry.tag() == DNS_NAME_TAG)
            .map(|entry| String::from_utf8_lossy(entry.value()).into_owned())
            .collect(),
    )
}

/// Represents the Subject Alternative Name (SAN) extension.
///
/// # Fields
/// * `names` - A list of DNS names, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubjectAltName {
    pub names: Vec<String>,
}

impl ToAndFromX509Extension for SubjectAltName {
    const OID: ObjectIdentifier = OID_SUBJECT_ALT_NAME;

    fn to_x509_extension_value(&self) -> Result<Vec<u8>, CertForgeError> {
        encode_san_extension(&self.names)
    }

    fn from_x509_extension_value(extension: &[u8]) -> Result<Self, CertForgeError> {
        decode_san_extension(extension)
            .map(|names| Self { names })
            .ok_or_else(|| {
                CertForgeError::DecodingError("malformed subjectAltName extension".to_string())
            })
    }
}

/// Represents the Basic Constraints extension.
///
/// # Fields
/// * `is_ca` - Indicates if the certificate is a CA.
/// * `max_path_length` - The maximum number of intermediate CAs allowed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BasicConstraints {
    pub is_ca: bool,
    pub max_path_length: Option<u32>,
}

impl ToAndFromX509Extension for BasicConstraints {
    const OID: ObjectIdentifier = x509_cert::ext::pkix::BasicConstraints::OID;

    fn to_x509_extension_value(&self) -> Result<Vec<u8>, CertForgeError> {
        let bc = x509_cert::ext::pkix::BasicConstraints {
            ca: self.is_ca,
            path_len_constraint: self.max_path_length.map(|v| v as u8),
        };

        bc.to_der().map_err(encoding_error)
    }

    fn from_x509_extension_value(der_bytes: &[u8]) -> Result<Self, CertForgeError> {
        let bc = x509_cert::ext::pkix::BasicConstraints::from_der(der_bytes)?;
        Ok(Self {
            is_ca: bc.ca,
            max_path_length: bc.path_len_constraint.map(|v| v as u32),
        })
    }
}

pub use der::flagset::FlagSet;
use x509_cert::ext::pkix::KeyUsage as X509KeyUsage;
pub use x509_cert::ext::pkix::KeyUsages;

/// Represents the Key Usage extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyUsage(pub FlagSet<KeyUsages>);

impl KeyUsage {
    /// Human-readable names of the set bits, in bit order.
    pub fn names(&self) -> Vec<&'static str> {
        [
            (KeyUsages::DigitalSignature, "Digital Signature"),
            (KeyUsages::NonRepudiation, "Content Commitment"),
            (KeyUsages::KeyEncipherment, "Key Encipherment"),
            (KeyUsages::DataEncipherment, "Data Encipherment"),
            (KeyUsages::KeyAgreement, "Key Agreement"),
            (KeyUsages::KeyCertSign, "Certificate Sign"),
            (KeyUsages::CRLSign, "CRL Sign"),
            (KeyUsages::EncipherOnly, "Encipher Only"),
            (KeyUsages::DecipherOnly, "Decipher Only"),
        ]
        .into_iter()
        .filter(|(flag, _)| self.0.contains(*flag))
        .map(|(_, name)| name)
        .collect()
    }
}

impl ToAndFromX509Extension for KeyUsage {
    const OID: ObjectIdentifier = <X509KeyUsage as AssociatedOid>::OID;

    fn to_x509_extension_value(&self) -> Result<Vec<u8>, CertForgeError> {
        let ku = X509KeyUsage::from(self.0);
        ku.to_der().map_err(encoding_error)
    }

    fn from_x509_extension_value(extension: &[u8]) -> Result<Self, CertForgeError> {
        let ku = X509KeyUsage::from_der(extension)?;
        Ok(Self(ku.0))
    }
}

/// Represents the Extended Key Usage extension.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtendedKeyUsage {
    pub usage: Vec<ExtendedKeyUsageOption>,
}

impl ToAndFromX509Extension for ExtendedKeyUsage {
    const OID: ObjectIdentifier = x509_cert::ext::pkix::ExtendedKeyUsage::OID;

    fn to_x509_extension_value(&self) -> Result<Vec<u8>, CertForgeError> {
        let oids: Vec<ObjectIdentifier> = self.usage.iter().map(|v| (*v).into()).collect();
        let eku = x509_cert::ext::pkix::ExtendedKeyUsage(oids);
        eku.to_der().map_err(encoding_error)
    }

    fn from_x509_extension_value(extension: &[u8]) -> Result<Self, CertForgeError> {
        let eku = x509_cert::ext::pkix::ExtendedKeyUsage::from_der(extension)?;
        let usage = eku.0.into_iter().map(ExtendedKeyUsageOption::from).collect();
        Ok(Self { usage })
    }
}

/// Represents an option for the Extended Key Usage extension.
///
/// Purposes without a dedicated variant are kept as [`ExtendedKeyUsageOption::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtendedKeyUsageOption {
    ServerAuth,
    ClientAuth,
    CodeSigning,
    EmailProtection,
    TimeStamping,
    OcspSigning,
    Other(ObjectIdentifier),
}

impl From<ExtendedKeyUsageOption> for ObjectIdentifier {
    fn from(value: ExtendedKeyUsageOption) -> Self {
        match value {
            ExtendedKeyUsageOption::OcspSigning => OID_EKU_OCSP_SIGNING,
            ExtendedKeyUsageOption::ServerAuth => OID_EKU_SERVER_AUTH,
            ExtendedKeyUsageOption::ClientAuth => OID_EKU_CLIENT_AUTH,
            ExtendedKeyUsageOption::CodeSigning => OID_EKU_CODE_SIGNING,
            ExtendedKeyUsageOption::EmailProtection => OID_EKU_EMAIL_PROTECTION,
            ExtendedKeyUsageOption::TimeStamping => OID_EKU_TIME_STAMPING,
            ExtendedKeyUsageOption::Other(oid) => oid,
        }
    }
}

impl From<ObjectIdentifier> for ExtendedKeyUsageOption {
    fn from(oid: ObjectIdentifier) -> Self {
        match oid {
            OID_EKU_SERVER_AUTH => ExtendedKeyUsageOption::ServerAuth,
            OID_EKU_CLIENT_AUTH => ExtendedKeyUsageOption::ClientAuth,
            OID_EKU_CODE_SIGNING => ExtendedKeyUsageOption::CodeSigning,
            OID_EKU_EMAIL_PROTECTION => ExtendedKeyUsageOption::EmailProtection,
            OID_EKU_TIME_STAMPING => ExtendedKeyUsageOption::TimeStamping,
            OID_EKU_OCSP_SIGNING => ExtendedKeyUsageOption::OcspSigning,
            other => ExtendedKeyUsageOption::Other(other),
        }
    }
}

impl fmt::Display for ExtendedKeyUsageOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtendedKeyUsageOption::ServerAuth => write!(f, "Server Authentication"),
            ExtendedKeyUsageOption::ClientAuth => write!(f, "Client Authentication"),
            ExtendedKeyUsageOption::CodeSigning => write!(f, "Code Signing"),
            ExtendedKeyUsageOption::EmailProtection => write!(f, "Email Protection"),
            ExtendedKeyUsageOption::TimeStamping => write!(f, "Time Stamping"),
            ExtendedKeyUsageOption::OcspSigning => write!(f, "OCSP Signing"),
            ExtendedKeyUsageOption::Other(oid) => write!(f, "{oid}"),
        }
    }
}
