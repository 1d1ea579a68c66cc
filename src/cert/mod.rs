pub mod extensions;
pub mod params;

use std::fmt;

use der::asn1::BitString;
use der::{Any, AnyRef, Decode, Encode};
use extensions::{
    BasicConstraints, ExtendedKeyUsage, ExtendedKeyUsageOption, KeyUsage, KeyUsages,
    SubjectAltName, ToAndFromX509Extension,
};
use params::{CertificateParams, ExtensionParam};
use rand_core::RngCore;
use time::OffsetDateTime;
use x509_cert::certificate::CertificateInner;
use x509_cert::spki::AlgorithmIdentifierOwned;

use crate::error::{CertForgeError, Result};
use crate::key::KeyPair;
use crate::oid::{
    OID_ECDSA_WITH_SHA256, OID_ECDSA_WITH_SHA384, OID_ECDSA_WITH_SHA512, OID_ED25519,
    OID_SHA1_WITH_RSA, OID_SHA256_WITH_RSA, OID_SHA384_WITH_RSA, OID_SHA512_WITH_RSA,
};
use crate::pem_utils::{CERTIFICATE_LABEL, der_to_pem};
use crate::tbs_certificate::{TbsCertificate, decode_time};

/// Length in bytes of generated serial numbers (128 bits).
pub const SERIAL_NUMBER_LEN: usize = 16;

/// Signature algorithms the tool can name.
///
/// Only [`SignatureAlgorithm::Sha256WithRSA`] is ever produced; the rest exist
/// so decoded files can be described.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignatureAlgorithm {
    /// SHA-1 with RSA encryption.
    Sha1WithRSA,
    /// SHA-256 with RSA encryption.
    Sha256WithRSA,
    /// SHA-384 with RSA encryption.
    Sha384WithRSA,
    /// SHA-512 with RSA encryption.
    Sha512WithRSA,
    /// SHA-256 with ECDSA.
    Sha256WithECDSA,
    /// SHA-384 with ECDSA.
    Sha384WithECDSA,
    /// SHA-512 with ECDSA.
    Sha512WithECDSA,
    /// Ed25519.
    Ed25519,
    /// Anything else, identified by OID.
    Unknown(const_oid::ObjectIdentifier),
}

impl SignatureAlgorithm {
    /// The `AlgorithmIdentifier` to embed in produced structures. RSA
    /// algorithms carry explicit NULL parameters.
    pub fn algorithm_identifier(&self) -> Result<AlgorithmIdentifierOwned> {
        let oid = self.oid();
        let parameters = match self {
            SignatureAlgorithm::Sha1WithRSA
            | SignatureAlgorithm::Sha256WithRSA
            | SignatureAlgorithm::Sha384WithRSA
            | SignatureAlgorithm::Sha512WithRSA => Some(Any::from(AnyRef::NULL)),
            SignatureAlgorithm::Unknown(_) => {
                return Err(CertForgeError::InvalidInput(format!(
                    "cannot sign with unknown algorithm {oid}"
                )));
            }
            _ => None,
        };
        Ok(AlgorithmIdentifierOwned { oid, parameters })
    }

    pub fn oid(&self) -> const_oid::ObjectIdentifier {
        match self {
            SignatureAlgorithm::Sha1WithRSA => OID_SHA1_WITH_RSA,
            SignatureAlgorithm::Sha256WithRSA => OID_SHA256_WITH_RSA,
            SignatureAlgorithm::Sha384WithRSA => OID_SHA384_WITH_RSA,
            SignatureAlgorithm::Sha512WithRSA => OID_SHA512_WITH_RSA,
            SignatureAlgorithm::Sha256WithECDSA => OID_ECDSA_WITH_SHA256,
            SignatureAlgorithm::Sha384WithECDSA => OID_ECDSA_WITH_SHA384,
            SignatureAlgorithm::Sha512WithECDSA => OID_ECDSA_WITH_SHA512,
            SignatureAlgorithm::Ed25519 => OID_ED25519,
            SignatureAlgorithm::Unknown(oid) => *oid,
        }
    }
}

impl From<const_oid::ObjectIdentifier> for SignatureAlgorithm {
    fn from(oid: const_oid::ObjectIdentifier) -> Self {
        match oid {
            OID_SHA1_WITH_RSA => SignatureAlgorithm::Sha1WithRSA,
            OID_SHA256_WITH_RSA => SignatureAlgorithm::Sha256WithRSA,
            OID_SHA384_WITH_RSA => SignatureAlgorithm::Sha384WithRSA,
            OID_SHA512_WITH_RSA => SignatureAlgorithm::Sha512WithRSA,
            OID_ECDSA_WITH_SHA256 => SignatureAlgorithm::Sha256WithECDSA,
            OID_ECDSA_WITH_SHA384 => SignatureAlgorithm::Sha384WithECDSA,
            OID_ECDSA_WITH_SHA512 => SignatureAlgorithm::Sha512WithECDSA,
            OID_ED25519 => SignatureAlgorithm::Ed25519,
            other => SignatureAlgorithm::Unknown(other),
        }
    }
}

impl fmt::Display for SignatureAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignatureAlgorithm::Sha1WithRSA => write!(f, "SHA1-RSA"),
            SignatureAlgorithm::Sha256WithRSA => write!(f, "SHA256-RSA"),
            SignatureAlgorithm::Sha384WithRSA => write!(f, "SHA384-RSA"),
            SignatureAlgorithm::Sha512WithRSA => write!(f, "SHA512-RSA"),
            SignatureAlgorithm::Sha256WithECDSA => write!(f, "ECDSA-SHA256"),
            SignatureAlgorithm::Sha384WithECDSA => write!(f, "ECDSA-SHA384"),
            SignatureAlgorithm::Sha512WithECDSA => write!(f, "ECDSA-SHA512"),
            SignatureAlgorithm::Ed25519 => write!(f, "Ed25519"),
            SignatureAlgorithm::Unknown(oid) => write!(f, "{oid}"),
        }
    }
}

/// Draws a serial number uniformly from [0, 2^128) using the OS CSPRNG.
///
/// Returned as big-endian bytes.
pub fn generate_serial_number() -> Vec<u8> {
    let mut serial = vec![0u8; SERIAL_NUMBER_LEN];
    rand_core::OsRng.fill_bytes(&mut serial);
    serial
}

/// Represents an X.509 certificate.
#[derive(Debug, Clone)]
pub struct Certificate {
    /// The inner representation of the certificate.
    pub inner: CertificateInner,
}

impl Certificate {
    /// Parses a DER-encoded certificate.
    pub fn from_der(der: &[u8]) -> Result<Self> {
        let inner = CertificateInner::from_der(der)?;
        Ok(Self { inner })
    }

    /// Encodes the certificate into DER format.
    pub fn to_der(&self) -> Result<Vec<u8>> {
        self.inner
            .to_der()
            .map_err(|e| CertForgeError::EncodingError(e.to_string()))
    }

    /// Encodes the certificate into PEM format.
    pub fn to_pem(&self) -> Result<String> {
        Ok(der_to_pem(&self.to_der()?, CERTIFICATE_LABEL))
    }

    /// Creates a new self-signed server certificate.
    ///
    /// The subject doubles as issuer. The certificate carries basic
    /// constraints (critical, not a CA), key usage (critical, digital
    /// signature and key encipherment), the requested extended key usages
    /// and the DNS names from [`CertificateParams::dns_names`].
    pub fn new_self_signed(params: &CertificateParams, key: &KeyPair) -> Result<Self> {
        let key_usage = KeyUsage(KeyUsages::DigitalSignature | KeyUsages::KeyEncipherment);
        let mut extensions = vec![ExtensionParam::from_extension(key_usage, true)?];

        if !params.usages.is_empty() {
            let extended_key_usage = ExtendedKeyUsage {
                usage: params.usages.clone(),
            };
            extensions.push(ExtensionParam::from_extension(extended_key_usage, false)?);
        }

        extensions.push(ExtensionParam::from_extension(
            BasicConstraints::default(),
            true,
        )?);

        let names = params.dns_names();
        if !names.is_empty() {
            extensions.push(ExtensionParam::from_extension(
                SubjectAltName { names },
                false,
            )?);
        }

        let signature_algorithm = SignatureAlgorithm::Sha256WithRSA;
        let tbs_cert = TbsCertificate {
            serial_number: generate_serial_number(),
            signature_algorithm,
            issuer: params.subject.clone(),
            not_before: params.validity.not_before,
            not_after: params.validity.not_after,
            subject: params.subject.clone(),
            subject_public_key: key.as_spki()?,
            extensions,
        };

        let tbs_cert_inner = tbs_cert.to_tbs_certificate_inner()?;
        let tbs_der = tbs_cert_inner
            .to_der()
            .map_err(|e| CertForgeError::EncodingError(e.to_string()))?;
        let signature = key.sign_data(&tbs_der)?;

        let inner = CertificateInner {
            tbs_certificate: tbs_cert_inner,
            signature_algorithm: signature_algorithm.algorithm_identifier()?,
            signature: BitString::from_bytes(&signature)
                .map_err(|e| CertForgeError::EncodingError(e.to_string()))?,
        };

        Ok(Certificate { inner })
    }

    fn extension<E: ToAndFromX509Extension>(&self) -> Option<Result<E>> {
        self.inner
            .tbs_certificate
            .extensions
            .as_ref()?
            .iter()
            .find(|ext| ext.extn_id == E::OID)
            .map(|ext| E::from_x509_extension_value(ext.extn_value.as_bytes()))
    }

    /// Serial number magnitude, big-endian.
    pub fn serial_number(&self) -> &[u8] {
        self.inner.tbs_certificate.serial_number.as_bytes()
    }

    pub fn not_before(&self) -> OffsetDateTime {
        decode_time(&self.inner.tbs_certificate.validity.not_before)
    }

    pub fn not_after(&self) -> OffsetDateTime {
        decode_time(&self.inner.tbs_certificate.validity.not_after)
    }

    pub fn signature_algorithm(&self) -> SignatureAlgorithm {
        self.inner.signature_algorithm.oid.into()
    }

    /// Whether subject and issuer render to the same string.
    pub fn is_self_signed(&self) -> bool {
        let tbs = &self.inner.tbs_certificate;
        tbs.subject.to_string() == tbs.issuer.to_string()
    }

    /// DNS names from the SAN extension; empty when absent or malformed.
    pub fn dns_names(&self) -> Vec<String> {
        match self.extension::<SubjectAltName>() {
            Some(Ok(san)) => san.names,
            _ => Vec::new(),
        }
    }

    /// Key usage bits; `None` when the extension is absent or malformed.
    pub fn key_usage(&self) -> Option<KeyUsage> {
        self.extension::<KeyUsage>().and_then(Result::ok)
    }

    /// Extended key usage purposes; empty when absent or malformed.
    pub fn extended_key_usage(&self) -> Vec<ExtendedKeyUsageOption> {
        match self.extension::<ExtendedKeyUsage>() {
            Some(Ok(eku)) => eku.usage,
            _ => Vec::new(),
        }
    }

    pub fn basic_constraints(&self) -> Option<BasicConstraints> {
        self.extension::<BasicConstraints>().and_then(Result::ok)
    }
}
