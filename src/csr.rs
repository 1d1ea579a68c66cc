//! PKCS#10 certification requests.

use der::asn1::{BitString, SetOfVec};
use der::{Any, Decode, Encode};
use rsa::RsaPublicKey;
use rsa::pkcs8::DecodePublicKey;
use sha2::{Sha256, Sha384, Sha512};
use x509_cert::attr::Attribute;
use x509_cert::ext::Extension;
use x509_cert::request::{CertReq, CertReqInfo, Version};

use crate::cert::SignatureAlgorithm;
use crate::cert::extensions::{SubjectAltName, decode_san_extension};
use crate::cert::params::{DistinguishedName, ExtensionParam, Subject};
use crate::error::{CertForgeError, Result};
use crate::key::{KeyPair, verify_pkcs1v15};
use crate::oid::{OID_PKCS_9_AT_EXTENSION_REQUEST, OID_SUBJECT_ALT_NAME};
use crate::pem_utils::{CERTIFICATE_REQUEST_LABEL, der_to_pem};

fn encoding_error(err: der::Error) -> CertForgeError {
    CertForgeError::EncodingError(err.to_string())
}

/// A signed certification request.
#[derive(Debug, Clone)]
pub struct CertificateRequest {
    pub inner: CertReq,
}

impl CertificateRequest {
    /// Builds a request for `subject` and signs it with `key` (SHA-256 with RSA).
    ///
    /// Non-empty `subject_alt_names` are carried as a subjectAltName extension
    /// inside a PKCS#9 extensionRequest attribute.
    pub fn new(subject: &Subject, subject_alt_names: &[String], key: &KeyPair) -> Result<Self> {
        let mut attributes = SetOfVec::new();
        if !subject_alt_names.is_empty() {
            let san = ExtensionParam::from_extension(
                SubjectAltName {
                    names: subject_alt_names.to_vec(),
                },
                false,
            )?;
            attributes = SetOfVec::try_from(vec![extension_request(vec![
                san.as_x509_extension()?,
            ])?])
            .map_err(encoding_error)?;
            log::info!(
                "Added {} Subject Alternative Names to the CSR",
                subject_alt_names.len()
            );
        }

        let info = CertReqInfo {
            version: Version::V1,
            subject: subject.as_x509_name()?,
            public_key: key.as_spki()?,
            attributes,
        };

        let signature_algorithm = SignatureAlgorithm::Sha256WithRSA;
        let info_der = info.to_der().map_err(encoding_error)?;
        let signature = key.sign_data(&info_der)?;

        let inner = CertReq {
            info,
            algorithm: signature_algorithm.algorithm_identifier()?,
            signature: BitString::from_bytes(&signature).map_err(encoding_error)?,
        };
        Ok(Self { inner })
    }

    /// Parses a DER-encoded request.
    pub fn from_der(der: &[u8]) -> Result<Self> {
        let inner = CertReq::from_der(der)?;
        Ok(Self { inner })
    }

    pub fn to_der(&self) -> Result<Vec<u8>> {
        self.inner.to_der().map_err(encoding_error)
    }

    /// PEM with the "CERTIFICATE REQUEST" label.
    pub fn to_pem(&self) -> Result<String> {
        Ok(der_to_pem(&self.to_der()?, CERTIFICATE_REQUEST_LABEL))
    }

    pub fn subject(&self) -> DistinguishedName {
        DistinguishedName::from_x509_name(&self.inner.info.subject)
    }

    pub fn signature_algorithm(&self) -> SignatureAlgorithm {
        self.inner.algorithm.oid.into()
    }

    /// DNS names requested through the subjectAltName extension.
    ///
    /// Missing or malformed attributes and extensions contribute no names.
    pub fn dns_names(&self) -> Vec<String> {
        self.inner
            .info
            .attributes
            .iter()
            .filter(|attribute| attribute.oid == OID_PKCS_9_AT_EXTENSION_REQUEST)
            .flat_map(|attribute| attribute.values.iter())
            .filter_map(requested_extensions)
            .flatten()
            .filter(|extension| extension.extn_id == OID_SUBJECT_ALT_NAME)
            .filter_map(|extension| decode_san_extension(extension.extn_value.as_bytes()))
            .flatten()
            .collect()
    }

    /// Checks the request signature against the public key it embeds.
    pub fn verify_signature(&self) -> Result<()> {
        let spki_der = self.inner.info.public_key.to_der().map_err(encoding_error)?;
        let public_key = RsaPublicKey::from_public_key_der(&spki_der).map_err(|e| {
            CertForgeError::VerificationError(format!("unsupported public key: {e}"))
        })?;
        let message = self.inner.info.to_der().map_err(encoding_error)?;
        let signature = self.inner.signature.as_bytes().ok_or_else(|| {
            CertForgeError::VerificationError("signature has unused bits".to_string())
        })?;

        match self.signature_algorithm() {
            SignatureAlgorithm::Sha256WithRSA => {
                verify_pkcs1v15::<Sha256>(&public_key, &message, signature)
            }
            SignatureAlgorithm::Sha384WithRSA => {
                verify_pkcs1v15::<Sha384>(&public_key, &message, signature)
            }
            SignatureAlgorithm::Sha512WithRSA => {
                verify_pkcs1v15::<Sha512>(&public_key, &message, signature)
            }
            other => Err(CertForgeError::VerificationError(format!(
                "unsupported signature algorithm {other}"
            ))),
        }
    }
}

fn extension_request(extensions: Vec<Extension>) -> Result<Attribute> {
    let value = Any::from_der(&extensions.to_der().map_err(encoding_error)?)?;
    Ok(Attribute {
        oid: OID_PKCS_9_AT_EXTENSION_REQUEST,
        values: SetOfVec::try_from(vec![value]).map_err(encoding_error)?,
    })
}

fn requested_extensions(value: &Any) -> Option<Vec<Extension>> {
    let der = value.to_der().ok()?;
    Vec::<Extension>::from_der(&der).ok()
}
