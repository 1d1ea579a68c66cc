use std::time::SystemTime;

use der::asn1::{GeneralizedTime, UtcTime};
use time::OffsetDateTime;
use x509_cert::Version;
use x509_cert::certificate::TbsCertificateInner;
use x509_cert::serial_number::SerialNumber;
use x509_cert::spki::SubjectPublicKeyInfoOwned;
use x509_cert::time::Time;

use crate::cert::SignatureAlgorithm;
use crate::cert::params::{ExtensionParam, Subject};
use crate::error::{CertForgeError, Result};

/// Represents the "To Be Signed" (TBS) portion of an X.509 certificate.
/// This struct contains all the fields required to generate a valid X.509 certificate.
///
/// # Fields
/// * `serial_number` - Big-endian magnitude of the serial number.
/// * `signature_algorithm` - The algorithm used to sign the certificate.
/// * `issuer` - The certificate issuer.
/// * `not_before` - The start of the certificate's validity period.
/// * `not_after` - The end of the certificate's validity period.
/// * `subject` - The certificate subject.
/// * `subject_public_key` - The subject's public key.
/// * `extensions` - Additional X.509 extensions for the certificate.
pub struct TbsCertificate {
    /// Certificate serial number
    pub serial_number: Vec<u8>,
    /// Certificate signature algorithm
    pub signature_algorithm: SignatureAlgorithm,
    /// Certificate issuer
    pub issuer: Subject,
    pub not_before: OffsetDateTime,
    pub not_after: OffsetDateTime,
    /// Certificate subject
    pub subject: Subject,
    /// Subject's public key
    pub subject_public_key: SubjectPublicKeyInfoOwned,
    /// Certificate extensions
    pub extensions: Vec<ExtensionParam>,
}

impl TbsCertificate {
    /// Converts the `TbsCertificate` into a `TbsCertificateInner` for DER encoding.
    pub fn to_tbs_certificate_inner(&self) -> Result<TbsCertificateInner> {
        let extensions = self
            .extensions
            .iter()
            .map(ExtensionParam::as_x509_extension)
            .collect::<Result<Vec<_>>>()?;

        let validity = x509_cert::time::Validity {
            not_before: encode_time(self.not_before)?,
            not_after: encode_time(self.not_after)?,
        };

        let serial_number = SerialNumber::new(self.serial_number.as_slice())
            .map_err(|e| CertForgeError::EncodingError(e.to_string()))?;

        Ok(TbsCertificateInner {
            version: Version::V3,
            serial_number,
            signature: self.signature_algorithm.algorithm_identifier()?,
            issuer: self.issuer.as_x509_name()?,
            validity,
            subject: self.subject.as_x509_name()?,
            subject_public_key_info: self.subject_public_key.clone(),
            issuer_unique_id: None,
            subject_unique_id: None,
            extensions: if extensions.is_empty() {
                None
            } else {
                Some(extensions)
            },
        })
    }
}

/// UTCTime through 2049, GeneralizedTime from 2050 on (RFC 5280 §4.1.2.5).
pub fn encode_time(at: OffsetDateTime) -> Result<Time> {
    let system_time = SystemTime::from(at);
    let time = if at.year() < 2050 {
        UtcTime::from_system_time(system_time).map(Time::UtcTime)
    } else {
        GeneralizedTime::from_system_time(system_time).map(Time::GeneralTime)
    };
    time.map_err(|e| CertForgeError::EncodingError(e.to_string()))
}

pub fn decode_time(time: &Time) -> OffsetDateTime {
    match time {
        Time::UtcTime(ut) => OffsetDateTime::from(ut.to_system_time()),
        Time::GeneralTime(gt) => OffsetDateTime::from(gt.to_system_time()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn picks_time_encoding_by_year() {
        let early = datetime!(2049-12-31 23:59:59 UTC);
        assert!(matches!(encode_time(early).unwrap(), Time::UtcTime(_)));
        let late = datetime!(2050-01-01 00:00:00 UTC);
        assert!(matches!(encode_time(late).unwrap(), Time::GeneralTime(_)));
    }

    #[test]
    fn time_round_trips() {
        let at = datetime!(2031-05-17 08:30:00 UTC);
        assert_eq!(decode_time(&encode_time(at).unwrap()), at);
        let at = datetime!(2077-01-02 03:04:05 UTC);
        assert_eq!(decode_time(&encode_time(at).unwrap()), at);
    }
}
