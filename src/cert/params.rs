use std::fmt;

use bon::Builder;
use const_oid::ObjectIdentifier;
use der::asn1::{PrintableStringRef, SetOfVec};
use der::{Any, Tag, Tagged};
use time::Duration;
use time::OffsetDateTime;
use x509_cert::attr::AttributeTypeAndValue;
use x509_cert::name::{Name, RdnSequence, RelativeDistinguishedName};

use super::extensions::ExtendedKeyUsageOption;
use super::extensions::ToAndFromX509Extension;
use crate::error::{CertForgeError, Result};
use crate::oid::{
    OID_COMMON_NAME, OID_COUNTRY_NAME, OID_LOCALITY_NAME, OID_ORG_NAME, OID_ORG_UNIT_NAME,
    OID_STATE_OR_PROVINCE_NAME,
};

/// The identity an operator asks to be certified.
///
/// Every field is optional; blank values are treated as absent when the
/// name is encoded.
#[derive(Clone, Debug, Builder, Default, PartialEq, Eq)]
pub struct Subject {
    pub common_name: Option<String>,
    pub organization: Option<String>,
    pub organizational_unit: Option<String>,
    pub country: Option<String>,
    pub state: Option<String>,
    pub locality: Option<String>,
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl Subject {
    /// Trimmed common name, if one was given.
    pub fn common_name(&self) -> Option<&str> {
        non_blank(&self.common_name)
    }

    /// Converts the subject into an X.509 `Name`.
    ///
    /// Attributes are emitted one per RDN in the order C, ST, L, O, OU, CN.
    pub fn as_x509_name(&self) -> Result<Name> {
        let attributes = [
            (OID_COUNTRY_NAME, &self.country),
            (OID_STATE_OR_PROVINCE_NAME, &self.state),
            (OID_LOCALITY_NAME, &self.locality),
            (OID_ORG_NAME, &self.organization),
            (OID_ORG_UNIT_NAME, &self.organizational_unit),
            (OID_COMMON_NAME, &self.common_name),
        ];

        let rdns = attributes
            .iter()
            .filter_map(|(oid, value)| non_blank(value).map(|v| (*oid, v)))
            .map(|(oid, value)| single_attribute_rdn(oid, value))
            .collect::<Result<Vec<_>>>()?;

        Ok(RdnSequence(rdns))
    }
}

fn single_attribute_rdn(oid: ObjectIdentifier, value: &str) -> Result<RelativeDistinguishedName> {
    // PrintableString when the alphabet allows it, UTF8String otherwise
    let tag = if PrintableStringRef::new(value).is_ok() {
        Tag::PrintableString
    } else {
        Tag::Utf8String
    };
    let atv = AttributeTypeAndValue {
        oid,
        value: Any::new(tag, value.as_bytes().to_vec())
            .map_err(|e| CertForgeError::EncodingError(e.to_string()))?,
    };
    let set = SetOfVec::try_from(vec![atv])
        .map_err(|e| CertForgeError::EncodingError(e.to_string()))?;
    Ok(RelativeDistinguishedName(set))
}

/// A decoded subject or issuer name.
///
/// `Display` renders it as `CN=…, O=…, OU=…, C=…, ST=…, L=…`, omitting
/// absent attributes. All attributes except the common name may repeat.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DistinguishedName {
    pub common_name: Option<String>,
    pub organization: Vec<String>,
    pub organizational_unit: Vec<String>,
    pub country: Vec<String>,
    pub province: Vec<String>,
    pub locality: Vec<String>,
}

impl DistinguishedName {
    /// Creates a `DistinguishedName` from an X.509 `Name`.
    ///
    /// Attributes of other types, and values that are not a string type, are
    /// skipped. When the common name repeats the last one wins.
    pub fn from_x509_name(x509dn: &Name) -> Self {
        let mut dn = DistinguishedName::default();

        for rdn in x509dn.0.iter() {
            for attr in rdn.0.iter() {
                let Some(value) = attribute_string(&attr.value) else {
                    continue;
                };
                match attr.oid {
                    OID_COMMON_NAME => dn.common_name = Some(value),
                    OID_ORG_NAME => dn.organization.push(value),
                    OID_ORG_UNIT_NAME => dn.organizational_unit.push(value),
                    OID_COUNTRY_NAME => dn.country.push(value),
                    OID_STATE_OR_PROVINCE_NAME => dn.province.push(value),
                    OID_LOCALITY_NAME => dn.locality.push(value),
                    _ => {}
                }
            }
        }

        dn
    }
}

fn attribute_string(value: &Any) -> Option<String> {
    match value.tag() {
        Tag::PrintableString
        | Tag::Utf8String
        | Tag::Ia5String
        | Tag::TeletexString
        | Tag::VisibleString => std::str::from_utf8(value.value()).ok().map(str::to_owned),
        _ => None,
    }
}

impl From<&Subject> for DistinguishedName {
    fn from(subject: &Subject) -> Self {
        let many = |value: &Option<String>| -> Vec<String> {
            non_blank(value).map(str::to_owned).into_iter().collect()
        };
        DistinguishedName {
            common_name: subject.common_name().map(str::to_owned),
            organization: many(&subject.organization),
            organizational_unit: many(&subject.organizational_unit),
            country: many(&subject.country),
            province: many(&subject.state),
            locality: many(&subject.locality),
        }
    }
}

impl fmt::Display for DistinguishedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .common_name
            .iter()
            .map(|cn| format!("CN={cn}"))
            .chain(self.organization.iter().map(|v| format!("O={v}")))
            .chain(self.organizational_unit.iter().map(|v| format!("OU={v}")))
            .chain(self.country.iter().map(|v| format!("C={v}")))
            .chain(self.province.iter().map(|v| format!("ST={v}")))
            .chain(self.locality.iter().map(|v| format!("L={v}")))
            .collect();
        write!(f, "{}", parts.join(", "))
    }
}

/// Certificate validity period.
///
/// # Fields
/// * `not_before` - The start of the validity period.
/// * `not_after` - The end of the validity period.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Validity {
    pub not_before: OffsetDateTime,
    pub not_after: OffsetDateTime,
}

impl Validity {
    /// Creates a validity period starting now (whole seconds) for the given
    /// number of 24-hour days.
    ///
    /// Fails with [`CertForgeError::InvalidInput`] when the end date falls
    /// outside the representable range.
    pub fn for_days(days: u32) -> Result<Self> {
        let now = OffsetDateTime::now_utc();
        let now = now - Duration::nanoseconds(i64::from(now.nanosecond()));
        let not_after = now.checked_add(Duration::days(i64::from(days))).ok_or_else(|| {
            CertForgeError::InvalidInput(format!("validity of {days} days is out of range"))
        })?;
        Ok(Self {
            not_before: now,
            not_after,
        })
    }
}

/// Parameters for a self-signed server certificate.
///
/// # Fields
/// * `subject` - Subject and issuer of the certificate.
/// * `subject_alt_names` - Explicit DNS names.
/// * `validity` - The validity window.
/// * `usages` - Extended key usage purposes.
#[derive(Clone, Debug, Builder)]
pub struct CertificateParams {
    pub subject: Subject,
    #[builder(default)]
    pub subject_alt_names: Vec<String>,
    pub validity: Validity,
    #[builder(default = vec![ExtendedKeyUsageOption::ServerAuth])]
    pub usages: Vec<ExtendedKeyUsageOption>,
}

impl CertificateParams {
    /// DNS names to certify: the explicit SANs, followed by the common name
    /// when it looks like a domain (contains a `.`) and is not listed yet.
    pub fn dns_names(&self) -> Vec<String> {
        let mut names = self.subject_alt_names.clone();
        if let Some(cn) = self.subject.common_name() {
            if cn.contains('.') && !names.iter().any(|name| name == cn) {
                names.push(cn.to_string());
            }
        }
        names
    }
}

/// Represents an X.509 extension.
///
/// # Fields
/// * `oid` - The object identifier of the extension.
/// * `critical` - Indicates if the extension is critical.
/// * `value` - The DER-encoded value of the extension.
#[derive(Clone, Debug)]
pub struct ExtensionParam {
    pub oid: ObjectIdentifier,
    pub critical: bool,
    /// DER-encoded extension value
    pub value: Vec<u8>,
}

impl ExtensionParam {
    /// Creates an `ExtensionParam` from a specific extension.
    pub fn from_extension<E: ToAndFromX509Extension>(extension: E, critical: bool) -> Result<Self> {
        Ok(Self {
            oid: E::OID,
            critical,
            value: extension.to_x509_extension_value()?,
        })
    }

    /// Decodes an `ExtensionParam` into a specific extension.
    pub fn to_extension<E: ToAndFromX509Extension>(&self) -> Result<E> {
        E::from_x509_extension_value(&self.value)
    }

    pub fn as_x509_extension(&self) -> Result<x509_cert::ext::Extension> {
        Ok(x509_cert::ext::Extension {
            extn_id: self.oid,
            critical: self.critical,
            extn_value: der::asn1::OctetString::new(self.value.clone())
                .map_err(|e| CertForgeError::EncodingError(e.to_string()))?,
        })
    }
}
