use const_oid::ObjectIdentifier;
use const_oid::db::{rfc4519, rfc5912, rfc8410};

/// pkcs-9-at-extensionRequest in [RFC 2985](https://www.rfc-editor.org/rfc/rfc2985#appendix-A)
pub const OID_PKCS_9_AT_EXTENSION_REQUEST: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.2.840.113549.1.9.14");

/// id-at-commonName in [RFC 4519](https://www.rfc-editor.org/rfc/rfc4519#section-2.3)
pub const OID_COMMON_NAME: ObjectIdentifier = rfc4519::COMMON_NAME;
/// id-at-countryName in [RFC 4519](https://www.rfc-editor.org/rfc/rfc4519#section-2.2)
pub const OID_COUNTRY_NAME: ObjectIdentifier = rfc4519::COUNTRY_NAME;
/// id-at-localityName in [RFC 4519](https://www.rfc-editor.org/rfc/rfc4519#section-2.16)
pub const OID_LOCALITY_NAME: ObjectIdentifier = rfc4519::LOCALITY_NAME;
/// id-at-stateOrProvinceName in [RFC 4519](https://www.rfc-editor.org/rfc/rfc4519#section-2.33)
pub const OID_STATE_OR_PROVINCE_NAME: ObjectIdentifier = rfc4519::ST;
/// id-at-organizationName in [RFC 4519](https://www.rfc-editor.org/rfc/rfc4519#section-2.19)
pub const OID_ORG_NAME: ObjectIdentifier = rfc4519::ORGANIZATION_NAME;
/// id-at-organizationalUnitName in [RFC 4519](https://www.rfc-editor.org/rfc/rfc4519#section-2.20)
pub const OID_ORG_UNIT_NAME: ObjectIdentifier = rfc4519::ORGANIZATIONAL_UNIT_NAME;

/// rsaEncryption in [RFC 5912](https://www.rfc-editor.org/rfc/rfc5912#section-6)
pub const OID_RSA_ENCRYPTION: ObjectIdentifier = rfc5912::RSA_ENCRYPTION;
pub const OID_SHA1_WITH_RSA: ObjectIdentifier = rfc5912::SHA_1_WITH_RSA_ENCRYPTION;
pub const OID_SHA256_WITH_RSA: ObjectIdentifier = rfc5912::SHA_256_WITH_RSA_ENCRYPTION;
pub const OID_SHA384_WITH_RSA: ObjectIdentifier = rfc5912::SHA_384_WITH_RSA_ENCRYPTION;
pub const OID_SHA512_WITH_RSA: ObjectIdentifier = rfc5912::SHA_512_WITH_RSA_ENCRYPTION;
pub const OID_ECDSA_WITH_SHA256: ObjectIdentifier = rfc5912::ECDSA_WITH_SHA_256;
pub const OID_ECDSA_WITH_SHA384: ObjectIdentifier = rfc5912::ECDSA_WITH_SHA_384;
pub const OID_ECDSA_WITH_SHA512: ObjectIdentifier = rfc5912::ECDSA_WITH_SHA_512;
/// id-Ed25519 in [RFC 8410](https://www.rfc-editor.org/rfc/rfc8410#section-3)
pub const OID_ED25519: ObjectIdentifier = rfc8410::ID_ED_25519;

pub const OID_KEY_USAGE: ObjectIdentifier = rfc5912::ID_CE_KEY_USAGE;
pub const OID_SUBJECT_ALT_NAME: ObjectIdentifier = rfc5912::ID_CE_SUBJECT_ALT_NAME;
pub const OID_BASIC_CONSTRAINTS: ObjectIdentifier = rfc5912::ID_CE_BASIC_CONSTRAINTS;
pub const OID_EXT_KEY_USAGE: ObjectIdentifier = rfc5912::ID_CE_EXT_KEY_USAGE;

pub const OID_EKU_SERVER_AUTH: ObjectIdentifier = rfc5912::ID_KP_SERVER_AUTH;
pub const OID_EKU_CLIENT_AUTH: ObjectIdentifier = rfc5912::ID_KP_CLIENT_AUTH;
pub const OID_EKU_CODE_SIGNING: ObjectIdentifier = rfc5912::ID_KP_CODE_SIGNING;
pub const OID_EKU_EMAIL_PROTECTION: ObjectIdentifier = rfc5912::ID_KP_EMAIL_PROTECTION;
pub const OID_EKU_TIME_STAMPING: ObjectIdentifier = rfc5912::ID_KP_TIME_STAMPING;
pub const OID_EKU_OCSP_SIGNING: ObjectIdentifier = rfc5912::ID_KP_OCSP_SIGNING;
