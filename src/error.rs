//! Error type shared by every certforge operation.

use thiserror::Error;

/// A specialized `Result` type for certforge operations.
pub type Result<T> = std::result::Result<T, CertForgeError>;

/// Represents errors that can occur while generating or decoding
/// keys, requests and certificates.
///
/// Every variant is fatal to the operation that produced it.
#[derive(Debug, Error)]
pub enum CertForgeError {
    /// Reading or writing a file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The input did not contain a decodable PEM block.
    #[error("Failed to parse PEM block: {0}")]
    Pem(#[from] pem::PemError),

    /// Error during data encoding.
    #[error("Failed to encode data: {0}")]
    EncodingError(String),

    /// Error during data decoding.
    #[error("Failed to decode data: {0}")]
    DecodingError(String),

    /// Error due to invalid input.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Error during key generation.
    #[error("Key generation error: {0}")]
    KeyGenerationError(String),

    /// Producing a signature failed.
    #[error("Signing error: {0}")]
    SigningError(String),

    /// A signature did not verify against the embedded public key.
    #[error("Signature verification failed: {0}")]
    VerificationError(String),

    /// Error from RSA operations.
    #[error("RSA error: {0}")]
    RsaError(String),

    /// The PEM label is not one the decoder understands.
    #[error("Unsupported PEM block type: {0}")]
    UnsupportedBlockType(String),

    /// A PKCS#8 container held something other than an RSA key.
    #[error("Unsupported private key type: {0}")]
    UnsupportedKeyType(String),
}

impl From<der::Error> for CertForgeError {
    /// Converts a `der::Error` into a `CertForgeError`.
    fn from(err: der::Error) -> Self {
        CertForgeError::DecodingError(err.to_string())
    }
}

impl From<rsa::Error> for CertForgeError {
    fn from(err: rsa::Error) -> Self {
        CertForgeError::RsaError(err.to_string())
    }
}

impl From<rsa::pkcs1::Error> for CertForgeError {
    fn from(err: rsa::pkcs1::Error) -> Self {
        CertForgeError::DecodingError(err.to_string())
    }
}

impl From<pkcs8::Error> for CertForgeError {
    fn from(err: pkcs8::Error) -> Self {
        CertForgeError::DecodingError(err.to_string())
    }
}

impl From<pkcs8::spki::Error> for CertForgeError {
    fn from(err: pkcs8::spki::Error) -> Self {
        CertForgeError::EncodingError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_value() {
        let err = CertForgeError::UnsupportedBlockType("EC PRIVATE KEY".to_string());
        assert_eq!(err.to_string(), "Unsupported PEM block type: EC PRIVATE KEY");
        let err = CertForgeError::UnsupportedKeyType("1.3.101.112".to_string());
        assert_eq!(err.to_string(), "Unsupported private key type: 1.3.101.112");
    }
}
