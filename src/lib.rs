//! # CertForge - RSA Keys, CSRs and Self-Signed Certificates
//!
//! CertForge produces the three artifacts needed to stand up a TLS server,
//! built entirely with rustcrypto libraries:
//!
//! - an RSA private key (PKCS#1, "RSA PRIVATE KEY"),
//! - a PKCS#10 certificate signing request ("CERTIFICATE REQUEST"),
//! - optionally a self-signed X.509 v3 server certificate ("CERTIFICATE").
//!
//! It can also decode existing PEM files into a human-readable summary.
//!
//! ## Supported Key Sizes
//!
//! RSA 2048 (default), 3072 and 4096 bits. Other sizes fall back to 2048.
//! All signatures are RSASSA-PKCS1-v1_5 with SHA-256.
//!
//! ## Quick Start
//!
//! ### Generating a Key, CSR and Certificate
//!
//! ```rust,no_run
//! use certforge::cert::params::Subject;
//! use certforge::generate::{GenerateRequest, generate};
//! use certforge::key::KeySize;
//!
//! # fn main() -> Result<(), certforge::error::CertForgeError> {
//! let request = GenerateRequest::builder()
//!     .subject(
//!         Subject::builder()
//!             .common_name("example.com".to_string())
//!             .organization("Example Corp".to_string())
//!             .country("US".to_string())
//!             .build(),
//!     )
//!     .key_size(KeySize::Rsa3072)
//!     .subject_alt_names(vec!["www.example.com".to_string()])
//!     .self_signed(true)
//!     .validity_days(730)
//!     .build();
//!
//! let bundle = generate(&request)?;
//! let files = bundle.write(std::path::Path::new("out"), &request.prefix)?;
//! println!("Key written to {}", files.key.display());
//! # Ok(())
//! # }
//! ```
//!
//! ### Decoding a PEM File
//!
//! ```rust,no_run
//! use certforge::decode::decode_file;
//!
//! # fn main() -> Result<(), certforge::error::CertForgeError> {
//! let summary = decode_file(std::path::Path::new("out/cert.crt"))?;
//! println!("{summary}");
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Every fallible operation returns [`error::Result`]:
//!
//! ```rust
//! use certforge::{decode::decode_pem, error::CertForgeError};
//!
//! match decode_pem(b"not a pem file") {
//!     Ok(summary) => println!("{summary}"),
//!     Err(CertForgeError::Pem(e)) => println!("No PEM block: {e}"),
//!     Err(CertForgeError::UnsupportedBlockType(label)) => println!("Cannot decode {label}"),
//!     Err(e) => println!("Other error: {e}"),
//! }
//! ```
//!
//! ## Module Organization
//!
//! - [`key`]: RSA key generation, import/export and signing
//! - [`csr`]: PKCS#10 certificate signing requests
//! - [`cert`]: Self-signed certificates and X.509 extensions
//! - [`tbs_certificate`]: Low-level certificate structure assembly
//! - [`decode`]: Human-readable summaries of PEM files
//! - [`generate`]: Producing and writing the output artifacts
//! - [`input`]: Interactive parameter collection
//! - [`pem_utils`]: PEM armor helpers
//! - [`oid`]: Object identifiers used throughout
//! - [`error`]: Error types

pub mod cert;
pub mod csr;
pub mod decode;
pub mod error;
pub mod generate;
pub mod input;
pub mod key;
pub mod oid;
pub mod pem_utils;
pub mod tbs_certificate;
