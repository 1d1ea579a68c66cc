#![allow(dead_code)]

use certforge::cert::params::Subject;
use certforge::generate::{GenerateRequest, GeneratedBundle, generate};
use certforge::key::KeySize;

pub fn subject(common_name: &str) -> Subject {
    Subject::builder()
        .common_name(common_name.to_string())
        .organization("Example Corp".to_string())
        .country("US".to_string())
        .build()
}

pub fn generate_bundle(
    common_name: &str,
    key_size: KeySize,
    subject_alt_names: &[&str],
    self_signed: bool,
) -> GeneratedBundle {
    let request = GenerateRequest::builder()
        .subject(subject(common_name))
        .key_size(key_size)
        .subject_alt_names(subject_alt_names.iter().map(|s| s.to_string()).collect())
        .self_signed(self_signed)
        .build();
    generate(&request).unwrap()
}

/// DER contents of a PEM string.
pub fn der(pem: &str) -> Vec<u8> {
    certforge::pem_utils::pem_to_der(pem).unwrap()
}
