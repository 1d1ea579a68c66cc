//! Cross-checks generated artifacts with an independent parser.

mod util;

use certforge::key::KeySize;
use x509_parser::extensions::{GeneralName, ParsedExtension};
use x509_parser::prelude::{FromDer, X509Certificate, X509CertificationRequest};
use x509_parser::x509::X509Version;

fn dns_names<'a>(names: &'a [GeneralName<'a>]) -> Vec<&'a str> {
    names
        .iter()
        .filter_map(|name| match name {
            GeneralName::DNSName(dns) => Some(*dns),
            _ => None,
        })
        .collect()
}

#[test]
fn certificate_parses_and_verifies() {
    let bundle = util::generate_bundle(
        "parser.example",
        KeySize::Rsa2048,
        &["www.parser.example"],
        true,
    );
    let der = util::der(bundle.cert_pem.as_ref().unwrap());
    let (rest, cert) = X509Certificate::from_der(&der).unwrap();
    assert!(rest.is_empty());

    assert_eq!(cert.version(), X509Version::V3);
    assert_eq!(cert.subject().to_string(), cert.issuer().to_string());
    let cn = cert.subject().iter_common_name().next().unwrap();
    assert_eq!(cn.as_str().unwrap(), "parser.example");
    cert.verify_signature(None).unwrap();

    let bc = cert.basic_constraints().unwrap().unwrap();
    assert!(bc.critical);
    assert!(!bc.value.ca);

    let ku = cert.key_usage().unwrap().unwrap();
    assert!(ku.critical);
    assert!(ku.value.digital_signature());
    assert!(ku.value.key_encipherment());
    assert!(!ku.value.key_cert_sign());

    let eku = cert.extended_key_usage().unwrap().unwrap();
    assert!(!eku.critical);
    assert!(eku.value.server_auth);
    assert!(!eku.value.client_auth);

    let san = cert.subject_alternative_name().unwrap().unwrap();
    assert!(!san.critical);
    assert_eq!(
        dns_names(&san.value.general_names),
        vec!["www.parser.example", "parser.example"]
    );

    let validity = cert.validity();
    assert_eq!(
        validity.not_after.timestamp() - validity.not_before.timestamp(),
        365 * 24 * 60 * 60
    );
    assert!(cert.raw_serial().len() <= 17);
}

#[test]
fn request_parses_and_verifies() {
    let bundle = util::generate_bundle(
        "csr.example",
        KeySize::Rsa2048,
        &["a.csr.example", "b.csr.example"],
        false,
    );
    let der = util::der(&bundle.csr_pem);
    let (rest, csr) = X509CertificationRequest::from_der(&der).unwrap();
    assert!(rest.is_empty());
    csr.verify_signature().unwrap();

    let cn = csr
        .certification_request_info
        .subject
        .iter_common_name()
        .next()
        .unwrap();
    assert_eq!(cn.as_str().unwrap(), "csr.example");

    let names: Vec<&str> = csr
        .requested_extensions()
        .unwrap()
        .filter_map(|ext| match ext {
            ParsedExtension::SubjectAlternativeName(san) => Some(dns_names(&san.general_names)),
            _ => None,
        })
        .flatten()
        .collect();
    assert_eq!(names, vec!["a.csr.example", "b.csr.example"]);
}

#[test]
fn request_without_names_has_no_extension_request() {
    let bundle = util::generate_bundle("bare.example", KeySize::Rsa2048, &[], false);
    let der = util::der(&bundle.csr_pem);
    let (_, csr) = X509CertificationRequest::from_der(&der).unwrap();
    csr.verify_signature().unwrap();
    assert!(csr.requested_extensions().is_none());
}
