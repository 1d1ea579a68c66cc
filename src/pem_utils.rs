use crate::error::Result;

/// PEM label for PKCS#1 RSA private keys.
pub const RSA_PRIVATE_KEY_LABEL: &str = "RSA PRIVATE KEY";
/// PEM label for PKCS#8 private keys.
pub const PRIVATE_KEY_LABEL: &str = "PRIVATE KEY";
/// PEM label for PKCS#10 certification requests.
pub const CERTIFICATE_REQUEST_LABEL: &str = "CERTIFICATE REQUEST";
/// PEM label for X.509 certificates.
pub const CERTIFICATE_LABEL: &str = "CERTIFICATE";

/// Convert DER‑encoded data into a PEM‑encoded string with the provided label.
pub fn der_to_pem(der: &[u8], label: &str) -> String {
    let pem = pem::Pem::new(label, der);
    pem::encode_config(
        &pem,
        pem::EncodeConfig::new().set_line_ending(pem::LineEnding::LF),
    )
}

/// Convert a PEM‑encoded string to DER‑encoded bytes.
pub fn pem_to_der(pem_str: &str) -> Result<Vec<u8>> {
    let pem = pem::parse(pem_str)?;
    Ok(pem.contents().to_vec())
}

/// Decode the first PEM block found in `input`.
///
/// Anything after the first block is ignored; a warning is logged when more
/// blocks were present.
pub fn first_block(input: &[u8]) -> Result<pem::Pem> {
    let mut blocks = match pem::parse_many(input) {
        Ok(blocks) if !blocks.is_empty() => blocks,
        // a malformed trailing block fails the whole batch; the first may still parse
        _ => return Ok(pem::parse(input)?),
    };
    if blocks.len() > 1 {
        log::warn!(
            "Input holds {} PEM blocks; only the first ({}) is decoded",
            blocks.len(),
            blocks[0].tag()
        );
    }
    Ok(blocks.swap_remove(0))
}
