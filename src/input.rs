//! Interactive collection of certificate parameters.
//!
//! Every value can be supplied up front through [`InputOverrides`]; only the
//! missing ones are asked for. In batch mode nothing is asked and defaults
//! fill the gaps.

use std::io::{BufRead, Write};

use crate::cert::params::Subject;
use crate::error::Result;
use crate::generate::{DEFAULT_PREFIX, DEFAULT_VALIDITY_DAYS, GenerateRequest};
use crate::key::KeySize;

/// Values supplied on the command line.
#[derive(Clone, Debug, Default)]
pub struct InputOverrides {
    pub common_name: Option<String>,
    pub organization: Option<String>,
    pub organizational_unit: Option<String>,
    pub country: Option<String>,
    pub state: Option<String>,
    pub locality: Option<String>,
    pub key_size: Option<usize>,
    pub prefix: Option<String>,
    /// Produce a self-signed certificate without asking.
    pub self_signed: bool,
    pub validity_days: Option<i64>,
    pub subject_alt_names: Vec<String>,
    /// Never prompt.
    pub batch: bool,
}

/// Line-oriented prompts over any reader/writer pair.
pub struct Prompter<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    /// Prints `label` and returns the trimmed reply. End of input reads as an
    /// empty reply.
    pub fn ask(&mut self, label: &str) -> Result<String> {
        write!(self.writer, "{label}")?;
        self.writer.flush()?;
        let mut line = String::new();
        self.reader.read_line(&mut line)?;
        Ok(line.trim().to_string())
    }

    /// A yes/no question; only `y` or `yes` (any case) count as yes.
    pub fn confirm(&mut self, label: &str) -> Result<bool> {
        let reply = self.ask(label)?.to_lowercase();
        Ok(reply == "y" || reply == "yes")
    }

    /// Reads one entry per line until a blank line or end of input.
    pub fn ask_list(&mut self, label: &str) -> Result<Vec<String>> {
        writeln!(self.writer, "{label}")?;
        let mut entries = Vec::new();
        loop {
            let entry = self.ask("")?;
            if entry.is_empty() {
                return Ok(entries);
            }
            entries.push(entry);
        }
    }
}

fn field<R: BufRead, W: Write>(
    given: &Option<String>,
    label: &str,
    batch: bool,
    prompter: &mut Prompter<R, W>,
) -> Result<Option<String>> {
    let value = match given {
        Some(value) => value.trim().to_string(),
        None if batch => return Ok(None),
        None => prompter.ask(label)?,
    };
    Ok(Some(value).filter(|v| !v.is_empty()))
}

fn validity_days(days: i64) -> u32 {
    match u32::try_from(days) {
        Ok(days) if days > 0 => days,
        _ => {
            log::warn!("Invalid validity period {days}. Using default: {DEFAULT_VALIDITY_DAYS}");
            DEFAULT_VALIDITY_DAYS
        }
    }
}

/// Builds a [`GenerateRequest`] from `overrides`, prompting for whatever is
/// missing unless `overrides.batch` is set.
pub fn collect<R: BufRead, W: Write>(
    overrides: &InputOverrides,
    prompter: &mut Prompter<R, W>,
) -> Result<GenerateRequest> {
    let batch = overrides.batch;

    let subject = Subject {
        common_name: field(
            &overrides.common_name,
            "Common Name (domain name, e.g. example.com): ",
            batch,
            prompter,
        )?,
        organization: field(
            &overrides.organization,
            "Organization (e.g. Company Inc): ",
            batch,
            prompter,
        )?,
        organizational_unit: field(
            &overrides.organizational_unit,
            "Organizational Unit (e.g. IT Department): ",
            batch,
            prompter,
        )?,
        country: field(
            &overrides.country,
            "Country (2 letter code, e.g. US): ",
            batch,
            prompter,
        )?,
        state: field(
            &overrides.state,
            "State/Province (e.g. California): ",
            batch,
            prompter,
        )?,
        locality: field(
            &overrides.locality,
            "Locality/City (e.g. San Francisco): ",
            batch,
            prompter,
        )?,
    };

    let key_size = match overrides.key_size {
        Some(bits) => KeySize::from_bits_or_default(bits),
        None if batch => KeySize::default(),
        None => KeySize::parse_or_default(
            &prompter.ask("RSA Key Size (2048, 3072, or 4096) [default: 2048]: ")?,
        ),
    };

    let prefix = field(
        &overrides.prefix,
        "Output file prefix [default: cert]: ",
        batch,
        prompter,
    )?
    .unwrap_or_else(|| DEFAULT_PREFIX.to_string());

    let asked_self_signed = !overrides.self_signed
        && !batch
        && prompter.confirm("\nDo you want to create a self-signed certificate? [y/N]: ")?;
    let self_signed = overrides.self_signed || asked_self_signed;

    let validity_days = match overrides.validity_days {
        Some(days) => validity_days(days),
        None if asked_self_signed => {
            let reply = prompter.ask("Certificate validity in days [default: 365]: ")?;
            if reply.is_empty() {
                DEFAULT_VALIDITY_DAYS
            } else {
                match reply.parse::<i64>() {
                    Ok(days) => validity_days(days),
                    Err(_) => {
                        log::warn!(
                            "Invalid validity period {reply:?}. Using default: {DEFAULT_VALIDITY_DAYS}"
                        );
                        DEFAULT_VALIDITY_DAYS
                    }
                }
            }
        }
        None => DEFAULT_VALIDITY_DAYS,
    };

    let mut subject_alt_names: Vec<String> = overrides
        .subject_alt_names
        .iter()
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .collect();
    if subject_alt_names.is_empty()
        && !batch
        && prompter.confirm("\nDo you want to add Subject Alternative Names (SANs)? [y/N]: ")?
    {
        subject_alt_names =
            prompter.ask_list("Enter Subject Alternative Names (one per line, blank line to finish):")?;
    }

    Ok(GenerateRequest::builder()
        .subject(subject)
        .key_size(key_size)
        .subject_alt_names(subject_alt_names)
        .prefix(prefix)
        .self_signed(self_signed)
        .validity_days(validity_days)
        .build())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run(overrides: &InputOverrides, input: &str) -> (GenerateRequest, String) {
        let mut output = Vec::new();
        let mut prompter = Prompter::new(Cursor::new(input.as_bytes().to_vec()), &mut output);
        let request = collect(overrides, &mut prompter).unwrap();
        (request, String::from_utf8(output).unwrap())
    }

    #[test]
    fn full_interactive_session() {
        let input = "example.com\nExample Corp\nWeb\nUS\nCalifornia\nSan Francisco\n\
                     4096\nsite\ny\n730\ny\nwww.example.com\napi.example.com\n\n";
        let (request, output) = run(&InputOverrides::default(), input);

        assert_eq!(request.subject.common_name.as_deref(), Some("example.com"));
        assert_eq!(request.subject.locality.as_deref(), Some("San Francisco"));
        assert_eq!(request.key_size, KeySize::Rsa4096);
        assert_eq!(request.prefix, "site");
        assert!(request.self_signed);
        assert_eq!(request.validity_days, 730);
        assert_eq!(
            request.subject_alt_names,
            vec!["www.example.com", "api.example.com"]
        );
        assert!(output.starts_with("Common Name (domain name, e.g. example.com): "));
        assert!(output.contains("Certificate validity in days [default: 365]: "));
    }

    #[test]
    fn blank_answers_take_defaults() {
        let (request, output) = run(&InputOverrides::default(), "\n\n\n\n\n\n\n\n\n\n");
        assert_eq!(request.subject, Subject::default());
        assert_eq!(request.key_size, KeySize::Rsa2048);
        assert_eq!(request.prefix, "cert");
        assert!(!request.self_signed);
        assert_eq!(request.validity_days, 365);
        assert!(request.subject_alt_names.is_empty());
        assert!(!output.contains("validity"));
    }

    #[test]
    fn end_of_input_reads_as_blank() {
        let (request, _) = run(&InputOverrides::default(), "only.example\n");
        assert_eq!(request.subject.common_name.as_deref(), Some("only.example"));
        assert!(!request.self_signed);
    }

    #[test]
    fn invalid_numbers_fall_back() {
        let (request, _) = run(&InputOverrides::default(), "\n\n\n\n\n\n1024\n\nyes\nforever\nn\n");
        assert_eq!(request.key_size, KeySize::Rsa2048);
        assert!(request.self_signed);
        assert_eq!(request.validity_days, 365);
    }

    #[test]
    fn overrides_skip_their_prompts() {
        let overrides = InputOverrides {
            common_name: Some("svc.example".to_string()),
            self_signed: true,
            validity_days: Some(90),
            ..Default::default()
        };
        let (request, output) = run(&overrides, "Org\n\n\n\n\n\n\n\n");
        assert!(!output.contains("Common Name"));
        assert!(!output.contains("self-signed certificate?"));
        assert!(!output.contains("validity"));
        assert_eq!(request.subject.organization.as_deref(), Some("Org"));
        assert!(request.self_signed);
        assert_eq!(request.validity_days, 90);
    }

    #[test]
    fn batch_mode_never_prompts() {
        let overrides = InputOverrides {
            common_name: Some("batch.example".to_string()),
            key_size: Some(3072),
            subject_alt_names: vec!["a.example".to_string(), " ".to_string()],
            validity_days: Some(-5),
            self_signed: true,
            batch: true,
            ..Default::default()
        };
        let (request, output) = run(&overrides, "");
        assert!(output.is_empty());
        assert_eq!(request.key_size, KeySize::Rsa3072);
        assert_eq!(request.subject_alt_names, vec!["a.example"]);
        assert_eq!(request.validity_days, 365);
        assert_eq!(request.subject.organization, None);
    }
}
