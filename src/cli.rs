use std::ffi::OsString;
use std::path::PathBuf;

use certforge::input::InputOverrides;
use clap::{ArgAction, Parser};

/// Long options that may also be spelled with a single dash (`-days=30`).
const LONG_OPTIONS: &[&str] = &[
    "help", "version", "days", "decode", "output", "cn", "org", "ou", "country", "state",
    "locality", "key-size", "prefix", "san", "batch",
];

#[derive(Parser, Debug)]
#[command(
    name = "certforge",
    version,
    about = "Generate an RSA key, a CSR and optionally a self-signed certificate",
    disable_version_flag = true
)]
pub struct Args {
    /// Print version
    #[arg(short = 'v', long = "version", action = ArgAction::Version)]
    pub version: Option<bool>,

    /// Create a self-signed certificate without asking
    #[arg(short = 's')]
    pub self_signed: bool,

    /// Validity period in days for self-signed certificates [default: 365]
    #[arg(long, value_name = "DAYS")]
    pub days: Option<i64>,

    /// Directory to write the generated files into
    #[arg(short = 'o', long = "output", value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Decode a PEM file and print its contents instead of generating
    #[arg(long, value_name = "FILE")]
    pub decode: Option<PathBuf>,

    /// Common name (domain name)
    #[arg(long = "cn")]
    pub common_name: Option<String>,

    /// Organization
    #[arg(long = "org")]
    pub organization: Option<String>,

    /// Organizational unit
    #[arg(long = "ou")]
    pub organizational_unit: Option<String>,

    /// Two-letter country code
    #[arg(long)]
    pub country: Option<String>,

    /// State or province
    #[arg(long)]
    pub state: Option<String>,

    /// Locality or city
    #[arg(long)]
    pub locality: Option<String>,

    /// RSA key size: 2048, 3072 or 4096
    #[arg(long, value_name = "BITS")]
    pub key_size: Option<usize>,

    /// Output file prefix [default: cert]
    #[arg(long)]
    pub prefix: Option<String>,

    /// Subject alternative DNS name (repeatable)
    #[arg(long = "san", value_name = "DNS")]
    pub subject_alt_names: Vec<String>,

    /// Never prompt; use defaults for anything not given
    #[arg(long)]
    pub batch: bool,
}

impl Args {
    pub fn overrides(&self) -> InputOverrides {
        InputOverrides {
            common_name: self.common_name.clone(),
            organization: self.organization.clone(),
            organizational_unit: self.organizational_unit.clone(),
            country: self.country.clone(),
            state: self.state.clone(),
            locality: self.locality.clone(),
            key_size: self.key_size,
            prefix: self.prefix.clone(),
            self_signed: self.self_signed,
            validity_days: self.days,
            subject_alt_names: self.subject_alt_names.clone(),
            batch: self.batch,
        }
    }
}

/// Rewrites single-dash long options (`-days=730`, `-decode`) to their
/// double-dash form. Everything after `--` is left alone.
pub fn normalize_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    let mut escaped = false;
    args.into_iter()
        .enumerate()
        .map(|(index, arg)| {
            if index == 0 || escaped {
                return arg;
            }
            if arg == "--" {
                escaped = true;
                return arg;
            }
            normalize(arg)
        })
        .collect()
}

fn normalize(arg: OsString) -> OsString {
    let Some(text) = arg.to_str() else {
        return arg;
    };
    let Some(rest) = text.strip_prefix('-') else {
        return arg;
    };
    if rest.starts_with('-') {
        return arg;
    }
    let name = rest.split('=').next().unwrap_or_default();
    if LONG_OPTIONS.contains(&name) {
        OsString::from(format!("-{text}"))
    } else {
        arg
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        let args = normalize_args(args.iter().map(OsString::from));
        Args::try_parse_from(args).unwrap()
    }

    #[test]
    fn single_dash_long_options_are_accepted() {
        let args = parse(&["certforge", "-s", "-days=730", "-o=out"]);
        assert!(args.self_signed);
        assert_eq!(args.days, Some(730));
        assert_eq!(args.output, Some(PathBuf::from("out")));

        let args = parse(&["certforge", "-decode", "cert.crt"]);
        assert_eq!(args.decode, Some(PathBuf::from("cert.crt")));
    }

    #[test]
    fn double_dash_forms_still_work() {
        let args = parse(&[
            "certforge", "--days", "30", "--san", "a.example", "--san", "b.example", "--batch",
        ]);
        assert_eq!(args.days, Some(30));
        assert_eq!(args.subject_alt_names, vec!["a.example", "b.example"]);
        assert!(args.batch);
    }

    #[test]
    fn normalization_leaves_values_and_escapes_alone() {
        let args: Vec<OsString> = ["certforge", "-s", "--", "-days"]
            .iter()
            .map(OsString::from)
            .collect();
        assert_eq!(normalize_args(args.clone()), args);
        assert_eq!(normalize(OsString::from("-x")), OsString::from("-x"));
    }

    #[test]
    fn overrides_mirror_flags() {
        let args = parse(&["certforge", "--cn", "example.com", "--key-size", "4096"]);
        let overrides = args.overrides();
        assert_eq!(overrides.common_name.as_deref(), Some("example.com"));
        assert_eq!(overrides.key_size, Some(4096));
        assert_eq!(overrides.validity_days, None);
        assert!(!overrides.batch);
    }

    #[test]
    fn version_flag_exits_early() {
        let err = Args::try_parse_from(normalize_args(
            ["certforge", "-version"].iter().map(OsString::from),
        ))
        .unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }
}
