mod cli;

use std::io;
use std::process::ExitCode;

use anyhow::{Context, Result};
use certforge::decode::decode_file;
use certforge::generate::generate;
use certforge::input::{Prompter, collect};
use clap::Parser;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .format_target(false)
        .init();

    let args = cli::Args::parse_from(cli::normalize_args(std::env::args_os()));
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: cli::Args) -> Result<()> {
    if let Some(path) = &args.decode {
        let decoded =
            decode_file(path).with_context(|| format!("failed to decode {}", path.display()))?;
        print!("{decoded}");
        return Ok(());
    }

    println!("CertForge - TLS Certificate Generator");
    println!("-------------------------------------");

    let stdin = io::stdin();
    let mut prompter = Prompter::new(stdin.lock(), io::stdout());
    let request = collect(&args.overrides(), &mut prompter)?;

    let bundle = generate(&request)?;
    let dir = args.output.clone().unwrap_or_default();
    let files = bundle
        .write(&dir, &request.prefix)
        .context("failed to write output files")?;

    println!();
    println!("Files generated successfully:");
    println!("  Private key: {}", files.key.display());
    println!("  CSR:         {}", files.csr.display());
    match (&files.certificate, bundle.not_after()) {
        (Some(path), Some(not_after)) => {
            println!("  Certificate: {}", path.display());
            println!();
            println!(
                "Certificate is valid for {} days (until {})",
                request.validity_days,
                not_after.format(DATE_FORMAT)?
            );
        }
        _ => {
            println!();
            println!("Submit the CSR to a Certificate Authority to obtain a signed certificate.");
        }
    }
    println!("Keep the private key secure and never share it.");
    Ok(())
}
