use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use openssl::{
    hash::MessageDigest,
    pkey::{Id, PKeyRef, Private},
    x509::{X509NameRef, X509Ref},
};

use pfx_container::PfxContainer;

#[derive(Parser)]
#[clap(version = "0.1")]
struct Cli {
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Prints credential container contents
    DumpContainer(DumpContainerArguments),
}

#[derive(Copy, Clone, ValueEnum)]
enum OutputFormat {
    Plain,
    Pem,
}

#[derive(Args)]
struct DumpContainerArguments {
    /// Path to the credential container
    path: PathBuf,
    /// Password protecting the container
    #[clap(long, default_value = "", action = ArgAction::Set)]
    password: String,
    /// Output format
    #[clap(value_enum, long, required = false, action = ArgAction::Set)]
    outform: Option<OutputFormat>,
}

fn main() -> Result<()> {
    pretty_env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::DumpContainer(args) => dump_container(&args),
    }
}

fn format_name(name: &X509NameRef) -> String {
    name.entries()
        .map(|entry| {
            let field = entry.object().nid().short_name().unwrap_or("?");
            let value = entry
                .data()
                .as_utf8()
                .map(|value| value.to_string())
                .unwrap_or_else(|_| "<unprintable>".to_string());
            format!("{}={}", field, value)
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn key_algorithm(key: &PKeyRef<Private>) -> &'static str {
    match key.id() {
        Id::RSA => "RSA",
        Id::EC => "EC",
        Id::DSA => "DSA",
        _ => "unknown",
    }
}

fn print_certificate(label: &str, cert: &X509Ref) -> Result<()> {
    println!("{}:", label);
    println!("\tSubject: {}", format_name(cert.subject_name()));
    println!("\tIssuer: {}", format_name(cert.issuer_name()));
    let serial = cert
        .serial_number()
        .to_bn()
        .context("Error converting serial number")?;
    println!(
        "\tSerial: {}",
        serial.to_hex_str().context("Error formatting serial number")?
    );
    println!("\tNot after: {}", cert.not_after());
    let digest = cert
        .digest(MessageDigest::sha256())
        .context("Error computing certificate digest")?;
    println!("\tSHA-256 fingerprint: {}", hex::encode(digest));
    Ok(())
}

fn dump_container(args: &DumpContainerArguments) -> Result<()> {
    let container = PfxContainer::from_file(&args.path, &args.password)
        .with_context(|| format!("Error loading container at {}", args.path.display()))?;
    log::debug!(
        "Loaded container from {}: key present: {}, CA certificates: {}",
        args.path.display(),
        container.has_private_key(),
        container.ca_certificates().len()
    );

    match args.outform {
        Some(OutputFormat::Pem) => dump_pem(&container),
        _ => dump_plain(&container),
    }
}

fn dump_plain(container: &PfxContainer) -> Result<()> {
    if container.friendly_name().is_empty() {
        println!("Friendly name: <none>");
    } else {
        println!("Friendly name: {}", container.friendly_name());
    }

    match container.private_key() {
        Some(key) => println!(
            "Private key: {}, {} bits (not exported)",
            key_algorithm(key),
            key.bits()
        ),
        None => println!("Private key: <none>"),
    }

    match container.certificate() {
        Some(cert) => print_certificate("Certificate", cert)?,
        None => println!("Certificate: <none>"),
    }

    println!("CA certificates: {}", container.ca_certificates().len());
    for (num, cert) in container.ca_certificates().iter().enumerate() {
        print_certificate(&format!("CA certificate {}", num), cert)?;
    }

    Ok(())
}

fn dump_pem(container: &PfxContainer) -> Result<()> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    if let Some(cert) = container.certificate() {
        let pem = cert.to_pem().context("Error encoding certificate")?;
        handle
            .write_all(&pem)
            .context("Error writing certificate")?;
    }
    for cert in container.ca_certificates() {
        let pem = cert.to_pem().context("Error encoding CA certificate")?;
        handle
            .write_all(&pem)
            .context("Error writing CA certificate")?;
    }

    Ok(())
}
