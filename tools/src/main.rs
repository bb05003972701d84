use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use idl::SchemaId;
use log::{debug, LevelFilter};
use schema::Catalog;
use tools::{
    decode_message_json, format_decode_pretty, inspect_catalog, parse_catalog, parse_hex,
    CatalogReport, KeyStyle,
};

#[derive(Parser)]
#[command(
    name = "meshcodec-tools",
    version,
    about = "Bluetooth Mesh message decoding and Cap'n Proto schema tools"
)]
struct Cli {
    /// Catalog JSON to use instead of the built-in reference models.
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,
    /// Enable debug logging (RUST_LOG overrides).
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write the Cap'n Proto schema for the catalog.
    Generate {
        /// File id in hex; derived from the catalog hash when omitted.
        #[arg(long)]
        id: Option<String>,
        /// Output path; stdout when omitted.
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Decode one access message given as hex.
    Decode {
        /// Message bytes, opcode first.
        hex: String,
        /// Output format.
        #[arg(long, value_enum, default_value_t = DecodeFormat::Json)]
        format: DecodeFormat,
        /// Use camelCase keys in JSON output.
        #[arg(long)]
        camel: bool,
    },
    /// List families, opcodes, variants and layout sizes.
    Inspect,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum DecodeFormat {
    Json,
    Pretty,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let owned;
    let catalog = match &cli.catalog {
        Some(path) => {
            owned = load_catalog(path)?;
            &owned
        }
        None => models::catalog(),
    };

    match cli.command {
        Command::Generate { id, out } => {
            let id = match id {
                Some(raw) => parse_schema_id(&raw)?,
                None => SchemaId::derive(catalog),
            };
            let text = idl::generate(id, catalog).context("generate schema")?;
            match out {
                Some(path) => {
                    fs::write(&path, text)
                        .with_context(|| format!("write schema {}", path.display()))?;
                    debug!("wrote schema {id} to {}", path.display());
                }
                None => print!("{text}"),
            }
        }
        Command::Decode { hex, format, camel } => {
            let bytes = parse_hex(&hex)?;
            let decoded = codec::decode_message(catalog, &bytes, &wire::Limits::default())
                .context("decode message")?;
            match format {
                DecodeFormat::Json => {
                    let keys = if camel { KeyStyle::Camel } else { KeyStyle::Snake };
                    let output = decode_message_json(&decoded, keys);
                    let json = serde_json::to_string_pretty(&output).context("serialize json")?;
                    println!("{json}");
                }
                DecodeFormat::Pretty => {
                    print!("{}", format_decode_pretty(catalog, &decoded)?);
                }
            }
        }
        Command::Inspect => print_catalog_report(&inspect_catalog(catalog)),
    }
    Ok(())
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn load_catalog(path: &Path) -> Result<Catalog> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read catalog {}", path.display()))?;
    parse_catalog(&contents)
}

fn parse_schema_id(raw: &str) -> Result<SchemaId> {
    let digits = raw
        .strip_prefix("@0x")
        .or_else(|| raw.strip_prefix("0x"))
        .unwrap_or(raw);
    let id = u64::from_str_radix(digits, 16).with_context(|| format!("invalid schema id {raw}"))?;
    Ok(SchemaId::new(id)?)
}

fn print_catalog_report(report: &CatalogReport) {
    println!(
        "catalog hash: {} layouts: {} variant sets: {}",
        report.hash, report.layouts, report.variant_sets
    );
    for family in &report.families {
        println!("{} ({} messages)", family.name, family.messages.len());
        for message in &family.messages {
            println!("  {} {}", message.opcode, message.name);
            for params in &message.params {
                let variant = params
                    .variant
                    .as_deref()
                    .map(|name| format!("{name}: "))
                    .unwrap_or_default();
                println!(
                    "    {variant}{} ({} bytes, {} fields)",
                    params.layout, params.byte_len, params.fields
                );
            }
        }
    }
}
