//! `hid-fixup`: inspect and patch HID report-descriptor dumps.
//!
//! Works on the hex dump format the kernel exposes at
//! `/sys/kernel/debug/hid/<bus>:<vid>:<pid>.<n>/rdesc` (whitespace-separated
//! hex bytes). The device identity is inferred from the sysfs directory
//! name when possible and can be overridden with `--device`.

#![deny(static_mut_refs)]

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use hid_fixup_common::{
    DescriptorBuffer, DeviceId, FixupRegistry, MAX_DESCRIPTOR_BYTES, scan,
};
use serde::Serialize;
use tracing::debug;

#[derive(Parser)]
#[command(
    name = "hid-fixup",
    about = "Inspect and patch HID report-descriptor dumps"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a descriptor dump: length, item framing, collection balance,
    /// and whether a registered fixup matches
    Check {
        /// Path to an rdesc dump (sysfs debugfs format)
        path: PathBuf,
        /// Device identity as BUS:VID:PID (hex), e.g. 0003:3746:FFFF;
        /// defaults to the sysfs directory name
        #[arg(long)]
        device: Option<String>,
        /// Emit the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Apply registered fixups to a descriptor dump
    Fix {
        /// Path to an rdesc dump (sysfs debugfs format)
        path: PathBuf,
        /// Device identity as BUS:VID:PID (hex); defaults to the sysfs
        /// directory name
        #[arg(long)]
        device: Option<String>,
        /// Write the (possibly patched) dump here instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// List registered fixups
    Registry,
}

/// All fixups this build knows about.
fn build_registry() -> Result<FixupRegistry> {
    let mut registry = FixupRegistry::new();
    hid_ecoflow_rdesc::register(&mut registry).context("registering EcoFlow fixups")?;
    Ok(registry)
}

/// Parses a sysfs-format dump: whitespace-separated hex bytes.
fn parse_dump(text: &str) -> Result<Vec<u8>> {
    let bytes = text
        .split_whitespace()
        .map(|tok| {
            u8::from_str_radix(tok, 16).with_context(|| format!("invalid hex byte '{tok}'"))
        })
        .collect::<Result<Vec<u8>>>()?;
    if bytes.len() > MAX_DESCRIPTOR_BYTES {
        bail!(
            "dump is {} bytes, larger than any report descriptor can be ({MAX_DESCRIPTOR_BYTES})",
            bytes.len()
        );
    }
    Ok(bytes)
}

fn format_dump(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len().saturating_mul(3));
    for (i, byte) in bytes.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        out.push_str(&format!("{byte:02x}"));
    }
    out.push('\n');
    out
}

/// Resolves the device identity: explicit `--device` wins, otherwise the
/// sysfs directory name (`.../0003:3746:FFFF.000A/rdesc`) is tried.
fn resolve_device(path: &Path, device: Option<&str>) -> Result<Option<DeviceId>> {
    if let Some(spec) = device {
        let id = DeviceId::parse_sysfs_name(spec)
            .with_context(|| format!("parsing --device '{spec}'"))?;
        return Ok(Some(id));
    }
    let inferred = path
        .parent()
        .and_then(Path::file_name)
        .and_then(|name| name.to_str())
        .and_then(|name| DeviceId::parse_sysfs_name(name).ok());
    if let Some(id) = &inferred {
        debug!(device = %id, "inferred device identity from sysfs path");
    }
    Ok(inferred)
}

#[derive(Debug, Serialize)]
struct CheckReport {
    device: Option<DeviceId>,
    declared_len: usize,
    items: usize,
    open_collections: i32,
    truncated: bool,
    balanced: bool,
    fixup: Option<String>,
    would_patch: bool,
    patched_len: Option<usize>,
}

fn check(registry: &FixupRegistry, path: &Path, device: Option<&str>, json: bool) -> Result<()> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading dump {}", path.display()))?;
    let bytes = parse_dump(&text)?;
    let device = resolve_device(path, device)?;
    let summary = scan(&bytes);

    // Dry-run the registered fixup on a scratch copy to see if it bites.
    let (fixup_name, would_patch, patched_len) = match device.and_then(|id| registry.lookup(&id)) {
        Some(fixup) => {
            let mut scratch = [0u8; MAX_DESCRIPTOR_BYTES];
            for (dst, src) in scratch.iter_mut().zip(&bytes) {
                *dst = *src;
            }
            let mut buf = DescriptorBuffer::new(&mut scratch, bytes.len());
            let outcome = fixup.fixup(&mut buf);
            (
                Some(fixup.name().to_string()),
                outcome.is_patched(),
                outcome.is_patched().then(|| buf.len()),
            )
        }
        None => (None, false, None),
    };

    let report = CheckReport {
        device,
        declared_len: bytes.len(),
        items: summary.items,
        open_collections: summary.open_collections,
        truncated: summary.truncated,
        balanced: summary.is_balanced(),
        fixup: fixup_name,
        would_patch,
        patched_len,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    match report.device {
        Some(id) => println!("device:           {id}"),
        None => println!("device:           (unknown, pass --device BUS:VID:PID)"),
    }
    println!("declared length:  {} bytes", report.declared_len);
    println!("items framed:     {}", report.items);
    println!("open collections: {}", report.open_collections);
    if report.truncated {
        println!("warning:          last item truncated");
    }
    match (&report.fixup, report.would_patch, report.patched_len) {
        (Some(name), true, Some(len)) => {
            println!("fixup:            {name} would patch to {len} bytes");
        }
        (Some(name), _, _) => println!("fixup:            {name} registered, signature not matched"),
        (None, _, _) => println!("fixup:            none registered for this device"),
    }
    Ok(())
}

fn fix(
    registry: &FixupRegistry,
    path: &Path,
    device: Option<&str>,
    output: Option<&Path>,
) -> Result<()> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading dump {}", path.display()))?;
    let bytes = parse_dump(&text)?;
    let Some(id) = resolve_device(path, device)? else {
        bail!(
            "cannot infer device identity from {}; pass --device BUS:VID:PID",
            path.display()
        );
    };

    let mut data = [0u8; MAX_DESCRIPTOR_BYTES];
    for (dst, src) in data.iter_mut().zip(&bytes) {
        *dst = *src;
    }
    let mut buf = DescriptorBuffer::new(&mut data, bytes.len());
    let new_len = registry.apply(&id, &mut buf);

    if new_len == bytes.len() {
        eprintln!("{id}: descriptor unchanged ({new_len} bytes)");
    } else {
        eprintln!("{id}: descriptor patched, {} -> {new_len} bytes", bytes.len());
    }

    let dump = format_dump(buf.bytes());
    match output {
        Some(out) => fs::write(out, dump)
            .with_context(|| format!("writing patched dump to {}", out.display()))?,
        None => print!("{dump}"),
    }
    Ok(())
}

fn list_registry(registry: &FixupRegistry) {
    if registry.is_empty() {
        println!("No fixups registered.");
        return;
    }
    println!("{:<16} Fixup", "Device");
    for (id, fixup) in registry.iter() {
        println!("{:<16} {}", id.to_string(), fixup.name());
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let registry = build_registry()?;

    match cli.command {
        Commands::Check { path, device, json } => {
            check(&registry, &path, device.as_deref(), json)
        }
        Commands::Fix {
            path,
            device,
            output,
        } => fix(&registry, &path, device.as_deref(), output.as_deref()),
        Commands::Registry => {
            list_registry(&registry);
            Ok(())
        }
    }
}
