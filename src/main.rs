//! Maxport CLI - relink Ableton device presets to a portable device path.
//!
//! This is the main entry point for the maxport command-line application.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::CompressionMethod;

use maxport::prelude::*;

/// Maxport - make Ableton device presets portable
#[derive(Parser)]
#[command(name = "maxport")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rewrite every preset under a folder to reference the device relatively
    Batch {
        /// Folder to scan recursively for .adv/.adg presets
        #[arg(short, long, env = "PRESET_FOLDER")]
        presets: PathBuf,

        /// Path to the .amxd device file the presets should reference
        #[arg(short, long, env = "DEVICE_FILE")]
        device: PathBuf,

        /// Overwrite presets instead of writing _modified siblings
        #[arg(long)]
        in_place: bool,

        /// Skip the _backup copy made before each rewrite
        #[arg(long)]
        no_backup: bool,

        /// Output compression
        #[arg(long, value_enum, default_value = "preserve")]
        compression: CompressionArg,

        /// Also apply the builtin parameter label reorderings
        #[arg(long)]
        rearrange_labels: bool,
    },

    /// Rewrite a single preset
    Single {
        /// Input preset file
        #[arg(short, long)]
        preset: PathBuf,

        /// Path to the .amxd device file
        #[arg(short, long)]
        device: PathBuf,

        /// Overwrite the preset instead of writing a _modified sibling
        #[arg(long)]
        in_place: bool,

        /// Make a _backup copy before rewriting
        #[arg(long)]
        backup: bool,

        /// Output compression
        #[arg(long, value_enum, default_value = "preserve")]
        compression: CompressionArg,

        /// Also apply the builtin parameter label reorderings
        #[arg(long)]
        rearrange_labels: bool,
    },

    /// Process a zip archive containing a device and its presets
    Archive {
        /// Input zip archive
        #[arg(short, long)]
        input: PathBuf,

        /// Output zip archive of rewritten presets
        #[arg(short, long)]
        output: PathBuf,

        /// Output compression for each preset
        #[arg(long, value_enum, default_value = "preserve")]
        compression: CompressionArg,
    },
}

/// Compression policy as a CLI argument.
#[derive(Clone, Copy, ValueEnum)]
enum CompressionArg {
    /// Match each input's envelope
    Preserve,
    /// Always gzip
    Gzip,
    /// Always plain XML
    Plain,
}

impl From<CompressionArg> for CompressionPolicy {
    fn from(arg: CompressionArg) -> Self {
        match arg {
            CompressionArg::Preserve => CompressionPolicy::Preserve,
            CompressionArg::Gzip => CompressionPolicy::ForceGzip,
            CompressionArg::Plain => CompressionPolicy::ForcePlain,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Batch {
            presets,
            device,
            in_place,
            no_backup,
            compression,
            rearrange_labels,
        } => {
            let options = ProcessOptions {
                compression: compression.into(),
                write_mode: if in_place {
                    WriteMode::InPlace
                } else {
                    WriteMode::Suffixed
                },
                make_backup: !no_backup,
                rearrange_labels,
            };
            cmd_batch(&presets, &device, &options)?;
        }
        Commands::Single {
            preset,
            device,
            in_place,
            backup,
            compression,
            rearrange_labels,
        } => {
            let options = ProcessOptions {
                compression: compression.into(),
                write_mode: if in_place {
                    WriteMode::InPlace
                } else {
                    WriteMode::Suffixed
                },
                make_backup: backup,
                rearrange_labels,
            };
            cmd_single(&preset, &device, &options)?;
        }
        Commands::Archive {
            input,
            output,
            compression,
        } => {
            let options = ProcessOptions {
                compression: compression.into(),
                ..Default::default()
            };
            cmd_archive(&input, &output, &options)?;
        }
    }

    Ok(())
}

/// Reporter that narrates each processing step to stdout.
struct ConsoleReport;

impl Report for ConsoleReport {
    fn event(&self, event: ReportEvent<'_>) {
        match event {
            ReportEvent::Started { preset } => println!("Processing {}", preset.display()),
            ReportEvent::RelativePath { value } => println!("Relative path calculated: {value}"),
            ReportEvent::ReferencesLocated { count, tier } => {
                println!("Found {count} reference node(s) ({tier:?} tier)")
            }
            ReportEvent::NoReferences => {
                println!("Warning: no MxPatchRef or PatchSlot reference found")
            }
            ReportEvent::Finished {
                changed: true,
                output: Some(path),
            } => println!("Saved to {}", path.display()),
            ReportEvent::Finished { .. } => println!("No changes made"),
        }
    }
}

fn cmd_batch(presets_dir: &Path, device: &Path, options: &ProcessOptions) -> Result<()> {
    let files = collect_presets(presets_dir);
    if files.is_empty() {
        println!("No presets found under {}", presets_dir.display());
        return Ok(());
    }

    println!("Processing {} presets...", files.len());

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("#>-"),
    );

    let start = Instant::now();
    let outcomes: Vec<bool> = files
        .par_iter()
        .map(|preset| {
            let result = process(preset, device, options, &NullReport);
            let ok = match result {
                Ok(_) => true,
                Err(e) => {
                    pb.suspend(|| eprintln!("Error processing {}: {}", preset.display(), e));
                    false
                }
            };
            pb.inc(1);
            ok
        })
        .collect();
    pb.finish_with_message("Done");

    let successful = outcomes.iter().filter(|ok| **ok).count();
    println!(
        "Processing complete: {}/{} files successfully processed in {:?}",
        successful,
        files.len(),
        start.elapsed()
    );

    if successful < files.len() {
        std::process::exit(1);
    }
    Ok(())
}

fn cmd_single(preset: &Path, device: &Path, options: &ProcessOptions) -> Result<()> {
    let outcome = process(preset, device, options, &ConsoleReport)
        .with_context(|| format!("Failed to process {}", preset.display()))?;

    if !outcome.changed {
        println!("Nothing to rewrite in {}", preset.display());
    }
    Ok(())
}

fn cmd_archive(input: &Path, output: &Path, options: &ProcessOptions) -> Result<()> {
    println!("Extracting archive: {}", input.display());

    let file = fs::File::open(input).context("Failed to open input archive")?;
    let mut archive = zip::ZipArchive::new(file).context("Failed to read input archive")?;

    let tmp = tempfile::tempdir().context("Failed to create temporary directory")?;
    archive
        .extract(tmp.path())
        .context("Failed to extract archive")?;

    let device = find_device(tmp.path())
        .ok_or_else(|| anyhow::anyhow!("no .amxd device file found in archive"))?;
    println!(
        "Found device: {}",
        device.file_name().unwrap_or_default().to_string_lossy()
    );

    let presets = collect_presets(tmp.path());
    if presets.is_empty() {
        eprintln!("Warning: no presets found in archive, nothing to do");
        return Ok(());
    }

    let mut successful = 0;
    for preset in &presets {
        match process(preset, &device, options, &ConsoleReport) {
            Ok(_) => successful += 1,
            Err(e) => eprintln!("Error processing {}: {}", preset.display(), e),
        }
    }
    println!(
        "Processing complete: {}/{} files successfully processed",
        successful,
        presets.len()
    );

    write_modified_zip(tmp.path(), output)?;
    println!("Wrote {}", output.display());

    Ok(())
}

/// Recursively collect .adv/.adg presets, skipping earlier tool outputs.
fn collect_presets(root: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| is_preset(p) && !is_tool_output(p))
        .collect();
    files.sort();
    files
}

fn is_preset(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some(ext) if ext.eq_ignore_ascii_case("adv") || ext.eq_ignore_ascii_case("adg")
    )
}

/// Whether the file was itself produced by a previous run.
fn is_tool_output(path: &Path) -> bool {
    path.file_stem()
        .and_then(|s| s.to_str())
        .is_some_and(|stem| stem.ends_with("_modified") || stem.ends_with("_backup"))
}

/// First .amxd file found under the extracted archive, in path order.
fn find_device(root: &Path) -> Option<PathBuf> {
    let mut devices: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| {
            p.extension()
                .and_then(|e| e.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case("amxd"))
        })
        .collect();
    devices.sort();
    devices.into_iter().next()
}

/// Zip every _modified preset under `root`, preserving relative paths.
fn write_modified_zip(root: &Path, output: &Path) -> Result<()> {
    let out_file = fs::File::create(output).context("Failed to create output archive")?;
    let mut zip = zip::ZipWriter::new(out_file);
    let zip_options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for entry in WalkDir::new(root).into_iter().filter_map(|e| e.ok()) {
        let path = entry.path();
        if !entry.file_type().is_file() || !is_preset(path) {
            continue;
        }
        let stem_is_modified = path
            .file_stem()
            .and_then(|s| s.to_str())
            .is_some_and(|s| s.ends_with("_modified"));
        if !stem_is_modified {
            continue;
        }

        let name = path
            .strip_prefix(root)
            .unwrap_or(path)
            .to_string_lossy()
            .replace('\\', "/");
        zip.start_file(name, zip_options)?;
        let mut reader = fs::File::open(path)?;
        io::copy(&mut reader, &mut zip)?;
    }

    zip.finish()?;
    Ok(())
}
