//! Single-preset orchestration: decode, rewrite, write back.

use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use maxport_preset::PresetDocument;

use crate::labels::{builtin_label_sets, rewrite_label_set};
use crate::locate::{locate_references, SearchTier};
use crate::relpath::relative_path_between;
use crate::report::{Report, ReportEvent};
use crate::rewrite::apply_path_rewrite;
use crate::Result;

/// Compression of the written preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompressionPolicy {
    /// Match whatever envelope the input had.
    #[default]
    Preserve,
    /// Always gzip the output.
    ForceGzip,
    /// Always write plain XML.
    ForcePlain,
}

/// Where the rewritten preset is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteMode {
    /// Overwrite the input file.
    InPlace,
    /// Write a sibling `<stem>_modified.<ext>` file.
    #[default]
    Suffixed,
}

/// Options for [`process`].
#[derive(Debug, Clone, Default)]
pub struct ProcessOptions {
    pub compression: CompressionPolicy,
    pub write_mode: WriteMode,
    /// Copy the original bytes to `<stem>_backup.<ext>` before touching
    /// anything. Batch drivers default this on; single-shot callers off.
    pub make_backup: bool,
    /// Also apply the builtin label-set reorderings.
    pub rearrange_labels: bool,
}

/// What `process` did for one preset.
#[derive(Debug, Clone)]
pub struct Outcome {
    /// Whether any field was actually mutated.
    pub changed: bool,
    /// The written file, when `changed`.
    pub output: Option<PathBuf>,
}

/// Backup filename: suffix inserted before the original extension.
pub fn backup_path_for(preset_path: &Path) -> PathBuf {
    with_stem_suffix(preset_path, "_backup")
}

/// Modified-output filename: suffix inserted before the original extension.
pub fn modified_path_for(preset_path: &Path) -> PathBuf {
    with_stem_suffix(preset_path, "_modified")
}

fn with_stem_suffix(path: &Path, suffix: &str) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match path.extension() {
        Some(ext) => format!("{stem}{suffix}.{}", ext.to_string_lossy()),
        None => format!("{stem}{suffix}"),
    };
    path.with_file_name(name)
}

fn absolutize(path: &Path) -> io::Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(env::current_dir()?.join(path))
    }
}

/// Rewrite one preset so it references `device_path` relatively.
///
/// Steps: optional backup, decode, relative-path computation, tiered
/// reference search, path rewrite, optional label rewrite, conditional write
/// back. When nothing changed the file is left alone, a just-made backup is
/// removed as redundant, and the outcome reports `changed: false`.
///
/// The backup is written before decode is attempted, so a malformed preset
/// still leaves a copy behind for manual inspection.
///
/// # Errors
///
/// Per-preset fatal conditions only: a malformed document or a filesystem
/// failure. Batch callers catch these at the file boundary and continue.
pub fn process(
    preset_path: &Path,
    device_path: &Path,
    options: &ProcessOptions,
    report: &dyn Report,
) -> Result<Outcome> {
    report.event(ReportEvent::Started {
        preset: preset_path,
    });

    let raw = fs::read(preset_path)?;

    let backup = if options.make_backup {
        let path = backup_path_for(preset_path);
        fs::write(&path, &raw)?;
        Some(path)
    } else {
        None
    };

    let mut doc = PresetDocument::decode(&raw)?;

    let preset_abs = absolutize(preset_path)?;
    let preset_dir = preset_abs.parent().unwrap_or(Path::new("/"));
    let rel = relative_path_between(&absolutize(device_path)?, preset_dir);
    let rel_str = rel.to_string_lossy().into_owned();
    report.event(ReportEvent::RelativePath { value: &rel_str });

    let (refs, tier) = locate_references(&mut doc.root);
    match tier {
        Some(tier) => report.event(ReportEvent::ReferencesLocated {
            count: refs.len(),
            tier,
        }),
        None => report.event(ReportEvent::NoReferences),
    }

    // The fallback container shape tolerates fields at any depth.
    let deep = matches!(tier, Some(SearchTier::PatchSlot));
    let mut changed = apply_path_rewrite(refs, &rel_str, deep);

    if options.rearrange_labels {
        for (name, labels) in builtin_label_sets() {
            changed |= rewrite_label_set(&mut doc.root, name, labels);
        }
    }

    if !changed {
        // Ran fine but touched nothing: the backup is redundant.
        if let Some(path) = backup {
            fs::remove_file(path)?;
        }
        report.event(ReportEvent::Finished {
            changed: false,
            output: None,
        });
        return Ok(Outcome {
            changed: false,
            output: None,
        });
    }

    let compress = match options.compression {
        CompressionPolicy::Preserve => doc.envelope.is_gzip(),
        CompressionPolicy::ForceGzip => true,
        CompressionPolicy::ForcePlain => false,
    };
    let bytes = doc.encode(compress)?;

    let output = match options.write_mode {
        WriteMode::InPlace => preset_path.to_path_buf(),
        WriteMode::Suffixed => modified_path_for(preset_path),
    };
    fs::write(&output, bytes)?;

    report.event(ReportEvent::Finished {
        changed: true,
        output: Some(&output),
    });
    Ok(Outcome {
        changed: true,
        output: Some(output),
    })
}
