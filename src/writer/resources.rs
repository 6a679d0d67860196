//! Provisioning of the per-device resources next to the Makefile: the linker
//! script and the startup assembly file.
//!
//! All operations here are best-effort. Instead of swallowing errors they
//! return a typed [`Provision`] outcome (or a variant enum for the linker
//! script) and the caller logs accordingly; the run never aborts over a
//! missing resource.

use std::fs;
use std::path::Path;

use crate::model::{LinkScriptVariant, device_stem};
use crate::processor::{continuation, paths};

/// Outcome of one best-effort file operation.
#[derive(Debug)]
pub enum Provision {
    Created,
    AlreadyPresent,
    Failed(std::io::Error),
}

/// Copy the device's linker script into the project root, trying naming
/// convention 1 (`<device>_FLASH.ld`) before convention 2
/// (`<stem>Tx_FLASH.ld`). Skipped when the type-1 script is already in place
/// and regeneration was not forced.
pub fn provision_link_script(
    device: &str,
    root: &Path,
    resources: &Path,
    force: bool,
) -> LinkScriptVariant {
    let type1 = format!("{device}_FLASH.ld");
    if !force && root.join(&type1).is_file() {
        return LinkScriptVariant::Type1;
    }

    let src_dir = resources.join("LinkScript");
    if fs::copy(src_dir.join(&type1), root.join(&type1)).is_ok() {
        println!("generate link script");
        return LinkScriptVariant::Type1;
    }

    let type2 = format!("{}Tx_FLASH.ld", device_stem(device));
    if fs::copy(src_dir.join(&type2), root.join(&type2)).is_ok() {
        println!("generate link script");
        return LinkScriptVariant::Type2;
    }

    println!("failed to generate link script");
    LinkScriptVariant::None
}

/// Build the `ASM_SOURCES` block.
///
/// The item whose path carries `startup` triggers provisioning of a fresh
/// device startup file and is emitted under the new file's path. Plain
/// `.asm` items are emitted with the extension rewritten to `.s` and flagged
/// for manual translation; everything else passes through unchanged.
pub fn asm_source_lines(
    sources: &[String],
    device: &str,
    root: &Path,
    resources: &Path,
) -> Vec<String> {
    let mut lines = Vec::new();
    for source in paths::asm_sources(sources) {
        if source.contains("startup") {
            lines.push(continuation(provision_startup(
                &source, device, root, resources,
            )));
        } else if source.contains(".asm") {
            println!("you need to deal with {source} manually");
            let renamed = format!("{}s", &source[..source.len() - 3]);
            lines.push(continuation(renamed));
        } else {
            lines.push(continuation(source));
        }
    }
    lines
}

/// File name of the device startup resource, e.g. `startup_stm32f407xx.s`.
fn startup_file_name(device: &str) -> String {
    format!("startup_{}xx.s", device_stem(&device.to_lowercase()))
}

/// Back up the project's old startup file, copy the device-specific one into
/// the same directory (created if absent) and return the relative path the
/// Makefile should reference.
fn provision_startup(source_rel: &str, device: &str, root: &Path, resources: &Path) -> String {
    let original = root.join(source_rel);
    match backup(&original) {
        Provision::Created => println!("backup old startup file"),
        // a pre-existing backup or a missing original is not an error
        Provision::AlreadyPresent => {}
        Provision::Failed(err) => println!("can't back up {source_rel}: {err}"),
    }

    let file_name = startup_file_name(device);
    let dst_dir_rel = paths::strip_trailing_segments(source_rel, '/', 1);
    let dst_dir = root.join(&dst_dir_rel);
    match copy_startup(&resources.join("StartupFile").join(&file_name), &dst_dir, &file_name) {
        Provision::Created => println!("generate new startup file"),
        Provision::AlreadyPresent => {}
        Provision::Failed(err) => println!("failed to generate startup file: {err}"),
    }

    if dst_dir_rel.is_empty() {
        file_name
    } else {
        format!("{dst_dir_rel}/{file_name}")
    }
}

fn backup(original: &Path) -> Provision {
    if !original.is_file() {
        return Provision::AlreadyPresent;
    }
    let backup_path = original.with_file_name(format!(
        "{}.backup",
        original.file_name().unwrap_or_default().to_string_lossy()
    ));
    match fs::rename(original, &backup_path) {
        Ok(()) => Provision::Created,
        Err(err) => Provision::Failed(err),
    }
}

fn copy_startup(src: &Path, dst_dir: &Path, file_name: &str) -> Provision {
    if let Err(err) = fs::create_dir_all(dst_dir) {
        return Provision::Failed(err);
    }
    match fs::copy(src, dst_dir.join(file_name)) {
        Ok(_) => Provision::Created,
        Err(err) => Provision::Failed(err),
    }
}
