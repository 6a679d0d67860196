pub mod cli;
pub mod error;
pub mod model;
pub mod parser;
pub mod processor;
pub mod writer;

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;

use error::Error;
use model::GenerateMode;
use processor::{anchor, paths};

pub fn run() -> anyhow::Result<()> {
    let args = cli::Cli::parse();
    let config = args
        .config
        .clone()
        .unwrap_or_else(|| args.resources.join("Config").join("Config.yml"));
    generate(&args.root, &args.resources, &config)
}

/// The whole conversion workflow: detect the project, resolve the effective
/// mode, patch the Makefile and provision linker script / startup file.
pub fn generate(root: &Path, resources: &Path, config: &Path) -> anyhow::Result<()> {
    // 1. ── Detect ─────────────────────────────────────────────────────
    let (project_file_name, project_file) = find_project(root)?;
    println!("find Keil project {project_file_name}");

    let prefs = parser::load_preferences(config).with_context(|| "Reading preference file")?;

    let makefile = root.join("Makefile");
    let mode = writer::makefile::resolve_mode(&makefile, prefs.generate_mode);
    println!("generate mode: {}", mode.as_str());

    if mode != GenerateMode::Update {
        writer::makefile::instantiate_skeleton(resources, &makefile)?;
        println!("create Makefile successfully");
    }

    // 2. ── Parameter pass (all modes) ─────────────────────────────────
    let lines = writer::makefile::read_lines(&makefile)?;
    let (lines, report) = anchor::apply(&lines, &processor::parameter_phases(&prefs));
    if !report.is_complete() {
        println!("Makefile modified unexpectedly, try force_regenerate");
    }
    writer::makefile::write_lines(&makefile, &lines).with_context(|| "Writing Makefile")?;

    if mode == GenerateMode::Update {
        println!("successfully updated parameters");
        return Ok(());
    }

    // 3. ── Extract and normalize the project config ───────────────────
    let root_abs = root
        .canonicalize()
        .with_context(|| format!("Resolving {}", root.display()))?;
    let root_str = paths::unify_separators(&root_abs.display().to_string());
    let project_str = paths::unify_separators(&project_file.display().to_string());
    let parent_str = paths::strip_trailing_segments(&project_str, '/', 2);

    let project = parser::load_project_config(&project_file, &parent_str, &root_str)?;

    // 4. ── Content passes and resource provisioning ───────────────────
    let link_script = writer::resources::provision_link_script(
        &project.device,
        root,
        resources,
        mode == GenerateMode::ForceRegenerate,
    );

    let (defines, use_dsp) = processor::emitted_defines(&project.defines);
    let (lines, _) = anchor::apply(&lines, &processor::define_phases(&defines));

    let asm_lines = if prefs.modify_asm {
        writer::resources::asm_source_lines(&project.source_paths, &project.device, root, resources)
    } else {
        Vec::new()
    };

    let phases = processor::content_phases(
        &project,
        asm_lines,
        use_dsp,
        processor::cpp_mode(&project.misc_controls),
        link_script,
    );
    let (lines, report) = anchor::apply(&lines, &phases);
    if !report.is_complete() {
        println!("Makefile modified unexpectedly, try force_regenerate");
    }
    writer::makefile::write_lines(&makefile, &lines).with_context(|| "Writing Makefile")?;

    Ok(())
}

/// Recursive search for the first `.uvprojx` file under `root`.
fn find_project(root: &Path) -> Result<(String, PathBuf), Error> {
    let pattern = format!("{}/**/*.uvprojx", root.display());
    let hit = glob::glob(&pattern)
        .ok()
        .and_then(|entries| entries.flatten().next());

    let Some(path) = hit else {
        return Err(Error::ProjectNotFound(root.to_path_buf()));
    };
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let path = path.canonicalize().map_err(|source| Error::ConfigRead {
        path: path.clone(),
        source,
    })?;
    Ok((name, path))
}
