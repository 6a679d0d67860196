//! The functional core: phase lists for the three patch passes that turn the
//! Makefile skeleton into a project-specific Makefile.

pub mod anchor;
pub mod paths;

use crate::model::{BuildPreferences, LinkScriptVariant, ProjectConfig};
use anchor::Phase;

/// Library paths written into the Makefile when the project uses the CMSIS
/// DSP library (signalled by the `ARM_MATH_CM4` define). They reference the
/// resource directory as checked out inside the project tree.
pub const DSP_SOURCE_GLOB: &str = "$(wildcard keil2make/Library/DSP/Source/*/*.c)";
pub const DSP_INCLUDE: &str = "-Ikeil2make/Library/DSP/Include";

/// Make's line-continuation suffix carried by every inserted list line.
pub fn continuation(line: String) -> String {
    format!("{line} \\")
}

/// Parameter pass, run in every mode: the three `<KEY> = <value>` lines that
/// the preference file controls.
pub fn parameter_phases(prefs: &BuildPreferences) -> Vec<Phase> {
    vec![
        Phase::replace("DEBUG", format!("DEBUG = {}", prefs.debug_build)),
        Phase::replace("OPT", format!("OPT = {}", prefs.optimization)),
        Phase::replace("BUILD_DIR", format!("BUILD_DIR = {}", prefs.build_dir)),
    ]
}

/// Filter the scraped defines down to the ones the Makefile should carry.
///
/// `__CC_ARM` identifies the Keil compiler itself and is dropped;
/// `ARM_MATH_CM4` stays and additionally enables the DSP library.
pub fn emitted_defines(defines: &[String]) -> (Vec<String>, bool) {
    let mut use_dsp = false;
    let mut kept = Vec::with_capacity(defines.len());
    for define in defines {
        if define.contains("ARM_MATH_CM4") {
            use_dsp = true;
        }
        if define.contains("__CC_ARM") {
            continue;
        }
        kept.push(define.clone());
    }
    (kept, use_dsp)
}

/// Dedicated single-anchor sub-pass: one `-D` line per emitted define, below
/// the `C_DEFS` anchor.
pub fn define_phases(emitted: &[String]) -> Vec<Phase> {
    let block = emitted
        .iter()
        .map(|d| continuation(format!("-D{d}")))
        .collect();
    vec![Phase::insert_below("C_DEFS", block)]
}

/// `--cpp` anywhere in Keil's misc controls compiles the whole project as C++.
pub fn cpp_mode(misc_controls: &[String]) -> bool {
    misc_controls.iter().any(|m| m.contains("cpp"))
}

/// Content pass, run only when the Makefile is freshly instantiated from the
/// skeleton. `asm_lines` is precomputed by the caller because the startup
/// item triggers file provisioning; it is empty when `modify_asm` is off.
pub fn content_phases(
    config: &ProjectConfig,
    asm_lines: Vec<String>,
    use_dsp: bool,
    cpp: bool,
    link_script: LinkScriptVariant,
) -> Vec<Phase> {
    let cpp_block: Vec<String> = paths::cpp_sources(&config.source_paths)
        .into_iter()
        .map(continuation)
        .collect();

    let mut c_block: Vec<String> = paths::c_sources(&config.source_paths)
        .into_iter()
        .map(continuation)
        .collect();
    if use_dsp {
        c_block.push(continuation(DSP_SOURCE_GLOB.to_string()));
    }

    let mut include_block: Vec<String> = config
        .include_paths
        .iter()
        .map(|p| continuation(format!("-I{p}")))
        .collect();
    if use_dsp {
        include_block.push(continuation(DSP_INCLUDE.to_string()));
    }

    // the compiler line appears once in the GCC_PATH branch and once in the
    // fallback branch; both get the same treatment
    let cc = || {
        if cpp {
            Phase::rewrite("CC = ", "gcc", "g++")
        } else {
            Phase::keep("CC = ")
        }
    };

    let ldscript = match link_script.file_name(&config.device) {
        Some(name) => Phase::replace("LDSCRIPT", format!("LDSCRIPT = {name}")),
        None => Phase::keep("LDSCRIPT"),
    };

    vec![
        Phase::replace("TARGET", format!("TARGET = {}", config.target_name)),
        Phase::insert_below("CPP_SOURCES", cpp_block),
        Phase::insert_below("C_SOURCES", c_block),
        Phase::insert_below("ASM_SOURCES", asm_lines),
        cc(),
        cc(),
        Phase::insert_below("C_INCLUDES", include_block),
        ldscript,
    ]
}
