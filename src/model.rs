//! Shared data types for the conversion pipeline.

/// Written on the first line of every generated Makefile; its presence is how
/// a later run recognises its own output and switches to update mode.
pub const MAKEFILE_MARKER: &str = "keil2make";

/// Project settings scraped from the `.uvprojx` description.
///
/// Every path-valued field is slash-delimited and relative to the project
/// root by the time it reaches the anchor engine.
#[derive(Debug, Clone)]
pub struct ProjectConfig {
    pub device: String,
    pub defines: Vec<String>,
    pub misc_controls: Vec<String>,
    pub include_paths: Vec<String>,
    pub source_paths: Vec<String>,
    pub target_name: String,
}

/// User options from the preference file, taken as a read-only snapshot once
/// per run.
#[derive(Debug, Clone)]
pub struct BuildPreferences {
    pub optimization: String,
    /// The *requested* mode; the effective mode is resolved against the
    /// on-disk Makefile by `writer::makefile::resolve_mode`.
    pub generate_mode: GenerateMode,
    pub debug_build: String,
    pub auto_add_file: String,
    pub build_dir: String,
    pub modify_asm: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerateMode {
    Create,
    Update,
    ForceRegenerate,
}

impl GenerateMode {
    pub fn as_str(self) -> &'static str {
        match self {
            GenerateMode::Create => "create",
            GenerateMode::Update => "update",
            GenerateMode::ForceRegenerate => "force_regenerate",
        }
    }
}

/// Which linker-script naming convention was provisioned for the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkScriptVariant {
    /// `<device>_FLASH.ld`
    Type1,
    /// `<device stem>Tx_FLASH.ld`
    Type2,
    /// Nothing found; the skeleton's `LDSCRIPT` line is left as-is.
    None,
}

impl LinkScriptVariant {
    /// Literal file name the `LDSCRIPT` phase writes, if any.
    pub fn file_name(self, device: &str) -> Option<String> {
        match self {
            LinkScriptVariant::Type1 => Some(format!("{device}_FLASH.ld")),
            LinkScriptVariant::Type2 => Some(format!("{}Tx_FLASH.ld", device_stem(device))),
            LinkScriptVariant::None => None,
        }
    }
}

/// First nine characters of the device name, the stem ST keys its startup and
/// alternate linker-script resources on (`STM32F407VGTx` -> `STM32F407`).
pub fn device_stem(device: &str) -> &str {
    &device[..device.len().min(9)]
}
