//! Reading, instantiating and writing back the Makefile, plus the decision
//! which generate mode actually applies.

use std::fs;
use std::io;
use std::path::Path;

use crate::error::Error;
use crate::model::{GenerateMode, MAKEFILE_MARKER};

pub fn read_lines(path: &Path) -> Result<Vec<String>, Error> {
    let text = fs::read_to_string(path).map_err(|source| Error::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(text.lines().map(str::to_string).collect())
}

pub fn write_lines(path: &Path, lines: &[String]) -> io::Result<()> {
    let mut text = lines.join("\n");
    text.push('\n');
    fs::write(path, text)
}

/// Resolve the effective generate mode from the on-disk Makefile and the
/// user's request.
///
/// A Makefile we generated earlier is updated in place unless regeneration
/// was forced; a foreign Makefile (or a forced run) is deleted first so the
/// skeleton can take its place. Deletion failure is reported and the run
/// continues, the later overwrite may still succeed.
pub fn resolve_mode(makefile: &Path, requested: GenerateMode) -> GenerateMode {
    if !makefile.is_file() {
        return GenerateMode::Create;
    }

    let first_line = fs::read_to_string(makefile)
        .ok()
        .and_then(|text| text.lines().next().map(str::to_string))
        .unwrap_or_default();

    if first_line.contains(MAKEFILE_MARKER) && requested != GenerateMode::ForceRegenerate {
        return GenerateMode::Update;
    }

    if fs::remove_file(makefile).is_err() {
        println!("can't delete the old Makefile, please check permissions");
    }
    if requested == GenerateMode::ForceRegenerate {
        GenerateMode::ForceRegenerate
    } else {
        GenerateMode::Create
    }
}

/// Copy the skeleton resource into place as the project's Makefile.
pub fn instantiate_skeleton(resources: &Path, makefile: &Path) -> Result<(), Error> {
    let skeleton = resources.join("RawMakefile");
    fs::copy(&skeleton, makefile)
        .map(|_| ())
        .map_err(|source| Error::Skeleton {
            path: skeleton,
            source,
        })
}
