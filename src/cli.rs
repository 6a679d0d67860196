use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Root of the Keil project tree, searched recursively for a .uvprojx file
    pub root: PathBuf,
    /// Resource directory holding RawMakefile, Config/, LinkScript/ and StartupFile/
    #[arg(long, default_value = "keil2make")]
    pub resources: PathBuf,
    /// Preference file (defaults to <resources>/Config/Config.yml)
    #[arg(long)]
    pub config: Option<PathBuf>,
}