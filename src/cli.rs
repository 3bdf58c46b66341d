use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::normalize::DEFAULT_YEAR_PIVOT;

#[derive(Parser, Debug)]
#[command(
    name = "predpisy",
    version,
    about = "Czech regulation citation scanning and lookup-key tooling"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Inventory(InventoryArgs),
    Scan(ScanArgs),
    Resolve(ResolveArgs),
    Status(StatusArgs),
}

#[derive(Args, Debug, Clone)]
pub struct InventoryArgs {
    #[arg(long, default_value = "docs")]
    pub docs_root: PathBuf,

    #[arg(long)]
    pub manifest_path: Option<PathBuf>,

    #[arg(long, default_value_t = false)]
    pub dry_run: bool,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum ScanMode {
    Full,
    NumberOnly,
}

impl ScanMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::NumberOnly => "number-only",
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct ScanArgs {
    /// Input files; stdin when none are given
    #[arg(long = "input")]
    pub inputs: Vec<PathBuf>,

    #[arg(long, value_enum, default_value_t = ScanMode::Full)]
    pub mode: ScanMode,

    #[arg(long, default_value_t = DEFAULT_YEAR_PIVOT)]
    pub year_pivot: u8,

    #[arg(long, default_value_t = false)]
    pub json: bool,

    #[arg(long)]
    pub report_dir: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct ResolveArgs {
    #[arg(long)]
    pub citation: String,

    #[arg(long, default_value_t = DEFAULT_YEAR_PIVOT)]
    pub year_pivot: u8,

    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct StatusArgs {
    #[arg(long, default_value = "docs")]
    pub docs_root: PathBuf,
}
