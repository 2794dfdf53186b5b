use super::app_config::LogLevel;
use crate::domain::entities::ClearTarget;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "blasted",
    version,
    about = "Preload images through a tiered cache and clear it",
    long_about = None
)]
pub struct CliArgs {
    /// Configuration file path.
    #[arg(short, long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[arg(long, value_name = "PATH", global = true)]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[arg(long, value_enum, global = true)]
    pub log_level: Option<LogLevel>,

    /// Emit diagnostic resolution events.
    #[arg(long, global = true)]
    pub verbose: Option<bool>,

    /// Directory holding the `blasted-image/` asset tree.
    #[arg(long, value_name = "PATH", global = true)]
    pub assets_dir: Option<PathBuf>,

    /// Disk cache directory.
    #[arg(long, value_name = "PATH", global = true)]
    pub cache_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Preload one or more images.
    Load {
        /// Image URLs.
        #[arg(required = true)]
        urls: Vec<String>,

        /// Request header as `NAME=VALUE`; repeatable.
        #[arg(long = "header", value_name = "NAME=VALUE", value_parser = parse_header)]
        headers: Vec<(String, String)>,

        /// Keep results out of the memory cache.
        #[arg(long)]
        skip_memory_cache: bool,

        /// Try bundled assets before the network.
        #[arg(long)]
        prefer_local_assets: bool,

        /// Remote prefix mapped onto the bundled asset root.
        #[arg(long, value_name = "URL")]
        cloud_prefix: Option<String>,
    },
    /// Clear cached images.
    Clear {
        /// Tiers to clear.
        #[arg(value_enum)]
        target: ClearArg,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ClearArg {
    Memory,
    Disk,
    All,
}

impl From<ClearArg> for ClearTarget {
    fn from(arg: ClearArg) -> Self {
        match arg {
            ClearArg::Memory => Self::Memory,
            ClearArg::Disk => Self::Disk,
            ClearArg::All => Self::All,
        }
    }
}

fn parse_header(raw: &str) -> Result<(String, String), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got `{raw}`"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("empty header name in `{raw}`"));
    }
    Ok((name.to_string(), value.to_string()))
}
