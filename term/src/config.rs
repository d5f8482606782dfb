use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;
use kaboom_core::{CellCount, Coord, GameConfig};
use serde::Deserialize;

#[derive(Parser, Debug)]
#[command(version, about = "Minesweeper in the terminal", long_about = None)]
pub struct Args {
    /// What log level to use
    #[command(flatten)]
    pub verbose: clap_verbosity_flag::Verbosity,

    /// Grid height
    #[arg(short, long)]
    pub rows: Option<Coord>,

    /// Grid width
    #[arg(short, long)]
    pub columns: Option<Coord>,

    /// How many mines to hide
    #[arg(short, long)]
    pub mines: Option<CellCount>,

    /// TOML file with `rows`, `columns` and `mines`, command line flags take precedence
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Force a seed instead of random
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Write logs to this file, nothing is logged without it
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,
}

/// Board settings read from a config file, every key is optional.
#[derive(Deserialize, Debug, Default, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub rows: Option<Coord>,
    pub columns: Option<Coord>,
    pub mines: Option<CellCount>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Could not read config file {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("Invalid config file {}", path.display()))
    }

    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }
}

impl Args {
    /// Merges flags over the config file over the defaults, then validates.
    pub fn game_config(&self) -> Result<GameConfig> {
        let file = match &self.config {
            Some(path) => FileConfig::load(path)?,
            None => FileConfig::default(),
        };
        self.merge(&file)
    }

    fn merge(&self, file: &FileConfig) -> Result<GameConfig> {
        let defaults = GameConfig::default();
        let rows = self.rows.or(file.rows).unwrap_or(defaults.rows());
        let columns = self.columns.or(file.columns).unwrap_or(defaults.columns());
        let mines = self.mines.or(file.mines).unwrap_or(defaults.mines());

        Ok(GameConfig::new((rows, columns), mines)?)
    }

    pub fn seed(&self) -> u64 {
        self.seed.unwrap_or_else(clock_seed)
    }
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default()
}
