//! CLI argument definitions using Clap v4

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

use serpwidth_core::{CheckerConfig, FontRole};

/// serpwidth - will your title and description fit in the search result?
#[derive(Parser, Debug)]
#[command(name = "serpwidth")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub check: CheckArgs,

    #[command(flatten)]
    pub fonts: FontArgs,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check title and description columns of a spreadsheet
    Batch(BatchArgs),
}

/// Single-string mode
#[derive(Args, Debug, Default)]
pub struct CheckArgs {
    /// Meta title to measure (20px, 580px budget)
    #[arg(long)]
    pub title: Option<String>,

    /// Meta description to measure (14px, 990px budget)
    #[arg(long)]
    pub desc: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl CheckArgs {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.desc.is_none()
    }
}

#[derive(Args, Debug)]
pub struct BatchArgs {
    /// Path to the workbook (.xlsx, .xls, .xlsb, .ods)
    #[arg(long)]
    pub file: PathBuf,

    /// Sheet name
    #[arg(long)]
    pub sheet: String,

    /// Column letter for titles (e.g. E)
    #[arg(long = "title-col", value_name = "COLUMN")]
    pub title_col: Option<String>,

    /// Column letter for descriptions (e.g. H)
    #[arg(long = "desc-col", value_name = "COLUMN")]
    pub desc_col: Option<String>,

    /// First data row
    #[arg(long = "start-row", default_value_t = 2, value_parser = clap::value_parser!(u32).range(1..))]
    pub start_row: u32,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Check rows on all cores
    #[arg(long)]
    pub parallel: bool,
}

/// Font overrides and tuning, accepted before or after the subcommand
#[derive(Args, Debug, Default)]
pub struct FontArgs {
    /// Font for Latin and any script without its own font
    #[arg(long, global = true, value_name = "PATH")]
    pub font: Option<PathBuf>,

    /// Font for Thai text
    #[arg(long = "thai-font", global = true, value_name = "PATH")]
    pub thai_font: Option<PathBuf>,

    /// Font for Chinese and Japanese text
    #[arg(long = "cjk-font", global = true, value_name = "PATH")]
    pub cjk_font: Option<PathBuf>,

    /// Font for Korean text
    #[arg(long = "korean-font", global = true, value_name = "PATH")]
    pub korean_font: Option<PathBuf>,

    /// Multiply description widths by this factor
    #[arg(long = "desc-correction", global = true, value_name = "FACTOR", value_parser = parse_correction)]
    pub desc_correction: Option<f32>,

    /// More logging on stderr (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

/// A correction factor must be a finite number above zero
fn parse_correction(value: &str) -> Result<f32, String> {
    let factor: f32 = value
        .trim()
        .parse()
        .map_err(|_| format!("`{value}` is not a number"))?;
    if !factor.is_finite() || factor <= 0.0 {
        return Err(format!("`{value}` must be a finite number greater than 0"));
    }
    Ok(factor)
}

impl FontArgs {
    /// Layer the flags over `config`; flags win over the environment
    pub fn apply(&self, mut config: CheckerConfig) -> CheckerConfig {
        let flags = [
            (FontRole::Default, &self.font),
            (FontRole::Thai, &self.thai_font),
            (FontRole::Cjk, &self.cjk_font),
            (FontRole::Korean, &self.korean_font),
        ];
        for (role, path) in flags {
            if let Some(path) = path {
                config = config.with_font(role, path.clone());
            }
        }
        if let Some(correction) = self.desc_correction {
            config = config.with_description_correction(correction);
        }
        config
    }

    pub fn log_level(&self) -> log::LevelFilter {
        match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            _ => log::LevelFilter::Debug,
        }
    }
}
