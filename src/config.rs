use std::{ffi::OsString, path::PathBuf};

use clap::Parser;

use crate::{
    DreError, DreResult, TaxRegime, DEFAULT_API_BASE, DEFAULT_MODEL, REPORT_FILE_NAME,
};

pub const DEFAULT_ACTIVITY: &str = "Comércio varejista de roupas";

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Arguments {
    /// DRE spreadsheet (.xlsx)
    input: PathBuf,

    /// Worksheet to read; defaults to the first one
    #[arg(short, long)]
    sheet: Option<String>,

    /// Tax regime used for the simulation
    #[arg(short, long, value_enum, default_value_t = TaxRegime::RealProfit)]
    regime: TaxRegime,

    /// Economic activity, used to pick the presumption rates under Lucro Presumido
    #[arg(short, long, default_value = DEFAULT_ACTIVITY)]
    activity: String,

    /// Ask the completion service for an executive summary
    #[arg(long, default_value_t = false)]
    summary: bool,

    /// Completion model
    #[arg(long, default_value = DEFAULT_MODEL)]
    model: String,

    /// Base URL of the OpenAI-compatible API
    #[arg(long, default_value = DEFAULT_API_BASE)]
    api_base: String,

    /// API key for the completion service
    #[arg(long, env = "APP_KEY_GROQ", hide_env_values = true)]
    api_key: Option<String>,

    /// PDF report destination
    #[arg(short, long, default_value = REPORT_FILE_NAME)]
    output: PathBuf,

    /// Also write the tax simulation as CSV
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub input: PathBuf,
    pub sheet: Option<String>,
    pub regime: TaxRegime,
    pub activity: String,
    pub summary: Option<SummaryConfig>,
    pub output: PathBuf,
    pub csv: Option<PathBuf>,
    pub verbose: bool,
}

/// Completion service settings; present only when a summary was requested.
#[derive(Clone)]
pub struct SummaryConfig {
    pub api_base: String,
    pub api_key: String,
    pub model: String,
}

impl std::fmt::Debug for SummaryConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SummaryConfig")
            .field("api_base", &self.api_base)
            .field("api_key", &"***")
            .field("model", &self.model)
            .finish()
    }
}

impl Arguments {
    fn into_config(self) -> DreResult<Config> {
        let summary = if self.summary {
            let api_key = self
                .api_key
                .filter(|k| !k.trim().is_empty())
                .ok_or_else(|| {
                    DreError::Config(
                        "--summary needs an API key (--api-key or APP_KEY_GROQ)".to_string(),
                    )
                })?;
            Some(SummaryConfig {
                api_base: self.api_base,
                api_key,
                model: self.model,
            })
        } else {
            None
        };

        Ok(Config {
            input: self.input,
            sheet: self.sheet,
            regime: self.regime,
            activity: self.activity,
            summary,
            output: self.output,
            csv: self.csv,
            verbose: self.verbose,
        })
    }
}

/// Reads the configuration from the process arguments; exits on `--help` or usage errors.
pub fn get_config() -> DreResult<Config> {
    Arguments::parse().into_config()
}

pub fn config_from_args<I, T>(args: I) -> DreResult<Config>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let args = Arguments::try_parse_from(args).map_err(|e| DreError::Config(e.to_string()))?;
    args.into_config()
}
