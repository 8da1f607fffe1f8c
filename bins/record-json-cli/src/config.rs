use clap::{Args, Parser, Subcommand};

use record_json::ConvertorOptions;

use crate::error::CliError;

#[derive(Parser)]
#[command(name = "record-json", about = "Convert quotes between JSON and typed records")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Rebuild a quote from a JSON object and write it back as JSON
    Convert(ConvertArgs),
    /// List the properties discovered on the quote record
    Inspect(InspectArgs),
}

#[derive(Args, Clone, Debug)]
pub struct ConvertArgs {
    /// JSON file with one object; `-` reads stdin
    #[arg(default_value = "-")]
    pub input: String,

    #[command(flatten)]
    pub options: OptionArgs,

    /// Fail when any property could not be converted
    #[arg(long)]
    pub strict: bool,

    /// Pretty-print the output
    #[arg(long)]
    pub pretty: bool,
}

#[derive(Args, Clone, Debug)]
pub struct InspectArgs {
    #[command(flatten)]
    pub options: OptionArgs,
}

#[derive(Args, Clone, Debug)]
pub struct OptionArgs {
    /// TOML file with convertor options (`excluded`, `from_json`)
    #[arg(long, env = "RECORD_JSON_OPTIONS")]
    pub options: Option<String>,

    /// Property to exclude; may be repeated
    #[arg(long = "exclude", value_name = "PROPERTY")]
    pub exclude: Vec<String>,
}

impl OptionArgs {
    /// Options file (if any) with command-line exclusions added on top.
    pub fn load(&self) -> Result<ConvertorOptions, CliError> {
        let options = match &self.options {
            Some(path) => {
                let content = std::fs::read_to_string(path).map_err(|e| CliError::Options {
                    context: "read",
                    detail: format!("'{path}': {e}"),
                })?;
                toml::from_str::<ConvertorOptions>(&content).map_err(|e| CliError::Options {
                    context: "parse",
                    detail: format!("'{path}': {e}"),
                })?
            }
            None => ConvertorOptions::default(),
        };
        Ok(options.exclude(self.exclude.iter().cloned()))
    }
}
