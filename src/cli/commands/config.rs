use anyhow::Result;
use clap::{Args, Subcommand};

use super::CommandContext;

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the merged configuration
    Show {
        /// Output format
        #[arg(long, value_enum, default_value = "toml")]
        format: ConfigFormat,
    },
    /// List the resolved search directories in probe order
    Paths,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum ConfigFormat {
    Toml,
    Json,
}

pub async fn execute(args: ConfigArgs, ctx: &CommandContext) -> Result<()> {
    match args.command {
        ConfigCommands::Show { format } => {
            let rendered = match format {
                ConfigFormat::Toml => toml::to_string_pretty(&ctx.settings)?,
                ConfigFormat::Json => serde_json::to_string_pretty(&ctx.settings)?,
            };
            println!("{rendered}");
        }
        ConfigCommands::Paths => {
            let search_paths = ctx.settings.search_paths();
            if search_paths.is_empty() {
                ctx.output.warning("No search directories configured");
            }
            for (index, dir) in search_paths.directories().iter().enumerate() {
                let exists = dir.is_dir();
                ctx.output.status_indicator(
                    &format!("{}.", index + 1),
                    &dir.display().to_string(),
                    exists,
                );
            }
        }
    }
    Ok(())
}
