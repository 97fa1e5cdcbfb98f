use crate::cli::context::CliContext;
use anyhow::{Context, Result};
use clap::{Args, Subcommand};

#[derive(Args, Clone, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Clone, Debug)]
pub enum ConfigAction {
    /// Show the effective configuration, environment overrides applied
    Show,

    /// Print the configuration file path in use
    Path,

    /// Validate configuration
    Validate,
}

pub async fn cmd_config(args: ConfigArgs, ctx: &CliContext) -> Result<()> {
    let path = ctx.config_path();
    match args.action {
        ConfigAction::Show => {
            let mut config = ctx.config().clone();
            if config.session.api_key.is_some() {
                config.session.api_key = Some("<redacted>".to_string());
            }
            println!("Current configuration ({}):", path.display());
            println!("{}", serde_yaml::to_string(&config)?);
        }
        ConfigAction::Path => {
            println!("{}", path.display());
        }
        ConfigAction::Validate => {
            ctx.config()
                .validate()
                .with_context(|| format!("validating {}", path.display()))?;
            if ctx.config_found() {
                println!("Configuration file {} is valid", path.display());
            } else {
                println!(
                    "No configuration file at {}; defaults are valid",
                    path.display()
                );
            }
        }
    }

    Ok(())
}
