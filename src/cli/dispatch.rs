use super::config::cmd_config;
use super::env::CliArgs;
use super::live::cmd_live;
use super::replay::cmd_replay;
use super::schema::cmd_schema;
use crate::cli::commands::Commands;
use crate::cli::context::CliContext;
use anyhow::Result;

pub async fn dispatch(cli: &CliArgs, ctx: &CliContext) -> Result<()> {
    match cli.command.clone() {
        Commands::Schema(args) => cmd_schema(args, ctx, cli.output.clone()).await,
        Commands::Replay(args) => cmd_replay(args, ctx, cli.output.clone()).await,
        Commands::Live(args) => cmd_live(args, ctx).await,
        Commands::Config(args) => cmd_config(args, ctx).await,
    }
}
