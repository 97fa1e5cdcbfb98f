use anyhow::Result;
use clap::Args;
use serde_json::Value;

use voicecart_action_schema::declare;
use voicecart_live_session::wire::setup_message;
use voicecart_live_session::SessionConfig;

use crate::cli::context::CliContext;
use crate::cli::output::{render, OutputFormat};

#[derive(Args, Clone, Debug)]
pub struct SchemaArgs {
    /// Format of the printed declaration (defaults to the global output format)
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Print the whole setup message instead of tools and system instruction
    #[arg(long)]
    pub setup: bool,
}

pub async fn cmd_schema(args: SchemaArgs, ctx: &CliContext, output: OutputFormat) -> Result<()> {
    let session = &ctx.config().session;
    let config = SessionConfig::from_declaration(
        session.model.clone(),
        declare(),
        session.generation_options(),
    );
    let message = setup_message(&config);

    let printed = if args.setup {
        message
    } else {
        let setup = &message["setup"];
        let mut declaration = serde_json::Map::new();
        declaration.insert("tools".into(), setup["tools"].clone());
        declaration.insert(
            "systemInstruction".into(),
            setup["systemInstruction"].clone(),
        );
        Value::Object(declaration)
    };

    let format = args.format.unwrap_or(output);
    println!("{}", render(&printed, &format)?);
    Ok(())
}
