use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use tokio::fs;

use crate::cli::context::CliContext;
use crate::cli::output::{render, OutputFormat};
use crate::scenario::{replay, ReplayReport, Scenario};

#[derive(Args, Clone, Debug)]
pub struct ReplayArgs {
    /// Scenario file (YAML)
    #[arg(value_name = "SCENARIO")]
    pub scenario: PathBuf,
}

pub async fn cmd_replay(args: ReplayArgs, ctx: &CliContext, output: OutputFormat) -> Result<()> {
    let raw = fs::read_to_string(&args.scenario)
        .await
        .with_context(|| format!("reading {}", args.scenario.display()))?;
    let scenario = Scenario::from_yaml(&raw)
        .with_context(|| format!("loading {}", args.scenario.display()))?;

    let config = ctx.config();
    let report = replay(&scenario, &config.session, config.assistant.clone()).await?;

    match output {
        OutputFormat::Human => print_human(&report),
        format => println!("{}", render(&report, &format)?),
    }
    Ok(())
}

fn print_human(report: &ReplayReport) {
    for utterance in &report.utterances {
        println!("say       {utterance}");
    }
    for path in &report.navigations {
        println!("navigate  {path}");
    }
    for label in &report.clicks {
        println!("click     {label}");
    }
    for value in &report.values {
        println!("fill      {value}");
    }
    println!("route     {}", report.final_route);
    println!(
        "flow      pending={} rewards_asked={} post_login_shown={}",
        report.flow.pending.as_str(),
        report.flow.rewards_asked,
        report.flow.post_login_shown
    );
}
