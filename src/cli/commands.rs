use clap::Subcommand;

use super::config::ConfigArgs;
use super::live::LiveArgs;
use super::replay::ReplayArgs;
use super::schema::SchemaArgs;

#[derive(Subcommand, Clone)]
pub enum Commands {
    /// Print the tool declaration sent to the model
    Schema(SchemaArgs),

    /// Replay a scripted scenario against the in-memory storefront
    Replay(ReplayArgs),

    /// Talk to the live model over text, driving the in-memory storefront
    Live(LiveArgs),

    /// Inspect configuration
    Config(ConfigArgs),
}
