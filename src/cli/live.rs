use anyhow::{bail, Context, Result};
use clap::Args;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::error::RecvError;
use tracing::{info, warn};

use action_locator::InMemoryPage;
use voicecart_core_types::TextPart;
use voicecart_dispatcher::{MemoryRouter, NavAssistant, Navigator, ToolCallDispatcher};
use voicecart_event_bus::{AppEvent, InMemoryBus};
use voicecart_live_session::{
    GeminiLiveSession, GenerationOptions, LiveSession, ResponseModality,
};

use crate::cli::context::CliContext;

#[derive(Args, Clone, Debug)]
pub struct LiveArgs {
    /// Route the in-memory storefront starts on
    #[arg(long, default_value = "/")]
    pub start: String,
}

pub async fn cmd_live(args: LiveArgs, ctx: &CliContext) -> Result<()> {
    let config = ctx.config();
    let Some(api_key) = config.session.api_key.clone() else {
        bail!("no API key configured; set VOICECART_API_KEY or GEMINI_API_KEY");
    };

    let page = InMemoryPage::storefront();
    let router = MemoryRouter::new(args.start);
    let bus = InMemoryBus::<AppEvent>::new(32);
    let session = GeminiLiveSession::new(config.session.endpoint.clone(), Some(api_key));

    let dispatcher = ToolCallDispatcher::builder(config.assistant.clone())
        .with_session(session.clone())
        .with_ui(page.clone())
        .with_navigator(router.clone())
        .build()?;
    // Turns come from stdin, so replies come back as text.
    let options = GenerationOptions {
        response_modality: ResponseModality::Text,
        ..config.session.generation_options()
    };
    let assistant = NavAssistant::mount(dispatcher, bus, &config.session.model, options);

    let mut model_text = session.subscribe_text();
    let text_printer = tokio::spawn(async move {
        loop {
            match model_text.recv().await {
                Ok(text) => println!("model     {}", text.trim_end()),
                Err(RecvError::Lagged(skipped)) => warn!(skipped, "model text lagged"),
                Err(RecvError::Closed) => break,
            }
        }
    });
    let mut location = router.location();
    let route_printer = tokio::spawn(async move {
        while location.changed().await.is_ok() {
            let path = location.borrow_and_update().clone();
            println!("navigate  {path}");
        }
    });

    session
        .connect()
        .await
        .context("connecting to the live session")?;
    println!("Connected. Type a message, /state to inspect, /quit to leave.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            line = lines.next_line() => line.context("reading stdin")?,
        };
        let Some(line) = line else { break };
        match line.trim() {
            "" => continue,
            "/quit" => break,
            "/state" => {
                let state = assistant.dispatcher().flow().state();
                println!(
                    "state     session={} pending={} route={} clicks={:?}",
                    session.state(),
                    state.pending.as_str(),
                    router.current(),
                    page.clicked_labels()
                );
            }
            text => session.send(vec![TextPart::new(text)]),
        }
    }

    info!("leaving live session");
    assistant.unmount().await;
    session.disconnect().await;
    text_printer.abort();
    route_printer.abort();
    Ok(())
}
