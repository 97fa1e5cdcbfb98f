//! Scripted replays against the in-memory storefront.
//!
//! A scenario mounts the assistant over an [`InMemoryPage`], a
//! [`LoopbackSession`] and a [`MemoryRouter`], then plays its steps in
//! order. Tool calls and app events travel through the same listeners a
//! live mount uses, so each step is followed by a short grace period for
//! them to run.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use action_locator::{InMemoryPage, UiPort};
use voicecart_action_schema::declare;
use voicecart_core_types::{ToolCall, ToolCallBatch};
use voicecart_dispatcher::{
    AssistantSettings, MemoryRouter, NavAssistant, Navigator, ToolCallDispatcher,
};
use voicecart_event_bus::{AppEvent, CustomEvent, EventBus, InMemoryBus};
use voicecart_flow_state::FlowState;
use voicecart_live_session::{LiveSession, LoopbackSession};

use crate::config::SessionSettings;

const STEP_GRACE: Duration = Duration::from_millis(20);

fn default_start() -> String {
    "/".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    /// Route the page starts on.
    #[serde(default = "default_start")]
    pub start: String,
    /// Overrides the configured timing for this replay.
    #[serde(default)]
    pub assistant: Option<AssistantSettings>,
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "do", rename_all = "snake_case")]
pub enum Step {
    Connect,
    Disconnect,
    ToolCalls { calls: Vec<ToolCall> },
    Event { event: CustomEvent },
    /// The shopper navigates by hand.
    Navigate { path: String },
    /// The shopper signs in.
    Login,
    ShowRewardsPrompt,
    /// The shopper clicks a size option themselves.
    SelectSize { size: String },
    SetEnabled { selector: String, enabled: bool },
    Wait { ms: u64 },
}

impl Scenario {
    pub fn from_yaml(raw: &str) -> Result<Self> {
        serde_yaml::from_str(raw).context("parsing scenario")
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ReplayReport {
    pub utterances: Vec<String>,
    pub navigations: Vec<String>,
    pub clicks: Vec<String>,
    pub values: Vec<String>,
    pub final_route: String,
    pub flow: FlowState,
}

pub async fn replay(
    scenario: &Scenario,
    session_settings: &SessionSettings,
    assistant: AssistantSettings,
) -> Result<ReplayReport> {
    let settings = scenario.assistant.clone().unwrap_or(assistant);
    let drain = settings.settle() * 2 + STEP_GRACE;

    let page = InMemoryPage::storefront();
    let session = LoopbackSession::new();
    let router = MemoryRouter::new(scenario.start.clone());
    let bus = InMemoryBus::<AppEvent>::new(32);

    let dispatcher = ToolCallDispatcher::builder(settings)
        .with_declaration(declare())
        .with_session(session.clone())
        .with_ui(page.clone())
        .with_navigator(router.clone())
        .build()?;
    let assistant = NavAssistant::mount(
        dispatcher,
        bus.clone(),
        &session_settings.model,
        session_settings.generation_options(),
    );

    let played = async {
        for (index, step) in scenario.steps.iter().enumerate() {
            debug!(index, ?step, "replay step");
            play(step, &page, &session, &router, bus.as_ref())
                .await
                .with_context(|| format!("step {}", index + 1))?;
            tokio::time::sleep(STEP_GRACE).await;
        }
        // Let follow-up presses queued behind the settle delay land.
        tokio::time::sleep(drain).await;
        Ok::<_, anyhow::Error>(())
    }
    .await;

    let flow = assistant.dispatcher().flow().state();
    assistant.unmount().await;
    played?;

    let report = ReplayReport {
        utterances: session.sent_texts(),
        navigations: router.history(),
        clicks: page.clicked_labels(),
        values: page.values().into_iter().map(|(_, value)| value).collect(),
        final_route: router.current(),
        flow,
    };
    info!(
        steps = scenario.steps.len(),
        utterances = report.utterances.len(),
        clicks = report.clicks.len(),
        "replay finished"
    );
    Ok(report)
}

async fn play(
    step: &Step,
    page: &Arc<InMemoryPage>,
    session: &Arc<LoopbackSession>,
    router: &Arc<MemoryRouter>,
    bus: &InMemoryBus<AppEvent>,
) -> Result<()> {
    match step {
        Step::Connect => session.connect().await?,
        Step::Disconnect => session.disconnect().await,
        Step::ToolCalls { calls } => {
            session.inject(ToolCallBatch::new(calls.clone()));
        }
        Step::Event { event } => {
            let event = AppEvent::try_from(event.clone())?;
            bus.publish(event).await?;
        }
        Step::Navigate { path } => router.navigate(path),
        Step::Login => page.login(),
        Step::ShowRewardsPrompt => page.show_rewards_prompt(),
        Step::SelectSize { size } => {
            let option = page
                .find_by_label(".size-option", size)
                .ok_or_else(|| anyhow!("no size option labelled {size}"))?;
            page.click(&option.node).await?;
        }
        Step::SetEnabled { selector, enabled } => page.set_enabled(selector, *enabled),
        Step::Wait { ms } => tokio::time::sleep(Duration::from_millis(*ms)).await,
    }
    Ok(())
}
