//! Assistant runtime for one mount.
//!
//! Mounting configures the session and spawns four listeners: tool calls,
//! app events, session state (greeting and disconnect) and the login-wait
//! poll. Unmounting cancels them all; nothing outlives the mount except
//! follow-up presses already queued behind the settle delay.

use std::sync::Arc;

use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use voicecart_event_bus::{AppEvent, EventBus};
use voicecart_flow_state::FlowEvent;
use voicecart_live_session::{GenerationOptions, SessionState};

use crate::dispatcher::ToolCallDispatcher;
use crate::flow::FlowDriver;

pub struct NavAssistant {
    dispatcher: Arc<ToolCallDispatcher>,
    cancel: CancellationToken,
    tasks: Vec<JoinHandle<()>>,
}

impl NavAssistant {
    /// Configure the session and start listening.
    pub fn mount(
        dispatcher: ToolCallDispatcher,
        bus: Arc<dyn EventBus<AppEvent>>,
        model: &str,
        options: GenerationOptions,
    ) -> Self {
        let dispatcher = Arc::new(dispatcher);
        dispatcher
            .bridge()
            .configure(model, dispatcher.declaration(), options);

        let cancel = CancellationToken::new();
        let session = dispatcher.bridge().session().clone();

        // Subscribe before spawning so nothing raised after mount is missed.
        let tool_calls = session.subscribe_tool_calls();
        let app_events = bus.subscribe();
        let states = session.watch_state();
        let login_watch = dispatcher.flow().login_watch();

        let tasks = vec![
            tokio::spawn(tool_call_loop(dispatcher.clone(), tool_calls, cancel.clone())),
            tokio::spawn(app_event_loop(dispatcher.flow().clone(), app_events, cancel.clone())),
            tokio::spawn(session_state_loop(dispatcher.clone(), states, cancel.clone())),
            tokio::spawn(login_poll_loop(
                dispatcher.flow().clone(),
                login_watch,
                dispatcher.settings().login_poll(),
                cancel.clone(),
            )),
        ];
        info!(model, "assistant mounted");

        Self {
            dispatcher,
            cancel,
            tasks,
        }
    }

    pub fn dispatcher(&self) -> &Arc<ToolCallDispatcher> {
        &self.dispatcher
    }

    /// Tear down every listener and wait for them to finish.
    pub async fn unmount(self) {
        self.cancel.cancel();
        for task in self.tasks {
            if let Err(err) = task.await {
                warn!(%err, "assistant task ended abnormally");
            }
        }
        info!("assistant unmounted");
    }
}

async fn tool_call_loop(
    dispatcher: Arc<ToolCallDispatcher>,
    mut rx: broadcast::Receiver<voicecart_core_types::ToolCallBatch>,
    cancel: CancellationToken,
) {
    loop {
        let batch = tokio::select! {
            _ = cancel.cancelled() => break,
            received = rx.recv() => received,
        };
        match batch {
            Ok(batch) => {
                dispatcher.handle_batch(batch).await;
            }
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                warn!(skipped, "tool call listener lagged");
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
    debug!("tool call listener stopped");
}

async fn app_event_loop(
    flow: Arc<FlowDriver>,
    mut rx: broadcast::Receiver<AppEvent>,
    cancel: CancellationToken,
) {
    loop {
        let event = tokio::select! {
            _ = cancel.cancelled() => break,
            received = rx.recv() => received,
        };
        let event = match event {
            Ok(event) => event,
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                warn!(skipped, "app event listener lagged");
                continue;
            }
            Err(broadcast::error::RecvError::Closed) => break,
        };
        debug!(event = event.event_type(), "app event");
        let flow_event = match event {
            AppEvent::RewardsPromptFade | AppEvent::RewardsPromptShow => {
                FlowEvent::RewardsPromptSignal
            }
            AppEvent::ItemAddedToCart { is_authenticated } => {
                FlowEvent::ItemAddedToCart { is_authenticated }
            }
        };
        flow.apply(flow_event).await;
    }
    debug!("app event listener stopped");
}

async fn session_state_loop(
    dispatcher: Arc<ToolCallDispatcher>,
    mut states: watch::Receiver<SessionState>,
    cancel: CancellationToken,
) {
    let mut last = *states.borrow_and_update();
    dispatcher.bridge().on_state(last);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            changed = states.changed() => {
                if changed.is_err() {
                    break;
                }
            }
        }
        let state = *states.borrow_and_update();
        if state == last {
            continue;
        }
        debug!(from = %last, to = %state, "session state changed");
        dispatcher.bridge().on_state(state);
        if state == SessionState::Disconnected {
            dispatcher.flow().apply(FlowEvent::SessionDisconnected).await;
        }
        last = state;
    }
    debug!("session state listener stopped");
}

async fn login_poll_loop(
    flow: Arc<FlowDriver>,
    mut active: watch::Receiver<bool>,
    period: std::time::Duration,
    cancel: CancellationToken,
) {
    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            started = active.wait_for(|on| *on) => {
                if started.is_err() {
                    break;
                }
            }
        }
        info!(period_ms = period.as_millis() as u64, "login wait poll started");

        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            tokio::select! {
                _ = cancel.cancelled() => return,
                _ = ticker.tick() => flow.probe_login().await,
            }
            if !*active.borrow() {
                break;
            }
        }
        debug!("login wait poll stopped");
    }
}
