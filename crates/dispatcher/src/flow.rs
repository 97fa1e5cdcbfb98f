//! Applies cross-flow events and performs their effects.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, warn};

use action_locator::{Affordance, AffordanceLocator, Marker};
use voicecart_flow_state::{
    Effect, FlowCenter, FlowCtx, FlowEvent, FlowRecord, FlowState, PromptButton,
};
use voicecart_live_session::SessionBridge;

use crate::navigation::RouteObserver;

pub struct FlowDriver {
    center: FlowCenter,
    bridge: Arc<SessionBridge>,
    locator: AffordanceLocator,
    routes: RouteObserver,
    login_watch: watch::Sender<bool>,
}

impl FlowDriver {
    pub fn new(bridge: Arc<SessionBridge>, locator: AffordanceLocator, routes: RouteObserver) -> Self {
        let (login_watch, _) = watch::channel(false);
        Self {
            center: FlowCenter::default(),
            bridge,
            locator,
            routes,
            login_watch,
        }
    }

    pub fn state(&self) -> FlowState {
        self.center.state()
    }

    pub fn history(&self) -> Vec<FlowRecord> {
        self.center.history()
    }

    /// Whether the login-wait poll should be running.
    pub fn login_watch(&self) -> watch::Receiver<bool> {
        self.login_watch.subscribe()
    }

    pub async fn apply(&self, event: FlowEvent) {
        let ctx = FlowCtx {
            connected: self.bridge.is_connected(),
        };
        for effect in self.center.apply(event, ctx) {
            self.perform(effect).await;
        }
    }

    /// One login-wait poll tick.
    pub async fn probe_login(&self) {
        let on_product_page = self.routes.context().on_product_page();
        let logged_in = self.locator.marker_present(Marker::LoggedIn).await;
        debug!(on_product_page, logged_in, "login probe");
        self.apply(FlowEvent::LoginProbe {
            on_product_page,
            logged_in,
        })
        .await;
    }

    async fn perform(&self, effect: Effect) {
        match effect {
            Effect::Say(script) => self.bridge.say(script.text()),
            Effect::Press(button) => {
                let affordance = match button {
                    PromptButton::Yes => Affordance::RewardsYesButton,
                    PromptButton::No => Affordance::RewardsNoButton,
                };
                let report = self.locator.press(affordance, &self.routes.context()).await;
                if !report.is_ok() {
                    warn!(%affordance, result = report.result.name(), "rewards prompt button not pressed");
                }
            }
            Effect::StartLoginWatch => {
                self.login_watch.send_replace(true);
            }
            Effect::StopLoginWatch => {
                self.login_watch.send_replace(false);
            }
        }
    }
}
