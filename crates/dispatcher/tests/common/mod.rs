#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;

use action_locator::InMemoryPage;
use voicecart_action_schema::declare;
use voicecart_core_types::{ToolCall, ToolCallBatch};
use voicecart_dispatcher::{
    AssistantSettings, MemoryRouter, NavAssistant, Navigator, ToolCallDispatcher,
};
use voicecart_event_bus::{AppEvent, InMemoryBus};
use voicecart_live_session::{GenerationOptions, LiveSession, LoopbackSession, DEFAULT_MODEL};

pub struct Harness {
    pub page: Arc<InMemoryPage>,
    pub session: Arc<LoopbackSession>,
    pub router: Arc<MemoryRouter>,
    pub bus: Arc<InMemoryBus<AppEvent>>,
}

impl Harness {
    pub fn at(path: &str) -> Self {
        Self {
            page: InMemoryPage::storefront(),
            session: LoopbackSession::new(),
            router: MemoryRouter::new(path),
            bus: InMemoryBus::new(16),
        }
    }

    pub fn dispatcher(&self) -> ToolCallDispatcher {
        let dispatcher = ToolCallDispatcher::builder(AssistantSettings::default())
            .with_session(self.session.clone())
            .with_ui(self.page.clone())
            .with_navigator(self.router.clone())
            .build()
            .unwrap();
        dispatcher
            .bridge()
            .configure(DEFAULT_MODEL, declare(), GenerationOptions::default());
        dispatcher
    }

    pub async fn connected_dispatcher(&self) -> ToolCallDispatcher {
        let dispatcher = self.dispatcher();
        self.session.connect().await.unwrap();
        dispatcher
    }

    pub fn mount(&self) -> NavAssistant {
        NavAssistant::mount(
            self.dispatcher(),
            self.bus.clone(),
            DEFAULT_MODEL,
            GenerationOptions::default(),
        )
    }

    pub fn router_to(&self, path: &str) {
        self.router.navigate(path);
    }

    pub fn sent(&self) -> Vec<String> {
        self.session.sent_texts()
    }
}

pub fn call(name: &str, args: Value) -> ToolCall {
    ToolCall::new(name, args)
}

pub fn batch(calls: Vec<ToolCall>) -> ToolCallBatch {
    ToolCallBatch::new(calls)
}

/// Let spawned listeners run; time is paused in these tests.
pub async fn settle() {
    tokio::time::sleep(Duration::from_millis(10)).await;
}
