mod common;

use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::{json, Map, Value};
use tokio::sync::watch;

use action_locator::ElementSpec;
use voicecart_action_schema::{declare, ActionSchema, ParamType};
use voicecart_core_types::ProductId;
use voicecart_dispatcher::{
    replies, AssistantSettings, DispatchOutcome, MemoryRouter, Navigator, ToolCallDispatcher,
};
use voicecart_flow_state::{FlowEvent, PendingFlow, Script};
use voicecart_live_session::{GenerationOptions, LoopbackSession, DEFAULT_MODEL};

use common::{batch, call, Harness};

#[tokio::test]
async fn unknown_actions_have_no_effect() {
    let h = Harness::at("/baby-boot-jean");
    let dispatcher = h.connected_dispatcher().await;

    let records = dispatcher
        .handle_batch(batch(vec![
            call("deleteEverything", json!({})),
            call("selectSize", json!({ "size": "XM" })),
            call("navigate", json!({ "route": "/admin" })),
        ]))
        .await;

    assert!(records
        .iter()
        .all(|record| record.outcome == DispatchOutcome::Dropped));
    assert!(h.page.clicks().is_empty());
    assert!(h.sent().is_empty());
    assert!(h.router.history().is_empty());
}

#[tokio::test]
async fn tote_add_ignores_size_selection_state() {
    let h = Harness::at("/gap-logo-tote");
    let dispatcher = h.connected_dispatcher().await;

    dispatcher
        .handle_batch(batch(vec![call(
            "addToCart",
            json!({ "productId": "gap-logo-tote" }),
        )]))
        .await;

    assert_eq!(h.page.clicked_labels(), vec!["Add to Bag".to_string()]);
    assert_eq!(h.sent(), vec![replies::TOTE_ADDED.to_string()]);
}

#[tokio::test]
async fn jean_add_without_size_clarifies_once_and_does_not_click() {
    let h = Harness::at("/baby-boot-jean");
    let dispatcher = h.connected_dispatcher().await;

    let records = dispatcher
        .handle_batch(batch(vec![call(
            "addToCart",
            json!({ "productId": ProductId::BabyBootJean.as_str() }),
        )]))
        .await;

    assert_eq!(records[0].outcome, DispatchOutcome::Clarified);
    assert_eq!(h.sent(), vec![replies::SELECT_SIZE_FIRST.to_string()]);
    assert!(h.page.clicks().is_empty());
}

#[tokio::test]
async fn select_size_clicks_only_the_exact_enabled_label() {
    let h = Harness::at("/baby-boot-jean");
    h.page.insert(ElementSpec::choice(".size-option", "MM"));
    let dispatcher = h.connected_dispatcher().await;

    dispatcher
        .handle_batch(batch(vec![call("selectSize", json!({ "size": "M" }))]))
        .await;

    let clicks = h.page.clicks();
    assert_eq!(clicks.len(), 1);
    assert_eq!(clicks[0].label.trim(), "M");
    assert!(clicks[0].enabled);
}

#[tokio::test]
async fn repeated_affirmative_answer_is_idempotent() {
    let h = Harness::at("/baby-boot-jean");
    h.page.show_rewards_prompt();
    let dispatcher = h.dispatcher();

    let yes = || call("respondToRewardsPrompt", json!({ "isRewardsMember": true }));
    dispatcher.handle_batch(batch(vec![yes(), yes()])).await;

    assert_eq!(h.session.connect_count(), 1);
    assert_eq!(h.sent(), vec![Script::SignInWait.text().to_string()]);
    assert_eq!(h.page.clicked_labels(), vec!["Yes".to_string()]);
    assert_eq!(
        dispatcher.flow().state().pending,
        PendingFlow::AwaitingLoginCompletion
    );
}

#[tokio::test]
async fn cart_add_during_login_wait_is_silent() {
    let h = Harness::at("/baby-boot-jean");
    h.page.show_rewards_prompt();
    let dispatcher = h.connected_dispatcher().await;

    dispatcher
        .handle_batch(batch(vec![call(
            "respondToRewardsPrompt",
            json!({ "isRewardsMember": true }),
        )]))
        .await;
    h.session.clear_sent();

    dispatcher
        .flow()
        .apply(FlowEvent::ItemAddedToCart {
            is_authenticated: true,
        })
        .await;

    assert!(h.sent().is_empty());
}

/// Records how many utterances had been sent when each navigation happened.
struct OrderedRouter {
    inner: Arc<MemoryRouter>,
    session: Arc<LoopbackSession>,
    sends_at_navigation: Mutex<Vec<usize>>,
}

impl Navigator for OrderedRouter {
    fn navigate(&self, path: &str) {
        self.sends_at_navigation
            .lock()
            .push(self.session.sent_texts().len());
        self.inner.navigate(path);
    }

    fn location(&self) -> watch::Receiver<String> {
        self.inner.location()
    }
}

#[tokio::test]
async fn navigation_speaks_before_moving_and_updates_route_context() {
    let session = LoopbackSession::new();
    let router = Arc::new(OrderedRouter {
        inner: MemoryRouter::new("/"),
        session: session.clone(),
        sends_at_navigation: Mutex::new(Vec::new()),
    });
    let dispatcher = ToolCallDispatcher::builder(AssistantSettings::default())
        .with_session(session.clone())
        .with_ui(action_locator::InMemoryPage::storefront())
        .with_navigator(router.clone())
        .build()
        .unwrap();
    dispatcher
        .bridge()
        .configure(DEFAULT_MODEL, declare(), GenerationOptions::default());

    dispatcher
        .handle_batch(batch(vec![call(
            "navigate",
            json!({ "route": "/baby-boot-jean" }),
        )]))
        .await;

    assert_eq!(
        session.sent_texts(),
        vec!["JUST OUTPUT THE USER 'Here you go! are you a rewards member?'".to_string()]
    );
    assert_eq!(*router.sends_at_navigation.lock(), vec![1]);
    assert_eq!(
        dispatcher.routes().context().current_product_str(),
        "baby-boot-jean"
    );
}

/// Smallest argument object the schema accepts for this action.
fn minimal_args(schema: &ActionSchema) -> Value {
    let mut args = Map::new();
    for param in schema.required_params() {
        let value = match (param.ty, param.enum_values.as_deref()) {
            (_, Some([first, ..])) => json!(first),
            (ParamType::Boolean, _) => json!(true),
            (ParamType::String, _) => json!("x"),
        };
        args.insert(param.name.to_string(), value);
    }
    Value::Object(args)
}

#[tokio::test(start_paused = true)]
async fn every_declared_action_is_routed() {
    let h = Harness::at("/baby-boot-jean");
    let dispatcher = h.connected_dispatcher().await;

    let declaration = declare();
    assert_eq!(declaration.schema.len(), 18);
    for schema in &declaration.schema {
        let outcome = dispatcher
            .handle_call(&call(schema.name.as_str(), minimal_args(schema)))
            .await;
        assert_ne!(
            outcome,
            DispatchOutcome::Dropped,
            "{} was dropped",
            schema.name.as_str()
        );
    }
}
