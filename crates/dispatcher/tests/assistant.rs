mod common;

use std::time::Duration;

use serde_json::json;

use voicecart_dispatcher::replies;
use voicecart_event_bus::{AppEvent, EventBus};
use voicecart_flow_state::{PendingFlow, Script};
use voicecart_live_session::{LiveSession, GREETING};

use common::{batch, call, settle, Harness};

#[tokio::test(start_paused = true)]
async fn greets_once_per_mount_despite_reconnects() {
    let h = Harness::at("/");
    let assistant = h.mount();

    h.session.connect().await.unwrap();
    settle().await;
    h.session.drop_connection();
    settle().await;
    h.session.connect().await.unwrap();
    settle().await;

    assert_eq!(h.sent(), vec![GREETING.to_string()]);
    assistant.unmount().await;
}

#[tokio::test(start_paused = true)]
async fn rewards_prompt_signals_ask_only_once() {
    let h = Harness::at("/baby-boot-jean");
    let assistant = h.mount();
    h.session.connect().await.unwrap();
    settle().await;
    h.session.clear_sent();

    h.bus.publish(AppEvent::RewardsPromptShow).await.unwrap();
    settle().await;
    h.bus.publish(AppEvent::RewardsPromptFade).await.unwrap();
    settle().await;

    assert_eq!(h.sent(), vec![Script::RewardsQuestion.text().to_string()]);
    assistant.unmount().await;
}

#[tokio::test(start_paused = true)]
async fn prompt_signals_are_ignored_while_disconnected() {
    let h = Harness::at("/baby-boot-jean");
    let assistant = h.mount();

    h.bus.publish(AppEvent::RewardsPromptShow).await.unwrap();
    settle().await;

    assert!(h.sent().is_empty());
    assert!(!assistant.dispatcher().flow().state().rewards_asked);
    assistant.unmount().await;
}

#[tokio::test(start_paused = true)]
async fn cart_add_event_pitch_depends_on_authentication() {
    let h = Harness::at("/baby-boot-jean");
    let assistant = h.mount();
    h.session.connect().await.unwrap();
    settle().await;
    h.session.clear_sent();

    h.bus
        .publish(AppEvent::ItemAddedToCart {
            is_authenticated: false,
        })
        .await
        .unwrap();
    settle().await;
    h.bus
        .publish(AppEvent::ItemAddedToCart {
            is_authenticated: true,
        })
        .await
        .unwrap();
    settle().await;

    assert_eq!(
        h.sent(),
        vec![
            Script::ContinueShopping.text().to_string(),
            Script::PersonalizedPitch.text().to_string(),
        ]
    );
    assistant.unmount().await;
}

#[tokio::test(start_paused = true)]
async fn login_wait_ends_when_back_on_a_product_page_and_signed_in() {
    let h = Harness::at("/baby-boot-jean");
    h.page.show_rewards_prompt();
    let assistant = h.mount();
    h.session.connect().await.unwrap();
    settle().await;

    h.session.inject(batch(vec![call(
        "respondToRewardsPrompt",
        json!({ "isRewardsMember": true }),
    )]));
    settle().await;
    let flow = assistant.dispatcher().flow().clone();
    assert_eq!(flow.state().pending, PendingFlow::AwaitingLoginCompletion);

    // Signed in, but still on the sign-in surface.
    h.page.login();
    h.router_to("/profile");
    tokio::time::sleep(Duration::from_millis(2_500)).await;
    assert_eq!(flow.state().pending, PendingFlow::AwaitingLoginCompletion);

    h.router_to("/baby-boot-jean");
    tokio::time::sleep(Duration::from_millis(1_100)).await;
    let state = flow.state();
    assert_eq!(state.pending, PendingFlow::None);
    assert!(state.post_login_shown);

    assistant.unmount().await;
}

#[tokio::test(start_paused = true)]
async fn disconnect_clears_pending_flow() {
    let h = Harness::at("/baby-boot-jean");
    h.page.show_rewards_prompt();
    let assistant = h.mount();
    h.session.connect().await.unwrap();
    settle().await;

    h.session.inject(batch(vec![call(
        "respondToRewardsPrompt",
        json!({ "isRewardsMember": true }),
    )]));
    settle().await;
    h.session.drop_connection();
    settle().await;

    assert_eq!(
        assistant.dispatcher().flow().state().pending,
        PendingFlow::None
    );
    assistant.unmount().await;
}

#[tokio::test(start_paused = true)]
async fn phone_number_presses_send_code_after_the_settle_delay() {
    let h = Harness::at("/cart");
    let assistant = h.mount();
    h.session.connect().await.unwrap();
    settle().await;

    h.session.inject(batch(vec![call(
        "setPhoneNumber",
        json!({ "phoneNumber": "5551234567" }),
    )]));
    settle().await;
    assert_eq!(h.page.value_of("#phone").as_deref(), Some("5551234567"));
    assert!(h.page.clicks().is_empty());

    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(h.page.clicked_labels(), vec!["Send Code".to_string()]);
    assistant.unmount().await;
}

#[tokio::test(start_paused = true)]
async fn disabled_add_to_bag_after_size_is_surfaced() {
    let h = Harness::at("/baby-boot-jean");
    h.page.set_enabled(".add-to-bag", false);
    let assistant = h.mount();
    h.session.connect().await.unwrap();
    settle().await;
    h.session.clear_sent();

    h.session.inject(batch(vec![
        call("selectSize", json!({ "size": "S" })),
        call("addToCart", json!({ "productId": "baby-boot-jean" })),
    ]));
    settle().await;

    assert_eq!(h.page.clicked_labels(), vec!["S".to_string()]);
    assert_eq!(h.sent(), vec![replies::ADD_BLOCKED.to_string()]);
    assistant.unmount().await;
}

#[tokio::test(start_paused = true)]
async fn check_rewards_status_speaks_then_unlocks() {
    let h = Harness::at("/baby-boot-jean");
    let assistant = h.mount();
    h.session.connect().await.unwrap();
    settle().await;
    h.session.clear_sent();

    h.session
        .inject(batch(vec![call("checkRewardsStatus", json!({}))]));
    settle().await;

    assert_eq!(h.sent(), vec![Script::SignInWait.text().to_string()]);
    assert_eq!(h.page.clicked_labels(), vec!["Unlock Rewards".to_string()]);
    assistant.unmount().await;
}

#[tokio::test(start_paused = true)]
async fn unmount_deregisters_the_tool_call_listener() {
    let h = Harness::at("/");
    let assistant = h.mount();
    assert_eq!(h.session.tool_call_subscribers(), 1);
    assert_eq!(h.bus.subscriber_count(), 1);

    assistant.unmount().await;
    assert_eq!(h.session.tool_call_subscribers(), 0);
    assert_eq!(h.bus.subscriber_count(), 0);
}
