use std::sync::Arc;

use voicecart_action_schema::declare;
use voicecart_live_session::{
    GenerationOptions, LiveSession, LoopbackSession, SessionBridge, SessionState, DEFAULT_MODEL,
    GREETING,
};

#[tokio::test]
async fn greeting_follows_the_first_connected_state_only() {
    let session = LoopbackSession::new();
    let bridge = Arc::new(SessionBridge::new(session.clone()));
    bridge.configure(DEFAULT_MODEL, declare(), GenerationOptions::default());

    let mut states = session.watch_state();
    let watcher = {
        let bridge = bridge.clone();
        tokio::spawn(async move {
            let mut greetings = 0;
            while states.changed().await.is_ok() {
                let state = *states.borrow_and_update();
                if bridge.on_state(state) {
                    greetings += 1;
                }
                if greetings == 1 && state == SessionState::Disconnected {
                    break;
                }
            }
            greetings
        })
    };

    session.connect().await.unwrap();
    tokio::task::yield_now().await;
    session.drop_connection();

    assert_eq!(watcher.await.unwrap(), 1);

    session.connect().await.unwrap();
    bridge.on_state(session.state());
    assert_eq!(session.sent_texts(), vec![GREETING.to_string()]);
}

#[tokio::test]
async fn configuration_precedes_connection() {
    let session = LoopbackSession::new();
    let bridge = SessionBridge::new(session.clone());
    assert!(bridge.ensure_connected().await.is_err());

    let config = bridge.configure(DEFAULT_MODEL, declare(), GenerationOptions::text());
    bridge.ensure_connected().await.unwrap();

    assert_eq!(session.configs(), vec![config]);
    assert!(bridge.is_connected());
}
