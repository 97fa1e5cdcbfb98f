use voicecart_flow_state::{Effect, FlowCenter, FlowCtx, FlowEvent, PendingFlow, PromptButton, Script};

fn spoken(effects: &[Effect]) -> Vec<&'static str> {
    effects
        .iter()
        .filter_map(|effect| match effect {
            Effect::Say(script) => Some(script.text()),
            _ => None,
        })
        .collect()
}

#[test]
fn member_signs_in_and_returns_to_the_product_page() {
    let center = FlowCenter::default();
    let ctx = FlowCtx::connected();

    let asked = center.apply(FlowEvent::RewardsPromptSignal, ctx);
    assert_eq!(spoken(&asked), vec!["Are you a rewards member?"]);

    // Fade and show both fire; only the first asks.
    assert!(center.apply(FlowEvent::RewardsPromptSignal, ctx).is_empty());

    let yes = FlowEvent::RewardsAnswer {
        is_rewards_member: true,
    };
    let effects = center.apply(yes, ctx);
    assert!(effects.contains(&Effect::Press(PromptButton::Yes)));
    assert!(center.apply(yes, ctx).is_empty());

    let cart = center.apply(
        FlowEvent::ItemAddedToCart {
            is_authenticated: true,
        },
        ctx,
    );
    assert!(cart.is_empty());

    let done = center.apply(
        FlowEvent::LoginProbe {
            on_product_page: true,
            logged_in: true,
        },
        ctx,
    );
    assert_eq!(done, vec![Effect::StopLoginWatch]);
    assert_eq!(center.state().pending, PendingFlow::None);

    let pitch = center.apply(
        FlowEvent::ItemAddedToCart {
            is_authenticated: true,
        },
        ctx,
    );
    assert_eq!(spoken(&pitch), vec![Script::PersonalizedPitch.text()]);
}

#[test]
fn history_records_every_event_in_order() {
    let center = FlowCenter::default();
    let ctx = FlowCtx::connected();
    center.apply(FlowEvent::RewardsPromptSignal, ctx);
    center.apply(
        FlowEvent::RewardsAnswer {
            is_rewards_member: false,
        },
        ctx,
    );

    let names: Vec<&str> = center.history().iter().map(|r| r.event.name()).collect();
    assert_eq!(names, vec!["rewardsPromptSignal", "rewardsAnswer"]);
    assert_eq!(center.history()[1].after.pending, PendingFlow::None);
}
