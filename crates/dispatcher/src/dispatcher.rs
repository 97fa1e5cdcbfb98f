//! Tool-call routing.

use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use action_locator::{ActivationReport, ActivationResult, Affordance, AffordanceLocator, Marker, UiPort};
use voicecart_action_schema::{declare, Action, Declaration};
use voicecart_core_types::{CallId, ProductId, Route, ShippingField, ToolCall, ToolCallBatch};
use voicecart_flow_state::{FlowEvent, Script};
use voicecart_live_session::{LiveSession, SessionBridge};

use crate::error::DispatchError;
use crate::flow::FlowDriver;
use crate::navigation::{Navigator, RouteObserver};
use crate::replies;
use crate::settings::AssistantSettings;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DispatchOutcome {
    /// Not in the schema, or arguments outside it.
    Dropped,
    Done,
    /// Precondition unmet; a clarification was spoken.
    Clarified,
    /// Affordance missing or disabled; nothing spoken.
    Skipped(ActivationResult),
    /// Follow-up press queued behind the settle delay.
    Scheduled,
}

#[derive(Clone, Debug)]
pub struct DispatchRecord {
    pub call_id: CallId,
    pub name: String,
    pub outcome: DispatchOutcome,
}

pub struct ToolCallDispatcherBuilder {
    declaration: &'static Declaration,
    settings: AssistantSettings,
    session: Option<Arc<dyn LiveSession>>,
    ui: Option<Arc<dyn UiPort>>,
    navigator: Option<Arc<dyn Navigator>>,
}

impl ToolCallDispatcherBuilder {
    pub fn new(settings: AssistantSettings) -> Self {
        Self {
            declaration: declare(),
            settings,
            session: None,
            ui: None,
            navigator: None,
        }
    }

    pub fn with_declaration(mut self, declaration: &'static Declaration) -> Self {
        self.declaration = declaration;
        self
    }

    pub fn with_session(mut self, session: Arc<dyn LiveSession>) -> Self {
        self.session = Some(session);
        self
    }

    pub fn with_ui(mut self, ui: Arc<dyn UiPort>) -> Self {
        self.ui = Some(ui);
        self
    }

    pub fn with_navigator(mut self, navigator: Arc<dyn Navigator>) -> Self {
        self.navigator = Some(navigator);
        self
    }

    pub fn build(self) -> Result<ToolCallDispatcher, DispatchError> {
        let session = self.session.ok_or(DispatchError::MissingPort("session"))?;
        let ui = self.ui.ok_or(DispatchError::MissingPort("ui"))?;
        let navigator = self.navigator.ok_or(DispatchError::MissingPort("navigator"))?;

        let bridge = Arc::new(SessionBridge::new(session));
        let locator = AffordanceLocator::new(ui, self.settings.settle());
        let routes = RouteObserver::new(navigator.as_ref());
        let flow = Arc::new(FlowDriver::new(
            bridge.clone(),
            locator.clone(),
            routes.clone(),
        ));

        Ok(ToolCallDispatcher {
            declaration: self.declaration,
            settings: self.settings,
            bridge,
            locator,
            navigator,
            routes,
            flow,
        })
    }
}

/// Validates tool calls and turns them into UI mutations, navigation and
/// scripted utterances.
pub struct ToolCallDispatcher {
    declaration: &'static Declaration,
    settings: AssistantSettings,
    bridge: Arc<SessionBridge>,
    locator: AffordanceLocator,
    navigator: Arc<dyn Navigator>,
    routes: RouteObserver,
    flow: Arc<FlowDriver>,
}

impl ToolCallDispatcher {
    pub fn builder(settings: AssistantSettings) -> ToolCallDispatcherBuilder {
        ToolCallDispatcherBuilder::new(settings)
    }

    pub fn declaration(&self) -> &'static Declaration {
        self.declaration
    }

    pub fn settings(&self) -> &AssistantSettings {
        &self.settings
    }

    pub fn bridge(&self) -> &Arc<SessionBridge> {
        &self.bridge
    }

    pub fn flow(&self) -> &Arc<FlowDriver> {
        &self.flow
    }

    pub fn routes(&self) -> &RouteObserver {
        &self.routes
    }

    /// Handle one batch in array order. Results surface as session sends;
    /// the records are for logging and replay output.
    pub async fn handle_batch(&self, batch: ToolCallBatch) -> Vec<DispatchRecord> {
        debug!(calls = batch.len(), "tool call batch");
        let mut records = Vec::with_capacity(batch.len());
        for call in batch.calls {
            let outcome = self.handle_call(&call).await;
            records.push(DispatchRecord {
                call_id: call.trace_id(),
                name: call.name,
                outcome,
            });
        }
        records
    }

    #[instrument(skip_all, fields(call_id = %call.trace_id(), action = %call.name))]
    pub async fn handle_call(&self, call: &ToolCall) -> DispatchOutcome {
        let action = match Action::from_call_in(self.declaration, call) {
            Ok(action) => action,
            Err(err) if err.is_unknown_action() => {
                debug!("unknown action; ignoring");
                return DispatchOutcome::Dropped;
            }
            Err(err) => {
                warn!(%err, "tool call outside schema; dropping");
                return DispatchOutcome::Dropped;
            }
        };
        let outcome = self.execute(action).await;
        debug!(?outcome, "tool call handled");
        outcome
    }

    async fn execute(&self, action: Action) -> DispatchOutcome {
        match action {
            Action::Navigate { route } => self.navigate(route),
            Action::AddToCart { product } => self.add_to_cart(product).await,
            Action::SelectFit { fit } => self.press(Affordance::FitOption(fit)).await,
            Action::SelectSize { size } => self.press(Affordance::SizeOption(size)).await,
            Action::SelectInseam { inseam } => self.press(Affordance::InseamOption(inseam)).await,
            Action::SelectShippingMethod { method } => {
                self.press(Affordance::ShippingOption(method)).await
            }
            Action::SetFullName { name } => {
                self.fill(Affordance::ShippingInput(ShippingField::FullName), &name)
                    .await
            }
            Action::SetShippingField { field, value } => {
                self.fill(Affordance::ShippingInput(field), &value).await
            }
            Action::SetPhoneNumber { phone_number } => {
                self.fill_then_press(Affordance::PhoneInput, &phone_number, Affordance::SendCodeButton)
                    .await
            }
            Action::SetVerificationCode { code } => {
                self.fill_then_press(Affordance::CodeInput, &code, Affordance::VerifyButton)
                    .await
            }
            Action::ClickContinue => self.press(Affordance::ContinueButton).await,
            Action::ClickSendCode => self.press_after_settle(Affordance::SendCodeButton),
            Action::ClickVerify => self.press_after_settle(Affordance::VerifyButton),
            Action::SendPaymentLink => self.press(Affordance::SendPaymentLinkButton).await,
            Action::CompletePayment => self.press(Affordance::WalletPayButton).await,
            Action::CheckRewardsStatus => self.check_rewards_status().await,
            Action::ShowPersonalizedItems { category } => {
                // Category filtering belongs to the personalized page.
                debug!(%category, "showing personalized items");
                self.navigator.navigate(Route::Personalized.path());
                DispatchOutcome::Done
            }
            Action::RespondToRewardsPrompt { is_rewards_member } => {
                self.respond_to_rewards_prompt(is_rewards_member).await
            }
        }
    }

    fn navigate(&self, route: Route) -> DispatchOutcome {
        self.bridge.say(replies::navigate_reply(route));
        self.navigator.navigate(route.path());
        DispatchOutcome::Done
    }

    async fn add_to_cart(&self, product: ProductId) -> DispatchOutcome {
        let ctx = self.routes.context();

        if !product.is_single_size() && !self.locator.marker_present(Marker::SizeSelected).await {
            info!(%product, "add to cart before size selection");
            self.bridge.say(replies::SELECT_SIZE_FIRST);
            return DispatchOutcome::Clarified;
        }

        let report = self.locator.press(Affordance::AddToBag, &ctx).await;
        match report.result {
            ActivationResult::Ok => {
                if product.is_single_size() {
                    self.bridge.say(replies::TOTE_ADDED);
                }
                // Other products are confirmed by the itemAddedToCart event.
                DispatchOutcome::Done
            }
            ActivationResult::Disabled => {
                self.bridge.say(replies::ADD_BLOCKED);
                DispatchOutcome::Clarified
            }
            ActivationResult::NotFound => DispatchOutcome::Skipped(ActivationResult::NotFound),
        }
    }

    async fn press(&self, affordance: Affordance) -> DispatchOutcome {
        let report = self.locator.press(affordance, &self.routes.context()).await;
        Self::outcome(&report)
    }

    async fn fill(&self, affordance: Affordance, value: &str) -> DispatchOutcome {
        let report = self
            .locator
            .fill(affordance, value, &self.routes.context())
            .await;
        Self::outcome(&report)
    }

    async fn fill_then_press(
        &self,
        field: Affordance,
        value: &str,
        gated: Affordance,
    ) -> DispatchOutcome {
        match self.fill(field, value).await {
            DispatchOutcome::Done => self.press_after_settle(gated),
            other => other,
        }
    }

    fn press_after_settle(&self, affordance: Affordance) -> DispatchOutcome {
        let handle = self
            .locator
            .press_after_settle(affordance, self.routes.context());
        // Detached: follow-ups may interleave with later batches.
        drop(handle);
        DispatchOutcome::Scheduled
    }

    async fn check_rewards_status(&self) -> DispatchOutcome {
        let ctx = self.routes.context();
        let resolved = match self.locator.resolve(Affordance::RewardsUnlockButton, &ctx).await {
            Ok(resolved) => resolved,
            Err(err) => {
                warn!(%err, "rewards unlock control unavailable");
                return DispatchOutcome::Skipped(ActivationResult::NotFound);
            }
        };
        self.bridge.say(Script::SignInWait.text());
        match self.locator.activate(&resolved, None).await {
            Ok(report) => Self::outcome(&report),
            Err(err) => {
                warn!(%err, "rewards unlock activation failed");
                DispatchOutcome::Skipped(ActivationResult::NotFound)
            }
        }
    }

    async fn respond_to_rewards_prompt(&self, is_rewards_member: bool) -> DispatchOutcome {
        if let Err(err) = self.bridge.ensure_connected().await {
            warn!(%err, "could not connect before answering rewards prompt");
            return DispatchOutcome::Skipped(ActivationResult::NotFound);
        }
        self.flow
            .apply(FlowEvent::RewardsAnswer { is_rewards_member })
            .await;
        DispatchOutcome::Done
    }

    fn outcome(report: &ActivationReport) -> DispatchOutcome {
        match report.result {
            ActivationResult::Ok => DispatchOutcome::Done,
            other => DispatchOutcome::Skipped(other),
        }
    }
}
