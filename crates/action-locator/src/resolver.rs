//! Affordance resolution and activation

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use voicecart_core_types::RouteContext;

use crate::affordance::{Affordance, AffordanceKind, Marker};
use crate::errors::LocatorError;
use crate::ports::{ElementSnapshot, UiPort};
use crate::types::{ActivationReport, ActivationResult, ResolvedAffordance};

/// Stateless locator over a [`UiPort`].
#[derive(Clone)]
pub struct AffordanceLocator {
    ui: Arc<dyn UiPort>,
    settle: Duration,
}

impl AffordanceLocator {
    pub fn new(ui: Arc<dyn UiPort>, settle: Duration) -> Self {
        Self { ui, settle }
    }

    pub fn settle(&self) -> Duration {
        self.settle
    }

    /// Bind `affordance` to a live element.
    ///
    /// Choices match their allow-listed label exactly; when several elements
    /// match, the first enabled one wins so a stale disabled duplicate never
    /// shadows a usable control.
    pub async fn resolve(
        &self,
        affordance: Affordance,
        context: &RouteContext,
    ) -> Result<ResolvedAffordance, LocatorError> {
        let selector = affordance.selector();
        let elements = self.ui.query_all(&selector).await?;
        let candidates: Vec<ElementSnapshot> = match affordance.label() {
            Some(label) => elements
                .into_iter()
                .filter(|el| label.matches(&el.label))
                .collect(),
            None => elements,
        };

        let match_count = candidates.len();
        if match_count > 1 && affordance.kind() != AffordanceKind::Choice {
            warn!(%affordance, match_count, "ambiguous affordance; using first match");
        }

        let element = candidates
            .iter()
            .find(|el| el.enabled)
            .or_else(|| candidates.first())
            .cloned()
            .ok_or_else(|| LocatorError::ElementNotFound(affordance.to_string()))?;

        debug!(
            %affordance,
            node = %element.node.0,
            enabled = element.enabled,
            product = context.current_product_str(),
            "affordance resolved"
        );

        Ok(ResolvedAffordance {
            affordance,
            element,
            match_count,
            context: context.clone(),
        })
    }

    /// Activate a resolved affordance: click for buttons and choices, set the
    /// value and raise a change notification for text fields.
    pub async fn activate(
        &self,
        resolved: &ResolvedAffordance,
        value: Option<&str>,
    ) -> Result<ActivationReport, LocatorError> {
        let affordance = resolved.affordance;
        let started = Instant::now();

        // Re-read: the page may have re-rendered since resolution.
        let before = match self.ui.snapshot(&resolved.element.node).await? {
            Some(snapshot) => snapshot,
            None => {
                debug!(%affordance, "element detached before activation");
                return Ok(ActivationReport::not_found(affordance));
            }
        };

        if !before.enabled {
            info!(%affordance, "affordance disabled; not activating");
            return Ok(ActivationReport {
                affordance,
                result: ActivationResult::Disabled,
                before: Some(before),
                after: None,
                latency_ms: started.elapsed().as_millis(),
            });
        }

        match affordance.kind() {
            AffordanceKind::TextField => {
                let value = value.ok_or_else(|| LocatorError::MissingValue(affordance.to_string()))?;
                self.ui.set_value(&before.node, value).await?;
                self.ui.dispatch_change(&before.node).await?;
            }
            AffordanceKind::Button | AffordanceKind::Choice => {
                self.ui.click(&before.node).await?;
            }
        }

        let after = self.ui.snapshot(&before.node).await?;
        let latency_ms = started.elapsed().as_millis();
        info!(%affordance, latency_ms, "affordance activated");
        Ok(ActivationReport {
            affordance,
            result: ActivationResult::Ok,
            before: Some(before),
            after,
            latency_ms,
        })
    }

    /// Resolve and click; a missing element or a failing port reads as
    /// `NotFound`.
    pub async fn press(&self, affordance: Affordance, context: &RouteContext) -> ActivationReport {
        self.resolve_and_activate(affordance, None, context).await
    }

    /// Resolve and set a text value.
    pub async fn fill(
        &self,
        affordance: Affordance,
        value: &str,
        context: &RouteContext,
    ) -> ActivationReport {
        self.resolve_and_activate(affordance, Some(value), context)
            .await
    }

    /// Press `affordance` once the settle delay has passed, letting the UI
    /// absorb a preceding value change before the control is queried.
    pub fn press_after_settle(
        &self,
        affordance: Affordance,
        context: RouteContext,
    ) -> JoinHandle<ActivationReport> {
        let locator = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(locator.settle).await;
            locator.press(affordance, &context).await
        })
    }

    /// Whether a page marker is currently rendered.
    pub async fn marker_present(&self, marker: Marker) -> bool {
        match self.ui.query_all(marker.selector()).await {
            Ok(elements) => !elements.is_empty(),
            Err(err) => {
                warn!(?marker, %err, "marker query failed");
                false
            }
        }
    }

    async fn resolve_and_activate(
        &self,
        affordance: Affordance,
        value: Option<&str>,
        context: &RouteContext,
    ) -> ActivationReport {
        let outcome = match self.resolve(affordance, context).await {
            Ok(resolved) => self.activate(&resolved, value).await,
            Err(err) => Err(err),
        };
        match outcome {
            Ok(report) => report,
            Err(err) if err.is_not_found() => {
                warn!(%affordance, "affordance not found on current page");
                ActivationReport::not_found(affordance)
            }
            Err(err) => {
                warn!(%affordance, %err, "activation failed");
                ActivationReport::not_found(affordance)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{ElementSpec, InMemoryPage};
    use voicecart_core_types::{Fit, ShippingField, Size};

    fn locator(page: &Arc<InMemoryPage>) -> AffordanceLocator {
        AffordanceLocator::new(page.clone(), Duration::from_millis(100))
    }

    #[tokio::test]
    async fn selects_only_the_exact_enabled_size() {
        let page = InMemoryPage::new();
        for label in ["XS", "S", "M", "XM", "L"] {
            page.insert(ElementSpec::choice(".size-option", label));
        }
        page.insert(ElementSpec::choice(".size-option", "M").disabled());

        let report = locator(&page)
            .press(Affordance::SizeOption(Size::M), &RouteContext::default())
            .await;

        assert!(report.is_ok());
        let clicked = page.clicked_labels();
        assert_eq!(clicked, vec!["M".to_string()]);
        assert!(page.find_by_label(".size-option", "M").unwrap().selected);
    }

    #[tokio::test]
    async fn disabled_control_reports_disabled_without_clicking() {
        let page = InMemoryPage::new();
        page.insert(ElementSpec::button(".add-to-bag", "Add to Bag").disabled());

        let report = locator(&page)
            .press(Affordance::AddToBag, &RouteContext::default())
            .await;

        assert_eq!(report.result, ActivationResult::Disabled);
        assert!(page.clicks().is_empty());
    }

    #[tokio::test]
    async fn missing_control_is_not_found_and_side_effect_free() {
        let page = InMemoryPage::new();
        page.insert(ElementSpec::choice(".fit-option", "Regular"));

        let report = locator(&page)
            .press(Affordance::FitOption(Fit::Petite), &RouteContext::default())
            .await;

        assert_eq!(report.result, ActivationResult::NotFound);
        assert!(page.clicks().is_empty());
    }

    #[tokio::test]
    async fn text_fields_get_value_and_change_notification() {
        let page = InMemoryPage::new();
        page.insert(ElementSpec::input("input[placeholder=\"Town/City\"]"));

        let report = locator(&page)
            .fill(
                Affordance::ShippingInput(ShippingField::City),
                "Oakland",
                &RouteContext::default(),
            )
            .await;

        assert!(report.is_ok());
        assert_eq!(
            report.after.and_then(|after| after.value),
            Some("Oakland".to_string())
        );
        assert_eq!(page.change_notifications(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn settled_press_waits_for_the_delay() {
        let page = InMemoryPage::new();
        page.insert(ElementSpec::button(
            ".phone-input-row button[type=\"submit\"]",
            "Send code",
        ));
        let locator = locator(&page);

        let handle = locator.press_after_settle(Affordance::SendCodeButton, RouteContext::default());
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(page.clicks().is_empty());

        let report = handle.await.unwrap();
        assert!(report.is_ok());
        assert_eq!(page.clicks().len(), 1);
    }

    #[tokio::test]
    async fn markers_reflect_page_state() {
        let page = InMemoryPage::new();
        page.insert(ElementSpec::choice(".size-option", "S"));
        let locator = locator(&page);

        assert!(!locator.marker_present(Marker::SizeSelected).await);
        locator
            .press(Affordance::SizeOption(Size::S), &RouteContext::default())
            .await;
        assert!(locator.marker_present(Marker::SizeSelected).await);
    }
}
