//! Navigation capability and route-context observation.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::watch;
use tracing::info;

use voicecart_core_types::{Route, RouteContext};

/// Single "go to route" capability over the storefront router.
pub trait Navigator: Send + Sync {
    fn navigate(&self, path: &str);

    /// Current location, updated on every navigation.
    fn location(&self) -> watch::Receiver<String>;
}

/// Router that only records where it was sent.
pub struct MemoryRouter {
    location: watch::Sender<String>,
    history: Mutex<Vec<String>>,
}

impl MemoryRouter {
    pub fn new(initial: impl Into<String>) -> Arc<Self> {
        let (location, _) = watch::channel(initial.into());
        Arc::new(Self {
            location,
            history: Mutex::new(Vec::new()),
        })
    }

    pub fn at(route: Route) -> Arc<Self> {
        Self::new(route.path())
    }

    pub fn current(&self) -> String {
        self.location.borrow().clone()
    }

    /// Every path navigated to, in order.
    pub fn history(&self) -> Vec<String> {
        self.history.lock().clone()
    }
}

impl Navigator for MemoryRouter {
    fn navigate(&self, path: &str) {
        info!(path, "navigating");
        self.history.lock().push(path.to_string());
        self.location.send_replace(path.to_string());
    }

    fn location(&self) -> watch::Receiver<String> {
        self.location.subscribe()
    }
}

/// Derives the current [`RouteContext`] from the navigator's location.
#[derive(Clone)]
pub struct RouteObserver {
    location: watch::Receiver<String>,
}

impl RouteObserver {
    pub fn new(navigator: &dyn Navigator) -> Self {
        Self {
            location: navigator.location(),
        }
    }

    pub fn context(&self) -> RouteContext {
        RouteContext::from_path(self.location.borrow().clone())
    }
}
