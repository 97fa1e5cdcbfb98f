//! Route context: which product page, if any, the user is looking at.

use serde::{Deserialize, Serialize};

use crate::catalog::ProductId;

/// Snapshot of the current location, recomputed on every navigation.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct RouteContext {
    pub path: String,
    pub current_product: Option<ProductId>,
}

impl RouteContext {
    pub fn from_path(path: impl Into<String>) -> Self {
        let path = path.into();
        let current_product = current_product(&path);
        Self {
            path,
            current_product,
        }
    }

    /// Product identifier as the page reports it; empty off product pages.
    pub fn current_product_str(&self) -> &'static str {
        self.current_product.map(|p| p.as_str()).unwrap_or("")
    }

    pub fn on_product_page(&self) -> bool {
        self.current_product.is_some()
    }
}

/// Pure mapping from a location path to the product shown there.
pub fn current_product(path: &str) -> Option<ProductId> {
    match path {
        "/gap-logo-tote" => Some(ProductId::GapLogoTote),
        "/baby-boot-jean" => Some(ProductId::BabyBootJean),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_product_pages_only() {
        assert_eq!(
            RouteContext::from_path("/baby-boot-jean").current_product,
            Some(ProductId::BabyBootJean)
        );
        assert_eq!(
            RouteContext::from_path("/gap-logo-tote").current_product_str(),
            "gap-logo-tote"
        );
        let cart = RouteContext::from_path("/cart");
        assert_eq!(cart.current_product_str(), "");
        assert!(!cart.on_product_page());
    }

    #[test]
    fn no_prefix_matching() {
        assert_eq!(current_product("/baby-boot-jean/reviews"), None);
        assert_eq!(current_product(""), None);
    }
}
