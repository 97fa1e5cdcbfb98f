//! Closed storefront vocabulary.
//!
//! These sets double as the enum lists declared to the model and as the
//! allow-lists the locator matches rendered labels against, so a value the
//! model may name is exactly a value the UI can be asked for.

/// Declare a closed set of wire strings as a `Copy` enum with `ALL`,
/// `as_str`, exact `parse` and serde support.
#[macro_export]
macro_rules! closed_set {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $wire:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(
            Clone, Copy, Debug, Eq, PartialEq, Hash, ::serde::Serialize, ::serde::Deserialize,
        )]
        pub enum $name {
            $(
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $wire,)+
                }
            }

            pub fn parse(raw: &str) -> Option<Self> {
                match raw {
                    $($wire => Some($name::$variant),)+
                    _ => None,
                }
            }

            /// Wire values in declaration order.
            pub fn wire_values() -> Vec<&'static str> {
                Self::ALL.iter().map(|value| value.as_str()).collect()
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

closed_set! {
    /// Navigable storefront routes.
    Route {
        Home => "/",
        All => "/all",
        WomenCasualJeans => "/women-casual-jeans",
        BabyBootJean => "/baby-boot-jean",
        GapLogoTote => "/gap-logo-tote",
        Cart => "/cart",
        OrderPaymentConfirmation => "/order-payment-confirmation",
        Profile => "/profile",
        Personalized => "/personalized",
    }
}

impl Route {
    pub fn path(self) -> &'static str {
        self.as_str()
    }
}

closed_set! {
    /// Products with a dedicated page.
    ProductId {
        GapLogoTote => "gap-logo-tote",
        BabyBootJean => "baby-boot-jean",
    }
}

impl ProductId {
    /// Single-size products skip the size precondition on add-to-cart.
    pub fn is_single_size(self) -> bool {
        matches!(self, ProductId::GapLogoTote)
    }

    pub fn route(self) -> Route {
        match self {
            ProductId::GapLogoTote => Route::GapLogoTote,
            ProductId::BabyBootJean => Route::BabyBootJean,
        }
    }
}

closed_set! {
    Fit {
        Regular => "Regular",
        Tall => "Tall",
        Petite => "Petite",
    }
}

closed_set! {
    Size {
        Xxs => "XXS",
        Xs => "XS",
        S => "S",
        M => "M",
        L => "L",
        Xl => "XL",
        Xxl => "XXL",
    }
}

closed_set! {
    Inseam {
        Short => "Short",
        Regular => "Regular",
        Long => "Long",
    }
}

closed_set! {
    /// Shipping address form fields.
    ShippingField {
        FullName => "fullName",
        Street => "street",
        Apt => "apt",
        City => "city",
        ZipCode => "zipCode",
    }
}

impl ShippingField {
    /// Placeholder text the rendered input carries.
    pub fn placeholder(self) -> &'static str {
        match self {
            ShippingField::FullName => "Full Name",
            ShippingField::Street => "Street Address",
            ShippingField::Apt => "Apt #",
            ShippingField::City => "Town/City",
            ShippingField::ZipCode => "Zip Code",
        }
    }
}

closed_set! {
    ShippingMethod {
        NoRush => "No-Rush Shipping",
        Basic => "Basic Shipping",
        Standard => "Standard Shipping",
        Express => "Express Shipping",
        Priority => "Priority Shipping",
    }
}

closed_set! {
    PersonalizedCategory {
        Belts => "belts",
        Sweaters => "sweaters",
        All => "all",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_exact() {
        assert_eq!(Size::parse("M"), Some(Size::M));
        assert_eq!(Size::parse("m"), None);
        assert_eq!(Size::parse(" M"), None);
        assert_eq!(Route::parse("/cart"), Some(Route::Cart));
        assert_eq!(Route::parse("/checkout"), None);
    }

    #[test]
    fn serde_uses_wire_values() {
        let json = serde_json::to_string(&ShippingMethod::NoRush).unwrap();
        assert_eq!(json, "\"No-Rush Shipping\"");
        let field: ShippingField = serde_json::from_str("\"zipCode\"").unwrap();
        assert_eq!(field, ShippingField::ZipCode);
    }

    #[test]
    fn only_the_tote_is_single_size() {
        assert!(ProductId::GapLogoTote.is_single_size());
        assert!(!ProductId::BabyBootJean.is_single_size());
    }
}
