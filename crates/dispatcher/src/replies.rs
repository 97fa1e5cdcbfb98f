//! Scripted confirmations and clarifications sent by the dispatcher.

use voicecart_core_types::Route;

pub const TOTE_ADDED: &str = "I've added the Gap Logo Tote to your cart!";
pub const SELECT_SIZE_FIRST: &str = "Please select a size first before I can add this to your cart.";
pub const ADD_BLOCKED: &str =
    "I couldn't add this to your cart. Please make sure you've selected all required options.";
pub const GENERIC_NAVIGATE: &str = "Here you go!";

/// Line sent before navigating to `route`.
pub fn navigate_reply(route: Route) -> &'static str {
    match route {
        Route::WomenCasualJeans => "JUST OUTPUT THE USER 'Here you go!'",
        Route::BabyBootJean => "JUST OUTPUT THE USER 'Here you go! are you a rewards member?'",
        Route::GapLogoTote => " JUST OUTPUT THE USER 'Here you go! Let me show you our Gap Logo Tote.'",
        Route::Cart => "JUST OUTPUT THE USER 'Here's your shopping cart.'",
        Route::Personalized => {
            "JUST OUTPUT THE USER 'Here are some personalized recommendations for you!'"
        }
        _ => GENERIC_NAVIGATE,
    }
}
