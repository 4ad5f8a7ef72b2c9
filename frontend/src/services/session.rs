use gloo::storage::{LocalStorage, Storage};
use shared::Session;

use crate::services::logging::Logger;

/// Local storage key of the JSON session record
pub const SESSION_KEY: &str = "user";
/// Local storage key of the raw bearer token
pub const TOKEN_KEY: &str = "jwt";

/// Read the connected user written by the login page, if any
pub fn load_session() -> Option<Session> {
    match LocalStorage::get::<Session>(SESSION_KEY) {
        Ok(session) => Some(session),
        Err(e) => {
            Logger::warn_with_component("session", &format!("No usable session in local storage: {}", e));
            None
        }
    }
}

pub fn load_token() -> Option<String> {
    LocalStorage::raw()
        .get_item(TOKEN_KEY)
        .ok()
        .flatten()
        .filter(|token| !token.is_empty())
}
