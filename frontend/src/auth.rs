//! The opaque slot holding the bearer token between page loads.
//!
//! Only the application root touches this module: it reads the slot once at
//! start-up and writes it on login and logout. Outbound calls receive the token
//! through `RequestContext` instead of reading storage themselves.

use web_sys::Storage;

const TOKEN_KEY: &str = "auth_token";

fn storage() -> Option<Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

pub fn load_token() -> Option<String> {
    storage()?
        .get_item(TOKEN_KEY)
        .ok()
        .flatten()
        .filter(|token| !token.is_empty())
}

pub fn store_token(token: &str) {
    if let Some(storage) = storage() {
        checked(storage.set_item(TOKEN_KEY, token), "persist");
    }
}

pub fn clear_token() {
    if let Some(storage) = storage() {
        checked(storage.remove_item(TOKEN_KEY), "clear");
    }
}

/// Logs a failed storage write. Returns whether the write went through.
fn checked<E>(result: Result<(), E>, action: &str) -> bool {
    if result.is_err() {
        log::warn!("could not {} the auth token", action);
        return false;
    }
    true
}
