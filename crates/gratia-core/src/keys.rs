//! Persistence key namespace shared by both paired contexts.

/// Prefix of every shared-document key; the pairing code follows it.
pub const SYNC_KEY_PREFIX: &str = "gratia_sync_";

/// Key holding the serialized [`crate::session::LocalSession`].
pub const SESSION_KEY: &str = "gratia_user_session";

/// Key holding the onboarding completion flag (`"true"` when done).
pub const ONBOARDING_DONE_KEY: &str = "gratia_onboarding_done";

/// Returns the key a shared document is stored under.
///
/// An empty pairing code has no key: unpaired documents are never persisted.
pub fn sync_key(pairing_code: &str) -> Option<String> {
    if pairing_code.trim().is_empty() {
        None
    } else {
        Some(format!("{SYNC_KEY_PREFIX}{pairing_code}"))
    }
}
