//! The asymmetric merge applied whenever a stored or observed document is
//! adopted by a context.
//!
//! 1. Take every field from the incoming document.
//! 2. Keep the local `userName` (the session's cached name wins, then the name
//!    already in the local document).
//! 3. Set `partnerName` to the incoming `userName` only when it differs from
//!    the local one; otherwise keep the partner name already known locally.
//!
//! This keeps "my messages" and "their messages" attributable after loading a
//! document that the other party wrote last.

use crate::shared::model::SharedDocument;

/// Merges `incoming` into the state of a context whose current document is
/// `local` and whose session caches `session_name`.
pub fn reconcile(
    local: &SharedDocument,
    session_name: Option<&str>,
    incoming: SharedDocument,
) -> SharedDocument {
    let own_name = session_name
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .or_else(|| Some(local.user_name.clone()).filter(|name| !name.is_empty()))
        .unwrap_or_else(|| incoming.user_name.clone());

    let partner_name = if !incoming.user_name.is_empty() && incoming.user_name != own_name {
        Some(incoming.user_name.clone())
    } else {
        local
            .partner_name
            .clone()
            .or_else(|| incoming.partner_name.clone())
    };

    SharedDocument {
        user_name: own_name,
        partner_name,
        ..incoming
    }
}
