//! Session repository trait.

use async_trait::async_trait;

use crate::error::Result;
use crate::session::model::LocalSession;

/// Repository for the per-context session record and onboarding flag.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Loads the stored session, `None` when no role was chosen yet.
    async fn load_session(&self) -> Result<Option<LocalSession>>;

    async fn save_session(&self, session: &LocalSession) -> Result<()>;

    async fn is_onboarding_done(&self) -> Result<bool>;

    async fn set_onboarding_done(&self) -> Result<()>;

    /// Removes the session and the onboarding flag.
    async fn clear(&self) -> Result<()>;
}
