//! LocalSession DTOs and migrations
//!
//! ## Version History
//! - **1.0.0**: id, role, pairing code, language, cached user name

use serde::{Deserialize, Serialize};
use version_migrate::{FromDomain, IntoDomain, Versioned};

use gratia_core::session::LocalSession;

/// Local session DTO V1.0.0
#[derive(Debug, Clone, Serialize, Deserialize, Versioned)]
#[versioned(version = "1.0.0")]
pub struct LocalSessionV1_0_0 {
    #[serde(flatten)]
    pub session: LocalSession,
}

/// Type alias for the latest LocalSession version.
pub type LocalSessionDTO = LocalSessionV1_0_0;

impl IntoDomain<LocalSession> for LocalSessionV1_0_0 {
    fn into_domain(self) -> LocalSession {
        self.session
    }
}

impl FromDomain<LocalSession> for LocalSessionV1_0_0 {
    fn from_domain(session: LocalSession) -> Self {
        LocalSessionV1_0_0 { session }
    }
}

/// Creates a Migrator for LocalSession entities.
pub fn create_local_session_migrator() -> version_migrate::Migrator {
    version_migrate::migrator!("local_session" => [
        LocalSessionV1_0_0,
        LocalSession
    ], save = true)
    .expect("Failed to create local_session migrator")
}
