//! Session lifecycle state machine.
//!
//! `Unauthenticated -> RoleChosen -> Onboarding -> Active`; logout returns to
//! `Unauthenticated` from anywhere. Active never re-enters Onboarding directly.

use serde::{Deserialize, Serialize};
use strum::Display;

use crate::error::{GratiaError, Result};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum SessionPhase {
    #[default]
    Unauthenticated,
    RoleChosen,
    Onboarding,
    Active,
}

impl SessionPhase {
    /// Phase a context starts in, given what persistence holds.
    pub fn restore(has_session: bool, onboarding_done: bool) -> Self {
        match (has_session, onboarding_done) {
            (false, _) => SessionPhase::Unauthenticated,
            (true, false) => SessionPhase::RoleChosen,
            (true, true) => SessionPhase::Active,
        }
    }

    pub fn choose_role(self) -> Result<Self> {
        match self {
            SessionPhase::Unauthenticated => Ok(SessionPhase::RoleChosen),
            other => Err(GratiaError::invalid_transition(other.to_string(), "choose a role")),
        }
    }

    pub fn begin_onboarding(self) -> Result<Self> {
        match self {
            SessionPhase::RoleChosen | SessionPhase::Onboarding => Ok(SessionPhase::Onboarding),
            other => Err(GratiaError::invalid_transition(other.to_string(), "begin onboarding")),
        }
    }

    /// Completing onboarding is accepted straight from `RoleChosen` as well,
    /// so a single call can finish a wizard that was never explicitly opened.
    pub fn complete_onboarding(self) -> Result<Self> {
        match self {
            SessionPhase::RoleChosen | SessionPhase::Onboarding => Ok(SessionPhase::Active),
            other => Err(GratiaError::invalid_transition(other.to_string(), "complete onboarding")),
        }
    }

    pub fn logout(self) -> Self {
        SessionPhase::Unauthenticated
    }

    pub fn is_active(self) -> bool {
        self == SessionPhase::Active
    }
}
