//! Local session domain module.
//!
//! A [`LocalSession`] is the identity of one execution context. It is never
//! synchronized; only the shared document is.
//!
//! # Module Structure
//!
//! - `model`: `UserRole`, `Language`, `LocalSession`
//! - `lifecycle`: `SessionPhase` state machine
//! - `repository`: persistence trait for the session and onboarding flag

mod lifecycle;
mod model;
mod repository;

pub use lifecycle::SessionPhase;
pub use model::{Language, LocalSession, UserRole};
pub use repository::SessionRepository;
