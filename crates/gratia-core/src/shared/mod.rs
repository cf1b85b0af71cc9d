//! Shared document domain module.
//!
//! # Module Structure
//!
//! - `model`: the synchronized `SharedDocument`
//! - `records`: payload records carried inside it
//! - `reconcile`: the merge applied when adopting a stored or remote copy
//! - `operations`: local edits made by the dashboards
//! - `pairing`: pairing code generation
//! - `pregnancy`: due date arithmetic
//! - `repository`: persistence trait keyed by pairing code

mod model;
mod operations;
pub mod pairing;
pub mod pregnancy;
mod reconcile;
pub mod records;
mod repository;

pub use model::{DEFAULT_CHILD_NAME, DEFAULT_CHILD_NICKNAME, DEFAULT_MOOD, SharedDocument};
pub use operations::{COACH_NAME, NewCheckup, OnboardingData, PERIOD_ANNOUNCEMENT};
pub use reconcile::reconcile;
pub use repository::DocumentRepository;
