//! Use cases for Gratia.
//!
//! - [`SharedStateSynchronizer`]: load, save and observe the shared document
//!   of a pairing code
//! - [`SessionUsecase`]: one context's session lifecycle and every dashboard
//!   operation, each ending in a save

pub mod session_usecase;
pub mod synchronizer;

pub use gratia_core::shared::reconcile;
pub use session_usecase::SessionUsecase;
pub use synchronizer::{DocumentSubscription, SharedStateSynchronizer};
