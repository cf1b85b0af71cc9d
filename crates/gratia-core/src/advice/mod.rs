//! AI advice domain module.
//!
//! The advice collaborator is remote and fallible. Every operation on
//! [`AdviceService`] resolves to something displayable: either the model's
//! answer or one of the canned fallbacks in [`fallback`].

pub mod fallback;
mod model;
mod service;

pub use model::{Guide, MealOutcome, Recipe, featured_recipe};
pub use service::AdviceService;
