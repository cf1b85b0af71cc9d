//! Advice service trait.

use async_trait::async_trait;

use crate::advice::model::{Guide, MealOutcome};
use crate::session::UserRole;
use crate::shared::records::MoodEntry;

/// Operations backed by the generative AI collaborator.
///
/// None of these return an error: failures resolve to a fallback value.
#[async_trait]
pub trait AdviceService: Send + Sync {
    /// A recipe for a category ("Healthy") or a specific dish title.
    async fn meal_menu(&self, query: &str, is_post_pregnant: bool) -> MealOutcome;

    /// A `data:` URL illustrating the dish, `None` on failure.
    async fn meal_image(&self, meal_title: &str) -> Option<String>;

    /// Three acts of service the father can do today.
    async fn father_tips(&self, wife_mood: &str, is_post_pregnant: bool, is_period: bool) -> String;

    /// Short advice for today's mood and journal note.
    async fn daily_mood_advice(&self, mood: &str, note: Option<&str>) -> String;

    /// Trend analysis over the journal.
    async fn mood_analysis(&self, history: &[MoodEntry]) -> String;

    async fn parenting_article(&self, category: &str, role: UserRole) -> Guide;

    /// A guide answering a free-form question; `None` when the collaborator
    /// failed for any reason other than its quota.
    async fn custom_guide(&self, question: &str, role: UserRole) -> Option<Guide>;

    /// Free-form coaching chat.
    async fn consult(&self, question: &str, role: UserRole) -> String;
}
