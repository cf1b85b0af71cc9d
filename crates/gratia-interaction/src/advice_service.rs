//! [`AdviceService`] over a [`TextGenerator`].

use async_trait::async_trait;
use std::sync::Arc;

use gratia_core::advice::{AdviceService, Guide, MealOutcome, Recipe, fallback};
use gratia_core::error::{GratiaError, Result};
use gratia_core::session::UserRole;
use gratia_core::shared::records::MoodEntry;

use crate::generator::{GenerationRequest, TextGenerator};
use crate::json::parse_lenient;
use crate::prompts::{self, Prompts};

pub struct GeminiAdviceService {
    generator: Arc<dyn TextGenerator>,
    prompts: Prompts,
}

impl GeminiAdviceService {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            generator,
            prompts: Prompts::new(),
        }
    }

    async fn ask(&self, operation: &str, request: Result<GenerationRequest>) -> Result<String> {
        let result = match request {
            Ok(request) => self.generator.generate(request).await,
            Err(e) => Err(e),
        };
        if let Err(e) = &result {
            tracing::warn!(operation, error = %e, "advice request failed");
        }
        result
    }

    async fn ask_text(&self, operation: &str, prompt: Result<String>) -> Result<String> {
        self.ask(operation, prompt.map(GenerationRequest::new)).await
    }

    async fn ask_guide(&self, operation: &str, prompt: Result<String>) -> Result<Option<Guide>> {
        let request = prompt.map(|p| GenerationRequest::new(p).with_json_schema(prompts::guide_schema()));
        let text = self.ask(operation, request).await?;
        Ok(parse_lenient(&text))
    }
}

/// Picks the quota variant of a fallback when the failure was a quota refusal.
fn fallback_for(err: &GratiaError, busy: &'static str, plain: &'static str) -> String {
    let text = if err.is_quota_exceeded() { busy } else { plain };
    text.to_string()
}

#[async_trait]
impl AdviceService for GeminiAdviceService {
    async fn meal_menu(&self, query: &str, is_post_pregnant: bool) -> MealOutcome {
        let request = self
            .prompts
            .meal_menu(query, is_post_pregnant)
            .map(|p| GenerationRequest::new(p).with_json_schema(prompts::recipe_schema()));
        match self.ask("meal_menu", request).await {
            Ok(text) => match parse_lenient::<Recipe>(&text) {
                Some(recipe) => MealOutcome::Recipe(recipe),
                None => MealOutcome::Unavailable,
            },
            Err(e) if e.is_quota_exceeded() => MealOutcome::QuotaExceeded,
            Err(_) => MealOutcome::Unavailable,
        }
    }

    async fn meal_image(&self, meal_title: &str) -> Option<String> {
        let prompt = self.prompts.meal_image(meal_title).ok()?;
        match self.generator.generate_image(&prompt).await {
            Ok(image) => image.map(|image| image.to_data_url()),
            Err(e) => {
                tracing::warn!(error = %e, "meal image generation failed");
                None
            }
        }
    }

    async fn father_tips(&self, wife_mood: &str, is_post_pregnant: bool, is_period: bool) -> String {
        let prompt = self.prompts.father_tips(wife_mood, is_post_pregnant, is_period);
        self.ask_text("father_tips", prompt)
            .await
            .unwrap_or_else(|e| fallback_for(&e, fallback::FATHER_TIPS_BUSY, fallback::FATHER_TIPS))
    }

    async fn daily_mood_advice(&self, mood: &str, note: Option<&str>) -> String {
        let prompt = self.prompts.daily_mood(mood, note);
        self.ask_text("daily_mood_advice", prompt)
            .await
            .unwrap_or_else(|e| fallback_for(&e, fallback::MOOD_ADVICE_BUSY, fallback::MOOD_ADVICE))
    }

    async fn mood_analysis(&self, history: &[MoodEntry]) -> String {
        if history.is_empty() {
            return fallback::MOOD_ANALYSIS_EMPTY.to_string();
        }
        let prompt = self.prompts.mood_analysis(history);
        self.ask_text("mood_analysis", prompt)
            .await
            .unwrap_or_else(|e| fallback_for(&e, fallback::MOOD_ANALYSIS_BUSY, fallback::MOOD_ANALYSIS))
    }

    async fn parenting_article(&self, category: &str, role: UserRole) -> Guide {
        let unavailable = || Guide::new(fallback::ARTICLE_TITLE, fallback::ARTICLE);
        match self.ask_guide("parenting_article", self.prompts.article(category, role)).await {
            Ok(Some(guide)) => guide,
            Ok(None) => unavailable(),
            Err(e) if e.is_quota_exceeded() => {
                Guide::new(fallback::ARTICLE_BUSY_TITLE, fallback::ARTICLE_BUSY)
            }
            Err(_) => unavailable(),
        }
    }

    async fn custom_guide(&self, question: &str, role: UserRole) -> Option<Guide> {
        match self.ask_guide("custom_guide", self.prompts.custom_guide(question, role)).await {
            Ok(guide) => guide,
            Err(e) if e.is_quota_exceeded() => {
                Some(Guide::new(fallback::GUIDE_BUSY_TITLE, fallback::GUIDE_BUSY))
            }
            Err(_) => None,
        }
    }

    async fn consult(&self, question: &str, role: UserRole) -> String {
        let request = GenerationRequest::new(question)
            .with_system_instruction(prompts::consult_instruction(role));
        self.ask("consult", Ok(request))
            .await
            .unwrap_or_else(|_| fallback::CONSULT.to_string())
    }
}
