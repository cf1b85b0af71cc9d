//! Prompt templates for the advice collaborator.

use minijinja::{Environment, context};
use serde_json::{Value, json};

use gratia_core::error::{GratiaError, Result};
use gratia_core::session::UserRole;
use gratia_core::shared::records::MoodEntry;

const MEAL_MENU: &str = r#"Provide a healthy and nutritious recipe for a mother who is {% if is_post_pregnant %}postpartum{% else %}pregnant{% endif %}.
The user request is: "{{ query }}".
If the request is a CATEGORY (like "Healthy" or "Indonesian"), provide a signature dish from that category.
If the request is a SPECIFIC RECIPE TITLE (like "Salmon Avocado Toast"), provide that exact recipe.

Provide a full recipe including a short title, ingredients, and instructions. Also explain the nutritional benefits for the mother.
IMPORTANT: Response MUST be a valid JSON object."#;

const MEAL_IMAGE: &str = "A delicious, high-quality, professional food photography shot of {{ title }}. Served in a beautiful plate, bright lighting, healthy and fresh ingredients visible, soft background.";

const FATHER_TIPS: &str = r#"My wife is {% if is_post_pregnant %}postpartum{% else %}pregnant{% endif %}{% if is_period %} and she is currently on her menstrual period{% endif %}. Her mood today is {{ mood }}.
As her husband, provide 3 very specific, actionable, and loving "serving" tips on how I can physically and emotionally support/serve her today.
Focus on acts of service, comfort, and extra patience.
IMPORTANT: Respond strictly in English."#;

const DAILY_MOOD: &str = r#"I am a mother in the pregnancy/postpartum phase. My mood today is "{{ mood }}"{% if note %} and I wrote in my journal: "{{ note }}"{% endif %}.
Give short, very warm, and practical advice based on my mood and journal entry today.
Focus on mental support and physical comfort. Maximum 3 sentences.
IMPORTANT: Respond strictly in English."#;

const MOOD_ANALYSIS: &str = r#"Based on the following mother's mood history and daily notes: [{% for entry in history %}{{ entry.date }}: {{ entry.mood }} ({{ entry.note or "no notes" }}){% if not loop.last %}, {% endif %}{% endfor %}].
Provide a brief analysis of her emotional trends and warm mental health advice.
IMPORTANT: Respond strictly in English."#;

const ARTICLE: &str = r#"Write a short educational article about caring for a child/mother in the category "{{ category }}" for a {{ role }}.
The article should have a catchy title, a brief introduction, and practical key points. Respond in JSON format with fields 'title' and 'content' (use markdown for content).
IMPORTANT: Respond strictly in English."#;

const CUSTOM_GUIDE: &str = r#"You are a professional Parenting and Relationship Expert.
A user who is a {{ role }} has a specific question: "{{ question }}".

Write a brief, supportive, and highly practical guide to help them.
The response MUST include:
1. A clear, reassuring Title.
2. An Introduction acknowledging their concern.
3. A list of Practical Tips (3-5 points).
4. A 'Coach's Secret' or final encouraging thought.

Respond in JSON format with fields 'title' and 'content' (use markdown/newlines for content).
IMPORTANT: Respond strictly in English."#;

/// System instruction for the free-form coaching chat.
pub fn consult_instruction(role: UserRole) -> &'static str {
    match role {
        UserRole::Mother => "You are Gratia AI, a professional parenting and relationship coach.",
        UserRole::Father => "You are Gratia AI, a supportive parenting coach for fathers.",
    }
}

/// Response schema for a recipe.
pub fn recipe_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "title": { "type": "STRING" },
            "ingredients": { "type": "ARRAY", "items": { "type": "STRING" } },
            "instructions": { "type": "ARRAY", "items": { "type": "STRING" } },
            "benefits": { "type": "STRING" }
        },
        "required": ["title", "ingredients", "instructions", "benefits"]
    })
}

/// Response schema for an article or guide.
pub fn guide_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "title": { "type": "STRING" },
            "content": { "type": "STRING" }
        },
        "required": ["title", "content"]
    })
}

/// Renders the prompt templates.
pub struct Prompts {
    env: Environment<'static>,
}

impl Default for Prompts {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompts {
    pub fn new() -> Self {
        Self {
            env: Environment::new(),
        }
    }

    fn render(&self, source: &str, ctx: minijinja::Value) -> Result<String> {
        self.env
            .render_str(source, ctx)
            .map_err(|e| GratiaError::internal(format!("Failed to render prompt: {e}")))
    }

    pub fn meal_menu(&self, query: &str, is_post_pregnant: bool) -> Result<String> {
        self.render(MEAL_MENU, context! { query, is_post_pregnant })
    }

    pub fn meal_image(&self, title: &str) -> Result<String> {
        self.render(MEAL_IMAGE, context! { title })
    }

    pub fn father_tips(&self, mood: &str, is_post_pregnant: bool, is_period: bool) -> Result<String> {
        self.render(FATHER_TIPS, context! { mood, is_post_pregnant, is_period })
    }

    pub fn daily_mood(&self, mood: &str, note: Option<&str>) -> Result<String> {
        let note = note.filter(|n| !n.trim().is_empty());
        self.render(DAILY_MOOD, context! { mood, note })
    }

    pub fn mood_analysis(&self, history: &[MoodEntry]) -> Result<String> {
        self.render(MOOD_ANALYSIS, context! { history })
    }

    pub fn article(&self, category: &str, role: UserRole) -> Result<String> {
        self.render(ARTICLE, context! { category, role => role.label() })
    }

    pub fn custom_guide(&self, question: &str, role: UserRole) -> Result<String> {
        self.render(CUSTOM_GUIDE, context! { question, role => role.label() })
    }
}
