//! Canned answers used when the advice collaborator fails.
//!
//! `*_BUSY` variants are chosen when the failure is an exhausted quota.

pub const MEAL_BUSY: &str = "Gratia AI is very busy right now. Please try a featured recipe!";
pub const MEAL_UNAVAILABLE: &str =
    "Sorry, the recipe couldn't be generated right now. Please try a featured recipe!";

pub const FATHER_TIPS_BUSY: &str = "Gratia AI is taking a short rest. For now: Listen actively, offer a warm drink, and handle one extra chore without being asked.";
pub const FATHER_TIPS: &str = "Be patient and give extra love to your wife today.";

pub const MOOD_ADVICE_BUSY: &str = "Gratia AI is busy, but remember: your feelings are valid. Take 5 minutes just for yourself to breathe and rest.";
pub const MOOD_ADVICE: &str = "Breathe deeply and give some time for yourself today.";

pub const MOOD_ANALYSIS_EMPTY: &str = "Not enough mood data for analysis yet.";
pub const MOOD_ANALYSIS_BUSY: &str = "Detailed analysis is unavailable due to high traffic, but your journey is uniquely yours and you are doing great.";
pub const MOOD_ANALYSIS: &str =
    "Analysis is currently unavailable, but keep taking care of your mental health.";

pub const ARTICLE_BUSY_TITLE: &str = "Parenting Wisdom";
pub const ARTICLE_BUSY: &str = "Our AI Library is temporarily at capacity. Please check back in a few minutes for fresh insights.";
pub const ARTICLE_TITLE: &str = "Parenting Tips";
pub const ARTICLE: &str =
    "Sorry, the article couldn't be loaded at this time. Please try again later.";

pub const GUIDE_BUSY_TITLE: &str = "AI Coach Rest Break";
pub const GUIDE_BUSY: &str = "I'm currently assisting many parents! Please wait a moment or try asking a simpler question shortly.";

pub const CONSULT: &str = "I'm sorry, I couldn't process that.";
