//! SharedDocument domain model.
//!
//! The unit of synchronization between the two paired contexts. Every field has
//! an explicit default so a document written by an older client still loads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::session::Language;
use crate::shared::pregnancy;
use crate::shared::records::{
    ChatMessage, CheckupEntry, ChildInfo, CommunityPost, KickCount, LocationData, MoodEntry,
    PartnerMessage, PhotoEntry, TaskItem,
};

pub const DEFAULT_CHILD_NAME: &str = "Little One";
pub const DEFAULT_CHILD_NICKNAME: &str = "Sunshine";
pub const DEFAULT_MOOD: &str = "😊 Happy";

/// All cross-role application state, keyed by pairing code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SharedDocument {
    pub language: Language,
    /// Empty until paired; an unpaired document is never persisted.
    pub pairing_code: String,
    /// Name of the local writer. Never adopted from a remote copy.
    pub user_name: String,
    /// Name of the remote writer, derived on reconcile.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partner_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub child_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub child_nickname: Option<String>,
    /// RFC 3339 date, or empty when the mother is not pregnant.
    pub pregnancy_start_date: String,
    /// RFC 3339 date, or empty when the mother is not pregnant.
    pub expected_due_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,
    pub is_post_pregnant: bool,
    pub current_mood: String,
    pub mood_history: Vec<MoodEntry>,
    pub tasks: Vec<TaskItem>,
    pub chat_messages: Vec<ChatMessage>,
    pub ai_consult_history: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mood_analysis: Option<String>,
    pub is_period_notified: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period_announced_at: Option<String>,
    pub is_mother_location_sharing: bool,
    pub is_father_location_sharing: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mother_location: Option<LocationData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub father_location: Option<LocationData>,
    pub kick_count_history: Vec<KickCount>,
    pub photo_journey: Vec<PhotoEntry>,
    pub partner_messages: Vec<PartnerMessage>,
    pub community_posts: Vec<CommunityPost>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pregnancy_age_weeks: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pregnancy_age_days: Option<u32>,
    pub checkups: Vec<CheckupEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<ChildInfo>>,
}

impl Default for SharedDocument {
    fn default() -> Self {
        Self::initial(Utc::now())
    }
}

impl SharedDocument {
    /// The document a brand-new context starts from.
    pub fn initial(now: DateTime<Utc>) -> Self {
        Self {
            language: Language::En,
            pairing_code: String::new(),
            user_name: String::new(),
            partner_name: None,
            child_name: Some(DEFAULT_CHILD_NAME.to_string()),
            child_nickname: Some(DEFAULT_CHILD_NICKNAME.to_string()),
            pregnancy_start_date: now.to_rfc3339(),
            expected_due_date: pregnancy::nine_months_from(now).to_rfc3339(),
            birth_date: None,
            is_post_pregnant: false,
            current_mood: DEFAULT_MOOD.to_string(),
            mood_history: Vec::new(),
            tasks: Vec::new(),
            chat_messages: Vec::new(),
            ai_consult_history: Vec::new(),
            mood_analysis: None,
            is_period_notified: false,
            period_announced_at: None,
            is_mother_location_sharing: false,
            is_father_location_sharing: false,
            mother_location: None,
            father_location: None,
            kick_count_history: Vec::new(),
            photo_journey: Vec::new(),
            partner_messages: Vec::new(),
            community_posts: vec![CommunityPost {
                id: "1".to_string(),
                author: "Mama Sarah".to_string(),
                content: "Hello Moms! So happy to join Gratia.".to_string(),
                image_url: None,
                timestamp: now.to_rfc3339(),
                likes: 1,
                tags: vec!["Greeting".to_string()],
            }],
            pregnancy_age_weeks: None,
            pregnancy_age_days: None,
            checkups: Vec::new(),
            children: None,
        }
    }

    /// True once a pairing code has been assigned.
    pub fn is_paired(&self) -> bool {
        !self.pairing_code.trim().is_empty()
    }
}
