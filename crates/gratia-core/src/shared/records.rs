//! Payload records carried inside a [`super::SharedDocument`].
//!
//! The synchronizer treats all of these as opaque; they are typed here so both
//! paired clients agree on the shape.

use serde::{Deserialize, Serialize};

use crate::session::UserRole;

/// One day of the mother's mood journal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodEntry {
    /// Day in `YYYY-MM-DD` form; at most one entry per day.
    pub date: String,
    pub mood: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_advice: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskItem {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub completed: bool,
}

/// Author of a chat line. `Ai` is the coach in the consult history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SenderRole {
    Mother,
    Father,
    Ai,
}

impl From<UserRole> for SenderRole {
    fn from(role: UserRole) -> Self {
        match role {
            UserRole::Mother => SenderRole::Mother,
            UserRole::Father => SenderRole::Father,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: String,
    pub sender_role: SenderRole,
    pub sender_name: String,
    pub text: String,
    /// RFC 3339 timestamp.
    pub timestamp: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display, strum::EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum PartnerMessageKind {
    Hug,
    Love,
    Flower,
    Cheer,
    Custom,
    Period,
}

/// A small gesture sent to the partner (hug, flower, period notice).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartnerMessage {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: PartnerMessageKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    pub sender: String,
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunityPost {
    pub id: String,
    pub author: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub timestamp: String,
    #[serde(default)]
    pub likes: u32,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// A location snapshot shared with the partner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationData {
    pub lat: f64,
    pub lng: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
}

impl LocationData {
    /// Link that opens the position on a map.
    pub fn map_link(&self) -> String {
        format!("https://www.google.com/maps?q={},{}", self.lat, self.lng)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckupEntry {
    pub id: String,
    pub doctor_name: String,
    pub hospital: String,
    /// ISO date-time of the appointment.
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChildStatus {
    Expecting,
    Born,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChildInfo {
    pub id: String,
    pub name: String,
    pub nickname: String,
    pub status: ChildStatus,
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KickCount {
    pub date: String,
    pub count: u32,
}

/// A photo journal entry; `url` holds a `data:` URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoEntry {
    pub id: String,
    pub url: String,
    pub caption: String,
    pub date: String,
    pub phase: String,
}

/// Journey phases a photo can be filed under.
pub const CHILD_PHASES: [&str; 6] = [
    "Pregnancy",
    "Newborn (0-1 Yr)",
    "Toddler (1-3 Yrs)",
    "Preschool (3-6 Yrs)",
    "Primary School (6-12 Yrs)",
    "Teenager (12+ Yrs)",
];
