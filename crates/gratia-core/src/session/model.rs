//! LocalSession domain model.

use rand::Rng;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// One of the two mutually exclusive roles a context can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum UserRole {
    Mother,
    Father,
}

impl UserRole {
    /// The role on the other end of the pairing.
    pub fn partner(self) -> Self {
        match self {
            UserRole::Mother => UserRole::Father,
            UserRole::Father => UserRole::Mother,
        }
    }

    /// Human label used in prompts ("Mother" / "Father").
    pub fn label(self) -> &'static str {
        match self {
            UserRole::Mother => "Mother",
            UserRole::Father => "Father",
        }
    }
}

/// UI language of the shared document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Id,
}

/// Identity of a single execution context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalSession {
    /// Generated id (`user_` followed by four base36 characters).
    pub id: String,
    pub role: UserRole,
    /// Code shared with the partner; `None` until onboarding completes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pairing_code: Option<String>,
    #[serde(default)]
    pub language: Language,
    /// Cached display name, the authority for the document's `userName`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
}

impl LocalSession {
    /// Creates a session for a freshly chosen role.
    pub fn new(role: UserRole) -> Self {
        Self {
            id: format!("user_{}", random_base36(4)),
            role,
            pairing_code: None,
            language: Language::default(),
            user_name: None,
        }
    }

    /// Pairing code, ignoring an empty one.
    pub fn pairing_code(&self) -> Option<&str> {
        self.pairing_code.as_deref().filter(|code| !code.is_empty())
    }

    pub fn user_name(&self) -> Option<&str> {
        self.user_name.as_deref()
    }

    pub fn is_paired(&self) -> bool {
        self.pairing_code().is_some()
    }
}

/// Random lowercase base36 string of `len` characters.
pub(crate) fn random_base36(len: usize) -> String {
    const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    let mut rng = rand::thread_rng();
    (0..len)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect()
}
