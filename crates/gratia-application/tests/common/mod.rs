//! Two-context harness: each context gets its own session store while sharing
//! the document backend and the change hub.

#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::Arc;

use gratia_application::{SessionUsecase, SharedStateSynchronizer};
use gratia_core::advice::{AdviceService, Guide, MealOutcome};
use gratia_core::location::Position;
use gratia_core::session::UserRole;
use gratia_core::shared::OnboardingData;
use gratia_core::shared::records::MoodEntry;
use gratia_core::storage::{ContextId, KeyValueStore};
use gratia_infrastructure::{ChangeHub, KvSessionRepository, MemoryStore, NotifyingStore};
use gratia_interaction::FixedLocator;

/// Answers every request with a fixed, recognisable string.
pub struct CannedAdvice;

pub const CANNED: &str = "canned advice";

#[async_trait]
impl AdviceService for CannedAdvice {
    async fn meal_menu(&self, _query: &str, _is_post_pregnant: bool) -> MealOutcome {
        MealOutcome::Unavailable
    }

    async fn meal_image(&self, _meal_title: &str) -> Option<String> {
        None
    }

    async fn father_tips(&self, wife_mood: &str, _is_post: bool, is_period: bool) -> String {
        format!("tips for {wife_mood} period={is_period}")
    }

    async fn daily_mood_advice(&self, mood: &str, _note: Option<&str>) -> String {
        format!("{CANNED} for {mood}")
    }

    async fn mood_analysis(&self, history: &[MoodEntry]) -> String {
        format!("{} entries", history.len())
    }

    async fn parenting_article(&self, category: &str, _role: UserRole) -> Guide {
        Guide::new(category, CANNED)
    }

    async fn custom_guide(&self, question: &str, _role: UserRole) -> Option<Guide> {
        Some(Guide::new(question, CANNED))
    }

    async fn consult(&self, _question: &str, _role: UserRole) -> String {
        CANNED.to_string()
    }
}

pub struct Shared {
    pub backend: MemoryStore,
    pub hub: ChangeHub,
}

impl Shared {
    pub fn new() -> Self {
        Self {
            backend: MemoryStore::new(),
            hub: ChangeHub::default(),
        }
    }

    pub fn context(&self, name: &str) -> SessionUsecase {
        self.context_at(name, None)
    }

    pub fn context_at(&self, name: &str, position: Option<Position>) -> SessionUsecase {
        let store = NotifyingStore::new(
            Arc::new(self.backend.clone()),
            self.hub.clone(),
            ContextId::new(name),
        );
        let sessions: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        SessionUsecase::new(
            Arc::new(KvSessionRepository::new(sessions)),
            SharedStateSynchronizer::new(store),
            Arc::new(CannedAdvice),
            Arc::new(FixedLocator::new(position)),
        )
    }
}

/// Runs the mother through role selection and onboarding; returns her code.
pub async fn onboard_mother(usecase: &SessionUsecase, name: &str) -> String {
    usecase.select_role(UserRole::Mother).await.unwrap();
    usecase.begin_onboarding().await.unwrap();
    let session = usecase
        .finish_onboarding(OnboardingData {
            user_name: name.into(),
            is_currently_pregnant: true,
            pregnancy_age_weeks: Some(20),
            pregnancy_age_days: Some(3),
            ..OnboardingData::default()
        })
        .await
        .unwrap();
    session.pairing_code.unwrap()
}

pub async fn onboard_father(usecase: &SessionUsecase, name: &str, code: &str) {
    usecase.select_role(UserRole::Father).await.unwrap();
    usecase.begin_onboarding().await.unwrap();
    usecase
        .finish_onboarding(OnboardingData {
            user_name: name.into(),
            pairing_code: Some(code.into()),
            ..OnboardingData::default()
        })
        .await
        .unwrap();
}
