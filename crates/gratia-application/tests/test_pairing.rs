mod common;

use std::time::Duration;

use common::{Shared, onboard_father, onboard_mother};
use gratia_core::GratiaError;
use gratia_core::session::{SessionPhase, UserRole};
use gratia_core::shared::pregnancy::{self, TERM_DAYS};
use gratia_core::shared::{DEFAULT_CHILD_NAME, OnboardingData};

const WAIT: Duration = Duration::from_secs(2);

#[tokio::test]
async fn test_mother_saves_father_loads() {
    let shared = Shared::new();
    let mother = shared.context("mother");
    let father = shared.context("father");

    let code = onboard_mother(&mother, "Ana").await;
    mother.add_task("Pack hospital bag").await.unwrap();

    onboard_father(&father, "Ben", &code).await;
    let doc = father.document().await;
    assert_eq!(doc.user_name, "Ben");
    assert_eq!(doc.partner_name.as_deref(), Some("Ana"));
    assert_eq!(doc.pairing_code, code);
    assert_eq!(doc.tasks.len(), 1);
    assert_eq!(doc.child_name.as_deref(), Some(DEFAULT_CHILD_NAME));
}

#[tokio::test]
async fn test_partner_write_is_observed_and_reconciled() {
    let shared = Shared::new();
    let mother = shared.context("mother");
    let father = shared.context("father");

    let code = onboard_mother(&mother, "Ana").await;
    onboard_father(&father, "Ben", &code).await;

    // The father's onboarding save is the first thing the mother sees.
    let first = tokio::time::timeout(WAIT, mother.next_remote_update())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(first.user_name, "Ana");
    assert_eq!(first.partner_name.as_deref(), Some("Ben"));

    father.send_chat("On my way home").await.unwrap();
    let doc = tokio::time::timeout(WAIT, mother.next_remote_update())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(doc.user_name, "Ana");
    assert_eq!(doc.partner_name.as_deref(), Some("Ben"));
    let message = doc.chat_messages.last().unwrap();
    assert_eq!(message.sender_name, "Ben");
    assert!(!doc.is_own_message(message));
}

#[tokio::test]
async fn test_own_writes_not_observed() {
    let shared = Shared::new();
    let mother = shared.context("mother");
    onboard_mother(&mother, "Ana").await;

    mother.record_kick().await.unwrap();
    let waited = tokio::time::timeout(Duration::from_millis(100), mother.next_remote_update()).await;
    assert!(waited.is_err());
}

#[tokio::test]
async fn test_logout_stops_observation_and_clears_session() {
    let shared = Shared::new();
    let mother = shared.context("mother");
    let father = shared.context("father");
    let code = onboard_mother(&mother, "Ana").await;
    onboard_father(&father, "Ben", &code).await;

    mother.logout().await.unwrap();
    assert_eq!(mother.phase().await, SessionPhase::Unauthenticated);
    assert!(mother.session().await.is_none());
    assert!(!mother.is_attached().await);
    assert!(mother.next_remote_update().await.is_none());
    assert_eq!(mother.restore().await.unwrap(), SessionPhase::Unauthenticated);

    father.record_kick().await.unwrap();
    assert!(mother.document().await.kick_count_history.is_empty());
}

#[tokio::test]
async fn test_pregnancy_dates_from_onboarding() {
    let shared = Shared::new();
    let mother = shared.context("mother");
    onboard_mother(&mother, "Ana").await;

    let doc = mother.document().await;
    let start = pregnancy::parse_stored(&doc.pregnancy_start_date).unwrap();
    let due = pregnancy::parse_stored(&doc.expected_due_date).unwrap();
    assert_eq!((due - start).num_days(), TERM_DAYS);
    let elapsed = (chrono::Utc::now() - start).num_days();
    assert_eq!(elapsed, 20 * 7 + 3);
}

#[tokio::test]
async fn test_not_pregnant_clears_dates() {
    let shared = Shared::new();
    let mother = shared.context("mother");
    mother.select_role(UserRole::Mother).await.unwrap();
    mother
        .finish_onboarding(OnboardingData {
            user_name: "Ana".into(),
            is_currently_pregnant: false,
            ..OnboardingData::default()
        })
        .await
        .unwrap();
    let doc = mother.document().await;
    assert_eq!(doc.pregnancy_start_date, "");
    assert_eq!(doc.expected_due_date, "");
    assert_eq!(doc.child_name.as_deref(), Some("My Child"));
}

#[tokio::test]
async fn test_invalid_transitions_rejected() {
    let shared = Shared::new();
    let usecase = shared.context("mother");

    let err = usecase.begin_onboarding().await.unwrap_err();
    assert!(matches!(err, GratiaError::InvalidTransition { .. }));
    let err = usecase.add_task("too early").await.unwrap_err();
    assert!(matches!(err, GratiaError::InvalidTransition { .. }));

    onboard_mother(&usecase, "Ana").await;
    assert!(usecase.select_role(UserRole::Father).await.is_err());
    assert!(usecase.begin_onboarding().await.is_err());
    assert!(
        usecase
            .finish_onboarding(OnboardingData::default())
            .await
            .is_err()
    );
}

#[tokio::test]
async fn test_father_without_code_stays_in_onboarding() {
    let shared = Shared::new();
    let father = shared.context("father");
    father.select_role(UserRole::Father).await.unwrap();
    father.begin_onboarding().await.unwrap();
    let err = father
        .finish_onboarding(OnboardingData {
            user_name: "Ben".into(),
            ..OnboardingData::default()
        })
        .await
        .unwrap_err();
    assert!(matches!(err, GratiaError::InvalidInput(_)));
    assert_eq!(father.phase().await, SessionPhase::Onboarding);
}

#[tokio::test]
async fn test_out_of_range_pregnancy_age_stays_in_onboarding() {
    let shared = Shared::new();
    let mother = shared.context("mother");
    mother.select_role(UserRole::Mother).await.unwrap();
    mother.begin_onboarding().await.unwrap();
    let err = mother
        .finish_onboarding(OnboardingData {
            user_name: "Ana".into(),
            pregnancy_age_weeks: Some(u32::MAX),
            is_currently_pregnant: true,
            ..OnboardingData::default()
        })
        .await
        .unwrap_err();
    assert!(matches!(err, GratiaError::InvalidInput(_)));
    assert_eq!(mother.phase().await, SessionPhase::Onboarding);

    mother
        .finish_onboarding(OnboardingData {
            user_name: "Ana".into(),
            pregnancy_age_weeks: Some(20),
            is_currently_pregnant: true,
            ..OnboardingData::default()
        })
        .await
        .unwrap();
    let before = mother.document().await;
    assert!(mother.update_child_info("Kai", "", u32::MAX, 0).await.is_err());
    assert_eq!(mother.document().await, before);
}
