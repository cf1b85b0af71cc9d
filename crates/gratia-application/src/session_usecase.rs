//! Session use case implementation.
//!
//! `SessionUsecase` owns one context's view of the world: its phase in the
//! session lifecycle, its [`LocalSession`], the in-memory [`SharedDocument`]
//! and the subscription that brings in the partner's writes. Every dashboard
//! operation is a local mutation followed by a save through the synchronizer.
//!
//! # Thread Safety
//!
//! State lives behind a tokio `RwLock`; the lock is held across the save of an
//! update so two local edits cannot be persisted out of order.

use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tokio_util::sync::CancellationToken;

use gratia_core::advice::{AdviceService, Guide, MealOutcome, featured_recipe};
use gratia_core::error::{GratiaError, Result};
use gratia_core::location::GeoLocator;
use gratia_core::session::{LocalSession, SessionPhase, SessionRepository, UserRole};
use gratia_core::shared::pairing::{generate_pairing_code, normalize_pairing_code};
use gratia_core::shared::records::{
    ChatMessage, CheckupEntry, LocationData, PartnerMessageKind, PhotoEntry, TaskItem,
};
use gratia_core::shared::{
    DEFAULT_CHILD_NAME, DEFAULT_CHILD_NICKNAME, NewCheckup, OnboardingData, SharedDocument,
    reconcile,
};
use gratia_interaction::attachment;

use crate::synchronizer::{DocumentSubscription, SharedStateSynchronizer};

/// Child defaults when the mother reports she is not currently pregnant.
pub const BORN_CHILD_NAME: &str = "My Child";
pub const BORN_CHILD_NICKNAME: &str = "Kiddo";

/// Live subscription to the partner's writes, cancelled on logout.
struct Attachment {
    subscription: Mutex<DocumentSubscription>,
    cancel: CancellationToken,
}

impl Attachment {
    fn new(subscription: DocumentSubscription) -> Arc<Self> {
        Arc::new(Self {
            subscription: Mutex::new(subscription),
            cancel: CancellationToken::new(),
        })
    }
}

struct SessionState {
    phase: SessionPhase,
    session: Option<LocalSession>,
    document: SharedDocument,
    attachment: Option<Arc<Attachment>>,
}

impl SessionState {
    fn initial() -> Self {
        Self {
            phase: SessionPhase::Unauthenticated,
            session: None,
            document: SharedDocument::default(),
            attachment: None,
        }
    }

    fn session_name(&self) -> Option<String> {
        self.session
            .as_ref()
            .and_then(|s| s.user_name().map(str::to_string))
    }

    fn replace_attachment(&mut self, subscription: DocumentSubscription) {
        if let Some(previous) = self.attachment.replace(Attachment::new(subscription)) {
            previous.cancel.cancel();
        }
    }

    fn detach(&mut self) {
        if let Some(previous) = self.attachment.take() {
            previous.cancel.cancel();
        }
    }
}

pub struct SessionUsecase {
    sessions: Arc<dyn SessionRepository>,
    sync: SharedStateSynchronizer,
    advice: Arc<dyn AdviceService>,
    locator: Arc<dyn GeoLocator>,
    state: RwLock<SessionState>,
}

impl SessionUsecase {
    /// Creates a use case in the `Unauthenticated` phase. Call
    /// [`Self::restore`] to pick up a session persisted by a previous run.
    pub fn new(
        sessions: Arc<dyn SessionRepository>,
        sync: SharedStateSynchronizer,
        advice: Arc<dyn AdviceService>,
        locator: Arc<dyn GeoLocator>,
    ) -> Self {
        Self {
            sessions,
            sync,
            advice,
            locator,
            state: RwLock::new(SessionState::initial()),
        }
    }

    // ============================================================================
    // Lifecycle
    // ============================================================================

    /// Restores the persisted session and, when onboarding is done, attaches
    /// to its pairing code. A corrupt session record is treated as absent.
    pub async fn restore(&self) -> Result<SessionPhase> {
        let session = match self.sessions.load_session().await {
            Ok(session) => session,
            Err(e) if e.is_corrupt() => {
                tracing::warn!(error = %e, "stored session unreadable, starting fresh");
                None
            }
            Err(e) => return Err(e),
        };
        let onboarding_done = self.sessions.is_onboarding_done().await?;
        let phase = SessionPhase::restore(session.is_some(), onboarding_done);

        let pairing_code = {
            let mut state = self.state.write().await;
            state.phase = phase;
            if let Some(session) = &session {
                state.document.language = session.language;
            }
            state.session = session;
            state
                .session
                .as_ref()
                .and_then(|s| s.pairing_code().map(str::to_string))
        };

        if let (true, Some(code)) = (phase.is_active(), pairing_code) {
            self.attach(&code).await;
        }
        tracing::debug!(phase = %phase, "session restored");
        Ok(phase)
    }

    /// Creates and persists a session for `role`.
    pub async fn select_role(&self, role: UserRole) -> Result<LocalSession> {
        let mut state = self.state.write().await;
        let next = state.phase.choose_role()?;
        let session = LocalSession::new(role);
        self.sessions.save_session(&session).await?;

        state.phase = next;
        state.document.language = session.language;
        state.session = Some(session.clone());
        tracing::info!(role = %role, id = %session.id, "role selected");
        Ok(session)
    }

    pub async fn begin_onboarding(&self) -> Result<()> {
        let mut state = self.state.write().await;
        state.phase = state.phase.begin_onboarding()?;
        Ok(())
    }

    /// Completes onboarding: assigns (mother) or consumes (father) a pairing
    /// code, saves the document and attaches to the code.
    ///
    /// When a document already exists under the code it wins, reconciled so
    /// this context keeps its own name.
    pub async fn finish_onboarding(&self, data: OnboardingData) -> Result<LocalSession> {
        let now = Utc::now();
        let (session, code, onboarded) = {
            let state = self.state.read().await;
            state.phase.complete_onboarding()?;
            let mut session = state
                .session
                .clone()
                .ok_or_else(|| GratiaError::internal("onboarding without a session"))?;

            let data = onboarding_for(session.role, data)?;
            let code = data.pairing_code.clone().unwrap_or_default();
            let mut document = state.document.clone();
            document.apply_onboarding(&data, now)?;

            if !data.user_name.is_empty() {
                session.user_name = Some(data.user_name.clone());
            }
            session.pairing_code = Some(code.clone());
            (session, code, document)
        };

        let subscription = self.sync.observe(&code);
        let document = match self.sync.load(&code).await {
            Some(existing) => reconcile(&onboarded, session.user_name(), existing),
            None => onboarded,
        };

        self.sessions.save_session(&session).await?;
        self.sessions.set_onboarding_done().await?;

        let mut state = self.state.write().await;
        state.phase = state.phase.complete_onboarding()?;
        state.session = Some(session.clone());
        state.document = document;
        state.replace_attachment(subscription);
        self.sync.save(&state.document).await;

        tracing::info!(role = %session.role, pairing_code = %code, "onboarding finished");
        Ok(session)
    }

    /// Discards the session and onboarding flag, stops observing and resets
    /// the in-memory document.
    pub async fn logout(&self) -> Result<()> {
        let mut state = self.state.write().await;
        self.sessions.clear().await?;
        state.detach();
        *state = SessionState::initial();
        tracing::info!("logged out");
        Ok(())
    }

    async fn attach(&self, pairing_code: &str) {
        let subscription = self.sync.observe(pairing_code);
        let stored = self.sync.load(pairing_code).await;

        let mut state = self.state.write().await;
        match stored {
            Some(incoming) => {
                let name = state.session_name();
                state.document = reconcile(&state.document, name.as_deref(), incoming);
            }
            None => {
                state.document.pairing_code = pairing_code.to_string();
                if let Some(name) = state.session_name() {
                    state.document.user_name = name;
                }
            }
        }
        state.replace_attachment(subscription);
    }

    // ============================================================================
    // Synchronization
    // ============================================================================

    /// Applies a local edit and saves the result.
    ///
    /// The edit is rejected unless the session is active. When `mutate` fails
    /// nothing is saved.
    pub async fn update<T>(
        &self,
        mutate: impl FnOnce(&mut SharedDocument) -> Result<T> + Send,
    ) -> Result<T> {
        let mut state = self.state.write().await;
        if !state.phase.is_active() {
            return Err(GratiaError::invalid_transition(
                state.phase.to_string(),
                "edit the shared document",
            ));
        }
        let output = mutate(&mut state.document)?;
        self.sync.save(&state.document).await;
        Ok(output)
    }

    /// Adopts a document written by the partner.
    pub async fn apply_remote(&self, incoming: SharedDocument) -> SharedDocument {
        let mut state = self.state.write().await;
        let name = state.session_name();
        state.document = reconcile(&state.document, name.as_deref(), incoming);
        state.document.clone()
    }

    /// Waits for the partner's next write and applies it.
    ///
    /// Returns `None` when not attached, or once [`Self::logout`] runs.
    pub async fn next_remote_update(&self) -> Option<SharedDocument> {
        let attachment = self.state.read().await.attachment.clone()?;
        let incoming = {
            let mut subscription = attachment.subscription.lock().await;
            let received = tokio::select! {
                _ = attachment.cancel.cancelled() => None,
                document = subscription.recv() => Some(document),
            };
            match received {
                Some(document) => document,
                None => {
                    subscription.unsubscribe();
                    None
                }
            }
        }?;
        Some(self.apply_remote(incoming).await)
    }

    // ============================================================================
    // Accessors
    // ============================================================================

    pub async fn phase(&self) -> SessionPhase {
        self.state.read().await.phase
    }

    pub async fn session(&self) -> Option<LocalSession> {
        self.state.read().await.session.clone()
    }

    /// Snapshot of the in-memory document.
    pub async fn document(&self) -> SharedDocument {
        self.state.read().await.document.clone()
    }

    pub async fn is_attached(&self) -> bool {
        self.state.read().await.attachment.is_some()
    }

    async fn role(&self) -> Result<UserRole> {
        let state = self.state.read().await;
        state
            .session
            .as_ref()
            .map(|s| s.role)
            .ok_or_else(|| GratiaError::invalid_transition(state.phase.to_string(), "act without a role"))
    }

    // ============================================================================
    // Mood journal
    // ============================================================================

    pub async fn set_mood(&self, mood: &str) -> Result<()> {
        let now = Utc::now();
        self.update(|doc| {
            doc.set_mood(mood, now);
            Ok(())
        })
        .await
    }

    /// Saves today's note, then asks for advice on it and stores the answer.
    pub async fn save_journal(&self, note: &str) -> Result<String> {
        let now = Utc::now();
        let entry = self.update(|doc| Ok(doc.save_journal(note, now))).await?;
        let advice = self
            .advice
            .daily_mood_advice(&entry.mood, entry.note.as_deref())
            .await;
        self.update(|doc| {
            doc.attach_mood_advice(&entry.date, &advice);
            Ok(())
        })
        .await?;
        Ok(advice)
    }

    pub async fn analyze_moods(&self) -> Result<String> {
        let history = self.state.read().await.document.mood_history.clone();
        let analysis = self.advice.mood_analysis(&history).await;
        self.update(|doc| {
            doc.mood_analysis = Some(analysis.clone());
            Ok(())
        })
        .await?;
        Ok(analysis)
    }

    // ============================================================================
    // Tasks and chat
    // ============================================================================

    /// Blank text is ignored.
    pub async fn add_task(&self, text: &str) -> Result<Option<TaskItem>> {
        self.update(|doc| Ok(doc.add_task(text).cloned())).await
    }

    pub async fn toggle_task(&self, id: &str) -> Result<bool> {
        self.update(|doc| doc.toggle_task(id)).await
    }

    pub async fn delete_task(&self, id: &str) -> Result<bool> {
        self.update(|doc| Ok(doc.delete_task(id))).await
    }

    /// Blank text is ignored.
    pub async fn send_chat(&self, text: &str) -> Result<Option<ChatMessage>> {
        let role = self.role().await?;
        let now = Utc::now();
        self.update(|doc| Ok(doc.send_chat(role, text, now).cloned()))
            .await
    }

    // ============================================================================
    // AI coach
    // ============================================================================

    /// Asks the coach; the reply (or its fallback) lands in the consult history.
    pub async fn consult(&self, question: &str) -> Result<Option<String>> {
        let question = question.trim();
        if question.is_empty() {
            return Ok(None);
        }
        let role = self.role().await?;
        self.update(|doc| {
            doc.push_consult_question(role, question, Utc::now());
            Ok(())
        })
        .await?;

        let answer = self.advice.consult(question, role).await;
        self.update(|doc| {
            doc.push_consult_answer(&answer, Utc::now());
            Ok(())
        })
        .await?;
        Ok(Some(answer))
    }

    pub async fn clear_consult(&self) -> Result<()> {
        self.update(|doc| {
            doc.clear_consult();
            Ok(())
        })
        .await
    }

    /// Ways to support the mother today, based on her current state.
    pub async fn father_tips(&self) -> String {
        let (mood, is_post, is_period) = {
            let state = self.state.read().await;
            let doc = &state.document;
            (doc.current_mood.clone(), doc.is_post_pregnant, doc.is_period_notified)
        };
        self.advice.father_tips(&mood, is_post, is_period).await
    }

    /// A featured recipe when `query` names one, otherwise a generated one.
    pub async fn meal(&self, query: &str) -> MealOutcome {
        if let Some(recipe) = featured_recipe(query) {
            return MealOutcome::Recipe(recipe);
        }
        let is_post = self.state.read().await.document.is_post_pregnant;
        self.advice.meal_menu(query, is_post).await
    }

    pub async fn meal_image(&self, title: &str) -> Option<String> {
        self.advice.meal_image(title).await
    }

    pub async fn article(&self, category: &str) -> Result<Guide> {
        let role = self.role().await?;
        Ok(self.advice.parenting_article(category, role).await)
    }

    /// `None` for a blank question or when no guide could be produced.
    pub async fn custom_guide(&self, question: &str) -> Result<Option<Guide>> {
        if question.trim().is_empty() {
            return Ok(None);
        }
        let role = self.role().await?;
        Ok(self.advice.custom_guide(question, role).await)
    }

    // ============================================================================
    // Partner messages, kicks, checkups
    // ============================================================================

    pub async fn send_partner_message(
        &self,
        kind: PartnerMessageKind,
        text: Option<&str>,
    ) -> Result<()> {
        let now = Utc::now();
        self.update(|doc| {
            doc.send_partner_message(kind, text, now);
            Ok(())
        })
        .await
    }

    /// Mother only. Returns whether the period notice is now on.
    pub async fn toggle_period(&self) -> Result<bool> {
        if self.role().await? != UserRole::Mother {
            return Err(GratiaError::InvalidInput(
                "only the mother can announce a period".to_string(),
            ));
        }
        let now = Utc::now();
        self.update(|doc| Ok(doc.toggle_period(now))).await
    }

    /// Returns today's kick count.
    pub async fn record_kick(&self) -> Result<u32> {
        let now = Utc::now();
        self.update(|doc| Ok(doc.record_kick(now))).await
    }

    pub async fn add_checkup(&self, checkup: NewCheckup) -> Result<CheckupEntry> {
        self.update(|doc| doc.add_checkup(checkup).cloned()).await
    }

    pub async fn delete_checkup(&self, id: &str) -> Result<bool> {
        self.update(|doc| Ok(doc.delete_checkup(id))).await
    }

    // ============================================================================
    // Photo journey and birth
    // ============================================================================

    pub async fn add_photo(
        &self,
        bytes: &[u8],
        mime_type: &str,
        phase: &str,
        caption: Option<&str>,
    ) -> Result<PhotoEntry> {
        let url = attachment::data_url(bytes, mime_type);
        let now = Utc::now();
        self.update(|doc| Ok(doc.add_photo(url, phase, caption, now).clone()))
            .await
    }

    pub async fn edit_photo(&self, id: &str, caption: &str, date: &str) -> Result<()> {
        self.update(|doc| doc.edit_photo(id, caption, date)).await
    }

    pub async fn confirm_birth(&self, birth_date: DateTime<Utc>) -> Result<()> {
        self.update(|doc| {
            doc.confirm_birth(birth_date);
            Ok(())
        })
        .await
    }

    pub async fn update_birth_date(&self, birth_date: DateTime<Utc>) -> Result<()> {
        self.update(|doc| {
            doc.update_birth_date(birth_date);
            Ok(())
        })
        .await
    }

    pub async fn pregnant_again(&self) -> Result<()> {
        let now = Utc::now();
        self.update(|doc| {
            doc.pregnant_again(now);
            Ok(())
        })
        .await
    }

    pub async fn update_child_info(
        &self,
        name: &str,
        nickname: &str,
        weeks: u32,
        days: u32,
    ) -> Result<()> {
        let now = Utc::now();
        self.update(|doc| doc.update_child_info(name, nickname, weeks, days, now))
            .await
    }

    pub async fn give_birth(&self, child_id: &str) -> Result<()> {
        let now = Utc::now();
        self.update(|doc| doc.give_birth(child_id, now)).await
    }

    // ============================================================================
    // Location
    // ============================================================================

    /// Publishes this context's position. A locator failure means "not
    /// sharing": nothing changes and `None` is returned.
    pub async fn share_location(&self) -> Result<Option<LocationData>> {
        let role = self.role().await?;
        let position = match self.locator.current_position().await {
            Ok(position) => position,
            Err(e) => {
                tracing::warn!(error = %e, "location unavailable, not sharing");
                return Ok(None);
            }
        };
        let now = Utc::now();
        self.update(|doc| {
            doc.set_location(role, position.latitude, position.longitude, now);
            Ok(doc.location_of(role).cloned())
        })
        .await
    }

    /// Last position the partner shared.
    pub async fn partner_location(&self) -> Result<Option<LocationData>> {
        let role = self.role().await?;
        let state = self.state.read().await;
        Ok(state.document.location_of(role.partner()).cloned())
    }
}

/// Fills in the role-specific parts of the onboarding answers.
fn onboarding_for(role: UserRole, mut data: OnboardingData) -> Result<OnboardingData> {
    data.user_name = data.user_name.trim().to_string();
    match role {
        UserRole::Mother => {
            let (name, nickname) = if data.is_currently_pregnant {
                (DEFAULT_CHILD_NAME, DEFAULT_CHILD_NICKNAME)
            } else {
                data.pregnancy_age_weeks = None;
                data.pregnancy_age_days = None;
                (BORN_CHILD_NAME, BORN_CHILD_NICKNAME)
            };
            data.pairing_code = Some(generate_pairing_code());
            data.child_name = non_blank(data.child_name).or_else(|| Some(name.to_string()));
            data.child_nickname =
                non_blank(data.child_nickname).or_else(|| Some(nickname.to_string()));
        }
        UserRole::Father => {
            let code = data
                .pairing_code
                .as_deref()
                .and_then(normalize_pairing_code)
                .ok_or_else(|| {
                    GratiaError::InvalidInput("a pairing code from the mother is required".into())
                })?;
            data.pairing_code = Some(code);
            data.child_name = None;
            data.child_nickname = None;
            data.pregnancy_age_weeks = None;
            data.pregnancy_age_days = None;
        }
    }
    Ok(data)
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
