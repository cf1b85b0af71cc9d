//! Local mutations of the shared document.
//!
//! These are the edits both dashboards perform before saving. They are pure:
//! time and ids come in as arguments or from `uuid`, nothing touches storage.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::{GratiaError, Result};
use crate::session::UserRole;
use crate::shared::model::{DEFAULT_CHILD_NAME, DEFAULT_CHILD_NICKNAME, SharedDocument};
use crate::shared::pregnancy::{self, PregnancyDates};
use crate::shared::records::{
    ChatMessage, CheckupEntry, ChildStatus, KickCount, LocationData, MoodEntry, PartnerMessage,
    PartnerMessageKind, PhotoEntry, SenderRole, TaskItem,
};

pub const PERIOD_ANNOUNCEMENT: &str = "I'm starting my cycle today (Haid).";
pub const COACH_NAME: &str = "Gratia Coach";

/// Fields collected by the onboarding wizard.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OnboardingData {
    pub user_name: String,
    /// Father: the code typed in. Mother: ignored, a new code is generated.
    pub pairing_code: Option<String>,
    pub child_name: Option<String>,
    pub child_nickname: Option<String>,
    /// `Some` when currently pregnant.
    pub pregnancy_age_weeks: Option<u32>,
    pub pregnancy_age_days: Option<u32>,
    /// Mother flow only.
    pub is_currently_pregnant: bool,
}

/// New checkup appointment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewCheckup {
    pub doctor_name: String,
    pub hospital: String,
    pub date: String,
    pub notes: Option<String>,
}

fn day_of(now: DateTime<Utc>) -> String {
    now.format("%Y-%m-%d").to_string()
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

impl SharedDocument {
    /// Applies the onboarding answers. Dates are recomputed when a pregnancy
    /// age is given and cleared when the mother reports she is not pregnant.
    /// An out-of-range age fails before anything changes.
    pub fn apply_onboarding(&mut self, data: &OnboardingData, now: DateTime<Utc>) -> Result<()> {
        let dates = data
            .pregnancy_age_weeks
            .map(|weeks| {
                let days = data.pregnancy_age_days.unwrap_or(0);
                PregnancyDates::from_age(weeks, days, now).map(|dates| (weeks, days, dates))
            })
            .transpose()?;

        if let Some(code) = data.pairing_code.as_deref().filter(|c| !c.is_empty()) {
            self.pairing_code = code.to_string();
        }
        if !data.user_name.is_empty() {
            self.user_name = data.user_name.clone();
        }
        if let Some(name) = &data.child_name {
            self.child_name = Some(name.clone());
        }
        if let Some(nickname) = &data.child_nickname {
            self.child_nickname = Some(nickname.clone());
        }

        if let Some((weeks, days, dates)) = dates {
            self.pregnancy_age_weeks = Some(weeks);
            self.pregnancy_age_days = Some(days);
            self.pregnancy_start_date = dates.start.to_rfc3339();
            self.expected_due_date = dates.due.to_rfc3339();
        } else if data.child_name.is_some() {
            self.pregnancy_start_date = String::new();
            self.expected_due_date = String::new();
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Mood journal
    // ------------------------------------------------------------------

    /// Today's journal entry, if any.
    pub fn today_mood(&self, now: DateTime<Utc>) -> Option<&MoodEntry> {
        let today = day_of(now);
        self.mood_history.iter().find(|entry| entry.date == today)
    }

    fn upsert_today(&mut self, entry: MoodEntry) {
        self.mood_history.retain(|existing| existing.date != entry.date);
        self.mood_history.insert(0, entry);
    }

    /// Sets the current mood and records it on today's entry, keeping any
    /// note and advice already written today.
    pub fn set_mood(&mut self, mood: &str, now: DateTime<Utc>) {
        let existing = self.today_mood(now).cloned();
        self.current_mood = mood.to_string();
        self.upsert_today(MoodEntry {
            date: day_of(now),
            mood: mood.to_string(),
            note: existing.as_ref().and_then(|e| e.note.clone()),
            ai_advice: existing.and_then(|e| e.ai_advice),
        });
    }

    /// Writes the journal note on today's entry and returns the saved entry.
    pub fn save_journal(&mut self, note: &str, now: DateTime<Utc>) -> MoodEntry {
        let existing = self.today_mood(now).cloned();
        let entry = MoodEntry {
            date: day_of(now),
            mood: existing
                .as_ref()
                .map(|e| e.mood.clone())
                .unwrap_or_else(|| self.current_mood.clone()),
            note: Some(note.to_string()).filter(|n| !n.is_empty()),
            ai_advice: existing.and_then(|e| e.ai_advice),
        };
        self.upsert_today(entry.clone());
        entry
    }

    /// Attaches AI advice to the entry for `date`.
    pub fn attach_mood_advice(&mut self, date: &str, advice: &str) {
        if let Some(entry) = self.mood_history.iter_mut().find(|e| e.date == date) {
            entry.ai_advice = Some(advice.to_string());
        }
    }

    // ------------------------------------------------------------------
    // Tasks
    // ------------------------------------------------------------------

    pub fn add_task(&mut self, text: &str) -> Option<&TaskItem> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        self.tasks.push(TaskItem {
            id: new_id(),
            text: text.to_string(),
            completed: false,
        });
        self.tasks.last()
    }

    pub fn toggle_task(&mut self, id: &str) -> Result<bool> {
        let task = self
            .tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| GratiaError::not_found("task", id))?;
        task.completed = !task.completed;
        Ok(task.completed)
    }

    pub fn delete_task(&mut self, id: &str) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        self.tasks.len() != before
    }

    // ------------------------------------------------------------------
    // Chat and AI consult
    // ------------------------------------------------------------------

    /// Appends a chat line attributed to the local writer.
    pub fn send_chat(&mut self, role: UserRole, text: &str, now: DateTime<Utc>) -> Option<&ChatMessage> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        let message = ChatMessage {
            id: new_id(),
            sender_role: role.into(),
            sender_name: self.user_name.clone(),
            text: text.to_string(),
            timestamp: now.to_rfc3339(),
        };
        self.chat_messages.push(message);
        self.chat_messages.last()
    }

    /// True when the chat line was written by this context's user.
    pub fn is_own_message(&self, message: &ChatMessage) -> bool {
        message.sender_name == self.user_name
    }

    pub fn push_consult_question(&mut self, role: UserRole, text: &str, now: DateTime<Utc>) {
        self.ai_consult_history.push(ChatMessage {
            id: new_id(),
            sender_role: role.into(),
            sender_name: self.user_name.clone(),
            text: text.to_string(),
            timestamp: now.to_rfc3339(),
        });
    }

    pub fn push_consult_answer(&mut self, text: &str, now: DateTime<Utc>) {
        self.ai_consult_history.push(ChatMessage {
            id: new_id(),
            sender_role: SenderRole::Ai,
            sender_name: COACH_NAME.to_string(),
            text: text.to_string(),
            timestamp: now.to_rfc3339(),
        });
    }

    pub fn clear_consult(&mut self) {
        self.ai_consult_history.clear();
    }

    // ------------------------------------------------------------------
    // Partner messages
    // ------------------------------------------------------------------

    pub fn send_partner_message(
        &mut self,
        kind: PartnerMessageKind,
        text: Option<&str>,
        now: DateTime<Utc>,
    ) {
        self.partner_messages.insert(
            0,
            PartnerMessage {
                id: new_id(),
                kind,
                text: text.map(str::to_string),
                sender: self.user_name.clone(),
                timestamp: now.to_rfc3339(),
            },
        );
    }

    /// Flips the period notice. Turning it on also notifies the partner.
    pub fn toggle_period(&mut self, now: DateTime<Utc>) -> bool {
        if self.is_period_notified {
            self.is_period_notified = false;
        } else {
            self.send_partner_message(PartnerMessageKind::Period, Some(PERIOD_ANNOUNCEMENT), now);
            self.is_period_notified = true;
            self.period_announced_at = Some(now.to_rfc3339());
        }
        self.is_period_notified
    }

    // ------------------------------------------------------------------
    // Kicks and checkups
    // ------------------------------------------------------------------

    /// Counts one kick for today and returns today's total.
    pub fn record_kick(&mut self, now: DateTime<Utc>) -> u32 {
        let today = day_of(now);
        if let Some(entry) = self.kick_count_history.iter_mut().find(|k| k.date == today) {
            entry.count += 1;
            return entry.count;
        }
        self.kick_count_history.insert(0, KickCount { date: today, count: 1 });
        1
    }

    pub fn add_checkup(&mut self, checkup: NewCheckup) -> Result<&CheckupEntry> {
        if checkup.doctor_name.trim().is_empty()
            || checkup.hospital.trim().is_empty()
            || checkup.date.trim().is_empty()
        {
            return Err(GratiaError::InvalidInput(
                "checkup needs a doctor, a hospital and a date".to_string(),
            ));
        }
        self.checkups.insert(
            0,
            CheckupEntry {
                id: new_id(),
                doctor_name: checkup.doctor_name,
                hospital: checkup.hospital,
                date: checkup.date,
                notes: checkup.notes.filter(|n| !n.is_empty()),
            },
        );
        Ok(&self.checkups[0])
    }

    pub fn delete_checkup(&mut self, id: &str) -> bool {
        let before = self.checkups.len();
        self.checkups.retain(|c| c.id != id);
        self.checkups.len() != before
    }

    // ------------------------------------------------------------------
    // Photo journal
    // ------------------------------------------------------------------

    pub fn add_photo(
        &mut self,
        data_url: String,
        phase: &str,
        caption: Option<&str>,
        now: DateTime<Utc>,
    ) -> &PhotoEntry {
        let caption = caption.map(str::to_string).unwrap_or_else(|| {
            if phase == "Birth" {
                "The day our lives changed forever".to_string()
            } else {
                "Beautiful memory".to_string()
            }
        });
        self.photo_journey.push(PhotoEntry {
            id: format!("photo-{}", new_id()),
            url: data_url,
            caption,
            date: day_of(now),
            phase: phase.to_string(),
        });
        &self.photo_journey[self.photo_journey.len() - 1]
    }

    pub fn edit_photo(&mut self, id: &str, caption: &str, date: &str) -> Result<()> {
        let photo = self
            .photo_journey
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| GratiaError::not_found("photo", id))?;
        photo.caption = caption.to_string();
        photo.date = date.to_string();
        Ok(())
    }

    // ------------------------------------------------------------------
    // Birth and child info
    // ------------------------------------------------------------------

    pub fn confirm_birth(&mut self, birth_date: DateTime<Utc>) {
        self.is_post_pregnant = true;
        self.birth_date = Some(birth_date.to_rfc3339());
    }

    pub fn update_birth_date(&mut self, birth_date: DateTime<Utc>) {
        self.birth_date = Some(birth_date.to_rfc3339());
    }

    /// Starts a new pregnancy at four weeks.
    pub fn pregnant_again(&mut self, now: DateTime<Utc>) {
        self.is_post_pregnant = false;
        self.expected_due_date = pregnancy::nine_months_from(now).to_rfc3339();
        self.birth_date = None;
        self.pregnancy_age_weeks = Some(4);
        self.pregnancy_age_days = Some(0);
    }

    pub fn update_child_info(
        &mut self,
        name: &str,
        nickname: &str,
        weeks: u32,
        days: u32,
        now: DateTime<Utc>,
    ) -> Result<()> {
        let dates = PregnancyDates::from_age(weeks, days, now)?;
        self.child_name = Some(name.to_string())
            .filter(|n| !n.is_empty())
            .or_else(|| Some(DEFAULT_CHILD_NAME.to_string()));
        self.child_nickname = Some(nickname.to_string())
            .filter(|n| !n.is_empty())
            .or_else(|| Some(DEFAULT_CHILD_NICKNAME.to_string()));
        self.pregnancy_age_weeks = Some(weeks);
        self.pregnancy_age_days = Some(days);
        self.pregnancy_start_date = dates.start.to_rfc3339();
        self.expected_due_date = dates.due.to_rfc3339();
        self.is_post_pregnant = false;
        Ok(())
    }

    /// Marks a tracked child as born today.
    pub fn give_birth(&mut self, child_id: &str, now: DateTime<Utc>) -> Result<()> {
        let child = self
            .children
            .as_mut()
            .and_then(|children| children.iter_mut().find(|c| c.id == child_id))
            .ok_or_else(|| GratiaError::not_found("child", child_id))?;
        child.status = ChildStatus::Born;
        child.date = day_of(now);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Location
    // ------------------------------------------------------------------

    /// Publishes `role`'s position and marks it as sharing.
    pub fn set_location(&mut self, role: UserRole, lat: f64, lng: f64, now: DateTime<Utc>) {
        let location = LocationData {
            lat,
            lng,
            last_updated: Some(now.to_rfc3339()),
        };
        match role {
            UserRole::Mother => {
                self.is_mother_location_sharing = true;
                self.mother_location = Some(location);
            }
            UserRole::Father => {
                self.is_father_location_sharing = true;
                self.father_location = Some(location);
            }
        }
    }

    /// Last position shared by `role`.
    pub fn location_of(&self, role: UserRole) -> Option<&LocationData> {
        match role {
            UserRole::Mother => self.mother_location.as_ref(),
            UserRole::Father => self.father_location.as_ref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 5, 10, 9, 30, 0).unwrap()
    }

    fn named(name: &str) -> SharedDocument {
        SharedDocument {
            user_name: name.to_string(),
            pairing_code: "G-1".to_string(),
            ..SharedDocument::initial(now())
        }
    }

    #[test]
    fn test_onboarding_mother_pregnant() {
        let mut doc = SharedDocument::initial(now());
        doc.apply_onboarding(
            &OnboardingData {
                user_name: "Ana".into(),
                pairing_code: Some("GRATIA-AB12".into()),
                child_name: Some("Little One".into()),
                child_nickname: Some("Sunshine".into()),
                pregnancy_age_weeks: Some(10),
                pregnancy_age_days: Some(2),
                is_currently_pregnant: true,
            },
            now(),
        )
        .unwrap();
        assert_eq!(doc.pairing_code, "GRATIA-AB12");
        assert_eq!(doc.user_name, "Ana");
        let start = pregnancy::parse_stored(&doc.pregnancy_start_date).unwrap();
        let due = pregnancy::parse_stored(&doc.expected_due_date).unwrap();
        assert_eq!((now() - start).num_days(), 72);
        assert_eq!((due - start).num_days(), pregnancy::TERM_DAYS);
    }

    #[test]
    fn test_onboarding_mother_not_pregnant_clears_dates() {
        let mut doc = SharedDocument::initial(now());
        doc.apply_onboarding(
            &OnboardingData {
                user_name: "Ana".into(),
                pairing_code: Some("GRATIA-AB12".into()),
                child_name: Some("My Child".into()),
                child_nickname: Some("Kiddo".into()),
                ..Default::default()
            },
            now(),
        )
        .unwrap();
        assert!(doc.pregnancy_start_date.is_empty());
        assert!(doc.expected_due_date.is_empty());
    }

    #[test]
    fn test_onboarding_father_keeps_dates() {
        let mut doc = SharedDocument::initial(now());
        let before = doc.expected_due_date.clone();
        doc.apply_onboarding(
            &OnboardingData {
                user_name: "Ben".into(),
                pairing_code: Some("GRATIA-AB12".into()),
                ..Default::default()
            },
            now(),
        )
        .unwrap();
        assert_eq!(doc.expected_due_date, before);
        assert_eq!(doc.user_name, "Ben");
    }

    #[test]
    fn test_mood_and_journal_share_todays_entry() {
        let mut doc = named("Ana");
        doc.save_journal("slept badly", now());
        doc.attach_mood_advice("2026-05-10", "rest");
        doc.set_mood("😴 Tired", now());
        assert_eq!(doc.mood_history.len(), 1);
        let entry = &doc.mood_history[0];
        assert_eq!(entry.mood, "😴 Tired");
        assert_eq!(entry.note.as_deref(), Some("slept badly"));
        assert_eq!(entry.ai_advice.as_deref(), Some("rest"));

        doc.set_mood("😊 Happy", now() + Duration::days(1));
        assert_eq!(doc.mood_history.len(), 2);
        assert_eq!(doc.mood_history[0].date, "2026-05-11");
    }

    #[test]
    fn test_tasks() {
        let mut doc = named("Ana");
        assert!(doc.add_task("   ").is_none());
        let id = doc.add_task("Buy diapers").unwrap().id.clone();
        assert!(doc.toggle_task(&id).unwrap());
        assert!(!doc.toggle_task(&id).unwrap());
        assert!(doc.toggle_task("missing").unwrap_err().is_not_found());
        assert!(doc.delete_task(&id));
        assert!(doc.tasks.is_empty());
    }

    #[test]
    fn test_chat_attribution() {
        let mut doc = named("Ben");
        let message = doc.send_chat(UserRole::Father, "On my way", now()).unwrap().clone();
        assert_eq!(message.sender_role, SenderRole::Father);
        assert!(doc.is_own_message(&message));
        assert!(doc.send_chat(UserRole::Father, "", now()).is_none());
    }

    #[test]
    fn test_consult_history() {
        let mut doc = named("Ana");
        doc.push_consult_question(UserRole::Mother, "Is spicy food ok?", now());
        doc.push_consult_answer("In moderation.", now());
        assert_eq!(doc.ai_consult_history.len(), 2);
        assert_eq!(doc.ai_consult_history[1].sender_name, COACH_NAME);
        doc.clear_consult();
        assert!(doc.ai_consult_history.is_empty());
    }

    #[test]
    fn test_toggle_period_notifies_partner_once() {
        let mut doc = named("Ana");
        assert!(doc.toggle_period(now()));
        assert_eq!(doc.partner_messages.len(), 1);
        assert_eq!(doc.partner_messages[0].kind, PartnerMessageKind::Period);
        assert_eq!(doc.partner_messages[0].text.as_deref(), Some(PERIOD_ANNOUNCEMENT));
        assert!(!doc.toggle_period(now()));
        assert_eq!(doc.partner_messages.len(), 1);
    }

    #[test]
    fn test_partner_messages_newest_first() {
        let mut doc = named("Ben");
        doc.send_partner_message(PartnerMessageKind::Hug, None, now());
        doc.send_partner_message(PartnerMessageKind::Custom, Some("Proud of you"), now());
        assert_eq!(doc.partner_messages[0].kind, PartnerMessageKind::Custom);
        assert_eq!(doc.partner_messages[0].sender, "Ben");
    }

    #[test]
    fn test_record_kick() {
        let mut doc = named("Ben");
        assert_eq!(doc.record_kick(now()), 1);
        assert_eq!(doc.record_kick(now()), 2);
        assert_eq!(doc.record_kick(now() + Duration::days(1)), 1);
        assert_eq!(doc.kick_count_history.len(), 2);
        assert_eq!(doc.kick_count_history[0].date, "2026-05-11");
    }

    #[test]
    fn test_checkups() {
        let mut doc = named("Ana");
        assert!(doc.add_checkup(NewCheckup::default()).is_err());
        let id = doc
            .add_checkup(NewCheckup {
                doctor_name: "Dr. Rina".into(),
                hospital: "RS Bunda".into(),
                date: "2026-05-20T10:00".into(),
                notes: Some(String::new()),
            })
            .unwrap()
            .id
            .clone();
        assert!(doc.checkups[0].notes.is_none());
        assert!(doc.delete_checkup(&id));
        assert!(!doc.delete_checkup(&id));
    }

    #[test]
    fn test_photos() {
        let mut doc = named("Ana");
        let id = doc
            .add_photo("data:image/png;base64,AAAA".into(), "Birth", None, now())
            .id
            .clone();
        assert!(id.starts_with("photo-"));
        assert_eq!(doc.photo_journey[0].caption, "The day our lives changed forever");
        doc.edit_photo(&id, "Hello world", "2026-05-01").unwrap();
        assert_eq!(doc.photo_journey[0].caption, "Hello world");
        assert!(doc.edit_photo("nope", "", "").is_err());
    }

    #[test]
    fn test_birth_cycle() {
        let mut doc = named("Ana");
        doc.confirm_birth(now());
        assert!(doc.is_post_pregnant);
        assert!(doc.birth_date.is_some());
        doc.pregnant_again(now());
        assert!(!doc.is_post_pregnant);
        assert!(doc.birth_date.is_none());
        assert_eq!(doc.pregnancy_age_weeks, Some(4));
        doc.update_child_info("", "", 6, 1, now()).unwrap();
        assert_eq!(doc.child_name.as_deref(), Some(DEFAULT_CHILD_NAME));
        assert_eq!(doc.pregnancy_age_days, Some(1));
    }

    #[test]
    fn test_out_of_range_age_leaves_document_untouched() {
        let mut doc = named("Ana");
        let before = doc.clone();
        let err = doc
            .apply_onboarding(
                &OnboardingData {
                    user_name: "Someone".into(),
                    pregnancy_age_weeks: Some(u32::MAX),
                    is_currently_pregnant: true,
                    ..Default::default()
                },
                now(),
            )
            .unwrap_err();
        assert!(matches!(err, GratiaError::InvalidInput(_)));
        assert!(doc.update_child_info("Kai", "", u32::MAX, 0, now()).is_err());
        assert_eq!(doc, before);
    }

    #[test]
    fn test_give_birth() {
        use crate::shared::records::ChildInfo;
        let mut doc = named("Ana");
        doc.children = Some(vec![ChildInfo {
            id: "c1".into(),
            name: "Mika".into(),
            nickname: "Mi".into(),
            status: ChildStatus::Expecting,
            date: "2026-09-01".into(),
        }]);
        doc.give_birth("c1", now()).unwrap();
        let child = &doc.children.as_ref().unwrap()[0];
        assert_eq!(child.status, ChildStatus::Born);
        assert_eq!(child.date, "2026-05-10");
        assert!(doc.give_birth("c2", now()).is_err());
    }

    #[test]
    fn test_set_location_by_role() {
        let mut doc = named("Ben");
        doc.set_location(UserRole::Father, 1.5, 2.5, now());
        assert!(doc.is_father_location_sharing);
        assert!(!doc.is_mother_location_sharing);
        assert_eq!(doc.location_of(UserRole::Father).unwrap().lat, 1.5);
        assert!(doc.location_of(UserRole::Mother).is_none());
    }
}
