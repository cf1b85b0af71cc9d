//! Terminal rendering of the shared document.

use chrono::Utc;
use colored::Colorize;

use gratia_core::advice::{Guide, Recipe};
use gratia_core::session::{LocalSession, UserRole};
use gratia_core::shared::SharedDocument;
use gratia_core::shared::pregnancy::{self, PregnancyDates};
use gratia_core::shared::records::SenderRole;

const RECENT: usize = 5;

pub fn heading(text: &str) {
    println!("\n{}", text.bold().underline());
}

pub fn dashboard(session: &LocalSession, doc: &SharedDocument) {
    let partner = doc.partner_name.as_deref().unwrap_or("(not joined yet)");
    println!(
        "{} {} ({}) paired with {}",
        "Gratia".magenta().bold(),
        doc.user_name.bold(),
        session.role.label(),
        partner.cyan()
    );
    println!("Pairing code: {}", doc.pairing_code.yellow());

    heading("Little one");
    println!(
        "{} \"{}\"",
        doc.child_name.as_deref().unwrap_or("-"),
        doc.child_nickname.as_deref().unwrap_or("-")
    );
    if doc.is_post_pregnant {
        println!("Born: {}", doc.birth_date.as_deref().unwrap_or("-"));
    } else if let (Some(start), Some(due)) = (
        pregnancy::parse_stored(&doc.pregnancy_start_date),
        pregnancy::parse_stored(&doc.expected_due_date),
    ) {
        let now = Utc::now();
        let (weeks, days) = pregnancy::age_on(start, now);
        let left = PregnancyDates { start, due }.days_until_due(now);
        println!(
            "Week {weeks} day {days}, due {} ({left} days to go)",
            due.format("%Y-%m-%d")
        );
    }

    heading("Mood");
    println!("Now: {}", doc.current_mood);
    for entry in doc.mood_history.iter().take(RECENT) {
        let note = entry.note.as_deref().unwrap_or("");
        println!("  {} {} {}", entry.date.dimmed(), entry.mood, note);
        if let Some(advice) = &entry.ai_advice {
            println!("    {}", advice.italic());
        }
    }
    if doc.is_period_notified {
        println!("{}", "Period notice is on".red());
    }

    heading("Tasks");
    for task in &doc.tasks {
        let mark = if task.completed { "[x]".green() } else { "[ ]".normal() };
        println!("  {mark} {} {}", task.text, task.id.dimmed());
    }

    heading("Chat");
    let skip = doc.chat_messages.len().saturating_sub(RECENT);
    for message in doc.chat_messages.iter().skip(skip) {
        let who = if doc.is_own_message(message) {
            "me".green()
        } else {
            message.sender_name.cyan()
        };
        println!("  {who}: {}", message.text);
    }

    heading("From your partner");
    for message in doc.partner_messages.iter().take(RECENT) {
        println!(
            "  {} {} {}",
            message.kind.to_string().magenta(),
            message.sender,
            message.text.as_deref().unwrap_or("")
        );
    }

    if let Some(kicks) = doc.kick_count_history.first() {
        heading("Kicks");
        println!("  {}: {}", kicks.date, kicks.count);
    }

    if !doc.checkups.is_empty() {
        heading("Checkups");
        for checkup in &doc.checkups {
            println!(
                "  {} {} at {} {}",
                checkup.date,
                checkup.doctor_name,
                checkup.hospital,
                checkup.id.dimmed()
            );
        }
    }

    if !doc.photo_journey.is_empty() {
        heading("Photo journey");
        for photo in &doc.photo_journey {
            println!("  [{}] {} {} {}", photo.phase, photo.date, photo.caption, photo.id.dimmed());
        }
    }

    let partner_role = session.role.partner();
    if let Some(location) = doc.location_of(partner_role) {
        heading("Partner location");
        println!("  {}", location.map_link().underline());
    }
}

pub fn consult_history(doc: &SharedDocument) {
    for message in &doc.ai_consult_history {
        let who = match message.sender_role {
            SenderRole::Ai => message.sender_name.magenta(),
            _ => message.sender_name.green(),
        };
        println!("{who}: {}", message.text);
    }
}

pub fn recipe(recipe: &Recipe) {
    heading(&recipe.title);
    println!("{}", "Ingredients".bold());
    for item in &recipe.ingredients {
        println!("  - {item}");
    }
    println!("{}", "Instructions".bold());
    for (n, step) in recipe.instructions.iter().enumerate() {
        println!("  {}. {step}", n + 1);
    }
    println!("{} {}", "Benefits:".bold(), recipe.benefits);
    if recipe.image_url.is_some() {
        println!("{}", "(illustration generated)".dimmed());
    }
}

pub fn guide(guide: &Guide) {
    heading(&guide.title);
    println!("{}", guide.content);
}

pub fn role_hint(role: UserRole) -> &'static str {
    match role {
        UserRole::Mother => "Next: `gratia onboard --name <you> [--weeks N --days N | --not-pregnant]`",
        UserRole::Father => "Next: `gratia onboard --name <you> --code <GRATIA-XXXX>`",
    }
}
