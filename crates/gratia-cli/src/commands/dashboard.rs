//! Subcommands that edit the shared document.

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use clap::Subcommand;
use colored::Colorize;
use std::path::PathBuf;

use gratia_core::shared::NewCheckup;
use gratia_core::shared::records::{CHILD_PHASES, PartnerMessageKind};
use gratia_interaction::attachment;

use super::context::AppContext;

#[derive(Debug, Subcommand)]
pub enum TaskAction {
    /// Add a shared task
    Add { text: String },
    /// Mark a task done or not done
    Toggle { id: String },
    Delete { id: String },
}

#[derive(Debug, Subcommand)]
pub enum CheckupAction {
    Add {
        #[arg(long)]
        doctor: String,
        #[arg(long)]
        hospital: String,
        /// Appointment date, e.g. 2026-11-02T09:30
        #[arg(long)]
        date: String,
        #[arg(long)]
        notes: Option<String>,
    },
    Delete { id: String },
}

#[derive(Debug, Subcommand)]
pub enum PhotoAction {
    /// Add an image file to the photo journey
    Add {
        file: PathBuf,
        /// Journey phase: "Birth" or a child phase such as "Pregnancy"
        #[arg(long, default_value = "Pregnancy")]
        phase: String,
        #[arg(long)]
        caption: Option<String>,
    },
    Edit {
        id: String,
        #[arg(long)]
        caption: String,
        /// YYYY-MM-DD
        #[arg(long)]
        date: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum BirthAction {
    /// The baby is born (defaults to today)
    Confirm { date: Option<String> },
    /// Correct the recorded birth date
    Date { date: String },
    /// Start a new pregnancy at four weeks
    Again,
    /// Update child names and pregnancy age
    Child {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        nickname: String,
        #[arg(long)]
        weeks: u32,
        #[arg(long, default_value_t = 0)]
        days: u32,
    },
    /// Mark a tracked child as born today
    Born { child_id: String },
}

#[derive(Debug, Subcommand)]
pub enum LocationAction {
    /// Publish your current position to your partner
    Share,
    /// Show where your partner last shared from
    Partner,
}

fn parse_day(value: &str) -> Result<DateTime<Utc>> {
    let day = NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .with_context(|| format!("'{value}' is not a YYYY-MM-DD date"))?;
    Ok(day
        .and_hms_opt(0, 0, 0)
        .context("midnight is always valid")?
        .and_utc())
}

pub async fn mood(ctx: &AppContext, mood: &str) -> Result<()> {
    ctx.active_session().await?;
    ctx.usecase.set_mood(mood).await?;
    println!("Mood set to {mood}");
    Ok(())
}

pub async fn journal(ctx: &AppContext, note: &str) -> Result<()> {
    ctx.active_session().await?;
    let advice = ctx.usecase.save_journal(note).await?;
    println!("{}", "Journal saved.".green());
    println!("{}", advice.italic());
    Ok(())
}

pub async fn analyze(ctx: &AppContext) -> Result<()> {
    ctx.active_session().await?;
    super::render::heading("Mood insights");
    println!("{}", ctx.usecase.analyze_moods().await?);
    Ok(())
}

pub async fn task(ctx: &AppContext, action: TaskAction) -> Result<()> {
    ctx.active_session().await?;
    match action {
        TaskAction::Add { text } => match ctx.usecase.add_task(&text).await? {
            Some(task) => println!("Added {} {}", task.text, task.id.dimmed()),
            None => println!("Nothing to add."),
        },
        TaskAction::Toggle { id } => {
            let done = ctx.usecase.toggle_task(&id).await?;
            println!("Task is now {}", if done { "done" } else { "open" });
        }
        TaskAction::Delete { id } => {
            if !ctx.usecase.delete_task(&id).await? {
                println!("No task {id}");
            }
        }
    }
    Ok(())
}

pub async fn chat(ctx: &AppContext, text: &str) -> Result<()> {
    ctx.active_session().await?;
    if ctx.usecase.send_chat(text).await?.is_none() {
        println!("Nothing to send.");
    }
    Ok(())
}

pub async fn message(ctx: &AppContext, kind: PartnerMessageKind, text: Option<&str>) -> Result<()> {
    ctx.active_session().await?;
    ctx.usecase.send_partner_message(kind, text).await?;
    println!("Sent a {kind} to your partner.");
    Ok(())
}

pub async fn period(ctx: &AppContext) -> Result<()> {
    ctx.active_session().await?;
    if ctx.usecase.toggle_period().await? {
        println!("Your partner has been told your period started.");
    } else {
        println!("Period notice turned off.");
    }
    Ok(())
}

pub async fn kick(ctx: &AppContext) -> Result<()> {
    ctx.active_session().await?;
    let count = ctx.usecase.record_kick().await?;
    println!("{count} kicks today");
    Ok(())
}

pub async fn checkup(ctx: &AppContext, action: CheckupAction) -> Result<()> {
    ctx.active_session().await?;
    match action {
        CheckupAction::Add {
            doctor,
            hospital,
            date,
            notes,
        } => {
            let entry = ctx
                .usecase
                .add_checkup(NewCheckup {
                    doctor_name: doctor,
                    hospital,
                    date,
                    notes,
                })
                .await?;
            println!("Checkup saved {}", entry.id.dimmed());
        }
        CheckupAction::Delete { id } => {
            if !ctx.usecase.delete_checkup(&id).await? {
                println!("No checkup {id}");
            }
        }
    }
    Ok(())
}

pub async fn photo(ctx: &AppContext, action: PhotoAction) -> Result<()> {
    ctx.active_session().await?;
    match action {
        PhotoAction::Add {
            file,
            phase,
            caption,
        } => {
            if phase != "Birth" && !CHILD_PHASES.contains(&phase.as_str()) {
                anyhow::bail!("Unknown phase '{phase}'. Use Birth or one of: {}", CHILD_PHASES.join(", "));
            }
            let image = attachment::read_image(&file).await?;
            let entry = ctx
                .usecase
                .add_photo(&image.bytes, &image.mime_type, &phase, caption.as_deref())
                .await?;
            println!("Added \"{}\" {}", entry.caption, entry.id.dimmed());
        }
        PhotoAction::Edit { id, caption, date } => {
            ctx.usecase.edit_photo(&id, &caption, &date).await?;
        }
    }
    Ok(())
}

pub async fn birth(ctx: &AppContext, action: BirthAction) -> Result<()> {
    ctx.active_session().await?;
    match action {
        BirthAction::Confirm { date } => {
            let date = match date {
                Some(value) => parse_day(&value)?,
                None => Utc::now(),
            };
            ctx.usecase.confirm_birth(date).await?;
            println!("{}", "Congratulations!".magenta().bold());
        }
        BirthAction::Date { date } => ctx.usecase.update_birth_date(parse_day(&date)?).await?,
        BirthAction::Again => ctx.usecase.pregnant_again().await?,
        BirthAction::Child {
            name,
            nickname,
            weeks,
            days,
        } => ctx.usecase.update_child_info(&name, &nickname, weeks, days).await?,
        BirthAction::Born { child_id } => ctx.usecase.give_birth(&child_id).await?,
    }
    Ok(())
}

pub async fn location(ctx: &AppContext, action: LocationAction) -> Result<()> {
    ctx.active_session().await?;
    match action {
        LocationAction::Share => match ctx.usecase.share_location().await? {
            Some(location) => println!("Sharing {}", location.map_link().underline()),
            None => println!("Location unavailable; set [location] in config.toml. Not sharing."),
        },
        LocationAction::Partner => match ctx.usecase.partner_location().await? {
            Some(location) => println!("{}", location.map_link().underline()),
            None => println!("Your partner is not sharing a location."),
        },
    }
    Ok(())
}
