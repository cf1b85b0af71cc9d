use anyhow::Result;
use clap::{Parser, Subcommand};

use gratia_core::session::UserRole;
use gratia_core::shared::records::PartnerMessageKind;

mod commands;

use commands::context::{AppContext, GlobalArgs};
use commands::dashboard::{BirthAction, CheckupAction, LocationAction, PhotoAction, TaskAction};
use commands::session::OnboardArgs;
use commands::{coach, dashboard, session, watch};

#[derive(Parser)]
#[command(name = "gratia")]
#[command(about = "Gratia - a shared pregnancy and parenting companion for two", long_about = None)]
struct Cli {
    #[command(flatten)]
    globals: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Choose who you are on this device (mother or father)
    Role { role: UserRole },
    /// Finish setting up and pair with your partner
    Onboard(OnboardArgs),
    /// Show the shared dashboard
    Show {
        /// Print the raw shared document
        #[arg(long)]
        json: bool,
    },
    /// Set your current mood, e.g. "😴 Tired"
    Mood { mood: String },
    /// Write a journal note and get a short piece of advice
    Journal { note: String },
    /// Summarize the mood history
    Analyze,
    Task {
        #[command(subcommand)]
        action: TaskAction,
    },
    /// Send a chat message to your partner
    Chat { text: String },
    /// Ask the AI coach, or show the conversation so far
    Consult {
        question: Option<String>,
        #[arg(long, conflicts_with = "question")]
        clear: bool,
    },
    /// Ideas for supporting the mother today
    Tips,
    /// A recipe suggestion for the given meal or ingredient
    Meal {
        query: String,
        /// Also generate a picture of the dish
        #[arg(long)]
        image: bool,
    },
    /// A short parenting article on a topic
    Article { category: String },
    /// A step-by-step guide answering your question
    Guide { question: String },
    /// Count a baby kick
    Kick,
    Checkup {
        #[command(subcommand)]
        action: CheckupAction,
    },
    Photo {
        #[command(subcommand)]
        action: PhotoAction,
    },
    Birth {
        #[command(subcommand)]
        action: BirthAction,
    },
    /// Send a hug, love, flower, cheer or custom message
    Message {
        kind: PartnerMessageKind,
        text: Option<String>,
    },
    /// Toggle the period notice (mother only)
    Period,
    Location {
        #[command(subcommand)]
        action: LocationAction,
    },
    /// Follow your partner's changes live
    Watch,
    /// Sign out on this device; the shared document is kept
    Logout,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let ctx = AppContext::open(&cli.globals).await?;

    match cli.command {
        Commands::Role { role } => session::select_role(&ctx, role).await?,
        Commands::Onboard(args) => session::onboard(&ctx, args).await?,
        Commands::Show { json } => session::show(&ctx, json).await?,
        Commands::Mood { mood } => dashboard::mood(&ctx, &mood).await?,
        Commands::Journal { note } => dashboard::journal(&ctx, &note).await?,
        Commands::Analyze => dashboard::analyze(&ctx).await?,
        Commands::Task { action } => dashboard::task(&ctx, action).await?,
        Commands::Chat { text } => dashboard::chat(&ctx, &text).await?,
        Commands::Consult { question, clear } => {
            coach::consult(&ctx, question.as_deref(), clear).await?
        }
        Commands::Tips => coach::tips(&ctx).await?,
        Commands::Meal { query, image } => coach::meal(&ctx, &query, image).await?,
        Commands::Article { category } => coach::article(&ctx, &category).await?,
        Commands::Guide { question } => coach::guide(&ctx, &question).await?,
        Commands::Kick => dashboard::kick(&ctx).await?,
        Commands::Checkup { action } => dashboard::checkup(&ctx, action).await?,
        Commands::Photo { action } => dashboard::photo(&ctx, action).await?,
        Commands::Birth { action } => dashboard::birth(&ctx, action).await?,
        Commands::Message { kind, text } => dashboard::message(&ctx, kind, text.as_deref()).await?,
        Commands::Period => dashboard::period(&ctx).await?,
        Commands::Location { action } => dashboard::location(&ctx, action).await?,
        Commands::Watch => watch::run(&ctx).await?,
        Commands::Logout => session::logout(&ctx).await?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parses_role_and_profile() {
        let cli = Cli::try_parse_from(["gratia", "--profile", "dad", "role", "father"]).unwrap();
        assert_eq!(cli.globals.profile, "dad");
        assert!(matches!(cli.command, Commands::Role { role: UserRole::Father }));
    }

    #[test]
    fn test_parses_partner_message() {
        let cli = Cli::try_parse_from(["gratia", "message", "hug"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Message { kind: PartnerMessageKind::Hug, text: None }
        ));
    }

    #[test]
    fn test_days_require_weeks() {
        assert!(Cli::try_parse_from(["gratia", "onboard", "--name", "Ana", "--days", "3"]).is_err());
    }
}
