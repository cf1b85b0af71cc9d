use anyhow::Result;
use colored::Colorize;

use gratia_core::session::{SessionPhase, UserRole};
use gratia_core::shared::OnboardingData;

use super::context::AppContext;
use super::render;

pub async fn select_role(ctx: &AppContext, role: UserRole) -> Result<()> {
    let session = ctx.usecase.select_role(role).await?;
    println!("You are the {} ({})", role.label().bold(), session.id.dimmed());
    println!("{}", render::role_hint(role));
    Ok(())
}

#[derive(Debug, Clone, clap::Args)]
pub struct OnboardArgs {
    /// Your display name
    #[arg(long)]
    pub name: String,
    /// Pairing code shared by the mother (father only)
    #[arg(long)]
    pub code: Option<String>,
    #[arg(long)]
    pub child_name: Option<String>,
    #[arg(long)]
    pub child_nickname: Option<String>,
    /// Current pregnancy age in weeks
    #[arg(long)]
    pub weeks: Option<u32>,
    #[arg(long, requires = "weeks")]
    pub days: Option<u32>,
    /// The child is already born (mother only)
    #[arg(long, conflicts_with_all = ["weeks", "days"])]
    pub not_pregnant: bool,
}

pub async fn onboard(ctx: &AppContext, args: OnboardArgs) -> Result<()> {
    if ctx.usecase.phase().await == SessionPhase::RoleChosen {
        ctx.usecase.begin_onboarding().await?;
    }
    let is_currently_pregnant = !args.not_pregnant;
    let data = OnboardingData {
        user_name: args.name,
        pairing_code: args.code,
        child_name: args.child_name,
        child_nickname: args.child_nickname,
        pregnancy_age_weeks: args.weeks.or(is_currently_pregnant.then_some(0)),
        pregnancy_age_days: args.days,
        is_currently_pregnant,
    };
    let session = ctx.usecase.finish_onboarding(data).await?;
    let code = session.pairing_code.unwrap_or_default();
    match session.role {
        UserRole::Mother => println!(
            "Welcome! Share this code with your partner: {}",
            code.yellow().bold()
        ),
        UserRole::Father => {
            let doc = ctx.usecase.document().await;
            match doc.partner_name {
                Some(partner) => println!("Paired with {} on {}", partner.cyan(), code.yellow()),
                None => println!("Joined {}; your partner's data will appear once saved", code.yellow()),
            }
        }
    }
    Ok(())
}

pub async fn show(ctx: &AppContext, json: bool) -> Result<()> {
    let phase = ctx.usecase.phase().await;
    let Some(session) = ctx.usecase.session().await else {
        println!("Not signed in. Run `gratia role mother` or `gratia role father`.");
        return Ok(());
    };
    if phase != SessionPhase::Active {
        println!("Role {} chosen, onboarding pending.", session.role.label());
        println!("{}", render::role_hint(session.role));
        return Ok(());
    }
    let doc = ctx.usecase.document().await;
    if json {
        println!("{}", serde_json::to_string_pretty(&doc)?);
    } else {
        render::dashboard(&session, &doc);
    }
    Ok(())
}

pub async fn logout(ctx: &AppContext) -> Result<()> {
    ctx.usecase.logout().await?;
    println!("Signed out.");
    Ok(())
}
