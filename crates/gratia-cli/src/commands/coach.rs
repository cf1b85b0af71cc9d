//! AI coach subcommands. These never fail on a collaborator error; the
//! fallback text is printed instead.

use anyhow::Result;
use colored::Colorize;

use gratia_core::advice::MealOutcome;
use gratia_core::session::UserRole;

use super::context::AppContext;
use super::render;

pub async fn consult(ctx: &AppContext, question: Option<&str>, clear: bool) -> Result<()> {
    ctx.active_session().await?;
    if clear {
        ctx.usecase.clear_consult().await?;
        println!("Consult history cleared.");
        return Ok(());
    }
    if let Some(question) = question {
        println!("{}", "Thinking...".dimmed());
        ctx.usecase.consult(question).await?;
    }
    render::consult_history(&ctx.usecase.document().await);
    Ok(())
}

pub async fn tips(ctx: &AppContext) -> Result<()> {
    let session = ctx.active_session().await?;
    if session.role != UserRole::Father {
        println!("{}", "Tips are written for the father, showing them anyway.".dimmed());
    }
    render::heading("How to support her today");
    println!("{}", ctx.usecase.father_tips().await);
    Ok(())
}

pub async fn meal(ctx: &AppContext, query: &str, with_image: bool) -> Result<()> {
    ctx.active_session().await?;
    match ctx.usecase.meal(query).await {
        MealOutcome::Recipe(mut recipe) => {
            if with_image && recipe.image_url.is_none() {
                recipe.image_url = ctx.usecase.meal_image(&recipe.title).await;
            }
            render::recipe(&recipe);
        }
        outcome => {
            if let Some(message) = outcome.fallback_message() {
                println!("{}", message.yellow());
            }
        }
    }
    Ok(())
}

pub async fn article(ctx: &AppContext, category: &str) -> Result<()> {
    ctx.active_session().await?;
    let guide = ctx.usecase.article(category).await?;
    render::guide(&guide);
    Ok(())
}

pub async fn guide(ctx: &AppContext, question: &str) -> Result<()> {
    ctx.active_session().await?;
    match ctx.usecase.custom_guide(question).await? {
        Some(guide) => render::guide(&guide),
        None => println!("No guide could be written for that question. Try rephrasing it."),
    }
    Ok(())
}
