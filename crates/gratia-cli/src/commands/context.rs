//! Wires configuration, storage and collaborators into a [`SessionUsecase`].

use anyhow::{Context, Result, bail};
use std::path::PathBuf;
use std::sync::Arc;

use gratia_application::{SessionUsecase, SharedStateSynchronizer};
use gratia_core::advice::AdviceService;
use gratia_core::config::AppConfig;
use gratia_core::session::{LocalSession, SessionPhase};
use gratia_core::storage::ContextId;
use gratia_infrastructure::config_service::load_config;
use gratia_infrastructure::paths::GratiaPaths;
use gratia_infrastructure::{ChangeHub, FileStore, KvSessionRepository, NotifyingStore};
use gratia_interaction::{FixedLocator, GeminiAdviceService, GeminiApiAgent, UnconfiguredGenerator};

use super::logging;

/// Options shared by every subcommand.
#[derive(Debug, Clone, clap::Args)]
pub struct GlobalArgs {
    /// Path to config.toml (default: ~/.config/gratia/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Data directory holding the shared store and device profiles
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Device profile; two profiles on one machine act as two paired devices
    #[arg(long, global = true, default_value = "default")]
    pub profile: String,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,
}

pub struct AppContext {
    pub usecase: SessionUsecase,
    pub store: FileStore,
    pub hub: ChangeHub,
    pub config: AppConfig,
}

impl AppContext {
    /// Loads config, installs logging and restores the profile's session.
    pub async fn open(args: &GlobalArgs) -> Result<Self> {
        let defaults = GratiaPaths::new(None, None);
        let config_file = match &args.config {
            Some(path) => path.clone(),
            None => defaults.config_file()?,
        };
        let config = load_config(&config_file)?;
        logging::init(&config.logging, args.json_logs)?;

        let data_dir = args
            .data_dir
            .clone()
            .or_else(|| config.storage.data_dir.clone());
        let paths = GratiaPaths::new(None, data_dir);
        let store = FileStore::new(paths.store_dir()?);
        let profile_store = FileStore::new(paths.profile_dir(&args.profile)?);
        tracing::debug!(store = %store.dir().display(), profile = %args.profile, "opening gratia");

        let hub = ChangeHub::default();
        let notifying = NotifyingStore::new(Arc::new(store.clone()), hub.clone(), ContextId::generate());

        let usecase = SessionUsecase::new(
            Arc::new(KvSessionRepository::new(Arc::new(profile_store))),
            SharedStateSynchronizer::new(notifying),
            advice_service(&config),
            Arc::new(FixedLocator::from_settings(config.location.as_ref())),
        );
        usecase
            .restore()
            .await
            .context("Failed to restore session")?;

        Ok(Self {
            usecase,
            store,
            hub,
            config,
        })
    }

    /// The session, required to have finished onboarding.
    pub async fn active_session(&self) -> Result<LocalSession> {
        let phase = self.usecase.phase().await;
        if phase != SessionPhase::Active {
            bail!("No active session (phase: {phase}). Run `gratia role` and `gratia onboard` first.");
        }
        self.usecase
            .session()
            .await
            .context("Active phase without a session")
    }
}

fn advice_service(config: &AppConfig) -> Arc<dyn AdviceService> {
    match GeminiApiAgent::from_settings(&config.gemini) {
        Ok(agent) => Arc::new(GeminiAdviceService::new(Arc::new(agent))),
        Err(e) => {
            tracing::info!(reason = %e, "Gemini unavailable, AI features use fallbacks");
            Arc::new(GeminiAdviceService::new(Arc::new(UnconfiguredGenerator)))
        }
    }
}
