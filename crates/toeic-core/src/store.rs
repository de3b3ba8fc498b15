//! State store for the tracker
//!
//! Owns the [`AppState`] and persists it through a [`Repository`] after
//! every successful mutation. Persistence is best effort: a failed write
//! is logged and the in-memory state is kept.

use crate::repository::{JsonFileRepository, PersistedState, Repository, STATE_VERSION};
use crate::{AppState, Config, Result};
use chrono::Utc;
use std::path::Path;

pub struct Store<R: Repository> {
    repo: R,
    state: AppState,
    defaults: AppState,
}

impl<R: Repository> Store<R> {
    /// Open the store, reading the persisted blob once
    ///
    /// A missing, unreadable or foreign-version blob yields `defaults`.
    pub fn open(repo: R, defaults: AppState) -> Self {
        let state = match repo.load() {
            Ok(Some(blob)) if blob.version == STATE_VERSION => blob.state,
            Ok(Some(blob)) => {
                tracing::warn!(
                    "Ignoring stored state with unsupported version {} (expected {})",
                    blob.version,
                    STATE_VERSION
                );
                defaults.clone()
            }
            Ok(None) => defaults.clone(),
            Err(e) => {
                tracing::warn!("Could not read stored state, starting from defaults: {}", e);
                defaults.clone()
            }
        };

        Self {
            repo,
            state,
            defaults,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// The dataset `reset` restores
    pub fn defaults(&self) -> &AppState {
        &self.defaults
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Run a mutation against the state and persist it
    ///
    /// Nothing is written when the mutation fails; the state methods leave
    /// the state untouched on error.
    pub fn mutate<T, F>(&mut self, f: F) -> Result<T>
    where
        F: FnOnce(&mut AppState) -> Result<T>,
    {
        let out = f(&mut self.state)?;
        self.persist();
        Ok(out)
    }

    /// Replace the whole state with the default dataset
    pub fn reset(&mut self) {
        self.state = self.defaults.clone();
        self.persist();
    }

    fn persist(&self) {
        let blob = PersistedState::new(self.state.clone());
        match self.repo.save(&blob) {
            Ok(()) => tracing::debug!("State persisted"),
            Err(e) => tracing::warn!("Failed to persist state: {}", e),
        }
    }
}

impl Store<JsonFileRepository> {
    /// Open the file-backed store in `dir`, building defaults from `config`
    pub fn open_in(dir: &Path, config: &Config) -> Self {
        let decks = crate::seed::load_decks(config.seed_path.as_deref());
        let defaults = AppState::default_dataset(config.default_goal, decks, Utc::now());
        Self::open(JsonFileRepository::in_dir(dir), defaults)
    }
}
