use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use pomoreward_core::error::Result;
use pomoreward_core::timer::TimerUpdate;
use pomoreward_core::{RewardStore, SharedTimer};

/// Shared by every handler: the one timer, the one reward store.
#[derive(Clone)]
pub struct AppState {
    pub timer: SharedTimer,
    rewards: Arc<Mutex<RewardStore>>,
    pub http: reqwest::Client,
}

impl AppState {
    pub fn new(timer: SharedTimer, rewards: RewardStore) -> Self {
        Self::with_http_client(timer, rewards, reqwest::Client::new())
    }

    /// Use `http` for photo downloads.
    pub fn with_http_client(timer: SharedTimer, rewards: RewardStore, http: reqwest::Client) -> Self {
        Self {
            timer,
            rewards: Arc::new(Mutex::new(rewards)),
            http,
        }
    }

    /// Lock the reward store. Never hold the guard across an `.await`.
    ///
    /// Lock order is rewards, then timer.
    pub fn rewards(&self) -> MutexGuard<'_, RewardStore> {
        self.rewards.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Poll the timer and, on a completed cycle, make sure a package exists.
    ///
    /// The store lock is held across both steps so a concurrent collect
    /// cannot reset the timer between the poll and package generation.
    pub fn poll_for_rewards(&self) -> Result<(TimerUpdate, bool)> {
        let mut store = self.rewards();
        let update = self.timer.poll();
        let package_ready = if update.snapshot.is_complete {
            store.ensure_package_for_completion()?.is_some()
        } else {
            false
        };
        Ok((update, package_ready))
    }

    /// Clear the current package and reset the timer as one step.
    pub fn collect_rewards(&self) -> Result<TimerUpdate> {
        let mut store = self.rewards();
        store.clear_current_package()?;
        Ok(self.timer.reset())
    }
}
