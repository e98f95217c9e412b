//! Acquisition Coordinator
//!
//! Drives the four-stage workflow and publishes every transition as an
//! [`AcquisitionSnapshot`] on a watch channel. Only the coordinator writes
//! the snapshot and the session identity; any number of readers subscribe.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::error::AcquisitionError;
use super::state::{AcquisitionState, Stage};
use super::step::{LoadingSteps, StepStatus};
use crate::config::TimingsConfig;
use crate::core_types::{GameId, UserContext};
use crate::session::SessionIdentity;
use crate::upstream::InventoryService;

/// Everything the progress surface and the inventory page need to render
#[derive(Debug, Clone, PartialEq)]
pub struct AcquisitionSnapshot {
    /// Id of the run allowed to write; bumped by `run` and `reset`
    pub run_id: u64,
    pub state: AcquisitionState,
    pub steps: LoadingSteps,
    pub last_error: Option<AcquisitionError>,
    /// A run is in flight
    pub is_loading: bool,
    pub progress_open: bool,
    /// Inventory ready for display
    pub inventory_visible: bool,
}

impl Default for AcquisitionSnapshot {
    fn default() -> Self {
        Self {
            run_id: 0,
            state: AcquisitionState::Idle,
            steps: LoadingSteps::new(),
            last_error: None,
            is_loading: false,
            progress_open: false,
            inventory_visible: false,
        }
    }
}

/// Acquisition Coordinator - orchestrates the staged workflow
pub struct AcquisitionCoordinator {
    service: Arc<dyn InventoryService>,
    session: Arc<SessionIdentity>,
    timings: TimingsConfig,
    snapshot: watch::Sender<AcquisitionSnapshot>,
    next_run_id: AtomicU64,
}

impl AcquisitionCoordinator {
    pub fn new(
        service: Arc<dyn InventoryService>,
        session: Arc<SessionIdentity>,
        timings: TimingsConfig,
    ) -> Self {
        let (snapshot, _) = watch::channel(AcquisitionSnapshot::default());
        Self {
            service,
            session,
            timings,
            snapshot,
            next_run_id: AtomicU64::new(1),
        }
    }

    /// Receive every published snapshot
    pub fn subscribe(&self) -> watch::Receiver<AcquisitionSnapshot> {
        self.snapshot.subscribe()
    }

    /// Copy of the current snapshot
    pub fn snapshot(&self) -> AcquisitionSnapshot {
        self.snapshot.borrow().clone()
    }

    pub fn state(&self) -> AcquisitionState {
        self.snapshot.borrow().state
    }

    pub fn steps(&self) -> LoadingSteps {
        self.snapshot.borrow().steps.clone()
    }

    pub fn is_ready(&self) -> bool {
        self.snapshot.borrow().inventory_visible
    }

    pub fn is_loading(&self) -> bool {
        self.snapshot.borrow().is_loading
    }

    /// Run the whole workflow for a profile reference
    ///
    /// Returns `true` once the inventory is ready for display. Without a user
    /// context nothing happens and `false` is returned. Every call starts
    /// over from the first stage and invalidates any run still in flight.
    pub async fn run(
        &self,
        user: Option<&UserContext>,
        profile_reference: &str,
        game: GameId,
    ) -> bool {
        let Some(user) = user else {
            debug!("Acquisition skipped: no user context");
            return false;
        };

        let run_id = self.next_run_id.fetch_add(1, Ordering::SeqCst);
        self.snapshot.send_modify(|s| {
            s.run_id = run_id;
            s.state = AcquisitionState::Idle;
            s.steps.reset();
            s.last_error = None;
            s.is_loading = true;
            s.progress_open = true;
        });

        info!(
            run_id,
            user_id = user.user_id,
            game,
            service = self.service.name(),
            "Acquisition started"
        );

        let result = self.execute(run_id, profile_reference, game).await;

        match result {
            Ok(()) => {
                info!(run_id, "Acquisition completed, inventory ready");
                true
            }
            Err(AcquisitionError::Superseded) => {
                debug!(run_id, "Acquisition superseded");
                false
            }
            Err(err) => {
                self.fail(run_id, err);
                false
            }
        }
    }

    /// All steps back to pending and error cleared; idempotent
    ///
    /// A run still in flight loses its right to publish.
    pub fn reset(&self) {
        let run_id = self.next_run_id.fetch_add(1, Ordering::SeqCst);
        self.snapshot.send_modify(|s| {
            s.run_id = run_id;
            s.state = AcquisitionState::Idle;
            s.steps.reset();
            s.last_error = None;
            s.is_loading = false;
        });
        debug!(run_id, "Acquisition reset");
    }

    /// Close the progress surface and reset the workflow
    pub fn dismiss(&self) {
        self.reset();
        self.snapshot.send_modify(|s| s.progress_open = false);
    }

    /// The selected game changed; the inventory on display is no longer valid
    pub fn game_changed(&self) {
        self.snapshot.send_if_modified(|s| {
            let changed = s.inventory_visible;
            s.inventory_visible = false;
            changed
        });
    }

    async fn execute(
        &self,
        run_id: u64,
        profile_reference: &str,
        game: GameId,
    ) -> Result<(), AcquisitionError> {
        // Stage 0: resolve identity
        self.begin(run_id, Stage::ResolveIdentity)?;
        let account = self
            .service
            .resolve_identity(game, profile_reference)
            .await
            .map_err(|e| AcquisitionError::at_stage(Stage::ResolveIdentity, e))?;
        self.ensure_current(run_id)?;
        self.session.set_resolved(account.clone());
        self.complete(run_id, Stage::ResolveIdentity)?;

        // Stage 1: existence check, body unused
        self.begin(run_id, Stage::FetchInventory)?;
        self.service
            .check_inventory(&account, game)
            .await
            .map_err(|e| AcquisitionError::at_stage(Stage::FetchInventory, e))?;
        self.complete(run_id, Stage::FetchInventory)?;

        // Stages 2-3: settling delays while prices load elsewhere
        self.begin(run_id, Stage::EnrichPrices)?;
        tokio::time::sleep(self.timings.pricing_delay()).await;
        self.complete(run_id, Stage::EnrichPrices)?;

        self.begin(run_id, Stage::Finalize)?;
        tokio::time::sleep(self.timings.finalize_delay()).await;
        self.complete(run_id, Stage::Finalize)?;

        tokio::time::sleep(self.timings.settle_delay()).await;
        self.publish(run_id, |s| {
            s.state = AcquisitionState::Ready;
            s.is_loading = false;
            s.progress_open = false;
            s.inventory_visible = true;
        })
    }

    fn begin(&self, run_id: u64, stage: Stage) -> Result<(), AcquisitionError> {
        debug!(run_id, stage = stage.index(), "Stage started");
        self.publish(run_id, |s| {
            s.state = stage.running_state();
            s.steps.update(stage, StepStatus::Loading, None);
        })
    }

    fn complete(&self, run_id: u64, stage: Stage) -> Result<(), AcquisitionError> {
        debug!(run_id, stage = stage.index(), "Stage succeeded");
        self.publish(run_id, |s| {
            s.steps.update(stage, StepStatus::Success, None);
        })
    }

    fn fail(&self, run_id: u64, err: AcquisitionError) {
        let Some(stage) = err.stage() else {
            return;
        };
        warn!(
            run_id,
            stage = stage.index(),
            code = err.code(),
            error = %err,
            "Acquisition stage failed"
        );
        let message = err.user_message().to_string();
        let _ = self.publish(run_id, |s| {
            s.state = AcquisitionState::Failed(stage);
            s.steps.update(stage, StepStatus::Error, Some(message));
            s.last_error = Some(err);
            s.is_loading = false;
        });
    }

    fn ensure_current(&self, run_id: u64) -> Result<(), AcquisitionError> {
        if self.snapshot.borrow().run_id == run_id {
            Ok(())
        } else {
            Err(AcquisitionError::Superseded)
        }
    }

    /// Apply a change on behalf of a run, unless a newer run owns the snapshot
    fn publish(
        &self,
        run_id: u64,
        change: impl FnOnce(&mut AcquisitionSnapshot),
    ) -> Result<(), AcquisitionError> {
        let applied = self.snapshot.send_if_modified(|s| {
            if s.run_id != run_id {
                return false;
            }
            change(s);
            true
        });
        if applied {
            Ok(())
        } else {
            Err(AcquisitionError::Superseded)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upstream::MockInventoryService;

    fn coordinator() -> AcquisitionCoordinator {
        AcquisitionCoordinator::new(
            Arc::new(MockInventoryService::new("7656")),
            Arc::new(SessionIdentity::new()),
            TimingsConfig::immediate(),
        )
    }

    #[test]
    fn test_initial_snapshot() {
        let c = coordinator();
        let s = c.snapshot();
        assert_eq!(s.state, AcquisitionState::Idle);
        assert!(s.steps.all_pending());
        assert!(!s.is_loading);
        assert!(!s.progress_open);
        assert!(!c.is_ready());
    }

    #[tokio::test]
    async fn test_run_without_user_is_noop() {
        let c = coordinator();
        let before = c.snapshot();
        assert!(!c.run(None, "https://steamcommunity.com/id/x", 730).await);
        assert_eq!(c.snapshot(), before);
    }

    #[test]
    fn test_reset_is_idempotent() {
        let c = coordinator();
        c.reset();
        let first = c.steps();
        c.reset();
        assert_eq!(c.steps(), first);
        assert!(first.all_pending());
        assert_eq!(c.state(), AcquisitionState::Idle);
    }

    #[test]
    fn test_dismiss_closes_progress() {
        let c = coordinator();
        c.snapshot.send_modify(|s| {
            s.progress_open = true;
            s.is_loading = true;
        });
        c.dismiss();
        let s = c.snapshot();
        assert!(!s.progress_open);
        assert!(!s.is_loading);
    }
}
