//! Inventory Feed
//!
//! Owns the displayed inventory collection. Each `load` spawns one retrieval
//! task tagged with a fresh generation; a task only publishes while its
//! generation is still the current one, so a superseded request can never
//! overwrite a newer result, whichever finishes first.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::enrich::{EnrichOptions, enrich};
use super::error::RetrievalError;
use crate::core_types::{AccountId, GameId};
use crate::models::InventoryItem;
use crate::session::SessionIdentity;
use crate::upstream::InventoryService;

/// Fetch and enrich the inventory of one account for one game
///
/// Never panics past its boundary: every failure comes back as a
/// [`RetrievalError`].
pub async fn load_inventory(
    service: &dyn InventoryService,
    account: &AccountId,
    game: GameId,
    options: &EnrichOptions,
) -> Result<Vec<InventoryItem>, RetrievalError> {
    let records = service.fetch_priced_inventory(account).await?;
    Ok(enrich(&records, game, options))
}

/// Published state of the feed
#[derive(Debug, Clone, Default)]
pub struct InventoryState {
    pub generation: u64,
    pub account: Option<AccountId>,
    pub game: Option<GameId>,
    pub loading: bool,
    /// Replaced wholesale; never partially updated
    pub items: Arc<Vec<InventoryItem>>,
    pub error: Option<RetrievalError>,
    pub fetched_at: Option<DateTime<Utc>>,
}

impl InventoryState {
    /// Nothing to show: still loading, failed, or no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Handle on one retrieval; cancelling drops the in-flight request
pub struct RetrievalHandle {
    generation: u64,
    token: CancellationToken,
    task: JoinHandle<()>,
}

impl RetrievalHandle {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Wait for the task to publish (or give up after cancellation)
    pub async fn wait(self) {
        if let Err(e) = self.task.await {
            warn!(generation = self.generation, error = %e, "Retrieval task aborted");
        }
    }
}

pub struct InventoryFeed {
    service: Arc<dyn InventoryService>,
    options: EnrichOptions,
    state: Arc<watch::Sender<InventoryState>>,
    next_generation: AtomicU64,
    current: Mutex<Option<CancellationToken>>,
}

impl InventoryFeed {
    pub fn new(service: Arc<dyn InventoryService>, options: EnrichOptions) -> Self {
        let (state, _) = watch::channel(InventoryState::default());
        Self {
            service,
            options,
            state: Arc::new(state),
            next_generation: AtomicU64::new(1),
            current: Mutex::new(None),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<InventoryState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> InventoryState {
        self.state.borrow().clone()
    }

    pub fn items(&self) -> Arc<Vec<InventoryItem>> {
        self.state.borrow().items.clone()
    }

    /// Start retrieving `account`'s inventory for `game`
    ///
    /// Cancels the previous retrieval, if any. A different account or game
    /// empties the collection at once; reloading the same key keeps the
    /// current items until the new ones land. Must be called from within a
    /// tokio runtime.
    pub fn load(&self, account: AccountId, game: GameId) -> RetrievalHandle {
        let generation = self.next_generation.fetch_add(1, Ordering::SeqCst);
        let token = CancellationToken::new();

        if let Some(previous) = self
            .current
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .replace(token.clone())
        {
            previous.cancel();
        }

        self.state.send_modify(|s| {
            // Items only ever belong to the (account, game) they were loaded for
            if s.account.as_ref() != Some(&account) || s.game != Some(game) {
                s.items = Arc::new(Vec::new());
                s.fetched_at = None;
            }
            s.generation = generation;
            s.account = Some(account.clone());
            s.game = Some(game);
            s.loading = true;
            s.error = None;
        });

        info!(generation, account = %account, game, "Inventory retrieval started");

        let service = self.service.clone();
        let options = self.options.clone();
        let state = self.state.clone();
        let cancelled = token.clone();

        let task = tokio::spawn(async move {
            let result = tokio::select! {
                _ = cancelled.cancelled() => {
                    debug!(generation, "Inventory retrieval cancelled");
                    state.send_if_modified(|s| {
                        if s.generation != generation {
                            return false;
                        }
                        s.loading = false;
                        true
                    });
                    return;
                }
                result = load_inventory(service.as_ref(), &account, game, &options) => result,
            };

            let applied = state.send_if_modified(|s| {
                if s.generation != generation {
                    return false;
                }
                s.loading = false;
                match &result {
                    Ok(items) => {
                        s.items = Arc::new(items.clone());
                        s.error = None;
                        s.fetched_at = Some(Utc::now());
                    }
                    Err(err) => {
                        s.items = Arc::new(Vec::new());
                        s.error = Some(err.clone());
                    }
                }
                true
            });

            match (&result, applied) {
                (_, false) => debug!(generation, "Discarded stale inventory result"),
                (Ok(items), true) => {
                    info!(generation, items = items.len(), "Inventory retrieval completed")
                }
                (Err(err), true) => {
                    warn!(generation, code = err.code(), error = %err, "Inventory retrieval failed")
                }
            }
        });

        RetrievalHandle {
            generation,
            token,
            task,
        }
    }

    /// Load for the session's resolved account, or `fallback` before any
    /// resolution; `None` when neither exists
    pub fn refresh(
        &self,
        session: &SessionIdentity,
        fallback: Option<&AccountId>,
        game: GameId,
    ) -> Option<RetrievalHandle> {
        match session.effective(fallback) {
            Some(account) => Some(self.load(account, game)),
            None => {
                debug!("No account to load inventory for");
                None
            }
        }
    }
}
