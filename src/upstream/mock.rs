//! Mock upstream for tests

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use super::error::UpstreamError;
use super::types::RawRecord;
use super::InventoryService;
use crate::core_types::{AccountId, GameId};

pub struct MockInventoryService {
    resolved_id: Mutex<AccountId>,
    records: Mutex<HashMap<AccountId, Vec<RawRecord>>>,
    /// Per-account latency of the priced inventory call
    fetch_delay: Mutex<HashMap<AccountId, Duration>>,
    fail_resolve: Mutex<Option<UpstreamError>>,
    fail_check: Mutex<Option<UpstreamError>>,
    fail_fetch: Mutex<Option<UpstreamError>>,
    resolve_count: AtomicUsize,
    check_count: AtomicUsize,
    fetch_count: AtomicUsize,
}

impl MockInventoryService {
    pub fn new(resolved_id: &str) -> Self {
        Self {
            resolved_id: Mutex::new(AccountId::from(resolved_id)),
            records: Mutex::new(HashMap::new()),
            fetch_delay: Mutex::new(HashMap::new()),
            fail_resolve: Mutex::new(None),
            fail_check: Mutex::new(None),
            fail_fetch: Mutex::new(None),
            resolve_count: AtomicUsize::new(0),
            check_count: AtomicUsize::new(0),
            fetch_count: AtomicUsize::new(0),
        }
    }

    pub fn set_records(&self, account: &str, records: Vec<RawRecord>) {
        self.records
            .lock()
            .unwrap()
            .insert(AccountId::from(account), records);
    }

    pub fn set_fetch_delay(&self, account: &str, delay: Duration) {
        self.fetch_delay
            .lock()
            .unwrap()
            .insert(AccountId::from(account), delay);
    }

    pub fn set_fail_resolve(&self, err: Option<UpstreamError>) {
        *self.fail_resolve.lock().unwrap() = err;
    }

    pub fn set_fail_check(&self, err: Option<UpstreamError>) {
        *self.fail_check.lock().unwrap() = err;
    }

    pub fn set_fail_fetch(&self, err: Option<UpstreamError>) {
        *self.fail_fetch.lock().unwrap() = err;
    }

    pub fn resolve_count(&self) -> usize {
        self.resolve_count.load(Ordering::SeqCst)
    }

    pub fn check_count(&self) -> usize {
        self.check_count.load(Ordering::SeqCst)
    }

    pub fn fetch_count(&self) -> usize {
        self.fetch_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl InventoryService for MockInventoryService {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn resolve_identity(
        &self,
        _game: GameId,
        _profile_reference: &str,
    ) -> Result<AccountId, UpstreamError> {
        self.resolve_count.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.fail_resolve.lock().unwrap().clone() {
            return Err(err);
        }
        Ok(self.resolved_id.lock().unwrap().clone())
    }

    async fn check_inventory(
        &self,
        _account: &AccountId,
        _game: GameId,
    ) -> Result<(), UpstreamError> {
        self.check_count.fetch_add(1, Ordering::SeqCst);
        match self.fail_check.lock().unwrap().clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    async fn fetch_priced_inventory(
        &self,
        account: &AccountId,
    ) -> Result<Vec<RawRecord>, UpstreamError> {
        self.fetch_count.fetch_add(1, Ordering::SeqCst);
        let delay = self.fetch_delay.lock().unwrap().get(account).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(err) = self.fail_fetch.lock().unwrap().clone() {
            return Err(err);
        }
        Ok(self
            .records
            .lock()
            .unwrap()
            .get(account)
            .cloned()
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_resolve_and_fail() {
        let mock = MockInventoryService::new("7656");
        let id = mock.resolve_identity(730, "https://x").await.unwrap();
        assert_eq!(id, AccountId::from("7656"));

        mock.set_fail_resolve(Some(UpstreamError::Status { status: 404 }));
        assert!(mock.resolve_identity(730, "https://x").await.is_err());
        assert_eq!(mock.resolve_count(), 2);
    }

    #[tokio::test]
    async fn test_mock_unknown_account_is_empty() {
        let mock = MockInventoryService::new("7656");
        let records = mock
            .fetch_priced_inventory(&AccountId::from("nobody"))
            .await
            .unwrap();
        assert!(records.is_empty());
        assert_eq!(mock.fetch_count(), 1);
    }
}
