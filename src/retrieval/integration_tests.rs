//! Integration Tests for the retrieval feed
//!
//! Cover wholesale replacement, failure clearing and out-of-order
//! completion of overlapping requests.

#[cfg(test)]
mod integration_tests {
    use std::sync::Arc;
    use std::time::Duration;

    use serde_json::json;

    use crate::core_types::AccountId;
    use crate::retrieval::{EnrichOptions, InventoryFeed, RetrievalError};
    use crate::session::SessionIdentity;
    use crate::upstream::{MockInventoryService, RawRecord, UpstreamError};

    fn raw(name: &str, appid: u32) -> RawRecord {
        serde_json::from_value(json!({
            "market_hash_name": name,
            "appid": appid,
            "count": 1,
            "tradable": 1,
            "marketable": 1,
            "prices": {"RUB": 10}
        }))
        .unwrap()
    }

    fn harness() -> (Arc<MockInventoryService>, InventoryFeed) {
        let service = Arc::new(MockInventoryService::new("A"));
        service.set_records("A", vec![raw("a-1", 730), raw("a-2", 730)]);
        service.set_records("B", vec![raw("b-1", 730)]);
        let feed = InventoryFeed::new(service.clone(), EnrichOptions::new("RUB", "https://img"));
        (service, feed)
    }

    fn names(feed: &InventoryFeed) -> Vec<String> {
        feed.items().iter().map(|i| i.name.clone()).collect()
    }

    #[tokio::test]
    async fn test_load_publishes_items() {
        let (_, feed) = harness();
        let handle = feed.load(AccountId::from("A"), 730);
        assert!(feed.state().loading);

        handle.wait().await;

        let state = feed.state();
        assert!(!state.loading);
        assert!(state.error.is_none());
        assert!(state.fetched_at.is_some());
        assert_eq!(names(&feed), vec!["a-1", "a-2"]);
    }

    #[tokio::test]
    async fn test_failure_clears_collection() {
        let (service, feed) = harness();
        feed.load(AccountId::from("A"), 730).wait().await;
        assert_eq!(feed.items().len(), 2);

        service.set_fail_fetch(Some(UpstreamError::Status { status: 500 }));
        feed.load(AccountId::from("A"), 730).wait().await;

        let state = feed.state();
        assert!(state.items.is_empty());
        assert_eq!(
            state.error,
            Some(RetrievalError::Upstream(UpstreamError::Status { status: 500 }))
        );
        assert_eq!(
            state.error.unwrap().user_message(),
            "Не удалось загрузить инвентарь"
        );
    }

    #[tokio::test]
    async fn test_game_change_replaces_collection() {
        let (service, feed) = harness();
        service.set_records("A", vec![raw("cs", 730), raw("dota", 570)]);

        feed.load(AccountId::from("A"), 730).wait().await;
        assert_eq!(names(&feed), vec!["cs"]);

        feed.load(AccountId::from("A"), 570).wait().await;
        assert_eq!(names(&feed), vec!["dota"]);
    }

    /// A is slow, B starts while A is pending: B wins, A never lands
    #[tokio::test]
    async fn test_newer_request_wins_when_older_finishes_last() {
        let (service, feed) = harness();
        service.set_fetch_delay("A", Duration::from_millis(80));

        let a = feed.load(AccountId::from("A"), 730);
        let b = feed.load(AccountId::from("B"), 730);
        assert!(a.is_cancelled());

        b.wait().await;
        a.wait().await;
        tokio::time::sleep(Duration::from_millis(100)).await;

        assert_eq!(names(&feed), vec!["b-1"]);
        assert_eq!(feed.state().account, Some(AccountId::from("B")));
        assert!(!feed.state().loading);
    }

    /// B is slower than A: A's earlier completion is still discarded
    #[tokio::test]
    async fn test_newer_request_wins_when_older_finishes_first() {
        let (service, feed) = harness();
        service.set_fetch_delay("A", Duration::from_millis(10));
        service.set_fetch_delay("B", Duration::from_millis(60));

        let a = feed.load(AccountId::from("A"), 730);
        let b = feed.load(AccountId::from("B"), 730);

        a.wait().await;
        assert!(feed.items().is_empty());
        assert!(feed.state().loading);

        b.wait().await;
        assert_eq!(names(&feed), vec!["b-1"]);
    }

    #[tokio::test]
    async fn test_explicit_cancel_stops_loading() {
        let (service, feed) = harness();
        service.set_fetch_delay("A", Duration::from_millis(200));

        let handle = feed.load(AccountId::from("A"), 730);
        handle.cancel();
        let generation = handle.generation();
        handle.wait().await;

        let state = feed.state();
        assert_eq!(state.generation, generation);
        assert!(!state.loading);
        assert!(state.items.is_empty());
        assert!(state.error.is_none());
    }

    #[tokio::test]
    async fn test_cancelled_switch_never_shows_previous_items() {
        let (service, feed) = harness();
        feed.load(AccountId::from("A"), 730).wait().await;
        assert_eq!(feed.items().len(), 2);

        service.set_fetch_delay("B", Duration::from_millis(200));
        let handle = feed.load(AccountId::from("B"), 730);
        assert!(feed.items().is_empty());
        handle.cancel();
        handle.wait().await;

        let state = feed.state();
        assert_eq!(state.account, Some(AccountId::from("B")));
        assert!(state.items.is_empty());
        assert!(state.fetched_at.is_none());
        assert!(!state.loading);
    }

    #[tokio::test]
    async fn test_reload_same_key_keeps_items_while_loading() {
        let (service, feed) = harness();
        feed.load(AccountId::from("A"), 730).wait().await;

        service.set_fetch_delay("A", Duration::from_millis(50));
        let handle = feed.load(AccountId::from("A"), 730);
        assert!(feed.state().loading);
        assert_eq!(names(&feed), vec!["a-1", "a-2"]);
        handle.wait().await;
        assert_eq!(names(&feed), vec!["a-1", "a-2"]);
    }

    #[tokio::test]
    async fn test_refresh_prefers_resolved_identity() {
        let (_, feed) = harness();
        let session = SessionIdentity::new();
        let fallback = AccountId::from("A");

        feed.refresh(&session, Some(&fallback), 730)
            .unwrap()
            .wait()
            .await;
        assert_eq!(names(&feed), vec!["a-1", "a-2"]);

        session.set_resolved(AccountId::from("B"));
        feed.refresh(&session, Some(&fallback), 730)
            .unwrap()
            .wait()
            .await;
        assert_eq!(names(&feed), vec!["b-1"]);
    }
}
