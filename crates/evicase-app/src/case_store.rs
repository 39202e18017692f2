//! Read-through cache of the case list
//!
//! The remote service is the source of truth; this store only ever replaces
//! its cached list wholesale, never merges or mutates a cached `Case` in
//! place. Anything holding a case across a refresh must re-resolve it by
//! `case_id` via [`CaseStore::find`], not by object identity.

use evicase_api::ApiClient;
use evicase_core::prelude::*;
use evicase_core::types::{Case, NewCase};

/// Session-scoped cache of the server's case list.
#[derive(Debug, Default)]
pub struct CaseStore {
    cases: Vec<Case>,
}

impl CaseStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a case and refresh the list from the server.
    ///
    /// Input validation happens before any network call. The refresh after
    /// a successful create is best-effort: its failure is logged and
    /// swallowed, since the create itself already succeeded and a later
    /// manual refresh corrects the cache.
    pub async fn create(&mut self, api: &ApiClient, new_case: NewCase) -> Result<Case> {
        new_case.validate()?;

        let case = api.create_case(&new_case).await?;
        info!("created case '{}' ({})", case.case_name, case.case_id);

        if let Err(e) = self.refresh(api).await {
            warn!("case list refresh after create failed: {e}");
        }
        Ok(case)
    }

    /// Replace the cached list with the server's current list.
    pub async fn refresh(&mut self, api: &ApiClient) -> Result<()> {
        self.cases = api.list_cases().await?;
        debug!("case list refreshed ({} cases)", self.cases.len());
        Ok(())
    }

    /// Cached cases, in server order.
    pub fn list(&self) -> &[Case] {
        &self.cases
    }

    /// Re-resolve a case by id after a refresh.
    pub fn find(&self, case_id: &str) -> Option<&Case> {
        self.cases.iter().find(|c| c.case_id == case_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use evicase_api::MockService;

    fn dead_client() -> ApiClient {
        ApiClient::new("http://127.0.0.1:9").unwrap()
    }

    #[tokio::test]
    async fn test_create_then_list_contains_case() {
        let mock = MockService::spawn().await;
        let api = ApiClient::new(&mock.url()).unwrap();
        let mut store = CaseStore::new();

        let created = store
            .create(&api, NewCase::new("Case A", "Jane"))
            .await
            .unwrap();

        let listed = store
            .list()
            .iter()
            .find(|c| c.case_id == created.case_id)
            .expect("created case present after refresh");
        assert_eq!(listed.case_name, "Case A");
        assert_eq!(listed.investigator, "Jane");
    }

    #[tokio::test]
    async fn test_create_validates_before_any_network_call() {
        // The client points at a dead endpoint: a validation failure must
        // surface before the transport is ever touched.
        let mut store = CaseStore::new();
        let err = store
            .create(&dead_client(), NewCase::new("", "Jane"))
            .await
            .unwrap_err();
        assert!(err.is_validation(), "got {err:?}");

        let err = store
            .create(&dead_client(), NewCase::new("Case A", ""))
            .await
            .unwrap_err();
        assert!(err.is_validation(), "got {err:?}");
    }

    #[tokio::test]
    async fn test_refresh_replaces_list_wholesale() {
        let mock = MockService::spawn().await;
        let api = ApiClient::new(&mock.url()).unwrap();
        let mut store = CaseStore::new();

        store
            .create(&api, NewCase::new("Case A", "Jane"))
            .await
            .unwrap();
        assert_eq!(store.list().len(), 1);

        // A second client (another session) adds a case behind our back.
        api.create_case(&NewCase::new("Case B", "Avery"))
            .await
            .unwrap();

        store.refresh(&api).await.unwrap();
        assert_eq!(store.list().len(), 2);
        let second_id = store.list()[1].case_id.clone();
        assert!(store.find(&second_id).is_some());
    }

    #[tokio::test]
    async fn test_find_unknown_id_is_none() {
        let store = CaseStore::new();
        assert!(store.find("missing").is_none());
    }

    #[tokio::test]
    async fn test_create_survives_failed_followup_refresh() {
        // The create succeeds but the follow-up list refresh fails; the
        // created case is still returned and the cache stays as it was.
        let mock = MockService::spawn().await;
        let api = ApiClient::new(&mock.url()).unwrap();
        let mut store = CaseStore::new();

        mock.fail_case_listing(true);
        let case = store
            .create(&api, NewCase::new("Case A", "Jane"))
            .await
            .unwrap();
        assert_eq!(case.case_name, "Case A");
        assert!(store.list().is_empty());

        mock.fail_case_listing(false);
        store.refresh(&api).await.unwrap();
        assert_eq!(store.list().len(), 1);
    }
}
