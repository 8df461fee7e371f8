#![allow(dead_code)]

use async_trait::async_trait;
use link_redirector::application::policy::RedirectPolicy;
use link_redirector::domain::entities::{AccessRecord, LinkRecord};
use link_redirector::domain::repositories::{
    AccessLog, AccessLogError, LinkStore, LookupOptions, StoreError, StoreResult,
};
use link_redirector::infrastructure::qr::QrCodeEncoder;
use link_redirector::infrastructure::store::MemoryLinkStore;
use link_redirector::state::AppState;
use std::sync::{Arc, Mutex};

/// Link store that records every key it is asked for.
pub struct CountingStore {
    inner: MemoryLinkStore,
    lookups: Mutex<Vec<(String, LookupOptions)>>,
}

impl CountingStore {
    pub fn new(inner: MemoryLinkStore) -> Self {
        Self {
            inner,
            lookups: Mutex::new(Vec::new()),
        }
    }

    pub fn with_links(links: &[(&str, &str)]) -> Self {
        let store = links
            .iter()
            .fold(MemoryLinkStore::new(), |store, (slug, url)| {
                store.with_link(slug, url)
            });
        Self::new(store)
    }

    pub fn lookup_count(&self) -> usize {
        self.lookups.lock().unwrap().len()
    }

    pub fn looked_up_keys(&self) -> Vec<String> {
        self.lookups
            .lock()
            .unwrap()
            .iter()
            .map(|(key, _)| key.clone())
            .collect()
    }

    pub fn lookup_options(&self) -> Vec<LookupOptions> {
        self.lookups
            .lock()
            .unwrap()
            .iter()
            .map(|(_, options)| *options)
            .collect()
    }
}

#[async_trait]
impl LinkStore for CountingStore {
    async fn get(&self, key: &str, options: LookupOptions) -> StoreResult<Option<LinkRecord>> {
        self.lookups
            .lock()
            .unwrap()
            .push((key.to_string(), options));
        self.inner.get(key, options).await
    }

    async fn health_check(&self) -> bool {
        true
    }
}

/// Link store whose backend is always down.
pub struct FailingStore;

#[async_trait]
impl LinkStore for FailingStore {
    async fn get(&self, _key: &str, _options: LookupOptions) -> StoreResult<Option<LinkRecord>> {
        Err(StoreError::Backend("connection refused".to_string()))
    }

    async fn health_check(&self) -> bool {
        false
    }
}

/// Access log keeping records in memory, optionally rejecting every write.
#[derive(Default)]
pub struct RecordingAccessLog {
    records: Mutex<Vec<AccessRecord>>,
    fail: bool,
}

impl RecordingAccessLog {
    pub fn failing() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn records(&self) -> Vec<AccessRecord> {
        self.records.lock().unwrap().clone()
    }
}

#[async_trait]
impl AccessLog for RecordingAccessLog {
    async fn write(&self, record: AccessRecord) -> Result<(), AccessLogError> {
        if self.fail {
            return Err(AccessLogError::Sink("sink unavailable".to_string()));
        }
        self.records.lock().unwrap().push(record);
        Ok(())
    }

    fn health_check(&self) -> bool {
        !self.fail
    }
}

pub fn create_test_state(
    store: Option<Arc<dyn LinkStore>>,
    policy: RedirectPolicy,
    access_log: Arc<dyn AccessLog>,
) -> AppState {
    AppState::new(
        store,
        policy,
        Arc::new(QrCodeEncoder::new()),
        access_log,
        false,
    )
}
