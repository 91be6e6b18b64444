//! # Query Store
//!
//! Keyed request state for one mounted screen.
//!
//! ```text
//! QueryStore<T>
//! └── entries: HashMap<QueryKey, QueryState<T>>
//!       ├── data: Option<Vec<T>>      // last successful response
//!       ├── error: Option<String>     // last failure, cleared on success
//!       ├── is_loading: bool          // first fetch, nothing to show yet
//!       ├── is_fetching: bool         // any request outstanding
//!       └── in_flight: Option<RequestId>
//! ```
//!
//! A screen owns its store, so dropping the screen drops the entries and any
//! response that arrives afterwards has nowhere to land. Within a store, only
//! the response to the latest request of a key is applied.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use log::{debug, warn};

use crate::api::ApiError;

/// Identifies one endpoint + parameter combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKey {
    Posts,
    Comments { post_id: u64 },
}

/// Unique per issued request, across all stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(u64);

static NEXT_REQUEST_ID: AtomicU64 = AtomicU64::new(1);

impl RequestId {
    fn next() -> Self {
        RequestId(NEXT_REQUEST_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// A request the effect loop must perform on behalf of a screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchRequest {
    pub key: QueryKey,
    pub request: RequestId,
}

#[derive(Debug, Clone, PartialEq)]
pub struct QueryState<T> {
    pub data: Option<Vec<T>>,
    pub error: Option<String>,
    pub is_loading: bool,
    pub is_fetching: bool,
    pub in_flight: Option<RequestId>,
}

impl<T> Default for QueryState<T> {
    fn default() -> Self {
        Self {
            data: None,
            error: None,
            is_loading: false,
            is_fetching: false,
            in_flight: None,
        }
    }
}

/// What a screen should show for a query right now.
#[derive(Debug, PartialEq)]
pub enum QueryStatus<'a, T> {
    Loading,
    Error(&'a str),
    Success(&'a [T]),
}

impl<T> QueryState<T> {
    /// Loading wins over error, error wins over data. Stale data stays in
    /// `data` during a refetch but is only reported once nothing failed.
    pub fn status(&self) -> QueryStatus<'_, T> {
        if self.is_loading {
            return QueryStatus::Loading;
        }
        if let Some(error) = &self.error {
            return QueryStatus::Error(error);
        }
        match &self.data {
            Some(data) => QueryStatus::Success(data),
            None => QueryStatus::Loading,
        }
    }

    /// A refetch with previous data still on screen.
    pub fn is_refreshing(&self) -> bool {
        self.is_fetching && !self.is_loading
    }
}

pub struct QueryStore<T> {
    entries: HashMap<QueryKey, QueryState<T>>,
}

impl<T> Default for QueryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> QueryStore<T> {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Starts a request for `key`, superseding any request already in flight.
    pub fn begin(&mut self, key: QueryKey) -> RequestId {
        let id = RequestId::next();
        let entry = self.entries.entry(key).or_default();
        if let Some(previous) = entry.in_flight {
            debug!("{:?}: request {:?} superseded by {:?}", key, previous, id);
        }
        entry.is_loading = entry.data.is_none();
        entry.is_fetching = true;
        entry.in_flight = Some(id);
        id
    }

    /// Applies a response. Returns false (and changes nothing) if `id` is not
    /// the latest request for `key`.
    pub fn resolve(&mut self, key: QueryKey, id: RequestId, result: Result<Vec<T>, ApiError>) -> bool {
        let Some(entry) = self.entries.get_mut(&key) else {
            warn!("{:?}: dropping response {:?} for unknown query", key, id);
            return false;
        };
        if entry.in_flight != Some(id) {
            warn!(
                "{:?}: dropping stale response {:?} (current: {:?})",
                key, id, entry.in_flight
            );
            return false;
        }

        entry.in_flight = None;
        entry.is_loading = false;
        entry.is_fetching = false;
        match result {
            Ok(data) => {
                entry.data = Some(data);
                entry.error = None;
            }
            Err(e) => {
                warn!("{:?}: request {:?} failed: {}", key, id, e);
                entry.error = Some(e.message().to_string());
            }
        }
        true
    }

    pub fn get(&self, key: QueryKey) -> Option<&QueryState<T>> {
        self.entries.get(&key)
    }

    /// Keys that were never requested are still loading as far as the UI is concerned.
    pub fn status(&self, key: QueryKey) -> QueryStatus<'_, T> {
        self.get(key)
            .map(QueryState::status)
            .unwrap_or(QueryStatus::Loading)
    }

    pub fn is_fetching(&self, key: QueryKey) -> bool {
        self.get(key).is_some_and(|s| s.is_fetching)
    }

    pub fn is_refreshing(&self, key: QueryKey) -> bool {
        self.get(key).is_some_and(QueryState::is_refreshing)
    }
}
