//! Cancellation scopes for in-flight character fetches.
//!
//! Every character fetch is registered under one [`CancelScope`] with a fresh
//! [`RequestId`]. Cancelling a scope forgets all of its requests, and a
//! completion is only applied to state if its request is still registered.
//! The worker additionally aborts the cancelled tasks, but the registry is
//! what guarantees that a completion already queued before the cancel is
//! dropped.

use std::collections::{HashMap, HashSet};
use std::fmt;

/// Named bucket of in-flight fetches that are cancelled together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CancelScope {
    /// First page fetched when the list becomes visible.
    InitialFetch,
    /// Next-page fetches triggered by reaching the bottom of the list.
    PaginationFetch,
    /// Fresh page-1 fetches triggered by a search.
    SearchFetch,
}

impl CancelScope {
    /// Every scope, in a fixed order.
    pub const ALL: [Self; 3] = [Self::InitialFetch, Self::PaginationFetch, Self::SearchFetch];

    /// Stable name used in logs.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::InitialFetch => "initial-fetch",
            Self::PaginationFetch => "pagination-fetch",
            Self::SearchFetch => "search-fetch",
        }
    }
}

impl fmt::Display for CancelScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Identifier of one issued fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(pub u64);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Registry of live requests per scope.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScopeRegistry {
    next_id: u64,
    live: HashMap<CancelScope, HashSet<RequestId>>,
}

impl ScopeRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new request under `scope` and returns its id.
    pub fn begin(&mut self, scope: CancelScope) -> RequestId {
        self.next_id += 1;
        let id = RequestId(self.next_id);
        self.live.entry(scope).or_default().insert(id);
        id
    }

    /// Forgets every request of `scope`. Returns whether any was live.
    pub fn cancel(&mut self, scope: CancelScope) -> bool {
        self.live.remove(&scope).is_some_and(|ids| !ids.is_empty())
    }

    /// Marks `id` as completed. Returns `false` if it was cancelled (or never issued).
    pub fn complete(&mut self, scope: CancelScope, id: RequestId) -> bool {
        let Some(ids) = self.live.get_mut(&scope) else {
            return false;
        };
        let removed = ids.remove(&id);
        if ids.is_empty() {
            self.live.remove(&scope);
        }
        removed
    }

    /// Whether no request is outstanding in any scope.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.live.is_empty()
    }
}
