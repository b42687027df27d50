//! Batch query orchestration with per-batch memoization.
//!
//! A [`QueryEngine`] runs an ordered batch of query descriptors against one
//! graph. All answers derive from the all-simple-paths computation, which is
//! memoized per distinct `(start, end)` pair: within one batch that
//! computation executes at most once per key, and both "paths" and
//! "cheapest" requests for the same key share the stored result.
//!
//! The cache is scoped to the engine instance; engines are cheap and meant
//! to be created per batch and discarded afterwards.

use crate::domain::{Answer, Endpoints, PathAnswer, QueryBatch, QueryKey, QuerySpec};
use crate::index::AdjacencyIndex;
use crate::paths;
use std::collections::HashMap;

/// Batch query engine over one graph's [`AdjacencyIndex`].
pub struct QueryEngine<'g> {
    index: &'g AdjacencyIndex,

    /// Per-batch memo of all-paths results.
    cache: HashMap<QueryKey, Vec<PathAnswer>>,

    /// How many times the all-paths computation actually ran. Makes the
    /// at-most-once-per-key contract observable.
    computations: usize,
}

impl<'g> QueryEngine<'g> {
    /// Creates an engine for one batch against the given index.
    #[must_use]
    pub fn new(index: &'g AdjacencyIndex) -> Self {
        Self {
            index,
            cache: HashMap::new(),
            computations: 0,
        }
    }

    /// Runs a batch of query descriptors.
    ///
    /// Answers come back in the same order the queries were declared, each
    /// tagged with its kind and endpoints. A malformed entry produces an
    /// [`Answer::Invalid`] for that entry only; the rest of the batch still
    /// runs.
    pub fn run_batch(&mut self, batch: &QueryBatch) -> Vec<Answer> {
        batch
            .queries
            .iter()
            .map(|entry| match entry.parse() {
                Ok(spec) => self.answer(&spec),
                Err(reason) => {
                    tracing::warn!(%reason, "skipping malformed query entry");
                    Answer::Invalid { reason }
                }
            })
            .collect()
    }

    /// Answers one parsed query.
    pub fn answer(&mut self, spec: &QuerySpec) -> Answer {
        match spec {
            QuerySpec::Paths(endpoints) => Answer::Paths {
                from: endpoints.start.clone(),
                to: endpoints.end.clone(),
                paths: self.paths_for(endpoints).to_vec(),
            },
            QuerySpec::Cheapest(endpoints) => {
                let cheapest = Self::cheapest_of(self.paths_for(endpoints));
                Answer::Cheapest {
                    from: endpoints.start.clone(),
                    to: endpoints.end.clone(),
                    path: cheapest,
                }
            }
        }
    }

    /// Number of all-paths computations executed so far.
    #[must_use]
    pub fn computations(&self) -> usize {
        self.computations
    }

    /// The memoized all-paths result for the given endpoints, computing it
    /// on first use.
    fn paths_for(&mut self, endpoints: &Endpoints) -> &[PathAnswer] {
        let key = QueryKey {
            start: endpoints.start.clone(),
            end: endpoints.end.clone(),
        };

        if !self.cache.contains_key(&key) {
            tracing::debug!(start = %key.start, end = %key.end, "computing all paths");
            let result = paths::all_paths(self.index, &key.start, &key.end);
            self.computations += 1;
            self.cache.insert(key.clone(), result);
        } else {
            tracing::debug!(start = %key.start, end = %key.end, "all-paths cache hit");
        }

        &self.cache[&key]
    }

    /// Minimum-cost entry of an all-paths result set.
    ///
    /// Ties resolve to the earliest entry in enumeration order. An empty set
    /// yields `None` — the no-route outcome, not a failure.
    fn cheapest_of(paths: &[PathAnswer]) -> Option<PathAnswer> {
        let mut best: Option<&PathAnswer> = None;
        for path in paths {
            if best.is_none_or(|b| path.cost < b.cost) {
                best = Some(path);
            }
        }
        best.cloned()
    }
}
