use std::{
    sync::atomic::{AtomicU64, Ordering},
    time::Duration,
};

use serde::Serialize;
use tracing::info;

const SUMMARY_EVERY: u64 = 1000;

/// Runtime counters for position queries.
#[derive(Debug, Default)]
pub struct QueryStats {
    queries: AtomicU64,
    token_results: AtomicU64,
    node_results: AtomicU64,
    divergences: AtomicU64,
    whitelisted_divergences: AtomicU64,
    slow_queries: AtomicU64,
    total_elapsed_ns: AtomicU64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSnapshot {
    pub queries: u64,
    pub token_results: u64,
    pub node_results: u64,
    pub divergences: u64,
    pub whitelisted_divergences: u64,
    pub slow_queries: u64,
    pub total_elapsed_ns: u64,
}

impl QueryStats {
    pub fn record(
        &self,
        elapsed: Duration,
        found_token: bool,
    ) {
        let queries = self.queries.fetch_add(1, Ordering::Relaxed) + 1;
        if found_token {
            self.token_results.fetch_add(1, Ordering::Relaxed);
        } else {
            self.node_results.fetch_add(1, Ordering::Relaxed);
        }

        let elapsed_ns = elapsed.as_nanos().min(u64::MAX as u128) as u64;
        self.total_elapsed_ns.fetch_add(elapsed_ns, Ordering::Relaxed);

        if queries % SUMMARY_EVERY == 0 {
            self.log_summary();
        }
    }

    pub fn record_divergence(
        &self,
        whitelisted: bool,
    ) {
        if whitelisted {
            self.whitelisted_divergences.fetch_add(1, Ordering::Relaxed);
        } else {
            self.divergences.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn record_slow(&self) {
        self.slow_queries.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            queries: self.queries.load(Ordering::Relaxed),
            token_results: self.token_results.load(Ordering::Relaxed),
            node_results: self.node_results.load(Ordering::Relaxed),
            divergences: self.divergences.load(Ordering::Relaxed),
            whitelisted_divergences: self.whitelisted_divergences.load(Ordering::Relaxed),
            slow_queries: self.slow_queries.load(Ordering::Relaxed),
            total_elapsed_ns: self.total_elapsed_ns.load(Ordering::Relaxed),
        }
    }

    pub fn log_summary(&self) {
        let StatsSnapshot {
            queries,
            token_results,
            node_results,
            divergences,
            whitelisted_divergences,
            slow_queries,
            total_elapsed_ns,
        } = self.snapshot();
        if queries == 0 {
            info!("[perf][token-at] no queries recorded yet");
            return;
        }

        let avg_us = total_elapsed_ns as f64 / queries as f64 / 1_000.0;
        info!(
            "[perf][token-at] queries={queries}, results(token={token_results}, node={node_results}), \
             divergences={divergences}, whitelisted={whitelisted_divergences}, slow={slow_queries}, \
             avg_us={avg_us:.2}"
        );
    }
}

#[cfg(test)]
#[path = "../../tests/src/position/stats_tests.rs"]
mod tests;
