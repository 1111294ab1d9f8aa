use std::time::{Duration, Instant};

use text_size::TextSize;
use tracing::{debug, warn};

use crate::{
    config::SearchSettings,
    position::{
        Element, PositionSearch, TokenAtOptions,
        divergence::{Divergence, compare_engines, compare_touching},
        preceding_token,
        stats::QueryStats,
    },
    syntax::SyntaxTree,
};

/// Position queries with the configured engine, timing and optional
/// cross-checking against the other engine.
#[derive(Debug)]
pub struct PositionService {
    settings: SearchSettings,
    stats: QueryStats,
}

impl PositionService {
    pub fn new(settings: SearchSettings) -> Self {
        Self {
            settings,
            stats: QueryStats::default(),
        }
    }

    pub fn settings(&self) -> &SearchSettings {
        &self.settings
    }

    pub fn stats(&self) -> &QueryStats {
        &self.stats
    }

    pub fn engine(&self) -> &'static dyn PositionSearch {
        self.settings.engine.engine()
    }

    pub fn token_at(
        &self,
        tree: &SyntaxTree,
        offset: TextSize,
        options: TokenAtOptions<'_>,
    ) -> Element {
        let started = Instant::now();
        let found = self.engine().token_at(tree, offset, options);
        self.finish("token-at", tree, offset, started.elapsed(), &found);

        if self.settings.cross_check {
            self.cross_check(tree, offset, options);
        }
        found
    }

    pub fn touching_property_name(
        &self,
        tree: &SyntaxTree,
        offset: TextSize,
    ) -> Option<Element> {
        let started = Instant::now();
        let found = self.engine().touching_property_name(tree, offset);
        let elapsed = started.elapsed();
        match &found {
            Some(element) => self.finish("touching", tree, offset, elapsed, element),
            None => {
                self.stats.record(elapsed, false);
                self.warn_if_slow("touching", offset, elapsed);
            },
        }
        found
    }

    pub fn preceding_token(
        &self,
        tree: &SyntaxTree,
        offset: TextSize,
    ) -> Option<Element> {
        let started = Instant::now();
        let found = preceding_token(tree, offset, None);
        let elapsed = started.elapsed();
        self.stats.record(elapsed, found.is_some());
        self.warn_if_slow("preceding", offset, elapsed);
        found
    }

    /// Runs both engines for one query and records the outcome. Mismatches
    /// outside the doc comment zone are logged as warnings.
    pub fn cross_check(
        &self,
        tree: &SyntaxTree,
        offset: TextSize,
        options: TokenAtOptions<'_>,
    ) -> Option<Divergence> {
        let divergence = compare_engines(tree, offset, options)?;
        self.report("token-at", &divergence);
        Some(divergence)
    }

    pub fn cross_check_touching(
        &self,
        tree: &SyntaxTree,
        offset: TextSize,
    ) -> Option<Divergence> {
        let divergence = compare_touching(tree, offset)?;
        self.report("touching", &divergence);
        Some(divergence)
    }

    fn report(
        &self,
        query: &str,
        divergence: &Divergence,
    ) {
        self.stats.record_divergence(divergence.whitelisted);
        if divergence.whitelisted {
            debug!(
                query,
                offset = divergence.offset,
                reference = ?divergence.reference,
                fast = ?divergence.fast,
                "engines disagree in doc comment trivia"
            );
        } else {
            warn!(
                query,
                offset = divergence.offset,
                reference = ?divergence.reference,
                fast = ?divergence.fast,
                "engines disagree"
            );
        }
    }

    fn finish(
        &self,
        query: &str,
        tree: &SyntaxTree,
        offset: TextSize,
        elapsed: Duration,
        found: &Element,
    ) {
        self.stats.record(elapsed, found.is_token(tree));
        self.warn_if_slow(query, offset, elapsed);
    }

    fn warn_if_slow(
        &self,
        query: &str,
        offset: TextSize,
        elapsed: Duration,
    ) {
        let elapsed_us = elapsed.as_micros().min(u64::MAX as u128) as u64;
        if elapsed_us > self.settings.slow_query_threshold_us {
            self.stats.record_slow();
            warn!(query, offset = u32::from(offset), elapsed_us, "slow position query");
        }
    }
}

#[cfg(test)]
#[path = "../../tests/src/position/service_tests.rs"]
mod tests;
