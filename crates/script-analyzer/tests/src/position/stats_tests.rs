use super::*;

#[test]
fn record_splits_token_and_node_results() {
    let stats = QueryStats::default();
    stats.record(Duration::from_nanos(1_500), true);
    stats.record(Duration::from_nanos(500), false);
    stats.record(Duration::from_nanos(1_000), true);

    let snapshot = stats.snapshot();
    assert_eq!(snapshot.queries, 3);
    assert_eq!(snapshot.token_results, 2);
    assert_eq!(snapshot.node_results, 1);
    assert_eq!(snapshot.total_elapsed_ns, 3_000);
}

#[test]
fn divergences_are_counted_by_class() {
    let stats = QueryStats::default();
    stats.record_divergence(true);
    stats.record_divergence(false);
    stats.record_divergence(true);
    stats.record_slow();

    let snapshot = stats.snapshot();
    assert_eq!(snapshot.divergences, 1);
    assert_eq!(snapshot.whitelisted_divergences, 2);
    assert_eq!(snapshot.slow_queries, 1);
    assert_eq!(snapshot.queries, 0);
}

#[test]
fn summary_logging_handles_empty_and_many() {
    let stats = QueryStats::default();
    stats.log_summary();
    for _ in 0..SUMMARY_EVERY {
        stats.record(Duration::ZERO, true);
    }
    stats.log_summary();
    assert_eq!(stats.snapshot().queries, SUMMARY_EVERY);
}

#[test]
fn snapshot_serializes_camel_case() {
    let stats = QueryStats::default();
    stats.record_divergence(true);
    let value = serde_json::to_value(stats.snapshot()).unwrap();
    assert_eq!(value["whitelistedDivergences"], 1);
    assert_eq!(value["totalElapsedNs"], 0);
}

#[test]
fn counters_are_shared_across_threads() {
    let stats = QueryStats::default();
    std::thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                for _ in 0..250 {
                    stats.record(Duration::from_nanos(1), false);
                }
            });
        }
    });
    assert_eq!(stats.snapshot().node_results, 1_000);
}
