use super::*;
use crate::position::{EngineKind, divergence::option_grid};

#[test]
fn token_at_records_a_query() {
    let service = PositionService::new(SearchSettings::default());
    let tree = SyntaxTree::parse("const x = 1;");

    let found = service.token_at(&tree, TextSize::from(6), TokenAtOptions::default());
    assert_eq!(found.snapshot(&tree).text, "x");

    let stats = service.stats().snapshot();
    assert_eq!(stats.queries, 1);
    assert_eq!(stats.token_results, 1);
    assert_eq!(stats.divergences, 0);
}

#[test]
fn engine_follows_settings() {
    let service = PositionService::new(SearchSettings {
        engine: EngineKind::Reference,
        ..SearchSettings::default()
    });
    assert_eq!(service.engine().name(), "reference");
    assert_eq!(service.settings().engine, EngineKind::Reference);
}

#[test]
fn preceding_on_empty_source_counts_as_node_result() {
    let service = PositionService::new(SearchSettings::default());
    let tree = SyntaxTree::parse("");
    assert!(service.preceding_token(&tree, TextSize::from(0)).is_none());
    assert_eq!(service.stats().snapshot().node_results, 1);
}

#[test]
fn touching_without_name_is_none() {
    let service = PositionService::new(SearchSettings::default());
    let tree = SyntaxTree::parse("f();");
    assert!(service.touching_property_name(&tree, TextSize::from(2)).is_none());
    assert!(service.touching_property_name(&tree, TextSize::from(1)).is_some());
    assert_eq!(service.stats().snapshot().queries, 2);
}

#[test]
fn cross_check_on_every_query() {
    let service = PositionService::new(SearchSettings {
        cross_check: true,
        ..SearchSettings::default()
    });
    let text = "let a = [1, , 2];\nwhile (a) { a = null; }";
    let tree = SyntaxTree::parse(text);
    for offset in 0..=text.len() as u32 {
        for options in option_grid() {
            service.token_at(&tree, TextSize::from(offset), options);
        }
        assert!(service.cross_check_touching(&tree, TextSize::from(offset)).is_none());
    }
    let stats = service.stats().snapshot();
    assert_eq!(stats.queries, (text.len() as u64 + 1) * 8);
    assert_eq!(stats.divergences, 0);
    assert_eq!(stats.whitelisted_divergences, 0);
}

#[test]
fn whitelisted_divergence_is_not_a_warning() {
    let service = PositionService::new(SearchSettings::default());
    let text = "/** doc */\nfunction f() {}";
    let tree = SyntaxTree::parse(text);
    for offset in 0..=text.len() as u32 {
        for options in option_grid() {
            if let Some(divergence) = service.cross_check(&tree, TextSize::from(offset), options) {
                assert!(divergence.whitelisted);
            }
        }
    }
    assert_eq!(service.stats().snapshot().divergences, 0);
}
