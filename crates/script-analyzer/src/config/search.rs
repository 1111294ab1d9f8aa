use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;

use crate::position::EngineKind;

pub const MIN_SLOW_QUERY_THRESHOLD_US: u64 = 1;
pub const MAX_SLOW_QUERY_THRESHOLD_US: u64 = 1_000_000;

#[derive(Debug, Clone, PartialEq)]
pub struct SearchSettings {
    pub engine: EngineKind,
    /// Run the other engine on every query and report disagreements.
    pub cross_check: bool,
    pub slow_query_threshold_us: u64,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            engine: EngineKind::Fast,
            cross_check: false,
            slow_query_threshold_us: 1_000,
        }
    }
}

impl SearchSettings {
    pub(crate) fn apply_patch(
        &mut self,
        patch: SearchSettingsPatch,
    ) {
        if let Some(v) = patch.engine {
            self.engine = v;
        }
        if let Some(v) = patch.cross_check {
            self.cross_check = v;
        }
        if let Some(v) = patch.slow_query_threshold_us {
            self.slow_query_threshold_us = v;
        }
    }

    pub(crate) fn normalize(&mut self) {
        self.slow_query_threshold_us =
            self.slow_query_threshold_us.clamp(MIN_SLOW_QUERY_THRESHOLD_US, MAX_SLOW_QUERY_THRESHOLD_US);
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct SearchSettingsPatch {
    pub(crate) engine: Option<EngineKind>,
    pub(crate) cross_check: Option<bool>,
    pub(crate) slow_query_threshold_us: Option<u64>,
    #[serde(flatten)]
    pub(crate) _extra: HashMap<String, Value>,
}
