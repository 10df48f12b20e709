//! DDR score data

use serde::{Deserialize, Serialize};

/// One chart's play record, as returned by `/ddr/songs/scores/extended`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StatisticsRow {
    pub level: i32,
    pub title: String,
    pub artist: String,
    pub mode: String,
    pub difficulty: String,
    pub lamp: String,
    pub rank: String,
    pub score: i32,
    pub play_count: i32,
    pub clear_count: i32,
    pub max_combo: i32,
}
