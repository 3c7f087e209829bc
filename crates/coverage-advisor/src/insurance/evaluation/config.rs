use chrono::{Datelike, Local};
use serde::{Deserialize, Serialize};

/// Engine settings; a pinned `current_year` makes vehicle-age rules reproducible.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentConfig {
    pub current_year: Option<i32>,
}

impl AssessmentConfig {
    pub fn pinned(current_year: i32) -> Self {
        Self {
            current_year: Some(current_year),
        }
    }

    /// Pinned year, or the local calendar year at call time.
    pub fn effective_year(&self) -> i32 {
        self.current_year
            .unwrap_or_else(|| Local::now().date_naive().year())
    }
}
