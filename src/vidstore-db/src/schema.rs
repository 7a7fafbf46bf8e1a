//! Database schema types

use serde::{Deserialize, Serialize};

/// One row of the `videos` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Video {
    pub id: i64,
    pub name: String,
    pub views: i64,
    pub likes: i64,
}

/// Sparse update for a video row; `None` leaves the stored value alone
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VideoPatch {
    pub name: Option<String>,
    pub views: Option<i64>,
    pub likes: Option<i64>,
}

impl VideoPatch {
    /// True when the patch would not change any column
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.views.is_none() && self.likes.is_none()
    }
}
