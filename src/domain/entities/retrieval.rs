use serde::{Deserialize, Serialize};

use crate::domain::entities::Posting;

/// One nearest-neighbor hit: the posting plus its squared Euclidean distance
/// from the query. Results are always ordered nearest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievedPosting {
    pub posting: Posting,
    pub distance: f32,
}

impl RetrievedPosting {
    pub fn new(posting: Posting, distance: f32) -> Self {
        Self { posting, distance }
    }
}
