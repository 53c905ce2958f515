use std::collections::HashMap;
use std::sync::Arc;

use tracing::instrument;

use crate::domain::{TrendEntry, TrendField};
use crate::infrastructure::DatasetStore;

/// Frequency rankings over the dataset's categorical fields. Pure over the
/// loaded snapshot, so repeated calls always return the same sequence.
pub struct TrendService {
    store: Arc<DatasetStore>,
    default_top_k: usize,
}

impl TrendService {
    pub fn new(store: Arc<DatasetStore>, default_top_k: usize) -> Self {
        Self {
            store,
            default_top_k,
        }
    }

    pub fn trending(&self, field: TrendField) -> Vec<TrendEntry> {
        self.trending_top_k(field, self.default_top_k)
    }

    #[instrument(skip(self))]
    pub fn trending_top_k(&self, field: TrendField, top_k: usize) -> Vec<TrendEntry> {
        if top_k == 0 {
            return Vec::new();
        }

        // Counts accumulate in first-seen order so ties never depend on hash
        // iteration; the stable sort then only reorders by count.
        let mut entries: Vec<TrendEntry> = Vec::new();
        let mut positions: HashMap<&str, usize> = HashMap::new();
        for posting in self.store.postings() {
            let label = match field {
                TrendField::Title => posting.business_title.as_str(),
                TrendField::Category => posting.job_category.as_str(),
            };
            match positions.get(label) {
                Some(&i) => entries[i].count += 1,
                None => {
                    positions.insert(label, entries.len());
                    entries.push(TrendEntry::new(label, 1));
                }
            }
        }

        entries.sort_by(|a, b| b.count.cmp(&a.count));
        entries.truncate(top_k);
        entries
    }
}
