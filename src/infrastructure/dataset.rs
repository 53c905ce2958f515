use std::path::Path;

use tracing::info;

use crate::domain::{DomainError, Posting, Result};

const REQUIRED_COLUMNS: [&str; 8] = [
    "business_title",
    "agency",
    "work_location",
    "job_category",
    "salary_range_from",
    "salary_range_to",
    "salary_frequency",
    "job_description",
];

/// The static job-postings table, read-only after load. Row position is the
/// posting's stable identifier and the alignment key for the embedding cache.
#[derive(Debug)]
pub struct DatasetStore {
    postings: Vec<Posting>,
}

impl DatasetStore {
    /// Loads the CSV once. A missing required column or an unreadable row is
    /// fatal here, not deferred to query time.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut reader = csv::Reader::from_path(path)
            .map_err(|e| DomainError::dataset(format!("cannot open {}: {e}", path.display())))?;

        let headers = reader
            .headers()
            .map_err(|e| DomainError::dataset(e.to_string()))?
            .clone();
        for column in REQUIRED_COLUMNS {
            if !headers.iter().any(|h| h == column) {
                return Err(DomainError::dataset(format!(
                    "missing required column: {column}"
                )));
            }
        }

        let mut postings = Vec::new();
        for (row, record) in reader.deserialize::<Posting>().enumerate() {
            let mut posting =
                record.map_err(|e| DomainError::dataset(format!("row {row}: {e}")))?;
            posting.row = row;
            postings.push(posting);
        }

        info!(rows = postings.len(), path = %path.display(), "dataset loaded");
        Ok(Self { postings })
    }

    /// Builds a store from already-constructed postings, reassigning row ids
    /// to match the given order.
    pub fn from_postings(mut postings: Vec<Posting>) -> Self {
        for (row, posting) in postings.iter_mut().enumerate() {
            posting.row = row;
        }
        Self { postings }
    }

    pub fn len(&self) -> usize {
        self.postings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.postings.is_empty()
    }

    pub fn get(&self, row: usize) -> Option<&Posting> {
        self.postings.get(row)
    }

    pub fn postings(&self) -> &[Posting] {
        &self.postings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    const HEADER: &str = "business_title,agency,work_location,job_category,\
salary_range_from,salary_range_to,salary_frequency,job_description";

    #[test]
    fn test_load_assigns_row_ids_in_file_order() {
        let file = write_csv(&format!(
            "{HEADER}\n\
Software Engineer,DOITT,Manhattan,Technology,70000,120000,Annual,Builds software\n\
Data Analyst,DOHMH,Queens,Health,60000,90000,Annual,Analyzes data\n"
        ));

        let store = DatasetStore::load(file.path()).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(0).unwrap().business_title, "Software Engineer");
        assert_eq!(store.get(1).unwrap().row, 1);
    }

    #[test]
    fn test_missing_column_is_fatal() {
        let file = write_csv(
            "business_title,agency\n\
Software Engineer,DOITT\n",
        );

        let err = DatasetStore::load(file.path()).unwrap_err();
        assert!(matches!(err, DomainError::Dataset(_)));
        assert!(err.to_string().contains("work_location"));
    }

    #[test]
    fn test_empty_dataset_loads() {
        let file = write_csv(&format!("{HEADER}\n"));
        let store = DatasetStore::load(file.path()).unwrap();
        assert!(store.is_empty());
    }
}
