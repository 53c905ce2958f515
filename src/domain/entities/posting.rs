use serde::{Deserialize, Serialize};

/// One job listing from the dataset. Immutable once loaded; `row` is the
/// posting's position in dataset order and doubles as its stable identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Posting {
    #[serde(skip_deserializing)]
    pub row: usize,
    pub business_title: String,
    pub agency: String,
    pub work_location: String,
    pub job_category: String,
    pub salary_range_from: f64,
    pub salary_range_to: f64,
    pub salary_frequency: String,
    pub job_description: String,
}

impl Posting {
    pub fn new(row: usize, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            row,
            business_title: title.into(),
            agency: String::new(),
            work_location: String::new(),
            job_category: String::new(),
            salary_range_from: 0.0,
            salary_range_to: 0.0,
            salary_frequency: String::new(),
            job_description: description.into(),
        }
    }

    pub fn with_agency(mut self, agency: impl Into<String>) -> Self {
        self.agency = agency.into();
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.work_location = location.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.job_category = category.into();
        self
    }

    pub fn with_salary(mut self, from: f64, to: f64, frequency: impl Into<String>) -> Self {
        self.salary_range_from = from;
        self.salary_range_to = to;
        self.salary_frequency = frequency.into();
        self
    }
}
