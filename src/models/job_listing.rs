use serde::{Deserialize, Serialize};

/// One entry scraped from the job board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobListing {
    pub title: String,
    pub budget: String,
    pub link: String,
}

impl JobListing {
    pub fn new(
        title: impl Into<String>,
        budget: impl Into<String>,
        link: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            budget: budget.into(),
            link: link.into(),
        }
    }
}
