use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A dated clinical event for one pet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Visit {
    pub id: Option<u32>,
    pub date: Option<NaiveDate>,
    pub description: String,
    pub pet_id: Option<u32>,
}

impl Default for Visit {
    /// A fresh visit is dated today
    fn default() -> Self {
        Self {
            id: None,
            date: Some(chrono::Local::now().date_naive()),
            description: String::new(),
            pet_id: None,
        }
    }
}
