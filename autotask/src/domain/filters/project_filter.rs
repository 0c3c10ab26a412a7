use serde_json::Value;

use super::{condition, QueryFilter};

/// Projects of one account whose name carries a grouping label, e.g. `[Dev-Eng]`.
pub struct ProjectFilter {
    account_id: i64,
    label: String,
}

impl ProjectFilter {
    pub fn new(account_id: i64, label: impl Into<String>) -> Self {
        Self {
            account_id,
            label: label.into(),
        }
    }
}

impl QueryFilter for ProjectFilter {
    fn conditions(&self) -> Vec<Value> {
        vec![
            condition("eq", "companyID", self.account_id),
            condition("contains", "projectName", self.label.as_str()),
        ]
    }
}
