use serde_json::Value;

use super::{condition, QueryFilter};

/// Companies whose name contains `name`.
pub struct AccountFilter {
    name: String,
}

impl AccountFilter {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl QueryFilter for AccountFilter {
    fn conditions(&self) -> Vec<Value> {
        vec![condition("contains", "companyName", self.name.as_str())]
    }
}
