use serde_json::Value;

use super::{condition, QueryFilter};

pub struct ResourceFilter {
    user_name: String,
}

impl ResourceFilter {
    pub fn new(user_name: impl Into<String>) -> Self {
        Self {
            user_name: user_name.into(),
        }
    }
}

impl QueryFilter for ResourceFilter {
    fn conditions(&self) -> Vec<Value> {
        vec![condition("eq", "userName", self.user_name.as_str())]
    }
}
