use serde_json::Value;

use super::{condition, QueryFilter};

pub struct ResourceRoleFilter {
    resource_id: i64,
}

impl ResourceRoleFilter {
    pub fn new(resource_id: i64) -> Self {
        Self { resource_id }
    }
}

impl QueryFilter for ResourceRoleFilter {
    fn conditions(&self) -> Vec<Value> {
        vec![condition("eq", "resourceID", self.resource_id)]
    }
}
