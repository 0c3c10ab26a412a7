mod account_filter;
mod project_filter;
mod resource_filter;
mod resource_role_filter;
mod task_filter;

pub use account_filter::AccountFilter;
pub use project_filter::ProjectFilter;
pub use resource_filter::ResourceFilter;
pub use resource_role_filter::ResourceRoleFilter;
pub use task_filter::TaskFilter;

use serde_json::{json, Value};

pub trait QueryFilter {
    fn conditions(&self) -> Vec<Value>;

    /// Renders the `search` query parameter understood by the entity query endpoints.
    fn as_query_filter(&self) -> String {
        json!({ "filter": self.conditions() }).to_string()
    }
}

pub(crate) fn condition(op: &str, field: &str, value: impl Into<Value>) -> Value {
    json!({ "op": op, "field": field, "value": value.into() })
}
