use serde_json::Value;

use super::{condition, QueryFilter};

/// Tasks of a project. The project id is forwarded as typed by the operator,
/// so an unknown id simply yields no tasks.
pub struct TaskFilter {
    project_id: String,
}

impl TaskFilter {
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
        }
    }
}

impl QueryFilter for TaskFilter {
    fn conditions(&self) -> Vec<Value> {
        vec![condition("eq", "projectID", self.project_id.trim())]
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn project_id_is_forwarded_as_text() {
        let filter = TaskFilter::new(" 42 ");
        let rendered: Value = serde_json::from_str(&filter.as_query_filter()).unwrap();
        assert_eq!(
            rendered,
            json!({ "filter": [{ "op": "eq", "field": "projectID", "value": "42" }] })
        );
    }

    #[test]
    fn garbage_project_id_still_builds_a_filter() {
        let filter = TaskFilter::new("not-a-project");
        assert!(filter.as_query_filter().contains(r#""value":"not-a-project""#));
    }
}
