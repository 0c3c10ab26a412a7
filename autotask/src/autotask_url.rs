#[derive(Debug, Clone)]
pub struct AutotaskURL(String);

impl AsRef<str> for AutotaskURL {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl AutotaskURL {
    pub fn new(base: impl Into<String>) -> Self {
        Self(base.into())
    }

    /// Append the given path to the URL.
    pub fn append_path(&self, path: &str) -> Self {
        let trimmed_url = self.0.trim_end_matches('/');
        let trimmed_path = path.trim_start_matches('/');
        Self(format!("{}/{}", trimmed_url, trimmed_path))
    }

    /// The `query` endpoint of an entity collection, e.g. `Resources/query`.
    pub fn query(&self, entity: &str) -> Self {
        self.append_path(entity).append_path("query")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_path_joins_with_single_slash() {
        let url = AutotaskURL::new("https://webservices3.autotask.net/atservicesrest/");
        assert_eq!(
            url.append_path("/V1.0/Resources").as_ref(),
            "https://webservices3.autotask.net/atservicesrest/V1.0/Resources"
        );
    }

    #[test]
    fn query_endpoint_for_entity() {
        let url = AutotaskURL::new("http://localhost:8080/V1.0");
        assert_eq!(
            url.query("Tasks").as_ref(),
            "http://localhost:8080/V1.0/Tasks/query"
        );
    }
}
