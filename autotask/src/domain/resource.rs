use serde::{Deserialize, Serialize};

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub user_name: String,
}

impl Resource {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// Links a resource to a role it may bill time under.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceRole {
    pub id: i64,
    #[serde(rename(deserialize = "resourceID"))]
    pub resource_id: i64,
    #[serde(rename(deserialize = "roleID"))]
    pub role_id: i64,
    #[serde(default)]
    pub is_active: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resource_role_reads_service_field_names() {
        let raw = r#"{"id":7,"resourceID":29682885,"roleID":29683378,"isActive":true}"#;
        let role: ResourceRole = serde_json::from_str(raw).unwrap();
        assert_eq!(role.resource_id, 29682885);
        assert_eq!(role.role_id, 29683378);
        assert!(role.is_active);
    }

    #[test]
    fn display_name_without_last_name_has_no_trailing_space() {
        let resource = Resource {
            first_name: "Alice".to_string(),
            ..Default::default()
        };
        assert_eq!(resource.display_name(), "Alice");
    }
}
