use serde::{Deserialize, Serialize};
use time::Date;

time::serde::format_description!(date_worked_format, Date, "[year]-[month]-[day]");

/// Return code the service uses for a created entity.
pub const SUCCESS_RETURN_CODE: i32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTimeEntry {
    #[serde(rename = "resourceID")]
    pub resource_id: i64,
    /// Not resolved by the console yet; sent as `null`.
    #[serde(rename = "roleID")]
    pub role_id: Option<i64>,
    #[serde(rename = "taskID")]
    pub task_id: String,
    #[serde(with = "date_worked_format")]
    pub date_worked: Date,
    pub hours_worked: u8,
    pub summary_notes: String,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateResult {
    pub return_code: i32,
    #[serde(default)]
    pub item_id: Option<i64>,
    #[serde(default)]
    pub errors: Vec<CreateError>,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateError {
    #[serde(default)]
    pub message: String,
}

impl CreateResult {
    pub fn is_success(&self) -> bool {
        self.return_code == SUCCESS_RETURN_CODE
    }
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use super::*;

    #[test]
    fn new_entry_serializes_with_service_field_names() {
        let entry = NewTimeEntry {
            resource_id: 5,
            role_id: None,
            task_id: "77".to_string(),
            date_worked: date!(2024 - 03 - 07),
            hours_worked: 8,
            summary_notes: "Reviewed PRs".to_string(),
        };

        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["resourceID"], 5);
        assert!(value["roleID"].is_null());
        assert_eq!(value["taskID"], "77");
        assert_eq!(value["dateWorked"], "2024-03-07");
        assert_eq!(value["hoursWorked"], 8);
        assert_eq!(value["summaryNotes"], "Reviewed PRs");
    }

    #[test]
    fn only_return_code_one_is_success() {
        let ok: CreateResult = serde_json::from_str(r#"{"returnCode":1,"itemId":9}"#).unwrap();
        assert!(ok.is_success());

        let rejected: CreateResult = serde_json::from_str(
            r#"{"returnCode":-1,"errors":[{"message":"Task is complete"}]}"#,
        )
        .unwrap();
        assert!(!rejected.is_success());
        assert_eq!(rejected.errors[0].message, "Task is complete");
    }
}
