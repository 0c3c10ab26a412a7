use std::fmt;

use serde::{Deserialize, Serialize};
use time::Date;

pub type RoleId = i64;

/// Username/password pair used to sign in to the time-tracking service.
#[derive(Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// A row of an `id | name` listing, as shown to the operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItem {
    pub id: String,
    pub name: String,
}

impl ListItem {
    pub fn new(id: impl ToString, name: impl Into<String>) -> Self {
        Self {
            id: id.to_string(),
            name: name.into(),
        }
    }
}

/// The signed-in operator as known to the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceIdentity {
    pub id: i64,
    pub user_name: String,
    pub first_name: String,
    pub display_name: String,
}

/// The account whose projects are offered for time entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountScope {
    pub id: i64,
    pub name: String,
}

/// An entry being assembled by the time entry loop. Fields are filled one
/// prompt at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeEntry {
    pub task_id: String,
    pub hours: Option<u8>,
    pub comment: Option<String>,
}

impl TimeEntry {
    pub fn new(task_id: impl Into<String>) -> Self {
        Self {
            task_id: task_id.into(),
            hours: None,
            comment: None,
        }
    }
}

/// Everything sent to the service to create one time entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntrySubmission {
    pub resource_id: i64,
    /// Always `None` for now: the role to bill under is not chosen yet.
    pub role_id: Option<RoleId>,
    pub task_id: String,
    pub date_worked: Date,
    pub hours: u8,
    pub comment: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Saved { item_id: Option<i64> },
    Rejected { return_code: i32, reasons: Vec<String> },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credentials_debug_hides_password() {
        let credentials = Credentials::new("alice", "secret");
        let rendered = format!("{:?}", credentials);
        assert!(rendered.contains("alice"));
        assert!(!rendered.contains("secret"));
    }

    #[test]
    fn fresh_entry_has_only_task() {
        let entry = TimeEntry::new("42");
        assert_eq!(entry.task_id, "42");
        assert_eq!(entry.hours, None);
        assert_eq!(entry.comment, None);
    }
}
