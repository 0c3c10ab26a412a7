mod autotask_service;
mod dev_backend;

pub use autotask_service::AutotaskConnector;
pub use dev_backend::{DevBackend, DEV_USERNAME};

use async_trait::async_trait;
use thiserror::Error;

use crate::types::{
    AccountScope, Credentials, EntrySubmission, ListItem, ResourceIdentity, RoleId,
    SubmitOutcome,
};

/// Failures talking to the time-tracking service, grouped by what the
/// operator can do about them.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("the service rejected the credentials")]
    Unauthorized,
    #[error("{0}")]
    Transport(String),
    #[error("{0}")]
    Malformed(String),
    #[error("{0}")]
    Other(String),
}

impl ServiceError {
    pub fn category(&self) -> &'static str {
        match self {
            ServiceError::Unauthorized => "Authentication failed",
            ServiceError::Transport(_) => "Could not reach the service",
            ServiceError::Malformed(_) => "Unexpected response from the service",
            ServiceError::Other(_) => "Service error",
        }
    }

    /// One line for the operator, e.g. `Could not reach the service: timed out`.
    pub fn describe(&self) -> String {
        format!("{}: {}", self.category(), self)
    }
}

/// Operations the session workflow needs from the time-tracking service.
#[async_trait]
pub trait TimeTrackingService: Send + Sync {
    /// Usage/quota summary shown after signing in.
    async fn usage_info(&self) -> Result<String, ServiceError>;

    async fn find_resources(&self, username: &str) -> Result<Vec<ResourceIdentity>, ServiceError>;

    /// The role the resource bills under, if it has any.
    async fn resource_role(&self, resource_id: i64) -> Result<Option<RoleId>, ServiceError>;

    async fn find_accounts(&self, name: &str) -> Result<Vec<AccountScope>, ServiceError>;

    async fn projects(
        &self,
        account: &AccountScope,
        label: &str,
    ) -> Result<Vec<ListItem>, ServiceError>;

    /// Tasks of a project. `project_id` is passed through as typed.
    async fn tasks(&self, project_id: &str) -> Result<Vec<ListItem>, ServiceError>;

    async fn create_time_entry(
        &self,
        submission: &EntrySubmission,
    ) -> Result<SubmitOutcome, ServiceError>;
}

/// Signs in to a service with resolved credentials.
#[async_trait]
pub trait ServiceConnector: Send + Sync {
    type Service: TimeTrackingService;

    async fn connect(&self, credentials: &Credentials) -> Result<Self::Service, ServiceError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describe_prefixes_category() {
        let err = ServiceError::Transport("connection refused".to_string());
        assert_eq!(err.describe(), "Could not reach the service: connection refused");
        assert_eq!(
            ServiceError::Unauthorized.describe(),
            "Authentication failed: the service rejected the credentials"
        );
    }
}
