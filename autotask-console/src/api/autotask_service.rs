use async_trait::async_trait;
use autotask::{
    Account, AutotaskClient, AutotaskFetchError, CreateResult, NewTimeEntry, Project, Resource,
    ResourceRole, Task,
};

use super::{ServiceConnector, ServiceError, TimeTrackingService};
use crate::types::{
    AccountScope, Credentials, EntrySubmission, ListItem, ResourceIdentity, RoleId,
    SubmitOutcome,
};

impl From<AutotaskFetchError> for ServiceError {
    fn from(e: AutotaskFetchError) -> Self {
        match e {
            AutotaskFetchError::Unauthorized => ServiceError::Unauthorized,
            AutotaskFetchError::ResponseError(msg) => ServiceError::Transport(msg),
            AutotaskFetchError::ParsingError(msg) => ServiceError::Malformed(msg),
            AutotaskFetchError::Other(msg) => ServiceError::Other(msg),
        }
    }
}

impl From<Resource> for ResourceIdentity {
    fn from(resource: Resource) -> Self {
        Self {
            id: resource.id,
            display_name: resource.display_name(),
            first_name: resource.first_name,
            user_name: resource.user_name,
        }
    }
}

impl From<Account> for AccountScope {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            name: account.account_name,
        }
    }
}

impl From<Project> for ListItem {
    fn from(project: Project) -> Self {
        ListItem::new(project.id, project.project_name)
    }
}

impl From<Task> for ListItem {
    fn from(task: Task) -> Self {
        ListItem::new(task.id, task.title)
    }
}

impl From<&EntrySubmission> for NewTimeEntry {
    fn from(submission: &EntrySubmission) -> Self {
        Self {
            resource_id: submission.resource_id,
            role_id: submission.role_id,
            task_id: submission.task_id.trim().to_string(),
            date_worked: submission.date_worked,
            hours_worked: submission.hours,
            summary_notes: submission.comment.clone(),
        }
    }
}

impl From<CreateResult> for SubmitOutcome {
    fn from(result: CreateResult) -> Self {
        if result.is_success() {
            SubmitOutcome::Saved {
                item_id: result.item_id,
            }
        } else {
            SubmitOutcome::Rejected {
                return_code: result.return_code,
                reasons: result.errors.into_iter().map(|e| e.message).collect(),
            }
        }
    }
}

/// Prefers an active role; resources without one fall back to their first role.
fn pick_role(roles: &[ResourceRole]) -> Option<RoleId> {
    roles
        .iter()
        .find(|role| role.is_active)
        .or_else(|| roles.first())
        .map(|role| role.role_id)
}

pub struct AutotaskConnector {
    url: String,
    integration_code: Option<String>,
}

impl AutotaskConnector {
    pub fn new(url: impl Into<String>, integration_code: Option<String>) -> Self {
        Self {
            url: url.into(),
            integration_code,
        }
    }
}

#[async_trait]
impl ServiceConnector for AutotaskConnector {
    type Service = AutotaskService;

    async fn connect(&self, credentials: &Credentials) -> Result<AutotaskService, ServiceError> {
        let client = AutotaskClient::connect(
            &self.url,
            &credentials.username,
            &credentials.password,
            self.integration_code.as_deref(),
        )
        .await?;
        tracing::info!("connected as {}", client.user_name());
        Ok(AutotaskService { client })
    }
}

pub struct AutotaskService {
    client: AutotaskClient,
}

#[async_trait]
impl TimeTrackingService for AutotaskService {
    async fn usage_info(&self) -> Result<String, ServiceError> {
        Ok(self.client.fetch_threshold_info().await?.to_string())
    }

    async fn find_resources(&self, username: &str) -> Result<Vec<ResourceIdentity>, ServiceError> {
        let resources = self.client.query_resources(username).await?;
        Ok(resources.into_iter().map(ResourceIdentity::from).collect())
    }

    async fn resource_role(&self, resource_id: i64) -> Result<Option<RoleId>, ServiceError> {
        let roles = self.client.query_resource_roles(resource_id).await?;
        Ok(pick_role(&roles))
    }

    async fn find_accounts(&self, name: &str) -> Result<Vec<AccountScope>, ServiceError> {
        let accounts = self.client.query_accounts(name).await?;
        Ok(accounts.into_iter().map(AccountScope::from).collect())
    }

    async fn projects(
        &self,
        account: &AccountScope,
        label: &str,
    ) -> Result<Vec<ListItem>, ServiceError> {
        let projects = self.client.query_projects(account.id, label).await?;
        Ok(projects.into_iter().map(ListItem::from).collect())
    }

    async fn tasks(&self, project_id: &str) -> Result<Vec<ListItem>, ServiceError> {
        let tasks = self.client.query_tasks(project_id).await?;
        Ok(tasks.into_iter().map(ListItem::from).collect())
    }

    async fn create_time_entry(
        &self,
        submission: &EntrySubmission,
    ) -> Result<SubmitOutcome, ServiceError> {
        let result = self
            .client
            .create_time_entry(&NewTimeEntry::from(submission))
            .await?;
        Ok(result.into())
    }
}
