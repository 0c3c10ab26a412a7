use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::{ServiceConnector, ServiceError, TimeTrackingService};
use crate::types::{
    AccountScope, Credentials, EntrySubmission, ListItem, ResourceIdentity, RoleId,
    SubmitOutcome,
};

pub const DEV_USERNAME: &str = "dev";

/// In-memory stand-in for the time-tracking service.
///
/// Clones share state, so a test can keep one handle for assertions while
/// the workflow owns another.
#[derive(Debug, Clone)]
pub struct DevBackend {
    store: Arc<Mutex<DevStore>>,
}

#[derive(Debug)]
struct DevStore {
    resources: Vec<ResourceIdentity>,
    roles: Vec<(i64, RoleId)>,
    accounts: Vec<AccountScope>,
    projects: Vec<(i64, ListItem)>,
    tasks: Vec<(String, ListItem)>,
    connections: Vec<String>,
    project_fetches: usize,
    submissions: Vec<EntrySubmission>,
    reject_submissions: bool,
    task_outage: bool,
}

impl Default for DevBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl DevBackend {
    pub fn new() -> Self {
        Self {
            store: Arc::new(Mutex::new(seed_dev_store())),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, DevStore> {
        self.store.lock().expect("dev store lock poisoned")
    }
}

#[cfg(test)]
impl DevBackend {
    /// Replace the known resources.
    pub fn with_resources(self, resources: Vec<ResourceIdentity>) -> Self {
        self.lock().resources = resources;
        self
    }

    /// Answer every submission with a non-success return code.
    pub fn rejecting_submissions(self) -> Self {
        self.lock().reject_submissions = true;
        self
    }

    /// Fail every task lookup as if the service were unreachable.
    pub fn with_task_outage(self) -> Self {
        self.lock().task_outage = true;
        self
    }

    /// Usernames of every successful connect, in order.
    pub fn connections(&self) -> Vec<String> {
        self.lock().connections.clone()
    }

    /// Number of project listings served.
    pub fn project_fetches(&self) -> usize {
        self.lock().project_fetches
    }

    /// Every submitted entry, accepted or not.
    pub fn submissions(&self) -> Vec<EntrySubmission> {
        self.lock().submissions.clone()
    }
}

#[async_trait]
impl ServiceConnector for DevBackend {
    type Service = DevBackend;

    async fn connect(&self, credentials: &Credentials) -> Result<DevBackend, ServiceError> {
        if credentials.username.trim().is_empty() {
            return Err(ServiceError::Unauthorized);
        }
        self.lock().connections.push(credentials.username.clone());
        Ok(self.clone())
    }
}

#[async_trait]
impl TimeTrackingService for DevBackend {
    async fn usage_info(&self) -> Result<String, ServiceError> {
        let store = self.lock();
        let used = store.connections.len() + store.project_fetches + store.submissions.len();
        Ok(format!(
            "API usage: {} of 10000 requests in the current 60 minute window",
            used
        ))
    }

    async fn find_resources(&self, username: &str) -> Result<Vec<ResourceIdentity>, ServiceError> {
        Ok(self
            .lock()
            .resources
            .iter()
            .filter(|resource| resource.user_name == username)
            .cloned()
            .collect())
    }

    async fn resource_role(&self, resource_id: i64) -> Result<Option<RoleId>, ServiceError> {
        Ok(self
            .lock()
            .roles
            .iter()
            .find(|(id, _)| *id == resource_id)
            .map(|(_, role)| *role))
    }

    async fn find_accounts(&self, name: &str) -> Result<Vec<AccountScope>, ServiceError> {
        Ok(self
            .lock()
            .accounts
            .iter()
            .filter(|account| account.name.contains(name))
            .cloned()
            .collect())
    }

    async fn projects(
        &self,
        account: &AccountScope,
        label: &str,
    ) -> Result<Vec<ListItem>, ServiceError> {
        let mut store = self.lock();
        store.project_fetches += 1;
        Ok(store
            .projects
            .iter()
            .filter(|(account_id, project)| *account_id == account.id && project.name.contains(label))
            .map(|(_, project)| project.clone())
            .collect())
    }

    async fn tasks(&self, project_id: &str) -> Result<Vec<ListItem>, ServiceError> {
        let store = self.lock();
        if store.task_outage {
            return Err(ServiceError::Transport(
                "connection refused (dev outage)".to_string(),
            ));
        }
        Ok(store
            .tasks
            .iter()
            .filter(|(id, _)| id == project_id.trim())
            .map(|(_, task)| task.clone())
            .collect())
    }

    async fn create_time_entry(
        &self,
        submission: &EntrySubmission,
    ) -> Result<SubmitOutcome, ServiceError> {
        let mut store = self.lock();
        store.submissions.push(submission.clone());

        let known_task = store
            .tasks
            .iter()
            .any(|(_, task)| task.id == submission.task_id.trim());
        if store.reject_submissions || !known_task {
            return Ok(SubmitOutcome::Rejected {
                return_code: -1,
                reasons: vec![format!("Task {} is not available", submission.task_id)],
            });
        }

        Ok(SubmitOutcome::Saved {
            item_id: Some(store.submissions.len() as i64),
        })
    }
}

fn seed_dev_store() -> DevStore {
    let resource = ResourceIdentity {
        id: 29682885,
        user_name: DEV_USERNAME.to_string(),
        first_name: "Dev".to_string(),
        display_name: "Dev User".to_string(),
    };

    let project = |id: i64, name: &str| (174, ListItem::new(id, format!("[Dev-Eng] {}", name)));
    let task = |project_id: &str, id: i64, title: &str| {
        (project_id.to_string(), ListItem::new(id, title))
    };

    DevStore {
        roles: vec![(resource.id, 29683378)],
        resources: vec![resource],
        accounts: vec![AccountScope {
            id: 174,
            name: "SRS Demo Account".to_string(),
        }],
        projects: vec![
            project(101, "Nordic Crisis Manager"),
            project(102, "Azure DevOps Integration"),
            project(103, "TUI Development"),
            (174, ListItem::new(104, "[Sales] Onboarding")),
        ],
        tasks: vec![
            task("101", 1011, "Backend Development"),
            task("101", 1012, "Code Review"),
            task("102", 1021, "API Integration"),
            task("103", 1031, "Feature Implementation"),
            task("103", 1032, "Bug Fixing"),
        ],
        connections: Vec::new(),
        project_fetches: 0,
        submissions: Vec::new(),
        reject_submissions: false,
        task_outage: false,
    }
}
