use std::path::PathBuf;

use thiserror::Error;

use crate::api::ServiceConnector;
use crate::bootstrap::{bootstrap, BootstrapError};
use crate::entry_loop::run_entry_loop;
use crate::project_cache::ProjectCache;
use crate::terminal::{Status, Terminal, TerminalError};
use crate::types::{AccountScope, Credentials, ResourceIdentity, RoleId, TimeEntry};

/// Fixed inputs of a session, taken from configuration.
#[derive(Debug, Clone)]
pub struct WorkflowSettings {
    pub credentials_path: PathBuf,
    pub account_name: String,
    pub project_label: String,
}

/// State of one signed-in session, threaded through every step.
#[derive(Debug)]
pub struct SessionContext {
    pub credentials: Credentials,
    pub identity: ResourceIdentity,
    pub role_id: Option<RoleId>,
    pub account: AccountScope,
    pub project_cache: ProjectCache,
    /// The entry being assembled; `None` between entries.
    pub current_entry: Option<TimeEntry>,
}

impl SessionContext {
    /// Starts a fresh entry for `task_id`, discarding whatever was in progress.
    pub fn begin_entry(&mut self, task_id: impl Into<String>) -> &mut TimeEntry {
        self.current_entry.insert(TimeEntry::new(task_id))
    }
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Bootstrap(#[from] BootstrapError),
    #[error(transparent)]
    Terminal(#[from] TerminalError),
}

impl SessionError {
    /// The operator pressed Ctrl+C at a prompt.
    pub fn is_interrupted(&self) -> bool {
        matches!(
            self,
            SessionError::Terminal(TerminalError::Interrupted)
                | SessionError::Bootstrap(BootstrapError::Terminal(TerminalError::Interrupted))
        )
    }
}

/// Signs in, then records entries until the operator is done.
pub async fn run_session<C, T>(
    connector: &C,
    terminal: &mut T,
    settings: &WorkflowSettings,
) -> Result<SessionContext, SessionError>
where
    C: ServiceConnector,
    T: Terminal + ?Sized,
{
    let (mut context, service) = bootstrap(connector, terminal, settings).await?;
    run_entry_loop(&mut context, &service, terminal, settings).await?;
    terminal.status(Status::Farewell, "goodbye");
    Ok(context)
}

/// Tells the operator how the session ended. Returns whether it ended
/// cleanly; an interrupt counts as clean.
pub fn report_outcome<T: Terminal + ?Sized>(
    outcome: &Result<SessionContext, SessionError>,
    terminal: &mut T,
) -> bool {
    match outcome {
        Ok(_) => true,
        Err(e) if e.is_interrupted() => {
            tracing::info!("session interrupted");
            terminal.status(Status::Farewell, "goodbye");
            true
        }
        Err(e) => {
            tracing::error!("session ended: {:?}", e);
            terminal.status(Status::Failure, &e.to_string());
            false
        }
    }
}
