use std::path::Path;

use thiserror::Error;

use crate::api::{ServiceConnector, ServiceError, TimeTrackingService};
use crate::credential_store;
use crate::project_cache::ProjectCache;
use crate::prompt::{ask_question, Answer};
use crate::session::{SessionContext, WorkflowSettings};
use crate::terminal::{Status, Terminal, TerminalError};
use crate::types::{Credentials, ResourceIdentity};

pub const USERNAME_PROMPT: &str = "Username: ";
pub const PASSWORD_PROMPT: &str = "Password: ";
pub const REMEMBER_QUESTION: &str = "Would you like me to remember that (plain text storage)";

/// Conditions that end the session before any entry can be made.
#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("Could not find that user.")]
    UnknownUser { username: String, matches: usize },
    #[error("Could not find an account matching \"{name}\".")]
    NoAccount { name: String },
    #[error("{}", .0.describe())]
    Service(#[from] ServiceError),
    #[error(transparent)]
    Terminal(#[from] TerminalError),
}

/// Saved credentials if there are any, otherwise asks for them and offers
/// to remember them.
pub async fn resolve_credentials<T: Terminal + ?Sized>(
    terminal: &mut T,
    store_path: &Path,
) -> Result<Credentials, TerminalError> {
    if let Some(credentials) = credential_store::load(store_path) {
        tracing::info!("using saved credentials for {}", credentials.username);
        return Ok(credentials);
    }

    let username = terminal.read_line(USERNAME_PROMPT).await?;
    let password = terminal.read_secret(PASSWORD_PROMPT).await?;
    let credentials = Credentials::new(username.trim(), password);

    if ask_question(terminal, REMEMBER_QUESTION).await? == Answer::Yes {
        match credential_store::save(store_path, &credentials) {
            Ok(()) => tracing::info!("saved credentials to {}", store_path.display()),
            Err(e) => {
                tracing::warn!("{:#}", e);
                terminal.status(Status::Failure, "Could not remember your credentials");
            }
        }
    }

    Ok(credentials)
}

/// Exactly one resource must carry the username.
async fn resolve_identity<S: TimeTrackingService + ?Sized>(
    service: &S,
    username: &str,
) -> Result<ResourceIdentity, BootstrapError> {
    let resources = service.find_resources(username).await?;
    let count = resources.len();
    let mut resources = resources.into_iter();

    match (resources.next(), resources.next()) {
        (Some(identity), None) => Ok(identity),
        _ => {
            tracing::error!("{} resource(s) match username {:?}", count, username);
            Err(BootstrapError::UnknownUser {
                username: username.to_string(),
                matches: count,
            })
        }
    }
}

/// Resolves credentials, signs in and looks up who the operator is.
pub async fn bootstrap<C, T>(
    connector: &C,
    terminal: &mut T,
    settings: &WorkflowSettings,
) -> Result<(SessionContext, C::Service), BootstrapError>
where
    C: ServiceConnector,
    T: Terminal + ?Sized,
{
    let credentials = resolve_credentials(terminal, &settings.credentials_path).await?;

    terminal.status(Status::Progress, "Connecting...");
    let service = connector.connect(&credentials).await?;

    match service.usage_info().await {
        Ok(usage) => terminal.status(Status::Usage, &usage),
        Err(ServiceError::Unauthorized) => return Err(ServiceError::Unauthorized.into()),
        Err(e) => tracing::warn!("could not read usage info: {}", e),
    }

    let identity = resolve_identity(&service, &credentials.username).await?;
    terminal.status(Status::Welcome, &format!("Welcome {}", identity.first_name));

    let role_id = service.resource_role(identity.id).await?;

    terminal.status(
        Status::Progress,
        &format!("loading {} data...", settings.account_name),
    );
    let account = service
        .find_accounts(&settings.account_name)
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| BootstrapError::NoAccount {
            name: settings.account_name.clone(),
        })?;

    let context = SessionContext {
        credentials,
        identity,
        role_id,
        account,
        project_cache: ProjectCache::default(),
        current_entry: None,
    };
    tracing::info!(
        "signed in as {} ({}) with role {:?}, account {}",
        context.identity.display_name,
        context.credentials.username,
        context.role_id,
        context.account.name
    );

    Ok((context, service))
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::api::DevBackend;
    use crate::credential_store::CREDENTIALS_FILE;
    use crate::terminal::scripted::ScriptedTerminal;

    fn settings(dir: &TempDir) -> WorkflowSettings {
        WorkflowSettings {
            credentials_path: dir.path().join(CREDENTIALS_FILE),
            account_name: "SRS".to_string(),
            project_label: "[Dev-Eng]".to_string(),
        }
    }

    fn resource(id: i64, user_name: &str, first_name: &str) -> ResourceIdentity {
        ResourceIdentity {
            id,
            user_name: user_name.to_string(),
            first_name: first_name.to_string(),
            display_name: first_name.to_string(),
        }
    }

    #[tokio::test]
    async fn declined_persistence_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let settings = settings(&dir);
        let backend = DevBackend::new().with_resources(vec![resource(1, "alice", "Alice")]);
        let mut terminal = ScriptedTerminal::new(&["alice", "secret", "0"]);

        let (context, _) = bootstrap(&backend, &mut terminal, &settings).await.unwrap();

        assert_eq!(context.credentials, Credentials::new("alice", "secret"));
        assert_eq!(terminal.secret_prompts, vec![PASSWORD_PROMPT]);
        assert!(!settings.credentials_path.exists());
    }

    #[tokio::test]
    async fn accepted_persistence_writes_credentials() {
        let dir = TempDir::new().unwrap();
        let settings = settings(&dir);
        let backend = DevBackend::new().with_resources(vec![resource(1, "alice", "Alice")]);
        let mut terminal = ScriptedTerminal::new(&["alice", "secret", "yes", "1"]);

        bootstrap(&backend, &mut terminal, &settings).await.unwrap();

        assert_eq!(
            credential_store::load(&settings.credentials_path),
            Some(Credentials::new("alice", "secret"))
        );
    }

    #[tokio::test]
    async fn saved_credentials_skip_prompts() {
        let dir = TempDir::new().unwrap();
        let settings = settings(&dir);
        credential_store::save(
            &settings.credentials_path,
            &Credentials::new("alice", "secret"),
        )
        .unwrap();
        let backend = DevBackend::new().with_resources(vec![resource(1, "alice", "Alice")]);
        let mut terminal = ScriptedTerminal::new(&[]);

        let (context, _) = bootstrap(&backend, &mut terminal, &settings).await.unwrap();

        assert!(terminal.prompts.is_empty());
        assert!(terminal.secret_prompts.is_empty());
        assert_eq!(backend.connections(), vec!["alice"]);
        assert_eq!(context.credentials.password, "secret");
    }

    #[tokio::test]
    async fn populates_context_and_greets() {
        let dir = TempDir::new().unwrap();
        let settings = settings(&dir);
        let backend = DevBackend::new();
        let mut terminal = ScriptedTerminal::new(&["dev", "pw", "0"]);

        let (context, _) = bootstrap(&backend, &mut terminal, &settings).await.unwrap();

        assert_eq!(context.identity.user_name, "dev");
        assert_eq!(context.role_id, Some(29683378));
        assert_eq!(context.account.id, 174);
        assert!(context.current_entry.is_none());
        assert!(!context.project_cache.is_populated());
        assert!(terminal.has_status(Status::Progress, "Connecting..."));
        assert!(terminal.has_status(Status::Welcome, "Welcome Dev"));
        assert!(terminal.has_status(Status::Progress, "loading SRS data..."));
    }

    #[tokio::test]
    async fn ambiguous_username_is_fatal() {
        let dir = TempDir::new().unwrap();
        let settings = settings(&dir);
        let backend = DevBackend::new().with_resources(vec![
            resource(1, "alice", "Alice"),
            resource(2, "alice", "Alicia"),
        ]);
        let mut terminal = ScriptedTerminal::new(&["alice", "secret", "0"]);

        let err = bootstrap(&backend, &mut terminal, &settings)
            .await
            .map(|_| ())
            .unwrap_err();

        assert!(matches!(
            err,
            BootstrapError::UnknownUser { matches: 2, .. }
        ));
        assert_eq!(err.to_string(), "Could not find that user.");
    }

    #[tokio::test]
    async fn unknown_username_is_fatal() {
        let dir = TempDir::new().unwrap();
        let settings = settings(&dir);
        let mut terminal = ScriptedTerminal::new(&["mallory", "pw", "0"]);

        let err = bootstrap(&DevBackend::new(), &mut terminal, &settings)
            .await
            .map(|_| ())
            .unwrap_err();

        assert!(matches!(
            err,
            BootstrapError::UnknownUser { matches: 0, .. }
        ));
    }

    #[tokio::test]
    async fn missing_account_is_fatal() {
        let dir = TempDir::new().unwrap();
        let settings = WorkflowSettings {
            account_name: "Nobody Inc".to_string(),
            ..settings(&dir)
        };
        let mut terminal = ScriptedTerminal::new(&["dev", "pw", "0"]);

        let err = bootstrap(&DevBackend::new(), &mut terminal, &settings)
            .await
            .map(|_| ())
            .unwrap_err();

        assert!(matches!(err, BootstrapError::NoAccount { .. }));
    }

    #[tokio::test]
    async fn rejected_sign_in_is_categorized() {
        let dir = TempDir::new().unwrap();
        let settings = settings(&dir);
        let mut terminal = ScriptedTerminal::new(&["  ", "pw", "0"]);

        let err = bootstrap(&DevBackend::new(), &mut terminal, &settings)
            .await
            .map(|_| ())
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "Authentication failed: the service rejected the credentials"
        );
    }
}
