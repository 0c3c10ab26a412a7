use thiserror::Error;

use crate::api::{ServiceError, TimeTrackingService};
use crate::prompt::{ask_comment, ask_hours, ask_question, Answer};
use crate::session::{SessionContext, WorkflowSettings};
use crate::table::render_table;
use crate::terminal::{Status, Terminal, TerminalError};
use crate::types::{EntrySubmission, SubmitOutcome};

pub const PROJECT_PROMPT: &str = "To make a time entry please enter an id from an above project: ";
pub const TASK_PROMPT: &str = "To make a time entry please enter an id from an above task: ";
pub const ANOTHER_ENTRY_QUESTION: &str = "Would you like to make another entry";
pub const SAVED: &str = "saved";
pub const NOT_SAVED: &str = "Could not save due to error";

#[derive(Debug, Error)]
enum EntryError {
    #[error(transparent)]
    Service(#[from] ServiceError),
    #[error(transparent)]
    Terminal(#[from] TerminalError),
}

/// Records entries until the operator declines to make another one.
///
/// Service failures end the current entry, not the session: they are
/// reported and the operator is asked whether to continue.
pub async fn run_entry_loop<S, T>(
    context: &mut SessionContext,
    service: &S,
    terminal: &mut T,
    settings: &WorkflowSettings,
) -> Result<(), TerminalError>
where
    S: TimeTrackingService + ?Sized,
    T: Terminal + ?Sized,
{
    loop {
        match make_entry(context, service, terminal, settings).await {
            Ok(SubmitOutcome::Saved { item_id }) => {
                tracing::info!("saved time entry {:?}", item_id);
                terminal.status(Status::Success, SAVED);
            }
            Ok(SubmitOutcome::Rejected {
                return_code,
                reasons,
            }) => {
                tracing::warn!("time entry rejected with code {}", return_code);
                terminal.status(Status::Failure, NOT_SAVED);
                for reason in reasons {
                    terminal.say(&reason);
                }
            }
            Err(EntryError::Service(e)) => {
                tracing::error!("time entry failed: {:?}", e);
                terminal.status(Status::Failure, NOT_SAVED);
                terminal.say(&e.describe());
            }
            Err(EntryError::Terminal(e)) => return Err(e),
        }
        context.current_entry = None;

        if ask_question(terminal, ANOTHER_ENTRY_QUESTION).await? == Answer::No {
            return Ok(());
        }
    }
}

/// One pass: project, task, hours, comment, submit.
async fn make_entry<S, T>(
    context: &mut SessionContext,
    service: &S,
    terminal: &mut T,
    settings: &WorkflowSettings,
) -> Result<SubmitOutcome, EntryError>
where
    S: TimeTrackingService + ?Sized,
    T: Terminal + ?Sized,
{
    if !context.project_cache.is_populated() {
        terminal.status(
            Status::Progress,
            &format!("loading {} projects...", settings.project_label),
        );
    }
    let projects = context
        .project_cache
        .get_projects(service, &context.account, &settings.project_label)
        .await?;
    terminal.say(&render_table(&projects));
    let project_id = terminal.read_choice(PROJECT_PROMPT, &projects).await?;

    let tasks = service.tasks(&project_id).await?;
    if tasks.is_empty() {
        tracing::debug!("no tasks for project {:?}", project_id);
    }
    terminal.say(&render_table(&tasks));
    let task_id = terminal.read_choice(TASK_PROMPT, &tasks).await?;

    let resource_id = context.identity.id;
    let entry = context.begin_entry(task_id);
    let hours = ask_hours(terminal).await?;
    entry.hours = Some(hours);
    let comment = ask_comment(terminal).await?;
    entry.comment = Some(comment.clone());
    tracing::debug!(
        task_id = %entry.task_id,
        hours = ?entry.hours,
        comment = ?entry.comment,
        "submitting time entry"
    );

    let submission = EntrySubmission {
        resource_id,
        role_id: None,
        task_id: entry.task_id.clone(),
        date_worked: today(),
        hours,
        comment,
    };
    Ok(service.create_time_entry(&submission).await?)
}

fn today() -> time::Date {
    time::OffsetDateTime::now_local()
        .unwrap_or_else(|_| time::OffsetDateTime::now_utc())
        .date()
}
