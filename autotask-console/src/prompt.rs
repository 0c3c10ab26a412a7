//! Retry-until-accepted input capture.
//!
//! Every operator answer that has to satisfy a rule goes through
//! [`prompt_until`]: the prompt is repeated, with a corrective message, until
//! the input is accepted. There is no retry limit.

use std::fmt;

use crate::terminal::{Terminal, TerminalError};

pub const HOURS_PROMPT: &str = "How much time did you spend: ";
pub const HOURS_CORRECTION: &str = "Time must be > 0 and <= 24";
pub const COMMENT_PROMPT: &str = "Please make a comment about your time entry: ";
pub const COMMENT_CORRECTION: &str = "Comments are not optional";
pub const ANSWER_CORRECTION: &str = "Please enter 0 for no and 1 for yes.";

/// Answer to a yes/no question, typed as `0` or `1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    No,
    Yes,
}

impl Answer {
    /// The literal token the operator typed.
    pub fn as_str(&self) -> &'static str {
        match self {
            Answer::No => "0",
            Answer::Yes => "1",
        }
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shows `prompt` until `accept` returns a value. A rejection's message is
/// shown before prompting again.
pub async fn prompt_until<T, V, F>(
    terminal: &mut T,
    prompt: &str,
    mut accept: F,
) -> Result<V, TerminalError>
where
    T: Terminal + ?Sized,
    F: FnMut(&str) -> Result<V, &'static str>,
{
    loop {
        let raw = terminal.read_line(prompt).await?;
        match accept(&raw) {
            Ok(value) => return Ok(value),
            Err(correction) => {
                tracing::debug!("rejected input for {:?}", prompt.trim());
                terminal.say(correction);
            }
        }
    }
}

/// Whole hours from the integer the input starts with, so `8.5` and `8h`
/// both count as 8.
pub fn accept_hours(raw: &str) -> Result<u8, &'static str> {
    leading_integer(raw)
        .filter(|hours| (1..=24).contains(hours))
        .map(|hours| hours as u8)
        .ok_or(HOURS_CORRECTION)
}

/// The optionally signed integer at the start of `raw`, ignoring whatever
/// follows its digits.
fn leading_integer(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let value = rest[..end].parse::<i64>().ok()?;
    Some(if negative { -value } else { value })
}

pub fn accept_comment(raw: &str) -> Result<String, &'static str> {
    if raw.trim().is_empty() {
        Err(COMMENT_CORRECTION)
    } else {
        Ok(raw.to_string())
    }
}

pub fn accept_answer(raw: &str) -> Result<Answer, &'static str> {
    match raw {
        "0" => Ok(Answer::No),
        "1" => Ok(Answer::Yes),
        _ => Err(ANSWER_CORRECTION),
    }
}

pub async fn ask_hours<T: Terminal + ?Sized>(terminal: &mut T) -> Result<u8, TerminalError> {
    prompt_until(terminal, HOURS_PROMPT, accept_hours).await
}

pub async fn ask_comment<T: Terminal + ?Sized>(terminal: &mut T) -> Result<String, TerminalError> {
    prompt_until(terminal, COMMENT_PROMPT, accept_comment).await
}

pub async fn ask_question<T: Terminal + ?Sized>(
    terminal: &mut T,
    question: &str,
) -> Result<Answer, TerminalError> {
    let prompt = format!("{}? [no:0,yes:1] ", question);
    prompt_until(terminal, &prompt, accept_answer).await
}
