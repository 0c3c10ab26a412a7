use std::borrow::Cow::{self, Borrowed, Owned};
use std::io;

use async_trait::async_trait;
use crossterm::style::Stylize;
use rustyline::completion::{Completer, Pair};
use rustyline::config::{ColorMode, Configurer};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};
use thiserror::Error;

use crate::types::ListItem;

#[derive(Debug, Error)]
pub enum TerminalError {
    #[error("input closed")]
    Closed,
    #[error("interrupted")]
    Interrupted,
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),
}

impl From<ReadlineError> for TerminalError {
    fn from(e: ReadlineError) -> Self {
        match e {
            ReadlineError::Eof => TerminalError::Closed,
            ReadlineError::Interrupted => TerminalError::Interrupted,
            ReadlineError::Io(e) => TerminalError::Io(e),
            other => TerminalError::Io(io::Error::other(other)),
        }
    }
}

/// How a status line is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Hint,
    Progress,
    Usage,
    Welcome,
    Success,
    Failure,
    Farewell,
}

/// Line-based operator I/O.
#[async_trait]
pub trait Terminal: Send {
    /// Shows `prompt` and reads one line, without its line terminator.
    async fn read_line(&mut self, prompt: &str) -> Result<String, TerminalError>;

    /// Like [`Terminal::read_line`], offering the ids of `choices` for
    /// completion.
    async fn read_choice(
        &mut self,
        prompt: &str,
        choices: &[ListItem],
    ) -> Result<String, TerminalError>;

    /// Like [`Terminal::read_line`] but the typed characters are masked.
    async fn read_secret(&mut self, prompt: &str) -> Result<String, TerminalError>;

    fn say(&mut self, line: &str);

    fn status(&mut self, status: Status, line: &str);
}

/// Line editing for one prompt: id completion or masking.
#[derive(Debug, Clone, Default)]
struct LineHelper {
    choices: Vec<ListItem>,
    masking: bool,
}

impl LineHelper {
    fn completing(choices: &[ListItem]) -> Self {
        Self {
            choices: choices.to_vec(),
            masking: false,
        }
    }

    fn masked() -> Self {
        Self {
            choices: Vec::new(),
            masking: true,
        }
    }

    fn candidates(&self, typed: &str) -> Vec<Pair> {
        let typed = typed.trim_start();
        self.choices
            .iter()
            .filter(|choice| choice.id.starts_with(typed))
            .map(|choice| Pair {
                display: format!("{}  {}", choice.id, choice.name),
                replacement: choice.id.clone(),
            })
            .collect()
    }
}

impl Helper for LineHelper {}

impl Completer for LineHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        Ok((0, self.candidates(&line[..pos])))
    }
}

impl Highlighter for LineHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if self.masking {
            Owned("*".repeat(line.chars().count()))
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        self.masking
    }
}

impl Hinter for LineHelper {
    type Hint = String;
}

impl Validator for LineHelper {}

/// Reads from the controlling terminal with `rustyline`. Raw mode is only
/// held while a line is being edited; Ctrl+C there ends the read with
/// [`TerminalError::Interrupted`].
#[derive(Debug, Default)]
pub struct StdTerminal;

impl StdTerminal {
    pub fn new() -> Self {
        Self
    }

    async fn edit_line(prompt: &str, helper: LineHelper) -> Result<String, TerminalError> {
        let prompt = prompt.to_string();
        let line = tokio::task::spawn_blocking(move || {
            let mut editor = Editor::<LineHelper, DefaultHistory>::new()?;
            if helper.masking {
                editor.set_color_mode(ColorMode::Forced);
            }
            editor.set_helper(Some(helper));
            editor.readline(&prompt)
        })
        .await
        .map_err(io::Error::other)??;
        Ok(line)
    }
}

#[async_trait]
impl Terminal for StdTerminal {
    async fn read_line(&mut self, prompt: &str) -> Result<String, TerminalError> {
        Self::edit_line(prompt, LineHelper::default()).await
    }

    async fn read_choice(
        &mut self,
        prompt: &str,
        choices: &[ListItem],
    ) -> Result<String, TerminalError> {
        Self::edit_line(prompt, LineHelper::completing(choices)).await
    }

    async fn read_secret(&mut self, prompt: &str) -> Result<String, TerminalError> {
        Self::edit_line(prompt, LineHelper::masked()).await
    }

    fn say(&mut self, line: &str) {
        println!("{}", line);
    }

    fn status(&mut self, status: Status, line: &str) {
        println!("{}", styled(status, line));
    }
}

pub fn styled(status: Status, line: &str) -> String {
    let content = line.to_string();
    match status {
        Status::Hint => content.cyan().underlined().reverse().to_string(),
        Status::Progress => content.green().reverse().to_string(),
        Status::Usage => content.yellow().to_string(),
        Status::Welcome => content.cyan().reverse().to_string(),
        Status::Success => content.green().reverse().to_string(),
        Status::Failure => content.red().reverse().to_string(),
        Status::Farewell => content.blue().reverse().to_string(),
    }
}

#[cfg(test)]
pub(crate) mod scripted {
    use std::collections::VecDeque;

    use super::*;

    /// Replays queued input lines and records everything shown.
    #[derive(Debug, Default)]
    pub struct ScriptedTerminal {
        input: VecDeque<Result<String, fn() -> TerminalError>>,
        pub prompts: Vec<String>,
        pub secret_prompts: Vec<String>,
        /// Ids offered for completion, one list per choice prompt.
        pub offered: Vec<Vec<String>>,
        pub output: Vec<String>,
        pub statuses: Vec<(Status, String)>,
    }

    impl ScriptedTerminal {
        pub fn new(input: &[&str]) -> Self {
            Self {
                input: input.iter().map(|line| Ok(line.to_string())).collect(),
                ..Default::default()
            }
        }

        /// Queues an operator interrupt after the scripted lines.
        pub fn then_interrupt(mut self) -> Self {
            self.input.push_back(Err(|| TerminalError::Interrupted));
            self
        }

        pub fn remaining_input(&self) -> usize {
            self.input.len()
        }

        pub fn said(&self, line: &str) -> bool {
            self.output.iter().any(|l| l == line)
        }

        pub fn count_said(&self, line: &str) -> usize {
            self.output.iter().filter(|l| *l == line).count()
        }

        pub fn has_status(&self, status: Status, line: &str) -> bool {
            self.statuses.iter().any(|(s, l)| *s == status && l == line)
        }

        fn next_input(&mut self) -> Result<String, TerminalError> {
            match self.input.pop_front() {
                Some(Ok(line)) => Ok(line),
                Some(Err(error)) => Err(error()),
                None => Err(TerminalError::Closed),
            }
        }
    }

    #[async_trait]
    impl Terminal for ScriptedTerminal {
        async fn read_line(&mut self, prompt: &str) -> Result<String, TerminalError> {
            self.prompts.push(prompt.to_string());
            self.next_input()
        }

        async fn read_choice(
            &mut self,
            prompt: &str,
            choices: &[ListItem],
        ) -> Result<String, TerminalError> {
            self.offered
                .push(choices.iter().map(|choice| choice.id.clone()).collect());
            self.read_line(prompt).await
        }

        async fn read_secret(&mut self, prompt: &str) -> Result<String, TerminalError> {
            self.secret_prompts.push(prompt.to_string());
            self.next_input()
        }

        fn say(&mut self, line: &str) {
            self.output.push(line.to_string());
        }

        fn status(&mut self, status: Status, line: &str) {
            self.statuses.push((status, line.to_string()));
        }
    }
}
