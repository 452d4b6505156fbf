//! Line-oriented terminal front end for a wizard session.
//!
//! Each input line is one user action: edit a field, press Continue/Back,
//! or start over. After every action the current screen is rendered again.

use async_trait::async_trait;
use serde_json::Value;
use std::io::{BufRead, Write};
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

use crate::{
    context::Context,
    error::{GraphError, Result},
    graph::ExecutionStatus,
    runner::FlowRunner,
};

const HELP: &str = "\
Commands:
  set <field> <value>     set a field (JSON values accepted, otherwise text)
  unset <field>           clear a field
  toggle <field> <id>     select/deselect an option of a multi-select field
  next                    continue to the next screen
  back                    go back one screen
  restart                 start over
  show                    print all form fields
  help                    this message
  quit                    leave";

/// One parsed console action
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Set { key: String, value: Value },
    Unset { key: String },
    Toggle { key: String, id: String },
    Next,
    Back,
    Restart,
    Show,
    Help,
    Quit,
    /// Verb the core console does not know; offered to the extension
    Other { verb: String, args: Vec<String> },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("usage: {0}")]
    Usage(&'static str),
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> std::result::Result<Self, Self::Err> {
        let line = line.trim();
        if line.is_empty() {
            return Err(CommandError::Empty);
        }
        let (verb, rest) = split_word(line);

        match verb.to_ascii_lowercase().as_str() {
            "set" => {
                let (key, value) = split_word(rest);
                if key.is_empty() || value.is_empty() {
                    return Err(CommandError::Usage("set <field> <value>"));
                }
                Ok(Command::Set {
                    key: key.to_string(),
                    value: parse_value(value),
                })
            }
            "unset" => {
                if rest.is_empty() {
                    return Err(CommandError::Usage("unset <field>"));
                }
                Ok(Command::Unset {
                    key: rest.to_string(),
                })
            }
            "toggle" => {
                let (key, id) = split_word(rest);
                if key.is_empty() || id.is_empty() {
                    return Err(CommandError::Usage("toggle <field> <id>"));
                }
                Ok(Command::Toggle {
                    key: key.to_string(),
                    id: id.to_string(),
                })
            }
            "next" | "continue" => Ok(Command::Next),
            "back" => Ok(Command::Back),
            "restart" => Ok(Command::Restart),
            "show" => Ok(Command::Show),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            _ => Ok(Command::Other {
                verb: verb.to_string(),
                args: rest.split_whitespace().map(str::to_string).collect(),
            }),
        }
    }
}

fn split_word(input: &str) -> (&str, &str) {
    match input.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (input, ""),
    }
}

/// JSON when the text parses as JSON, plain string otherwise
pub fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

/// Application specific console verbs
#[async_trait]
pub trait CommandExtension: Send + Sync {
    /// Handle `verb`; `None` means the verb is not ours.
    async fn handle(&self, verb: &str, args: &[String], context: &Context) -> Option<String>;

    /// Extra lines appended to `help`
    fn help(&self) -> &'static str;
}

/// Drives one session from text input
pub struct Console {
    runner: FlowRunner,
    session_id: String,
    extension: Option<Arc<dyn CommandExtension>>,
}

impl Console {
    pub fn new(runner: FlowRunner, session_id: impl Into<String>) -> Self {
        Self {
            runner,
            session_id: session_id.into(),
            extension: None,
        }
    }

    pub fn with_extension(mut self, extension: Arc<dyn CommandExtension>) -> Self {
        self.extension = Some(extension);
        self
    }

    /// Read commands until `quit` or end of input.
    pub async fn run<R: BufRead, W: Write>(&self, input: R, output: &mut W) -> anyhow::Result<()> {
        writeln!(output, "{}", self.runner.render(&self.session_id).await?)?;

        for line in input.lines() {
            let line = line?;
            let command = match line.parse::<Command>() {
                Ok(command) => command,
                Err(CommandError::Empty) => continue,
                Err(e) => {
                    writeln!(output, "{e}")?;
                    continue;
                }
            };
            if command == Command::Quit {
                break;
            }

            if let Some(message) = self.apply(command).await? {
                writeln!(output, "{message}")?;
            }
            writeln!(output, "{}", self.runner.render(&self.session_id).await?)?;
        }

        Ok(())
    }

    /// Apply one command to the session, returning any message for the user.
    pub async fn apply(&self, command: Command) -> Result<Option<String>> {
        debug!(session_id = %self.session_id, ?command, "console command");
        let context = self.runner.context(&self.session_id).await?;

        match command {
            Command::Set { key, value } => {
                context.set(key, value).await;
                Ok(None)
            }
            Command::Unset { key } => {
                context.remove(&key).await;
                Ok(None)
            }
            Command::Toggle { key, id } => {
                context.toggle(&key, &id).await;
                Ok(None)
            }
            Command::Next => {
                let result = self.runner.run(&self.session_id).await?;
                Ok(match result.status {
                    ExecutionStatus::Completed => result.response.or(Some("Done.".to_string())),
                    ExecutionStatus::WaitingForInput => result.response,
                })
            }
            Command::Back => Ok(self.runner.back(&self.session_id).await?.response),
            Command::Restart => {
                self.runner.restart(&self.session_id).await?;
                Ok(Some("Starting over.".to_string()))
            }
            Command::Show => serde_json::to_string_pretty(&context.snapshot())
                .map(Some)
                .map_err(|e| GraphError::ContextError(e.to_string())),
            Command::Help => Ok(Some(match &self.extension {
                Some(extension) => format!("{HELP}\n{}", extension.help()),
                None => HELP.to_string(),
            })),
            Command::Quit => Ok(None),
            Command::Other { verb, args } => {
                let handled = match &self.extension {
                    Some(extension) => extension.handle(&verb, &args, &context).await,
                    None => None,
                };
                Ok(Some(handled.unwrap_or_else(|| {
                    format!("Unknown command `{verb}`. Type `help` for the list.")
                })))
            }
        }
    }
}
