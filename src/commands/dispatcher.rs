//! Command Dispatcher
//!
//! Orchestrates one input line through the pipeline: tokenize, resolve the
//! command against the registry, detect and validate redirection, strip the
//! recursion flag, validate arguments, execute, and route output either to
//! the caller or into the redirection target.

use std::sync::Arc;

use crate::fs::VirtualFileSystem;
use crate::history::History;

use super::redirect::{self, RedirectClause};
use super::registry::{create_default_registry, CommandRegistry};
use super::types::{Command, CommandContext, CommandResult, DispatchError};

pub struct Dispatcher {
    registry: CommandRegistry,
    fs: Arc<VirtualFileSystem>,
    history: Arc<History>,
}

impl Dispatcher {
    pub fn new(fs: Arc<VirtualFileSystem>, history: Arc<History>) -> Arc<Self> {
        Arc::new(Self {
            registry: create_default_registry(),
            fs,
            history,
        })
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    /// Run one input line to completion. Pipeline failures come back as an
    /// error result; they never unwind past the dispatcher.
    pub async fn dispatch(self: Arc<Self>, line: &str) -> CommandResult {
        match Self::run(&self, line).await {
            Ok(result) => result,
            Err(err) => CommandResult::error(err.to_string()),
        }
    }

    async fn run(this: &Arc<Self>, line: &str) -> Result<CommandResult, DispatchError> {
        let (name, mut args) = tokenize_line(line);
        let command = this
            .registry
            .get(&name)
            .ok_or_else(|| DispatchError::UnknownCommand(name.clone()))?;

        // Redirection never applies to exit.
        let mut clause: Option<RedirectClause> = None;
        if command.name() != "exit" {
            let (pre, raw_clause) = redirect::split_redirection(&args);
            if let Some(raw) = raw_clause {
                clause = Some(
                    redirect::validate_clause(&this.fs, &raw)
                        .await
                        .map_err(DispatchError::InvalidRedirection)?,
                );
                args = pre;
            }
        }

        let recursive = strip_recursive_flag(&mut args);
        let ctx = CommandContext {
            args,
            recursive,
            fs: this.fs.clone(),
            history: this.history.clone(),
            dispatcher: Arc::clone(this),
        };

        if let Err(reason) = command.validate(&ctx).await {
            return Err(DispatchError::InvalidArguments {
                command: command.name().to_string(),
                reason,
            });
        }

        let mut result = command.execute(ctx).await;
        if let Some(clause) = clause {
            redirect::apply(&this.fs, &clause, &result.stdout).await?;
            result.stdout = String::new();
        }
        Ok(result)
    }

    /// Resolve a command for documentation purposes only (`man`): name
    /// lookup with the `!` special case, no redirection, no validation.
    pub fn resolve_for_documentation(&self, name: &str) -> Option<&dyn Command> {
        let canonical = if name.starts_with('!') { "!" } else { name };
        self.registry.get(canonical)
    }
}

/// Split an input line on whitespace, except inside double quotes. Quotes
/// stay in the tokens; commands unquote their own arguments. A leading `!N`
/// resolves to the recall command with `N` as its first argument.
pub fn tokenize_line(line: &str) -> (String, Vec<String>) {
    let mut tokens: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    for c in line.chars() {
        if c == '"' {
            in_quotes = !in_quotes;
            current.push(c);
        } else if c.is_whitespace() && !in_quotes {
            if !current.is_empty() {
                tokens.push(std::mem::take(&mut current));
            }
        } else {
            current.push(c);
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }

    if tokens.is_empty() {
        return (String::new(), Vec::new());
    }
    let mut args = tokens.split_off(1);
    let mut name = tokens.pop().unwrap_or_default();
    if name.len() > 1 && name.starts_with('!') {
        args.insert(0, name[1..].to_string());
        name = "!".to_string();
    }
    (name, args)
}

/// Strip a leading case-insensitive `-R` token, reporting whether it was
/// present.
fn strip_recursive_flag(args: &mut Vec<String>) -> bool {
    if args
        .first()
        .map(|a| a.eq_ignore_ascii_case("-r"))
        .unwrap_or(false)
    {
        args.remove(0);
        true
    } else {
        false
    }
}

// ============================================================================
// Tests
// ============================================================================
