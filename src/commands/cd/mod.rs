// src/commands/cd/mod.rs
use async_trait::async_trait;

use crate::commands::{Command, CommandContext, CommandResult};

pub struct CdCommand;

#[async_trait]
impl Command for CdCommand {
    fn name(&self) -> &'static str {
        "cd"
    }

    fn documentation(&self) -> &'static str {
        "Changes the shell's current working directory to the one specified."
    }

    async fn validate(&self, ctx: &CommandContext) -> Result<(), String> {
        if ctx.args.len() != 1 {
            return Err("Requires 1 argument.".to_string());
        }
        match ctx.fs.lookup(&ctx.args[0]).await {
            None => Err("No such file or directory or path does not exist.".to_string()),
            Some(entry) if !entry.kind.is_directory() => {
                Err(format!("{} is not a directory.", ctx.args[0]))
            }
            Some(_) => Ok(()),
        }
    }

    async fn execute(&self, ctx: CommandContext) -> CommandResult {
        match ctx.fs.change_directory(&ctx.args[0]).await {
            Ok(()) => CommandResult::empty(),
            Err(err) => CommandResult::error(err.to_string()),
        }
    }
}
