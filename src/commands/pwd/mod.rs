// src/commands/pwd/mod.rs
use async_trait::async_trait;

use crate::commands::{Command, CommandContext, CommandResult};

pub struct PwdCommand;

#[async_trait]
impl Command for PwdCommand {
    fn name(&self) -> &'static str {
        "pwd"
    }

    fn documentation(&self) -> &'static str {
        "Displays the absolute path of the current working directory."
    }

    async fn validate(&self, ctx: &CommandContext) -> Result<(), String> {
        if ctx.args.is_empty() {
            Ok(())
        } else {
            Err("Does not take in any arguments.".to_string())
        }
    }

    async fn execute(&self, ctx: CommandContext) -> CommandResult {
        CommandResult::success(ctx.fs.current_path().await)
    }
}
