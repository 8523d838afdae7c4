// src/commands/echo/mod.rs
use async_trait::async_trait;

use crate::commands::utils::{is_quoted, unquote};
use crate::commands::{Command, CommandContext, CommandResult};

pub struct EchoCommand;

#[async_trait]
impl Command for EchoCommand {
    fn name(&self) -> &'static str {
        "echo"
    }

    fn documentation(&self) -> &'static str {
        "Displays text on screen."
    }

    async fn validate(&self, ctx: &CommandContext) -> Result<(), String> {
        if ctx.args.len() != 1 {
            return Err("Requires 1 argument.".to_string());
        }
        if !is_quoted(&ctx.args[0]) {
            return Err("String argument must be surrounded by quotation marks.".to_string());
        }
        Ok(())
    }

    async fn execute(&self, ctx: CommandContext) -> CommandResult {
        CommandResult::success(unquote(&ctx.args[0]))
    }
}
