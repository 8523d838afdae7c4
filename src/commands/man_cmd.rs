//! The `man` command: displays the documentation of other commands.

use async_trait::async_trait;

use super::types::{Command, CommandContext, CommandResult};

pub struct ManCommand;

#[async_trait]
impl Command for ManCommand {
    fn name(&self) -> &'static str {
        "man"
    }

    fn documentation(&self) -> &'static str {
        "Displays the documentation of various commands."
    }

    async fn validate(&self, ctx: &CommandContext) -> Result<(), String> {
        if ctx.args.len() != 1 {
            return Err("Requires 1 argument.".to_string());
        }
        // Documentation-only lookup: arguments of the named command are
        // never inspected, and asking for man itself is fine.
        if ctx.dispatcher.resolve_for_documentation(&ctx.args[0]).is_none() {
            return Err(format!("No manual entry for {}", ctx.args[0]));
        }
        Ok(())
    }

    async fn execute(&self, ctx: CommandContext) -> CommandResult {
        match ctx.dispatcher.resolve_for_documentation(&ctx.args[0]) {
            Some(command) => CommandResult::success(format!(
                "Command {}:\n{}",
                command.name().to_uppercase(),
                command.documentation()
            )),
            None => CommandResult::error(format!("No manual entry for {}", ctx.args[0])),
        }
    }
}
