//! The `!N` command: recalls the N-th input line from history and runs it
//! through the full pipeline again, redirection included.

use async_trait::async_trait;

use super::types::{Command, CommandContext, CommandResult};

pub struct ExclaimCommand;

#[async_trait]
impl Command for ExclaimCommand {
    fn name(&self) -> &'static str {
        "!"
    }

    fn documentation(&self) -> &'static str {
        "Recalls a command from the history and executes it."
    }

    async fn validate(&self, ctx: &CommandContext) -> Result<(), String> {
        if ctx.args.len() != 1 {
            return Err("Requires 1 argument.".to_string());
        }
        let n: i64 = ctx.args[0]
            .parse()
            .map_err(|_| "Argument must be an integer.".to_string())?;
        if n < 1 || n as usize > ctx.history.size().await {
            return Err("Argument is out of bounds.".to_string());
        }
        Ok(())
    }

    async fn execute(&self, ctx: CommandContext) -> CommandResult {
        let index = match ctx.args[0].parse::<usize>() {
            Ok(index) => index,
            Err(_) => return CommandResult::error("Argument must be an integer.".to_string()),
        };
        match ctx.history.get(index).await {
            Some(line) => ctx.dispatcher.clone().dispatch(&line).await,
            None => CommandResult::error("Argument is out of bounds.".to_string()),
        }
    }
}
