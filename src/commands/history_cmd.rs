//! The `history` command: prints recent input lines, numbered from 1.

use async_trait::async_trait;

use super::types::{Command, CommandContext, CommandResult};

pub struct HistoryCommand;

#[async_trait]
impl Command for HistoryCommand {
    fn name(&self) -> &'static str {
        "history"
    }

    fn documentation(&self) -> &'static str {
        "Prints out recent commands, one command per line. If provided with\n\
         an integer argument x, then prints out the last x commands."
    }

    async fn validate(&self, ctx: &CommandContext) -> Result<(), String> {
        match ctx.args.len() {
            0 => Ok(()),
            1 => {
                let n: i64 = ctx.args[0]
                    .parse()
                    .map_err(|_| "Argument must be an integer.".to_string())?;
                if n < 0 || n as usize > ctx.history.size().await {
                    Err("Argument is out of bounds.".to_string())
                } else {
                    Ok(())
                }
            }
            _ => Err("Requires 0 or 1 arguments.".to_string()),
        }
    }

    async fn execute(&self, ctx: CommandContext) -> CommandResult {
        let entries = ctx.history.entries().await;
        let start = match ctx.args.first() {
            Some(arg) => {
                let n = arg.parse::<usize>().unwrap_or(0);
                entries.len().saturating_sub(n)
            }
            None => 0,
        };
        let mut out = String::new();
        for (i, line) in entries.iter().enumerate().skip(start) {
            out.push_str(&format!("{} {}\n", i + 1, line));
        }
        CommandResult::success(out.trim_end().to_string())
    }
}
