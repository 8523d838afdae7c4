// src/commands/mkdir/mod.rs
use async_trait::async_trait;

use crate::commands::{Command, CommandContext, CommandResult};
use crate::fs::path;

pub struct MkdirCommand;

#[async_trait]
impl Command for MkdirCommand {
    fn name(&self) -> &'static str {
        "mkdir"
    }

    fn documentation(&self) -> &'static str {
        "Creates directories."
    }

    async fn validate(&self, ctx: &CommandContext) -> Result<(), String> {
        if ctx.args.is_empty() {
            return Err("Requires at least 1 argument.".to_string());
        }
        Ok(())
    }

    async fn execute(&self, ctx: CommandContext) -> CommandResult {
        let mut stderr = String::new();

        // Directories are created in argument order so that later arguments
        // can land inside earlier ones; each failure is reported on its own
        // without aborting the rest.
        for dir in &ctx.args {
            if ctx.fs.exists(dir).await {
                stderr.push_str(&format!(
                    "Cannot create directory {}: Directory already exists.\n",
                    dir
                ));
            } else if !ctx.fs.exists(&path::parent_path(dir)).await {
                stderr.push_str(&format!(
                    "Cannot create directory {}: No such file or directory.\n",
                    dir
                ));
            } else if let Err(err) = ctx.fs.create_directory(dir).await {
                stderr.push_str(&format!("{}\n", err));
            }
        }

        let exit_code = if stderr.is_empty() { 0 } else { 1 };
        CommandResult::with_streams(String::new(), stderr.trim_end().to_string(), exit_code)
    }
}
