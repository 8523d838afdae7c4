//! The `exit` command: ends the session with a success status.

use async_trait::async_trait;

use super::types::{Command, CommandContext, CommandResult};

pub struct ExitCommand;

#[async_trait]
impl Command for ExitCommand {
    fn name(&self) -> &'static str {
        "exit"
    }

    fn documentation(&self) -> &'static str {
        "Quits the program."
    }

    async fn validate(&self, ctx: &CommandContext) -> Result<(), String> {
        if ctx.args.is_empty() {
            Ok(())
        } else {
            Err("Does not take in any arguments.".to_string())
        }
    }

    async fn execute(&self, _ctx: CommandContext) -> CommandResult {
        CommandResult::exit()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::Dispatcher;
    use crate::fs::VirtualFileSystem;
    use crate::history::History;
    use std::sync::Arc;

    fn make_ctx(args: Vec<&str>) -> CommandContext {
        let fs = Arc::new(VirtualFileSystem::new());
        let history = Arc::new(History::new());
        let dispatcher = Dispatcher::new(fs.clone(), history.clone());
        CommandContext {
            args: args.into_iter().map(String::from).collect(),
            recursive: false,
            fs,
            history,
            dispatcher,
        }
    }

    #[tokio::test]
    async fn test_exit_sets_terminate() {
        let ctx = make_ctx(vec![]);
        ExitCommand.validate(&ctx).await.unwrap();
        let result = ExitCommand.execute(ctx).await;
        assert!(result.terminate);
        assert_eq!(result.exit_code, 0);
    }

    #[tokio::test]
    async fn test_exit_rejects_arguments() {
        let ctx = make_ctx(vec!["now"]);
        let err = ExitCommand.validate(&ctx).await.unwrap_err();
        assert_eq!(err, "Does not take in any arguments.");
    }
}
