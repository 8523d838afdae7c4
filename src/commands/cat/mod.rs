// src/commands/cat/mod.rs
use async_trait::async_trait;

use crate::commands::{Command, CommandContext, CommandResult};
use crate::fs::FileKind;

pub struct CatCommand;

#[async_trait]
impl Command for CatCommand {
    fn name(&self) -> &'static str {
        "cat"
    }

    fn documentation(&self) -> &'static str {
        "Displays the contents of files."
    }

    async fn validate(&self, ctx: &CommandContext) -> Result<(), String> {
        if ctx.args.len() != 1 {
            return Err("Requires 1 argument.".to_string());
        }
        match ctx.fs.lookup(&ctx.args[0]).await {
            None => Err("No such file or directory.".to_string()),
            Some(entry) if entry.kind != FileKind::TextFile => {
                Err(format!("{}: Is not a text file.", ctx.args[0]))
            }
            Some(_) => Ok(()),
        }
    }

    async fn execute(&self, ctx: CommandContext) -> CommandResult {
        match ctx.fs.read_file(&ctx.args[0]).await {
            Ok(contents) => CommandResult::success(contents),
            Err(err) => CommandResult::error(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::Dispatcher;
    use crate::fs::VirtualFileSystem;
    use crate::history::History;
    use std::sync::Arc;

    async fn make_ctx(args: Vec<&str>) -> CommandContext {
        let fs = Arc::new(VirtualFileSystem::new());
        fs.create_text_file("/f.txt", "hello\nworld").await.unwrap();
        fs.create_directory("/d").await.unwrap();
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
    async fn test_cat_returns_contents() {
        let ctx = make_ctx(vec!["/f.txt"]).await;
        let cmd = CatCommand;
        cmd.validate(&ctx).await.unwrap();
        let result = cmd.execute(ctx).await;
        assert_eq!(result.stdout, "hello\nworld");
    }

    #[tokio::test]
    async fn test_cat_rejects_missing_file() {
        let ctx = make_ctx(vec!["/nope"]).await;
        let err = CatCommand.validate(&ctx).await.unwrap_err();
        assert_eq!(err, "No such file or directory.");
    }

    #[tokio::test]
    async fn test_cat_rejects_directory() {
        let ctx = make_ctx(vec!["/d"]).await;
        let err = CatCommand.validate(&ctx).await.unwrap_err();
        assert_eq!(err, "/d: Is not a text file.");
    }

    #[tokio::test]
    async fn test_cat_requires_one_argument() {
        let ctx = make_ctx(vec![]).await;
        assert!(CatCommand.validate(&ctx).await.is_err());
        let ctx = make_ctx(vec!["/f.txt", "/f.txt"]).await;
        assert!(CatCommand.validate(&ctx).await.is_err());
    }
}
