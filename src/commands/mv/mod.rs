// src/commands/mv/mod.rs
use async_trait::async_trait;

use crate::commands::cp::{execute_transfer, validate_transfer};
use crate::commands::{Command, CommandContext, CommandResult};

pub struct MvCommand;

#[async_trait]
impl Command for MvCommand {
    fn name(&self) -> &'static str {
        "mv"
    }

    fn documentation(&self) -> &'static str {
        "Moves or renames files and directories to their specified destinations."
    }

    async fn validate(&self, ctx: &CommandContext) -> Result<(), String> {
        validate_transfer(ctx).await
    }

    async fn execute(&self, ctx: CommandContext) -> CommandResult {
        execute_transfer(&ctx, false).await
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
        fs.create_directory("/a").await.unwrap();
        fs.create_text_file("/a/f.txt", "payload").await.unwrap();
        fs.create_directory("/b").await.unwrap();
        fs.create_text_file("/b/old.txt", "old").await.unwrap();
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
    async fn test_mv_file_into_directory() {
        let ctx = make_ctx(vec!["/a/f.txt", "/b"]).await;
        MvCommand.validate(&ctx).await.unwrap();
        let fs = ctx.fs.clone();
        MvCommand.execute(ctx).await;
        assert!(!fs.exists("/a/f.txt").await);
        assert_eq!(fs.read_file("/b/f.txt").await.unwrap(), "payload");
    }

    #[tokio::test]
    async fn test_mv_rename_in_place() {
        let ctx = make_ctx(vec!["/a/f.txt", "/a/g.txt"]).await;
        MvCommand.validate(&ctx).await.unwrap();
        let fs = ctx.fs.clone();
        MvCommand.execute(ctx).await;
        assert!(!fs.exists("/a/f.txt").await);
        assert_eq!(fs.read_file("/a/g.txt").await.unwrap(), "payload");
    }

    #[tokio::test]
    async fn test_mv_file_onto_file_replaces_it() {
        let ctx = make_ctx(vec!["/a/f.txt", "/b/old.txt"]).await;
        MvCommand.validate(&ctx).await.unwrap();
        let fs = ctx.fs.clone();
        MvCommand.execute(ctx).await;
        assert!(!fs.exists("/a/f.txt").await);
        assert_eq!(fs.read_file("/b/old.txt").await.unwrap(), "payload");
    }

    #[tokio::test]
    async fn test_mv_directory_into_directory() {
        let ctx = make_ctx(vec!["/a", "/b"]).await;
        MvCommand.validate(&ctx).await.unwrap();
        let fs = ctx.fs.clone();
        MvCommand.execute(ctx).await;
        assert!(!fs.exists("/a").await);
        assert_eq!(fs.read_file("/b/a/f.txt").await.unwrap(), "payload");
    }

    #[tokio::test]
    async fn test_mv_rejects_own_subtree() {
        let ctx = make_ctx(vec!["/a", "/a"]).await;
        let err = MvCommand.validate(&ctx).await.unwrap_err();
        assert_eq!(err, "Cannot move/copy to a subdirectory of itself.");
    }
}
