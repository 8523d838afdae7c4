// src/commands/cp/mod.rs
use async_trait::async_trait;

use crate::commands::{Command, CommandContext, CommandResult};
use crate::fs::{path, ROOT};

pub struct CpCommand;

#[async_trait]
impl Command for CpCommand {
    fn name(&self) -> &'static str {
        "cp"
    }

    fn documentation(&self) -> &'static str {
        "Copies files and directories to the specified destinations."
    }

    async fn validate(&self, ctx: &CommandContext) -> Result<(), String> {
        validate_transfer(ctx).await
    }

    async fn execute(&self, ctx: CommandContext) -> CommandResult {
        execute_transfer(&ctx, true).await
    }
}

/// Shared argument contract for `cp` and `mv`: a source that exists and a
/// destination that is either an existing node or a new leaf under an
/// existing parent.
pub(crate) async fn validate_transfer(ctx: &CommandContext) -> Result<(), String> {
    if ctx.args.len() != 2 {
        return Err("Requires 2 arguments.".to_string());
    }
    let src = &ctx.args[0];
    let dest = &ctx.args[1];

    let Some(src_entry) = ctx.fs.lookup(src).await else {
        return Err(format!("{}: No such file or directory.", src));
    };
    if let Some(dest_entry) = ctx.fs.lookup(dest).await {
        if src_entry.kind.is_directory() && dest_entry.kind.is_text_file() {
            return Err(format!("{}: Not a directory.", dest_entry.name));
        }
        if within_subtree(&src_entry.path, &dest_entry.path) {
            return Err("Cannot move/copy to a subdirectory of itself.".to_string());
        }
        return Ok(());
    }
    if ctx.fs.exists(&path::parent_path(dest)).await {
        Ok(())
    } else {
        Err(format!("{}: No such file or directory.", dest))
    }
}

/// Segment-wise subtree test on canonical absolute paths: the destination
/// is the source itself or extends it by whole segments. A sibling that
/// merely shares a name prefix is not inside the subtree.
fn within_subtree(src_path: &str, dest_path: &str) -> bool {
    if src_path == ROOT {
        return true;
    }
    dest_path == src_path || dest_path.starts_with(&format!("{}/", src_path))
}

/// Carry out a transfer after validation: work out the destination
/// directory and final name, then deep-copy (`copy`) or relocate the
/// source.
pub(crate) async fn execute_transfer(ctx: &CommandContext, copy: bool) -> CommandResult {
    let src = &ctx.args[0];
    let dest = &ctx.args[1];

    let (dest_dir, new_name) = match ctx.fs.lookup(dest).await {
        None => {
            // The destination names a new leaf: the source is renamed to
            // that leaf and placed under its parent.
            let abs = match ctx.fs.resolve_absolute(dest).await {
                Ok(abs) => abs,
                Err(err) => return CommandResult::error(err.to_string()),
            };
            let name = path::tokenize(&abs).pop().unwrap_or_default();
            (path::parent_path(&abs), name)
        }
        Some(dest_entry) => {
            let Some(src_entry) = ctx.fs.lookup(src).await else {
                return CommandResult::error(format!("{}: No such file or directory.", src));
            };
            if src_entry.kind.is_text_file() && dest_entry.kind.is_text_file() {
                // Text file onto text file: the source takes the target's
                // name and replaces it in the target's parent.
                (path::parent_path(&dest_entry.path), dest_entry.name)
            } else {
                (dest_entry.path, src_entry.name)
            }
        }
    };

    let outcome = if copy {
        ctx.fs.deep_copy(src, &dest_dir, &new_name).await
    } else {
        ctx.fs.relocate(src, &dest_dir, &new_name).await
    };
    match outcome {
        Ok(()) => CommandResult::empty(),
        Err(err) => CommandResult::error(err.to_string()),
    }
}
