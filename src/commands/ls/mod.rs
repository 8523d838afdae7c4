// src/commands/ls/mod.rs
use async_trait::async_trait;

use crate::commands::utils::MAX_TRAVERSAL_DEPTH;
use crate::commands::{Command, CommandContext, CommandResult};
use crate::fs::{FileKind, VirtualFileSystem};

pub struct LsCommand;

#[async_trait]
impl Command for LsCommand {
    fn name(&self) -> &'static str {
        "ls"
    }

    fn documentation(&self) -> &'static str {
        "Displays the contents of directories. If no paths are given,\n\
         displays the contents of the current working directory. For all\n\
         text files specified by path, displays the name of the file only."
    }

    async fn validate(&self, _ctx: &CommandContext) -> Result<(), String> {
        // Any combination of paths is accepted; invalid ones are reported
        // per path during execution.
        Ok(())
    }

    async fn execute(&self, ctx: CommandContext) -> CommandResult {
        if ctx.args.is_empty() {
            let cwd = ctx.fs.current_path().await;
            let out = if ctx.recursive {
                traverse_listing(&ctx.fs, &cwd, MAX_TRAVERSAL_DEPTH).await
            } else {
                contents_line(&ctx.fs, &cwd).await
            };
            return CommandResult::success(out.trim().to_string());
        }

        let mut listing = String::new();
        let mut errors = String::new();
        for arg in &ctx.args {
            match ctx.fs.lookup(arg).await {
                None => errors.push_str(&format!(
                    "ls: cannot access {}: No such file or directory.\n",
                    arg
                )),
                Some(entry) => match entry.kind {
                    FileKind::TextFile => {
                        listing.push_str(&entry.name);
                        listing.push('\n');
                    }
                    FileKind::Directory => {
                        if ctx.recursive {
                            listing.push_str(
                                &traverse_listing(&ctx.fs, &entry.path, MAX_TRAVERSAL_DEPTH).await,
                            );
                        } else if ctx.args.len() == 1 {
                            // A single directory argument shows its contents
                            // without the header line.
                            listing.push_str(&contents_line(&ctx.fs, &entry.path).await);
                        } else {
                            listing.push_str(&traverse_listing(&ctx.fs, &entry.path, 0).await);
                        }
                    }
                },
            }
        }

        CommandResult::with_streams(
            listing.trim().to_string(),
            errors.trim_end().to_string(),
            0,
        )
    }
}

/// Child names of one directory, space separated.
async fn contents_line(fs: &VirtualFileSystem, dir_path: &str) -> String {
    let children = fs.list_directory(dir_path).await.unwrap_or_default();
    children
        .iter()
        .map(|c| c.name.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Pre-order listing of a directory and, up to `depth_limit` levels down,
/// its subdirectories. Each directory shows as
/// `<path>:` followed by its contents line and a blank line.
async fn traverse_listing(fs: &VirtualFileSystem, dir_path: &str, depth_limit: usize) -> String {
    let mut out = String::new();
    let mut stack: Vec<(String, usize)> = vec![(dir_path.to_string(), 0)];
    while let Some((path, depth)) = stack.pop() {
        let children = fs.list_directory(&path).await.unwrap_or_default();
        let line = children
            .iter()
            .map(|c| c.name.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        if line.is_empty() {
            out.push_str(&format!("{}:\n\n", path));
        } else {
            out.push_str(&format!("{}:\n{}\n\n", path, line));
        }
        if depth < depth_limit {
            for child in children.iter().rev() {
                if child.kind.is_directory() {
                    stack.push((child.path.clone(), depth + 1));
                }
            }
        }
    }
    out
}
