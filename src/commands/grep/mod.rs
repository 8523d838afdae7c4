// src/commands/grep/mod.rs
use async_trait::async_trait;
use regex_lite::Regex;

use crate::commands::utils::{is_quoted, unquote, MAX_TRAVERSAL_DEPTH};
use crate::commands::{Command, CommandContext, CommandResult};
use crate::fs::{DirEntry, FileKind, VirtualFileSystem};

pub struct GrepCommand;

#[async_trait]
impl Command for GrepCommand {
    fn name(&self) -> &'static str {
        "grep"
    }

    fn documentation(&self) -> &'static str {
        "Displays lines from files that match the pattern. If -R is\n\
         supplied, recursively traverses the directory tree and displays\n\
         all lines in all files that match the pattern."
    }

    async fn validate(&self, ctx: &CommandContext) -> Result<(), String> {
        if ctx.args.len() < 2 {
            return Err("Requires at least 2 arguments.".to_string());
        }
        let pattern = &ctx.args[0];
        if Regex::new(&unquote(pattern)).is_err() {
            return Err(format!("{}: Invalid pattern.", pattern));
        }
        if !is_quoted(pattern) {
            return Err("Regex argument must be surrounded by quotation marks.".to_string());
        }
        Ok(())
    }

    async fn execute(&self, ctx: CommandContext) -> CommandResult {
        let regex = match Regex::new(&unquote(&ctx.args[0])) {
            Ok(regex) => regex,
            Err(_) => {
                return CommandResult::error(format!("{}: Invalid pattern.", ctx.args[0]));
            }
        };

        let mut matches = String::new();
        let mut errors = String::new();
        for arg in &ctx.args[1..] {
            match ctx.fs.lookup(arg).await {
                None => errors.push_str(&format!(
                    "grep: cannot access {}: No such file or directory.\n",
                    arg
                )),
                Some(entry) => {
                    let depth_limit = if ctx.recursive { MAX_TRAVERSAL_DEPTH } else { 0 };
                    collect_matches(&ctx.fs, entry, &regex, depth_limit, &mut matches).await;
                }
            }
        }

        CommandResult::with_streams(
            matches.trim().to_string(),
            errors.trim_end().to_string(),
            0,
        )
    }
}

/// Scan `entry` for lines matching `regex`, collecting `path: line` for
/// every hit. Directories are descended pre-order, at most `depth_limit`
/// levels down; a text file argument is always scanned.
async fn collect_matches(
    fs: &VirtualFileSystem,
    entry: DirEntry,
    regex: &Regex,
    depth_limit: usize,
    out: &mut String,
) {
    let mut stack: Vec<(DirEntry, usize)> = vec![(entry, 0)];
    while let Some((entry, depth)) = stack.pop() {
        match entry.kind {
            FileKind::TextFile => {
                if let Ok(contents) = fs.read_file(&entry.path).await {
                    for line in contents.lines() {
                        if regex.is_match(line) {
                            out.push_str(&format!("{}: {}\n", entry.path, line));
                        }
                    }
                }
            }
            FileKind::Directory => {
                if depth < depth_limit {
                    let children = fs.list_directory(&entry.path).await.unwrap_or_default();
                    for child in children.into_iter().rev() {
                        stack.push((child, depth + 1));
                    }
                }
            }
        }
    }
}
