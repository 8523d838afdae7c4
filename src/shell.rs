//! Shell Session
//!
//! Ties together the virtual filesystem, the input history, and the command
//! dispatcher into one interactive session. The front end feeds raw lines
//! into [`Shell::run_line`]; everything else is internal.

use std::sync::Arc;

use crate::commands::{CommandResult, Dispatcher};
use crate::fs::VirtualFileSystem;
use crate::history::History;

/// Prompt printed by the interactive front end.
pub const PROMPT: &str = "/# ";

/// Reserved control line: clears the filesystem without entering the
/// command pipeline.
const RESET_LINE: &str = "reset";

/// One interactive session over an in-memory filesystem.
pub struct Shell {
    fs: Arc<VirtualFileSystem>,
    history: Arc<History>,
    dispatcher: Arc<Dispatcher>,
}

impl Shell {
    pub fn new() -> Self {
        let fs = Arc::new(VirtualFileSystem::new());
        let history = Arc::new(History::new());
        let dispatcher = Dispatcher::new(fs.clone(), history.clone());
        Self {
            fs,
            history,
            dispatcher,
        }
    }

    pub fn fs(&self) -> &Arc<VirtualFileSystem> {
        &self.fs
    }

    pub fn history(&self) -> &Arc<History> {
        &self.history
    }

    /// Run one raw input line through the session: normalize it, record it
    /// in history, then either reset the filesystem or dispatch.
    pub async fn run_line(&self, line: &str) -> CommandResult {
        let normalized = normalize_line(line);
        self.history.push(&normalized).await;
        if normalized == RESET_LINE {
            self.fs.reset().await;
            return CommandResult::empty();
        }
        self.dispatcher.clone().dispatch(&normalized).await
    }
}

impl Default for Shell {
    fn default() -> Self {
        Self::new()
    }
}

/// Trim the line and collapse internal runs of whitespace into single
/// spaces, leaving double-quoted substrings untouched.
pub fn normalize_line(line: &str) -> String {
    let mut out = String::new();
    let mut in_quotes = false;
    let mut pending_space = false;
    for c in line.trim().chars() {
        if c == '"' {
            in_quotes = !in_quotes;
        }
        if c.is_whitespace() && !in_quotes {
            pending_space = true;
        } else {
            if pending_space && !out.is_empty() {
                out.push(' ');
            }
            pending_space = false;
            out.push(c);
        }
    }
    out
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_collapses_outside_quotes() {
        assert_eq!(normalize_line("  ls   /a  "), "ls /a");
        assert_eq!(normalize_line("\tmkdir\t/x"), "mkdir /x");
    }

    #[test]
    fn test_normalize_preserves_quoted_whitespace() {
        assert_eq!(normalize_line("echo  \"a   b\""), "echo \"a   b\"");
    }

    #[tokio::test]
    async fn test_every_line_is_recorded() {
        let shell = Shell::new();
        shell.run_line("pwd").await;
        shell.run_line("bogus").await;
        assert_eq!(shell.history().entries().await, vec!["pwd", "bogus"]);
    }

    #[tokio::test]
    async fn test_reset_line_clears_filesystem() {
        let shell = Shell::new();
        shell.run_line("mkdir /a").await;
        assert!(shell.fs().exists("/a").await);

        let result = shell.run_line("reset").await;
        assert!(result.stdout.is_empty());
        assert!(!shell.fs().exists("/a").await);
        // The control line still lands in history.
        assert_eq!(shell.history().size().await, 2);
    }

    // ========================================================================
    // End-to-end scenarios
    // ========================================================================

    #[tokio::test]
    async fn test_scenario_mkdir_ls_cd_pwd() {
        let shell = Shell::new();
        shell.run_line("mkdir /a").await;
        shell.run_line("mkdir /a/b").await;

        let result = shell.run_line("ls /a").await;
        assert_eq!(result.stdout, "b");

        shell.run_line("cd /a/b").await;
        let result = shell.run_line("pwd").await;
        assert_eq!(result.stdout, "/a/b");
    }

    #[tokio::test]
    async fn test_scenario_echo_redirection_overwrite_then_append() {
        let shell = Shell::new();
        shell.run_line("mkdir /a").await;

        let result = shell.run_line("echo \"hi\" > /a/out.txt").await;
        assert!(result.stdout.is_empty());
        let result = shell.run_line("cat /a/out.txt").await;
        assert_eq!(result.stdout, "hi");

        shell.run_line("echo \"bye\" >> /a/out.txt").await;
        let result = shell.run_line("cat /a/out.txt").await;
        assert_eq!(result.stdout, "hi\nbye");
    }

    #[tokio::test]
    async fn test_scenario_grep_missing_path_reports_but_succeeds() {
        let shell = Shell::new();
        let result = shell.run_line("grep \"x\" /missing").await;
        assert!(result.stdout.is_empty());
        assert_eq!(
            result.stderr,
            "grep: cannot access /missing: No such file or directory."
        );
        assert_eq!(result.exit_code, 0);
    }

    #[tokio::test]
    async fn test_scenario_mkdir_rejections() {
        let shell = Shell::new();
        shell.run_line("mkdir /x").await;

        let result = shell.run_line("mkdir /x").await;
        assert!(result.stderr.contains("Directory already exists."));

        let result = shell.run_line("mkdir /y/z").await;
        assert!(result.stderr.contains("No such file or directory."));
    }

    #[tokio::test]
    async fn test_scenario_recall_replays_second_command() {
        let shell = Shell::new();
        shell.run_line("mkdir /a").await;
        shell.run_line("echo \"logged\" > /a/log.txt").await;

        let result = shell.run_line("!2").await;
        // The recalled line carries its redirection with it.
        assert!(result.stdout.is_empty());
        let result = shell.run_line("cat /a/log.txt").await;
        assert_eq!(result.stdout, "logged");
    }

    #[tokio::test]
    async fn test_scenario_recall_of_plain_command() {
        let shell = Shell::new();
        shell.run_line("mkdir /a").await;
        shell.run_line("pwd").await;

        let result = shell.run_line("!2").await;
        assert_eq!(result.stdout, "/");
    }

    #[tokio::test]
    async fn test_scenario_cp_then_delete_source() {
        let shell = Shell::new();
        shell.run_line("mkdir /src").await;
        shell.run_line("echo \"data\" > /src/f.txt").await;
        shell.run_line("mkdir /dst").await;

        shell.run_line("cp /src /dst").await;
        shell.fs().delete("/src").await;

        let result = shell.run_line("cat /dst/src/f.txt").await;
        assert_eq!(result.stdout, "data");
    }

    #[tokio::test]
    async fn test_scenario_exit_terminates() {
        let shell = Shell::new();
        let result = shell.run_line("exit").await;
        assert!(result.terminate);
        assert_eq!(result.exit_code, 0);
    }

    #[tokio::test]
    async fn test_scenario_unknown_command_keeps_session_alive() {
        let shell = Shell::new();
        let result = shell.run_line("frobnicate /x").await;
        assert_eq!(result.stderr, "Command \"frobnicate\" does not exist.");

        let result = shell.run_line("pwd").await;
        assert_eq!(result.stdout, "/");
    }

    #[tokio::test]
    async fn test_scenario_man_output_can_be_redirected() {
        let shell = Shell::new();
        shell.run_line("man pwd > doc.txt").await;
        let result = shell.run_line("cat doc.txt").await;
        assert!(result.stdout.starts_with("Command PWD:"));
    }

    #[tokio::test]
    async fn test_scenario_history_numbers_lines() {
        let shell = Shell::new();
        shell.run_line("pwd").await;
        shell.run_line("mkdir /a").await;
        let result = shell.run_line("history").await;
        assert_eq!(result.stdout, "1 pwd\n2 mkdir /a\n3 history");

        let result = shell.run_line("history 2").await;
        assert_eq!(result.stdout, "3 history\n4 history 2");
    }
}
