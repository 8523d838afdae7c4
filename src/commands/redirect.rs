//! Output Redirection
//!
//! Detects and extracts a `>`/`>>` clause from an argument vector,
//! independent of which command is being run, and writes captured output
//! through the filesystem.

use crate::fs::{path, FsError, VirtualFileSystem};

/// How redirected output lands in the target file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectMode {
    /// `>`: replace the target's contents.
    Overwrite,
    /// `>>`: join onto the target's contents with a newline separator.
    Append,
}

/// One parsed and validated redirection clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectClause {
    pub mode: RedirectMode,
    pub target: String,
}

/// Split `args` at the first bare `>` or `>>` token. Returns the
/// pre-redirection arguments and, when a symbol was present, the raw clause
/// tokens (symbol included) for validation.
pub fn split_redirection(args: &[String]) -> (Vec<String>, Option<Vec<String>>) {
    match args.iter().position(|a| a == ">" || a == ">>") {
        Some(index) => (args[..index].to_vec(), Some(args[index..].to_vec())),
        None => (args.to_vec(), None),
    }
}

/// Validate raw clause tokens: exactly a symbol and a destination path, the
/// destination not an existing directory, its parent path existing.
pub async fn validate_clause(
    fs: &VirtualFileSystem,
    clause: &[String],
) -> Result<RedirectClause, String> {
    if clause.len() != 2 {
        return Err(
            "To redirect to a file, you must provide a redirection action and an outfile."
                .to_string(),
        );
    }
    let mode = match clause[0].as_str() {
        ">" => RedirectMode::Overwrite,
        ">>" => RedirectMode::Append,
        _ => return Err("First argument must be > or >>".to_string()),
    };
    let target = clause[1].clone();
    if let Some(entry) = fs.lookup(&target).await {
        if entry.kind.is_directory() {
            return Err(format!("{}: Is a directory.", target));
        }
    }
    let parent = path::parent_path(&target);
    if !fs.exists(&parent).await {
        return Err(format!(
            "cannot access {}: No such file or directory.",
            parent
        ));
    }
    Ok(RedirectClause { mode, target })
}

/// Write `output` to the clause's target, creating the file on demand.
pub async fn apply(
    fs: &VirtualFileSystem,
    clause: &RedirectClause,
    output: &str,
) -> Result<(), FsError> {
    fs.write_file(
        &clause.target,
        output,
        clause.mode == RedirectMode::Append,
    )
    .await
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn args(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_split_without_symbol() {
        let (pre, clause) = split_redirection(&args(&["a", "b"]));
        assert_eq!(pre, args(&["a", "b"]));
        assert!(clause.is_none());
    }

    #[test]
    fn test_split_at_first_symbol() {
        let (pre, clause) = split_redirection(&args(&["a", ">", "out"]));
        assert_eq!(pre, args(&["a"]));
        assert_eq!(clause.unwrap(), args(&[">", "out"]));

        let (pre, clause) = split_redirection(&args(&[">>", "out"]));
        assert!(pre.is_empty());
        assert_eq!(clause.unwrap(), args(&[">>", "out"]));
    }

    #[test]
    fn test_split_keeps_everything_after_symbol() {
        let (pre, clause) = split_redirection(&args(&["a", ">>", "b", ">", "c"]));
        assert_eq!(pre, args(&["a"]));
        assert_eq!(clause.unwrap(), args(&[">>", "b", ">", "c"]));
    }

    #[test]
    fn test_quoted_symbol_is_not_redirection() {
        let (pre, clause) = split_redirection(&args(&["\">\"", "x"]));
        assert_eq!(pre, args(&["\">\"", "x"]));
        assert!(clause.is_none());
    }

    #[tokio::test]
    async fn test_validate_clause_shapes() {
        let fs = VirtualFileSystem::new();
        fs.create_directory("/a").await.unwrap();

        assert!(validate_clause(&fs, &args(&[">", "/a/out.txt"])).await.is_ok());
        assert!(validate_clause(&fs, &args(&[">>", "out.txt"])).await.is_ok());

        // Too many tokens.
        let err = validate_clause(&fs, &args(&[">", "x", "y"])).await.unwrap_err();
        assert!(err.contains("redirection action"));

        // Target is an existing directory.
        let err = validate_clause(&fs, &args(&[">", "/a"])).await.unwrap_err();
        assert_eq!(err, "/a: Is a directory.");

        // Parent of the target does not exist.
        let err = validate_clause(&fs, &args(&[">", "/missing/out.txt"]))
            .await
            .unwrap_err();
        assert_eq!(err, "cannot access /missing: No such file or directory.");
    }

    #[tokio::test]
    async fn test_apply_creates_overwrites_appends() {
        let fs = VirtualFileSystem::new();
        let clause = RedirectClause {
            mode: RedirectMode::Overwrite,
            target: "/out.txt".to_string(),
        };
        apply(&fs, &clause, "hi").await.unwrap();
        assert_eq!(fs.read_file("/out.txt").await.unwrap(), "hi");

        let clause = RedirectClause {
            mode: RedirectMode::Append,
            target: "/out.txt".to_string(),
        };
        apply(&fs, &clause, "bye").await.unwrap();
        assert_eq!(fs.read_file("/out.txt").await.unwrap(), "hi\nbye");
    }
}
