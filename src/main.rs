use clap::Parser;
use std::io::{BufRead, IsTerminal, Read, Write};

use memshell::commands::CommandResult;
use memshell::shell::{Shell, PROMPT};

#[derive(Parser)]
#[command(name = "memshell")]
#[command(about = "A simulated Unix-like shell over an in-memory filesystem")]
#[command(version)]
struct Cli {
    /// Execute the given input line(s) and exit
    #[arg(short = 'c')]
    script: Option<String>,

    /// Output each result as JSON (stdout, stderr, exitCode)
    #[arg(long = "json")]
    json: bool,

    /// Script file with one input line per row
    #[arg()]
    script_file: Option<String>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let shell = Shell::new();

    if let Some(script) = cli.script {
        run_script(&shell, &script, cli.json).await;
        return;
    }

    if let Some(ref file) = cli.script_file {
        match std::fs::read_to_string(file) {
            Ok(content) => run_script(&shell, &content, cli.json).await,
            Err(e) => {
                eprintln!("Error: Cannot read script file: {}: {}", file, e);
                std::process::exit(1);
            }
        }
        return;
    }

    if std::io::stdin().is_terminal() {
        run_interactive(&shell, cli.json).await;
    } else {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf).unwrap_or_default();
        run_script(&shell, &buf, cli.json).await;
    }
}

/// Feed a batch of input lines through the session, one at a time.
async fn run_script(shell: &Shell, script: &str, json: bool) {
    for line in script.lines() {
        if line.trim().is_empty() {
            continue;
        }
        let result = shell.run_line(line).await;
        print_result(&result, json);
        if result.terminate {
            std::process::exit(result.exit_code);
        }
    }
}

/// Prompt, read, dispatch, repeat until exit or end of input.
async fn run_interactive(shell: &Shell, json: bool) {
    let stdin = std::io::stdin();
    loop {
        print!("{}", PROMPT);
        let _ = std::io::stdout().flush();

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {
                let result = shell.run_line(&line).await;
                print_result(&result, json);
                if result.terminate {
                    std::process::exit(result.exit_code);
                }
            }
        }
    }
}

fn print_result(result: &CommandResult, json: bool) {
    if json {
        if let Ok(encoded) = serde_json::to_string(result) {
            println!("{}", encoded);
        }
    } else {
        if !result.stdout.is_empty() {
            println!("{}", result.stdout);
        }
        if !result.stderr.is_empty() {
            eprintln!("{}", result.stderr);
        }
    }
}
