//! Command Registry
//!
//! Static mapping from command name to command implementation, built once
//! per session. This is a closed, enumerable set of variants.

use std::collections::HashMap;

use super::types::Command;

pub struct CommandRegistry {
    commands: HashMap<String, Box<dyn Command>>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self {
            commands: HashMap::new(),
        }
    }

    pub fn register(&mut self, cmd: Box<dyn Command>) {
        self.commands.insert(cmd.name().to_string(), cmd);
    }

    /// Case-sensitive lookup by canonical name.
    pub fn get(&self, name: &str) -> Option<&dyn Command> {
        self.commands.get(name).map(|c| c.as_ref())
    }

    pub fn names(&self) -> Vec<&str> {
        self.commands.keys().map(|s| s.as_str()).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

use super::cat::CatCommand;
use super::cd::CdCommand;
use super::cp::CpCommand;
use super::echo::EchoCommand;
use super::exclaim_cmd::ExclaimCommand;
use super::exit_cmd::ExitCommand;
use super::grep::GrepCommand;
use super::history_cmd::HistoryCommand;
use super::ls::LsCommand;
use super::man_cmd::ManCommand;
use super::mkdir::MkdirCommand;
use super::mv::MvCommand;
use super::pwd::PwdCommand;

/// Register every shell command.
pub fn register_all(registry: &mut CommandRegistry) {
    registry.register(Box::new(CatCommand));
    registry.register(Box::new(CdCommand));
    registry.register(Box::new(CpCommand));
    registry.register(Box::new(EchoCommand));
    registry.register(Box::new(ExclaimCommand));
    registry.register(Box::new(ExitCommand));
    registry.register(Box::new(GrepCommand));
    registry.register(Box::new(HistoryCommand));
    registry.register(Box::new(LsCommand));
    registry.register(Box::new(ManCommand));
    registry.register(Box::new(MkdirCommand));
    registry.register(Box::new(MvCommand));
    registry.register(Box::new(PwdCommand));
}

/// Create a registry with the full command set.
pub fn create_default_registry() -> CommandRegistry {
    let mut registry = CommandRegistry::new();
    register_all(&mut registry);
    registry
}

// ============================================================================
// Tests
// ============================================================================
