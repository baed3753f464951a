use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use super::Permission;
use crate::domain::traits::CommandHandler;

/// Category tag that makes the dispatcher emit an audit record
pub const MODERATION_CATEGORY: &str = "moderation";

/// Represents a bot command
#[derive(Clone)]
pub struct Command {
    pub name: String,
    pub description: Option<String>,
    pub usage: Option<String>,
    pub category: Option<String>,
    pub permissions: Vec<Permission>,
    pub handler: Arc<dyn CommandHandler>,
    /// Manifest the command was loaded from
    pub source: Option<PathBuf>,
}

impl Command {
    pub fn new(name: impl Into<String>, handler: Arc<dyn CommandHandler>) -> Self {
        Self {
            name: name.into().to_lowercase(),
            description: None,
            usage: None,
            category: None,
            permissions: Vec::new(),
            handler,
            source: None,
        }
    }

    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    pub fn with_usage(mut self, usage: impl Into<String>) -> Self {
        self.usage = Some(usage.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_permission(mut self, permission: Permission) -> Self {
        self.permissions.push(permission);
        self
    }

    pub fn with_source(mut self, source: impl Into<PathBuf>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn is_moderation(&self) -> bool {
        self.category.as_deref() == Some(MODERATION_CATEGORY)
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("category", &self.category)
            .field("permissions", &self.permissions)
            .field("source", &self.source)
            .finish()
    }
}

/// Command registry keyed by lower-cased command name.
///
/// Populated once at startup and then shared behind an `Arc`; handlers
/// only ever see `&CommandRegistry`.
#[derive(Default, Debug, Clone)]
pub struct CommandRegistry {
    commands: HashMap<String, Command>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a command, returning the one it replaced
    pub fn register(&mut self, command: Command) -> Option<Command> {
        self.commands.insert(command.name.to_lowercase(), command)
    }

    pub fn get(&self, name: &str) -> Option<&Command> {
        self.commands.get(&name.to_lowercase())
    }

    /// All commands, sorted by name
    pub fn all(&self) -> Vec<&Command> {
        let mut commands: Vec<&Command> = self.commands.values().collect();
        commands.sort_by(|a, b| a.name.cmp(&b.name));
        commands
    }

    pub fn names(&self) -> Vec<String> {
        self.all().into_iter().map(|c| c.name.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
