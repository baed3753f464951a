//! `help [command]` - reads the registry it is handed

use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::application::errors::BotError;
use crate::application::messaging::CommandContext;
use crate::domain::entities::reply::COLOR_INFO;
use crate::domain::entities::{Command, CommandRegistry, Embed, Reply};
use crate::domain::traits::CommandHandler;

pub struct HelpCommand;

impl HelpCommand {
    /// Listing of every command, grouped by category
    pub fn overview(registry: &CommandRegistry, prefix: &str) -> String {
        let mut groups: BTreeMap<&str, Vec<&Command>> = BTreeMap::new();
        for cmd in registry.all() {
            groups
                .entry(cmd.category.as_deref().unwrap_or("general"))
                .or_default()
                .push(cmd);
        }

        let mut help = String::new();
        for (category, commands) in groups {
            help.push_str(&format!("**{}**\n", category));
            for cmd in commands {
                help.push_str(&format!(
                    "  {}{} - {}\n",
                    prefix,
                    cmd.name,
                    cmd.description.as_deref().unwrap_or("")
                ));
            }
        }
        help
    }

    /// Details for a single command
    pub fn details(registry: &CommandRegistry, prefix: &str, name: &str) -> Option<String> {
        let cmd = registry.get(name)?;
        let mut help = format!(
            "{}{} - {}",
            prefix,
            cmd.name,
            cmd.description.as_deref().unwrap_or("No description")
        );
        if let Some(usage) = &cmd.usage {
            help.push_str(&format!("\nUsage: {}{} {}", prefix, cmd.name, usage));
        }
        if !cmd.permissions.is_empty() {
            let perms: Vec<&str> = cmd.permissions.iter().map(|p| p.as_str()).collect();
            help.push_str(&format!("\nRequires: {}", perms.join(", ")));
        }
        Some(help)
    }
}

#[async_trait]
impl CommandHandler for HelpCommand {
    async fn execute(
        &self,
        ctx: &CommandContext,
        args: &[String],
        registry: &CommandRegistry,
    ) -> Result<(), BotError> {
        let prefix = &ctx.invocation.prefix;

        let reply = match args.first() {
            Some(name) => match Self::details(registry, prefix, name) {
                Some(text) => Reply::embed(Embed::new("Help", text, COLOR_INFO)),
                None => Reply::error(format!("Command {}{} not found", prefix, name)),
            },
            None => Reply::embed(Embed::new(
                "Available commands",
                Self::overview(registry, prefix),
                COLOR_INFO,
            )),
        };

        ctx.reply(reply).await
    }
}
