use anyhow::{bail, Result};
use argot_core::{CommandDefinition, CommandMapper, PositionalParameter};
use argot_render_core::{CommandHelp, CommandListHelp, HelpView};
use serde::{Deserialize, Serialize};

use super::{Context, SubCommand};

#[derive(Debug, Serialize, Deserialize)]
pub struct HelpCommand {
    pub command: Vec<String>,
}

impl HelpCommand {
    pub fn view(&self, context: &Context<'_>) -> Result<HelpView> {
        let configuration = context.configuration;
        if self.command.is_empty() {
            return Ok(HelpView::CommandList(CommandListHelp::from_configuration(configuration)));
        }

        let name = self.command.join(" ");
        if let Some(definition) = configuration.find(&name) {
            return Ok(HelpView::Command(CommandHelp::from_definition(configuration.program(), definition)));
        }

        let words: Vec<&str> = self.command.iter().map(String::as_str).collect();
        let subcommands = CommandMapper::new(configuration.commands()).complete(&words, "");
        if subcommands.is_empty() {
            bail!("no help for unknown command '{}'", name);
        }
        bail!(
            "'{}' is a command group; try one of: {}",
            name,
            subcommands.iter().map(|s| format!("{} {}", name, s)).collect::<Vec<_>>().join(", ")
        )
    }
}

impl SubCommand for HelpCommand {
    fn definition() -> CommandDefinition {
        CommandDefinition::new("help")
            .summary("Display help for a command")
            .positional(
                PositionalParameter::new("command")
                    .list()
                    .description("The command to describe. Lists every command when omitted."),
            )
    }

    fn execute(&self, context: &Context<'_>) -> Result<()> {
        let view = self.view(context)?;
        println!("{}", context.render_help(&view)?);
        Ok(())
    }
}

/// Completes the next command word; the last word is treated as partial.
#[derive(Debug, Serialize, Deserialize)]
pub struct CompleteCommand {
    pub words: Vec<String>,
}

impl CompleteCommand {
    pub fn candidates(&self, context: &Context<'_>) -> Vec<String> {
        let (partial, words) = match self.words.split_last() {
            Some((last, rest)) => (last.as_str(), rest),
            None => ("", &self.words[..]),
        };
        let words: Vec<&str> = words.iter().map(String::as_str).collect();
        CommandMapper::new(context.configuration.commands()).complete(&words, partial)
    }
}

impl SubCommand for CompleteCommand {
    fn definition() -> CommandDefinition {
        CommandDefinition::new("complete")
            .summary("List command words that complete the given prefix")
            .positional(
                PositionalParameter::new("words")
                    .list()
                    .description("Command words typed so far. The last one may be partial."),
            )
    }

    fn execute(&self, context: &Context<'_>) -> Result<()> {
        for candidate in self.candidates(context) {
            println!("{}", candidate);
        }
        Ok(())
    }
}
