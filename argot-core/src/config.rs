use tracing::warn;

use crate::error::{Error, Result};
use crate::schema::CommandDefinition;

/// The full command catalog available to a parse.
///
/// Built once at startup. Parsing only ever borrows it, so one configuration
/// can serve any number of parses, including from several threads.
#[derive(Debug, Clone, Default)]
pub struct ParserConfiguration {
    program: String,
    commands: Vec<CommandDefinition>,
}

impl ParserConfiguration {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            commands: Vec::new(),
        }
    }

    /// Name shown in usage synopses.
    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn set_program(&mut self, program: impl Into<String>) {
        self.program = program.into();
    }

    pub fn register(&mut self, command: CommandDefinition) -> Result<&mut Self> {
        command.validate().map_err(Error::Schema)?;

        // Later duplicates stay registered but can never be resolved
        if self.find(&command.name).is_some() {
            warn!(command = %command.name, "duplicate command registration, first one wins");
        }

        self.commands.push(command);
        Ok(self)
    }

    pub fn with_command(mut self, command: CommandDefinition) -> Result<Self> {
        self.register(command)?;
        Ok(self)
    }

    pub fn commands(&self) -> &[CommandDefinition] {
        &self.commands
    }

    pub fn find(&self, name: &str) -> Option<&CommandDefinition> {
        let wanted: Vec<&str> = name.split_whitespace().collect();
        self.commands.iter().find(|c| c.words() == wanted)
    }
}
