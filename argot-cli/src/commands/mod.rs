//! Sample commands and the registry that dispatches to them.

use anyhow::{anyhow, Result};
use argot_core::{
    CatalogManifest, CommandDefinition, ParseResult, ParserConfiguration, PropertyInjector,
};
use argot_render_cli::CliRenderer;
use argot_render_core::{HelpView, Renderer};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

mod add;
mod bisect;
mod help;
mod log;
mod show;

pub use add::AddCommand;
pub use bisect::{BisectResetCommand, BisectStartCommand};
pub use help::{CompleteCommand, HelpCommand};
pub use log::LogCommand;
pub use show::ShowCommand;

/// What a running command can reach besides its own parameters.
pub struct Context<'a> {
    pub configuration: &'a ParserConfiguration,
    pub renderer: &'a CliRenderer,
    pub raw: bool,
}

impl Context<'_> {
    pub fn render_help(&self, view: &HelpView) -> Result<String> {
        if self.raw {
            Ok(serde_json::to_string_pretty(view)?)
        } else {
            self.renderer.render(view)
        }
    }
}

/// A command whose parameters bind into `Self`.
pub trait SubCommand: Serialize + DeserializeOwned {
    fn definition() -> CommandDefinition;

    /// Default behaviour prints the bound parameters.
    fn execute(&self, _context: &Context<'_>) -> Result<()> {
        println!("{}", serde_json::to_string_pretty(self)?);
        Ok(())
    }
}

type Runner = fn(&ParseResult<'_>, &Context<'_>) -> Result<()>;

fn run<C: SubCommand>(result: &ParseResult<'_>, context: &Context<'_>) -> Result<()> {
    let command: C = PropertyInjector::new(result).bind()?;
    command.execute(context)
}

// Catalog commands have no type to bind into, so they print the converted values
fn dump(result: &ParseResult<'_>, _context: &Context<'_>) -> Result<()> {
    let values = PropertyInjector::new(result).to_value()?;
    println!("{}", serde_json::to_string_pretty(&values)?);
    Ok(())
}

pub struct Registry {
    configuration: ParserConfiguration,
    runners: Vec<(String, Runner)>,
}

impl Registry {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            configuration: ParserConfiguration::new(program),
            runners: Vec::new(),
        }
    }

    /// The built-in sample commands.
    pub fn builtin(program: impl Into<String>) -> Result<Self> {
        let mut registry = Self::new(program);
        registry
            .register::<ShowCommand>()?
            .register::<LogCommand>()?
            .register::<AddCommand>()?
            .register::<BisectStartCommand>()?
            .register::<BisectResetCommand>()?
            .register::<HelpCommand>()?
            .register::<CompleteCommand>()?;
        Ok(registry)
    }

    pub fn register<C: SubCommand>(&mut self) -> Result<&mut Self> {
        let definition = C::definition();
        let name = definition.name.clone();
        self.configuration.register(definition)?;
        self.runners.push((name, run::<C>));
        Ok(self)
    }

    pub fn register_catalog(&mut self, manifest: &CatalogManifest) -> Result<()> {
        let before = self.configuration.commands().len();
        manifest.register_into(&mut self.configuration)?;
        for command in &self.configuration.commands()[before..] {
            self.runners.push((command.name.clone(), dump));
        }
        Ok(())
    }

    pub fn configuration(&self) -> &ParserConfiguration {
        &self.configuration
    }

    pub fn run(&self, result: &ParseResult<'_>, context: &Context<'_>) -> Result<()> {
        let runner = self.runners.iter()
            .find(|(name, _)| *name == result.command.name)
            .map(|(_, runner)| *runner)
            .ok_or_else(|| anyhow!("no runner for '{}'", result.command.name))?;

        debug!(command = %result.command.name, "dispatching");
        runner(result, context)
    }
}
