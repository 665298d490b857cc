use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::config::ParserConfiguration;
use crate::error::{Error, Result};
use crate::schema::{
    CommandDefinition, Converter, Multiplicity, NamedParameter, PositionalParameter,
};

/// A command catalog declared in TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogManifest {
    #[serde(default)]
    pub program: Option<String>,
    #[serde(default)]
    pub commands: Vec<CommandEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandEntry {
    pub name: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub named: Vec<NamedEntry>,
    #[serde(default)]
    pub positional: Vec<PositionalEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    #[default]
    String,
    Integer,
    Boolean,
    Enumeration,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamedEntry {
    pub property: String,
    #[serde(default)]
    pub long: Option<String>,
    #[serde(default)]
    pub short: Option<String>,
    #[serde(default, rename = "type")]
    pub type_: EntryType,
    #[serde(default)]
    pub members: Vec<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub multiplicity: Multiplicity,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PositionalEntry {
    pub property: String,
    #[serde(default, rename = "type")]
    pub type_: EntryType,
    #[serde(default)]
    pub members: Vec<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub multiplicity: Multiplicity,
    #[serde(default)]
    pub description: Option<String>,
}

fn converter_for(property: &str, type_: EntryType, members: &[String]) -> Result<Converter> {
    match type_ {
        EntryType::String => Ok(Converter::string()),
        EntryType::Integer => Ok(Converter::integer()),
        EntryType::Boolean => Ok(Converter::boolean()),
        EntryType::Enumeration if members.is_empty() => Err(Error::Manifest(format!(
            "enumeration parameter '{}' lists no members",
            property
        ))),
        EntryType::Enumeration => Ok(Converter::enumeration(members)),
    }
}

impl NamedEntry {
    fn to_parameter(&self) -> Result<NamedParameter> {
        let mut param = if self.type_ == EntryType::Boolean {
            NamedParameter::flag(&self.property)
        } else {
            NamedParameter::new(&self.property)
                .converter(converter_for(&self.property, self.type_, &self.members)?)
        };

        param.long_name = self.long.clone();
        param.short_name = self.short.clone();
        param.is_required = self.required;
        param.multiplicity = self.multiplicity;
        param.description = self.description.clone();
        Ok(param)
    }
}

impl PositionalEntry {
    fn to_parameter(&self) -> Result<PositionalParameter> {
        if self.type_ == EntryType::Boolean {
            return Err(Error::Manifest(format!(
                "positional parameter '{}' cannot be boolean",
                self.property
            )));
        }

        let mut param = PositionalParameter::new(&self.property)
            .converter(converter_for(&self.property, self.type_, &self.members)?);
        param.is_required = self.required;
        param.multiplicity = self.multiplicity;
        param.description = self.description.clone();
        Ok(param)
    }
}

impl CommandEntry {
    pub fn to_definition(&self) -> Result<CommandDefinition> {
        let mut definition = CommandDefinition::new(&self.name).summary(&self.summary);
        definition.description = self.description.clone();

        for entry in &self.named {
            definition = definition.named(entry.to_parameter()?);
        }
        for entry in &self.positional {
            definition = definition.positional(entry.to_parameter()?);
        }
        Ok(definition)
    }
}

impl FromStr for CatalogManifest {
    type Err = Error;

    fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| Error::Manifest(format!("Failed to parse catalog: {}", e)))
    }
}

impl CatalogManifest {
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| Error::Manifest(format!("Failed to read catalog {}: {}", path.as_ref().display(), e)))?;

        content.parse()
    }

    /// Registers every entry, in file order, into `configuration`.
    pub fn register_into(&self, configuration: &mut ParserConfiguration) -> Result<()> {
        if let Some(program) = &self.program {
            configuration.set_program(program);
        }
        for entry in &self.commands {
            configuration.register(entry.to_definition()?)?;
        }
        Ok(())
    }

    pub fn into_configuration(self) -> Result<ParserConfiguration> {
        let mut configuration = ParserConfiguration::new(self.program.clone().unwrap_or_default());
        self.register_into(&mut configuration)?;
        Ok(configuration)
    }
}
