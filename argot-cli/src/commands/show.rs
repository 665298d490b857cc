use argot_core::{CommandDefinition, NamedParameter, PositionalParameter};
use serde::{Deserialize, Serialize};

use super::SubCommand;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShowFormat {
    Short,
    Medium,
    Full,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ShowCommand {
    #[serde(default)]
    pub format: Option<ShowFormat>,
    pub stat: bool,
    pub objects: Vec<String>,
}

impl SubCommand for ShowCommand {
    fn definition() -> CommandDefinition {
        CommandDefinition::new("show")
            .summary("Show various types of objects")
            .named(
                NamedParameter::new("format")
                    .enumeration(&["Short", "Medium", "Full"])
                    .description("How much of each object to print."),
            )
            .named(NamedParameter::flag("stat").description("Include a diffstat."))
            .positional(
                PositionalParameter::new("objects")
                    .list()
                    .description("Names of the objects to show. Defaults to HEAD."),
            )
    }
}
