use argot_core::{CommandDefinition, NamedParameter, PositionalParameter};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::SubCommand;

#[derive(Debug, Serialize, Deserialize)]
pub struct AddCommand {
    pub force: bool,
    pub dry_run: bool,
    pub paths: BTreeSet<String>,
}

impl SubCommand for AddCommand {
    fn definition() -> CommandDefinition {
        CommandDefinition::new("add")
            .summary("Add file contents to the index")
            .named(NamedParameter::flag("force").short("f").long("force").description("Allow adding ignored files."))
            .named(NamedParameter::flag("dry_run").short("n").description("Only show what would be added."))
            .positional(
                PositionalParameter::new("paths")
                    .set()
                    .required()
                    .description("Files to add. Each path is added once."),
            )
    }
}
