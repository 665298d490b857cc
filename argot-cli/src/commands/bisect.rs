use argot_core::{CommandDefinition, PositionalParameter};
use serde::{Deserialize, Serialize};

use super::SubCommand;

#[derive(Debug, Serialize, Deserialize)]
pub struct BisectStartCommand {
    #[serde(default)]
    pub bad: Option<String>,
    pub good: Vec<String>,
}

impl SubCommand for BisectStartCommand {
    fn definition() -> CommandDefinition {
        CommandDefinition::new("bisect start")
            .summary("Start a binary search for the change that introduced a bug")
            .positional(PositionalParameter::new("bad").description("A revision known to be bad."))
            .positional(
                PositionalParameter::new("good")
                    .list()
                    .description("Revisions known to be good."),
            )
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BisectResetCommand {
    #[serde(default)]
    pub commit: Option<String>,
}

impl SubCommand for BisectResetCommand {
    fn definition() -> CommandDefinition {
        CommandDefinition::new("bisect reset")
            .summary("Finish bisecting and return to the original branch")
            .positional(PositionalParameter::new("commit"))
    }
}
