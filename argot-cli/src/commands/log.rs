use argot_core::{CommandDefinition, NamedParameter, PositionalParameter};
use serde::{Deserialize, Serialize};

use super::SubCommand;

const DESCRIPTION: &str = "Shows the commit logs, newest first.

Limit the output with --max-count, or restrict it to commits by particular
authors by repeating --author:
- --author ann --author bob
- -n 10";

#[derive(Debug, Serialize, Deserialize)]
pub struct LogCommand {
    pub oneline: bool,
    #[serde(default)]
    pub max_count: Option<i64>,
    pub author: Vec<String>,
    #[serde(default)]
    pub revision: Option<String>,
    pub paths: Vec<String>,
}

impl SubCommand for LogCommand {
    fn definition() -> CommandDefinition {
        CommandDefinition::new("log")
            .summary("Show commit logs")
            .description(DESCRIPTION)
            .named(NamedParameter::flag("oneline").description("Print each commit on a single line."))
            .named(
                NamedParameter::new("max_count")
                    .short("n")
                    .long("max-count")
                    .integer()
                    .description("Limit the number of commits to output."),
            )
            .named(
                NamedParameter::new("author")
                    .list()
                    .description("Only show commits by this author. May be repeated."),
            )
            .positional(PositionalParameter::new("revision"))
            .positional(PositionalParameter::new("paths").list())
    }
}
