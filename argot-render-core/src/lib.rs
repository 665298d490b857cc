use anyhow::Result;
use argot_core::{CommandDefinition, ParserConfiguration};
use serde::{Deserialize, Serialize};

mod document;
pub mod markleft;

pub use document::{Document, Paragraph, ParagraphStyle};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandListEntry {
    pub name: String,
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandListHelp {
    pub program: String,
    pub commands: Vec<CommandListEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionHelp {
    pub long: Option<String>,
    pub short: Option<String>,
    /// Value placeholder; `None` for flags.
    pub value: Option<String>,
    pub required: bool,
    pub repeated: bool,
    pub description: Option<String>,
}

impl OptionHelp {
    /// `--long`, `-s` forms in declaration order.
    pub fn forms(&self) -> Vec<String> {
        let mut forms = Vec::new();
        if let Some(long) = &self.long {
            forms.push(format!("--{}", long));
        }
        if let Some(short) = &self.short {
            forms.push(format!("-{}", short));
        }
        forms
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArgumentHelp {
    pub name: String,
    pub value: String,
    pub required: bool,
    pub repeated: bool,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandHelp {
    pub program: String,
    pub name: String,
    pub summary: String,
    pub description: Option<String>,
    pub options: Vec<OptionHelp>,
    pub arguments: Vec<ArgumentHelp>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum HelpView {
    #[serde(rename = "command_list")]
    CommandList(CommandListHelp),
    #[serde(rename = "command")]
    Command(CommandHelp),
    #[serde(rename = "usage")]
    Usage(CommandHelp),
}

pub trait Renderer {
    fn render(&self, view: &HelpView) -> Result<String>;
}

impl CommandListHelp {
    /// One entry per top-level word. Multi-word commands are grouped under
    /// their first word, which borrows the summary of a single-word command
    /// of the same name when one is registered.
    pub fn from_configuration(configuration: &ParserConfiguration) -> Self {
        struct Group<'a> {
            word: &'a str,
            summary: Option<&'a str>,
            children: Vec<&'a str>,
        }

        let mut groups: Vec<Group> = Vec::new();
        for command in configuration.commands() {
            let words = command.words();
            let Some(first) = words.first().copied() else {
                continue;
            };

            let index = match groups.iter().position(|g| g.word == first) {
                Some(index) => index,
                None => {
                    groups.push(Group { word: first, summary: None, children: Vec::new() });
                    groups.len() - 1
                }
            };
            let group = &mut groups[index];

            if words.len() == 1 {
                group.summary.get_or_insert(command.summary.as_str());
            } else if !group.children.contains(&words[1]) {
                group.children.push(words[1]);
            }
        }

        let mut commands: Vec<CommandListEntry> = groups.into_iter()
            .map(|group| {
                let summary = match group.summary {
                    Some(summary) if !summary.is_empty() => summary.to_string(),
                    _ if !group.children.is_empty() => format!("({})", group.children.join(", ")),
                    _ => String::new(),
                };
                CommandListEntry { name: group.word.to_string(), summary }
            })
            .collect();
        commands.sort_by(|a, b| a.name.cmp(&b.name));

        Self {
            program: configuration.program().to_string(),
            commands,
        }
    }
}

impl CommandHelp {
    pub fn from_definition(program: &str, command: &CommandDefinition) -> Self {
        let options = command.named.iter()
            .map(|param| OptionHelp {
                long: Some(param.effective_long_name()),
                short: param.short_name.clone(),
                value: (!param.is_bool).then(|| param.converter.kind().placeholder()),
                required: param.is_required,
                repeated: param.multiplicity.is_many(),
                description: param.description.clone(),
            })
            .collect();

        let arguments = command.positional.iter()
            .map(|param| ArgumentHelp {
                name: param.property.replace('_', "-"),
                value: param.converter.kind().placeholder(),
                required: param.is_required,
                repeated: param.is_list(),
                description: param.description.clone(),
            })
            .collect();

        Self {
            program: program.to_string(),
            name: command.name.clone(),
            summary: command.summary.clone(),
            description: command.description.clone(),
            options,
            arguments,
        }
    }

    /// Synopsis pieces after `<program> <name>`, e.g. `[--all | -a]`,
    /// `--message | -m <value>`, `<path>`, `[<paths>...]`.
    pub fn synopsis(&self) -> Vec<String> {
        let mut parts = Vec::new();

        for option in &self.options {
            let mut text = option.forms().join(" | ");
            if let Some(value) = &option.value {
                text.push_str(&format!(" <{}>", value));
            }
            if option.repeated {
                text.push_str("...");
            }
            if option.required {
                parts.push(text);
            } else {
                parts.push(format!("[{}]", text));
            }
        }

        for argument in &self.arguments {
            let mut text = format!("<{}>", argument.name);
            if argument.repeated {
                text.push_str("...");
            }
            if argument.required {
                parts.push(text);
            } else {
                parts.push(format!("[{}]", text));
            }
        }

        parts
    }

    pub fn description_document(&self, style: &ParagraphStyle) -> Document {
        match &self.description {
            Some(text) => Document::from_markleft(text, style),
            None => Document::new(),
        }
    }
}
