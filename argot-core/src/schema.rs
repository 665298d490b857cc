//! Static description of what each command accepts.
//!
//! Definitions are built once with the builder methods below, registered into
//! a [`ParserConfiguration`](crate::ParserConfiguration), and never change while
//! parsing. Each parameter carries the [`Converter`] that turns its raw text
//! into a typed value, so nothing downstream needs to inspect the target type.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

pub type ConvertFn = dyn Fn(&str) -> std::result::Result<Value, String> + Send + Sync;

/// What a converter produces, kept alongside the function for help output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "type", content = "members")]
pub enum ValueKind {
    String,
    Integer,
    Boolean,
    Enumeration(Vec<String>),
    Custom(String),
}

impl ValueKind {
    /// Short placeholder used in synopses, e.g. `<int>`.
    pub fn placeholder(&self) -> String {
        match self {
            ValueKind::String | ValueKind::Boolean => "value".to_string(),
            ValueKind::Integer => "int".to_string(),
            ValueKind::Enumeration(members) => members.join("|"),
            ValueKind::Custom(name) => name.clone(),
        }
    }
}

#[derive(Clone)]
pub struct Converter {
    kind: ValueKind,
    func: Arc<ConvertFn>,
}

impl Converter {
    pub fn new(
        kind: ValueKind,
        func: impl Fn(&str) -> std::result::Result<Value, String> + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            func: Arc::new(func),
        }
    }

    pub fn string() -> Self {
        Self::new(ValueKind::String, |raw| Ok(Value::String(raw.to_string())))
    }

    pub fn integer() -> Self {
        Self::new(ValueKind::Integer, |raw| {
            raw.parse::<i64>()
                .map(Value::from)
                .map_err(|e| format!("expected an integer ({})", e))
        })
    }

    /// Presence-only flags bind `true` whatever their recorded text.
    pub fn boolean() -> Self {
        Self::new(ValueKind::Boolean, |_| Ok(Value::Bool(true)))
    }

    /// Matches member names exactly (case-sensitive).
    pub fn enumeration<S: AsRef<str>>(members: &[S]) -> Self {
        let members: Vec<String> = members.iter().map(|m| m.as_ref().to_string()).collect();
        let accepted = members.clone();
        Self::new(ValueKind::Enumeration(members), move |raw| {
            if accepted.iter().any(|m| m == raw) {
                Ok(Value::String(raw.to_string()))
            } else {
                Err(format!("expected one of: {}", accepted.join(", ")))
            }
        })
    }

    pub fn kind(&self) -> &ValueKind {
        &self.kind
    }

    pub fn convert(&self, raw: &str) -> std::result::Result<Value, String> {
        (self.func)(raw)
    }
}

impl fmt::Debug for Converter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Converter").field("kind", &self.kind).finish()
    }
}

impl Default for Converter {
    fn default() -> Self {
        Self::string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Multiplicity {
    #[default]
    Scalar,
    List,
    Set,
}

impl Multiplicity {
    pub fn is_many(self) -> bool {
        self != Multiplicity::Scalar
    }
}

/// A parameter bound from a `--long` or `-s` option.
#[derive(Debug, Clone)]
pub struct NamedParameter {
    pub property: String,
    pub long_name: Option<String>,
    pub short_name: Option<String>,
    pub is_bool: bool,
    pub is_required: bool,
    pub multiplicity: Multiplicity,
    pub description: Option<String>,
    pub converter: Converter,
}

impl NamedParameter {
    pub fn new(property: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            long_name: None,
            short_name: None,
            is_bool: false,
            is_required: false,
            multiplicity: Multiplicity::Scalar,
            description: None,
            converter: Converter::string(),
        }
    }

    /// A presence-only option that never takes a value token.
    pub fn flag(property: impl Into<String>) -> Self {
        let mut param = Self::new(property);
        param.is_bool = true;
        param.converter = Converter::boolean();
        param
    }

    pub fn long(mut self, name: impl Into<String>) -> Self {
        self.long_name = Some(name.into());
        self
    }

    pub fn short(mut self, name: impl Into<String>) -> Self {
        self.short_name = Some(name.into());
        self
    }

    pub fn required(mut self) -> Self {
        self.is_required = true;
        self
    }

    /// Collect every occurrence of the option, in order.
    pub fn list(mut self) -> Self {
        self.multiplicity = Multiplicity::List;
        self
    }

    pub fn set(mut self) -> Self {
        self.multiplicity = Multiplicity::Set;
        self
    }

    pub fn integer(self) -> Self {
        self.converter(Converter::integer())
    }

    pub fn enumeration<S: AsRef<str>>(self, members: &[S]) -> Self {
        self.converter(Converter::enumeration(members))
    }

    pub fn converter(mut self, converter: Converter) -> Self {
        self.converter = converter;
        self
    }

    pub fn description(mut self, text: impl Into<String>) -> Self {
        self.description = Some(text.into());
        self
    }

    /// The declared long name, or the kebab-cased property name.
    pub fn effective_long_name(&self) -> String {
        match &self.long_name {
            Some(long) => long.clone(),
            None => self.property.replace('_', "-"),
        }
    }

    pub fn matches_long(&self, name: &str) -> bool {
        self.effective_long_name() == name
    }

    pub fn matches_short(&self, name: &str) -> bool {
        self.short_name.as_deref() == Some(name)
    }
}

impl PartialEq for NamedParameter {
    fn eq(&self, other: &Self) -> bool {
        self.property == other.property
            && self.long_name == other.long_name
            && self.short_name == other.short_name
            && self.is_bool == other.is_bool
            && self.is_required == other.is_required
            && self.multiplicity == other.multiplicity
            && self.converter.kind() == other.converter.kind()
    }
}

/// A parameter bound from value tokens by declaration order.
#[derive(Debug, Clone)]
pub struct PositionalParameter {
    pub property: String,
    pub is_required: bool,
    pub multiplicity: Multiplicity,
    pub description: Option<String>,
    pub converter: Converter,
}

impl PositionalParameter {
    pub fn new(property: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            is_required: false,
            multiplicity: Multiplicity::Scalar,
            description: None,
            converter: Converter::string(),
        }
    }

    pub fn required(mut self) -> Self {
        self.is_required = true;
        self
    }

    /// Absorb every remaining value token, keeping order and duplicates.
    pub fn list(mut self) -> Self {
        self.multiplicity = Multiplicity::List;
        self
    }

    /// Absorb every remaining value token, dropping duplicates.
    pub fn set(mut self) -> Self {
        self.multiplicity = Multiplicity::Set;
        self
    }

    pub fn integer(self) -> Self {
        self.converter(Converter::integer())
    }

    pub fn enumeration<S: AsRef<str>>(self, members: &[S]) -> Self {
        self.converter(Converter::enumeration(members))
    }

    pub fn converter(mut self, converter: Converter) -> Self {
        self.converter = converter;
        self
    }

    pub fn description(mut self, text: impl Into<String>) -> Self {
        self.description = Some(text.into());
        self
    }

    pub fn is_list(&self) -> bool {
        self.multiplicity.is_many()
    }
}

impl PartialEq for PositionalParameter {
    fn eq(&self, other: &Self) -> bool {
        self.property == other.property
            && self.is_required == other.is_required
            && self.multiplicity == other.multiplicity
            && self.converter.kind() == other.converter.kind()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CommandDefinition {
    pub name: String,
    pub summary: String,
    pub description: Option<String>,
    pub positional: Vec<PositionalParameter>,
    pub named: Vec<NamedParameter>,
}

impl CommandDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        // Normalise runs of whitespace so "bisect  start" and "bisect start" agree
        let name: String = name.into();
        Self {
            name: name.split_whitespace().collect::<Vec<_>>().join(" "),
            summary: String::new(),
            description: None,
            positional: Vec::new(),
            named: Vec::new(),
        }
    }

    pub fn summary(mut self, text: impl Into<String>) -> Self {
        self.summary = text.into();
        self
    }

    pub fn description(mut self, text: impl Into<String>) -> Self {
        self.description = Some(text.into());
        self
    }

    pub fn named(mut self, param: NamedParameter) -> Self {
        self.named.push(param);
        self
    }

    pub fn positional(mut self, param: PositionalParameter) -> Self {
        self.positional.push(param);
        self
    }

    pub fn words(&self) -> Vec<&str> {
        self.name.split(' ').filter(|w| !w.is_empty()).collect()
    }

    pub fn find_long(&self, name: &str) -> Option<&NamedParameter> {
        self.named.iter().find(|p| p.matches_long(name))
    }

    pub fn find_short(&self, name: &str) -> Option<&NamedParameter> {
        self.named.iter().find(|p| p.matches_short(name))
    }

    /// Checks the invariants the matcher relies on.
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.name.is_empty() {
            return Err("command name must not be empty".to_string());
        }

        if let Some(index) = self.positional.iter().position(|p| p.is_list()) {
            if index + 1 != self.positional.len() {
                return Err(format!(
                    "'{}': list parameter '{}' must be the last positional parameter",
                    self.name, self.positional[index].property
                ));
            }
        }

        let mut properties: Vec<&str> = Vec::new();
        let all = self.positional.iter().map(|p| p.property.as_str())
            .chain(self.named.iter().map(|p| p.property.as_str()));
        for property in all {
            if properties.contains(&property) {
                return Err(format!("'{}': duplicate parameter '{}'", self.name, property));
            }
            properties.push(property);
        }

        let mut option_names: Vec<String> = Vec::new();
        for param in &self.named {
            if param.is_bool && param.is_required {
                return Err(format!("'{}': flag '{}' cannot be required", self.name, param.property));
            }
            if param.is_bool && param.multiplicity.is_many() {
                return Err(format!("'{}': flag '{}' cannot take multiple values", self.name, param.property));
            }

            let long = Some(("--", param.effective_long_name()));
            let short = param.short_name.clone().map(|n| ("-", n));
            for (dashes, bare) in long.into_iter().chain(short) {
                let option = format!("{}{}", dashes, bare);
                if bare.is_empty() || bare.starts_with('-') || bare.contains(char::is_whitespace) {
                    return Err(format!("'{}': invalid option name '{}'", self.name, option));
                }
                if option_names.contains(&option) {
                    return Err(format!("'{}': option '{}' declared twice", self.name, option));
                }
                option_names.push(option);
            }
        }

        Ok(())
    }
}
