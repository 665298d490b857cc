use crate::schema::{CommandDefinition, NamedParameter, PositionalParameter};

/// Text recorded for a flag that was present on the command line.
pub const FLAG_PRESENT: &str = "true";

#[derive(Debug, Clone, PartialEq)]
pub struct NamedParameterResult<'c> {
    pub parameter: &'c NamedParameter,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PositionalParameterResult<'c> {
    pub parameter: &'c PositionalParameter,
    pub values: Vec<String>,
}

/// Raw values matched for one invocation, before any type conversion.
///
/// Every parameter referenced here belongs to `command`.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseResult<'c> {
    pub command: &'c CommandDefinition,
    pub named: Vec<NamedParameterResult<'c>>,
    pub positional: Vec<PositionalParameterResult<'c>>,
}

impl<'c> ParseResult<'c> {
    pub fn new(command: &'c CommandDefinition) -> Self {
        Self {
            command,
            named: Vec::new(),
            positional: Vec::new(),
        }
    }

    pub fn add_named(&mut self, parameter: &'c NamedParameter, value: impl Into<String>) {
        self.named.push(NamedParameterResult {
            parameter,
            value: value.into(),
        });
    }

    /// Appends to the parameter's existing value list, creating it on first use.
    pub fn add_positional(&mut self, parameter: &'c PositionalParameter, value: impl Into<String>) {
        let value = value.into();
        match self.positional.iter_mut().find(|r| r.parameter.property == parameter.property) {
            Some(existing) => existing.values.push(value),
            None => self.positional.push(PositionalParameterResult {
                parameter,
                values: vec![value],
            }),
        }
    }

    pub fn add_empty_positional(&mut self, parameter: &'c PositionalParameter) {
        if self.positional_values(&parameter.property).is_none() {
            self.positional.push(PositionalParameterResult {
                parameter,
                values: Vec::new(),
            });
        }
    }

    /// Every recorded value for a named parameter, in command-line order.
    pub fn named_values(&self, property: &str) -> Vec<&str> {
        self.named.iter()
            .filter(|r| r.parameter.property == property)
            .map(|r| r.value.as_str())
            .collect()
    }

    pub fn has_named(&self, property: &str) -> bool {
        self.named.iter().any(|r| r.parameter.property == property)
    }

    pub fn positional_values(&self, property: &str) -> Option<&[String]> {
        self.positional.iter()
            .find(|r| r.parameter.property == property)
            .map(|r| r.values.as_slice())
    }
}
