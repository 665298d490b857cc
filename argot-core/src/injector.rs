//! Converts matched raw values and writes them into a target.
//!
//! The target is any serde type whose field names are the parameter property
//! names. Conversion runs for every declared parameter before anything is
//! written, and all failures are reported together.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{Error, FieldError, Result};
use crate::result::ParseResult;
use crate::schema::{Converter, Multiplicity};

pub struct PropertyInjector<'r, 'c> {
    result: &'r ParseResult<'c>,
}

impl<'r, 'c> PropertyInjector<'r, 'c> {
    pub fn new(result: &'r ParseResult<'c>) -> Self {
        Self { result }
    }

    /// Converted values keyed by property name.
    ///
    /// Flags are always present (`false` when absent), list and set parameters
    /// default to an empty array, and optional scalars without a value are left
    /// out so the target keeps its own value for them.
    pub fn to_value(&self) -> Result<Value> {
        let command = self.result.command;
        let mut fields = Map::new();
        let mut errors = Vec::new();

        for param in &command.named {
            if param.is_bool {
                fields.insert(param.property.clone(), Value::Bool(self.result.has_named(&param.property)));
                continue;
            }

            let raw = self.result.named_values(&param.property);
            if raw.is_empty() {
                if param.is_required {
                    errors.push(FieldError::MissingRequiredParameter(param.property.clone()));
                } else if param.multiplicity.is_many() {
                    fields.insert(param.property.clone(), Value::Array(Vec::new()));
                }
                continue;
            }

            // A repeated scalar option keeps its last occurrence
            let raw = match param.multiplicity {
                Multiplicity::Scalar => &raw[raw.len() - 1..],
                _ => &raw[..],
            };
            match convert_field(&param.property, &param.converter, param.multiplicity, raw.iter().copied()) {
                Ok(value) => {
                    fields.insert(param.property.clone(), value);
                }
                Err(error) => errors.push(error),
            }
        }

        for param in &command.positional {
            let raw = self.result.positional_values(&param.property).unwrap_or(&[]);
            if raw.is_empty() {
                if param.is_required {
                    errors.push(FieldError::MissingRequiredParameter(param.property.clone()));
                } else if param.is_list() {
                    fields.insert(param.property.clone(), Value::Array(Vec::new()));
                }
                continue;
            }

            match convert_field(&param.property, &param.converter, param.multiplicity, raw.iter().map(String::as_str)) {
                Ok(value) => {
                    fields.insert(param.property.clone(), value);
                }
                Err(error) => errors.push(error),
            }
        }

        if !errors.is_empty() {
            debug!(command = %command.name, failures = errors.len(), "binding failed");
            return Err(Error::Binding(errors));
        }

        Ok(Value::Object(fields))
    }

    /// Builds a fresh target. Fields with no bound value take their serde default.
    pub fn bind<T: DeserializeOwned>(&self) -> Result<T> {
        let value = self.to_value()?;
        Ok(serde_json::from_value(value)?)
    }

    /// Writes bound values over an existing target, leaving unbound fields as
    /// they are. On any error the target is not modified.
    pub fn populate<T>(&self, target: &mut T) -> Result<()>
    where
        T: Serialize + DeserializeOwned,
    {
        let bound = self.to_value()?;
        let mut merged = serde_json::to_value(&*target)?;

        match (&mut merged, bound) {
            (Value::Object(existing), Value::Object(bound)) => {
                for (property, value) in bound {
                    existing.insert(property, value);
                }
            }
            _ => {
                return Err(Error::Schema("binding target must serialize as a struct".to_string()));
            }
        }

        *target = serde_json::from_value(merged)?;
        Ok(())
    }
}

fn convert_field<'a>(
    property: &str,
    converter: &Converter,
    multiplicity: Multiplicity,
    raw: impl Iterator<Item = &'a str>,
) -> std::result::Result<Value, FieldError> {
    let mut converted = Vec::new();
    for text in raw {
        let value = converter.convert(text).map_err(|reason| FieldError::InvalidValue {
            property: property.to_string(),
            value: text.to_string(),
            reason,
        })?;
        if multiplicity == Multiplicity::Set && converted.contains(&value) {
            continue;
        }
        converted.push(value);
    }

    match multiplicity {
        Multiplicity::Scalar => Ok(converted.into_iter().next().unwrap_or(Value::Null)),
        Multiplicity::List | Multiplicity::Set => Ok(Value::Array(converted)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{CommandDefinition, NamedParameter, PositionalParameter};
    use serde::Deserialize;
    use std::collections::HashSet;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    enum TestEnum {
        One,
        Two,
        Three,
    }

    const MEMBERS: [&str; 3] = ["One", "Two", "Three"];

    #[derive(Debug, Default, Serialize, Deserialize)]
    struct LongNamed {
        #[serde(default)]
        num: i64,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    struct StringList {
        things: Vec<String>,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    struct LongList {
        nums: Vec<i64>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    struct EnumPositional {
        num: TestEnum,
    }

    #[derive(Debug, Serialize, Deserialize)]
    struct EnumList {
        nums: Vec<TestEnum>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    struct EnumSet {
        nums: HashSet<TestEnum>,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    struct Flags {
        verbose: bool,
        #[serde(default)]
        count: Option<i64>,
        #[serde(default)]
        untouched: String,
    }

    #[test]
    fn injects_long_named_parameter() {
        let command = CommandDefinition::new("t").named(NamedParameter::new("num").integer());
        let mut result = ParseResult::new(&command);
        result.add_named(&command.named[0], "316");

        let target: LongNamed = PropertyInjector::new(&result).bind().expect("bind");
        assert_eq!(target.num, 316);
    }

    #[test]
    fn injects_long_positional_parameter() {
        let command = CommandDefinition::new("t").positional(PositionalParameter::new("num").integer());
        let mut result = ParseResult::new(&command);
        result.add_positional(&command.positional[0], "806");

        let target: LongNamed = PropertyInjector::new(&result).bind().expect("bind");
        assert_eq!(target.num, 806);
    }

    #[test]
    fn injects_one_item_into_initialized_list() {
        let command = CommandDefinition::new("t").positional(PositionalParameter::new("things").list());
        let mut result = ParseResult::new(&command);
        result.add_positional(&command.positional[0], "Fred");

        let mut target = StringList { things: vec!["stale".to_string()] };
        PropertyInjector::new(&result).populate(&mut target).expect("populate");
        assert_eq!(target.things, vec!["Fred"]);
    }

    #[test]
    fn injects_multiple_items_into_string_list() {
        let command = CommandDefinition::new("t").positional(PositionalParameter::new("things").list());
        let mut result = ParseResult::new(&command);
        result.add_positional(&command.positional[0], "Fred");
        result.add_positional(&command.positional[0], "Barney");

        let target: StringList = PropertyInjector::new(&result).bind().expect("bind");
        assert_eq!(target.things, vec!["Fred", "Barney"]);
    }

    #[test]
    fn injects_multiple_items_into_long_list() {
        let command = CommandDefinition::new("t").positional(PositionalParameter::new("nums").list().integer());
        let mut result = ParseResult::new(&command);
        result.add_positional(&command.positional[0], "1025");
        result.add_positional(&command.positional[0], "408");

        let target: LongList = PropertyInjector::new(&result).bind().expect("bind");
        assert_eq!(target.nums, vec![1025, 408]);
    }

    #[test]
    fn injects_enum_positional_parameter() {
        let command = CommandDefinition::new("t").positional(PositionalParameter::new("num").enumeration(&MEMBERS));
        let mut result = ParseResult::new(&command);
        result.add_positional(&command.positional[0], "One");

        let target: EnumPositional = PropertyInjector::new(&result).bind().expect("bind");
        assert_eq!(target.num, TestEnum::One);
    }

    #[test]
    fn injects_multiple_items_into_enum_list() {
        let command = CommandDefinition::new("t").positional(PositionalParameter::new("nums").list().enumeration(&MEMBERS));
        let mut result = ParseResult::new(&command);
        result.add_positional(&command.positional[0], "Two");
        result.add_positional(&command.positional[0], "Three");

        let target: EnumList = PropertyInjector::new(&result).bind().expect("bind");
        assert_eq!(target.nums, vec![TestEnum::Two, TestEnum::Three]);
    }

    #[test]
    fn injects_multiple_items_into_enum_set() {
        let command = CommandDefinition::new("t").positional(PositionalParameter::new("nums").set().enumeration(&MEMBERS));
        let mut result = ParseResult::new(&command);
        for value in ["Two", "Three", "Two"] {
            result.add_positional(&command.positional[0], value);
        }

        let value = PropertyInjector::new(&result).to_value().expect("convert");
        assert_eq!(value["nums"], serde_json::json!(["Two", "Three"]));

        let target: EnumSet = PropertyInjector::new(&result).bind().expect("bind");
        assert!(target.nums.contains(&TestEnum::Two));
        assert!(target.nums.contains(&TestEnum::Three));
        assert!(!target.nums.contains(&TestEnum::One));
    }

    #[test]
    fn invalid_enum_leaves_target_untouched() {
        let command = CommandDefinition::new("t").positional(PositionalParameter::new("num").enumeration(&MEMBERS));
        let mut result = ParseResult::new(&command);
        result.add_positional(&command.positional[0], "Seven");

        let mut target = EnumPositional { num: TestEnum::Three };
        let err = PropertyInjector::new(&result).populate(&mut target).unwrap_err();
        match err {
            Error::Binding(errors) => {
                assert_eq!(errors.len(), 1);
                assert!(matches!(&errors[0], FieldError::InvalidValue { property, value, .. }
                    if property == "num" && value == "Seven"));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(target.num, TestEnum::Three);
    }

    #[test]
    fn all_field_errors_are_reported() {
        let command = CommandDefinition::new("t")
            .named(NamedParameter::new("count").integer())
            .named(NamedParameter::new("level").required())
            .positional(PositionalParameter::new("nums").list().integer());
        let mut result = ParseResult::new(&command);
        result.add_named(&command.named[0], "lots");
        result.add_positional(&command.positional[0], "1");
        result.add_positional(&command.positional[0], "x");

        let err = PropertyInjector::new(&result).to_value().unwrap_err();
        let Error::Binding(errors) = err else {
            panic!("expected a binding error");
        };
        let properties: Vec<&str> = errors.iter().map(FieldError::property).collect();
        assert_eq!(properties, vec!["count", "level", "nums"]);
    }

    #[test]
    fn flags_bind_presence_and_keep_unbound_fields() {
        let command = CommandDefinition::new("t")
            .named(NamedParameter::flag("verbose"))
            .named(NamedParameter::new("count").integer());

        let mut target = Flags {
            verbose: true,
            count: Some(3),
            untouched: "kept".to_string(),
        };
        let result = ParseResult::new(&command);
        PropertyInjector::new(&result).populate(&mut target).expect("populate");

        assert!(!target.verbose);
        assert_eq!(target.count, Some(3));
        assert_eq!(target.untouched, "kept");
    }

    #[test]
    fn repeated_scalar_option_keeps_last() {
        let command = CommandDefinition::new("t").named(NamedParameter::new("num").integer());
        let mut result = ParseResult::new(&command);
        result.add_named(&command.named[0], "1");
        result.add_named(&command.named[0], "2");

        let target: LongNamed = PropertyInjector::new(&result).bind().expect("bind");
        assert_eq!(target.num, 2);
    }

    #[test]
    fn type_mismatch_is_a_target_error() {
        let command = CommandDefinition::new("t").named(NamedParameter::new("num"));
        let mut result = ParseResult::new(&command);
        result.add_named(&command.named[0], "abc");

        let err = PropertyInjector::new(&result).bind::<LongNamed>().unwrap_err();
        assert!(matches!(err, Error::Target(_)));
    }
}
