use argot_core::prelude::*;
use argot_core::FieldError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
enum Number {
    One,
    Two,
    Three,
}

#[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
struct Bisect {
    #[serde(default)]
    bad: Option<String>,
    #[serde(default)]
    good: Vec<String>,
}

#[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
struct Touch {
    verbose: bool,
    #[serde(default)]
    file: Option<String>,
}

#[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
struct Collect {
    things: Vec<String>,
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Count {
    num: i64,
    #[serde(default)]
    level: Option<Number>,
    #[serde(default)]
    tags: HashSet<Number>,
}

fn catalog() -> ParserConfiguration {
    let mut config = ParserConfiguration::new("tool");
    config
        .register(CommandDefinition::new("bisect").summary("Find the change that introduced a bug"))
        .and_then(|c| c.register(
            CommandDefinition::new("bisect start")
                .positional(PositionalParameter::new("bad"))
                .positional(PositionalParameter::new("good").list()),
        ))
        .and_then(|c| c.register(
            CommandDefinition::new("touch")
                .named(NamedParameter::flag("verbose").short("v"))
                .positional(PositionalParameter::new("file")),
        ))
        .and_then(|c| c.register(
            CommandDefinition::new("collect")
                .positional(PositionalParameter::new("things").list()),
        ))
        .and_then(|c| c.register(
            CommandDefinition::new("count")
                .named(NamedParameter::new("num").short("n").integer().required())
                .named(NamedParameter::new("level").enumeration(&["One", "Two", "Three"]))
                .positional(PositionalParameter::new("tags").set().enumeration(&["One", "Two", "Three"])),
        ))
        .expect("valid catalog");
    config
}

#[test]
fn multi_word_command_wins_over_prefix() {
    let config = catalog();
    let result = Parser::new(&config).parse_args(["bisect", "start", "x"]).expect("parse");
    assert_eq!(result.command.name, "bisect start");

    let bound: Bisect = PropertyInjector::new(&result).bind().expect("bind");
    assert_eq!(bound.bad.as_deref(), Some("x"));
    assert!(bound.good.is_empty());
}

#[test]
fn single_word_command_still_resolves() {
    let config = catalog();
    let result = Parser::new(&config).parse("bisect").expect("parse");
    assert_eq!(result.command.name, "bisect");
}

#[test]
fn boolean_option_leaves_value_for_positional() {
    let config = catalog();
    let result = Parser::new(&config).parse_args(["touch", "--verbose", "file.txt"]).expect("parse");
    let bound: Touch = PropertyInjector::new(&result).bind().expect("bind");
    assert_eq!(bound, Touch { verbose: true, file: Some("file.txt".to_string()) });
}

#[test]
fn list_positional_is_greedy_and_ordered() {
    let config = catalog();
    let result = Parser::new(&config).parse("collect a b c b").expect("parse");
    let bound: Collect = PropertyInjector::new(&result).bind().expect("bind");
    assert_eq!(bound.things, vec!["a", "b", "c", "b"]);
}

#[test]
fn integers_round_trip_canonically() {
    let config = catalog();
    let result = Parser::new(&config).parse("count --num 042").expect("parse");
    let bound: Count = PropertyInjector::new(&result).bind().expect("bind");
    assert_eq!(bound.num, 42);
    assert_eq!(bound.num.to_string(), "42");
}

#[test]
fn missing_required_named_parameter() {
    let config = catalog();
    let err = Parser::new(&config).parse("count One").unwrap_err();
    assert!(matches!(err, Error::MissingRequiredParameter(ref p) if p == "num"));
}

#[test]
fn invalid_enum_value_does_not_mutate_target() {
    let config = catalog();
    let result = Parser::new(&config).parse("count -n 1 --level Seven").expect("parse");

    let mut target = Count { num: 9, level: Some(Number::Two), tags: HashSet::new() };
    let err = PropertyInjector::new(&result).populate(&mut target).unwrap_err();
    match err {
        Error::Binding(errors) => assert_eq!(
            errors,
            vec![FieldError::InvalidValue {
                property: "level".to_string(),
                value: "Seven".to_string(),
                reason: "expected one of: One, Two, Three".to_string(),
            }]
        ),
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(target.num, 9);
    assert_eq!(target.level, Some(Number::Two));
}

#[test]
fn set_positional_deduplicates() {
    let config = catalog();
    let result = Parser::new(&config).parse("count -n 1 Two Two One").expect("parse");
    let bound: Count = PropertyInjector::new(&result).bind().expect("bind");
    assert_eq!(bound.tags, HashSet::from([Number::One, Number::Two]));
}

#[test]
fn parsing_is_idempotent() {
    let config = catalog();
    let parser = Parser::new(&config);
    let args = ["count", "-n", "7", "--level", "Three", "One", "Two"];

    let first = parser.parse_args(args).expect("first parse");
    let second = parser.parse_args(args).expect("second parse");
    assert_eq!(first, second);

    let a: Count = PropertyInjector::new(&first).bind().expect("first bind");
    let b: Count = PropertyInjector::new(&second).bind().expect("second bind");
    assert_eq!(a, b);
}

#[test]
fn unknown_command_is_reported() {
    let config = catalog();
    let err = Parser::new(&config).parse("frobnicate").unwrap_err();
    assert!(matches!(err, Error::UnknownCommand(ref w) if w == "frobnicate"));
}

#[test]
fn catalog_is_shareable_across_threads() {
    let config = std::sync::Arc::new(catalog());
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let config = config.clone();
            std::thread::spawn(move || {
                let text = format!("count -n {}", i);
                let result = Parser::new(&config).parse(&text).expect("parse");
                PropertyInjector::new(&result).bind::<Count>().expect("bind").num
            })
        })
        .collect();

    let nums: Vec<i64> = handles.into_iter().map(|h| h.join().expect("join")).collect();
    assert_eq!(nums, vec![0, 1, 2, 3]);
}
