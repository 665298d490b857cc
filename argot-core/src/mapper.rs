use tracing::debug;

use crate::error::{Error, Result};
use crate::lexer::{Token, TokenKind};
use crate::schema::CommandDefinition;

/// Resolves the leading value tokens of an invocation to a registered command.
pub struct CommandMapper<'c> {
    commands: &'c [CommandDefinition],
}

impl<'c> CommandMapper<'c> {
    pub fn new(commands: &'c [CommandDefinition]) -> Self {
        Self { commands }
    }

    /// Longest match wins; among equally long matches the first registered
    /// command is kept. Returns the command and the tokens after its name.
    pub fn resolve<'t>(&self, tokens: &'t [Token]) -> Result<(&'c CommandDefinition, &'t [Token])> {
        let leading: Vec<&str> = tokens.iter()
            .take_while(|t| t.kind == TokenKind::Value)
            .map(|t| t.text.as_str())
            .collect();

        let mut best: Option<(&'c CommandDefinition, usize)> = None;
        for command in self.commands {
            let words = command.words();
            if words.is_empty() || words.len() > leading.len() || words[..] != leading[..words.len()] {
                continue;
            }
            if best.map_or(true, |(_, len)| words.len() > len) {
                best = Some((command, words.len()));
            }
        }

        match best {
            Some((command, len)) => {
                debug!(command = %command.name, consumed = len, "resolved command");
                Ok((command, &tokens[len..]))
            }
            // Input that opens with an option has no command words to report
            None if leading.is_empty() => Err(Error::UnknownCommand(
                tokens.first().map(|t| t.text.clone()).unwrap_or_default(),
            )),
            None => Err(Error::UnknownCommand(leading.join(" "))),
        }
    }

    /// Distinct next command words that extend `words` and start with `partial`.
    pub fn complete(&self, words: &[&str], partial: &str) -> Vec<String> {
        let mut candidates: Vec<String> = self.commands.iter()
            .filter_map(|command| {
                let name = command.words();
                if name.len() <= words.len() || name[..words.len()] != words[..] {
                    return None;
                }
                let next = name[words.len()];
                next.starts_with(partial).then(|| next.to_string())
            })
            .collect();

        candidates.sort();
        candidates.dedup();
        candidates
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Lexer;

    fn catalog() -> Vec<CommandDefinition> {
        vec![
            CommandDefinition::new("bisect"),
            CommandDefinition::new("bisect start"),
            CommandDefinition::new("bisect reset"),
            CommandDefinition::new("log"),
        ]
    }

    fn tokens(text: &str) -> Vec<Token> {
        Lexer::new(text).tokens().collect()
    }

    #[test]
    fn longest_match_wins() {
        let commands = catalog();
        let input = tokens("bisect start x");
        let (command, rest) = CommandMapper::new(&commands).resolve(&input).expect("resolve");
        assert_eq!(command.name, "bisect start");
        assert_eq!(rest.len(), 1);
        assert_eq!(rest[0].text, "x");
    }

    #[test]
    fn single_word_fallback() {
        let commands = catalog();
        let input = tokens("bisect bad");
        let (command, rest) = CommandMapper::new(&commands).resolve(&input).expect("resolve");
        assert_eq!(command.name, "bisect");
        assert_eq!(rest[0].text, "bad");
    }

    #[test]
    fn options_stop_the_command_name() {
        let commands = catalog();
        let input = tokens("bisect --start");
        let (command, rest) = CommandMapper::new(&commands).resolve(&input).expect("resolve");
        assert_eq!(command.name, "bisect");
        assert_eq!(rest[0].kind, TokenKind::LongOption);
    }

    #[test]
    fn first_registered_wins_a_tie() {
        let commands = vec![
            CommandDefinition::new("show").summary("first"),
            CommandDefinition::new("show").summary("second"),
        ];
        let input = tokens("show");
        let (command, _) = CommandMapper::new(&commands).resolve(&input).expect("resolve");
        assert_eq!(command.summary, "first");
    }

    #[test]
    fn unknown_command_reports_leading_words() {
        let commands = catalog();
        let input = tokens("frobnicate now --x");
        let err = CommandMapper::new(&commands).resolve(&input).unwrap_err();
        assert!(matches!(err, Error::UnknownCommand(ref words) if words == "frobnicate now"));
    }

    #[test]
    fn leading_option_is_reported_as_the_command() {
        let commands = catalog();
        let input = tokens("--x log");
        let err = CommandMapper::new(&commands).resolve(&input).unwrap_err();
        assert!(matches!(err, Error::UnknownCommand(ref words) if words == "--x"));
        assert_eq!(err.to_string(), "Unknown command: '--x'");
    }

    #[test]
    fn empty_input_is_unknown() {
        let commands = catalog();
        let err = CommandMapper::new(&commands).resolve(&[]).unwrap_err();
        assert!(matches!(err, Error::UnknownCommand(_)));
    }

    #[test]
    fn completes_next_word() {
        let commands = catalog();
        let mapper = CommandMapper::new(&commands);
        assert_eq!(mapper.complete(&["bisect"], ""), vec!["reset", "start"]);
        assert_eq!(mapper.complete(&["bisect"], "st"), vec!["start"]);
        assert_eq!(mapper.complete(&[], "b"), vec!["bisect"]);
        assert!(mapper.complete(&["log"], "").is_empty());
    }
}
