use std::slice;
use tracing::{debug, trace};

use crate::config::ParserConfiguration;
use crate::error::{Error, FieldError, Result};
use crate::lexer::{Lexer, Token, TokenKind};
use crate::mapper::CommandMapper;
use crate::result::{ParseResult, FLAG_PRESENT};
use crate::schema::{CommandDefinition, NamedParameter};

/// Drives one invocation through the lexer, the command mapper and the
/// parameter matcher.
pub struct Parser<'c> {
    configuration: &'c ParserConfiguration,
}

impl<'c> Parser<'c> {
    pub fn new(configuration: &'c ParserConfiguration) -> Self {
        Self { configuration }
    }

    pub fn parse(&self, text: &str) -> Result<ParseResult<'c>> {
        self.parse_lexer(&Lexer::new(text))
    }

    pub fn parse_args<I, S>(&self, args: I) -> Result<ParseResult<'c>>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.parse_lexer(&Lexer::from_args(args))
    }

    pub fn parse_lexer(&self, lexer: &Lexer) -> Result<ParseResult<'c>> {
        let tokens: Vec<Token> = lexer.tokens().collect();
        let (command, rest) = CommandMapper::new(self.configuration.commands()).resolve(&tokens)?;
        ParserContext::new(command).run(rest)
    }
}

/// Per-invocation matching state for a resolved command.
struct ParserContext<'c> {
    command: &'c CommandDefinition,
    result: ParseResult<'c>,
    // Index of the positional slot the next value token fills
    slot: usize,
    // A list slot has taken at least one value and is still absorbing
    list_open: bool,
}

impl<'c> ParserContext<'c> {
    fn new(command: &'c CommandDefinition) -> Self {
        Self {
            command,
            result: ParseResult::new(command),
            slot: 0,
            list_open: false,
        }
    }

    fn run(mut self, tokens: &[Token]) -> Result<ParseResult<'c>> {
        let mut tokens = tokens.iter();
        while let Some(token) = tokens.next() {
            trace!(kind = ?token.kind, text = %token.text, "token");
            if token.is_option() {
                self.take_option(token, &mut tokens)?;
            } else {
                self.take_value(token)?;
            }
        }
        self.finish()
    }

    fn take_option(&mut self, token: &Token, rest: &mut slice::Iter<'_, Token>) -> Result<()> {
        let command = self.command;
        let name = token.option_name().unwrap_or_default();
        let found: Option<&'c NamedParameter> = match token.kind {
            TokenKind::LongOption => command.find_long(name),
            _ => command.find_short(name),
        };
        let param = found.ok_or_else(|| Error::UnknownOption {
            command: command.name.clone(),
            option: token.text.clone(),
        })?;

        if self.list_open {
            debug!(command = %self.command.name, option = %token.text, "option closes positional list");
            self.list_open = false;
            self.slot += 1;
        }

        if param.is_bool {
            self.result.add_named(param, FLAG_PRESENT);
            return Ok(());
        }

        let value = rest.next()
            .ok_or_else(|| Error::MissingOptionValue(token.text.clone()))?;
        self.result.add_named(param, value.text.clone());
        Ok(())
    }

    fn take_value(&mut self, token: &Token) -> Result<()> {
        let command = self.command;
        let param = command.positional.get(self.slot)
            .ok_or_else(|| Error::UnexpectedArgument(token.text.clone()))?;

        self.result.add_positional(param, token.text.clone());
        if param.is_list() {
            self.list_open = true;
        } else {
            self.slot += 1;
        }
        Ok(())
    }

    /// Reports every missing required parameter at once: a single one as
    /// `MissingRequiredParameter`, several as `Binding`.
    fn finish(mut self) -> Result<ParseResult<'c>> {
        let command = self.command;
        let mut missing: Vec<FieldError> = command.named.iter()
            .filter(|p| p.is_required && !self.result.has_named(&p.property))
            .map(|p| FieldError::MissingRequiredParameter(p.property.clone()))
            .collect();

        for param in &command.positional {
            if self.result.positional_values(&param.property).is_some() {
                continue;
            }
            // A required list with no values counts as missing
            if param.is_required {
                missing.push(FieldError::MissingRequiredParameter(param.property.clone()));
            } else if param.is_list() {
                self.result.add_empty_positional(param);
            }
        }

        if missing.len() == 1 {
            return Err(missing.remove(0).into());
        }
        if !missing.is_empty() {
            debug!(command = %command.name, missing = missing.len(), "required parameters missing");
            return Err(Error::Binding(missing));
        }

        debug!(
            command = %command.name,
            named = self.result.named.len(),
            positional = self.result.positional.len(),
            "matched parameters"
        );
        Ok(self.result)
    }
}
