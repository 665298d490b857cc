//! Splits command-line input into option and value tokens.
//!
//! The lexer never re-splits tokens it is handed: an argv list keeps its
//! boundaries exactly, and raw text is split on whitespace with no quoting.

use std::slice;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    LongOption,
    ShortOption,
    Value,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
}

impl Token {
    pub fn classify(raw: &str) -> Self {
        let kind = if raw.starts_with("--") {
            TokenKind::LongOption
        } else if raw.starts_with('-') && raw.len() > 1 {
            TokenKind::ShortOption
        } else {
            TokenKind::Value
        };

        Self {
            kind,
            text: raw.to_string(),
        }
    }

    pub fn is_option(&self) -> bool {
        self.kind != TokenKind::Value
    }

    /// Option name without its leading dashes; `None` for value tokens.
    pub fn option_name(&self) -> Option<&str> {
        match self.kind {
            TokenKind::LongOption => Some(&self.text[2..]),
            TokenKind::ShortOption => Some(&self.text[1..]),
            TokenKind::Value => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Lexer {
    args: Vec<String>,
}

impl Lexer {
    pub fn new(text: &str) -> Self {
        Self {
            args: text.split_whitespace().map(String::from).collect(),
        }
    }

    pub fn from_args<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Starts a fresh pass over the input. Each call begins at the first token.
    pub fn tokens(&self) -> Tokens<'_> {
        Tokens {
            args: self.args.iter(),
        }
    }
}

pub struct Tokens<'a> {
    args: slice::Iter<'a, String>,
}

impl Iterator for Tokens<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        self.args.next().map(|arg| Token::classify(arg))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.args.size_hint()
    }
}

impl ExactSizeIterator for Tokens<'_> {}

#[cfg(test)]
mod tests {
    use super::{Lexer, Token, TokenKind};

    fn kinds(lexer: &Lexer) -> Vec<TokenKind> {
        lexer.tokens().map(|t| t.kind).collect()
    }

    #[test]
    fn classifies_long_short_and_values() {
        let lexer = Lexer::new("log --oneline -n 5 HEAD");
        assert_eq!(
            kinds(&lexer),
            vec![
                TokenKind::Value,
                TokenKind::LongOption,
                TokenKind::ShortOption,
                TokenKind::Value,
                TokenKind::Value,
            ]
        );
    }

    #[test]
    fn bare_dash_is_a_value() {
        let token = Token::classify("-");
        assert_eq!(token.kind, TokenKind::Value);
        assert_eq!(token.option_name(), None);
    }

    #[test]
    fn option_name_strips_dashes() {
        assert_eq!(Token::classify("--max-count").option_name(), Some("max-count"));
        assert_eq!(Token::classify("-n").option_name(), Some("n"));
        assert_eq!(Token::classify("--").option_name(), Some(""));
    }

    #[test]
    fn argv_tokens_are_not_resplit() {
        let lexer = Lexer::from_args(["commit", "-m", "two words"]);
        let texts: Vec<String> = lexer.tokens().map(|t| t.text).collect();
        assert_eq!(texts, vec!["commit", "-m", "two words"]);
    }

    #[test]
    fn tokens_restart_from_the_beginning() {
        let lexer = Lexer::new("a b c");
        let mut first = lexer.tokens();
        first.next();
        first.next();
        let second: Vec<Token> = lexer.tokens().collect();
        assert_eq!(second.len(), 3);
        assert_eq!(second[0].text, "a");
    }

    #[test]
    fn whitespace_only_text_has_no_tokens() {
        assert_eq!(Lexer::new("  \t ").tokens().count(), 0);
    }
}
