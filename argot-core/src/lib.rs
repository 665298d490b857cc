//! Parsing and binding engine for git-style multi-command tools.
//!
//! ```text
//! raw args -> Lexer -> CommandMapper -> Parser -> ParseResult -> PropertyInjector -> target
//! ```

mod error;
mod config;
mod injector;
mod manifest;
mod mapper;
mod parser;
mod result;
pub mod lexer;
pub mod schema;

pub use error::{Error, FieldError, Result};
pub use config::ParserConfiguration;
pub use injector::PropertyInjector;
pub use manifest::{CatalogManifest, CommandEntry, EntryType, NamedEntry, PositionalEntry};
pub use mapper::CommandMapper;
pub use parser::Parser;
pub use result::{NamedParameterResult, ParseResult, PositionalParameterResult, FLAG_PRESENT};
pub use lexer::{Lexer, Token, TokenKind};
pub use schema::{
    CommandDefinition, Converter, Multiplicity, NamedParameter, PositionalParameter, ValueKind,
};

/// Commonly used types for defining and running commands
pub mod prelude {
    pub use crate::{
        CommandDefinition,
        Converter,
        Error,
        NamedParameter,
        Parser,
        ParserConfiguration,
        PositionalParameter,
        PropertyInjector,
        Result,
    };
}
