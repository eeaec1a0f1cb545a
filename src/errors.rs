//! General error types for the scanner and parser

use std::fmt::{Display, Formatter};

use crate::coords::Coords;
use crate::lexer::Token;

/// Global result type used throughout the parser stages
pub type ParserResult<T> = Result<T, Error>;

/// Enumeration of the various different parser stages that can produce an error
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Stage {
    /// The lexer stage, converting text into tokens
    Lexer,
    /// The parsing stage, converting tokens into a [crate::JsonValue]
    Parser,
}

impl Display for Stage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::Lexer => write!(f, "lexer"),
            Stage::Parser => write!(f, "parser"),
        }
    }
}

/// A global enumeration of error details
#[derive(Debug, Clone, PartialEq)]
pub enum Details {
    /// The input ended before a closing quote was found
    UnterminatedString,
    /// A character which doesn't start any valid token
    UnexpectedCharacter(char),
    /// A value was expected but the token sequence was exhausted
    EndOfInput,
    /// A structural token was found where a value was expected
    UnexpectedToken(Token),
    /// Object keys must be strings
    ExpectedStringKey(Token),
    /// Object keys must be followed by a colon
    ExpectedColon(Option<Token>),
    /// A pair must be followed by either a comma or a closing brace
    ExpectedCommaAfterPair(Token),
    /// The token sequence ended inside an object
    UnterminatedObject,
    /// An array element must be followed by either a comma or a closing bracket
    ExpectedCommaAfterElement(Token),
    /// The token sequence ended inside an array
    UnterminatedArray,
    /// Root array mode is enabled, and the first token isn't `[`
    RootMustBeArray,
    /// Nesting went deeper than the configured limit
    MaxDepthExceeded(usize),
    /// Tokens remain after a complete root value
    TrailingTokens(Token),
}

impl Display for Details {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Details::UnterminatedString => write!(f, "unterminated string"),
            Details::UnexpectedCharacter(c) => write!(f, "unexpected character: {:?}", c),
            Details::EndOfInput => write!(f, "unexpected end of input"),
            Details::UnexpectedToken(t) => write!(f, "unexpected token: {}", t),
            Details::ExpectedStringKey(t) => write!(f, "expected string key, found {}", t),
            Details::ExpectedColon(Some(t)) => {
                write!(f, "expected colon after key in object, found {}", t)
            }
            Details::ExpectedColon(None) => {
                write!(f, "expected colon after key in object, found end of input")
            }
            Details::ExpectedCommaAfterPair(t) => {
                write!(f, "expected comma after pair in object, found {}", t)
            }
            Details::UnterminatedObject => write!(f, "expected end-of-object bracket"),
            Details::ExpectedCommaAfterElement(t) => {
                write!(f, "expected comma after element in array, found {}", t)
            }
            Details::UnterminatedArray => write!(f, "expected end-of-array bracket"),
            Details::RootMustBeArray => write!(f, "root must be an array"),
            Details::MaxDepthExceeded(limit) => {
                write!(f, "max nesting depth exceeded (limit {})", limit)
            }
            Details::TrailingTokens(t) => write!(f, "unexpected trailing token: {}", t),
        }
    }
}

/// The general error structure
#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    /// The originating stage for the error
    pub stage: Stage,
    /// The global error code for the error
    pub details: Details,
    /// Optional parser coordinates
    pub coords: Option<Coords>,
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.coords {
            Some(coords) => write!(f, "{} error: {} at {}", self.stage, self.details, coords),
            None => write!(f, "{} error: {}", self.stage, self.details),
        }
    }
}

impl std::error::Error for Error {}

macro_rules! lexer_error {
    ($details: expr, $coords : expr) => {{
        let err = $crate::errors::Error {
            stage: $crate::errors::Stage::Lexer,
            details: $details,
            coords: Some($coords),
        };
        ::tracing::debug!(%err, "scan failed");
        Err(err)
    }};
}
pub(crate) use lexer_error;

macro_rules! parser_error {
    ($details: expr, $coords: expr) => {{
        let err = $crate::errors::Error {
            stage: $crate::errors::Stage::Parser,
            details: $details,
            coords: Some($coords),
        };
        ::tracing::debug!(%err, "parse failed");
        Err(err)
    }};
    ($details: expr) => {{
        let err = $crate::errors::Error {
            stage: $crate::errors::Stage::Parser,
            details: $details,
            coords: None,
        };
        ::tracing::debug!(%err, "parse failed");
        Err(err)
    }};
}
pub(crate) use parser_error;

#[cfg(test)]
mod tests {
    use crate::coords::Coords;
    use crate::errors::{lexer_error, parser_error, Details, Error, ParserResult, Stage};
    use crate::lexer::Token;

    #[test]
    fn should_render_stage_details_and_coords() {
        let err = Error {
            stage: Stage::Parser,
            details: Details::ExpectedStringKey(Token::Num(1.0)),
            coords: Some(Coords::default()),
        };
        assert_eq!(
            err.to_string(),
            "parser error: expected string key, found 1 at [abs: 0, line: 1, column: 1]"
        );
    }

    #[test]
    fn should_render_without_coords() {
        let err = Error {
            stage: Stage::Lexer,
            details: Details::UnterminatedString,
            coords: None,
        };
        assert_eq!(err.to_string(), "lexer error: unterminated string");
    }

    #[test]
    fn should_build_errors_from_macros() {
        let coords = Coords {
            absolute: 4,
            line: 1,
            column: 5,
        };
        let lexed: ParserResult<()> = lexer_error!(Details::UnexpectedCharacter('x'), coords);
        let err = lexed.unwrap_err();
        assert_eq!(err.stage, Stage::Lexer);
        assert_eq!(err.coords, Some(coords));

        let parsed: ParserResult<()> = parser_error!(Details::EndOfInput);
        assert_eq!(
            parsed,
            Err(Error {
                stage: Stage::Parser,
                details: Details::EndOfInput,
                coords: None,
            })
        );
    }
}
