//! The lexer converts a fully resident input into a flat sequence of [PackedToken]s.
//!
//! At each position the recognisers are tried in a fixed order, and the first one to match wins:
//! strings, numbers, `true`/`false`, `null`, whitespace (discarded) and finally the six structural
//! symbols. Anything else is an error.
//!
//! Strings are captured verbatim: there is no escape processing, so a backslash has no special
//! meaning and the first double quote always terminates the string.
use std::fmt::{Display, Formatter};
use std::io::BufReader;

use tracing::{debug, trace};

use crate::coords::Span;
use crate::decoders::{DecoderSelector, Encoding};
use crate::errors::{lexer_error, Details, ParserResult};
use crate::scanner::Scanner;

/// Literal character sequence forming a 'null' token
const NULL_SEQUENCE: &str = "null";
/// Literal character sequence forming a 'true' token
const TRUE_SEQUENCE: &str = "true";
/// Literal character sequence forming a 'false' token
const FALSE_SEQUENCE: &str = "false";

/// Default capacity for the numeric buffer
const DEFAULT_BUFFER_CAPACITY: usize = 64;

/// Enumeration of valid tokens
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// `{`
    StartObject,
    /// `}`
    EndObject,
    /// `[`
    StartArray,
    /// `]`
    EndArray,
    /// `:`
    Colon,
    /// `,`
    Comma,
    /// Raw string contents, without the surrounding quotes
    Str(String),
    /// A decoded number
    Num(f64),
    /// `true` or `false`
    Bool(bool),
    /// `null`
    Null,
}

impl Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::StartObject => write!(f, "{{"),
            Token::EndObject => write!(f, "}}"),
            Token::StartArray => write!(f, "["),
            Token::EndArray => write!(f, "]"),
            Token::Colon => write!(f, ":"),
            Token::Comma => write!(f, ","),
            Token::Str(value) => write!(f, "\"{}\"", value),
            Token::Num(value) => write!(f, "{}", value),
            Token::Bool(value) => write!(f, "{}", value),
            Token::Null => write!(f, "null"),
        }
    }
}

/// A packed token consists of a [Token] and the [Span] associated with it
pub type PackedToken = (Token, Span);

/// Convenience macro for packing tokens along with their positional information
macro_rules! packed_token {
    ($t:expr, $s:expr, $e:expr) => {
        ($t, Span { start: $s, end: $e })
    };
    ($t:expr, $s:expr) => {
        ($t, Span { start: $s, end: $s })
    };
}

/// Controls how the `true`, `false` and `null` keywords are recognised
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum KeywordMatching {
    /// The keyword must not be immediately followed by an identifier character, so `nullable`
    /// is rejected outright
    #[default]
    Bounded,
    /// Any input starting with the keyword matches, so `nullable` lexes as `null` followed by
    /// whatever `able` produces
    Prefix,
}

/// A lexer which pulls characters from a [Scanner] and produces [PackedToken]s
pub struct Lexer {
    /// The underlying character source
    scanner: Scanner,
    /// How keywords are matched
    keywords: KeywordMatching,
    /// Buffer used to collect numeric runs
    buffer: String,
}

impl Lexer {
    /// Create a new lexer. The supplied characters are buffered in their entirety.
    pub fn new(chars: &mut impl Iterator<Item = char>) -> Self {
        Lexer {
            scanner: Scanner::new(chars),
            keywords: KeywordMatching::default(),
            buffer: String::with_capacity(DEFAULT_BUFFER_CAPACITY),
        }
    }

    /// Switch the keyword matching behaviour
    pub fn with_keyword_matching(mut self, keywords: KeywordMatching) -> Self {
        self.keywords = keywords;
        self
    }

    /// Drain the lexer, producing all remaining tokens in document order
    pub fn tokens(mut self) -> ParserResult<Vec<PackedToken>> {
        debug!(chars = self.scanner.len(), keywords = ?self.keywords, "scanning input");
        let mut tokens = vec![];
        while let Some(packed) = self.consume()? {
            tokens.push(packed);
        }
        debug_assert!(self.scanner.is_exhausted());
        debug!(tokens = tokens.len(), "scan complete");
        Ok(tokens)
    }

    /// Consume the next token from the input. Returns [None] once the input is exhausted,
    /// including when only whitespace remains.
    pub fn consume(&mut self) -> ParserResult<Option<PackedToken>> {
        while let Some(c) = self.scanner.lookahead(1) {
            if c == '"' {
                return self.match_string().map(|packed| Some(self.trace(packed)));
            }

            if is_numeric(c) {
                if let Some(packed) = self.match_number() {
                    return Ok(Some(self.trace(packed)));
                }
            }

            if let Some(packed) = self
                .match_keyword(TRUE_SEQUENCE, Token::Bool(true))
                .or_else(|| self.match_keyword(FALSE_SEQUENCE, Token::Bool(false)))
                .or_else(|| self.match_keyword(NULL_SEQUENCE, Token::Null))
            {
                return Ok(Some(self.trace(packed)));
            }

            let token = match c {
                ' ' | '\t' | '\u{8}' | '\n' | '\r' => {
                    self.scanner.discard(1);
                    continue;
                }
                '{' => Token::StartObject,
                '}' => Token::EndObject,
                '[' => Token::StartArray,
                ']' => Token::EndArray,
                ':' => Token::Colon,
                ',' => Token::Comma,
                _ => return lexer_error!(Details::UnexpectedCharacter(c), self.scanner.coords()),
            };
            let coords = self.scanner.discard(1);
            return Ok(Some(self.trace(packed_token!(token, coords))));
        }
        Ok(None)
    }

    fn trace(&self, packed: PackedToken) -> PackedToken {
        trace!(token = %packed.0, span = %packed.1, "matched token");
        packed
    }

    /// Consume everything up to and including the next double quote. The quotes are not part
    /// of the resulting token.
    fn match_string(&mut self) -> ParserResult<PackedToken> {
        let start = self.scanner.coords();
        self.scanner.discard(1);
        let mut value = String::new();
        loop {
            match self.scanner.consume() {
                Some(('"', end)) => return Ok(packed_token!(Token::Str(value), start, end)),
                Some((c, _)) => value.push(c),
                None => return lexer_error!(Details::UnterminatedString, start),
            }
        }
    }

    /// Greedily consume a run of numeric characters and validate it. If the run isn't a valid
    /// number, the scanner is reset and nothing is consumed.
    fn match_number(&mut self) -> Option<PackedToken> {
        let mark = self.scanner.mark();
        let start = self.scanner.coords();
        let mut end = start;
        self.buffer.clear();
        while let Some(c) = self.scanner.lookahead(1) {
            if !is_numeric(c) {
                break;
            }
            end = self.scanner.discard(1);
            self.buffer.push(c);
        }

        if is_valid_number(&self.buffer) {
            if let Ok(value) = fast_float::parse::<f64, _>(self.buffer.as_bytes()) {
                return Some(packed_token!(Token::Num(value), start, end));
            }
        }
        self.scanner.reset(mark);
        None
    }

    /// Attempt to match a keyword at the current position, producing the given token
    fn match_keyword(&mut self, keyword: &str, token: Token) -> Option<PackedToken> {
        if !self.scanner.starts_with(keyword) {
            return None;
        }
        let len = keyword.chars().count();
        if self.keywords == KeywordMatching::Bounded {
            if let Some(next) = self.scanner.lookahead(len + 1) {
                if next.is_alphanumeric() || next == '_' {
                    return None;
                }
            }
        }
        let start = self.scanner.coords();
        let end = self.scanner.discard(len);
        Some(packed_token!(token, start, end))
    }
}

/// Characters which may appear within a numeric run
#[inline]
fn is_numeric(c: char) -> bool {
    c.is_ascii_digit() || c == '-' || c == '.' || c == 'e'
}

/// Check a numeric run against `-?D+(.D+)?(e[+-]?D+)?`
fn is_valid_number(text: &str) -> bool {
    let bytes = text.as_bytes();
    let digits = |from: usize| bytes[from..].iter().take_while(|b| b.is_ascii_digit()).count();

    let mut index = 0;
    if bytes.first() == Some(&b'-') {
        index += 1;
    }

    let count = digits(index);
    if count == 0 {
        return false;
    }
    index += count;

    if bytes.get(index) == Some(&b'.') {
        index += 1;
        let count = digits(index);
        if count == 0 {
            return false;
        }
        index += count;
    }

    if bytes.get(index) == Some(&b'e') {
        index += 1;
        if matches!(bytes.get(index), Some(b'+') | Some(b'-')) {
            index += 1;
        }
        let count = digits(index);
        if count == 0 {
            return false;
        }
        index += count;
    }

    index == bytes.len()
}

/// Scan a complete input string into a sequence of tokens
pub fn scan(text: &str) -> ParserResult<Vec<PackedToken>> {
    Lexer::new(&mut text.chars()).tokens()
}

/// Decode a byte slice using the given [Encoding], and then scan it into a sequence of tokens
pub fn scan_bytes(bytes: &[u8], encoding: Encoding) -> ParserResult<Vec<PackedToken>> {
    let decoders = DecoderSelector::default();
    let mut reader = BufReader::new(bytes);
    let mut chars = decoders.new_decoder(&mut reader, encoding);
    Lexer::new(&mut chars).tokens()
}
