//! Recursive descent parser, turning a sequence of [PackedToken]s into a [JsonValue].
//!
//! The parser never mutates the token sequence: it reads through a [TokenCursor], and hands back
//! whatever the cursor didn't consume alongside the parsed value. Each nested container costs one
//! level of recursion, which is bounded by [Parser::with_max_depth].
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::io::BufReader;

use tracing::{debug, trace};

use crate::coords::{Coords, Span};
use crate::decoders::{DecoderSelector, Encoding};
use crate::errors::{parser_error, Details, ParserResult};
use crate::lexer::{KeywordMatching, Lexer, PackedToken, Token};
use crate::JsonValue;

/// Default limit on the nesting depth of containers
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// A read cursor over an immutable slice of tokens
#[derive(Debug, Clone)]
pub struct TokenCursor<'t> {
    tokens: &'t [PackedToken],
    position: usize,
}

impl<'t> TokenCursor<'t> {
    /// Create a new cursor, positioned at the first token
    pub fn new(tokens: &'t [PackedToken]) -> Self {
        TokenCursor {
            tokens,
            position: 0,
        }
    }

    /// Look at the next token without consuming it
    pub fn peek(&self) -> Option<&'t PackedToken> {
        self.tokens.get(self.position)
    }

    /// The number of tokens consumed so far
    pub fn position(&self) -> usize {
        self.position
    }

    /// The tokens which haven't been consumed yet
    pub fn remaining(&self) -> &'t [PackedToken] {
        &self.tokens[self.position..]
    }

    /// Coordinates used when reporting errors at the end of the sequence: the end of the last
    /// token, if there is one
    pub fn end_coords(&self) -> Coords {
        self.tokens
            .last()
            .map(|(_, span)| span.end)
            .unwrap_or_default()
    }
}

impl<'t> Iterator for TokenCursor<'t> {
    type Item = &'t PackedToken;

    fn next(&mut self) -> Option<Self::Item> {
        let packed = self.tokens.get(self.position)?;
        self.position += 1;
        Some(packed)
    }
}

/// Main parser struct, holding the parse options
#[derive(Debug, Copy, Clone)]
pub struct Parser {
    /// Encoding used by [Parser::parse_bytes]
    encoding: Encoding,
    /// Keyword matching used when scanning
    keyword_matching: KeywordMatching,
    /// Whether the root value has to be an array
    require_array_root: bool,
    /// Maximum container nesting depth
    max_depth: usize,
    /// Whether the whole-document methods tolerate tokens after the root value
    allow_trailing_tokens: bool,
}

impl Default for Parser {
    /// Utf-8, bounded keywords, any root value, and no trailing tokens
    fn default() -> Self {
        Self {
            encoding: Encoding::default(),
            keyword_matching: KeywordMatching::default(),
            require_array_root: false,
            max_depth: DEFAULT_MAX_DEPTH,
            allow_trailing_tokens: false,
        }
    }
}

impl Parser {
    /// Set the [Encoding] used to decode byte input
    pub fn with_encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Set how keywords are matched when scanning
    pub fn with_keyword_matching(mut self, keyword_matching: KeywordMatching) -> Self {
        self.keyword_matching = keyword_matching;
        self
    }

    /// Require (or not) that the root value is an array
    pub fn with_array_root(mut self, required: bool) -> Self {
        self.require_array_root = required;
        self
    }

    /// Limit the nesting depth of containers. The root container sits at depth 1.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Allow (or not) tokens after the root value when parsing a whole document
    pub fn with_trailing_tokens(mut self, allowed: bool) -> Self {
        self.allow_trailing_tokens = allowed;
        self
    }

    /// Scan and parse a complete document held in a string slice
    pub fn parse_str(&self, text: &str) -> ParserResult<JsonValue> {
        self.parse(&mut text.chars())
    }

    /// Decode, scan and parse a complete document held in a byte slice
    pub fn parse_bytes(&self, bytes: &[u8]) -> ParserResult<JsonValue> {
        let decoders = DecoderSelector::default();
        let mut reader = BufReader::new(bytes);
        let mut chars = decoders.new_decoder(&mut reader, self.encoding);
        self.parse(&mut chars)
    }

    /// Scan and parse a complete document. Unless trailing tokens are allowed, the root value
    /// must account for every token in the input.
    pub fn parse(&self, chars: &mut impl Iterator<Item = char>) -> ParserResult<JsonValue> {
        let tokens = Lexer::new(chars)
            .with_keyword_matching(self.keyword_matching)
            .tokens()?;
        let (value, remainder) = self.parse_tokens(&tokens)?;
        match remainder.first() {
            Some((token, span)) if !self.allow_trailing_tokens => {
                parser_error!(Details::TrailingTokens(token.clone()), span.start)
            }
            _ => Ok(value),
        }
    }

    /// Parse a single value from the front of a token sequence, returning the value along with
    /// the tokens that weren't consumed
    pub fn parse_tokens<'t>(
        &self,
        tokens: &'t [PackedToken],
    ) -> ParserResult<(JsonValue, &'t [PackedToken])> {
        debug!(
            tokens = tokens.len(),
            require_array_root = self.require_array_root,
            max_depth = self.max_depth,
            "parsing tokens"
        );
        let mut cursor = TokenCursor::new(tokens);
        if self.require_array_root {
            match cursor.peek() {
                Some((Token::StartArray, _)) => (),
                Some((_, span)) => return parser_error!(Details::RootMustBeArray, span.start),
                None => return parser_error!(Details::RootMustBeArray, cursor.end_coords()),
            }
        }
        let value = self.parse_value(&mut cursor, 0)?;
        debug!(
            consumed = cursor.position(),
            remaining = cursor.remaining().len(),
            "parse complete"
        );
        Ok((value, cursor.remaining()))
    }

    fn parse_value(&self, cursor: &mut TokenCursor, depth: usize) -> ParserResult<JsonValue> {
        match cursor.next() {
            Some((Token::StartObject, span)) => {
                let depth = self.descend(depth, span)?;
                self.parse_object(cursor, depth)
            }
            Some((Token::StartArray, span)) => {
                let depth = self.descend(depth, span)?;
                self.parse_array(cursor, depth)
            }
            Some((Token::Str(value), _)) => Ok(JsonValue::String(value.clone())),
            Some((Token::Num(value), _)) => Ok(JsonValue::Number(*value)),
            Some((Token::Bool(value), _)) => Ok(JsonValue::Boolean(*value)),
            Some((Token::Null, _)) => Ok(JsonValue::Null),
            Some((token, span)) => {
                parser_error!(Details::UnexpectedToken(token.clone()), span.start)
            }
            None => parser_error!(Details::EndOfInput, cursor.end_coords()),
        }
    }

    /// Step into a container opened at `span`, checking the depth limit
    fn descend(&self, depth: usize, span: &Span) -> ParserResult<usize> {
        let depth = depth + 1;
        if depth > self.max_depth {
            return parser_error!(Details::MaxDepthExceeded(self.max_depth), span.start);
        }
        trace!(depth, coords = %span.start, "entering container");
        Ok(depth)
    }

    /// An object is a list of comma separated key/value pairs. The cursor is positioned just
    /// after the opening brace.
    fn parse_object(&self, cursor: &mut TokenCursor, depth: usize) -> ParserResult<JsonValue> {
        let mut pairs = vec![];
        let mut positions = HashMap::new();
        if let Some((Token::EndObject, _)) = cursor.peek() {
            cursor.next();
            return Ok(JsonValue::Object(pairs));
        }

        loop {
            let key = match cursor.next() {
                Some((Token::Str(key), _)) => key.clone(),
                Some((token, span)) => {
                    return parser_error!(Details::ExpectedStringKey(token.clone()), span.start)
                }
                None => return parser_error!(Details::UnterminatedObject, cursor.end_coords()),
            };

            match cursor.next() {
                Some((Token::Colon, _)) => (),
                Some((token, span)) => {
                    return parser_error!(Details::ExpectedColon(Some(token.clone())), span.start)
                }
                None => return parser_error!(Details::ExpectedColon(None), cursor.end_coords()),
            }

            let value = self.parse_value(cursor, depth)?;
            insert_pair(&mut pairs, &mut positions, key, value);

            match cursor.next() {
                Some((Token::EndObject, _)) => return Ok(JsonValue::Object(pairs)),
                Some((Token::Comma, _)) => (),
                Some((token, span)) => {
                    return parser_error!(
                        Details::ExpectedCommaAfterPair(token.clone()),
                        span.start
                    )
                }
                None => return parser_error!(Details::UnterminatedObject, cursor.end_coords()),
            }
        }
    }

    /// An array is a list of comma separated values. The cursor is positioned just after the
    /// opening bracket.
    fn parse_array(&self, cursor: &mut TokenCursor, depth: usize) -> ParserResult<JsonValue> {
        let mut values = vec![];
        if let Some((Token::EndArray, _)) = cursor.peek() {
            cursor.next();
            return Ok(JsonValue::Array(values));
        }

        loop {
            if cursor.peek().is_none() {
                return parser_error!(Details::UnterminatedArray, cursor.end_coords());
            }
            values.push(self.parse_value(cursor, depth)?);

            match cursor.next() {
                Some((Token::EndArray, _)) => return Ok(JsonValue::Array(values)),
                Some((Token::Comma, _)) => (),
                Some((token, span)) => {
                    return parser_error!(
                        Details::ExpectedCommaAfterElement(token.clone()),
                        span.start
                    )
                }
                None => return parser_error!(Details::UnterminatedArray, cursor.end_coords()),
            }
        }
    }
}

/// Add a pair to an object. A duplicate key keeps the position of its first occurrence, but
/// takes the latest value. `positions` maps each key to its index within `pairs`.
fn insert_pair(
    pairs: &mut Vec<(String, JsonValue)>,
    positions: &mut HashMap<String, usize>,
    key: String,
    value: JsonValue,
) {
    match positions.entry(key) {
        Entry::Occupied(entry) => pairs[*entry.get()].1 = value,
        Entry::Vacant(entry) => {
            pairs.push((entry.key().clone(), value));
            entry.insert(pairs.len() - 1);
        }
    }
}

/// Parse a single value from the front of a token sequence with the default limits, returning
/// the value along with the tokens that weren't consumed. With `require_array_root` set, the
/// first token has to be `[`.
pub fn parse(
    tokens: &[PackedToken],
    require_array_root: bool,
) -> ParserResult<(JsonValue, &[PackedToken])> {
    Parser::default()
        .with_array_root(require_array_root)
        .parse_tokens(tokens)
}
