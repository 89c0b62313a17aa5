//! Literal structure parser for aggregator result records
//!
//! The aggregator serializes each heterogeneous query result as a literal
//! expression rather than a well-defined serialization format. This module
//! is a deliberate replacement for a general-purpose literal evaluator: it
//! parses exactly the subset observed in aggregator output and nothing more.
//!
//! Supported syntax (v1):
//! - double- or single-quoted strings with backslash escapes
//! - nested `{...}` mappings with quoted string keys
//! - `[...]` lists
//! - booleans as `true`/`false` or `True`/`False`
//! - null as `null` or `None`
//! - integer and decimal numbers
//!
//! Output is a [`serde_json::Value`] so downstream decoding stays on serde.

use crate::error::{Error, Result};
use serde_json::{Map, Number, Value};

/// Parses a complete literal mapping expression
///
/// The entire input must be consumed; trailing content is an error.
pub fn parse_mapping(input: &str) -> Result<Value> {
    let mut parser = Parser::new(input);
    parser.skip_whitespace();

    let value = match parser.peek() {
        Some('{') => parser.parse_value()?,
        _ => return Err(parser.error("expected mapping")),
    };

    parser.skip_whitespace();
    if parser.peek().is_some() {
        return Err(parser.error("trailing content after mapping"));
    }

    Ok(value)
}

struct Parser {
    chars: Vec<char>,
    pos: usize,
}

impl Parser {
    fn new(input: &str) -> Self {
        Self {
            chars: input.chars().collect(),
            pos: 0,
        }
    }

    fn error(&self, message: &str) -> Error {
        Error::MalformedRecord(format!("{} at offset {}", message, self.pos))
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek();
        if c.is_some() {
            self.pos += 1;
        }
        c
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_whitespace()) {
            self.pos += 1;
        }
    }

    fn expect(&mut self, expected: char) -> Result<()> {
        match self.advance() {
            Some(c) if c == expected => Ok(()),
            _ => Err(self.error(&format!("expected '{}'", expected))),
        }
    }

    fn parse_value(&mut self) -> Result<Value> {
        self.skip_whitespace();

        match self.peek() {
            Some('{') => self.parse_map(),
            Some('[') => self.parse_list(),
            Some('"') | Some('\'') => self.parse_string().map(Value::String),
            Some(c) if c == '-' || c.is_ascii_digit() => self.parse_number(),
            Some(c) if c.is_ascii_alphabetic() => self.parse_keyword(),
            _ => Err(self.error("expected value")),
        }
    }

    fn parse_map(&mut self) -> Result<Value> {
        self.expect('{')?;
        let mut map = Map::new();

        self.skip_whitespace();
        if self.peek() == Some('}') {
            self.advance();
            return Ok(Value::Object(map));
        }

        loop {
            self.skip_whitespace();
            let key = match self.peek() {
                Some('"') | Some('\'') => self.parse_string()?,
                _ => return Err(self.error("expected quoted mapping key")),
            };

            self.skip_whitespace();
            self.expect(':')?;

            let value = self.parse_value()?;
            map.insert(key, value);

            self.skip_whitespace();
            match self.advance() {
                Some(',') => continue,
                Some('}') => break,
                _ => return Err(self.error("expected ',' or '}' in mapping")),
            }
        }

        Ok(Value::Object(map))
    }

    fn parse_list(&mut self) -> Result<Value> {
        self.expect('[')?;
        let mut items = Vec::new();

        self.skip_whitespace();
        if self.peek() == Some(']') {
            self.advance();
            return Ok(Value::Array(items));
        }

        loop {
            items.push(self.parse_value()?);

            self.skip_whitespace();
            match self.advance() {
                Some(',') => continue,
                Some(']') => break,
                _ => return Err(self.error("expected ',' or ']' in list")),
            }
        }

        Ok(Value::Array(items))
    }

    fn parse_string(&mut self) -> Result<String> {
        let quote = self
            .advance()
            .ok_or_else(|| self.error("expected string"))?;

        let mut out = String::new();

        loop {
            match self.advance() {
                None => return Err(self.error("unterminated string")),
                Some(c) if c == quote => break,
                Some('\\') => match self.advance() {
                    None => return Err(self.error("unterminated escape")),
                    Some('n') => out.push('\n'),
                    Some('t') => out.push('\t'),
                    Some('r') => out.push('\r'),
                    // Pass any other escaped character through verbatim,
                    // which covers \\, \", \' and \/.
                    Some(c) => out.push(c),
                },
                Some(c) => out.push(c),
            }
        }

        Ok(out)
    }

    fn parse_number(&mut self) -> Result<Value> {
        let start = self.pos;

        if self.peek() == Some('-') {
            self.advance();
        }
        while matches!(self.peek(), Some(c) if c.is_ascii_digit() || c == '.' || c == 'e' || c == 'E' || c == '+' || c == '-')
        {
            self.advance();
        }

        let text: String = self.chars[start..self.pos].iter().collect();

        if let Ok(n) = text.parse::<i64>() {
            return Ok(Value::Number(Number::from(n)));
        }

        match text.parse::<f64>().ok().and_then(Number::from_f64) {
            Some(n) => Ok(Value::Number(n)),
            None => Err(self.error("invalid number")),
        }
    }

    fn parse_keyword(&mut self) -> Result<Value> {
        let start = self.pos;
        while matches!(self.peek(), Some(c) if c.is_ascii_alphabetic()) {
            self.advance();
        }

        let word: String = self.chars[start..self.pos].iter().collect();

        match word.as_str() {
            "true" | "True" => Ok(Value::Bool(true)),
            "false" | "False" => Ok(Value::Bool(false)),
            "null" | "None" => Ok(Value::Null),
            _ => Err(self.error(&format!("unknown keyword '{}'", word))),
        }
    }
}
