//! Literal evaluation for configuration values.
//!
//! Environment variables and instance files carry values as text. This
//! module interprets that text as a typed constant: integers, floats,
//! booleans (`True`/`False`), `None`, quoted strings, lists, tuples and
//! dicts. It is a small hand-written grammar rather than a general
//! expression evaluator, so no code is ever executed while parsing.
//!
//! Text that does not match any literal shape is not an error; callers
//! fall back to the raw string.

use serde_json::{Map, Number, Value};

/// Parses `raw` as a single typed literal.
///
/// Returns `None` when `raw` is not exactly one literal (leading and
/// trailing whitespace is ignored). Tuples parse to arrays and `None`
/// parses to null.
#[must_use]
pub fn parse_literal(raw: &str) -> Option<Value> {
    let mut parser = Parser { rest: raw };
    let value = parser.value()?;
    parser.skip_ws();
    parser.at_end().then_some(value)
}

/// Coerces `raw` into a typed value, keeping the raw string when it is not
/// a recognised literal.
#[must_use]
pub fn coerce(raw: &str) -> Value {
    parse_literal(raw).unwrap_or_else(|| Value::String(raw.to_owned()))
}

struct Parser<'a> {
    rest: &'a str,
}

impl Parser<'_> {
    fn skip_ws(&mut self) {
        self.rest = self.rest.trim_start();
    }

    fn at_end(&self) -> bool {
        self.rest.is_empty()
    }

    fn peek(&self) -> Option<char> {
        self.rest.chars().next()
    }

    fn advance(&mut self, len: usize) {
        self.rest = self.rest.get(len..).unwrap_or("");
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.advance(c.len_utf8());
        Some(c)
    }

    fn eat(&mut self, c: char) -> bool {
        if self.rest.starts_with(c) {
            self.advance(c.len_utf8());
            true
        } else {
            false
        }
    }

    fn value(&mut self) -> Option<Value> {
        self.skip_ws();
        match self.peek()? {
            '[' => self.sequence('[', ']'),
            '(' => self.sequence('(', ')'),
            '{' => self.dict(),
            '"' | '\'' => self.string().map(Value::String),
            '+' | '-' | '.' => self.number(),
            c if c.is_ascii_digit() => self.number(),
            _ => self.keyword(),
        }
    }

    fn keyword(&mut self) -> Option<Value> {
        let words = [
            ("True", Value::Bool(true)),
            ("False", Value::Bool(false)),
            ("None", Value::Null),
        ];
        for (word, value) in words {
            if let Some(rest) = self.rest.strip_prefix(word) {
                let boundary = rest
                    .chars()
                    .next()
                    .is_none_or(|c| !c.is_ascii_alphanumeric() && c != '_');
                if boundary {
                    self.rest = rest;
                    return Some(value);
                }
            }
        }
        None
    }

    fn number(&mut self) -> Option<Value> {
        let end = self
            .rest
            .char_indices()
            .find(|&(_, c)| {
                !(c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E' | '_'))
            })
            .map_or(self.rest.len(), |(idx, _)| idx);
        let (token, rest) = self.rest.split_at(end);
        if token.is_empty() {
            return None;
        }
        self.rest = rest;
        // Python permits underscore digit grouping, e.g. `1_000`.
        let cleaned = token.replace('_', "");
        if let Ok(int) = cleaned.parse::<i64>() {
            return Some(Value::from(int));
        }
        if let Ok(int) = cleaned.parse::<u64>() {
            return Some(Value::from(int));
        }
        let float = cleaned.parse::<f64>().ok()?;
        Number::from_f64(float).map(Value::Number)
    }

    fn string(&mut self) -> Option<String> {
        let quote = self.bump()?;
        let mut out = String::new();
        loop {
            // Running out of input means an unterminated string.
            let c = self.bump()?;
            if c == quote {
                return Some(out);
            }
            if c == '\\' {
                let escaped = self.bump()?;
                out.push(match escaped {
                    'n' => '\n',
                    't' => '\t',
                    'r' => '\r',
                    '0' => '\0',
                    other => other,
                });
            } else {
                out.push(c);
            }
        }
    }

    fn sequence(&mut self, open: char, close: char) -> Option<Value> {
        self.eat(open).then_some(())?;
        let mut items = Vec::new();
        loop {
            self.skip_ws();
            if self.eat(close) {
                return Some(Value::Array(items));
            }
            items.push(self.value()?);
            self.skip_ws();
            if self.eat(close) {
                return Some(Value::Array(items));
            }
            self.eat(',').then_some(())?;
        }
    }

    fn dict(&mut self) -> Option<Value> {
        self.eat('{').then_some(())?;
        let mut map = Map::new();
        loop {
            self.skip_ws();
            if self.eat('}') {
                return Some(Value::Object(map));
            }
            let key = self.dict_key()?;
            self.skip_ws();
            self.eat(':').then_some(())?;
            let value = self.value()?;
            map.insert(key, value);
            self.skip_ws();
            if self.eat('}') {
                return Some(Value::Object(map));
            }
            self.eat(',').then_some(())?;
        }
    }

    /// JSON objects require string keys, so scalar keys are stringified.
    fn dict_key(&mut self) -> Option<String> {
        match self.value()? {
            Value::String(s) => Some(s),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }
}
