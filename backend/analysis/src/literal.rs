//! Permissive literal-structure decoding.
//!
//! The model frequently replies with Python-literal syntax rather than
//! strict JSON: single-quoted strings, `True`/`False`/`None`, tuples, and
//! trailing commas. This decoder accepts that superset and produces a
//! `serde_json::Value`, so the validator downstream sees a single shape
//! regardless of which decode stage succeeded.

use serde_json::{Map, Number, Value};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum LiteralError {
    #[error("unexpected end of input")]
    UnexpectedEnd,

    #[error("unexpected character `{0}` at offset {1}")]
    UnexpectedChar(char, usize),

    #[error("trailing characters after literal at offset {0}")]
    TrailingInput(usize),

    #[error("invalid number at offset {0}")]
    InvalidNumber(usize),

    #[error("invalid escape sequence at offset {0}")]
    InvalidEscape(usize),
}

/// Decode a Python-literal-style value into JSON.
pub fn parse_literal(text: &str) -> Result<Value, LiteralError> {
    let mut parser = Parser {
        chars: text.char_indices().collect(),
        pos: 0,
        len: text.len(),
    };
    parser.skip_ws();
    let value = parser.parse_value()?;
    parser.skip_ws();
    if parser.pos < parser.chars.len() {
        return Err(LiteralError::TrailingInput(parser.offset()));
    }
    Ok(value)
}

struct Parser {
    chars: Vec<(usize, char)>,
    pos: usize,
    len: usize,
}

impl Parser {
    fn offset(&self) -> usize {
        self.chars.get(self.pos).map(|(i, _)| *i).unwrap_or(self.len)
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).map(|(_, c)| *c)
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek();
        if c.is_some() {
            self.pos += 1;
        }
        c
    }

    fn skip_ws(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_whitespace()) {
            self.pos += 1;
        }
    }

    fn eat(&mut self, expected: char) -> Result<(), LiteralError> {
        match self.peek() {
            Some(c) if c == expected => {
                self.pos += 1;
                Ok(())
            }
            Some(c) => Err(LiteralError::UnexpectedChar(c, self.offset())),
            None => Err(LiteralError::UnexpectedEnd),
        }
    }

    fn eat_keyword(&mut self, keyword: &str) -> bool {
        let mut end = self.pos;
        for expected in keyword.chars() {
            match self.chars.get(end) {
                Some((_, c)) if *c == expected => end += 1,
                _ => return false,
            }
        }
        self.pos = end;
        true
    }

    fn parse_value(&mut self) -> Result<Value, LiteralError> {
        self.skip_ws();
        match self.peek() {
            None => Err(LiteralError::UnexpectedEnd),
            Some('{') => self.parse_dict(),
            Some('[') => self.parse_seq(']'),
            // Tuples decode as arrays.
            Some('(') => self.parse_seq(')'),
            Some('\'') | Some('"') => self.parse_string().map(Value::String),
            Some(c) if c == '-' || c == '+' || c.is_ascii_digit() => self.parse_number(),
            Some(_) => self.parse_keyword(),
        }
    }

    fn parse_keyword(&mut self) -> Result<Value, LiteralError> {
        let keywords = [
            ("True", Value::Bool(true)),
            ("False", Value::Bool(false)),
            ("None", Value::Null),
            ("true", Value::Bool(true)),
            ("false", Value::Bool(false)),
            ("null", Value::Null),
        ];
        for (keyword, value) in keywords {
            if self.eat_keyword(keyword) {
                return Ok(value);
            }
        }
        match self.peek() {
            Some(c) => Err(LiteralError::UnexpectedChar(c, self.offset())),
            None => Err(LiteralError::UnexpectedEnd),
        }
    }

    fn parse_string(&mut self) -> Result<String, LiteralError> {
        let quote = self.bump().ok_or(LiteralError::UnexpectedEnd)?;
        let mut out = String::new();
        loop {
            let c = self.bump().ok_or(LiteralError::UnexpectedEnd)?;
            if c == quote {
                return Ok(out);
            }
            if c != '\\' {
                out.push(c);
                continue;
            }
            let esc = self.bump().ok_or(LiteralError::UnexpectedEnd)?;
            match esc {
                'n' => out.push('\n'),
                't' => out.push('\t'),
                'r' => out.push('\r'),
                'b' => out.push('\u{0008}'),
                'f' => out.push('\u{000C}'),
                '\\' => out.push('\\'),
                '/' => out.push('/'),
                '\'' => out.push('\''),
                '"' => out.push('"'),
                'u' => out.push(self.parse_hex_escape(4)?),
                'x' => out.push(self.parse_hex_escape(2)?),
                // Python keeps the backslash on unknown escapes.
                other => {
                    out.push('\\');
                    out.push(other);
                }
            }
        }
    }

    fn parse_hex_escape(&mut self, digits: usize) -> Result<char, LiteralError> {
        let start = self.offset();
        let mut code = 0u32;
        for _ in 0..digits {
            let c = self.bump().ok_or(LiteralError::UnexpectedEnd)?;
            let digit = c
                .to_digit(16)
                .ok_or(LiteralError::InvalidEscape(start))?;
            code = code * 16 + digit;
        }
        char::from_u32(code).ok_or(LiteralError::InvalidEscape(start))
    }

    fn parse_number(&mut self) -> Result<Value, LiteralError> {
        let start = self.offset();
        // Python literals allow a leading `+`; JSON numbers do not.
        if matches!(self.peek(), Some('+')) {
            self.pos += 1;
        }
        let mut text = String::new();
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() || matches!(c, '-' | '+' | '.' | 'e' | 'E') {
                text.push(c);
                self.pos += 1;
            } else {
                break;
            }
        }
        if !text.contains(['.', 'e', 'E']) {
            if let Ok(i) = text.parse::<i64>() {
                return Ok(Value::Number(i.into()));
            }
        }
        text.parse::<f64>()
            .ok()
            .and_then(Number::from_f64)
            .map(Value::Number)
            .ok_or(LiteralError::InvalidNumber(start))
    }

    fn parse_seq(&mut self, close: char) -> Result<Value, LiteralError> {
        self.pos += 1;
        let mut items = Vec::new();
        loop {
            self.skip_ws();
            match self.peek() {
                Some(c) if c == close => {
                    self.pos += 1;
                    return Ok(Value::Array(items));
                }
                None => return Err(LiteralError::UnexpectedEnd),
                _ => {}
            }
            items.push(self.parse_value()?);
            self.skip_ws();
            match self.peek() {
                Some(',') => {
                    self.pos += 1;
                }
                Some(c) if c == close => {
                    self.pos += 1;
                    return Ok(Value::Array(items));
                }
                Some(c) => return Err(LiteralError::UnexpectedChar(c, self.offset())),
                None => return Err(LiteralError::UnexpectedEnd),
            }
        }
    }

    fn parse_dict(&mut self) -> Result<Value, LiteralError> {
        self.pos += 1;
        let mut map = Map::new();
        loop {
            self.skip_ws();
            match self.peek() {
                Some('}') => {
                    self.pos += 1;
                    return Ok(Value::Object(map));
                }
                None => return Err(LiteralError::UnexpectedEnd),
                _ => {}
            }
            let key = match self.peek() {
                Some('\'') | Some('"') => self.parse_string()?,
                // Numeric keys stringify, as JSON object keys must.
                Some(c) if c == '-' || c.is_ascii_digit() => self.parse_number()?.to_string(),
                Some(c) => return Err(LiteralError::UnexpectedChar(c, self.offset())),
                None => return Err(LiteralError::UnexpectedEnd),
            };
            self.skip_ws();
            self.eat(':')?;
            let value = self.parse_value()?;
            map.insert(key, value);
            self.skip_ws();
            match self.peek() {
                Some(',') => {
                    self.pos += 1;
                }
                Some('}') => {
                    self.pos += 1;
                    return Ok(Value::Object(map));
                }
                Some(c) => return Err(LiteralError::UnexpectedChar(c, self.offset())),
                None => return Err(LiteralError::UnexpectedEnd),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_python_style_records() {
        let text = "[{'expr': '2 + 2', 'result': 4, 'assign': False}]";
        let value = parse_literal(text).unwrap();
        assert_eq!(
            value,
            json!([{"expr": "2 + 2", "result": 4, "assign": false}])
        );
    }

    #[test]
    fn decodes_strict_json_too() {
        let text = r#"{"a": [1, 2.5, null], "b": "x"}"#;
        assert_eq!(
            parse_literal(text).unwrap(),
            json!({"a": [1, 2.5, null], "b": "x"})
        );
    }

    #[test]
    fn decodes_none_and_booleans() {
        assert_eq!(parse_literal("None").unwrap(), Value::Null);
        assert_eq!(parse_literal("True").unwrap(), json!(true));
        assert_eq!(parse_literal("False").unwrap(), json!(false));
    }

    #[test]
    fn decodes_tuples_as_arrays() {
        assert_eq!(parse_literal("('a', 1)").unwrap(), json!(["a", 1]));
    }

    #[test]
    fn tolerates_trailing_commas() {
        assert_eq!(parse_literal("[1, 2,]").unwrap(), json!([1, 2]));
        assert_eq!(parse_literal("{'a': 1,}").unwrap(), json!({"a": 1}));
    }

    #[test]
    fn keeps_backslash_on_unknown_escapes() {
        assert_eq!(parse_literal(r"'\d+'").unwrap(), json!(r"\d+"));
    }

    #[test]
    fn decodes_unicode_escapes() {
        assert_eq!(parse_literal("'\\u03c0'").unwrap(), json!("π"));
        assert_eq!(parse_literal("'\\x41'").unwrap(), json!("A"));
    }

    #[test]
    fn decodes_mixed_quotes() {
        let value = parse_literal(r#"{'say': "it's fine"}"#).unwrap();
        assert_eq!(value, json!({"say": "it's fine"}));
    }

    #[test]
    fn rejects_prose() {
        assert!(parse_literal("I could not read the image.").is_err());
    }

    #[test]
    fn rejects_trailing_garbage() {
        assert_eq!(
            parse_literal("[1] and more"),
            Err(LiteralError::TrailingInput(4))
        );
    }

    #[test]
    fn rejects_unterminated_strings() {
        assert_eq!(parse_literal("'open"), Err(LiteralError::UnexpectedEnd));
    }

    #[test]
    fn accepts_leading_plus_on_numbers() {
        assert_eq!(parse_literal("+3").unwrap(), json!(3));
    }
}
