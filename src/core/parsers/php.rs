//! Reader and writer for PHP translation files.
//!
//! A grouped catalog file is a PHP script whose only effect is returning a
//! nested array literal:
//!
//! ```php
//! <?php
//!
//! return [
//!     'welcome' => 'Welcome',
//!     'nested' => [
//!         'child' => 'value',
//!     ],
//! ];
//! ```
//!
//! Only literal syntax is understood: quoted strings, numbers, booleans, `null`
//! and `[...]` / `array(...)`. Anything that would need evaluation (constants,
//! function calls, concatenation, string interpolation) is rejected so the file
//! is never rewritten from a partial reading.

use anyhow::{Result, anyhow, bail};
use serde_json::{Number, Value};

use crate::core::data::Translations;

const INDENT: &str = "    ";

/// Deepest array nesting accepted, the same limit serde_json applies.
const MAX_DEPTH: usize = 128;

/// Parse the array returned by a PHP translation file.
pub fn parse_php_array(source: &str) -> Result<Translations> {
    let mut parser = Parser::new(source);
    parser.open_tag()?;
    parser.returned_array()
}

/// Render translations as a PHP file returning a short-syntax array literal.
pub fn format_php_file(translations: &Translations) -> String {
    format!("<?php\n\nreturn {};\n", format_map(translations, 0))
}

/// Whether PHP would store this string key as an integer key.
pub(crate) fn is_integer_key(key: &str) -> bool {
    let digits = key.strip_prefix('-').unwrap_or(key);
    let canonical = match digits.as_bytes() {
        [b'0'] => !key.starts_with('-'),
        [b'1'..=b'9', rest @ ..] => rest.iter().all(u8::is_ascii_digit),
        _ => false,
    };
    canonical && key.parse::<i64>().is_ok()
}

enum ArrayKey {
    Int(i64),
    Str(String),
}

impl ArrayKey {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::String(s) if is_integer_key(&s) => Ok(Self::Int(s.parse()?)),
            Value::String(s) => Ok(Self::Str(s)),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Ok(Self::Int(i)),
                None => n
                    .as_f64()
                    .filter(|f| f.is_finite() && f.abs() < i64::MAX as f64)
                    .map(|f| Self::Int(f.trunc() as i64))
                    .ok_or_else(|| anyhow!("numeric key {} is out of range", n)),
            },
            Value::Bool(b) => Ok(Self::Int(i64::from(b))),
            Value::Null => Ok(Self::Str(String::new())),
            Value::Array(_) | Value::Object(_) => bail!("arrays cannot be used as keys"),
        }
    }

    fn into_string(self) -> String {
        match self {
            Self::Int(i) => i.to_string(),
            Self::Str(s) => s,
        }
    }
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn new(src: &'a str) -> Self {
        Self {
            src: src.trim_start_matches('\u{feff}').trim_start(),
            pos: 0,
            depth: 0,
        }
    }

    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn peek_second(&self) -> Option<char> {
        self.rest().chars().nth(1)
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn eat(&mut self, token: &str) -> bool {
        if self.rest().starts_with(token) {
            self.pos += token.len();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, token: &str) -> Result<()> {
        if self.eat(token) {
            Ok(())
        } else {
            bail!("expected `{}` at byte {}", token, self.pos)
        }
    }

    /// Identifier at the cursor, without consuming it.
    fn word(&self) -> &'a str {
        let rest = self.rest();
        let end = rest
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
            .unwrap_or(rest.len());
        &rest[..end]
    }

    fn skip_trivia(&mut self) {
        loop {
            let rest = self.rest();
            let trimmed = rest.trim_start();
            self.pos += rest.len() - trimmed.len();

            if self.eat("//") || self.eat("#") {
                match self.rest().find('\n') {
                    Some(i) => self.pos += i + 1,
                    None => self.pos = self.src.len(),
                }
            } else if self.eat("/*") {
                match self.rest().find("*/") {
                    Some(i) => self.pos += i + 2,
                    None => self.pos = self.src.len(),
                }
            } else {
                break;
            }
        }
    }

    fn open_tag(&mut self) -> Result<()> {
        let tag = self.rest().get(..5).unwrap_or_default();
        if !tag.eq_ignore_ascii_case("<?php") {
            bail!("missing `<?php` open tag");
        }
        self.pos += 5;
        match self.peek() {
            None => Ok(()),
            Some(c) if c.is_whitespace() => Ok(()),
            Some(c) => bail!("unexpected `{}` after open tag", c),
        }
    }

    fn returned_array(&mut self) -> Result<Translations> {
        loop {
            self.skip_trivia();
            let word = self.word();
            match word.to_ascii_lowercase().as_str() {
                "return" => {
                    self.pos += word.len();
                    return match self.value()? {
                        Value::Object(map) => Ok(map),
                        _ => bail!("file does not return an array"),
                    };
                }
                "declare" => {
                    self.pos += word.len();
                    self.skip_trivia();
                    self.expect("(")?;
                    let close = self
                        .rest()
                        .find(')')
                        .ok_or_else(|| anyhow!("unterminated declare"))?;
                    self.pos += close + 1;
                    self.skip_trivia();
                    self.expect(";")?;
                }
                "namespace" | "use" => {
                    let end = self
                        .rest()
                        .find(';')
                        .ok_or_else(|| anyhow!("unterminated `{}` statement", word))?;
                    self.pos += end + 1;
                }
                "" if self.peek().is_none() => bail!("missing return statement"),
                "" => bail!("unexpected token at byte {}", self.pos),
                _ => bail!("unsupported statement `{}`", word),
            }
        }
    }

    fn value(&mut self) -> Result<Value> {
        self.skip_trivia();
        match self.peek() {
            Some('[') => {
                self.bump();
                self.array(']')
            }
            Some('\'') => self.single_quoted().map(Value::String),
            Some('"') => self.double_quoted().map(Value::String),
            Some(sign @ ('-' | '+')) => {
                self.bump();
                self.skip_trivia();
                self.number(sign == '-')
            }
            Some(c) if c.is_ascii_digit() => self.number(false),
            Some('.') if self.peek_second().is_some_and(|c| c.is_ascii_digit()) => {
                self.number(false)
            }
            Some(c) if c.is_ascii_alphabetic() || c == '_' => {
                let word = self.word();
                let value = match word.to_ascii_lowercase().as_str() {
                    "true" => Value::Bool(true),
                    "false" => Value::Bool(false),
                    "null" => Value::Null,
                    "array" => {
                        self.pos += word.len();
                        self.skip_trivia();
                        self.expect("(")?;
                        return self.array(')');
                    }
                    _ => bail!("unsupported expression `{}`", word),
                };
                self.pos += word.len();
                Ok(value)
            }
            Some(c) => bail!("unexpected `{}` at byte {}", c, self.pos),
            None => bail!("unexpected end of file"),
        }
    }

    fn array(&mut self, close: char) -> Result<Value> {
        if self.depth >= MAX_DEPTH {
            bail!("arrays nested deeper than {} levels", MAX_DEPTH);
        }
        self.depth += 1;
        let array = self.array_items(close);
        self.depth -= 1;
        array
    }

    fn array_items(&mut self, close: char) -> Result<Value> {
        let mut map = Translations::new();
        let mut next_index: i64 = 0;

        loop {
            self.skip_trivia();
            if self.peek() == Some(close) {
                self.bump();
                return Ok(Value::Object(map));
            }

            let first = self.value()?;
            self.skip_trivia();
            let (key, value) = if self.eat("=>") {
                (ArrayKey::from_value(first)?, self.value()?)
            } else {
                (ArrayKey::Int(next_index), first)
            };

            if let ArrayKey::Int(index) = key
                && index >= next_index
            {
                next_index = index.saturating_add(1);
            }
            map.insert(key.into_string(), value);

            self.skip_trivia();
            match self.bump() {
                Some(',') => continue,
                Some(c) if c == close => return Ok(Value::Object(map)),
                Some(c) => bail!("expected `,` or `{}`, found `{}`", close, c),
                None => bail!("unterminated array"),
            }
        }
    }

    fn single_quoted(&mut self) -> Result<String> {
        self.bump();
        let mut out = String::new();
        loop {
            match self.bump() {
                Some('\'') => return Ok(out),
                Some('\\') => match self.peek() {
                    Some(c @ ('\\' | '\'')) => {
                        self.bump();
                        out.push(c);
                    }
                    _ => out.push('\\'),
                },
                Some(c) => out.push(c),
                None => bail!("unterminated string"),
            }
        }
    }

    fn double_quoted(&mut self) -> Result<String> {
        self.bump();
        let mut out: Vec<u8> = Vec::new();
        let mut buf = [0u8; 4];
        loop {
            let Some(c) = self.bump() else {
                bail!("unterminated string");
            };
            match c {
                '"' => break,
                '\\' => self.escape(&mut out)?,
                '$' if self
                    .peek()
                    .is_some_and(|n| n.is_ascii_alphabetic() || n == '_' || n == '{') =>
                {
                    bail!("variable interpolation is not supported")
                }
                '{' if self.peek() == Some('$') => {
                    bail!("variable interpolation is not supported")
                }
                c => out.extend_from_slice(c.encode_utf8(&mut buf).as_bytes()),
            }
        }
        String::from_utf8(out).map_err(|_| anyhow!("string is not valid UTF-8"))
    }

    fn escape(&mut self, out: &mut Vec<u8>) -> Result<()> {
        let Some(c) = self.bump() else {
            bail!("unterminated string");
        };
        match c {
            'n' => out.push(b'\n'),
            't' => out.push(b'\t'),
            'r' => out.push(b'\r'),
            'v' => out.push(0x0b),
            'e' => out.push(0x1b),
            'f' => out.push(0x0c),
            '\\' | '$' | '"' => out.push(c as u8),
            '0'..='7' => {
                let mut code = c.to_digit(8).unwrap_or_default();
                for _ in 0..2 {
                    match self.peek().and_then(|d| d.to_digit(8)) {
                        Some(d) => {
                            self.bump();
                            code = code * 8 + d;
                        }
                        None => break,
                    }
                }
                out.push((code & 0xff) as u8);
            }
            'x' if self.peek().is_some_and(|d| d.is_ascii_hexdigit()) => {
                let mut code = 0;
                for _ in 0..2 {
                    match self.peek().and_then(|d| d.to_digit(16)) {
                        Some(d) => {
                            self.bump();
                            code = code * 16 + d;
                        }
                        None => break,
                    }
                }
                out.push(code as u8);
            }
            'u' if self.peek() == Some('{') => {
                self.bump();
                let end = self
                    .rest()
                    .find('}')
                    .ok_or_else(|| anyhow!("unterminated unicode escape"))?;
                let hex = &self.rest()[..end];
                let ch = u32::from_str_radix(hex, 16)
                    .ok()
                    .and_then(char::from_u32)
                    .ok_or_else(|| anyhow!("invalid unicode escape `{}`", hex))?;
                self.pos += end + 1;
                let mut buf = [0u8; 4];
                out.extend_from_slice(ch.encode_utf8(&mut buf).as_bytes());
            }
            other => {
                let mut buf = [0u8; 4];
                out.push(b'\\');
                out.extend_from_slice(other.encode_utf8(&mut buf).as_bytes());
            }
        }
        Ok(())
    }

    fn number(&mut self, negative: bool) -> Result<Value> {
        let rest = self.rest();
        let radix = match rest.get(..2).map(|p| p.to_ascii_lowercase()).as_deref() {
            Some("0x") => Some(16),
            Some("0b") => Some(2),
            Some("0o") => Some(8),
            _ => None,
        };

        let value = if let Some(radix) = radix {
            self.pos += 2;
            let digits = self.take_while(|c| c.is_digit(radix) || c == '_');
            let digits = digits.replace('_', "");
            let n = i64::from_str_radix(&digits, radix)
                .map_err(|_| anyhow!("invalid integer literal"))?;
            Value::from(if negative { -n } else { n })
        } else {
            let start = self.pos;
            self.take_while(|c| c.is_ascii_digit() || c == '_');
            let mut is_float = false;
            if self.peek() == Some('.') {
                self.bump();
                self.take_while(|c| c.is_ascii_digit() || c == '_');
                is_float = true;
            }
            if matches!(self.peek(), Some('e' | 'E')) {
                let exponent = match self.peek_second() {
                    Some('+' | '-') => self.rest().chars().nth(2),
                    other => other,
                };
                if exponent.is_some_and(|c| c.is_ascii_digit()) {
                    self.bump();
                    if matches!(self.peek(), Some('+' | '-')) {
                        self.bump();
                    }
                    self.take_while(|c| c.is_ascii_digit());
                    is_float = true;
                }
            }

            let literal = self.src[start..self.pos].replace('_', "");
            if literal.is_empty() {
                bail!("expected a number at byte {}", start);
            }
            let signed = if negative {
                format!("-{}", literal)
            } else {
                literal.clone()
            };

            let octal = !is_float && literal.len() > 1 && literal.starts_with('0');
            if octal {
                let n = i64::from_str_radix(&literal[1..], 8)
                    .map_err(|_| anyhow!("invalid octal literal `{}`", literal))?;
                Value::from(if negative { -n } else { n })
            } else if let (false, Ok(n)) = (is_float, signed.parse::<i64>()) {
                Value::from(n)
            } else if let (false, Ok(n)) = (is_float, serde_json::from_str::<Number>(&signed)) {
                // wider than i64, kept digit for digit
                Value::Number(n)
            } else {
                let f: f64 = signed.parse()?;
                Value::Number(
                    Number::from_f64(f).ok_or_else(|| anyhow!("non-finite number"))?,
                )
            }
        };

        if self
            .peek()
            .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            bail!("malformed number at byte {}", self.pos);
        }
        Ok(value)
    }

    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        let rest = self.rest();
        let end = rest.find(|c: char| !pred(c)).unwrap_or(rest.len());
        self.pos += end;
        &rest[..end]
    }
}

fn format_map(map: &Translations, depth: usize) -> String {
    format_items(map.iter().map(|(k, v)| (format_key(k), v)), depth)
}

fn format_items<'v>(items: impl Iterator<Item = (String, &'v Value)>, depth: usize) -> String {
    let indent = INDENT.repeat(depth);
    let lines: Vec<String> = items
        .map(|(key, value)| format!("{indent}{INDENT}{key} => {}", format_value(value, depth)))
        .collect();

    if lines.is_empty() {
        return "[]".to_string();
    }
    format!("[\n{},\n{indent}]", lines.join(",\n"))
}

fn format_value(value: &Value, depth: usize) -> String {
    match value {
        Value::Object(map) => format_map(map, depth + 1),
        Value::Array(items) => format_items(
            items.iter().enumerate().map(|(i, v)| (i.to_string(), v)),
            depth + 1,
        ),
        Value::String(s) => quote(s),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Number(n) => {
            let literal = n.to_string();
            if n.is_f64() && !literal.contains(['.', 'e', 'E']) {
                format!("{}.0", literal)
            } else {
                literal
            }
        }
    }
}

fn format_key(key: &str) -> String {
    if is_integer_key(key) {
        key.to_string()
    } else {
        quote(key)
    }
}

fn quote(s: &str) -> String {
    format!("'{}'", s.replace('\\', "\\\\").replace('\'', "\\'"))
}
