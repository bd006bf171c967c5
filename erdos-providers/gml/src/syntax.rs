//! Tokenizer and tree parser for GML markup.
//!
//! GML is a flat sequence of `key value` pairs where a value is an integer, a
//! real, a quoted string, or a bracketed nested list of further pairs. Lines
//! starting with `#` are comments.

use crate::errors::GmlError;

/// One `key value` pair and the line its key appeared on.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Entry {
    pub(crate) key: String,
    pub(crate) value: Value,
    pub(crate) line: usize,
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Value {
    Int(i64),
    Real(f64),
    Str(String),
    List(Vec<Entry>),
}

impl Value {
    pub(crate) const fn kind(&self) -> &'static str {
        match self {
            Self::Int(_) => "integer",
            Self::Real(_) => "real",
            Self::Str(_) => "string",
            Self::List(_) => "list",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
enum Token {
    Key(String),
    Int(i64),
    Real(f64),
    Str(String),
    Open,
    Close,
}

impl Token {
    fn describe(&self) -> String {
        match self {
            Self::Key(key) => format!("key `{key}`"),
            Self::Int(value) => format!("integer {value}"),
            Self::Real(value) => format!("real {value}"),
            Self::Str(_) => "string".to_owned(),
            Self::Open => "`[`".to_owned(),
            Self::Close => "`]`".to_owned(),
        }
    }
}

/// Parses `source` into its top-level entries.
pub(crate) fn parse(source: &str) -> Result<Vec<Entry>, GmlError> {
    let tokens = tokenize(source)?;
    let mut parser = Parser {
        tokens: tokens.into_iter().peekable(),
        last_line: 1,
    };
    parser.list(None)
}

struct Parser {
    tokens: std::iter::Peekable<std::vec::IntoIter<(Token, usize)>>,
    last_line: usize,
}

impl Parser {
    /// Parses pairs until the matching `]`, or until end of input when
    /// `opened_at` is `None`.
    fn list(&mut self, opened_at: Option<usize>) -> Result<Vec<Entry>, GmlError> {
        let mut entries = Vec::new();
        loop {
            let Some((token, line)) = self.tokens.next() else {
                return match opened_at {
                    None => Ok(entries),
                    Some(open) => Err(GmlError::malformed(
                        self.last_line,
                        format!("list opened at line {open} is never closed"),
                    )),
                };
            };
            self.last_line = line;
            let key = match token {
                Token::Key(key) => key,
                Token::Close if opened_at.is_some() => return Ok(entries),
                other => {
                    return Err(GmlError::malformed(
                        line,
                        format!("expected a key but found {}", other.describe()),
                    ));
                }
            };
            let value = self.value(&key, line)?;
            entries.push(Entry { key, value, line });
        }
    }

    fn value(&mut self, key: &str, key_line: usize) -> Result<Value, GmlError> {
        let Some((token, line)) = self.tokens.next() else {
            return Err(GmlError::malformed(
                key_line,
                format!("key `{key}` has no value"),
            ));
        };
        self.last_line = line;
        match token {
            Token::Int(value) => Ok(Value::Int(value)),
            Token::Real(value) => Ok(Value::Real(value)),
            Token::Str(value) => Ok(Value::Str(value)),
            Token::Open => self.list(Some(line)).map(Value::List),
            other => Err(GmlError::malformed(
                line,
                format!("expected a value for `{key}` but found {}", other.describe()),
            )),
        }
    }
}

fn tokenize(source: &str) -> Result<Vec<(Token, usize)>, GmlError> {
    let mut tokens = Vec::new();
    let mut chars = source.char_indices().peekable();
    let mut line = 1;

    while let Some(&(start, ch)) = chars.peek() {
        match ch {
            '\n' => {
                line += 1;
                chars.next();
            }
            c if c.is_whitespace() => {
                chars.next();
            }
            '#' => {
                while chars.next_if(|&(_, c)| c != '\n').is_some() {}
            }
            '[' => {
                chars.next();
                tokens.push((Token::Open, line));
            }
            ']' => {
                chars.next();
                tokens.push((Token::Close, line));
            }
            '"' => {
                let opened = line;
                chars.next();
                let mut raw = String::new();
                let mut closed = false;
                for (_, c) in chars.by_ref() {
                    if c == '"' {
                        closed = true;
                        break;
                    }
                    if c == '\n' {
                        line += 1;
                    }
                    raw.push(c);
                }
                if !closed {
                    return Err(GmlError::malformed(opened, "unterminated string"));
                }
                tokens.push((Token::Str(unescape(&raw)), opened));
            }
            c if c.is_ascii_alphabetic() || c == '_' => {
                let end = scan_while(&mut chars, start, |c| c.is_ascii_alphanumeric() || c == '_');
                tokens.push((Token::Key(source[start..end].to_owned()), line));
            }
            c if c.is_ascii_digit() || matches!(c, '+' | '-' | '.') => {
                let end = scan_while(&mut chars, start, |c| {
                    c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.')
                });
                tokens.push((number(&source[start..end], line)?, line));
            }
            other => {
                return Err(GmlError::malformed(
                    line,
                    format!("unexpected character `{other}`"),
                ));
            }
        }
    }
    Ok(tokens)
}

fn scan_while<I>(chars: &mut std::iter::Peekable<I>, start: usize, accept: impl Fn(char) -> bool) -> usize
where
    I: Iterator<Item = (usize, char)>,
{
    let mut end = start;
    while let Some((index, c)) = chars.next_if(|&(_, c)| accept(c)) {
        end = index + c.len_utf8();
    }
    end
}

fn number(raw: &str, line: usize) -> Result<Token, GmlError> {
    if let Ok(value) = raw.parse::<i64>() {
        return Ok(Token::Int(value));
    }
    let digits = raw.trim_start_matches(['+', '-']);
    let is_integer = !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit());
    if is_integer {
        return Err(GmlError::malformed(
            line,
            format!("integer `{raw}` is out of range"),
        ));
    }
    raw.parse::<f64>()
        .map(Token::Real)
        .map_err(|_| GmlError::malformed(line, format!("invalid number `{raw}`")))
}

/// Decodes the character entities GML writers use inside strings. Unknown
/// entities are kept verbatim.
pub(crate) fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        match tail.find(';').and_then(|semi| decode_entity(&tail[1..semi]).map(|c| (c, semi))) {
            Some((decoded, semi)) => {
                out.push(decoded);
                rest = &tail[semi + 1..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn decode_entity(name: &str) -> Option<char> {
    match name {
        "quot" => Some('"'),
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "apos" => Some('\''),
        _ => {
            let digits = name.strip_prefix('#')?;
            let code = match digits.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => digits.parse::<u32>().ok()?,
            };
            char::from_u32(code)
        }
    }
}

/// Encodes `text` so it can be written inside a quoted GML string.
pub(crate) fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '"' => out.push_str("&quot;"),
            '&' => out.push_str("&amp;"),
            c if c.is_ascii() && !c.is_ascii_control() => out.push(c),
            c => out.push_str(&format!("&#{};", u32::from(c))),
        }
    }
    out
}
