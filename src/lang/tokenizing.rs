use crate::{
    lang::source_buffer::{SourceBuffer, SourceLocation},
    runtime::{
        data_structures::{number::Number, value::Value},
        error::{ErrorKind, ScriptError},
    },
};
use std::fmt::{self, Debug, Display, Formatter};

/// A token is a simple unit of the language.  The token can only be a number, a quoted string, or
/// a bare word.
///
/// The token also holds the location in the original source code where it was found.
#[derive(Clone, PartialEq)]
pub enum Token {
    /// Can be either an integer or a floating point value.
    Number(SourceLocation, Number),

    /// A quoted string literal, without its quotes.
    Text(SourceLocation, String),

    /// A bare word.
    Word(SourceLocation, String),
}

/// A list of tokens found in the source code.
pub type TokenList = Vec<Token>;

impl Display for Token {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Token::Number(_, num) => write!(f, "{}", num),
            Token::Text(_, string) => write!(f, "{}", string),
            Token::Word(_, string) => write!(f, "{}", string),
        }
    }
}

/// Include the original location and quote the string literals for debugging purposes.
impl Debug for Token {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Token::Number(location, num) => write!(f, "{}: {:?}", location, num),
            Token::Text(location, string) => {
                write!(f, "{}: {}", location, Value::stringify(string))
            }
            Token::Word(location, string) => write!(f, "{}: {}", location, string),
        }
    }
}

impl Token {
    /// Get the token's location in the original source text.
    pub fn location(&self) -> &SourceLocation {
        match self {
            Token::Number(location, _) => location,
            Token::Text(location, _) => location,
            Token::Word(location, _) => location,
        }
    }

    pub fn is_word(&self) -> bool {
        matches!(self, Token::Word(_, _))
    }

    /// The runtime value for the token.  Locations are dropped at this point, the runtime works
    /// on plain values.
    pub fn to_value(&self) -> Value {
        match self {
            Token::Number(_, number) => Value::Number(*number),
            Token::Text(_, text) => Value::Text(text.clone()),
            Token::Word(_, word) => Value::Word(word.clone()),
        }
    }
}

/// The result of lexing some source.  The lexer never fails, problems such as an unterminated
/// string are collected as diagnostics next to the tokens that could be read.
#[derive(Debug, Default)]
pub struct Tokenized {
    pub tokens: TokenList,
    pub diagnostics: Vec<ScriptError>,
}

impl Tokenized {
    /// The tokens as a flat list of runtime values.
    pub fn values(&self) -> Vec<Value> {
        self.tokens.iter().map(Token::to_value).collect()
    }
}

/// The character that escapes, or quotes, the next element of the code.  It always lexes as a
/// token of its own.
pub const QUOTE_MARKER: char = '\\';

/// Check if the given character is considered whitespace.
fn is_whitespace(next: &char) -> bool {
    *next == ' ' || *next == '\t' || *next == '\r' || *next == '\n'
}

fn is_quote(next: &char) -> bool {
    *next == '"' || *next == '\''
}

/// Skip over whitespace in the text.  Stopping only at either the end of the buffer or the next
/// non-whitespace character.
fn skip_whitespace(buffer: &mut SourceBuffer) {
    while let Some(next) = buffer.peek_next()
        && is_whitespace(&next)
    {
        let _ = buffer.next_char();
    }
}

fn unterminated(location: &SourceLocation, what: &str) -> ScriptError {
    ScriptError::new(
        ErrorKind::UnterminatedLiteral,
        Some(location.clone()),
        format!("Unexpected end of source in {}.", what),
        None,
    )
}

/// Skip a `( ... )` comment.  Comments do not nest.
fn skip_block_comment(buffer: &mut SourceBuffer) -> Option<ScriptError> {
    let location = buffer.location().clone();
    let _ = buffer.next_char();

    while let Some(next) = buffer.next_char() {
        if next == ')' {
            return None;
        }
    }

    Some(unterminated(&location, "comment"))
}

/// Skip a `--` comment through to the end of the line.
fn skip_line_comment(buffer: &mut SourceBuffer) {
    while let Some(next) = buffer.next_char() {
        if next == '\n' {
            break;
        }
    }
}

/// Read a quoted string literal.  The contents are taken verbatim, there are no escape sequences.
/// If the closing quote is missing the rest of the source becomes the string's text.
fn process_string(buffer: &mut SourceBuffer) -> (SourceLocation, String, Option<ScriptError>) {
    let location = buffer.location().clone();
    let mut text = String::new();

    let Some(quote) = buffer.next_char() else {
        return (location, text, None);
    };

    while let Some(next) = buffer.next_char() {
        if next == quote {
            return (location, text, None);
        }

        text.push(next);
    }

    let error = unterminated(&location, "string literal");

    (location, text, Some(error))
}

/// Pull text out of the buffer until we hit whitespace, a quote or the start of a comment.
fn process_bare(buffer: &mut SourceBuffer) -> (SourceLocation, String) {
    let location = buffer.location().clone();
    let mut text = String::new();

    while let Some(next) = buffer.peek_next()
        && !is_whitespace(&next)
        && !is_quote(&next)
        && next != '('
    {
        let _ = buffer.next_char();
        text.push(next);
    }

    (location, text)
}

/// Does the text consist of an optional sign followed by one or more digits?
fn is_integer(text: &str) -> bool {
    let digits = text.strip_prefix(['-', '+']).unwrap_or(text);

    !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
}

/// Does the text consist of an optional sign, digits, a point and more digits?
fn is_decimal(text: &str) -> bool {
    let digits = text.strip_prefix(['-', '+']).unwrap_or(text);

    match digits.split_once('.') {
        Some((whole, fraction)) => is_integer(whole)
            && !whole.starts_with(['-', '+'])
            && is_integer(fraction)
            && !fraction.starts_with(['-', '+']),
        None => false,
    }
}

/// Attempt to convert the text into a numeric literal.  Integers too large for an i64 are read as
/// floating point values.
fn to_numeric(text: &str) -> Option<Number> {
    if is_integer(text) {
        match text.parse::<i64>() {
            Ok(value) => Some(Number::Int(value)),
            Err(_) => text.parse::<f64>().ok().map(Number::Float),
        }
    } else if is_decimal(text) {
        text.parse::<f64>().ok().map(Number::Float)
    } else {
        None
    }
}

/// Tokenize the source code from a string.
pub fn tokenize_from_source(path: &str, source: &str) -> Tokenized {
    let mut buffer = SourceBuffer::new(path, source);
    let mut result = Tokenized::default();

    while let Some(next) = buffer.peek_next() {
        if is_whitespace(&next) {
            skip_whitespace(&mut buffer);
            continue;
        }

        if next == '(' {
            if let Some(error) = skip_block_comment(&mut buffer) {
                result.diagnostics.push(error);
            }

            continue;
        }

        if next == '-' && buffer.peek_second() == Some('-') {
            skip_line_comment(&mut buffer);
            continue;
        }

        let token = if is_quote(&next) {
            let (location, text, error) = process_string(&mut buffer);

            if let Some(error) = error {
                result.diagnostics.push(error);
            }

            Token::Text(location, text)
        } else if next == QUOTE_MARKER {
            let location = buffer.location().clone();
            let _ = buffer.next_char();

            Token::Word(location, QUOTE_MARKER.to_string())
        } else {
            let (location, text) = process_bare(&mut buffer);

            match to_numeric(&text) {
                Some(number) => Token::Number(location, number),
                None => Token::Word(location, text),
            }
        };

        result.tokens.push(token);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(source: &str) -> Vec<Value> {
        tokenize_from_source("<test>", source).values()
    }

    #[test]
    fn classifies_numbers() {
        assert!(matches!(lex("42")[..], [Value::Number(Number::Int(42))]));
        assert!(matches!(lex("-7")[..], [Value::Number(Number::Int(-7))]));
        assert!(matches!(lex("+3")[..], [Value::Number(Number::Int(3))]));
        assert!(matches!(lex("1.5")[..], [Value::Number(Number::Float(_))]));

        assert!(lex("1.")[0].is_word());
        assert!(lex(".5")[0].is_word());
        assert!(lex("1e3")[0].is_word());
        assert!(lex("-")[0].is_word());
    }

    #[test]
    fn huge_integers_become_floats() {
        let values = lex("99999999999999999999");

        assert!(matches!(values[..], [Value::Number(Number::Float(_))]));
    }

    #[test]
    fn strips_comments() {
        let values = lex("1 ( a comment ) 2 -- to the end\n3");

        assert_eq!(values, vec![Value::from(1i64), Value::from(2i64), Value::from(3i64)]);
    }

    #[test]
    fn comment_splits_bare_tokens() {
        let values = lex("a(b)c");

        assert_eq!(values, vec![Value::Word("a".into()), Value::Word("c".into())]);
    }

    #[test]
    fn strings_are_verbatim_text() {
        let values = lex(r#""a b" 'say "hi"' "x\n""#);

        assert!(values[0].is_text());
        assert_eq!(values[0].as_text(), Some("a b"));
        assert_eq!(values[1].as_text(), Some("say \"hi\""));
        assert_eq!(values[2].as_text(), Some("x\\n"));
    }

    #[test]
    fn adjacent_strings_stay_separate() {
        let values = lex(r#""aaa" "bbb""#);

        assert_eq!(values, vec![Value::from("aaa"), Value::from("bbb")]);
    }

    #[test]
    fn quote_marker_is_its_own_token() {
        let values = lex("\\else \\ dup");

        assert_eq!(values.len(), 4);
        assert_eq!(values[0].as_word(), Some("\\"));
        assert_eq!(values[1].as_word(), Some("else"));
        assert_eq!(values[2].as_word(), Some("\\"));
        assert_eq!(values[3].as_word(), Some("dup"));
    }

    #[test]
    fn unterminated_string_is_reported() {
        let result = tokenize_from_source("<test>", "1 \"open");

        assert_eq!(result.tokens.len(), 2);
        assert_eq!(result.diagnostics.len(), 1);
        assert_eq!(result.diagnostics[0].kind(), ErrorKind::UnterminatedLiteral);
        assert_eq!(result.tokens[1].to_value().as_text(), Some("open"));
        assert_eq!(result.tokens[1].location().column(), 3);
    }

    #[test]
    fn unterminated_comment_is_reported() {
        let result = tokenize_from_source("<test>", "1 ( never closed");

        assert_eq!(result.tokens.len(), 1);
        assert_eq!(result.diagnostics.len(), 1);
    }
}
