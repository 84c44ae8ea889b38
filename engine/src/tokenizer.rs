//! Shared tokenizer for both IDL dialects.
//!
//! Both grammars are simple enough to share one token alphabet: identifiers
//! (dotted allowed, for package-qualified type references), integers, string
//! literals, punctuation, and comments. Comment tokens are kept so that
//! top-level comments survive translation; the parsers skip them elsewhere.

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::BridgeError;
use crate::utils::{parse_error, quote};

lazy_static! {
    pub static ref TOKEN_REGEX: Regex = Regex::new(
        r#"((?s:/\*.*?\*/)|//[^\n]*|"[^"\n]*"|-?\d+\b|\b[A-Za-z_][A-Za-z0-9_.]*\b|[=;{}<>(),:\[\]*]|\s+)"#
    )
    .unwrap();
    pub static ref WHITESPACE_RX: Regex = Regex::new(r"^\s+$").unwrap();
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub text:   String,
    pub line:   usize,
    pub column: usize,
}

impl Token {
    pub fn is_comment(&self) -> bool {
        self.text.starts_with("//") || self.text.starts_with("/*")
    }

    pub fn is_string(&self) -> bool {
        self.text.starts_with('"')
    }

    /// String literal contents without the surrounding quotes.
    pub fn unquoted(&self) -> &str {
        self.text.trim_matches('"')
    }
}

pub fn tokenize(text: &str) -> Result<Vec<Token>, BridgeError> {
    let mut tokens = Vec::new();
    let mut line = 1;
    let mut column = 1;
    let mut last_end = 0;

    for mat in TOKEN_REGEX.find_iter(text) {
        let start = mat.start();
        let end = mat.end();
        let part = mat.as_str();

        if start > last_end {
            let unexpected = &text[last_end..start];
            return Err(parse_error(
                &format!("Syntax error: {}", quote(unexpected)),
                line,
                column,
            ));
        }

        if !WHITESPACE_RX.is_match(part) {
            tokens.push(Token {
                text: part.to_string(),
                line,
                column,
            });
        }

        let newline_count = part.matches('\n').count();
        if newline_count > 0 {
            line += newline_count;
            if let Some(last_line_part) = part.split('\n').last() {
                column = last_line_part.len() + 1;
            }
        } else {
            column += part.len();
        }

        last_end = end;
    }

    if last_end != text.len() {
        let unexpected = &text[last_end..];
        return Err(parse_error(
            &format!("Syntax error: {}", quote(unexpected)),
            line,
            column,
        ));
    }

    // Append EOF token
    tokens.push(Token {
        text: "".to_string(),
        line,
        column,
    });
    Ok(tokens)
}

/// Cursor over a token slice, used by both dialect parsers.
pub struct Cursor<'a> {
    tokens: &'a [Token],
    index:  usize,
}

impl<'a> Cursor<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        Cursor { tokens, index: 0 }
    }

    pub fn current(&self) -> &'a Token {
        // The EOF token guarantees the slice is never exhausted mid-parse.
        self.tokens
            .get(self.index)
            .unwrap_or_else(|| self.tokens.last().expect("token stream without EOF"))
    }

    pub fn at_eof(&self) -> bool {
        self.current().text.is_empty()
    }

    pub fn advance(&mut self) -> &'a Token {
        let tok = self.current();
        self.index += 1;
        tok
    }

    /// Consume the current token if its text equals `text`.
    pub fn eat(&mut self, text: &str) -> bool {
        if self.current().text == text {
            self.index += 1;
            true
        } else {
            false
        }
    }

    pub fn expect(&mut self, text: &str) -> Result<&'a Token, BridgeError> {
        let tok = self.current();
        if tok.text == text {
            self.index += 1;
            Ok(tok)
        } else {
            Err(parse_error(
                &format!("Expected {} but found {}", quote(text), quote(&tok.text)),
                tok.line,
                tok.column,
            ))
        }
    }

    pub fn expect_match(&mut self, test: &Regex, expected: &str) -> Result<&'a Token, BridgeError> {
        let tok = self.current();
        if test.is_match(&tok.text) && !tok.text.is_empty() {
            self.index += 1;
            Ok(tok)
        } else {
            Err(parse_error(
                &format!("Expected {} but found {}", expected, quote(&tok.text)),
                tok.line,
                tok.column,
            ))
        }
    }

    pub fn unexpected(&self) -> BridgeError {
        let tok = self.current();
        parse_error(
            &format!("Unexpected token {}", quote(&tok.text)),
            tok.line,
            tok.column,
        )
    }

    /// Skip comment tokens inside declaration bodies.
    pub fn skip_comments(&mut self) {
        while self.current().is_comment() {
            self.index += 1;
        }
    }
}

/// Split a comment token into its lines, without comment markers.
pub fn comment_lines(text: &str) -> Vec<String> {
    if let Some(body) = text.strip_prefix("//") {
        vec![body.to_string()]
    } else {
        text.trim_start_matches("/*")
            .trim_end_matches("*/")
            .lines()
            .map(|l| l.trim().trim_start_matches('*').to_string())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_simple() {
        let input = "i32 x = 10;";
        let expected = vec![
            Token { text: "i32".into(), line: 1, column: 1 },
            Token { text: "x".into(),   line: 1, column: 5 },
            Token { text: "=".into(),   line: 1, column: 7 },
            Token { text: "10".into(),  line: 1, column: 9 },
            Token { text: ";".into(),   line: 1, column: 11 },
            Token { text: "".into(),    line: 1, column: 12 },
        ];
        let got = tokenize(input).unwrap();
        assert_eq!(got, expected);
    }

    #[test]
    fn test_tokenize_string_and_comment() {
        let input = "import \"a.proto\"; // dep";
        let got = tokenize(input).unwrap();
        assert_eq!(got[0].text, "import");
        assert_eq!(got[1].text, "\"a.proto\"");
        assert_eq!(got[1].unquoted(), "a.proto");
        assert_eq!(got[2].text, ";");
        assert!(got[3].is_comment());
    }

    #[test]
    fn test_tokenize_container_type() {
        let input = "map<string, i64>";
        let texts: Vec<String> = tokenize(input)
            .unwrap()
            .into_iter()
            .map(|t| t.text)
            .collect();
        assert_eq!(texts, vec!["map", "<", "string", ",", "i64", ">", ""]);
    }

    #[test]
    fn test_tokenize_unexpected_text() {
        let input = "i32 x = 10 @";
        let err = tokenize(input).unwrap_err();
        assert!(
            matches!(err, BridgeError::Parse { .. }),
            "expected a Parse error but got {:?}",
            err
        );
    }

    #[test]
    fn test_tokenize_tracks_lines() {
        let input = "enum A {\n  B = 1\n}";
        let got = tokenize(input).unwrap();
        let b = got.iter().find(|t| t.text == "B").unwrap();
        assert_eq!((b.line, b.column), (2, 3));
    }
}
