// Copyright 2025 the Gadgetry Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tokenizer for layout scripts.
//!
//! Space, tab, comma, colon, carriage return and newline separate tokens and are otherwise
//! ignored. `=`, `;` and `+` are tokens of their own. Double-quoted strings run to the next
//! quote and may contain separators. Everything else is a word.

use crate::error::{LoadError, LoadErrorKind};

/// One token of a layout script.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Token<'a> {
    /// Keyword, label, identifier or number.
    Word(&'a str),
    /// Contents of a double-quoted string.
    Str(&'a str),
    /// `=`
    Equals,
    /// `;`
    Semicolon,
    /// `+`
    Plus,
}

impl Token<'_> {
    pub(crate) fn describe(self) -> &'static str {
        match self {
            Self::Word(_) => "word",
            Self::Str(_) => "string",
            Self::Equals => "`=`",
            Self::Semicolon => "`;`",
            Self::Plus => "`+`",
        }
    }
}

fn is_separator(c: char) -> bool {
    matches!(c, ' ' | '\t' | ',' | ':' | '\r' | '\n')
}

fn ends_word(c: char) -> bool {
    is_separator(c) || matches!(c, '=' | ';' | '+' | '"')
}

/// Iterator over `(line, token)` pairs of a script.
#[derive(Clone, Debug)]
pub(crate) struct Lexer<'a> {
    src: &'a str,
    pos: usize,
    line: usize,
}

impl<'a> Lexer<'a> {
    pub(crate) fn new(src: &'a str) -> Self {
        Self {
            src,
            pos: 0,
            line: 1,
        }
    }

    /// Current line, 1-based.
    pub(crate) fn line(&self) -> usize {
        self.line
    }

    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn skip_separators(&mut self) {
        for c in self.rest().chars() {
            if !is_separator(c) {
                break;
            }
            if c == '\n' {
                self.line += 1;
            }
            self.pos += c.len_utf8();
        }
    }

    fn string(&mut self) -> Result<Token<'a>, LoadError> {
        let start_line = self.line;
        let body = &self.rest()[1..];
        let Some(end) = body.find('"') else {
            return Err(LoadError::new(start_line, LoadErrorKind::UnterminatedString));
        };
        let text = &body[..end];
        self.line += text.matches('\n').count();
        self.pos += end + 2;
        Ok(Token::Str(text))
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Result<(usize, Token<'a>), LoadError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.skip_separators();
        let c = self.rest().chars().next()?;
        let line = self.line;
        let token = match c {
            '=' => Token::Equals,
            ';' => Token::Semicolon,
            '+' => Token::Plus,
            '"' => return Some(self.string().map(|t| (line, t))),
            _ => {
                let rest = self.rest();
                let len = rest.find(ends_word).unwrap_or(rest.len());
                self.pos += len;
                return Some(Ok((line, Token::Word(&rest[..len]))));
            }
        };
        self.pos += 1;
        Some(Ok((line, token)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn tokens(src: &str) -> Vec<(usize, Token<'_>)> {
        Lexer::new(src).collect::<Result<_, _>>().unwrap()
    }

    #[test]
    fn separators_vanish() {
        assert_eq!(
            tokens("UPPERLEFT: 10 20,\n  BOTTOMRIGHT:30\t40;"),
            [
                (1, Token::Word("UPPERLEFT")),
                (1, Token::Word("10")),
                (1, Token::Word("20")),
                (2, Token::Word("BOTTOMRIGHT")),
                (2, Token::Word("30")),
                (2, Token::Word("40")),
                (2, Token::Semicolon),
            ]
        );
    }

    #[test]
    fn flags_and_strings() {
        assert_eq!(
            tokens("STATUS=ENABLED+IMAGE; NAME = \"Menu.wnd:Ok, go\";"),
            [
                (1, Token::Word("STATUS")),
                (1, Token::Equals),
                (1, Token::Word("ENABLED")),
                (1, Token::Plus),
                (1, Token::Word("IMAGE")),
                (1, Token::Semicolon),
                (1, Token::Word("NAME")),
                (1, Token::Equals),
                (1, Token::Str("Menu.wnd:Ok, go")),
                (1, Token::Semicolon),
            ]
        );
    }

    #[test]
    fn negative_numbers_stay_words() {
        assert_eq!(tokens("-1"), [(1, Token::Word("-1"))]);
    }

    #[test]
    fn unterminated_string_reports_its_line() {
        let err = Lexer::new("\n\nTEXT = \"oops")
            .find_map(Result::err)
            .unwrap();
        assert_eq!(err.line, 3);
        assert_eq!(err.kind, LoadErrorKind::UnterminatedString);
    }
}
