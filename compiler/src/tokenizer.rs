use log::trace;
use regex::Regex;
use std::{fs, path::Path};

use crate::{
    error::{CompileError, FileError, JackError, LexError},
    tokens::{Token, TokenKind, KEYWORDS, MAX_INT_CONSTANT, SYMBOLS},
};

pub struct Tokenizer {
    id_re: Regex,
    int_re: Regex,
}

#[derive(PartialEq, Eq)]
enum ScanState {
    Code,
    Str,
    BlockComment,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Tokenizer {
    pub fn new() -> Self {
        return Tokenizer {
            id_re: Regex::new(r"^[_a-zA-Z][_a-zA-Z0-9]*$").expect("regex syntax error."),
            int_re: Regex::new(r"^[0-9]+$").expect("regex syntax error."),
        };
    }

    /// Reads a whole `.jack` file and splits it into tokens.
    pub fn tokenize(&self, input: &Path) -> Result<TokenStream, JackError> {
        if input.extension().and_then(|e| e.to_str()) != Some("jack") {
            return FileError::err(input, "not a .jack file");
        }
        let text = fs::read_to_string(input)
            .map_err(|e| FileError::new(input, &format!("fail to load file, {e}")))?;
        let stream = self.tokenize_str(&text)?;
        trace!("{}: {} tokens", input.display(), stream.len());
        Ok(stream)
    }

    pub fn tokenize_str(&self, text: &str) -> Result<TokenStream, JackError> {
        let mut tokens = Vec::new();
        let mut pending = String::new();
        let mut pending_line = 1;
        let mut comment_line = 1;
        let mut line = 1;
        let mut state = ScanState::Code;
        let mut chars = text.chars().peekable();

        while let Some(c) = chars.next() {
            match state {
                ScanState::Str => {
                    if c == '"' {
                        pending.push(c);
                        // a string spanning lines is reported on its closing line
                        self.flush(&mut tokens, &mut pending, line)?;
                        state = ScanState::Code;
                    } else if c == '\n' {
                        line += 1;
                    } else if c != '\r' {
                        pending.push(c);
                    }
                }
                ScanState::BlockComment => {
                    if c == '*' && chars.peek() == Some(&'/') {
                        chars.next();
                        state = ScanState::Code;
                    } else if c == '\n' {
                        line += 1;
                    }
                }
                ScanState::Code => {
                    if c == '"' {
                        self.flush(&mut tokens, &mut pending, pending_line)?;
                        pending.push(c);
                        state = ScanState::Str;
                    } else if c == '/' && chars.peek() == Some(&'/') {
                        self.flush(&mut tokens, &mut pending, pending_line)?;
                        for skipped in chars.by_ref() {
                            if skipped == '\n' {
                                line += 1;
                                break;
                            }
                        }
                    } else if c == '/' && chars.peek() == Some(&'*') {
                        self.flush(&mut tokens, &mut pending, pending_line)?;
                        chars.next();
                        comment_line = line;
                        state = ScanState::BlockComment;
                    } else if c.is_whitespace() {
                        self.flush(&mut tokens, &mut pending, pending_line)?;
                        if c == '\n' {
                            line += 1;
                        }
                    } else if SYMBOLS.contains(&c) {
                        self.flush(&mut tokens, &mut pending, pending_line)?;
                        tokens.push(Token::new(TokenKind::Symbol, &c.to_string(), line));
                    } else {
                        if pending.is_empty() {
                            pending_line = line;
                        }
                        pending.push(c);
                    }
                }
            }
        }

        match state {
            ScanState::Str => {
                return LexError::err(&pending, "unterminated string constant", line);
            }
            ScanState::BlockComment => {
                return LexError::err("/*", "unterminated comment", comment_line);
            }
            ScanState::Code => {}
        }
        self.flush(&mut tokens, &mut pending, pending_line)?;
        Ok(TokenStream::new(tokens))
    }

    fn flush(&self, tokens: &mut Vec<Token>, pending: &mut String, line: usize) -> Result<(), JackError> {
        if pending.is_empty() {
            return Ok(());
        }
        let token = self.classify(pending, line)?;
        tokens.push(token);
        pending.clear();
        Ok(())
    }

    pub fn classify(&self, text: &str, line: usize) -> Result<Token, JackError> {
        if KEYWORDS.contains(&text) {
            return Ok(Token::new(TokenKind::Keyword, text, line));
        }
        let mut chars = text.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            if SYMBOLS.contains(&c) {
                return Ok(Token::new(TokenKind::Symbol, text, line));
            }
        }
        if text.len() >= 2 && text.starts_with('"') && text.ends_with('"') {
            return Ok(Token::new(TokenKind::StringConst, &text[1..text.len() - 1], line));
        }
        if self.int_re.is_match(text) {
            return match text.parse::<u32>() {
                Ok(n) if n <= MAX_INT_CONSTANT => Ok(Token::new(TokenKind::IntConst, text, line)),
                _ => LexError::err(text, "integer constant out of range", line),
            };
        }
        if self.id_re.is_match(text) {
            return Ok(Token::new(TokenKind::Identifier, text, line));
        }
        LexError::err(text, "unrecognized token", line)
    }
}

/// Fully lexed file with a cursor that starts before the first token.
#[derive(Debug, Clone)]
pub struct TokenStream {
    tokens: Vec<Token>,
    cursor: Option<usize>,
}

impl TokenStream {
    pub fn new(tokens: Vec<Token>) -> Self {
        TokenStream {
            tokens,
            cursor: None,
        }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn as_slice(&self) -> &[Token] {
        &self.tokens
    }

    pub fn position(&self) -> Option<usize> {
        self.cursor
    }

    pub fn has_more_tokens(&self) -> bool {
        match self.cursor {
            None => !self.tokens.is_empty(),
            Some(i) => i + 1 < self.tokens.len(),
        }
    }

    pub fn advance(&mut self) -> Result<(), JackError> {
        if !self.has_more_tokens() {
            return CompileError::err("No more tokens, but advance() is called.", self.line());
        }
        self.cursor = Some(self.cursor.map_or(0, |i| i + 1));
        Ok(())
    }

    pub fn retreat(&mut self) -> Result<(), JackError> {
        match self.cursor {
            Some(i) if i > 0 => {
                self.cursor = Some(i - 1);
                Ok(())
            }
            _ => CompileError::err(
                "No previous tokens available for lookup, but retreat() is called.",
                self.line(),
            ),
        }
    }

    pub fn current(&self) -> Option<&Token> {
        self.cursor.and_then(|i| self.tokens.get(i))
    }

    pub fn token_type(&self) -> Option<TokenKind> {
        self.current().map(|t| t.kind)
    }

    /// Source line of the current token, or of the first token before any advance.
    pub fn line(&self) -> usize {
        self.current()
            .or_else(|| self.tokens.first())
            .map_or(1, |t| t.line)
    }
}
