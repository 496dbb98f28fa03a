use std::{
    error::Error,
    fmt::{self, Display},
    io,
    path::{Path, PathBuf},
};

use derive_more::{Display, From};

/// Every failure the compiler can report. The first one raised aborts the
/// current file.
#[derive(Debug, Display, From)]
pub enum JackError {
    #[display(fmt = "{}", _0)]
    File(FileError),
    #[display(fmt = "{}", _0)]
    Lex(LexError),
    #[display(fmt = "{}", _0)]
    Compile(CompileError),
    #[display(fmt = "IO Exception: {}", _0)]
    Io(io::Error),
    #[display(fmt = "XML Exception: {}", _0)]
    Xml(xml::writer::Error),
}

impl Error for JackError {}

impl JackError {
    /// Source line of the offending token, when the error has one.
    pub fn line(&self) -> Option<usize> {
        match self {
            JackError::Lex(e) => Some(e.line),
            JackError::Compile(e) => Some(e.line),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FileError {
    pub path: PathBuf,
    pub reason: String,
}

impl FileError {
    pub fn new(path: &Path, reason: &str) -> Self {
        FileError {
            path: path.to_path_buf(),
            reason: reason.to_owned(),
        }
    }

    pub fn err<T>(path: &Path, reason: &str) -> Result<T, JackError> {
        Err(FileError::new(path, reason).into())
    }
}

impl Display for FileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "File Exception: {} (Path: {})",
            self.reason,
            self.path.display()
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexError {
    pub text: String,
    pub reason: String,
    pub line: usize,
}

impl LexError {
    pub fn err<T>(text: &str, reason: &str, line: usize) -> Result<T, JackError> {
        Err(LexError {
            text: text.to_owned(),
            reason: reason.to_owned(),
            line,
        }
        .into())
    }
}

impl Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Lex Exception: {} `{}`\nLine number: {}",
            self.reason, self.text, self.line
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileError {
    pub message: String,
    pub line: usize,
}

impl CompileError {
    pub fn new(message: &str, line: usize) -> Self {
        CompileError {
            message: message.to_owned(),
            line,
        }
    }

    pub fn err<T>(message: &str, line: usize) -> Result<T, JackError> {
        Err(CompileError::new(message, line).into())
    }
}

impl Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Compile Exception: {}\nLine number: {}",
            self.message, self.line
        )
    }
}
