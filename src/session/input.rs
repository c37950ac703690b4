//! Where live-session questions come from.

use anyhow::{Context, Result};
use std::io::stdin;
use std::vec::IntoIter;

/// Blocking source of question lines. `Ok(None)` ends the session.
pub trait QuestionSource: Send + 'static {
    fn next(&mut self) -> Result<Option<String>>;
}

/// Reads lines from standard input; `exit` and end-of-input both close
/// the source. Empty lines pass through so the session can print the
/// type-a-question notice.
pub struct StdinQuestionSource;

impl QuestionSource for StdinQuestionSource {
    fn next(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        let read = stdin()
            .read_line(&mut line)
            .context("reading question from stdin")?;
        if read == 0 {
            return Ok(None);
        }
        let line = line.trim().to_string();
        if line.eq_ignore_ascii_case("exit") {
            return Ok(None);
        }
        Ok(Some(line))
    }
}

/// Scripted source for tests.
pub struct VecQuestionSource {
    buf: IntoIter<Option<String>>,
}

impl VecQuestionSource {
    pub fn new(lines: Vec<Option<String>>) -> Self {
        Self {
            buf: lines.into_iter(),
        }
    }
}

impl QuestionSource for VecQuestionSource {
    fn next(&mut self) -> Result<Option<String>> {
        Ok(self.buf.next().flatten())
    }
}
