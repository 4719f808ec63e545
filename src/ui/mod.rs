//! User interface module - interaction (prompts) and formatting.
//!
//! Separates concerns:
//! - `formatter` - Message emission and styling
//! - This module - Interactive prompts and user input handling

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

use crate::error::{ReleaseError, Result};

pub mod formatter;

pub use formatter::{ConsoleReporter, Level, MemoryReporter, Reporter};

/// Reads one line of answer for a question.
pub trait Prompt {
    /// Displays `question` and returns the raw answer.
    ///
    /// Only the line terminator is removed; surrounding whitespace is kept
    /// so callers decide how to interpret it. End of input without a line
    /// is [`ReleaseError::InputClosed`], never an empty answer.
    fn ask(&mut self, question: &str) -> Result<String>;
}

/// Prompt reading from standard input.
#[derive(Debug, Default)]
pub struct StdinPrompt;

impl Prompt for StdinPrompt {
    fn ask(&mut self, question: &str) -> Result<String> {
        print!("{}", question);
        io::stdout().flush()?;

        read_answer(&mut io::stdin().lock())
    }
}

/// Prompt answering from a fixed list, recording each question asked.
#[derive(Debug, Default)]
pub struct ScriptedPrompt {
    answers: VecDeque<String>,
    questions: Vec<String>,
}

impl ScriptedPrompt {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ScriptedPrompt {
            answers: answers.into_iter().map(Into::into).collect(),
            questions: Vec::new(),
        }
    }

    /// Questions asked so far, in order.
    pub fn questions(&self) -> &[String] {
        &self.questions
    }
}

impl Prompt for ScriptedPrompt {
    fn ask(&mut self, question: &str) -> Result<String> {
        self.questions.push(question.to_string());
        // An exhausted script behaves like a closed stdin.
        self.answers.pop_front().ok_or(ReleaseError::InputClosed)
    }
}

fn read_answer(reader: &mut impl BufRead) -> Result<String> {
    let mut input = String::new();
    if reader.read_line(&mut input)? == 0 {
        return Err(ReleaseError::InputClosed);
    }
    Ok(strip_line_terminator(&input).to_string())
}

fn strip_line_terminator(line: &str) -> &str {
    line.strip_suffix("\r\n")
        .or_else(|| line.strip_suffix('\n'))
        .unwrap_or(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_line_terminator() {
        assert_eq!(strip_line_terminator("2\n"), "2");
        assert_eq!(strip_line_terminator("2\r\n"), "2");
        assert_eq!(strip_line_terminator(" 2 \n"), " 2 ");
        assert_eq!(strip_line_terminator(""), "");
    }

    #[test]
    fn test_scripted_prompt_returns_answers_in_order() {
        let mut prompt = ScriptedPrompt::new(["1", " 3 "]);
        assert_eq!(prompt.ask("first? ").unwrap(), "1");
        assert_eq!(prompt.ask("second? ").unwrap(), " 3 ");
        assert!(matches!(prompt.ask("third? "), Err(ReleaseError::InputClosed)));
        assert_eq!(prompt.questions().len(), 3);
    }

    #[test]
    fn test_read_answer_distinguishes_blank_line_from_eof() {
        let mut blank: &[u8] = b"\n";
        assert_eq!(read_answer(&mut blank).unwrap(), "");

        let mut unterminated: &[u8] = b"2";
        assert_eq!(read_answer(&mut unterminated).unwrap(), "2");

        let mut closed: &[u8] = b"";
        assert!(matches!(read_answer(&mut closed), Err(ReleaseError::InputClosed)));
    }
}
