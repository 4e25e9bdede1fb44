use console::Term;
use pwdm::error::{PwdmError, Result};
use std::io::{self, BufRead};

/// Asks the user a question and returns the answer without its line ending.
pub(super) trait Prompt {
    fn ask(&mut self, question: &str) -> Result<String>;
}

pub(super) struct TermPrompt {
    term: Term,
}

impl TermPrompt {
    pub(super) fn new() -> Self {
        Self {
            term: Term::stdout(),
        }
    }
}

impl Prompt for TermPrompt {
    fn ask(&mut self, question: &str) -> Result<String> {
        self.term.write_str(question)?;
        self.term.flush()?;

        if self.term.is_term() {
            return Ok(self.term.read_line()?);
        }

        // Piped input: a closed stdin has to end the session instead of
        // answering every question with an empty line.
        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            self.term.write_line("")?;
            return Err(PwdmError::Terminal(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input closed",
            )));
        }
        let trimmed = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed);
        Ok(line)
    }
}

#[cfg(test)]
pub(super) mod scripted {
    use super::*;
    use std::collections::VecDeque;

    /// Replays canned answers and records the questions asked.
    #[derive(Default)]
    pub(in crate::cli) struct ScriptedPrompt {
        answers: VecDeque<String>,
        pub(in crate::cli) asked: Vec<String>,
    }

    impl ScriptedPrompt {
        pub(in crate::cli) fn new(answers: &[&str]) -> Self {
            Self {
                answers: answers.iter().map(|a| a.to_string()).collect(),
                asked: Vec::new(),
            }
        }
    }

    impl Prompt for ScriptedPrompt {
        fn ask(&mut self, question: &str) -> Result<String> {
            self.asked.push(question.to_string());
            self.answers.pop_front().ok_or_else(|| {
                PwdmError::Terminal(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"))
            })
        }
    }
}
