//! Interactive confirmation on stdin

use kyofu_importer::{Confirm, ConfirmRequest};
use std::io::{self, BufRead, Write};

/// Prompts on stdout and reads a `y`/`yes` answer from stdin.
///
/// Anything else, including EOF or a read error, declines.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdinConfirm;

impl StdinConfirm {
    pub fn new() -> Self {
        Self
    }

    fn ask(request: &ConfirmRequest, input: &mut impl BufRead, output: &mut impl Write) -> bool {
        let prompted = request
            .details
            .iter()
            .try_for_each(|line| writeln!(output, "{}", line))
            .and_then(|()| write!(output, "{} [y/N] ", request.prompt))
            .and_then(|()| output.flush());
        if let Err(e) = prompted {
            tracing::warn!("Cannot prompt: {}", e);
            return false;
        }

        let mut answer = String::new();
        match input.read_line(&mut answer) {
            Ok(0) => false,
            Ok(_) => is_yes(&answer),
            Err(e) => {
                tracing::warn!("Cannot read answer: {}", e);
                false
            }
        }
    }
}

impl Confirm for StdinConfirm {
    fn confirm(&mut self, request: &ConfirmRequest) -> bool {
        let stdin = io::stdin();
        let stdout = io::stdout();
        Self::ask(request, &mut stdin.lock(), &mut stdout.lock())
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ask(answer: &str) -> (bool, String) {
        let mut request = ConfirmRequest::new("Commit?");
        request.details = vec!["delete: a.flac".to_string()];
        let mut output = Vec::new();
        let accepted = StdinConfirm::ask(&request, &mut answer.as_bytes(), &mut output);
        (accepted, String::from_utf8(output).unwrap())
    }

    #[test]
    fn yes_answers_accept() {
        assert!(ask("y\n").0);
        assert!(ask("YES\n").0);
        assert!(ask("  yes  \n").0);
    }

    #[test]
    fn anything_else_declines() {
        assert!(!ask("n\n").0);
        assert!(!ask("\n").0);
        assert!(!ask("maybe\n").0);
        // EOF
        assert!(!ask("").0);
    }

    #[test]
    fn details_precede_prompt() {
        let (_, output) = ask("n\n");
        assert_eq!(output, "delete: a.flac\nCommit? [y/N] ");
    }
}
