//! Terminal front-end: turns console lines into controller actions and prints
//! snapshots as they change.

use crate::controller::{Action, ControllerSnapshot, ControllerState};
use crate::render;
use crate::samples::{self, SAMPLES};
use std::fmt::Write;

pub const HELP: &str = "\
Type text and press Enter to set the input. Commands:
  :submit        analyze the current input
  :example <n>   load example <n>
  :examples      list the examples
  :clear         clear the input and any result
  :close         close the results panel
  :dismiss       dismiss the error message
  :html          print the last result as HTML
  :help          show this help
  :quit          exit";

/// A parsed console line.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Dispatch(Action),
    ListExamples,
    PrintHtml,
    Help,
    Quit,
    Unknown(String),
}

pub fn parse_command(line: &str) -> Command {
    let Some(command) = line.trim().strip_prefix(':') else {
        return Command::Dispatch(Action::EditText(line.to_string()));
    };

    let mut parts = command.split_whitespace();
    match (parts.next(), parts.next()) {
        (Some("submit"), None) => Command::Dispatch(Action::Submit),
        (Some("clear"), None) => Command::Dispatch(Action::Clear),
        (Some("close"), None) => Command::Dispatch(Action::CloseResults),
        (Some("dismiss"), None) => Command::Dispatch(Action::DismissError),
        (Some("examples"), None) => Command::ListExamples,
        (Some("example"), Some(n)) => match n.parse::<usize>().ok().and_then(samples::by_number) {
            Some(sample) => Command::Dispatch(Action::PickExample(sample.text.to_string())),
            None => Command::Unknown(format!("No example {}", n)),
        },
        (Some("html"), None) => Command::PrintHtml,
        (Some("help"), None) => Command::Help,
        (Some("quit"), None) | (Some("q"), None) => Command::Quit,
        _ => Command::Unknown(format!("Unknown command: {}", line.trim())),
    }
}

pub fn list_examples() -> String {
    let mut out = String::new();
    for (i, sample) in SAMPLES.iter().enumerate() {
        let _ = writeln!(out, "  {}. [{}] {}", i + 1, sample.label, sample.text);
    }
    out
}

/// Text panel for a snapshot.
pub fn format_snapshot(snapshot: &ControllerSnapshot) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Characters: {}", snapshot.input_len);
    match &snapshot.state {
        ControllerState::Idle => {}
        ControllerState::Loading => {
            let _ = writeln!(out, "Analyzing...");
        }
        ControllerState::Error(message) => {
            let _ = writeln!(out, "⚠️ {}", render::strip_control(message));
        }
        ControllerState::ResultsShown(result) => {
            let _ = writeln!(out, "{}", render::render(result));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AnalysisResult;

    #[test]
    fn test_plain_line_edits_text() {
        assert_eq!(
            parse_command("some text to check"),
            Command::Dispatch(Action::EditText("some text to check".to_string()))
        );
    }

    #[test]
    fn test_commands() {
        assert_eq!(parse_command(":submit"), Command::Dispatch(Action::Submit));
        assert_eq!(parse_command("  :clear "), Command::Dispatch(Action::Clear));
        assert_eq!(parse_command(":close"), Command::Dispatch(Action::CloseResults));
        assert_eq!(parse_command(":dismiss"), Command::Dispatch(Action::DismissError));
        assert_eq!(parse_command(":examples"), Command::ListExamples);
        assert_eq!(parse_command(":html"), Command::PrintHtml);
        assert_eq!(parse_command(":q"), Command::Quit);
        assert!(matches!(parse_command(":frobnicate"), Command::Unknown(_)));
    }

    #[test]
    fn test_example_command_picks_sample() {
        assert_eq!(
            parse_command(":example 1"),
            Command::Dispatch(Action::PickExample(SAMPLES[0].text.to_string()))
        );
        assert!(matches!(parse_command(":example 0"), Command::Unknown(_)));
        assert!(matches!(parse_command(":example two"), Command::Unknown(_)));
    }

    #[test]
    fn test_format_snapshot() {
        let mut snapshot = ControllerSnapshot {
            state: ControllerState::Error("Please enter some text to analyze.".to_string()),
            input_text: String::new(),
            input_len: 0,
            submit_enabled: true,
            in_flight: None,
            last_result: None,
        };
        assert_eq!(
            format_snapshot(&snapshot),
            "Characters: 0\n⚠️ Please enter some text to analyze.\n"
        );

        snapshot.state = ControllerState::ResultsShown(AnalysisResult {
            is_neutral: true,
            word_count: 4,
            overall_score: 0.0,
            biases: vec![],
        });
        assert!(format_snapshot(&snapshot).contains("Word count: 4"));
    }
}
