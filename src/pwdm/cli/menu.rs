use super::commands::{handle_add, handle_delete, handle_get, handle_view, AddOptions, AppContext};
use super::prompt::Prompt;
use super::render::{print_messages, render_menu};
use pwdm::api::CmdMessage;
use pwdm::error::{PwdmError, Result};
use pwdm::store::RecordStore;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum MenuChoice {
    Add,
    Get,
    Delete,
    View,
    Quit,
}

impl FromStr for MenuChoice {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim() {
            "1" => Ok(MenuChoice::Add),
            "2" => Ok(MenuChoice::Get),
            "3" => Ok(MenuChoice::Delete),
            "4" => Ok(MenuChoice::View),
            "q" | "Q" => Ok(MenuChoice::Quit),
            other => Err(format!("Invalid choice: `{}`", other)),
        }
    }
}

/// Shows the menu and runs choices until the user quits or input ends.
pub(super) fn run<S: RecordStore>(
    ctx: &mut AppContext<S>,
    prompt: &mut dyn Prompt,
) -> Result<()> {
    print!("{}", render_menu());

    loop {
        let answer = prompt.ask(": ")?;
        let choice = match answer.parse::<MenuChoice>() {
            Ok(choice) => choice,
            Err(msg) => {
                print_messages(&[CmdMessage::warning(msg)]);
                continue;
            }
        };

        let outcome = match choice {
            MenuChoice::Quit => {
                println!("Exit...");
                return Ok(());
            }
            MenuChoice::Add => handle_add(ctx, prompt, AddOptions::interactive()),
            MenuChoice::Get => handle_get(ctx, prompt, None, false),
            MenuChoice::Delete => handle_delete(ctx, prompt, None, false),
            MenuChoice::View => handle_view(ctx),
        };

        match outcome {
            Ok(()) => {}
            Err(e @ PwdmError::Terminal(_)) => return Err(e),
            Err(e) => print_messages(&[CmdMessage::error(e.to_string())]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_choices() {
        assert_eq!("1".parse::<MenuChoice>(), Ok(MenuChoice::Add));
        assert_eq!(" 2 ".parse::<MenuChoice>(), Ok(MenuChoice::Get));
        assert_eq!("3".parse::<MenuChoice>(), Ok(MenuChoice::Delete));
        assert_eq!("4".parse::<MenuChoice>(), Ok(MenuChoice::View));
        assert_eq!("q".parse::<MenuChoice>(), Ok(MenuChoice::Quit));
        assert_eq!("Q".parse::<MenuChoice>(), Ok(MenuChoice::Quit));
    }

    #[test]
    fn test_parse_rejects_other_input() {
        assert!("5".parse::<MenuChoice>().is_err());
        assert!("".parse::<MenuChoice>().is_err());
        assert!("quit".parse::<MenuChoice>().is_err());
    }
}
