use anyhow::Result;
use loni::models::message::Message;
use std::path::PathBuf;

pub mod cliclack;

pub trait Prompt {
    fn render(&mut self, message: &Message);
    /// Status text that is not part of the conversation
    fn render_notice(&mut self, text: &str);
    /// Shown next to the composer, e.g. the selected mode
    fn set_status(&mut self, status: &str);
    fn get_input(&mut self) -> Result<Input>;
    fn show_busy(&mut self);
    fn hide_busy(&mut self);
    fn close(&self);
    fn loni_ready(&self) {
        println!("\n");
        println!("LONI ASSISTANT is ready. Type a message, or /? for help.");
        println!("\n");
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    AskAgain, // Ask the user for input again. Control flow command.
    Message(String), // User sent a message
    Exit, // User wants to exit the session
    NewChat, // Clear the conversation
    Attach(PathBuf), // Attach a file
    Regenerate, // Send the last prompt again
    Mode(Option<String>), // Show or select the conversation mode
    Settings(Option<String>), // Show settings, or change one
    History, // List recent chats
    OpenChat(String), // Select one of the recent chats
    ShowLog, // Print the chat log location and size
}

pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn bat_theme(&self) -> &'static str {
        match self {
            Theme::Light => "GitHub",
            Theme::Dark => "zenburn",
        }
    }
}

pub const HELP: &str = "Commands:
/exit, /quit - Exit the session
/new - Start a new chat
/attach <path> - Attach a file
/regen - Regenerate the last response
/mode [name|number] - Show or change the conversation mode
/settings - Show settings
/settings voice|memory|sharing - Toggle a setting
/settings voice-type <neural|professional|casual> - Pick a voice
/settings language <code> - Set the language
/history - List recent chats
/open <id> - Open a recent chat
/log - Show where successful exchanges are logged
/m - Switch to multiline input mode
/s - Switch to singleline input mode
/t - Toggle Light/Dark theme
/? - Display this help message";

/// Turn a line typed by the user into a session command.
///
/// Prompt-local commands (`/m`, `/s`, `/t`, `/?`) are handled by the prompt
/// before this is called.
pub fn parse_input(text: &str) -> Input {
    let text = text.trim();
    if text.is_empty() {
        return Input::AskAgain;
    }
    if !text.starts_with('/') {
        return Input::Message(text.to_string());
    }

    let (command, argument) = match text.split_once(char::is_whitespace) {
        Some((command, argument)) => (command, Some(argument.trim().to_string())),
        None => (text, None),
    };
    let argument = argument.filter(|a| !a.is_empty());

    match (command.to_ascii_lowercase().as_str(), argument) {
        ("/exit" | "/quit", _) => Input::Exit,
        ("/new", _) => Input::NewChat,
        ("/attach", Some(path)) => Input::Attach(PathBuf::from(path)),
        ("/regen", _) => Input::Regenerate,
        ("/mode", argument) => Input::Mode(argument),
        ("/settings", argument) => Input::Settings(argument),
        ("/history", _) => Input::History,
        ("/open", Some(id)) => Input::OpenChat(id),
        ("/log", _) => Input::ShowLog,
        // Unknown commands and commands missing their argument are sent as text
        _ => Input::Message(text.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_a_message() {
        assert_eq!(
            parse_input("  Tell me a joke  "),
            Input::Message("Tell me a joke".to_string())
        );
    }

    #[test]
    fn test_blank_input_asks_again() {
        assert_eq!(parse_input(""), Input::AskAgain);
        assert_eq!(parse_input("   \n "), Input::AskAgain);
    }

    #[test]
    fn test_commands() {
        assert_eq!(parse_input("/exit"), Input::Exit);
        assert_eq!(parse_input("/QUIT"), Input::Exit);
        assert_eq!(parse_input("/new"), Input::NewChat);
        assert_eq!(parse_input("/regen"), Input::Regenerate);
        assert_eq!(parse_input("/history"), Input::History);
        assert_eq!(parse_input("/log"), Input::ShowLog);
        assert_eq!(parse_input("/mode"), Input::Mode(None));
        assert_eq!(
            parse_input("/mode Think Deeper"),
            Input::Mode(Some("Think Deeper".to_string()))
        );
        assert_eq!(
            parse_input("/settings voice"),
            Input::Settings(Some("voice".to_string()))
        );
        assert_eq!(parse_input("/open 2"), Input::OpenChat("2".to_string()));
    }

    #[test]
    fn test_attach_keeps_path_with_spaces() {
        assert_eq!(
            parse_input("/attach ./my notes.txt"),
            Input::Attach(PathBuf::from("./my notes.txt"))
        );
    }

    #[test]
    fn test_incomplete_or_unknown_commands_are_messages() {
        assert_eq!(parse_input("/attach"), Input::Message("/attach".to_string()));
        assert_eq!(parse_input("/open"), Input::Message("/open".to_string()));
        assert_eq!(
            parse_input("/shrug ok"),
            Input::Message("/shrug ok".to_string())
        );
    }
}
