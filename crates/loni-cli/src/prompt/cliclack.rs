use std::io::{self, Write};

use anyhow::Result;
use bat::WrappingMode;
use cliclack::{input, spinner};
use console::style;
use loni::models::message::Message;
use loni::models::role::Role;

use super::{parse_input, Input, Prompt, Theme, HELP};

pub struct CliclackPrompt {
    spinner: cliclack::ProgressBar,
    input_mode: InputMode,
    theme: Theme,
    status: String,
}

enum InputMode {
    Singleline,
    Multiline,
}

impl CliclackPrompt {
    pub fn new() -> Self {
        CliclackPrompt {
            spinner: spinner(),
            input_mode: InputMode::Singleline,
            theme: Theme::Dark,
            status: String::new(),
        }
    }
}

fn print(content: &str, theme: &str) {
    let printed = bat::PrettyPrinter::new()
        .input(bat::Input::from_bytes(content.as_bytes()))
        .theme(theme)
        .language("Markdown")
        .wrapping_mode(WrappingMode::Character)
        .print();
    if printed.is_err() {
        // Fall back to plain output if the highlighter can't render this
        println!("{}", content);
    }
}

fn print_header(message: &Message) {
    let time = message
        .created
        .with_timezone(&chrono::Local)
        .format("%H:%M:%S");
    let label = match message.role {
        Role::User => style("You").cyan().bold(),
        Role::Assistant => style("LONI").yellow().bold(),
    };
    println!("{} {}", label, style(time).dim());
}

impl Prompt for CliclackPrompt {
    fn render(&mut self, message: &Message) {
        print_header(message);
        print(message.text(), self.theme.bat_theme());
        println!();
        let _ = io::stdout().flush();
    }

    fn render_notice(&mut self, text: &str) {
        println!("{}", style(text).dim());
    }

    fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
    }

    fn show_busy(&mut self) {
        self.spinner = spinner();
        self.spinner.start("LONI is thinking...");
    }

    fn hide_busy(&mut self) {
        self.spinner.stop("");
    }

    fn get_input(&mut self) -> Result<Input> {
        let label = if self.status.is_empty() {
            "LONI ASSISTANT  [Help: /?]".to_string()
        } else {
            format!("LONI ASSISTANT  [{}]  [Help: /?]", self.status)
        };
        let mut input = input(label)
            .placeholder("Message LONI ASSISTANT...")
            .required(false);
        match self.input_mode {
            InputMode::Multiline => input = input.multiline(),
            InputMode::Singleline => (),
        }
        let message_text: String = input.interact()?;
        let message_text = message_text.trim();

        if message_text.eq_ignore_ascii_case("/m") {
            self.input_mode = InputMode::Multiline;
            return self.get_input();
        } else if message_text.eq_ignore_ascii_case("/s") {
            self.input_mode = InputMode::Singleline;
            return self.get_input();
        } else if message_text.eq_ignore_ascii_case("/t") {
            self.theme = match self.theme {
                Theme::Light => {
                    println!("Switching to Dark theme");
                    Theme::Dark
                }
                Theme::Dark => {
                    println!("Switching to Light theme");
                    Theme::Light
                }
            };
            return self.get_input();
        } else if message_text.eq_ignore_ascii_case("/?") {
            println!("{}", HELP);
            return self.get_input();
        }

        Ok(parse_input(message_text))
    }

    fn close(&self) {
        // No cleanup required
    }
}
