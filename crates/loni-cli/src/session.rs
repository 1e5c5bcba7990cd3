use anyhow::Result;
use std::path::Path;
use std::time::Duration;
use strum::IntoEnumIterator;

use crate::prompt::{Input, Prompt};

use loni::attachment::{Attachment, ACKNOWLEDGEMENT_DELAY};
use loni::chat_log::ChatLog;
use loni::conversation::ConversationStore;
use loni::dispatch::Dispatcher;
use loni::history;
use loni::settings::{Mode, Settings, VoiceType};

pub struct Session<'a> {
    dispatcher: Dispatcher,
    prompt: Box<dyn Prompt + 'a>,
    conversation: ConversationStore,
    settings: Settings,
    chat_log: Option<ChatLog>,
    acknowledgement_delay: Duration,
}

impl<'a> Session<'a> {
    pub fn new(dispatcher: Dispatcher, prompt: Box<dyn Prompt + 'a>) -> Self {
        Session {
            dispatcher,
            prompt,
            conversation: ConversationStore::new(),
            settings: Settings::default(),
            chat_log: None,
            acknowledgement_delay: ACKNOWLEDGEMENT_DELAY,
        }
    }

    /// Only used to report the log location; the dispatcher does the writing
    pub fn with_chat_log(mut self, chat_log: Option<ChatLog>) -> Self {
        self.chat_log = chat_log;
        self
    }

    pub fn conversation(&self) -> &ConversationStore {
        &self.conversation
    }

    pub async fn start(&mut self) -> Result<()> {
        self.setup_session();

        loop {
            let input = self.prompt.get_input()?;
            match input {
                Input::Exit => break,
                input => self.handle_input(input).await,
            }
        }

        self.close_session();
        Ok(())
    }

    pub async fn headless_start(&mut self, initial_message: String) -> Result<()> {
        self.send(initial_message).await;
        self.prompt.close();
        Ok(())
    }

    async fn handle_input(&mut self, input: Input) {
        match input {
            Input::AskAgain | Input::Exit => {}
            Input::Message(text) => self.send(text).await,
            Input::NewChat => self.new_chat(),
            Input::Attach(path) => self.attach(&path).await,
            Input::Regenerate => self.regenerate().await,
            Input::Mode(choice) => self.select_mode(choice.as_deref()),
            Input::Settings(change) => self.change_settings(change.as_deref()),
            Input::History => self.show_history(),
            Input::OpenChat(id) => self.open_chat(&id),
            Input::ShowLog => self.show_log(),
        }
    }

    async fn send(&mut self, text: String) {
        if text.trim().is_empty() {
            self.prompt.render_notice("Nothing to send.");
            return;
        }

        let user_message = self.conversation.push_user(text).clone();
        self.prompt.render(&user_message);

        self.prompt.show_busy();
        let outcome = self.dispatcher.dispatch(user_message.text()).await;
        self.prompt.hide_busy();

        let reply = self.conversation.push_assistant(outcome.text()).clone();
        self.prompt.render(&reply);
    }

    async fn regenerate(&mut self) {
        match self.conversation.last_user_prompt().map(String::from) {
            Some(prompt) => self.send(prompt).await,
            None => self.prompt.render_notice("Nothing to regenerate yet."),
        }
    }

    async fn attach(&mut self, path: &Path) {
        let attachment = match Attachment::from_path(path) {
            Ok(attachment) => attachment,
            Err(e) => {
                self.prompt.render_notice(&format!("{:#}", e));
                return;
            }
        };

        let notice = self.conversation.push_user(attachment.user_notice()).clone();
        self.prompt.render(&notice);

        self.prompt.show_busy();
        tokio::time::sleep(self.acknowledgement_delay).await;
        self.prompt.hide_busy();

        let acknowledgement = self
            .conversation
            .push_assistant(attachment.acknowledgement())
            .clone();
        self.prompt.render(&acknowledgement);
    }

    fn new_chat(&mut self) {
        self.conversation.reset();
        self.prompt.render_notice("Started a new chat.");
    }

    fn select_mode(&mut self, choice: Option<&str>) {
        let Some(choice) = choice else {
            for (i, mode) in Mode::iter().enumerate() {
                let marker = if mode == self.settings.mode { "*" } else { " " };
                self.prompt.render_notice(&format!(
                    "{} {}. {} - {}",
                    marker,
                    i + 1,
                    mode,
                    mode.description()
                ));
            }
            return;
        };

        match Mode::parse(choice) {
            Some(mode) => {
                self.settings.mode = mode;
                self.prompt.set_status(&format!("Mode: {}", mode));
                self.prompt.render_notice(&format!("Mode: {}", mode));
            }
            None => self
                .prompt
                .render_notice(&format!("Unknown mode: {}", choice)),
        }
    }

    fn change_settings(&mut self, change: Option<&str>) {
        if let Some(change) = change {
            let (key, value) = match change.split_once(char::is_whitespace) {
                Some((key, value)) => (key, Some(value.trim())),
                None => (change, None),
            };
            match (key.to_ascii_lowercase().as_str(), value) {
                ("voice", _) => {
                    self.settings.toggle_voice();
                }
                ("memory", _) => {
                    self.settings.toggle_memory();
                }
                ("sharing", _) => {
                    self.settings.toggle_data_sharing();
                }
                ("voice-type", Some(value)) => match VoiceType::parse(value) {
                    Some(voice) => self.settings.voice_type = voice,
                    None => {
                        self.prompt
                            .render_notice(&format!("Unknown voice: {}", value));
                        return;
                    }
                },
                ("language", Some(value)) => self.settings.set_language(value),
                _ => {
                    self.prompt
                        .render_notice(&format!("Unknown setting: {}", change));
                    return;
                }
            }
            self.settings.save();
        }

        self.prompt.render_notice("Settings");
        self.prompt.render_notice("  Account: Elite User (Sovereign Access)");
        for (name, value) in self.settings.summary() {
            self.prompt.render_notice(&format!("  {}: {}", name, value));
        }
    }

    fn show_history(&mut self) {
        self.prompt.render_notice("Recent");
        for chat in history::recent_chats() {
            self.prompt.render_notice(&format!(
                "  {}. {} ({})",
                chat.id, chat.title, chat.timestamp
            ));
        }
    }

    fn open_chat(&mut self, id: &str) {
        match history::find_chat(id) {
            Some(chat) => self.prompt.render_notice(&format!(
                "Selected \"{}\". Past chats are not stored, so there is nothing to load.",
                chat.title
            )),
            None => self.prompt.render_notice(&format!("No chat with id {}", id)),
        }
    }

    fn show_log(&mut self) {
        let notice = match &self.chat_log {
            Some(chat_log) => match chat_log.entries() {
                Ok(entries) => format!(
                    "{} logged exchanges in {}",
                    entries.len(),
                    chat_log.json_path().display()
                ),
                Err(e) => format!("Could not read {}: {}", chat_log.json_path().display(), e),
            },
            None => "Chat logging is disabled.".to_string(),
        };
        self.prompt.render_notice(&notice);
    }

    fn setup_session(&mut self) {
        self.prompt.render_notice(&format!(
            "Models: {}",
            self.dispatcher.candidates().join(", ")
        ));
        if let Some(chat_log) = &self.chat_log {
            let notice = format!("Logging replies to {}", chat_log.dir().display());
            self.prompt.render_notice(&notice);
        }
        self.prompt.set_status(&format!("Mode: {}", self.settings.mode));
        self.prompt.loni_ready();
    }

    fn close_session(&mut self) {
        self.prompt.render_notice("Closing session.");
        self.prompt.close();
    }
}
