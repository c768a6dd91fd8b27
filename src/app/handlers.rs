use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};

use crate::app::App;
use crate::app::constants::{STATUS_DOWNLOAD_MODE, STATUS_REFRESHING, STATUS_UPLOAD_MODE};
use crate::commands::upload_commands;
use crate::model::{PanelMode, PromptOutcome, PromptState};

impl App {
    /// Returns `Ok(true)` when the app should quit.
    pub(crate) fn handle_key(&mut self, key: KeyEvent) -> Result<bool> {
        if self.prompt.is_some() {
            if let Some(outcome) = self.handle_prompt_key(key) {
                self.apply_prompt_outcome(outcome);
            }
            return Ok(false);
        }
        match key.code {
            KeyCode::Char('q') => return Ok(true),
            KeyCode::Char('r') => {
                self.set_status(STATUS_REFRESHING);
                self.start_scan();
            }
            KeyCode::Char('u') => {
                self.prompt = Some(PromptState::default());
            }
            KeyCode::Esc => {
                if matches!(self.panel, PanelMode::Upload(_)) {
                    self.panel = PanelMode::Download;
                    self.upload = None;
                    // Recomputed, not restored from cache, so any refresh that
                    // landed while upload commands were shown is reflected.
                    self.refresh_commands();
                    self.set_status(STATUS_DOWNLOAD_MODE);
                }
            }
            KeyCode::Up | KeyCode::Char('k') => self.select_previous(),
            KeyCode::Down | KeyCode::Char('j') => self.select_next(),
            _ => {}
        }
        Ok(false)
    }

    /// Key handling for the filename prompt. Editing keys mutate the buffer
    /// and return `None`; Enter and Esc resolve the prompt to an outcome.
    fn handle_prompt_key(&mut self, key: KeyEvent) -> Option<PromptOutcome> {
        let prompt = self.prompt.as_mut()?;
        match key.code {
            KeyCode::Esc => Some(PromptOutcome::Cancelled),
            KeyCode::Enter => {
                let value = prompt.buffer.trim().to_string();
                if value.is_empty() {
                    Some(PromptOutcome::Cancelled)
                } else {
                    Some(PromptOutcome::Committed(value))
                }
            }
            KeyCode::Char(c) => {
                prompt.buffer.push(c);
                None
            }
            KeyCode::Backspace => {
                prompt.buffer.pop();
                None
            }
            _ => None,
        }
    }

    fn apply_prompt_outcome(&mut self, outcome: PromptOutcome) {
        self.prompt = None;
        match outcome {
            PromptOutcome::Committed(name) => {
                self.upload = Some(upload_commands(&self.address, self.port, &name));
                self.panel = PanelMode::Upload(name);
                self.set_status(STATUS_UPLOAD_MODE);
            }
            PromptOutcome::Cancelled => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::test_support::{cleanup, test_app};
    use crate::model::{ContentHash, FileEntry};
    use crossterm::event::{KeyCode, KeyEvent};
    use std::time::{Duration, SystemTime};

    fn press(app: &mut App, code: KeyCode) -> bool {
        app.handle_key(KeyEvent::from(code)).unwrap()
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn entry(name: &str) -> FileEntry {
        FileEntry {
            name: name.to_string(),
            size: 1,
            modified: SystemTime::UNIX_EPOCH + Duration::from_secs(1),
            hash: ContentHash::Sha256("00".to_string()),
        }
    }

    #[test]
    fn quit_key_terminates() {
        let mut app = test_app("quit");
        assert!(press(&mut app, KeyCode::Char('q')));
        cleanup(app);
    }

    #[test]
    fn committed_prompt_enters_upload_mode() {
        let mut app = test_app("commit");
        press(&mut app, KeyCode::Char('u'));
        assert!(app.prompt.is_some());

        type_text(&mut app, "payload.bin");
        press(&mut app, KeyCode::Enter);

        assert!(app.prompt.is_none());
        assert_eq!(app.panel, PanelMode::Upload("payload.bin".to_string()));
        let upload = app.upload.as_ref().unwrap();
        assert_eq!(upload.url, "http://10.10.14.5:8000/payload.bin");
        cleanup(app);
    }

    #[test]
    fn empty_prompt_submission_changes_nothing() {
        let mut app = test_app("empty");
        press(&mut app, KeyCode::Char('u'));
        type_text(&mut app, "   ");
        press(&mut app, KeyCode::Enter);

        assert!(app.prompt.is_none());
        assert_eq!(app.panel, PanelMode::Download);
        assert!(app.upload.is_none());
        cleanup(app);
    }

    #[test]
    fn cancelled_prompt_changes_nothing() {
        let mut app = test_app("cancel");
        press(&mut app, KeyCode::Char('u'));
        type_text(&mut app, "half-typed");
        press(&mut app, KeyCode::Esc);

        assert!(app.prompt.is_none());
        assert_eq!(app.panel, PanelMode::Download);
        cleanup(app);
    }

    #[test]
    fn backspace_edits_prompt_buffer() {
        let mut app = test_app("backspace");
        press(&mut app, KeyCode::Char('u'));
        type_text(&mut app, "ab");
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.prompt.as_ref().unwrap().buffer, "a");
        cleanup(app);
    }

    #[test]
    fn escape_returns_to_download_view() {
        let mut app = test_app("escape");
        app.apply_snapshot(vec![entry("tool.sh")]);

        press(&mut app, KeyCode::Char('u'));
        type_text(&mut app, "up.bin");
        press(&mut app, KeyCode::Enter);
        assert!(matches!(app.panel, PanelMode::Upload(_)));

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.panel, PanelMode::Download);
        assert!(app.upload.is_none());
        let commands = app.download.as_ref().unwrap();
        assert_eq!(commands.url, "http://10.10.14.5:8000/tool.sh");
        cleanup(app);
    }

    #[test]
    fn escape_outside_upload_mode_is_ignored() {
        let mut app = test_app("noop");
        app.apply_snapshot(vec![entry("a.txt")]);
        let before = app.download.clone();
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.panel, PanelMode::Download);
        assert_eq!(app.download, before);
        cleanup(app);
    }

    #[test]
    fn navigation_updates_download_commands() {
        let mut app = test_app("navcmd");
        app.apply_snapshot(vec![entry("first.txt"), entry("second.txt")]);
        press(&mut app, KeyCode::Down);
        let commands = app.download.as_ref().unwrap();
        assert_eq!(commands.url, "http://10.10.14.5:8000/second.txt");
        press(&mut app, KeyCode::Up);
        let commands = app.download.as_ref().unwrap();
        assert_eq!(commands.url, "http://10.10.14.5:8000/first.txt");
        cleanup(app);
    }
}
