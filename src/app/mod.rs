use std::path::PathBuf;
use std::sync::mpsc;
use std::time::Instant;

use crate::app::constants::STATUS_READY;
use crate::catalog::Catalog;
use crate::commands::{DownloadCommands, UploadCommands, download_commands};
use crate::model::{FileEntry, PanelMode, PromptState, retarget_row};

pub(crate) mod constants;
mod handlers;
pub(crate) mod logging;
mod refresh;

pub(crate) struct App {
    pub(crate) address: String,
    pub(crate) port: u16,
    pub(crate) root: PathBuf,
    pub(crate) log_path: PathBuf,
    pub(crate) catalog: Catalog,
    pub(crate) entries: Vec<FileEntry>,
    pub(crate) selected: usize,
    pub(crate) panel: PanelMode,
    pub(crate) prompt: Option<PromptState>,
    pub(crate) download: Option<DownloadCommands>,
    pub(crate) upload: Option<UploadCommands>,
    pub(crate) status: String,
    pub(crate) scan_rx: Option<mpsc::Receiver<Vec<FileEntry>>>,
    pub(crate) last_refresh: Instant,
}

impl App {
    pub(crate) fn new(address: String, port: u16, root: PathBuf, log_path: PathBuf) -> Self {
        logging::prune_log_file(&log_path);
        let catalog = Catalog::new(&root);
        let mut app = Self {
            address,
            port,
            root,
            log_path,
            catalog,
            entries: vec![],
            selected: 0,
            panel: PanelMode::Download,
            prompt: None,
            download: None,
            upload: None,
            status: STATUS_READY.to_string(),
            scan_rx: None,
            last_refresh: Instant::now(),
        };
        app.set_status(STATUS_READY);
        app.start_scan();
        app
    }

    pub(crate) fn selected_name(&self) -> Option<&str> {
        self.entries.get(self.selected).map(|entry| entry.name.as_str())
    }

    pub(crate) fn select_previous(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
            self.refresh_commands();
        }
    }

    pub(crate) fn select_next(&mut self) {
        if self.selected + 1 < self.entries.len() {
            self.selected += 1;
            self.refresh_commands();
        }
    }

    /// Recompute the download view for the highlighted file. Deliberately a
    /// no-op while upload commands are on screen; the download view catches
    /// up when the user returns.
    pub(crate) fn refresh_commands(&mut self) {
        if !matches!(self.panel, PanelMode::Download) {
            return;
        }
        self.download = self
            .selected_name()
            .map(|name| download_commands(&self.address, self.port, name));
    }

    pub(crate) fn apply_snapshot(&mut self, entries: Vec<FileEntry>) {
        let previous = self.selected_name().map(str::to_string);
        self.selected = retarget_row(&entries, previous.as_deref());
        self.entries = entries;
        self.refresh_commands();
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::App;
    use std::path::PathBuf;
    use std::time::SystemTime;

    pub(crate) fn test_app(tag: &str) -> App {
        let mut base = std::env::temp_dir();
        let nanos = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        base.push(format!("tdash-app-{tag}-{nanos}"));
        std::fs::create_dir_all(&base).unwrap();
        let log_path = base.join("activity.log");
        App::new("10.10.14.5".to_string(), 8000, base, log_path)
    }

    pub(crate) fn cleanup(app: App) {
        let root: PathBuf = app.root.clone();
        drop(app);
        let _ = std::fs::remove_dir_all(root);
    }
}
