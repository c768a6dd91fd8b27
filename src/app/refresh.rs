use std::sync::mpsc;
use std::time::Instant;

use crate::app::App;
use crate::app::constants::REFRESH_INTERVAL;

impl App {
    /// Kick a scan on a worker thread. Hashing a large upload must not stall
    /// the render loop, so the snapshot comes back over a channel and is
    /// applied by `poll_scan`. At most one scan runs at a time.
    pub(crate) fn start_scan(&mut self) {
        if self.scan_rx.is_some() {
            return;
        }
        let catalog = self.catalog.clone();
        let (tx, rx) = mpsc::channel();
        std::thread::spawn(move || {
            let _ = tx.send(catalog.scan());
        });
        self.scan_rx = Some(rx);
    }

    pub(crate) fn poll_scan(&mut self) {
        let Some(rx) = self.scan_rx.take() else {
            return;
        };
        match rx.try_recv() {
            Ok(entries) => self.apply_snapshot(entries),
            Err(mpsc::TryRecvError::Empty) => self.scan_rx = Some(rx),
            Err(mpsc::TryRecvError::Disconnected) => {}
        }
    }

    /// Called every loop iteration: re-scan on the fixed cadence and drain
    /// any finished scan.
    pub(crate) fn tick(&mut self) {
        if self.last_refresh.elapsed() >= REFRESH_INTERVAL {
            self.last_refresh = Instant::now();
            self.start_scan();
        }
        self.poll_scan();
    }
}

#[cfg(test)]
mod tests {
    use crate::app::test_support::{cleanup, test_app};
    use std::time::{Duration, Instant};

    #[test]
    fn scan_results_arrive_through_polling() {
        let mut app = test_app("scan");
        std::fs::write(app.root.join("present.txt"), b"data").unwrap();
        app.start_scan();

        let deadline = Instant::now() + Duration::from_secs(5);
        while app.entries.is_empty() && Instant::now() < deadline {
            app.poll_scan();
            app.start_scan();
            std::thread::sleep(Duration::from_millis(10));
        }
        assert!(app.entries.iter().any(|entry| entry.name == "present.txt"));
        cleanup(app);
    }

    #[test]
    fn only_one_scan_runs_at_a_time() {
        let mut app = test_app("single");
        app.start_scan();
        assert!(app.scan_rx.is_some());
        // A second request while one is in flight is a no-op.
        app.start_scan();
        assert!(app.scan_rx.is_some());
        cleanup(app);
    }
}
