use std::time::Duration;

pub(crate) const STATUS_READY: &str = "Ready";
pub(crate) const STATUS_REFRESHING: &str = "Refreshing";
pub(crate) const STATUS_UPLOAD_MODE: &str = "Upload commands shown, Esc to return";
pub(crate) const STATUS_DOWNLOAD_MODE: &str = "Download commands shown";

pub(crate) const REFRESH_INTERVAL: Duration = Duration::from_secs(1);

pub(crate) const LOG_TIMESTAMP_FORMAT: &str = "%m-%d %H:%M:%S";
pub(crate) const LOG_PARSE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
pub(crate) const LOG_SEPARATOR: &str = " | ";

pub(crate) const LOG_RETENTION_DAYS: i64 = 7;
pub(crate) const LOG_MAX_ENTRIES: usize = 10_000;
