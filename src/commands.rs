//! Command synthesis for the dashboard panel. Pure string building, no I/O.

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DownloadCommands {
    pub(crate) url: String,
    pub(crate) wget: String,
    pub(crate) iwr_short: String,
    pub(crate) iwr_full: String,
    pub(crate) certutil: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct UploadCommands {
    pub(crate) url: String,
    pub(crate) curl_put: String,
    pub(crate) curl_post: String,
    pub(crate) wget_put: String,
    pub(crate) wget_post: String,
    pub(crate) ps_put: String,
    pub(crate) ps_post: String,
}

fn file_url(address: &str, port: u16, filename: &str) -> String {
    format!("http://{address}:{port}/{filename}")
}

/// Commands to fetch `filename` from this server. The request path keeps any
/// directory prefix (`uploads/...`); the local output name is the base name.
pub(crate) fn download_commands(address: &str, port: u16, filename: &str) -> DownloadCommands {
    let url = file_url(address, port, filename);
    let outfile = filename.rsplit('/').next().unwrap_or(filename);
    DownloadCommands {
        wget: format!("wget {url} -O {outfile}"),
        iwr_short: format!("iwr -uri {url} -Outfile {outfile}"),
        iwr_full: format!("Invoke-WebRequest -Uri {url} -Outfile {outfile}"),
        certutil: format!("certutil.exe -urlcache -split -f {url} {outfile}"),
        url,
    }
}

/// Commands to push `filename` to this server. The literal name is used both
/// as the local source and as the remote path component.
pub(crate) fn upload_commands(address: &str, port: u16, filename: &str) -> UploadCommands {
    let url = file_url(address, port, filename);
    UploadCommands {
        curl_put: format!("curl.exe -X PUT --upload-file {filename} {url}"),
        curl_post: format!("curl.exe -X POST --data-binary @{filename} {url}"),
        wget_put: format!("wget --method=PUT --body-file={filename} {url}"),
        wget_post: format!("wget --method=POST --body-file={filename} {url}"),
        ps_put: format!("Invoke-WebRequest -Uri {url} -Method PUT -InFile {filename}"),
        ps_post: format!("Invoke-WebRequest -Uri {url} -Method POST -InFile {filename}"),
        url,
    }
}
