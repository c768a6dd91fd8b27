use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::Result;
use axum::Router;
use axum::body::Body;
use axum::extract::{Path as RequestPath, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use futures_util::StreamExt;
use thiserror::Error;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpListener;
use tokio_util::io::ReaderStream;
use tracing::debug;

use crate::model::UPLOADS_DIR;

struct ServerState {
    root: PathBuf,
}

#[derive(Debug, Error)]
enum WriteError {
    #[error("target name escapes the uploads directory")]
    InvalidName,
    #[error("request body failed: {0}")]
    Body(axum::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub(crate) fn router(root: PathBuf) -> Router {
    let state = Arc::new(ServerState { root });
    Router::new()
        .route("/{*name}", get(download).put(upload).post(upload))
        .with_state(state)
}

/// Serve forever on an already-bound listener. Binding happens in `main` so a
/// taken port is reported before any terminal setup.
pub(crate) async fn serve(listener: TcpListener, root: PathBuf) -> Result<()> {
    axum::serve(listener, router(root)).await?;
    Ok(())
}

async fn download(
    State(state): State<Arc<ServerState>>,
    RequestPath(name): RequestPath<String>,
) -> Response {
    let name = name.trim_start_matches('/');
    let Some((path, size)) = resolve_existing(&state.root, name).await else {
        return not_found();
    };
    match File::open(&path).await {
        Ok(file) => {
            debug!(name, size, "serving file");
            let stream = ReaderStream::new(file);
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, "application/octet-stream".to_string()),
                    (header::CONTENT_LENGTH, size.to_string()),
                ],
                Body::from_stream(stream),
            )
                .into_response()
        }
        Err(err) => {
            debug!(name, %err, "open failed");
            not_found()
        }
    }
}

/// `uploads/<name>` shadows `<root>/<name>`; both must be regular files.
async fn resolve_existing(root: &Path, name: &str) -> Option<(PathBuf, u64)> {
    for candidate in [root.join(UPLOADS_DIR).join(name), root.join(name)] {
        if let Ok(metadata) = tokio::fs::metadata(&candidate).await {
            if metadata.is_file() {
                return Some((candidate, metadata.len()));
            }
        }
    }
    None
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, "File not found.\n").into_response()
}

async fn upload(
    State(state): State<Arc<ServerState>>,
    RequestPath(name): RequestPath<String>,
    body: Body,
) -> Response {
    let name = name.trim_start_matches('/');
    match store_upload(&state.root, name, body).await {
        Ok(()) => {
            debug!(name, "stored upload");
            StatusCode::OK.into_response()
        }
        Err(WriteError::InvalidName) => {
            debug!(name, "rejected upload name");
            (StatusCode::BAD_REQUEST, "Invalid file name.\n").into_response()
        }
        Err(WriteError::Body(err)) => {
            debug!(name, %err, "upload body failed");
            StatusCode::BAD_REQUEST.into_response()
        }
        Err(WriteError::Io(err)) => {
            debug!(name, %err, "upload write failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Stream the body to a temp file next to its destination, then rename into
/// place, so a concurrent scan never observes a partial file under its final
/// name. Any failure removes the temp file.
async fn store_upload(root: &Path, name: &str, body: Body) -> Result<(), WriteError> {
    let relative = confined_relative_path(name).ok_or(WriteError::InvalidName)?;
    let final_path = root.join(UPLOADS_DIR).join(&relative);
    if let Some(parent) = final_path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    let temp_path = temp_sibling(&final_path);
    let result = match write_body(&temp_path, body).await {
        Ok(()) => tokio::fs::rename(&temp_path, &final_path)
            .await
            .map_err(WriteError::Io),
        Err(err) => Err(err),
    };
    if result.is_err() {
        let _ = tokio::fs::remove_file(&temp_path).await;
    }
    result
}

async fn write_body(path: &Path, body: Body) -> Result<(), WriteError> {
    let mut file = File::create(path).await?;
    let mut stream = body.into_data_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(WriteError::Body)?;
        file.write_all(&chunk).await?;
    }
    file.flush().await?;
    Ok(())
}

/// Keep only plain path components. Anything that could climb out of the
/// uploads subtree (`..`, absolute paths, drive prefixes) is rejected rather
/// than sanitized.
fn confined_relative_path(name: &str) -> Option<PathBuf> {
    let mut relative = PathBuf::new();
    for component in Path::new(name).components() {
        match component {
            Component::Normal(part) => relative.push(part),
            Component::CurDir => {}
            _ => return None,
        }
    }
    if relative.as_os_str().is_empty() {
        None
    } else {
        Some(relative)
    }
}

static TEMP_SEQ: AtomicU64 = AtomicU64::new(0);

fn temp_sibling(final_path: &Path) -> PathBuf {
    let seq = TEMP_SEQ.fetch_add(1, Ordering::Relaxed);
    let name = final_path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    final_path.with_file_name(format!(".{name}.{}.{seq}.part", std::process::id()))
}
