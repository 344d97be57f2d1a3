use std::path::PathBuf;

/// Errors raised while constructing a [`crate::Notebook`] session.
#[derive(Debug, thiserror::Error)]
pub enum NotebookError {
    #[error("notebook path is not a directory: {0}")]
    NotADirectory(PathBuf),
}

/// Errors raised by [`crate::MarkdownEngine::export`].
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to read {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("markdown rendering failed: {0}")]
    Render(String),
    #[error("no interpreter known for code chunk language `{0}`")]
    ChunkLanguage(String),
    #[error("failed to spawn `{program}` for a code chunk")]
    ChunkSpawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("code chunk `{program}` exited with status {status}: {stderr}")]
    ChunkFailed {
        program: String,
        status: String,
        stderr: String,
    },
    #[error("browser configuration rejected: {0}")]
    BrowserConfig(String),
    #[error("browser error: {0}")]
    Browser(#[from] chromiumoxide::error::CdpError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
