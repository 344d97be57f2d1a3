use std::path::{Path, PathBuf};

use crate::chrome;
use crate::chunk;
use crate::error::{ExportError, NotebookError};
use crate::html;
use crate::theme::{MathRenderer, PreviewTheme};

/// Engine configuration, fixed for the lifetime of a [`Notebook`] session.
///
/// A `chrome_path` of `None` delegates browser resolution to the launcher's
/// own default detection.
#[derive(Debug, Clone, Default)]
pub struct NotebookConfig {
    pub preview_theme: PreviewTheme,
    pub math: MathRenderer,
    pub chrome_path: Option<PathBuf>,
}

/// A rendering session scoped to one directory.
///
/// Rendered documents are written into this directory so relative images
/// and links in the Markdown resolve during printing.
#[derive(Debug)]
pub struct Notebook {
    dir: PathBuf,
    config: NotebookConfig,
}

impl Notebook {
    pub fn init(dir: impl Into<PathBuf>, config: NotebookConfig) -> Result<Self, NotebookError> {
        let dir = dir.into();
        if !dir.is_dir() {
            return Err(NotebookError::NotADirectory(dir));
        }

        tracing::info!(
            "Notebook session initialized for {} (theme: {}, math: {})",
            dir.display(),
            config.preview_theme,
            config.math
        );
        Ok(Self { dir, config })
    }

    /// Per-file rendering handle. No I/O happens here; the file is read at
    /// export time.
    pub fn engine_for(&self, file_name: impl Into<String>) -> MarkdownEngine<'_> {
        MarkdownEngine {
            notebook: self,
            file_name: file_name.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Pdf,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Pdf => "pdf",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub file_type: ExportFormat,
    pub run_code_chunks: bool,
    pub open_after: bool,
    /// Defaults to the source path with a `.pdf` extension.
    pub output: Option<PathBuf>,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            file_type: ExportFormat::Pdf,
            run_code_chunks: true,
            open_after: false,
            output: None,
        }
    }
}

/// Rendering handle for a single file inside a [`Notebook`] session.
#[derive(Debug)]
pub struct MarkdownEngine<'a> {
    notebook: &'a Notebook,
    file_name: String,
}

impl MarkdownEngine<'_> {
    /// Render the file and print it to PDF through a headless browser.
    ///
    /// Returns the path of the generated PDF. Every failure is terminal;
    /// nothing is retried and no partial output is reported as success.
    pub async fn export(&self, options: ExportOptions) -> Result<PathBuf, ExportError> {
        let source_path = self.notebook.dir.join(&self.file_name);
        let source =
            tokio::fs::read_to_string(&source_path)
                .await
                .map_err(|source| ExportError::Read {
                    path: source_path.clone(),
                    source,
                })?;

        let source = if options.run_code_chunks {
            chunk::run_all(&source, &self.notebook.dir).await?
        } else {
            source
        };

        let title = source_path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.file_name.clone());
        let document = html::render_document(
            &source,
            &title,
            self.notebook.config.preview_theme,
            self.notebook.config.math,
        )?;

        // The intermediate HTML lives next to the source so file:// loads
        // resolve relative assets; it is removed on every outcome.
        let html_path = self
            .notebook
            .dir
            .join(format!(".{}.mdpress.{}.html", title, std::process::id()));
        tokio::fs::write(&html_path, &document).await?;

        let printed = chrome::print_to_pdf(
            self.notebook.config.chrome_path.as_deref(),
            &file_url(&html_path),
        )
        .await;
        let _ = tokio::fs::remove_file(&html_path).await;
        let bytes = printed?;

        let output_path = options
            .output
            .unwrap_or_else(|| source_path.with_extension(options.file_type.extension()));
        tokio::fs::write(&output_path, &bytes).await?;
        tracing::info!(
            "Exported {} ({} bytes)",
            output_path.display(),
            bytes.len()
        );

        if options.open_after {
            open_with_platform_opener(&output_path)?;
        }

        Ok(output_path)
    }
}

fn file_url(path: &Path) -> String {
    let path = path.display().to_string().replace('\\', "/");
    if path.starts_with('/') {
        format!("file://{}", path)
    } else {
        format!("file:///{}", path)
    }
}

fn open_with_platform_opener(path: &Path) -> Result<(), ExportError> {
    #[cfg(target_os = "macos")]
    let program = "open";
    #[cfg(target_os = "windows")]
    let program = "explorer";
    #[cfg(all(unix, not(target_os = "macos")))]
    let program = "xdg-open";

    std::process::Command::new(program).arg(path).spawn()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_init_rejects_missing_directory() {
        let err = Notebook::init("/no/such/notebook/dir", NotebookConfig::default()).unwrap_err();
        assert!(matches!(err, NotebookError::NotADirectory(_)));
    }

    #[test]
    fn test_init_rejects_plain_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let file = temp_dir.path().join("notes.md");
        std::fs::write(&file, "# hi").unwrap();

        let err = Notebook::init(&file, NotebookConfig::default()).unwrap_err();
        assert!(matches!(err, NotebookError::NotADirectory(path) if path == file));
    }

    #[test]
    fn test_engine_for_keeps_the_file_name() {
        let temp_dir = tempfile::tempdir().unwrap();
        let notebook = Notebook::init(temp_dir.path(), NotebookConfig::default()).unwrap();
        let engine = notebook.engine_for("notes.md");
        assert_eq!(engine.file_name, "notes.md");
    }

    #[test]
    fn test_export_options_defaults() {
        let options = ExportOptions::default();
        assert_eq!(options.file_type, ExportFormat::Pdf);
        assert!(options.run_code_chunks);
        assert!(!options.open_after);
        assert!(options.output.is_none());
    }

    #[tokio::test]
    async fn test_export_missing_file_fails_before_the_browser() {
        let temp_dir = tempfile::tempdir().unwrap();
        let notebook = Notebook::init(temp_dir.path(), NotebookConfig::default()).unwrap();

        let err = notebook
            .engine_for("missing.md")
            .export(ExportOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ExportError::Read { .. }));
    }

    #[rstest]
    #[case("/docs/notes.html", "file:///docs/notes.html")]
    #[case(r"C:\docs\notes.html", "file:///C:/docs/notes.html")]
    fn test_file_url(#[case] path: &str, #[case] expected: &str) {
        assert_eq!(file_url(Path::new(path)), expected);
    }
}
