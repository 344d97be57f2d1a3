//! # mdpress-engine: browser-driven Markdown to PDF rendering
//!
//! This crate implements the rendering engine behind
//! [mdpress](https://github.com/harehare/mdpress). A [`Notebook`] session is
//! scoped to a directory so relative links and images resolve, hands out one
//! [`MarkdownEngine`] per file, and exports through a locally installed
//! Chromium-family browser driven over the DevTools protocol.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use mdpress_engine::{ExportOptions, Notebook, NotebookConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let notebook = Notebook::init("/docs", NotebookConfig::default())?;
//! let engine = notebook.engine_for("notes.md");
//! let pdf_path = engine.export(ExportOptions::default()).await?;
//! println!("wrote {}", pdf_path.display());
//! # Ok(())
//! # }
//! ```
//!
//! Browser discovery scans a fixed, ordered list of well-known install
//! locations and picks the first that exists ([`find_chrome`]); when none
//! exists the launcher falls back to chromiumoxide's own detection.

mod chrome;
mod chunk;
mod error;
mod html;
mod notebook;
mod theme;

pub use chrome::{find_chrome, resolve_first_existing};
pub use error::{ExportError, NotebookError};
pub use notebook::{ExportFormat, ExportOptions, MarkdownEngine, Notebook, NotebookConfig};
pub use theme::{MathRenderer, PreviewTheme};
