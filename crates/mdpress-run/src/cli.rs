use clap::Parser;
use colored::Colorize;
use miette::IntoDiagnostic;
use miette::miette;
use std::path::{Path, PathBuf};

use mdpress_engine::{ExportOptions, MathRenderer, Notebook, NotebookConfig, PreviewTheme};

#[derive(Parser, Debug, Default)]
#[command(name = "mdpress")]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(after_help = "# Examples:\n\n\
    ## To convert a file to PDF:\n\
    mdpress notes.md\n\n\
    ## To pick a theme and skip code chunks:\n\
    mdpress --theme github-dark --no-run-chunks notes.md\n\n\
    ## To open the PDF when the export finishes:\n\
    mdpress --open notes.md")]
#[command(
    about = "mdpress converts a Markdown file to PDF through a locally installed browser.",
    long_about = None
)]
pub struct Cli {
    /// Path to the Markdown file to convert
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Set the preview theme for the rendered document
    #[arg(long, value_enum, default_value_t)]
    theme: Theme,

    /// Set the math typesetting backend
    #[arg(long, value_enum, default_value_t)]
    math: Math,

    /// Skip executing code chunks marked with the cmd attribute
    #[arg(long, default_value_t = false)]
    no_run_chunks: bool,

    /// Open the generated PDF when the export finishes
    #[arg(long, default_value_t = false)]
    open: bool,

    /// Output to the specified file
    #[clap(short = 'o', long = "output", value_name = "FILE")]
    output_file: Option<PathBuf>,
}

#[derive(Clone, Debug, Default, clap::ValueEnum)]
enum Theme {
    #[default]
    GithubLight,
    GithubDark,
    None,
}

#[derive(Clone, Debug, Default, clap::ValueEnum)]
enum Math {
    #[default]
    Katex,
    Mathjax,
    None,
}

impl From<&Theme> for PreviewTheme {
    fn from(theme: &Theme) -> Self {
        match theme {
            Theme::GithubLight => PreviewTheme::GithubLight,
            Theme::GithubDark => PreviewTheme::GithubDark,
            Theme::None => PreviewTheme::None,
        }
    }
}

impl From<&Math> for MathRenderer {
    fn from(math: &Math) -> Self {
        match math {
            Math::Katex => MathRenderer::Katex,
            Math::Mathjax => MathRenderer::Mathjax,
            Math::None => MathRenderer::None,
        }
    }
}

impl Cli {
    pub fn run(&self) -> miette::Result<()> {
        tracing_subscriber::fmt::init();

        let file = match &self.file {
            Some(file) if !file.as_os_str().is_empty() => file,
            _ => return Err(miette!("specify the Markdown file to convert")),
        };

        let file_path = std::path::absolute(file).into_diagnostic()?;
        let notebook_dir = file_path
            .parent()
            .map(Path::to_path_buf)
            .ok_or_else(|| miette!("{} has no containing directory", file_path.display()))?;
        let file_name = file_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| miette!("{} has no file name", file_path.display()))?;

        println!("{} {}", "Converting".bold().cyan(), file_path.display());

        // Chosen once per invocation; never re-evaluated.
        let chrome_path = mdpress_engine::find_chrome();
        match &chrome_path {
            Some(path) => println!("{} {}", "Using browser".bold().cyan(), path.display()),
            None => println!(
                "{}",
                "No local browser found, falling back to the default detection".yellow()
            ),
        }

        let config = NotebookConfig {
            preview_theme: (&self.theme).into(),
            math: (&self.math).into(),
            chrome_path,
        };
        let options = ExportOptions {
            run_code_chunks: !self.no_run_chunks,
            open_after: self.open,
            output: self.output_file.clone(),
            ..Default::default()
        };

        println!("{}", "Rendering and exporting PDF...".bold().cyan());

        let pdf_path = tokio::runtime::Runtime::new()
            .into_diagnostic()?
            .block_on(async {
                let notebook = Notebook::init(&notebook_dir, config).into_diagnostic()?;
                let engine = notebook.engine_for(file_name.as_str());
                engine.export(options).await.into_diagnostic()
            })?;

        println!("{} {}", "Done!".bold().green(), pdf_path.display());

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Theme::GithubLight, PreviewTheme::GithubLight)]
    #[case(Theme::GithubDark, PreviewTheme::GithubDark)]
    #[case(Theme::None, PreviewTheme::None)]
    fn test_theme_mapping(#[case] theme: Theme, #[case] expected: PreviewTheme) {
        assert_eq!(PreviewTheme::from(&theme), expected);
    }

    #[rstest]
    #[case(Math::Katex, MathRenderer::Katex)]
    #[case(Math::Mathjax, MathRenderer::Mathjax)]
    #[case(Math::None, MathRenderer::None)]
    fn test_math_mapping(#[case] math: Math, #[case] expected: MathRenderer) {
        assert_eq!(MathRenderer::from(&math), expected);
    }

    #[test]
    fn test_cli_defaults_match_the_export_contract() {
        let cli = Cli::parse_from(["mdpress", "notes.md"]);
        assert!(!cli.no_run_chunks);
        assert!(!cli.open);
        assert!(cli.output_file.is_none());
        assert!(matches!(cli.theme, Theme::GithubLight));
        assert!(matches!(cli.math, Math::Katex));
    }
}
