use std::path::Path;
use std::process::Stdio;

use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::error::ExportError;

/// Classification of a fenced code block's info string.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Fence {
    /// A code chunk marked with a `cmd` attribute, to be executed with
    /// `program` reading the chunk body from stdin.
    Executable { program: String },
    Plain,
}

/// Parse a fence info string such as `bash {cmd}`, `{.python cmd}` or
/// `python {cmd=python3}`.
pub(crate) fn classify_fence(info: &str) -> Result<Fence, ExportError> {
    let (Some(open), Some(close)) = (info.find('{'), info.rfind('}')) else {
        return Ok(Fence::Plain);
    };
    if close < open {
        return Ok(Fence::Plain);
    }

    let mut language = info[..open].trim().to_string();
    let mut cmd = None;

    for attribute in info[open + 1..close].split_whitespace() {
        if let Some(class) = attribute.strip_prefix('.') {
            if language.is_empty() {
                language = class.to_string();
            }
        } else if attribute == "cmd" {
            cmd = Some(None);
        } else if let Some(program) = attribute.strip_prefix("cmd=") {
            cmd = Some(Some(program.to_string()));
        }
    }

    match cmd {
        None => Ok(Fence::Plain),
        Some(Some(program)) => Ok(Fence::Executable { program }),
        Some(None) => interpreter_for(&language)
            .map(|program| Fence::Executable {
                program: program.to_string(),
            })
            .ok_or(ExportError::ChunkLanguage(language)),
    }
}

fn interpreter_for(language: &str) -> Option<&'static str> {
    match language {
        "bash" => Some("bash"),
        "sh" | "shell" => Some("sh"),
        "zsh" => Some("zsh"),
        "python" | "py" => Some("python3"),
        "javascript" | "js" | "node" => Some("node"),
        "ruby" | "rb" => Some("ruby"),
        _ => None,
    }
}

/// Execute every `cmd`-marked chunk in `source`, in document order, and
/// splice each chunk's stdout after it as a fenced `output` block.
///
/// Chunks run in `dir` so relative paths in the document keep working. The
/// first failing chunk aborts the export.
pub(crate) async fn run_all(source: &str, dir: &Path) -> Result<String, ExportError> {
    let mut out: Vec<String> = Vec::new();
    let mut open_fence: Option<(usize, Fence)> = None;
    let mut body: Vec<String> = Vec::new();

    for line in source.lines() {
        match &open_fence {
            None => {
                let backticks = line.chars().take_while(|c| *c == '`').count();
                if backticks >= 3 {
                    let fence = classify_fence(line[backticks..].trim())?;
                    open_fence = Some((backticks, fence));
                    body.clear();
                }
                out.push(line.to_string());
            }
            Some((open_len, fence)) => {
                let backticks = line.chars().take_while(|c| *c == '`').count();
                let closes = backticks >= *open_len && line[backticks..].trim().is_empty();
                if !closes {
                    body.push(line.to_string());
                    out.push(line.to_string());
                    continue;
                }

                out.push(line.to_string());
                if let Fence::Executable { program } = fence {
                    tracing::info!("Running code chunk with `{}`", program);
                    let stdout = run_chunk(program, &body.join("\n"), dir).await?;
                    out.push(String::new());
                    out.push("```output".to_string());
                    out.push(stdout.trim_end_matches('\n').to_string());
                    out.push("```".to_string());
                }
                open_fence = None;
            }
        }
    }

    let mut result = out.join("\n");
    result.push('\n');
    Ok(result)
}

async fn run_chunk(program: &str, body: &str, dir: &Path) -> Result<String, ExportError> {
    let mut child = Command::new(program)
        .current_dir(dir)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|source| ExportError::ChunkSpawn {
            program: program.to_string(),
            source,
        })?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(body.as_bytes()).await?;
    }

    let output = child.wait_with_output().await?;
    if !output.status.success() {
        return Err(ExportError::ChunkFailed {
            program: program.to_string(),
            status: output.status.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("bash {cmd}", Fence::Executable { program: "bash".to_string() })]
    #[case("{.python cmd}", Fence::Executable { program: "python3".to_string() })]
    #[case("python {cmd=python3}", Fence::Executable { program: "python3".to_string() })]
    #[case("js {cmd}", Fence::Executable { program: "node".to_string() })]
    #[case("rust", Fence::Plain)]
    #[case("", Fence::Plain)]
    #[case("python {hide}", Fence::Plain)]
    #[case("} badly nested {", Fence::Plain)]
    fn test_classify_fence(#[case] info: &str, #[case] expected: Fence) {
        assert_eq!(classify_fence(info).unwrap(), expected);
    }

    #[test]
    fn test_classify_fence_unknown_language() {
        let err = classify_fence("brainfuck {cmd}").unwrap_err();
        assert!(matches!(err, ExportError::ChunkLanguage(language) if language == "brainfuck"));
    }

    #[rstest]
    #[case("bash", Some("bash"))]
    #[case("py", Some("python3"))]
    #[case("javascript", Some("node"))]
    #[case("cobol", None)]
    fn test_interpreter_for(#[case] language: &str, #[case] expected: Option<&str>) {
        assert_eq!(interpreter_for(language), expected);
    }

    #[tokio::test]
    async fn test_run_all_without_chunks_is_passthrough() {
        let source = "# Title\n\n```rust\nfn main() {}\n```\n";
        let result = run_all(source, Path::new(".")).await.unwrap();
        assert_eq!(result, source);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_run_all_splices_chunk_output() {
        let source = "```sh {cmd}\necho hello\n```\n";
        let result = run_all(source, Path::new(".")).await.unwrap();
        assert!(result.contains("```output\nhello\n```"));
        // The original chunk is kept in front of its output.
        assert!(result.starts_with("```sh {cmd}\necho hello\n```"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_run_all_failing_chunk_is_fatal() {
        let source = "```sh {cmd}\nexit 3\n```\n";
        let err = run_all(source, Path::new(".")).await.unwrap_err();
        assert!(matches!(err, ExportError::ChunkFailed { .. }));
    }
}
