use markdown::{CompileOptions, Constructs, Options, ParseOptions};

use crate::error::ExportError;
use crate::theme::{MathRenderer, PreviewTheme};

/// Render a Markdown source into a standalone HTML document ready for
/// browser-side printing.
pub(crate) fn render_document(
    source: &str,
    title: &str,
    theme: PreviewTheme,
    math: MathRenderer,
) -> Result<String, ExportError> {
    let body = markdown::to_html_with_options(source, &options())
        .map_err(|message| ExportError::Render(message.to_string()))?;

    let css = theme
        .css()
        .map(|css| format!("<style>\n{}</style>", css))
        .unwrap_or_default();

    Ok(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
{css}
{math}
</head>
<body class="markdown-body">
{body}
</body>
</html>
"#,
        title = escape_text(title),
        css = css,
        math = math.head_includes(),
        body = body,
    ))
}

fn options() -> Options {
    Options {
        parse: ParseOptions {
            gfm_strikethrough_single_tilde: true,
            math_text_single_dollar: true,
            mdx_expression_parse: None,
            mdx_esm_parse: None,
            constructs: Constructs {
                attention: true,
                autolink: true,
                block_quote: true,
                character_escape: true,
                character_reference: true,
                code_indented: true,
                code_fenced: true,
                code_text: true,
                definition: true,
                frontmatter: true,
                gfm_autolink_literal: true,
                gfm_label_start_footnote: true,
                gfm_footnote_definition: true,
                gfm_strikethrough: true,
                gfm_table: true,
                gfm_task_list_item: true,
                hard_break_escape: true,
                hard_break_trailing: true,
                heading_atx: true,
                heading_setext: true,
                html_flow: true,
                html_text: true,
                label_start_image: true,
                label_start_link: true,
                label_end: true,
                list_item: true,
                // Math delimiters must survive into the HTML as plain text
                // so the in-browser typesetter can pick them up.
                math_flow: false,
                math_text: false,
                mdx_esm: false,
                mdx_expression_flow: false,
                mdx_expression_text: false,
                mdx_jsx_flow: false,
                mdx_jsx_text: false,
                thematic_break: true,
            },
        },
        compile: CompileOptions {
            allow_dangerous_html: true,
            ..CompileOptions::default()
        },
    }
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}
