use std::fmt;

/// Stylesheet applied to the rendered document.
///
/// The CSS payloads are embedded so exports work offline and produce the
/// same PDF on every machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PreviewTheme {
    #[default]
    GithubLight,
    GithubDark,
    None,
}

impl PreviewTheme {
    pub fn css(&self) -> Option<&'static str> {
        match self {
            PreviewTheme::GithubLight => Some(GITHUB_LIGHT_CSS),
            PreviewTheme::GithubDark => Some(GITHUB_DARK_CSS),
            PreviewTheme::None => None,
        }
    }
}

impl fmt::Display for PreviewTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PreviewTheme::GithubLight => write!(f, "github-light"),
            PreviewTheme::GithubDark => write!(f, "github-dark"),
            PreviewTheme::None => write!(f, "none"),
        }
    }
}

/// Math typesetting backend included in the rendered document.
///
/// Typesetting runs inside the browser over the raw `$...$`/`$$...$$`
/// delimiters, so the Markdown renderer must leave math text untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MathRenderer {
    #[default]
    Katex,
    Mathjax,
    None,
}

impl MathRenderer {
    pub fn head_includes(&self) -> &'static str {
        match self {
            MathRenderer::Katex => KATEX_INCLUDES,
            MathRenderer::Mathjax => MATHJAX_INCLUDES,
            MathRenderer::None => "",
        }
    }
}

impl fmt::Display for MathRenderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MathRenderer::Katex => write!(f, "katex"),
            MathRenderer::Mathjax => write!(f, "mathjax"),
            MathRenderer::None => write!(f, "none"),
        }
    }
}

const KATEX_INCLUDES: &str = r#"<link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/katex@0.16.11/dist/katex.min.css">
<script defer src="https://cdn.jsdelivr.net/npm/katex@0.16.11/dist/katex.min.js"></script>
<script defer src="https://cdn.jsdelivr.net/npm/katex@0.16.11/dist/contrib/auto-render.min.js" onload="renderMathInElement(document.body, {delimiters: [{left: '$$', right: '$$', display: true}, {left: '$', right: '$', display: false}]});"></script>"#;

const MATHJAX_INCLUDES: &str = r#"<script>MathJax = {tex: {inlineMath: [['$', '$']], displayMath: [['$$', '$$']]}};</script>
<script defer src="https://cdn.jsdelivr.net/npm/mathjax@3/es5/tex-chtml.js"></script>"#;

const GITHUB_LIGHT_CSS: &str = r#"body {
  margin: 0 auto;
  padding: 2em 3em;
  max-width: 50em;
  color: #1f2328;
  background-color: #ffffff;
  font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", "Noto Sans", Helvetica, Arial, sans-serif;
  font-size: 16px;
  line-height: 1.5;
  word-wrap: break-word;
}
h1, h2, h3, h4, h5, h6 {
  margin-top: 24px;
  margin-bottom: 16px;
  font-weight: 600;
  line-height: 1.25;
}
h1 { font-size: 2em; padding-bottom: .3em; border-bottom: 1px solid #d1d9e0; }
h2 { font-size: 1.5em; padding-bottom: .3em; border-bottom: 1px solid #d1d9e0; }
h3 { font-size: 1.25em; }
h4 { font-size: 1em; }
a { color: #0969da; text-decoration: none; }
a:hover { text-decoration: underline; }
p, blockquote, ul, ol, dl, table, pre { margin-top: 0; margin-bottom: 16px; }
code, pre {
  font-family: ui-monospace, SFMono-Regular, "SF Mono", Menlo, Consolas, "Liberation Mono", monospace;
  font-size: 85%;
}
code {
  padding: .2em .4em;
  background-color: #818b981f;
  border-radius: 6px;
}
pre {
  padding: 16px;
  overflow: auto;
  line-height: 1.45;
  background-color: #f6f8fa;
  border-radius: 6px;
}
pre code { padding: 0; background-color: transparent; }
blockquote {
  padding: 0 1em;
  color: #59636e;
  border-left: .25em solid #d1d9e0;
}
table { border-spacing: 0; border-collapse: collapse; }
table th, table td { padding: 6px 13px; border: 1px solid #d1d9e0; }
table th { font-weight: 600; }
table tr:nth-child(2n) { background-color: #f6f8fa; }
img { max-width: 100%; }
hr { height: .25em; padding: 0; margin: 24px 0; background-color: #d1d9e0; border: 0; }
ul, ol { padding-left: 2em; }
li + li { margin-top: .25em; }
input[type="checkbox"] { margin-right: .5em; }
"#;

const GITHUB_DARK_CSS: &str = r#"body {
  margin: 0 auto;
  padding: 2em 3em;
  max-width: 50em;
  color: #f0f6fc;
  background-color: #0d1117;
  font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", "Noto Sans", Helvetica, Arial, sans-serif;
  font-size: 16px;
  line-height: 1.5;
  word-wrap: break-word;
}
h1, h2, h3, h4, h5, h6 {
  margin-top: 24px;
  margin-bottom: 16px;
  font-weight: 600;
  line-height: 1.25;
}
h1 { font-size: 2em; padding-bottom: .3em; border-bottom: 1px solid #3d444d; }
h2 { font-size: 1.5em; padding-bottom: .3em; border-bottom: 1px solid #3d444d; }
h3 { font-size: 1.25em; }
h4 { font-size: 1em; }
a { color: #4493f8; text-decoration: none; }
a:hover { text-decoration: underline; }
p, blockquote, ul, ol, dl, table, pre { margin-top: 0; margin-bottom: 16px; }
code, pre {
  font-family: ui-monospace, SFMono-Regular, "SF Mono", Menlo, Consolas, "Liberation Mono", monospace;
  font-size: 85%;
}
code {
  padding: .2em .4em;
  background-color: #656c7633;
  border-radius: 6px;
}
pre {
  padding: 16px;
  overflow: auto;
  line-height: 1.45;
  background-color: #151b23;
  border-radius: 6px;
}
pre code { padding: 0; background-color: transparent; }
blockquote {
  padding: 0 1em;
  color: #9198a1;
  border-left: .25em solid #3d444d;
}
table { border-spacing: 0; border-collapse: collapse; }
table th, table td { padding: 6px 13px; border: 1px solid #3d444d; }
table th { font-weight: 600; }
table tr:nth-child(2n) { background-color: #151b23; }
img { max-width: 100%; }
hr { height: .25em; padding: 0; margin: 24px 0; background-color: #3d444d; border: 0; }
ul, ol { padding-left: 2em; }
li + li { margin-top: .25em; }
input[type="checkbox"] { margin-right: .5em; }
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(PreviewTheme::GithubLight, true)]
    #[case(PreviewTheme::GithubDark, true)]
    #[case(PreviewTheme::None, false)]
    fn test_theme_css(#[case] theme: PreviewTheme, #[case] has_css: bool) {
        assert_eq!(theme.css().is_some(), has_css);
    }

    #[test]
    fn test_theme_css_payloads_differ() {
        assert_ne!(
            PreviewTheme::GithubLight.css().unwrap(),
            PreviewTheme::GithubDark.css().unwrap()
        );
    }

    #[rstest]
    #[case(MathRenderer::Katex, "katex")]
    #[case(MathRenderer::Mathjax, "mathjax")]
    fn test_math_includes(#[case] math: MathRenderer, #[case] needle: &str) {
        assert!(math.head_includes().to_lowercase().contains(needle));
    }

    #[test]
    fn test_math_none_includes_nothing() {
        assert!(MathRenderer::None.head_includes().is_empty());
    }

    #[rstest]
    #[case(PreviewTheme::GithubLight, "github-light")]
    #[case(PreviewTheme::GithubDark, "github-dark")]
    #[case(PreviewTheme::None, "none")]
    fn test_theme_display(#[case] theme: PreviewTheme, #[case] expected: &str) {
        assert_eq!(theme.to_string(), expected);
    }
}
