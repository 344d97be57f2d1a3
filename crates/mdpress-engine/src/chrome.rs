use std::path::{Path, PathBuf};
use std::time::Duration;

use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::page::PrintToPdfParams;
use futures::StreamExt;

use crate::error::ExportError;

/// Well-known browser install locations, scanned in order. Edit this table
/// to teach the engine about a non-standard install.
#[cfg(target_os = "windows")]
const BROWSER_CANDIDATES: &[&str] = &[
    r"C:\Program Files\Google\Chrome\Application\chrome.exe",
    r"C:\Program Files (x86)\Google\Chrome\Application\chrome.exe",
    r"C:\Program Files (x86)\Microsoft\Edge\Application\msedge.exe",
];

#[cfg(target_os = "macos")]
const BROWSER_CANDIDATES: &[&str] = &[
    "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
    "/Applications/Chromium.app/Contents/MacOS/Chromium",
    "/Applications/Microsoft Edge.app/Contents/MacOS/Microsoft Edge",
];

#[cfg(all(unix, not(target_os = "macos")))]
const BROWSER_CANDIDATES: &[&str] = &[
    "/usr/bin/google-chrome-stable",
    "/usr/bin/google-chrome",
    "/usr/bin/chromium",
    "/usr/bin/chromium-browser",
    "/snap/bin/chromium",
];

/// Let the in-page typesetter and web fonts settle before printing.
const RENDER_SETTLE: Duration = Duration::from_millis(500);

/// Pick the first candidate accepted by `exists`, preserving order.
///
/// Returns `None` when no candidate is accepted; the caller decides what the
/// absence of a selection means.
pub fn resolve_first_existing<'a, I, F>(candidates: I, exists: F) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
    F: Fn(&str) -> bool,
{
    candidates.into_iter().find(|candidate| exists(candidate))
}

/// Locate a Chromium-family browser executable on this machine.
///
/// `None` is not an error: the launcher then delegates to chromiumoxide's
/// own default detection.
pub fn find_chrome() -> Option<PathBuf> {
    resolve_first_existing(BROWSER_CANDIDATES.iter().copied(), |candidate| {
        Path::new(candidate).exists()
    })
    .map(PathBuf::from)
}

/// Load `url` in a headless browser and return the printed PDF bytes.
pub(crate) async fn print_to_pdf(
    chrome_path: Option<&Path>,
    url: &str,
) -> Result<Vec<u8>, ExportError> {
    let mut builder = BrowserConfig::builder();
    if let Some(path) = chrome_path {
        builder = builder.chrome_executable(path);
    }
    let config = builder.build().map_err(ExportError::BrowserConfig)?;

    tracing::info!("Launching headless browser for {}", url);
    let (mut browser, mut handler) = Browser::launch(config).await?;
    let event_loop = tokio::spawn(async move {
        while let Some(event) = handler.next().await {
            if event.is_err() {
                break;
            }
        }
    });

    let result = async {
        let page = browser.new_page(url).await?;
        page.wait_for_navigation().await?;
        tokio::time::sleep(RENDER_SETTLE).await;

        let params = PrintToPdfParams {
            print_background: Some(true),
            ..Default::default()
        };
        page.pdf(params).await
    }
    .await;

    let _ = browser.close().await;
    let _ = browser.wait().await;
    event_loop.abort();

    Ok(result?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(vec!["/a", "/b"], vec!["/b"], Some("/b"))]
    #[case(vec!["/a", "/b"], vec!["/a", "/b"], Some("/a"))]
    #[case(vec!["/a", "/b"], vec![], None)]
    #[case(vec![], vec!["/a"], None)]
    fn test_resolve_first_existing(
        #[case] candidates: Vec<&str>,
        #[case] existing: Vec<&str>,
        #[case] expected: Option<&str>,
    ) {
        let resolved =
            resolve_first_existing(candidates, |candidate| existing.contains(&candidate));
        assert_eq!(resolved, expected);
    }

    #[test]
    fn test_resolve_first_existing_is_order_preserving() {
        // Order comes from the candidate list, not from the predicate.
        let resolved = resolve_first_existing(vec!["/later", "/earlier"], |_| true);
        assert_eq!(resolved, Some("/later"));
    }

    #[test]
    fn test_candidate_table_is_well_formed() {
        assert!(!BROWSER_CANDIDATES.is_empty());
        assert!(BROWSER_CANDIDATES.iter().all(|candidate| !candidate.is_empty()));
    }

    #[test]
    fn test_find_chrome_only_selects_candidates() {
        if let Some(found) = find_chrome() {
            assert!(BROWSER_CANDIDATES.iter().any(|candidate| Path::new(candidate) == found));
        }
    }
}
