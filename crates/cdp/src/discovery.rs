//! Target discovery via the browser's HTTP debugging endpoint.
//!
//! A browser started with `--remote-debugging-port` serves a JSON list of
//! debuggable targets at `http://127.0.0.1:{port}/json`. We want the page
//! target whose URL matches the configured filter.

use serde::Deserialize;
use tabclick_core::{Error, Result};
use tracing::debug;

/// One entry from the `/json` target list.
#[derive(Debug, Clone, Deserialize)]
pub struct Target {
    /// Target kind: "page", "iframe", "worker", ...
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub url: String,
    /// Absent on targets that are not directly debuggable.
    #[serde(rename = "webSocketDebuggerUrl", default)]
    pub ws_url: Option<String>,
}

/// Fetch all targets from the debugging port.
pub async fn list_targets(port: u16) -> Result<Vec<Target>> {
    let url = format!("http://127.0.0.1:{}/json", port);
    debug!(url = %url, "listing debug targets");

    let resp = reqwest::get(&url)
        .await
        .map_err(|e| Error::Discovery(format!("failed to reach {}: {}", url, e)))?;

    let targets = resp
        .json::<Vec<Target>>()
        .await
        .map_err(|e| Error::Discovery(format!("malformed target list: {}", e)))?;

    debug!(count = targets.len(), "received target descriptors");
    Ok(targets)
}

/// Pick the first page target whose URL contains `filter`.
pub fn select_target<'a>(targets: &'a [Target], filter: &str) -> Option<&'a Target> {
    targets
        .iter()
        .find(|t| t.kind == "page" && t.url.contains(filter))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(raw: &str) -> Vec<Target> {
        serde_json::from_str(raw).unwrap()
    }

    #[test]
    fn test_parse_target_list() {
        let raw = r#"[
            {
                "type": "page",
                "title": "Workbench",
                "url": "http://workbench/abc",
                "webSocketDebuggerUrl": "ws://127.0.0.1:9222/devtools/page/ABC"
            },
            {
                "type": "iframe",
                "url": "http://frame/x"
            }
        ]"#;
        let targets = parse(raw);
        assert_eq!(targets.len(), 2);
        assert_eq!(targets[0].kind, "page");
        assert_eq!(
            targets[0].ws_url.as_deref(),
            Some("ws://127.0.0.1:9222/devtools/page/ABC")
        );
        assert!(targets[1].ws_url.is_none());
    }

    #[test]
    fn test_select_skips_non_page_targets() {
        let raw = r#"[
            {"type": "iframe", "url": "x"},
            {"type": "page", "url": "http://workbench/abc"}
        ]"#;
        let targets = parse(raw);
        let picked = select_target(&targets, "workbench").unwrap();
        assert_eq!(picked.url, "http://workbench/abc");
    }

    #[test]
    fn test_select_takes_first_match() {
        let raw = r#"[
            {"type": "page", "url": "http://other/page"},
            {"type": "page", "url": "http://workbench/first"},
            {"type": "page", "url": "http://workbench/second"}
        ]"#;
        let targets = parse(raw);
        let picked = select_target(&targets, "workbench").unwrap();
        assert_eq!(picked.url, "http://workbench/first");
    }

    #[test]
    fn test_select_none_when_no_match() {
        let raw = r#"[
            {"type": "page", "url": "http://other/page"},
            {"type": "iframe", "url": "http://workbench/frame"}
        ]"#;
        let targets = parse(raw);
        assert!(select_target(&targets, "workbench").is_none());
        assert!(select_target(&[], "workbench").is_none());
    }
}
