//! The click workflow: enable the DOM and Runtime domains, then evaluate a
//! querySelector-and-click expression in the page and extract its result.

use serde_json::{json, Value};
use tabclick_core::Result;
use tracing::debug;

use crate::channel::CommandChannel;

/// Printed when the reply carries no `result.value` string.
const UNKNOWN_RESULT: &str = "Unknown result";

/// Build the JavaScript expression that clicks the selector's element.
///
/// Evaluates to "Element clicked successfully" or "Element not found"; both
/// come back on the same success path.
fn click_expression(selector: &str) -> String {
    let escaped = selector.replace('\\', "\\\\").replace('\'', "\\'");
    format!(
        "(() => {{\n\
         const element = document.querySelector('{escaped}');\n\
         if (element) {{\n\
             element.click();\n\
             return 'Element clicked successfully';\n\
         }}\n\
         return 'Element not found';\n\
         }})()"
    )
}

/// Extract the result string from an evaluation reply.
///
/// The reply shape for `Runtime.evaluate` is `{result: {value: <string>}}`;
/// anything else falls back to the literal "Unknown result".
pub fn reply_value(reply: &Value) -> String {
    reply
        .get("result")
        .and_then(|r| r.get("value"))
        .and_then(|v| v.as_str())
        .unwrap_or(UNKNOWN_RESULT)
        .to_string()
}

/// Run the click sequence over an open channel and return the result string.
pub async fn run_click<C: CommandChannel + ?Sized>(
    channel: &mut C,
    selector: &str,
) -> Result<String> {
    channel.enable_domain("DOM").await?;
    channel.enable_domain("Runtime").await?;

    debug!(selector = selector, "evaluating click expression");

    let reply = channel
        .send(
            "Runtime.evaluate",
            json!({
                "expression": click_expression(selector),
                "awaitPromise": true,
                "returnByValue": true,
            }),
        )
        .await?;

    Ok(reply_value(&reply))
}
