//! Helpers shared by the error types of every layer.
use std::error::Error;
use std::sync::Arc;

pub type DynError = Arc<dyn std::error::Error + Send + Sync>;

/// Renders an error followed by all its sources, separated by `: `.
///
/// Client errors like the `reqwest` ones only print the outermost context
/// ("error sending request"), while the useful part ("Connection refused")
/// lives in the sources. Sources that repeat the previous message are
/// skipped.
#[must_use]
pub fn display_chain(err: &(dyn Error + 'static)) -> String {
    let mut message = err.to_string();
    let mut last = message.clone();
    let mut source = err.source();

    while let Some(cause) = source {
        let current = cause.to_string();

        if !last.contains(&current) {
            message.push_str(": ");
            message.push_str(&current);
        }

        last = current;
        source = cause.source();
    }

    message
}
