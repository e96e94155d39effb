//! Tag-anchored extraction of actions from free-form backend text.
//!
//! The contract is three tagged lines:
//!
//! ```text
//! [Intent]: Propose a deal
//! [Target]: USA
//! [Message]: We propose a joint investment ...
//! ```
//!
//! Tags are matched case-insensitively and only the first occurrence of each
//! counts. Whitespace after a tag is skipped, including line breaks. Intent
//! and target capture up to the end of their line; the message captures
//! everything to the end of the text. Captured values are trimmed, and an
//! empty value counts as missing. There is no semantic repair.

use concord_types::{Action, ActionIntent, Target};

/// Intent tag.
pub const INTENT_TAG: &str = "[Intent]:";
/// Target tag.
pub const TARGET_TAG: &str = "[Target]:";
/// Message tag.
pub const MESSAGE_TAG: &str = "[Message]:";

/// Fields recovered from backend text. Any of them may be missing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedAction {
    /// Parsed intent, recognized or not.
    pub intent: Option<ActionIntent>,
    /// Parsed target.
    pub target: Option<Target>,
    /// Parsed message, possibly multi-line.
    pub message: Option<String>,
}

impl ParsedAction {
    /// Assemble a complete action when all three fields are present.
    pub fn into_action(self) -> Option<Action> {
        Some(Action {
            intent: self.intent?,
            target: self.target?,
            message: self.message?,
        })
    }
}

/// Extract intent, target and message from `raw`.
pub fn parse_action(raw: &str) -> ParsedAction {
    let lowered = raw.to_ascii_lowercase();
    ParsedAction {
        intent: capture(raw, &lowered, INTENT_TAG, Extent::Line).map(|v| ActionIntent::classify(&v)),
        target: capture(raw, &lowered, TARGET_TAG, Extent::Line).and_then(|v| Target::parse(&v)),
        message: capture(raw, &lowered, MESSAGE_TAG, Extent::Rest),
    }
}

/// Whether all three tags appear anywhere in `raw`, ignoring case.
pub fn has_required_tags(raw: &str) -> bool {
    let lowered = raw.to_ascii_lowercase();
    [INTENT_TAG, TARGET_TAG, MESSAGE_TAG]
        .iter()
        .all(|tag| lowered.contains(&tag.to_ascii_lowercase()))
}

/// How far a tag's value extends.
#[derive(Debug, Clone, Copy)]
enum Extent {
    /// To the end of the line.
    Line,
    /// To the end of the text.
    Rest,
}

/// Locate `tag` in `lowered` and read its value from `raw`.
///
/// ASCII lowercasing preserves byte offsets, so positions found in `lowered`
/// are valid in `raw`.
fn capture(raw: &str, lowered: &str, tag: &str, extent: Extent) -> Option<String> {
    let start = lowered
        .find(&tag.to_ascii_lowercase())?
        .checked_add(tag.len())?;
    let after = raw.get(start..)?.trim_start();
    let value = match extent {
        Extent::Line => after.split('\n').next().unwrap_or_default(),
        Extent::Rest => after,
    }
    .trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_owned())
    }
}
