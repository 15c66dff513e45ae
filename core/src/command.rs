//! Player-issued command tokens.
//!
//! The presentation layer queues tokens; the input subsystem drains them
//! once per tick. Any string is a valid token: tokens nobody handles are
//! accepted and only produce a warning when drained.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InputToken(Cow<'static, str>);

impl InputToken {
    // ── Known commands ─────────────────────────────
    /// Write a line of code by hand (instant).
    pub const MANUAL_CLICK: InputToken = InputToken(Cow::Borrowed("manual_click"));
    /// Start a timed coding session that yields a feature.
    pub const MANUAL_CODE: InputToken = InputToken(Cow::Borrowed("manual_code"));

    pub fn new(token: impl Into<String>) -> Self {
        Self(Cow::Owned(token.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this token belongs to the built-in command set.
    pub fn is_known(&self) -> bool {
        *self == Self::MANUAL_CLICK || *self == Self::MANUAL_CODE
    }
}

impl fmt::Display for InputToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for InputToken {
    fn from(token: &str) -> Self {
        Self::new(token)
    }
}

impl From<String> for InputToken {
    fn from(token: String) -> Self {
        Self(Cow::Owned(token))
    }
}
