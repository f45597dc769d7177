//! Command descriptor parsing
//!
//! A descriptor names the command to run and, optionally, the target it is
//! routed to: `method` or `method:targetId`.

use std::fmt;

const SEPARATOR: char = ':';

/// A parsed command descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Descriptor {
    raw: String,
    method: String,
    target_id: Option<String>,
}

impl Descriptor {
    /// Parse a descriptor string.
    ///
    /// Parsing never fails. The method is everything before the first `:`;
    /// the target id is the segment after it, up to the next `:` if any.
    /// Without a `:` there is no target id.
    ///
    /// ```
    /// use cmdq_core::Descriptor;
    ///
    /// let d = Descriptor::parse("send:42");
    /// assert_eq!(d.method(), "send");
    /// assert_eq!(d.target_id(), Some("42"));
    ///
    /// assert_eq!(Descriptor::parse("send").target_id(), None);
    /// ```
    pub fn parse(raw: &str) -> Self {
        let mut segments = raw.split(SEPARATOR);
        let method = segments.next().unwrap_or_default().to_string();
        let target_id = segments.next().map(str::to_string);

        Self {
            raw: raw.to_string(),
            method,
            target_id,
        }
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn target_id(&self) -> Option<&str> {
        self.target_id.as_deref()
    }

    /// The descriptor exactly as it was enqueued
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl fmt::Display for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl From<&str> for Descriptor {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}
