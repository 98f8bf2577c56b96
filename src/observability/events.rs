//! Lifecycle events of the `sdkmodel` command line

use std::fmt;

/// Observable events outside of per-field diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Configuration loaded
    ConfigLoaded,
    /// Extra descriptor files loaded
    DescriptorsLoaded,
    /// Payload decoded into a model
    DecodeComplete,
    /// Payload rejected
    DecodeFailed,
}

impl Event {
    /// Returns the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::DescriptorsLoaded => "DESCRIPTORS_LOADED",
            Event::DecodeComplete => "DECODE_COMPLETE",
            Event::DecodeFailed => "DECODE_FAILED",
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Event::DecodeFailed)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names() {
        assert_eq!(Event::ConfigLoaded.as_str(), "CONFIG_LOADED");
        assert_eq!(Event::DescriptorsLoaded.to_string(), "DESCRIPTORS_LOADED");
        assert!(Event::DecodeFailed.is_failure());
        assert!(!Event::DecodeComplete.is_failure());
    }
}
