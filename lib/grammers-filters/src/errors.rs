// Copyright 2020 - developers of the `grammers` project.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::fmt;

/// The error type reported by the invocation layer when a request fails.
#[derive(Clone, Debug, PartialEq)]
pub struct InvocationError {
    /// A numerical value similar to HTTP status codes.
    pub code: i32,

    /// The ASCII error name, normally in screaming snake case.
    pub name: String,

    /// If the error contained an additional value, it will be present here.
    pub value: Option<u32>,
}

impl std::error::Error for InvocationError {}

impl fmt::Display for InvocationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rpc error {}: {}", self.code, self.name)?;
        if let Some(value) = self.value {
            write!(f, " (value: {value})")?;
        }
        Ok(())
    }
}

impl InvocationError {
    /// Matches on the name of the error.
    ///
    /// If the pattern starts or ends with an asterisk, it will match
    /// a suffix or a prefix of the name respectively.
    pub fn is(&self, pattern: &str) -> bool {
        if let Some(prefix) = pattern.strip_suffix('*') {
            self.name.starts_with(prefix)
        } else if let Some(suffix) = pattern.strip_prefix('*') {
            self.name.ends_with(suffix)
        } else {
            self.name == pattern
        }
    }
}

/// Errors that abort the evaluation of a filter tree.
///
/// A filter that simply does not match returns `Ok(false)`. An error means the filter was
/// applied to updates it cannot possibly understand, which is a configuration mistake of
/// whoever registered it, so it is reported instead of silently rejecting the update.
#[derive(Clone, Debug, PartialEq)]
pub enum FilterError {
    /// The filter does not work with this kind of update.
    UnsupportedUpdate {
        filter: &'static str,
        update: &'static str,
    },

    /// A filter performing requests failed to invoke one.
    Invocation(InvocationError),
}

impl std::error::Error for FilterError {}

impl fmt::Display for FilterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedUpdate { filter, update } => {
                write!(f, "filter error, {filter} filter doesn't work with {update}")
            }
            Self::Invocation(err) => write!(f, "filter error, invoke failed: {err}"),
        }
    }
}

impl From<InvocationError> for FilterError {
    fn from(error: InvocationError) -> Self {
        Self::Invocation(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_update_display() {
        let error = FilterError::UnsupportedUpdate {
            filter: "Regex",
            update: "MessageDeleted",
        };
        assert_eq!(
            error.to_string(),
            "filter error, Regex filter doesn't work with MessageDeleted"
        );
    }

    #[test]
    fn invocation_error_patterns() {
        let error = InvocationError {
            code: 420,
            name: "FLOOD_WAIT".into(),
            value: Some(31),
        };
        assert!(error.is("FLOOD_WAIT"));
        assert!(error.is("FLOOD_*"));
        assert!(error.is("*_WAIT"));
        assert!(!error.is("PEER_FLOOD"));
        assert_eq!(error.to_string(), "rpc error 420: FLOOD_WAIT (value: 31)");
    }
}
