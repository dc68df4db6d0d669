// Copyright 2020 - developers of the `grammers` project.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::ops::Range;
use std::sync::Arc;

use regex::{Captures, Regex};

/// A single match found by [`crate::filters::regex`].
///
/// Unlike [`regex::Captures`], it owns the matched text, so it can be stored in the update
/// and read by handlers after the filter finished.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegexMatch {
    range: Range<usize>,
    groups: Vec<Option<(Range<usize>, String)>>,
    names: Arc<[Option<String>]>,
}

impl RegexMatch {
    pub(crate) fn from_captures(captures: &Captures<'_>, names: Arc<[Option<String>]>) -> Self {
        let groups = captures
            .iter()
            .map(|group| group.map(|m| (m.range(), m.as_str().to_owned())))
            .collect::<Vec<_>>();

        // Group 0 always participates in a match.
        let range = groups[0].as_ref().map(|(r, _)| r.clone()).unwrap_or(0..0);

        Self {
            range,
            groups,
            names,
        }
    }

    /// Collects the name of every capture group, to be shared by all matches of the pattern.
    pub(crate) fn group_names(regex: &Regex) -> Arc<[Option<String>]> {
        regex
            .capture_names()
            .map(|name| name.map(str::to_owned))
            .collect()
    }

    /// The entire matched text.
    pub fn as_str(&self) -> &str {
        self.get(0).unwrap_or_default()
    }

    /// Byte offset where the match starts in the original text.
    pub fn start(&self) -> usize {
        self.range.start
    }

    /// Byte offset where the match ends in the original text.
    pub fn end(&self) -> usize {
        self.range.end
    }

    pub fn range(&self) -> Range<usize> {
        self.range.clone()
    }

    /// The text of the capture group at the given index, if it participated in the match.
    ///
    /// The group at index 0 is the entire match.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.groups
            .get(index)
            .and_then(|group| group.as_ref())
            .map(|(_, text)| text.as_str())
    }

    /// The text of the named capture group, if it exists and participated in the match.
    pub fn name(&self, name: &str) -> Option<&str> {
        let index = self
            .names
            .iter()
            .position(|n| n.as_deref() == Some(name))?;
        self.get(index)
    }

    /// Amount of groups in the pattern, including the implicit group for the entire match.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn owns_captured_groups() {
        let regex = Regex::new(r"(?P<word>[a-z]+)(\d)?").unwrap();
        let names = RegexMatch::group_names(&regex);
        let found = regex
            .captures_iter("order abc")
            .map(|c| RegexMatch::from_captures(&c, Arc::clone(&names)))
            .collect::<Vec<_>>();

        assert_eq!(found.len(), 2);
        assert_eq!(found[1].as_str(), "abc");
        assert_eq!(found[1].range(), 6..9);
        assert_eq!(found[1].name("word"), Some("abc"));
        assert_eq!(found[1].get(2), None);
        assert_eq!(found[1].name("missing"), None);
        assert_eq!(found[1].len(), 3);
    }
}
