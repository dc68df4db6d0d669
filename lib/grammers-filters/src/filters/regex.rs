// Copyright 2020 - developers of the `grammers` project.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use regex::{Regex, RegexBuilder};

use crate::update::RegexMatch;
use crate::{Context, Filter, FilterError, Result, Update, create_with};

/// Flags used to compile the pattern of a [`regex_with`] filter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "impl-serde",
    derive(serde_derive::Serialize, serde_derive::Deserialize),
    serde(default)
)]
pub struct RegexOptions {
    pub case_insensitive: bool,
    /// `^` and `$` match at the start and end of every line.
    pub multi_line: bool,
    /// `.` also matches new lines.
    pub dot_matches_new_line: bool,
    /// Whitespace in the pattern is ignored, and `#` starts a comment.
    pub ignore_whitespace: bool,
}

impl RegexOptions {
    fn compile(&self, pattern: &str) -> std::result::Result<Regex, regex::Error> {
        RegexBuilder::new(pattern)
            .case_insensitive(self.case_insensitive)
            .multi_line(self.multi_line)
            .dot_matches_new_line(self.dot_matches_new_line)
            .ignore_whitespace(self.ignore_whitespace)
            .build()
    }
}

fn find_all(regex: &Regex, value: Option<&str>) -> Option<Vec<RegexMatch>> {
    let value = value.filter(|value| !value.is_empty())?;

    let names = RegexMatch::group_names(regex);
    let found = regex
        .captures_iter(value)
        .map(|captures| RegexMatch::from_captures(&captures, names.clone()))
        .collect::<Vec<_>>();

    if found.is_empty() { None } else { Some(found) }
}

fn check_regex(regex: &Regex, _: &dyn Context, update: &mut Update) -> Result<bool> {
    let found = match &*update {
        Update::NewMessage(message) | Update::MessageEdited(message) => {
            find_all(regex, message.text_or_caption())
        }
        Update::CallbackQuery(query) => find_all(regex, query.data.as_deref()),
        Update::InlineQuery(query) => find_all(regex, Some(&query.query)),
        _ => {
            return Err(FilterError::UnsupportedUpdate {
                filter: "Regex",
                update: update.kind(),
            });
        }
    };

    let matched = found.is_some();
    match update {
        Update::NewMessage(message) | Update::MessageEdited(message) => message.matches = found,
        Update::CallbackQuery(query) => query.matches = found,
        Update::InlineQuery(query) => query.matches = found,
        Update::MessageDeleted(_) => {}
    }
    Ok(matched)
}

/// Filter updates that match a given regular expression pattern.
///
/// Can be applied to the following updates, matching the given field:
///
/// * Messages: their text, or caption if there is no text.
/// * Callback queries: their data.
/// * Inline queries: their query.
///
/// Any other update produces an error when evaluated.
///
/// When the pattern matches, all of the non-overlapping matches are stored in the `matches`
/// field of the update itself. Otherwise, the field is cleared.
///
/// Returns an error if the pattern is not a valid regular expression.
pub fn regex(pattern: &str) -> std::result::Result<Filter, regex::Error> {
    regex_with(pattern, RegexOptions::default())
}

/// Like [`regex`], but compiling the pattern with the given options.
pub fn regex_with(
    pattern: &str,
    options: RegexOptions,
) -> std::result::Result<Filter, regex::Error> {
    options.compile(pattern).map(regex_compiled)
}

/// Like [`regex`], but using an already-compiled pattern.
pub fn regex_compiled(regex: Regex) -> Filter {
    create_with(Some("RegexFilter"), regex, check_regex)
}
