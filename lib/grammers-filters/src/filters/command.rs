// Copyright 2020 - developers of the `grammers` project.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use log::trace;

use crate::{Context, Filter, Result, Update, create_with};

/// Prefix used by [`CommandConfig::default`].
pub const DEFAULT_PREFIX: &str = "/";

/// Configuration for a [`command_with`] filter.
///
/// ```
/// use grammers_filters::filters::{CommandConfig, command_with};
///
/// let filter = command_with(CommandConfig::new(["start", "help"]).prefixes(["/", "!"]));
/// assert_eq!(filter.name(), "CommandFilter");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "impl-serde",
    derive(serde_derive::Serialize, serde_derive::Deserialize),
    serde(default)
)]
pub struct CommandConfig {
    /// The commands to look for, without prefix.
    pub commands: Vec<String>,
    /// The prefixes a command may start with.
    ///
    /// Empty, or containing only the empty string, means commands need no prefix at all.
    pub prefixes: Vec<String>,
    /// Whether commands must match with the same case they were configured with.
    pub case_sensitive: bool,
}

impl Default for CommandConfig {
    fn default() -> Self {
        Self {
            commands: Vec::new(),
            prefixes: vec![DEFAULT_PREFIX.to_owned()],
            case_sensitive: false,
        }
    }
}

impl CommandConfig {
    pub fn new<I, S>(commands: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            commands: commands.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn prefixes<I, S>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.prefixes = prefixes.into_iter().map(Into::into).collect();
        self
    }

    /// Accept commands without any prefix.
    pub fn no_prefix(mut self) -> Self {
        self.prefixes.clear();
        self
    }

    pub fn case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }
}

/// The normalized parameters bound to a command filter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommandParams {
    /// Commands, lowercase unless the filter is case sensitive.
    pub commands: Vec<String>,
    /// Prefixes, with the empty string standing for "no prefix".
    pub prefixes: Vec<String>,
    pub case_sensitive: bool,
}

fn dedup(items: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut unique = Vec::new();
    for item in items {
        if !unique.contains(&item) {
            unique.push(item);
        }
    }
    unique
}

impl From<CommandConfig> for CommandParams {
    fn from(config: CommandConfig) -> Self {
        let case_sensitive = config.case_sensitive;
        let commands = dedup(config.commands.into_iter().map(|c| {
            if case_sensitive {
                c
            } else {
                c.to_lowercase()
            }
        }));
        let mut prefixes = dedup(config.prefixes);
        if prefixes.is_empty() {
            prefixes.push(String::new());
        }

        Self {
            commands,
            prefixes,
            case_sensitive,
        }
    }
}

impl CommandParams {
    /// Parse the text as one of the commands, returning the matched command followed by its
    /// arguments.
    ///
    /// `username` is the bot's own username, which may follow the command as in
    /// `/start@username`.
    pub fn parse(&self, text: &str, username: &str) -> Option<Vec<String>> {
        for prefix in &self.prefixes {
            let Some(without_prefix) = text.strip_prefix(prefix.as_str()) else {
                continue;
            };

            for cmd in &self.commands {
                let Some(arguments) = self.strip_command(without_prefix, cmd, username) else {
                    continue;
                };

                let mut command = vec![cmd.clone()];
                command.extend(split_arguments(arguments));
                return Some(command);
            }
        }
        None
    }

    /// Strip `cmd`, an optional `@username` mention and a single whitespace character from the
    /// start of the text, as long as the command is followed by whitespace or the end of it.
    fn strip_command<'t>(&self, text: &'t str, cmd: &str, username: &str) -> Option<&'t str> {
        let after_command = strip_start(text, cmd, self.case_sensitive)?;

        let with_at = strip_start(after_command, "@", true)
            .and_then(|rest| strip_start(rest, username, self.case_sensitive));
        let without_at = strip_start(after_command, username, self.case_sensitive);

        let rest = [with_at, without_at, Some(after_command)]
            .into_iter()
            .flatten()
            .find(|rest| rest.is_empty() || rest.starts_with(char::is_whitespace))?;

        let mut chars = rest.chars();
        match chars.next() {
            Some(c) if c.is_whitespace() => Some(chars.as_str()),
            _ => Some(rest),
        }
    }
}

/// Strip `pattern` from the start of `text`, optionally ignoring case.
fn strip_start<'t>(text: &'t str, pattern: &str, case_sensitive: bool) -> Option<&'t str> {
    if case_sensitive {
        return text.strip_prefix(pattern);
    }

    let mut end = 0;
    let mut chars = text.chars();
    for expected in pattern.chars() {
        let actual = chars.next()?;
        if actual != expected && !actual.to_lowercase().eq(expected.to_lowercase()) {
            return None;
        }
        end += actual.len_utf8();
    }
    Some(&text[end..])
}

/// Split command arguments on whitespace.
///
/// Spans between matching single or double quotes are kept as a single argument without the
/// quotes. A quote preceded by a backslash does not close the span, and escaped quotes lose
/// their backslash in every argument.
pub fn split_arguments(text: &str) -> Vec<String> {
    let mut arguments = Vec::new();
    let mut rest = text.trim_start();

    while !rest.is_empty() {
        if let Some((quoted, after)) = quoted_span(rest) {
            arguments.push(unescape_quotes(quoted));
            rest = after;
        } else {
            let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
            arguments.push(unescape_quotes(&rest[..end]));
            rest = &rest[end..];
        }
        rest = rest.trim_start();
    }

    arguments
}

/// If the text starts with a quote that is closed on the same line, return the text inside the
/// quotes and the text after the closing quote.
fn quoted_span(text: &str) -> Option<(&str, &str)> {
    let quote = text.chars().next().filter(|c| *c == '"' || *c == '\'')?;
    let start = quote.len_utf8();

    let mut previous = quote;
    for (i, c) in text[start..].char_indices() {
        if c == '\n' {
            return None;
        }
        if c == quote && previous != '\\' {
            let end = start + i;
            return Some((&text[start..end], &text[end + c.len_utf8()..]));
        }
        previous = c;
    }
    None
}

fn unescape_quotes(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(&quote @ ('"' | '\'')) = chars.peek() {
                result.push(quote);
                chars.next();
                continue;
            }
        }
        result.push(c);
    }
    result
}

fn check_command(params: &CommandParams, ctx: &dyn Context, update: &mut Update) -> Result<bool> {
    let Some(message) = update.message_mut() else {
        return Ok(false);
    };

    message.command = None;
    let Some(text) = message.text_or_caption() else {
        return Ok(false);
    };

    let username = ctx.me().username.as_deref().unwrap_or_default();
    match params.parse(text, username) {
        Some(command) => {
            trace!("message {} matched command {:?}", message.id, command);
            message.command = Some(command);
            Ok(true)
        }
        None => Ok(false),
    }
}

/// Filter commands, i.e. text messages starting with "/".
///
/// When it matches, the command itself and its arguments are stored in the
/// [`Message::command`](crate::update::Message::command) of the update, with the command
/// first. Quoted arguments are kept together:
///
/// ```
/// use grammers_filters::filters::{CommandParams, command};
///
/// let filter = command("start");
/// let params = filter.params::<CommandParams>().unwrap();
/// assert_eq!(
///     params.parse(r#"/start@bot now "right now""#, "bot"),
///     Some(vec!["start".to_owned(), "now".to_owned(), "right now".to_owned()])
/// );
/// ```
///
/// Matching is case insensitive. Use [`command_with`] to change the prefixes or case
/// sensitivity, or to look for several commands at once.
pub fn command(command: &str) -> Filter {
    command_with(CommandConfig::new([command]))
}

/// Filter commands according to the given configuration.
pub fn command_with(config: CommandConfig) -> Filter {
    create_with(
        Some("CommandFilter"),
        CommandParams::from(config),
        check_command,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Account;
    use crate::update::{CallbackQuery, Message, User};

    fn bot_account() -> Account {
        Account::new(User::new(1).with_username("TestBot").bot().myself())
    }

    async fn run(filter: &Filter, text: &str) -> Option<Vec<String>> {
        let ctx = bot_account();
        let mut update = Update::from(Message::with_text(1, text));
        let matched = filter.check(&ctx, &mut update).await.unwrap();
        assert_eq!(matched, update.command().is_some());
        update.command().map(<[String]>::to_vec)
    }

    fn strings(items: &[&str]) -> Option<Vec<String>> {
        Some(items.iter().map(|s| s.to_string()).collect())
    }

    #[tokio::test]
    async fn plain_command() {
        let filter = command("start");
        assert_eq!(run(&filter, "/start").await, strings(&["start"]));
        assert_eq!(run(&filter, "/Start").await, strings(&["start"]));
        assert_eq!(run(&filter, "/starting").await, None);
        assert_eq!(run(&filter, "start").await, None);
        assert_eq!(run(&filter, "/help").await, None);
    }

    #[tokio::test]
    async fn arguments() {
        let filter = command("start");
        assert_eq!(
            run(&filter, r#"/start hello "foo bar" baz"#).await,
            strings(&["start", "hello", "foo bar", "baz"])
        );
        assert_eq!(
            run(&filter, r#"/start \"quoted\""#).await,
            strings(&["start", r#""quoted""#])
        );
        assert_eq!(
            run(&filter, "/start 'it\\'s' \"\"").await,
            strings(&["start", "it's", ""])
        );
        assert_eq!(
            run(&filter, "/start\n  spaced   out ").await,
            strings(&["start", "spaced", "out"])
        );
    }

    #[tokio::test]
    async fn mentions() {
        let filter = command("start");
        assert_eq!(run(&filter, "/start@TestBot").await, strings(&["start"]));
        assert_eq!(run(&filter, "/start@testbot 1").await, strings(&["start", "1"]));
        assert_eq!(run(&filter, "/start@OtherBot").await, None);
    }

    #[tokio::test]
    async fn case_sensitive() {
        let filter = command_with(CommandConfig::new(["Start"]).case_sensitive(true));
        assert_eq!(run(&filter, "/Start").await, strings(&["Start"]));
        assert_eq!(run(&filter, "/start").await, None);

        let filter = command_with(CommandConfig::new(["start"]).case_sensitive(true));
        assert_eq!(run(&filter, "/Start").await, None);
    }

    #[tokio::test]
    async fn prefixes() {
        let filter = command_with(CommandConfig::new(["go"]).prefixes(["!"]));
        assert_eq!(run(&filter, "!go").await, strings(&["go"]));
        assert_eq!(run(&filter, "/go").await, None);

        let filter = command_with(CommandConfig::new(["go"]).no_prefix());
        assert_eq!(run(&filter, "go now").await, strings(&["go", "now"]));
        assert_eq!(run(&filter, "/go").await, None);

        let filter = command_with(CommandConfig::new(["go", "stop"]).prefixes(["/", "."]));
        assert_eq!(run(&filter, ".stop").await, strings(&["stop"]));
    }

    #[tokio::test]
    async fn captions_and_resets() {
        let filter = command("start");
        let ctx = bot_account();
        let mut update = Update::from(Message {
            caption: Some("/start now".into()),
            command: Some(vec!["stale".into()]),
            ..Message::default()
        });
        assert!(filter.check(&ctx, &mut update).await.unwrap());
        assert_eq!(update.command(), Some(&["start".to_owned(), "now".to_owned()][..]));

        let mut update = Update::from(Message {
            text: Some("hello".into()),
            command: Some(vec!["stale".into()]),
            ..Message::default()
        });
        assert!(!filter.check(&ctx, &mut update).await.unwrap());
        assert_eq!(update.command(), None);

        let mut update = Update::from(CallbackQuery::new(1, User::new(2)).with_data("/start"));
        assert!(!filter.check(&ctx, &mut update).await.unwrap());
    }

    #[test]
    fn normalized_params() {
        let filter = command_with(CommandConfig {
            commands: vec!["Start".into(), "start".into(), "HELP".into()],
            prefixes: Vec::new(),
            case_sensitive: false,
        });
        let params = filter.params::<CommandParams>().unwrap();
        assert_eq!(params.commands, vec!["start", "help"]);
        assert_eq!(params.prefixes, vec![""]);
        assert!(!params.case_sensitive);
    }

    #[test]
    fn unterminated_quotes() {
        assert_eq!(split_arguments(r#""open ended"#), vec!["\"open", "ended"]);
        assert_eq!(split_arguments("\"a\nb\""), vec!["\"a", "b\""]);
        assert_eq!(split_arguments(r#""a"b"#), vec!["a", "b"]);
    }
}
