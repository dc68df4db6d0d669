// Copyright 2020 - developers of the `grammers` project.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! # Filtering updates
//!
//! This library offers a small algebra of predicates used to decide whether an incoming
//! [`Update`] should reach a handler. Every predicate is a [`Filter`], and filters can be
//! combined with `!`, `&` and `|` (or [`Filter::not`], [`Filter::and`] and [`Filter::or`]):
//!
//! ```
//! use grammers_filters::filters;
//!
//! let handles_start = filters::command("start") & filters::private() & !filters::bot();
//! assert_eq!(handles_start.name(), "AndFilter");
//! ```
//!
//! Evaluation goes through [`Filter::check`], which needs a [`Context`] describing the
//! logged-in account (used to resolve `"me"` and the bot's own username) and mutable access
//! to the update, because some filters annotate it:
//!
//! * [`filters::command`] stores the matched command and its arguments in
//!   [`Message::command`](update::Message::command).
//! * [`filters::regex`] stores every match in the `matches` field of the update.
//!
//! Combinators evaluate strictly left to right and short-circuit, so a filter on the right side
//! of a failed `&` never runs and never writes its annotation.
//!
//! # Custom filters
//!
//! Custom filters are created with [`create`], [`create_with`] or [`create_async`].
//! Parameterized filters carry their bound state, which can later be inspected with
//! [`Filter::params`].
//!
//! # Methods
//!
//! The [`methods`] module contains a few request builders which sit on top of whatever
//! [`methods::Invoker`] performs the actual network calls.

#![deny(unsafe_code)]

mod context;
mod errors;
mod filter;
pub mod filters;
pub mod methods;
pub mod update;

pub use context::{Account, Context};
pub use errors::{FilterError, InvocationError};
pub use filter::{CUSTOM_FILTER_NAME, Filter, create, create_async, create_with};
pub use update::Update;

/// Alias for [`std::result::Result`] with the error set to [`FilterError`].
pub type Result<T> = std::result::Result<T, FilterError>;
