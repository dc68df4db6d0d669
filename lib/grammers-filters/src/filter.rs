// Copyright 2020 - developers of the `grammers` project.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::any::{self, Any};
use std::borrow::Cow;
use std::fmt;
use std::ops::{BitAnd, BitOr, Not};
use std::sync::Arc;

use futures_util::future::{BoxFuture, FutureExt};
use log::trace;

use crate::{Context, Result, Update};

/// Name given to filters whose function has no usable name, such as closures.
pub const CUSTOM_FILTER_NAME: &str = "CustomFilter";

/// A predicate that runs to completion as soon as it's called.
trait SyncPredicate: Send + Sync {
    fn check(&self, ctx: &dyn Context, update: &mut Update) -> Result<bool>;
}

/// A predicate that may suspend while deciding.
trait AsyncPredicate: Send + Sync {
    fn check<'a>(
        &'a self,
        ctx: &'a dyn Context,
        update: &'a mut Update,
    ) -> BoxFuture<'a, Result<bool>>;
}

struct Bound<P, F> {
    params: Arc<P>,
    func: F,
}

impl<P, F> SyncPredicate for Bound<P, F>
where
    P: Send + Sync,
    F: Fn(&P, &dyn Context, &mut Update) -> Result<bool> + Send + Sync,
{
    fn check(&self, ctx: &dyn Context, update: &mut Update) -> Result<bool> {
        (self.func)(&self.params, ctx, update)
    }
}

struct BoundAsync<P, F> {
    params: Arc<P>,
    func: F,
}

impl<P, F> AsyncPredicate for BoundAsync<P, F>
where
    P: Send + Sync,
    F: for<'a> Fn(&'a P, &'a dyn Context, &'a mut Update) -> BoxFuture<'a, Result<bool>>
        + Send
        + Sync,
{
    fn check<'a>(
        &'a self,
        ctx: &'a dyn Context,
        update: &'a mut Update,
    ) -> BoxFuture<'a, Result<bool>> {
        (self.func)(&self.params, ctx, update)
    }
}

enum Eval {
    Sync(Box<dyn SyncPredicate>),
    Async(Box<dyn AsyncPredicate>),
    Invert(Filter),
    And(Filter, Filter),
    Or(Filter, Filter),
}

struct Inner {
    name: Cow<'static, str>,
    params: Arc<dyn Any + Send + Sync>,
    eval: Eval,
}

/// A named predicate deciding whether an [`Update`] should be handled.
///
/// Filters are cheap to clone, and clones share the same predicate and bound parameters,
/// so the same filter can be part of any number of trees.
///
/// Use the `!`, `&` and `|` operators to combine them:
///
/// ```
/// use grammers_filters::filters;
///
/// let photos_from_people = filters::photo() & !(filters::bot() | filters::channel());
/// assert!(photos_from_people.is_async());
/// assert!(!filters::photo().is_async());
/// ```
#[derive(Clone)]
pub struct Filter(Arc<Inner>);

fn default_name<F>() -> Cow<'static, str> {
    let path = any::type_name::<F>();
    if path.contains('{') || path.contains('<') {
        return Cow::Borrowed(CUSTOM_FILTER_NAME);
    }
    match path.rsplit("::").next() {
        Some(name) if !name.is_empty() => Cow::Borrowed(name),
        _ => Cow::Borrowed(CUSTOM_FILTER_NAME),
    }
}

fn name_or_default<F>(name: Option<&str>) -> Cow<'static, str> {
    match name {
        Some(name) if !name.is_empty() => Cow::Owned(name.to_owned()),
        _ => default_name::<F>(),
    }
}

/// Create a custom filter out of a synchronous function.
///
/// The filter is named after the function, or [`CUSTOM_FILTER_NAME`] if it's a closure.
///
/// ```
/// use grammers_filters::{Context, Result, Update, create};
///
/// fn short_text(_: &dyn Context, update: &mut Update) -> Result<bool> {
///     Ok(update.message().and_then(|m| m.text.as_deref()).is_some_and(|t| t.len() < 10))
/// }
///
/// let filter = create(short_text);
/// assert_eq!(filter.name(), "short_text");
/// ```
pub fn create<F>(func: F) -> Filter
where
    F: Fn(&dyn Context, &mut Update) -> Result<bool> + Send + Sync + 'static,
{
    Filter::from_sync(default_name::<F>(), (), move |_, ctx, update| func(ctx, update))
}

/// Create a parameterized filter out of a synchronous function.
///
/// The function receives the bound `params` on every call, and they can be inspected later
/// through [`Filter::params`]. If no `name` is given, the filter is named after the function.
pub fn create_with<P, F>(name: Option<&str>, params: P, func: F) -> Filter
where
    P: Send + Sync + 'static,
    F: Fn(&P, &dyn Context, &mut Update) -> Result<bool> + Send + Sync + 'static,
{
    Filter::from_sync(name_or_default::<F>(name), params, func)
}

/// Create a parameterized filter out of an asynchronous function.
///
/// Use this when deciding requires awaiting something, such as a request. The function must
/// return a boxed future, which is easily done with [`FutureExt::boxed`].
pub fn create_async<P, F>(name: Option<&str>, params: P, func: F) -> Filter
where
    P: Send + Sync + 'static,
    F: for<'a> Fn(&'a P, &'a dyn Context, &'a mut Update) -> BoxFuture<'a, Result<bool>>
        + Send
        + Sync
        + 'static,
{
    let params = Arc::new(params);
    let erased: Arc<dyn Any + Send + Sync> = params.clone();
    Filter::new(
        name_or_default::<F>(name),
        erased,
        Eval::Async(Box::new(BoundAsync { params, func })),
    )
}

impl Filter {
    fn new(name: Cow<'static, str>, params: Arc<dyn Any + Send + Sync>, eval: Eval) -> Self {
        Self(Arc::new(Inner { name, params, eval }))
    }

    fn from_sync<P, F>(name: Cow<'static, str>, params: P, func: F) -> Self
    where
        P: Send + Sync + 'static,
        F: Fn(&P, &dyn Context, &mut Update) -> Result<bool> + Send + Sync + 'static,
    {
        let params = Arc::new(params);
        let erased: Arc<dyn Any + Send + Sync> = params.clone();
        Self::new(name, erased, Eval::Sync(Box::new(Bound { params, func })))
    }

    fn combine(name: &'static str, eval: Eval) -> Self {
        Self::new(Cow::Borrowed(name), Arc::new(()), eval)
    }

    /// The name of this filter, useful for diagnostics.
    pub fn name(&self) -> &str {
        &self.0.name
    }

    /// The parameters bound to this filter when it was created, if they are of type `P`.
    pub fn params<P: Any>(&self) -> Option<&P> {
        self.0.params.downcast_ref()
    }

    /// Whether evaluating this filter may suspend.
    ///
    /// Combinators are always asynchronous, because their operands may be.
    pub fn is_async(&self) -> bool {
        !matches!(self.0.eval, Eval::Sync(_))
    }

    /// A filter that matches when this one does not.
    #[allow(clippy::should_implement_trait)]
    pub fn not(self) -> Filter {
        Self::combine("InvertFilter", Eval::Invert(self))
    }

    /// A filter that matches when both this and `other` do.
    ///
    /// `other` is not evaluated at all if this filter does not match.
    pub fn and(self, other: impl Into<Filter>) -> Filter {
        Self::combine("AndFilter", Eval::And(self, other.into()))
    }

    /// A filter that matches when either this or `other` do.
    ///
    /// `other` is not evaluated at all if this filter matches.
    pub fn or(self, other: impl Into<Filter>) -> Filter {
        Self::combine("OrFilter", Eval::Or(self, other.into()))
    }

    /// Evaluate the filter against the update.
    ///
    /// Filters such as [`crate::filters::command`] may annotate the update while doing so.
    ///
    /// An error is returned when a filter is applied to an update it cannot handle. This
    /// aborts the evaluation of the rest of the tree.
    pub fn check<'a>(
        &'a self,
        ctx: &'a dyn Context,
        update: &'a mut Update,
    ) -> BoxFuture<'a, Result<bool>> {
        let name = self.name();
        match &self.0.eval {
            Eval::Sync(predicate) => {
                async move { traced(name, predicate.check(ctx, update)) }.boxed()
            }
            Eval::Async(predicate) => predicate
                .check(ctx, update)
                .map(move |result| traced(name, result))
                .boxed(),
            Eval::Invert(base) => async move {
                let x = evaluate(base, ctx, update).await?;
                traced(name, Ok(!x))
            }
            .boxed(),
            Eval::And(base, other) => async move {
                if !evaluate(base, ctx, update).await? {
                    return traced(name, Ok(false));
                }
                let y = evaluate(other, ctx, update).await?;
                traced(name, Ok(y))
            }
            .boxed(),
            Eval::Or(base, other) => async move {
                if evaluate(base, ctx, update).await? {
                    return traced(name, Ok(true));
                }
                let y = evaluate(other, ctx, update).await?;
                traced(name, Ok(y))
            }
            .boxed(),
        }
    }
}

/// Evaluate an operand of a combinator, calling synchronous predicates directly instead of
/// going through a boxed future.
async fn evaluate(filter: &Filter, ctx: &dyn Context, update: &mut Update) -> Result<bool> {
    match &filter.0.eval {
        Eval::Sync(predicate) => traced(filter.name(), predicate.check(ctx, update)),
        _ => filter.check(ctx, update).await,
    }
}

fn traced(name: &str, result: Result<bool>) -> Result<bool> {
    match &result {
        Ok(value) => trace!("filter {name} returned {value}"),
        Err(err) => trace!("filter {name} failed: {err}"),
    }
    result
}

impl fmt::Debug for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0.eval {
            Eval::Sync(_) | Eval::Async(_) => f
                .debug_struct("Filter")
                .field("name", &self.name())
                .field("async", &self.is_async())
                .finish(),
            Eval::Invert(base) => f.debug_tuple("Invert").field(base).finish(),
            Eval::And(base, other) => f.debug_tuple("And").field(base).field(other).finish(),
            Eval::Or(base, other) => f.debug_tuple("Or").field(base).field(other).finish(),
        }
    }
}

impl Not for Filter {
    type Output = Filter;

    fn not(self) -> Filter {
        Filter::not(self)
    }
}

impl Not for &Filter {
    type Output = Filter;

    fn not(self) -> Filter {
        Filter::not(self.clone())
    }
}

impl<T: Into<Filter>> BitAnd<T> for Filter {
    type Output = Filter;

    fn bitand(self, other: T) -> Filter {
        self.and(other)
    }
}

impl<T: Into<Filter>> BitAnd<T> for &Filter {
    type Output = Filter;

    fn bitand(self, other: T) -> Filter {
        self.clone().and(other)
    }
}

impl<T: Into<Filter>> BitOr<T> for Filter {
    type Output = Filter;

    fn bitor(self, other: T) -> Filter {
        self.or(other)
    }
}

impl<T: Into<Filter>> BitOr<T> for &Filter {
    type Output = Filter;

    fn bitor(self, other: T) -> Filter {
        self.clone().or(other)
    }
}

impl From<&Filter> for Filter {
    fn from(filter: &Filter) -> Self {
        filter.clone()
    }
}
