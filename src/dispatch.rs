//! An optional dispatcher built on top of [`Router`]: prefix stripping,
//! per-route method filtering, copying captures through to a handler, and
//! the one-time `HEAD → GET` fallback retry. Nothing here touches
//! [`crate::automaton`] or [`crate::matcher`] directly — it is a thin
//! consumer of `Router`'s public surface, kept deliberately outside the
//! matching core itself.

use crate::error::PatternError;
use crate::matcher::Captures;
use crate::router::Router;

/// The HTTP methods this dispatcher distinguishes between. Not exhaustive —
/// an embedder needing a verb not listed here should fall back to `Other`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Head,
    Options,
}

impl Method {
    fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
            Method::Patch => "PATCH",
            Method::Head => "HEAD",
            Method::Options => "OPTIONS",
        }
    }
}

type BoxedHandler<Ctx> = Box<dyn for<'r, 't> Fn(&mut Ctx, &Captures<'r, 't>) -> bool>;

struct Route<Ctx> {
    method: Method,
    handler: BoxedHandler<Ctx>,
}

/// Wraps a [`Router`] with method-aware dispatch. `Ctx` is whatever mutable
/// per-request state a handler needs (a response writer, typically);
/// captures are handed to the handler by reference rather than copied into
/// a map, since the handler already knows its own placeholder names.
pub struct Dispatcher<Ctx> {
    router: Router<Route<Ctx>>,
}

impl<Ctx> Dispatcher<Ctx> {
    pub fn create(prefix: impl AsRef<[u8]>) -> Dispatcher<Ctx> {
        Dispatcher {
            router: Router::create(prefix),
        }
    }

    /// Registers `handler` for `method` and `pattern`. Mirrors
    /// [`Router::add`]'s error behavior: a malformed pattern leaves the
    /// dispatcher unchanged.
    pub fn add(
        &mut self,
        method: Method,
        pattern: &[u8],
        handler: impl for<'r, 't> Fn(&mut Ctx, &Captures<'r, 't>) -> bool + 'static,
    ) -> Result<&mut Self, PatternError> {
        self.router.add(
            pattern,
            Route {
                method,
                handler: Box::new(handler),
            },
        )?;
        Ok(self)
    }

    /// Strips the router's mount prefix from `path`, then dispatches to the
    /// first registered route (in registration order) whose pattern matches
    /// and whose method equals `method`, invoking its handler with `ctx` and
    /// the extracted captures.
    ///
    /// If nothing matched and `method` was [`Method::Head`], retries once
    /// with [`Method::Get`] — a one-time substitution, not a loop.
    pub fn dispatch(&mut self, method: Method, path: &[u8], ctx: &mut Ctx) -> bool {
        let Some(stripped) = path.strip_prefix(self.router.prefix()) else {
            log::trace!(
                "dispatch: `{}` does not start with router prefix `{}`, ignoring",
                String::from_utf8_lossy(path),
                String::from_utf8_lossy(self.router.prefix())
            );
            return false;
        };

        if Self::try_dispatch(&mut self.router, method, stripped, ctx) {
            return true;
        }
        if method == Method::Head {
            log::trace!(
                "dispatch: HEAD `{}` unmatched, retrying as GET",
                String::from_utf8_lossy(stripped)
            );
            return Self::try_dispatch(&mut self.router, Method::Get, stripped, ctx);
        }
        false
    }

    fn try_dispatch(
        router: &mut Router<Route<Ctx>>,
        method: Method,
        path: &[u8],
        ctx: &mut Ctx,
    ) -> bool {
        let matched = router.match_path(path, |_, route, captures| {
            if route.method != method {
                return false;
            }
            (route.handler)(ctx, captures)
        });
        log::trace!(
            "dispatch: {} {} --> matched={matched}",
            method.as_str(),
            String::from_utf8_lossy(path)
        );
        matched
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn dispatches_to_matching_method_and_pattern() {
        let calls = Cell::new(0u32);
        let mut d: Dispatcher<Cell<u32>> = Dispatcher::create("/api");
        d.add(Method::Get, b"/users/:id", |ctx: &mut Cell<u32>, caps| {
            assert_eq!(caps.get("id"), Some(b"7".as_slice()));
            ctx.set(ctx.get() + 1);
            true
        })
        .unwrap();

        let matched = d.dispatch(Method::Get, b"/api/users/7", &mut calls);
        assert!(matched);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn ignores_paths_outside_the_prefix() {
        let mut d: Dispatcher<()> = Dispatcher::create("/api");
        d.add(Method::Get, b"/users/:id", |_, _| true).unwrap();
        assert!(!d.dispatch(Method::Get, b"/other/users/7", &mut ()));
    }

    #[test]
    fn method_mismatch_does_not_dispatch() {
        let mut d: Dispatcher<()> = Dispatcher::create("");
        d.add(Method::Post, b"/users", |_, _| true).unwrap();
        assert!(!d.dispatch(Method::Get, b"/users", &mut ()));
    }

    #[test]
    fn head_falls_back_to_get_once() {
        let calls = Cell::new(0u32);
        let mut d: Dispatcher<Cell<u32>> = Dispatcher::create("");
        d.add(Method::Get, b"/users", |ctx: &mut Cell<u32>, _| {
            ctx.set(ctx.get() + 1);
            true
        })
        .unwrap();

        let matched = d.dispatch(Method::Head, b"/users", &mut calls);
        assert!(matched);
        assert_eq!(calls.get(), 1);
    }
}
