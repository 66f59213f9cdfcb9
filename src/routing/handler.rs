//! Route handlers.

use super::context::Context;

/// Application logic bound to a route.
///
/// Any `Fn(&mut Context)` that is `Send + Sync` is a handler, so plain
/// functions and closures can be registered directly.
pub trait Handler: Send + Sync + 'static {
    fn call(&self, ctx: &mut Context);
}

impl<F> Handler for F
where
    F: Fn(&mut Context) + Send + Sync + 'static,
{
    fn call(&self, ctx: &mut Context) {
        self(ctx)
    }
}
