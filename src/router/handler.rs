use std::{future::Future, sync::Arc};

use anyhow::Result;
use async_trait::async_trait;

use super::Params;

/// Outcome of a [Handler].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow<R> {
    /// Decline the path and let the next matching route try.
    Continue,
    /// Stop dispatching, `R` becomes the result of the dispatch.
    Stop(R),
}

impl<R> Flow<R> {
    pub fn is_continue(&self) -> bool {
        matches!(self, Self::Continue)
    }

    pub fn into_stop(self) -> Option<R> {
        match self {
            Self::Stop(value) => Some(value),
            Self::Continue => None,
        }
    }
}

/// Callback invoked for a matching route.
///
/// Implemented for any `Fn(String, Params, Arc<C>) -> impl Future` returning
/// `anyhow::Result<Flow<R>>`, so async closures can be registered directly.
#[async_trait]
pub trait Handler<C, R>: Send + Sync {
    async fn call(&self, path: String, params: Params, context: Arc<C>) -> Result<Flow<R>>;
}

pub type HandlerService<C, R> = Box<dyn Handler<C, R>>;

#[async_trait]
impl<F, Fut, C, R> Handler<C, R> for F
where
    F: Fn(String, Params, Arc<C>) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Flow<R>>> + Send + 'static,
    C: Send + Sync + 'static,
    R: Send + 'static,
{
    async fn call(&self, path: String, params: Params, context: Arc<C>) -> Result<Flow<R>> {
        (self)(path, params, context).await
    }
}
