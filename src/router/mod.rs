use std::{fmt, sync::Arc};

use anyhow::Result;
use tracing::{debug, trace};

use crate::pattern::{self, Compiler, CompilerService, Matcher, Options, RegexCompiler};

pub use handler::{Flow, Handler, HandlerService};
pub use params::Params;

mod handler;
mod params;

/// A compiled template together with its handler.
pub struct Route<C, R> {
    pattern: String,
    options: Options,
    matcher: Box<dyn Matcher>,
    param_names: Vec<String>,
    handler: HandlerService<C, R>,
}

impl<C, R> fmt::Debug for Route<C, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("pattern", &self.pattern)
            .field("matcher", &self.matcher)
            .field("param_names", &self.param_names)
            .finish_non_exhaustive()
    }
}

impl<C, R> Route<C, R> {
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn matcher(&self) -> &dyn Matcher {
        self.matcher.as_ref()
    }

    pub fn param_names(&self) -> &[String] {
        &self.param_names
    }

    /// Whether the route only matches whole paths.
    pub fn is_exact(&self) -> bool {
        self.options.end
    }

    /// Matches `path` and maps captured groups onto parameter names.
    pub fn matches(&self, path: &str) -> Option<Params> {
        let found = self.matcher.exec(path)?;
        Some(
            self.param_names
                .iter()
                .cloned()
                .zip(found.groups)
                .collect(),
        )
    }
}

/// Result of [Router::dispatch].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch<R> {
    /// The route at `index` stopped dispatching with `value`.
    Handled { index: usize, value: R },
    /// No handler stopped dispatching. `declined` matching routes returned
    /// [Flow::Continue].
    Unhandled { declined: usize },
}

impl<R> Dispatch<R> {
    pub fn is_handled(&self) -> bool {
        matches!(self, Self::Handled { .. })
    }

    pub fn into_value(self) -> Option<R> {
        match self {
            Self::Handled { value, .. } => Some(value),
            Self::Unhandled { .. } => None,
        }
    }
}

/// Dispatches paths to the first matching route whose handler does not
/// return [Flow::Continue]. Routes are tried in registration order.
pub struct Router<C = (), R = ()> {
    compiler: CompilerService,
    routes: Vec<Route<C, R>>,
}

impl<C, R> fmt::Debug for Router<C, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("routes", &self.routes)
            .finish_non_exhaustive()
    }
}

impl<C, R> Default for Router<C, R>
where
    C: Send + Sync + 'static,
    R: Send + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<C, R> Router<C, R>
where
    C: Send + Sync + 'static,
    R: Send + 'static,
{
    pub fn new() -> Self {
        Self::with_compiler(RegexCompiler)
    }

    /// Create a router compiling its templates with `compiler`.
    pub fn with_compiler(compiler: impl Compiler + 'static) -> Self {
        Self {
            compiler: Box::new(compiler),
            routes: Vec::new(),
        }
    }

    /// Register a route matching `pattern` and everything below it.
    pub fn path(
        &mut self,
        pattern: &str,
        handler: impl Handler<C, R> + 'static,
    ) -> pattern::Result<&mut Self> {
        self.add(pattern, false, handler)
    }

    /// Register a route matching exactly `pattern`.
    pub fn resource(
        &mut self,
        pattern: &str,
        handler: impl Handler<C, R> + 'static,
    ) -> pattern::Result<&mut Self> {
        self.add(pattern, true, handler)
    }

    /// Compile `pattern` case sensitively and without trailing delimiter
    /// tolerance, then append the route. Nothing is registered when the
    /// compiler rejects the pattern.
    pub fn add(
        &mut self,
        pattern: &str,
        end: bool,
        handler: impl Handler<C, R> + 'static,
    ) -> pattern::Result<&mut Self> {
        let options = Options::default()
            .with_end(end)
            .with_sensitive(true)
            .with_strict(true);
        let compiled = self.compiler.compile(pattern, &options)?;
        debug!(
            "Registered {} route {} as {}",
            if end { "exact" } else { "prefix" },
            pattern,
            compiled.matcher.source()
        );
        let param_names = compiled.param_names();
        self.routes.push(Route {
            pattern: pattern.to_string(),
            options,
            matcher: compiled.matcher,
            param_names,
            handler: Box::new(handler),
        });
        Ok(self)
    }

    pub fn routes(&self) -> &[Route<C, R>] {
        &self.routes
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Dispatch `path`, telling apart a handler that stopped dispatching from
    /// no handler stopping at all.
    ///
    /// Handlers run one after another, each awaited before the next route is
    /// tested. A handler error is returned as is and ends the dispatch.
    pub async fn dispatch(&self, path: &str, context: Arc<C>) -> Result<Dispatch<R>> {
        let mut declined = 0;
        for (index, route) in self.routes.iter().enumerate() {
            let Some(params) = route.matches(path) else {
                continue;
            };
            trace!("Path {} matched route {}", path, route.pattern);
            match route
                .handler
                .call(path.to_string(), params, context.clone())
                .await?
            {
                Flow::Stop(value) => {
                    debug!("Path {} handled by route {}", path, route.pattern);
                    return Ok(Dispatch::Handled { index, value });
                }
                Flow::Continue => {
                    trace!("Route {} declined path {}", route.pattern, path);
                    declined += 1;
                }
            }
        }
        debug!("No route handled path {}", path);
        Ok(Dispatch::Unhandled { declined })
    }

    /// Dispatch `path` and return the value of the handler that stopped
    /// dispatching, or `None` if every matching handler continued or nothing
    /// matched.
    pub async fn handle(&self, path: &str, context: Arc<C>) -> Result<Option<R>> {
        self.dispatch(path, context).await.map(Dispatch::into_value)
    }
}
