//! Path based dispatcher.
//!
//! Routes are registered in order with [Router::path] (matches the template
//! and everything below it) or [Router::resource] (matches the template
//! only). [Router::handle] runs the handlers of matching routes one by one
//! until a handler returns [Flow::Stop].
//!
//! # Example usage
//!
//! ```
//! use std::sync::Arc;
//!
//! use generic_router::{Flow, Params, Router};
//!
//! # tokio_test();
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn tokio_test() {
//! let mut router: Router<(), String> = Router::new();
//! router
//!     .path("/users/:id", |_path: String, params: Params, _ctx: Arc<()>| async move {
//!         let id = params.get("id").unwrap_or_default().to_string();
//!         anyhow::Ok(Flow::Stop(id))
//!     })
//!     .unwrap();
//!
//! let result = router.handle("/users/42/posts", Arc::new(())).await.unwrap();
//! assert_eq!(result.as_deref(), Some("42"));
//! # }
//! ```
pub mod pattern;
mod router;

pub use pattern::{Compiler, Matcher, Options, RegexCompiler};
pub use router::{Dispatch, Flow, Handler, HandlerService, Params, Route, Router};
