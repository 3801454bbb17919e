use std::{
    env,
    sync::{Arc, Mutex},
};

use anyhow::anyhow;
use generic_router::{Flow, Params, Router};
use tracing::info;
use tracing_subscriber::EnvFilter;

type Visits = Mutex<Vec<String>>;

fn visit(visits: &Visits, path: &str) -> anyhow::Result<()> {
    visits
        .lock()
        .map_err(|_| anyhow!("Mutex poisoned when recording {}", path))?
        .push(path.to_string());
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let mut router: Router<Visits, String> = Router::new();
    router
        .path(
            "/",
            |path: String, _params: Params, visits: Arc<Visits>| async move {
                visit(&visits, &path)?;
                anyhow::Ok(Flow::Continue)
            },
        )?
        .resource(
            "/",
            |_path: String, _params: Params, _visits: Arc<Visits>| async move {
                anyhow::Ok(Flow::Stop("home".to_string()))
            },
        )?
        .path(
            "/users/:id(\\d+)",
            |path: String, params: Params, _visits: Arc<Visits>| async move {
                let id = params.get("id").unwrap_or_default();
                anyhow::Ok(Flow::Stop(format!("user {} ({})", id, path)))
            },
        )?
        .resource(
            "/files/:path+",
            |_path: String, params: Params, _visits: Arc<Visits>| async move {
                let file = params.get("path").unwrap_or_default();
                anyhow::Ok(Flow::Stop(format!("file {}", file)))
            },
        )?;

    let visits = Arc::new(Visits::default());
    for path in env::args().skip(1) {
        match router.handle(&path, visits.clone()).await? {
            Some(result) => info!("{} -> {}", path, result),
            None => info!("{} -> no route", path),
        }
    }
    let visited = visits
        .lock()
        .map_err(|_| anyhow!("Mutex poisoned when reading visits"))?
        .len();
    info!("Dispatched {} paths", visited);
    Ok(())
}
