//! In-memory stand-in for the SerbisYo backend.
//!
//! Implements the REST contract the client crates speak (bearer auth, the
//! `{"message": ...}` error envelope, Jackson-style array timestamps) so the
//! core and async client can be exercised end-to-end without the real server.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::{self, Next},
    response::Response,
    Router,
};
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::trace::TraceLayer;

pub mod error;
pub mod routes;
pub mod store;

use error::MockError;
pub use store::Store;

pub type Db = Arc<RwLock<Store>>;

/// Id of the user a request's bearer token belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentUser(pub i64);

pub fn app() -> Router {
    app_with_store(Store::seeded())
}

pub fn app_with_store(store: Store) -> Router {
    let db: Db = Arc::new(RwLock::new(store));
    let protected = routes::protected().route_layer(middleware::from_fn_with_state(
        db.clone(),
        require_auth,
    ));
    routes::public()
        .merge(protected)
        .with_state(db)
        .layer(TraceLayer::new_for_http())
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    if let Ok(addr) = listener.local_addr() {
        tracing::info!(%addr, "mock backend listening");
    }
    axum::serve(listener, app()).await
}

async fn require_auth(
    State(db): State<Db>,
    mut request: Request,
    next: Next,
) -> Result<Response, MockError> {
    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or(MockError::Unauthorized)?;

    let user_id = db
        .read()
        .await
        .sessions
        .get(token)
        .copied()
        .ok_or(MockError::Unauthorized)?;

    request.extensions_mut().insert(CurrentUser(user_id));
    Ok(next.run(request).await)
}
