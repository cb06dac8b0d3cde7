use axum::{
    Router,
    extract::{Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::Response,
    routing::{get, post, put},
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};

use std::sync::Arc;

use crate::{chickens, coops, feeds, orders, products, stores, users};
use engine::Engine;

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
}

/// Resolve the bearer token to a user and stash it in the request extensions.
async fn auth(
    auth_header: Option<TypedHeader<Authorization<Bearer>>>,
    State(state): State<ServerState>,
    mut request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let auth_header = auth_header.ok_or(StatusCode::UNAUTHORIZED)?;
    let user = state
        .engine
        .user_by_token(auth_header.token())
        .await
        .map_err(|_| StatusCode::UNAUTHORIZED)?;

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

pub fn router(state: ServerState) -> Router {
    let account = Router::new()
        .route("/api/users/me", get(users::me))
        .route("/api/users/profile", put(users::update_profile))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth));

    Router::new()
        .route("/api/coops", get(coops::list).post(coops::create))
        .route(
            "/api/coops/{id}",
            get(coops::get).put(coops::update).delete(coops::remove),
        )
        .route("/api/coops/{id}/recompute", post(coops::recompute))
        .route(
            "/api/chickens",
            get(chickens::list).post(chickens::create),
        )
        .route(
            "/api/chickens/coop/{coop_id}",
            get(chickens::list_for_coop),
        )
        .route(
            "/api/chickens/{id}",
            get(chickens::get).delete(chickens::remove),
        )
        .route("/api/feed", get(feeds::list).post(feeds::create))
        .route("/api/feed/{id}", get(feeds::get).delete(feeds::remove))
        .route("/api/products", get(products::list).post(products::create))
        .route(
            "/api/products/{id}",
            get(products::get)
                .put(products::update)
                .delete(products::remove),
        )
        .route("/api/orders", get(orders::list).post(orders::create))
        .route(
            "/api/orders/{id}",
            get(orders::get).put(orders::update).delete(orders::remove),
        )
        .route("/api/stores", get(stores::list).post(stores::create))
        .route(
            "/api/stores/{id}",
            get(stores::get).put(stores::update).delete(stores::remove),
        )
        .route("/api/users/register", post(users::register))
        .route("/api/users/login", post(users::login))
        .merge(account)
        .route("/", get(|| async { "ok" }))
        .with_state(state)
}

pub async fn run(engine: Engine) {
    let listener = match tokio::net::TcpListener::bind("127.0.0.1:3000").await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("failed to bind server listener: {err}");
            return;
        }
    };
    if let Err(err) = run_with_listener(engine, listener).await {
        tracing::error!("server failed: {err}");
    }
}

pub async fn run_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    let state = ServerState {
        engine: Arc::new(engine),
    };

    axum::serve(listener, router(state)).await
}

pub fn spawn_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
) -> Result<std::net::SocketAddr, std::io::Error> {
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(err) = run_with_listener(engine, listener).await {
            tracing::error!("server failed: {err}");
        }
    });

    Ok(addr)
}
