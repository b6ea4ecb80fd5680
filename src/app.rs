use axum::{
    http::{header, HeaderValue, Method},
    middleware::from_fn_with_state,
    routing::{get, patch, post},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::config::AppConfig;
use crate::handlers::{protected, public};
use crate::middleware::session_auth_middleware;
use crate::state::AppState;

/// Full HTTP surface: public routes, session-protected routes, global layers.
pub fn app(state: AppState) -> Router {
    let cors = cors_layer(&state.config);

    Router::new()
        .merge(public_routes())
        .merge(protected_routes(state.clone()))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn public_routes() -> Router<AppState> {
    use public::{auth, system};

    Router::new()
        .route("/", get(system::root))
        .route("/health", get(system::health))
        .route("/auth/signup", post(auth::signup))
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
}

fn protected_routes(state: AppState) -> Router<AppState> {
    use protected::{auth, tasks};

    Router::new()
        .route("/auth/me", get(auth::whoami))
        .route("/tasks", get(tasks::task_list).post(tasks::task_create))
        .route("/tasks/:id", patch(tasks::task_update))
        .route_layer(from_fn_with_state(state, session_auth_middleware))
}

// Cookies need credentialed CORS, which rules out a wildcard origin
fn cors_layer(config: &AppConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .security
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PATCH])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true)
}
