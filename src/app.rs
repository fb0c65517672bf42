use axum::{
    extract::Request,
    http::{HeaderValue, Method, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};

use crate::config::AppConfig;
use crate::database::TeacherStore;
use crate::error::ApiError;
use crate::handlers;
use crate::validation::ValidationRules;

/// Shared handler state. Cloned per request; the store sits behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn TeacherStore>,
    pub rules: ValidationRules,
    pub mount_path: String,
}

impl AppState {
    pub fn new(store: Arc<dyn TeacherStore>, config: &AppConfig) -> Self {
        Self {
            store,
            rules: ValidationRules::from(&config.validation),
            mount_path: config.server.mount_path.clone(),
        }
    }
}

/// Build the full router: service routes, teacher routes under the mount path, global middleware
pub fn app(state: AppState, config: &AppConfig) -> Router {
    let mount_path = state.mount_path.clone();
    let body_limit = config.server.max_request_size_bytes;

    let mut router = Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .nest(&mount_path, teacher_routes())
        .fallback(handlers::fallback)
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(middleware::from_fn(move |request: Request, next: Next| {
            json_payload_too_large(body_limit, request, next)
        }));

    if config.security.enable_cors {
        router = router.layer(cors_layer(&config.security.cors_origins));
    }
    if config.server.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }

    router.with_state(state)
}

fn teacher_routes() -> Router<AppState> {
    use handlers::teachers;

    Router::new()
        .route("/", axum::routing::post(teachers::teacher_post))
        .route("/user/:uid", get(teachers::teachers_by_user_get))
        .route(
            "/:tid",
            get(teachers::teacher_get)
                .patch(teachers::teacher_patch)
                .delete(teachers::teacher_delete),
        )
}

/// The body limit layer answers 413 in plain text; give it the same JSON shape as every other error
async fn json_payload_too_large(limit: usize, request: Request, next: Next) -> Response {
    let response = next.run(request).await;
    if response.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return ApiError::payload_too_large(limit).into_response();
    }
    response
}

/// No configured origins means any origin
fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
        .allow_headers(Any);

    let parsed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    if parsed.is_empty() {
        layer.allow_origin(Any)
    } else {
        layer.allow_origin(AllowOrigin::list(parsed))
    }
}
