use axum::{
    http::{header, Method, Request},
    middleware,
    response::Html,
    routing::{get, post, put},
    Json, Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;

use crate::{handlers, middleware as mw, openapi::ApiDoc};

pub fn build_router(state: Arc<crate::AppState>) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(state.config.allowed_origin.clone())
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
        .expose_headers([mw::REQUEST_ID_HEADER])
        .allow_credentials(true);

    // Calendar routes
    let calendar_routes = Router::new()
        .route("/", get(handlers::calendar_handler::get_month))
        .route("/records", get(handlers::calendar_handler::get_records))
        .route("/check-in", post(handlers::calendar_handler::check_in))
        .route("/{date}", put(handlers::calendar_handler::set_status))
        .route("/{date}/cycle", post(handlers::calendar_handler::cycle_status))
        .route("/{date}/legend", post(handlers::calendar_handler::apply_legend))
        .route("/{date}/overtime", put(handlers::calendar_handler::set_overtime));

    // Settings routes
    let settings_routes = Router::new().route(
        "/",
        get(handlers::settings_handler::get_settings).put(handlers::settings_handler::update_settings),
    );

    // Schedule routes
    let schedule_routes = Router::new()
        .route(
            "/",
            get(handlers::schedules_handler::get_schedules)
                .post(handlers::schedules_handler::create_schedule),
        )
        .route(
            "/{id}",
            put(handlers::schedules_handler::update_schedule)
                .delete(handlers::schedules_handler::delete_schedule),
        );

    // Admin routes
    let admin_routes = Router::new().route("/growth", get(handlers::admin_handler::get_growth));

    let api_routes = Router::new()
        .nest("/api/calendar", calendar_routes)
        .nest("/api/settings", settings_routes)
        .nest("/api/schedules", schedule_routes)
        .nest("/api/admin", admin_routes)
        .route("/api/summary", get(handlers::summary_handler::get_summary))
        .route("/api/holidays", get(handlers::holidays_handler::get_holidays))
        .route("/health", get(handlers::health_check))
        .route_layer(middleware::from_fn(mw::metrics_middleware));

    Router::new()
        .merge(api_routes)
        .route("/metrics", get(handlers::metrics_handler))
        .route("/api-docs/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
        .route("/swagger-ui", get(swagger_ui))
        .layer(middleware::from_fn(mw::request_id_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = tracing::field::Empty,
                    user_id = tracing::field::Empty,
                )
            }),
        )
        .layer(cors)
        .with_state(state)
}

async fn swagger_ui() -> Html<&'static str> {
    Html(r#"
<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>WIO Tracker API Documentation</title>
    <link rel="stylesheet" type="text/css" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css" />
</head>
<body>
    <div id="swagger-ui"></div>
    <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js"></script>
    <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-standalone-preset.js"></script>
    <script>
        window.onload = () => {
            window.ui = SwaggerUIBundle({
                url: '/api-docs/openapi.json',
                dom_id: '#swagger-ui',
                presets: [
                    SwaggerUIBundle.presets.apis,
                    SwaggerUIStandalonePreset
                ],
                layout: "StandaloneLayout"
            });
        };
    </script>
</body>
</html>
    "#)
}
