use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::delete;
use axum::routing::get;
use axum::routing::post;
use axum::routing::put;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::create_comment::create_comment;
use super::handlers::create_post::create_post;
use super::handlers::get_feed::get_feed;
use super::handlers::get_me::get_me;
use super::handlers::get_post::get_post;
use super::handlers::healthcheck::healthcheck;
use super::handlers::list_posts::list_posts;
use super::handlers::list_topics::list_topics;
use super::handlers::login::login;
use super::handlers::register::register;
use super::handlers::subscribe_topic::subscribe_topic;
use super::handlers::unsubscribe_topic::unsubscribe_topic;
use super::handlers::update_me::update_me;
use super::middleware::require_authentication;
use super::middleware::resolve_identity;
use crate::domain::post::ports::PostServicePort;
use crate::domain::topic::ports::TopicServicePort;
use crate::domain::user::ports::UserServicePort;

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServicePort>,
    pub topic_service: Arc<dyn TopicServicePort>,
    pub post_service: Arc<dyn PostServicePort>,
    pub authenticator: Arc<Authenticator>,
    pub jwt_expiration_hours: i64,
}

pub fn create_router(
    user_service: Arc<dyn UserServicePort>,
    topic_service: Arc<dyn TopicServicePort>,
    post_service: Arc<dyn PostServicePort>,
    authenticator: Arc<Authenticator>,
    jwt_expiration_hours: i64,
) -> Router {
    let state = AppState {
        user_service,
        topic_service,
        post_service,
        authenticator,
        jwt_expiration_hours,
    };

    let public_routes = Router::new()
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
        .route("/api/healthcheck", get(healthcheck));

    // "/api/posts/feed" must stay a static segment; axum matches it ahead
    // of the ":post_id" capture.
    let protected_routes = Router::new()
        .route("/api/users/me", get(get_me))
        .route("/api/users/me", put(update_me))
        .route("/api/topics", get(list_topics))
        .route("/api/topics/:topic_id/subscribe", post(subscribe_topic))
        .route("/api/topics/:topic_id/unsubscribe", delete(unsubscribe_topic))
        .route("/api/posts", get(list_posts))
        .route("/api/posts", post(create_post))
        .route("/api/posts/feed", get(get_feed))
        .route("/api/posts/:post_id", get(get_post))
        .route("/api/posts/:post_id/comments", post(create_comment))
        .route_layer(middleware::from_fn(require_authentication));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            resolve_identity,
        ))
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
