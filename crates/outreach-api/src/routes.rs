//! API routes

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::handlers::{
    accounts, campaigns, contacts, email_lists, health, personalization, uploads,
};
use crate::state::AppState;

/// Create the API router
pub fn create_router(state: Arc<AppState>) -> Router {
    // Health check routes
    let health_routes = Router::new()
        .route("/", get(health::health))
        .route("/live", get(health::liveness))
        .route("/ready", get(health::readiness));

    // Campaign routes
    let campaign_routes = Router::new()
        .route("/", get(campaigns::list_campaigns))
        .route("/", post(campaigns::create_campaign))
        .route("/:campaign_id", get(campaigns::get_campaign))
        .route("/:campaign_id", put(campaigns::update_campaign))
        .route("/:campaign_id", delete(campaigns::delete_campaign))
        .route("/:campaign_id/content", get(campaigns::get_content))
        .route("/:campaign_id/content", put(campaigns::put_content))
        .route("/:campaign_id/launch", post(campaigns::launch_campaign));

    // Email list and contact routes
    let list_routes = Router::new()
        .route("/", get(email_lists::list_lists))
        .route("/", post(email_lists::create_list))
        .route("/:list_id", get(email_lists::get_list))
        .route("/:list_id", delete(email_lists::delete_list))
        .route("/:list_id/contacts", get(contacts::list_contacts))
        .route("/:list_id/contacts", post(contacts::add_contact))
        .route(
            "/:list_id/contacts/:contact_id",
            delete(contacts::delete_contact),
        );

    // Sender account routes
    let account_routes = Router::new()
        .route("/", get(accounts::list_accounts))
        .route("/smtp", post(accounts::create_smtp_account))
        .route("/:account_id", delete(accounts::deactivate_account));

    // Upload routes
    let upload_routes = Router::new()
        .route("/", get(uploads::list_uploads))
        .route("/", post(uploads::create_upload))
        .route("/:upload_id", get(uploads::get_upload));

    // Personalization routes
    let personalization_routes =
        Router::new().route("/generate", post(personalization::generate_pitches));

    let api = Router::new()
        .nest("/campaigns", campaign_routes)
        .nest("/lists", list_routes)
        .nest("/accounts", account_routes)
        .nest("/uploads", upload_routes)
        .nest("/personalization", personalization_routes);

    Router::new()
        .nest("/health", health_routes)
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
