pub mod api;
pub mod audit_handlers;
pub mod committee_handlers;
pub mod dashboard;
pub mod document_handlers;
pub mod notification_handlers;
pub mod project_handlers;
pub mod value_list_handlers;

use actix_web::{
    Error, HttpResponse,
    body::MessageBody,
    dev::{ServiceRequest, ServiceResponse},
    error::JsonPayloadError,
    http::Method,
    middleware::Next,
    web,
};

use crate::errors::ApiErrorResponse;

/// Rejects mutation requests whose body is not declared as JSON.
/// GET requests are exempt.
async fn require_json_content_type(
    req: ServiceRequest,
    next: Next<impl MessageBody + 'static>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    let method = req.method().clone();

    if method == Method::POST || method == Method::PUT || method == Method::PATCH || method == Method::DELETE {
        let content_type = req
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("");

        if !content_type.starts_with("application/json") {
            let body = ApiErrorResponse {
                error: "Content-Type must be application/json for mutation requests".to_string(),
                details: None,
            };
            let response = HttpResponse::BadRequest().json(body);
            return Ok(req.into_response(response).map_into_right_body());
        }
    }

    next.call(req).await.map(|res| res.map_into_left_body())
}

/// Malformed JSON bodies answer with the same error shape as every other failure.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(256 * 1024)
        .error_handler(|err: JsonPayloadError, _req| {
            let body = ApiErrorResponse {
                error: format!("Invalid JSON body: {err}"),
                details: None,
            };
            let response = HttpResponse::BadRequest().json(body);
            actix_web::error::InternalError::from_response(err, response).into()
        })
}

pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiErrorResponse {
        error: "Not found".to_string(),
        details: None,
    })
}

/// Configure all API routes. Mounted under `/api`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/documents")
            .wrap(actix_web::middleware::from_fn(require_json_content_type))
            .route("", web::get().to(document_handlers::list))
            .route("", web::post().to(document_handlers::create))
            .route("/{id}", web::get().to(document_handlers::read))
            .route("/{id}", web::patch().to(document_handlers::update))
            .route("/{id}/transition", web::post().to(document_handlers::transition))
            .route("/{id}/actions", web::get().to(document_handlers::actions))
            .route("/{id}/charter", web::post().to(document_handlers::create_charter)),
    );
    cfg.service(
        web::scope("/projects")
            .wrap(actix_web::middleware::from_fn(require_json_content_type))
            .route("", web::get().to(project_handlers::list))
            .route("", web::post().to(project_handlers::create))
            .route("/{id}", web::get().to(project_handlers::read))
            .route("/{id}/updates", web::post().to(project_handlers::record_update))
            .route("/{id}/spend", web::post().to(project_handlers::record_spend))
            .route("/{id}/notifications", web::get().to(notification_handlers::for_project))
            .route("/{id}/notifications/send", web::post().to(notification_handlers::send))
            .route(
                "/{id}/notifications/{reminder_id}/ack",
                web::post().to(notification_handlers::acknowledge),
            ),
    );
    cfg.route("/notifications", web::get().to(notification_handlers::list));
    cfg.service(
        web::scope("/notification-rules")
            .wrap(actix_web::middleware::from_fn(require_json_content_type))
            .route("", web::get().to(notification_handlers::rules))
            .route("", web::put().to(notification_handlers::update_rules)),
    );
    cfg.service(
        web::scope("/committees")
            .wrap(actix_web::middleware::from_fn(require_json_content_type))
            .route("/summary", web::get().to(committee_handlers::summary))
            .route("/portfolio", web::get().to(committee_handlers::portfolio))
            .route("/sessions", web::get().to(committee_handlers::list))
            .route("/sessions", web::post().to(committee_handlers::create))
            .route("/sessions/{id}", web::get().to(committee_handlers::read))
            .route("/sessions/{id}/items", web::post().to(committee_handlers::add_item))
            .route("/sessions/{id}/decisions", web::post().to(committee_handlers::record_decision))
            .route("/sessions/{id}/complete", web::post().to(committee_handlers::complete)),
    );
    cfg.service(
        web::scope("/value-lists")
            .wrap(actix_web::middleware::from_fn(require_json_content_type))
            .route("", web::get().to(value_list_handlers::list))
            .route("/{id}", web::get().to(value_list_handlers::read))
            .route("/{id}/export", web::get().to(value_list_handlers::export))
            .route("/{id}/audit", web::get().to(value_list_handlers::audit))
            .route("/{id}/items", web::post().to(value_list_handlers::add_item))
            .route("/{id}/items/{item_id}", web::put().to(value_list_handlers::update_item))
            .route("/{id}/items/{item_id}", web::delete().to(value_list_handlers::delete_item))
            .route("/{id}/items/{item_id}/move", web::post().to(value_list_handlers::move_item)),
    );
    cfg.route("/dashboard", web::get().to(dashboard::stats));
    cfg.route("/audit", web::get().to(audit_handlers::list));
}
