use actix_files::NamedFile;
use actix_web::error::InternalError;
use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::{web, HttpRequest, HttpResponse, Responder};
use log::{debug, error, info};
use uuid::Uuid;

use super::models::{GenerateResponse, HealthResponse, NoticeRequest};
use crate::{AppState, ErrorResponse};

pub const DOWNLOAD_FILENAME: &str = "legal_notice.pdf";

/// Landing page - GET /
pub async fn index() -> actix_web::Result<NamedFile> {
    let path = crate::get_static_dir().join("index.html");
    Ok(NamedFile::open_async(path).await?)
}

#[utoipa::path(
    tag = "Notice Service",
    post,
    path = "/generate",
    request_body = NoticeRequest,
    responses(
        (status = 200, description = "Outcome of the generation; check `success`", body = GenerateResponse)
    )
)]
pub async fn generate_notice(
    data: web::Data<AppState>,
    req: web::Json<NoticeRequest>,
) -> impl Responder {
    let request = req.into_inner();
    info!(
        "Executing generate_notice handler for notice type '{}'",
        request.notice_type
    );

    match data.pipeline.run(request).await {
        Ok(outcome) => {
            info!(
                "Notice generated: {} page(s), delivered as {}",
                outcome.page_count,
                data.pipeline.delivery().as_str()
            );
            HttpResponse::Ok().json(GenerateResponse::from(outcome))
        }
        Err(e) => {
            error!("Notice generation failed: {}", e);
            HttpResponse::Ok().json(GenerateResponse::failure(e.to_string()))
        }
    }
}

#[utoipa::path(
    tag = "Notice Service",
    get,
    path = "/download/{id}",
    params(
        ("id" = String, Path, description = "Identifier returned in `pdf_url`")
    ),
    responses(
        (status = 200, description = "The generated PDF", body = Vec<u8>, content_type = "application/pdf"),
        (status = 400, description = "Malformed identifier", body = ErrorResponse),
        (status = 404, description = "Unknown or expired document", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn download_notice(
    data: web::Data<AppState>,
    path: web::Path<String>,
) -> impl Responder {
    let raw_id = path.into_inner();
    info!("Executing download_notice handler for id: {}", &raw_id);

    let id = match Uuid::parse_str(raw_id.trim_end_matches(".pdf")) {
        Ok(id) => id,
        Err(_) => {
            error!("Invalid document id: {}", &raw_id);
            return HttpResponse::BadRequest()
                .json(ErrorResponse::bad_request("Invalid document id"));
        }
    };

    let Some(store) = data.pipeline.artifacts() else {
        debug!("Download requested but notices are delivered inline");
        return HttpResponse::NotFound()
            .json(ErrorResponse::not_found("Downloads are not enabled"));
    };

    match store.load(&id).await {
        Ok(Some(bytes)) => HttpResponse::Ok()
            .content_type("application/pdf")
            .insert_header(ContentDisposition {
                disposition: DispositionType::Attachment,
                parameters: vec![DispositionParam::Filename(DOWNLOAD_FILENAME.to_string())],
            })
            .body(bytes),
        Ok(None) => {
            error!("Document not found: {}", id);
            HttpResponse::NotFound().json(ErrorResponse::not_found(&format!(
                "Document '{}' not found or expired",
                id
            )))
        }
        Err(e) => {
            error!("Failed to read document {}: {}", id, e);
            HttpResponse::InternalServerError()
                .json(ErrorResponse::internal_error("Failed to read document"))
        }
    }
}

#[utoipa::path(
    tag = "Notice Service",
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse)
    )
)]
pub async fn health(data: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "ok".to_string(),
        delivery: data.pipeline.delivery().as_str().to_string(),
    })
}

/// Malformed bodies get the same failure envelope as pipeline errors.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req: &HttpRequest| {
        error!("Rejected generate request body: {}", err);
        let response = HttpResponse::Ok().json(GenerateResponse::failure(format!(
            "Invalid request body: {}",
            err
        )));
        InternalError::from_response(err, response).into()
    })
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/").route(web::get().to(index)))
        .service(
            web::resource("/generate")
                .app_data(json_config())
                .route(web::post().to(generate_notice)),
        )
        .service(web::resource("/download/{id}").route(web::get().to(download_notice)))
        .service(web::resource("/health").route(web::get().to(health)));
}
