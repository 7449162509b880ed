use actix_web::{http::Method, web, HttpRequest, HttpResponse};

use crate::startup::FrontendPath;

/// Every unmatched GET gets the presentation bundle's entry page.
#[tracing::instrument(name = "Serving the frontend", skip(req, frontend_path), fields(path = %req.path()))]
pub async fn serve_frontend(
    req: HttpRequest,
    frontend_path: web::Data<FrontendPath>,
) -> HttpResponse {
    if *req.method() != Method::GET {
        return HttpResponse::NotFound().finish();
    }

    match tokio::fs::read(frontend_path.0.join("index.html")).await {
        Ok(index) => HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(index),
        Err(err) => {
            tracing::warn!("Frontend bundle is not available: {:?}", err);
            HttpResponse::NotFound().finish()
        }
    }
}
