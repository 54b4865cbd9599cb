use actix_web::{http::StatusCode, web, HttpResponse, Responder};
use validator::Validate;
use crate::core::{Auditor, ColorError, ContrastLevel};
use crate::models::{
    ContrastRequest, ContrastResponse, ErrorResponse, HeadingsRequest, HeadingsResponse, HealthResponse,
    PageAudit, PageAuditRequest, PaletteRequest, PaletteResponse, SuggestRequest, SuggestionResponse,
};
use crate::services::{CacheError, CacheKey, CacheManager, PageFetcher};
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub auditor: Auditor,
    pub fetcher: Arc<PageFetcher>,
    pub cache: Arc<CacheManager>,
}

/// Configure all audit routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/contrast", web::post().to(check_contrast))
        .route("/contrast/suggest", web::post().to(suggest_contrast))
        .route("/contrast/palette", web::post().to(check_palette))
        .route("/headings", web::post().to(check_headings))
        .route("/headings/page", web::post().to(check_page_headings));
}

fn error_response(status: StatusCode, error: &str, message: impl Into<String>) -> HttpResponse {
    HttpResponse::build(status).json(ErrorResponse {
        error: error.to_string(),
        message: message.into(),
        status_code: status.as_u16(),
    })
}

fn validation_failed(errors: validator::ValidationErrors) -> HttpResponse {
    error_response(StatusCode::BAD_REQUEST, "validation_failed", errors.to_string())
}

fn invalid_color(err: ColorError) -> HttpResponse {
    tracing::debug!("Rejected colour input: {}", err);
    error_response(StatusCode::BAD_REQUEST, "invalid_color_format", err.to_string())
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let cache = state.cache.health_check().await;
    let status = if cache == "redis-unreachable" { "degraded" } else { "healthy" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
        cache: cache.to_string(),
    })
}

/// Contrast ratio endpoint
///
/// POST /api/v1/contrast
///
/// Request body:
/// ```json
/// { "foreground": "#767676", "background": "#FFFFFF" }
/// ```
async fn check_contrast(
    state: web::Data<AppState>,
    req: web::Json<ContrastRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    match state.auditor.contrast(&req.foreground, &req.background) {
        Ok(result) => HttpResponse::Ok().json(ContrastResponse::from(result)),
        Err(e) => invalid_color(e),
    }
}

/// Compliant foreground suggestion endpoint
///
/// POST /api/v1/contrast/suggest
///
/// Request body:
/// ```json
/// { "foreground": "#AAAAAA", "background": "#FFFFFF", "level": "aa-normal" }
/// ```
async fn suggest_contrast(
    state: web::Data<AppState>,
    req: web::Json<SuggestRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    let level = match req.level.as_deref().map(str::parse::<ContrastLevel>).transpose() {
        Ok(level) => level,
        Err(message) => return error_response(StatusCode::BAD_REQUEST, "invalid_level", message),
    };

    match state.auditor.suggest(&req.foreground, &req.background, level) {
        Ok(suggestion) => HttpResponse::Ok().json(SuggestionResponse::from(suggestion)),
        Err(e) => invalid_color(e),
    }
}

/// Palette cross-check endpoint
///
/// POST /api/v1/contrast/palette
///
/// Request body:
/// ```json
/// { "colors": ["#000000", "#FFFFFF", "#0055AA"] }
/// ```
async fn check_palette(
    state: web::Data<AppState>,
    req: web::Json<PaletteRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    match state.auditor.palette(req.colors.as_slice()) {
        Ok(results) => {
            let pairs: Vec<ContrastResponse> = results.into_iter().map(ContrastResponse::from).collect();
            let aa_normal_pairs = pairs.iter().filter(|p| p.compliance.aa_normal).count();

            HttpResponse::Ok().json(PaletteResponse {
                total_pairs: pairs.len(),
                aa_normal_pairs,
                pairs,
            })
        }
        Err(e) => invalid_color(e),
    }
}

/// Heading hierarchy endpoint for inline HTML
///
/// POST /api/v1/headings
///
/// Request body:
/// ```json
/// { "html": "<h1>Title</h1><h2>Section</h2>" }
/// ```
async fn check_headings(
    state: web::Data<AppState>,
    req: web::Json<HeadingsRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    let report = state.auditor.headings(&req.html);
    HttpResponse::Ok().json(HeadingsResponse::new(report, None, chrono::Utc::now(), false))
}

/// Heading hierarchy endpoint for a remote page
///
/// POST /api/v1/headings/page
///
/// Request body:
/// ```json
/// { "url": "https://shop.example/", "forceRefresh": false }
/// ```
///
/// Reports are cached per URL for the configured TTL. `forceRefresh` evicts
/// the cached report before fetching, so a failed refresh is not masked by it.
async fn check_page_headings(
    state: web::Data<AppState>,
    req: web::Json<PageAuditRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    let url = match PageFetcher::parse_url(&req.url) {
        Ok(url) => url.to_string(),
        Err(e) => return error_response(StatusCode::BAD_REQUEST, "invalid_url", e.to_string()),
    };
    let cache_key = CacheKey::page_audit(&url);

    if !req.force_refresh {
        match state.cache.get::<PageAudit>(&cache_key).await {
            Ok(audit) => {
                tracing::debug!("Serving cached heading report for {}", url);
                return HttpResponse::Ok().json(HeadingsResponse::new(
                    audit.report,
                    Some(audit.url),
                    audit.fetched_at,
                    true,
                ));
            }
            Err(CacheError::CacheMiss(_)) => {}
            Err(e) => tracing::warn!("Cache read failed for {}, fetching: {}", url, e),
        }
    } else if let Err(e) = state.cache.delete(&cache_key).await {
        tracing::warn!("Failed to evict cached report for {}: {}", url, e);
    }

    let page = match state.fetcher.fetch(&url).await {
        Ok(page) => page,
        Err(e) if e.is_client_error() => {
            return error_response(StatusCode::BAD_REQUEST, "invalid_url", e.to_string());
        }
        Err(e) => {
            tracing::warn!("Failed to fetch {}: {}", url, e);
            return error_response(StatusCode::BAD_GATEWAY, "fetch_failed", e.to_string());
        }
    };

    let audit = PageAudit {
        url,
        resolved_url: page.url,
        fetched_at: chrono::Utc::now(),
        report: state.auditor.headings(&page.html),
    };

    tracing::info!(
        "Checked headings for {}: score {}, {} issues",
        audit.url,
        audit.report.score,
        audit.report.issues.len()
    );

    if let Err(e) = state.cache.set(&cache_key, &audit).await {
        tracing::warn!("Failed to cache heading report for {}: {}", audit.url, e);
    }

    HttpResponse::Ok().json(HeadingsResponse::new(
        audit.report,
        Some(audit.url),
        audit.fetched_at,
        false,
    ))
}
