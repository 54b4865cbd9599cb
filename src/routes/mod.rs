// Route exports
pub mod audit;
pub mod errors;

use actix_web::web;

pub use audit::AppState;
pub use errors::{json_config, query_config, JsonError};

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(audit::configure),
    );
}
