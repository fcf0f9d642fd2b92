pub mod admin_handler;
pub mod health_handler;
pub mod prompt_handler;

pub use admin_handler::{admin_login, analyze_submission, batch_analysis, list_submissions};
pub use health_handler::{health_check, health_check_ready};
pub use prompt_handler::generate_prompt;

use actix_web::web;

/// Registers every route on an actix `App`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(health_check)
        .service(health_check_ready)
        .service(generate_prompt)
        .service(admin_login)
        .service(list_submissions)
        .service(analyze_submission)
        .service(batch_analysis);
}
