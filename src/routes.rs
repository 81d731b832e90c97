use crate::{
    api::{attendance, employee},
    auth::middleware::auth_middleware,
    config::Config,
};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::{middleware::from_fn, web};
use std::sync::Arc;

pub fn configure(cfg: &mut web::ServiceConfig, config: Config) {
    // Helper to build per-route limiter
    fn build_limiter(requests_per_min: u32) -> Governor<PeerIpKeyExtractor, NoOpMiddleware> {
        let per_ms = if requests_per_min == 0 {
            1
        } else {
            60_000 / requests_per_min as u64
        };
        let cfg = GovernorConfigBuilder::default()
            .per_millisecond(per_ms)
            .burst_size(requests_per_min)
            .key_extractor(PeerIpKeyExtractor)
            .finish()
            .unwrap();
        Governor::new(&cfg)
    }

    let report_limiter = Arc::new(build_limiter(config.rate_report_per_min));
    let export_limiter = Arc::new(build_limiter(config.rate_export_per_min));
    let protected_limiter = Arc::new(build_limiter(config.rate_protected_per_min));

    // Everything is bearer-protected; the report and export routes get their
    // own tighter limits on top of the scope-wide one.
    cfg.service(
        web::scope(&config.api_prefix)
            .wrap(from_fn(auth_middleware))
            .wrap(protected_limiter)
            .service(
                web::scope("/attendance")
                    // /attendance
                    .service(
                        web::resource("")
                            .wrap(report_limiter.clone())
                            .route(web::get().to(attendance::attendance_report)),
                    )
                    // /attendance/export
                    .service(
                        web::resource("/export")
                            .wrap(export_limiter.clone())
                            .route(web::get().to(attendance::export_report)),
                    ),
            )
            .service(
                web::scope("/employees")
                    // /employees
                    .service(web::resource("").route(web::get().to(employee::list_employees))),
            ),
    );
}
