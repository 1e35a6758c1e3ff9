use crate::{
    api::{employee, leave},
    config::Config,
};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::web;
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

    let write_limiter = Arc::new(build_limiter(config.rate_write_per_min));
    let api_limiter = Arc::new(build_limiter(config.rate_api_per_min));

    cfg.service(
        web::scope(&config.api_prefix)
            .wrap(api_limiter)
            .service(
                web::scope("/employees")
                    // /employees
                    .service(
                        web::resource("")
                            .wrap(write_limiter.clone())
                            .route(web::post().to(employee::create_employee))
                            .route(web::get().to(employee::list_employees)),
                    )
                    // /employees/{id}
                    .service(
                        web::resource("/{id}").route(web::get().to(employee::get_employee)),
                    )
                    // /employees/{id}/balance
                    .service(
                        web::resource("/{id}/balance").route(web::get().to(employee::get_balance)),
                    )
                    // /employees/{id}/leaves
                    .service(
                        web::resource("/{id}/leaves")
                            .route(web::get().to(employee::employee_leaves)),
                    ),
            )
            .service(
                web::scope("/leaves")
                    // /leaves
                    .service(
                        web::resource("")
                            .wrap(write_limiter.clone())
                            .route(web::post().to(leave::apply_leave)),
                    )
                    // /leaves/{id}
                    .service(
                        web::resource("/{id}")
                            .wrap(write_limiter)
                            .route(web::put().to(leave::decide_leave))
                            .route(web::get().to(leave::get_leave)),
                    ),
            ),
    );
}
