use crate::{
    api::{attendance, payroll, staff},
    config::Config,
};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor,
    governor::middleware::NoOpMiddleware,
};
use actix_web::web;

type LimiterConfig = actix_governor::GovernorConfig<PeerIpKeyExtractor, NoOpMiddleware>;

pub fn configure(cfg: &mut web::ServiceConfig, config: Config) {
    // Helper to build per-route limiter config
    fn build_limiter(requests_per_min: u32) -> LimiterConfig {
        let per_ms = if requests_per_min == 0 {
            1
        } else {
            60_000 / requests_per_min as u64
        };
        GovernorConfigBuilder::default()
            .per_millisecond(per_ms)
            .burst_size(requests_per_min)
            .key_extractor(PeerIpKeyExtractor)
            .finish()
            .unwrap()
    }

    let api_limiter = build_limiter(config.rate_api_per_min);
    // A payroll run rewrites the month's whole salary batch, so it gets a
    // much tighter budget than the read/write endpoints.
    let run_limiter = build_limiter(config.rate_payroll_run_per_min);

    cfg.service(
        web::scope(&config.api_prefix)
            .wrap(Governor::new(&api_limiter))
            .service(
                web::scope("/staff")
                    // /staff
                    .service(
                        web::resource("")
                            .route(web::post().to(staff::create_staff))
                            .route(web::get().to(staff::list_staff)),
                    )
                    // /staff/{id}
                    .service(
                        web::resource("/{id}")
                            .route(web::put().to(staff::update_staff))
                            .route(web::get().to(staff::get_staff))
                            .route(web::delete().to(staff::delete_staff)),
                    ),
            )
            .service(
                web::scope("/attendance")
                    // /attendance
                    .service(
                        web::resource("")
                            .route(web::post().to(attendance::record_attendance))
                            .route(web::get().to(attendance::list_attendance)),
                    ),
            )
            .service(
                web::scope("/payroll")
                    // /payroll/run
                    .service(
                        web::resource("/run")
                            .wrap(Governor::new(&run_limiter))
                            .route(web::post().to(payroll::run_payroll)),
                    )
                    // /payroll
                    .service(web::resource("").route(web::get().to(payroll::list_salaries)))
                    // /payroll/{id}
                    .service(web::resource("/{id}").route(web::get().to(payroll::get_payslip))),
            ),
    );
}
