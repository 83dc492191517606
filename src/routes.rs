use crate::{
    api::{attendance, image, records, view},
    auth::{handlers, middleware::directory_middleware},
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
        let requests_per_min = requests_per_min.max(1);
        let per_ms = 60_000 / requests_per_min as u64;
        let cfg = GovernorConfigBuilder::default()
            .per_millisecond(per_ms.max(1))
            .burst_size(requests_per_min)
            .key_extractor(PeerIpKeyExtractor)
            .finish()
            .expect("valid rate limiter configuration");
        Governor::new(&cfg)
    }

    let image_limiter = Arc::new(build_limiter(config.rate_image_per_min));

    // Check-in kiosk
    cfg.service(
        web::scope("/check-in")
            // /check-in
            .service(
                web::resource("")
                    .route(web::get().to(attendance::form_state))
                    .route(web::post().to(attendance::submit)),
            )
            // /check-in/reset
            .service(web::resource("/reset").route(web::post().to(attendance::reset))),
    )
    .service(web::resource("/departments").route(web::get().to(attendance::departments)));

    // Screen selection
    cfg.service(
        web::resource("/view")
            .route(web::get().to(view::current_view))
            .route(web::put().to(view::select_view)),
    );

    // Directory gate; retries are unlimited, so no limiter here
    cfg.service(
        web::scope("/hr").service(web::resource("/unlock").route(web::post().to(handlers::unlock))),
    );

    // Image playground
    cfg.service(
        web::scope("/playground")
            .wrap(image_limiter)
            .service(web::resource("/generate").route(web::post().to(image::generate)))
            .service(web::resource("/edit").route(web::post().to(image::edit))),
    );

    // Unlocked directory
    cfg.service(
        web::scope(&config.api_prefix)
            .wrap(from_fn(directory_middleware))
            .service(web::resource("/records").route(web::get().to(records::list_records))),
    );
}
