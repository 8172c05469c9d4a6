use crate::{
    api::{archive, attendance, backup, employee, leave_request, report, tools},
    config::Config,
};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::web;
use std::sync::Arc;

// Helper to build per-scope limiter
fn build_limiter(requests_per_min: u32) -> Governor<PeerIpKeyExtractor, NoOpMiddleware> {
    let requests_per_min = requests_per_min.max(1);
    let per_ms = (60_000 / requests_per_min as u64).max(1);
    let cfg = GovernorConfigBuilder::default()
        .per_millisecond(per_ms)
        .burst_size(requests_per_min)
        .key_extractor(PeerIpKeyExtractor)
        .finish()
        // per_ms and burst are both non-zero
        .unwrap();
    Governor::new(&cfg)
}

pub fn configure(cfg: &mut web::ServiceConfig, config: Config) {
    let protected_limiter = Arc::new(build_limiter(config.rate_protected_per_min));
    let tools_limiter = Arc::new(build_limiter(config.rate_tools_per_min));

    cfg.service(
        web::scope(&config.api_prefix)
            // /v1/tools sits under its own, tighter limiter and must be
            // registered ahead of the /v1 scope that would swallow it
            .service(
                web::scope("/v1/tools")
                    .wrap(tools_limiter)
                    .configure(tool_routes),
            )
            .service(
                web::scope("/v1")
                    .wrap(protected_limiter) // rate limiting
                    .configure(v1),
            ),
    );
}

fn tool_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/tafqit").route(web::post().to(tools::tafqit)))
        .service(web::resource("/overtime").route(web::post().to(tools::overtime)))
        .service(web::resource("/cash").route(web::post().to(tools::cash)))
        .service(web::resource("/closing").route(web::post().to(tools::closing)));
}

/// Every `/v1` resource apart from the tools.
pub fn v1(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/employees")
            // /employees
            .service(
                web::resource("")
                    .route(web::post().to(employee::create_employee))
                    .route(web::get().to(employee::list_employees)),
            )
            // /employees/departments, ahead of /{id}
            .service(
                web::resource("/departments").route(web::get().to(employee::list_departments)),
            )
            // /employees/{id}
            .service(
                web::resource("/{id}")
                    .route(web::put().to(employee::update_employee))
                    .route(web::get().to(employee::get_employee))
                    .route(web::delete().to(employee::delete_employee)),
            ),
    )
    .service(
        web::scope("/attendance")
            // /attendance
            .service(
                web::resource("")
                    .route(web::get().to(attendance::list_records))
                    .route(web::delete().to(attendance::clear_records)),
            )
            // /attendance/status
            .service(web::resource("/status").route(web::put().to(attendance::set_status)))
            // /attendance/grid
            .service(web::resource("/grid").route(web::get().to(attendance::attendance_grid)))
            // /attendance/attachments
            .service(
                web::resource("/attachments").route(web::post().to(attendance::add_attachment)),
            )
            // /attendance/attachments/{attachment_id}
            .service(
                web::resource("/attachments/{attachment_id}")
                    .route(web::delete().to(attendance::delete_attachment)),
            ),
    )
    .service(
        web::scope("/leave")
            // /leave
            .service(
                web::resource("")
                    .route(web::get().to(leave_request::leave_list))
                    .route(web::post().to(leave_request::create_leave)),
            )
            // /leave/{id}
            .service(web::resource("/{id}").route(web::get().to(leave_request::get_leave))),
    )
    .service(
        web::scope("/reports")
            .service(
                web::resource("/employees/{id}/stats")
                    .route(web::get().to(report::get_employee_stats)),
            )
            .service(
                web::resource("/monthly")
                    .route(web::get().to(report::monthly_report))
                    .route(web::post().to(report::monthly_report_with_overrides)),
            )
            .service(web::resource("/dashboard").route(web::get().to(report::dashboard)))
            .service(web::resource("/insights").route(web::get().to(report::insights))),
    )
    .service(
        web::scope("/archive")
            // /archive
            .service(
                web::resource("")
                    .route(web::get().to(archive::list_documents))
                    .route(web::post().to(archive::save_document)),
            )
            // /archive/{id}
            .service(
                web::resource("/{id}")
                    .route(web::get().to(archive::get_document))
                    .route(web::delete().to(archive::delete_document)),
            ),
    )
    .service(
        web::resource("/backup")
            .route(web::get().to(backup::export_backup))
            .route(web::post().to(backup::restore_backup)),
    );
}
