use actix_web::{App, HttpServer, middleware, web};

use portfolio::audit;
use portfolio::config::AppConfig;
use portfolio::handlers;
use portfolio::notifications::scheduler;
use portfolio::store;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init();

    let config = AppConfig::from_env();
    log::info!("Configuration: {config:?}");

    // Reference value lists always; demo portfolio when SEED_DEMO_DATA is set
    let state = store::init_state(&config).expect("Failed to load seed data");

    // Clean up old audit entries based on retention policy
    {
        let mut store = state.write();
        audit::cleanup_old_entries(&mut store, config.audit_retention_days, chrono::Utc::now());
    }

    let state = web::Data::new(state);
    scheduler::spawn_scheduler(state.clone(), config.notification_scan_secs);

    log::info!("Starting server at http://{}", config.bind_addr);

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .app_data(handlers::json_config())
            .service(web::scope("/api").configure(handlers::configure))
            .default_service(web::to(handlers::not_found))
    })
    .bind(&config.bind_addr)?
    .run()
    .await
}
