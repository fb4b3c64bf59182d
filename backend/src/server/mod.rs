//! Server construction and middleware wiring.

mod config;
mod store;

pub use config::{ServerConfig, ServerSettings};
pub use store::UserStore;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::info;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use userbase::Trace;
use userbase::doc::ApiDoc;
use userbase::inbound::http::health::{HealthState, live, ready};
use userbase::inbound::http::state::HttpState;
use userbase::inbound::http::users;

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .configure(users::configure)
        .service(ready)
        .service(live)
        .service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
}

/// Bind the HTTP server and flip readiness.
///
/// # Errors
///
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let ServerConfig {
        bind_addr,
        repository,
    } = config;
    let http_state = web::Data::new(HttpState::for_repository(repository));
    let server_health_state = health_state.clone();

    let server = HttpServer::new(move || build_app(server_health_state.clone(), http_state.clone()))
        .bind(bind_addr)?
        .run();

    health_state.mark_ready();
    info!(%bind_addr, store = ?health_state.store(), "server listening");
    Ok(server)
}
