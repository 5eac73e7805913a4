//! Server construction and middleware wiring.

mod config;
mod cors;
mod state_builders;

pub use config::ServerConfig;
pub(crate) use state_builders::{Storage, build_http_ports};

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use trip_planner::Trace;
use trip_planner::doc::ApiDoc;
use trip_planner::inbound::http::api_scope;
use trip_planner::inbound::http::error::not_found;
use trip_planner::inbound::http::health::{HealthState, live, ready};
use trip_planner::inbound::http::state::HttpState;

use cors::build_cors;

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    client_origin: String,
    swagger_ui: bool,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        client_origin,
        swagger_ui,
    } = deps;

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .service(api_scope())
        .service(ready)
        .service(live);

    let app = if swagger_ui {
        app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
    } else {
        app
    };

    app.default_service(web::route().to(not_found))
        .wrap(Trace)
        .wrap(build_cors(&client_origin))
}

/// Construct the HTTP server and mark it ready.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let ServerConfig {
        bind_addr,
        client_origin,
        swagger_ui,
    } = config;
    let deps = AppDependencies {
        health_state: health_state.clone(),
        http_state,
        client_origin,
        swagger_ui,
    };

    let server = HttpServer::new(move || build_app(deps.clone()))
        .bind(bind_addr)?
        .run();

    health_state.mark_ready();
    Ok(server)
}
