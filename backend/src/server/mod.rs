//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::{ServerConfig, ServerSettings};
pub use state_builders::Stores;

use state_builders::{build_http_state, default_adapters};

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use volunteer_hub::Trace;
#[cfg(debug_assertions)]
use volunteer_hub::doc::ApiDoc;
use volunteer_hub::inbound::http::accounts::{login, register};
use volunteer_hub::inbound::http::error::{JSON_BODY_LIMIT, json_error_handler};
use volunteer_hub::inbound::http::events::{
    create_event, list_events, list_volunteers, organizer_events, register_for_event,
    volunteer_events,
};
use volunteer_hub::inbound::http::groups::{create_group, join_group, leave_group, my_groups};
use volunteer_hub::inbound::http::health::{HealthState, live, ready};
use volunteer_hub::inbound::http::profile::{
    current_profile, get_skills, replace_skills, update_profile,
};
use volunteer_hub::inbound::http::social::{
    add_friend, directory, follow, followers, following, unfollow,
};
use volunteer_hub::inbound::http::state::HttpState;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

/// Assemble the application: probes, the `/api/v1` scope and, in debug
/// builds, Swagger UI.
pub fn build_app(
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
    let json = web::JsonConfig::default()
        .limit(JSON_BODY_LIMIT)
        .error_handler(json_error_handler);

    let api = web::scope("/api/v1")
        .service(register)
        .service(login)
        .service(list_events)
        .service(create_event)
        .service(register_for_event)
        .service(list_volunteers)
        .service(organizer_events)
        .service(volunteer_events)
        .service(follow)
        .service(unfollow)
        .service(add_friend)
        .service(directory)
        .service(following)
        .service(followers)
        .service(current_profile)
        .service(update_profile)
        .service(get_skills)
        .service(replace_skills)
        .service(create_group)
        .service(my_groups)
        .service(join_group)
        .service(leave_group);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(json)
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Bind the listener and mark the service ready.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let ServerConfig {
        bind_addr,
        stores,
        blobs,
        hasher,
        tokens,
    } = config;
    let http_state = build_http_state(&stores, default_adapters(blobs, hasher), &tokens);
    let server_health_state = health_state.clone();

    let server = HttpServer::new(move || {
        build_app(server_health_state.clone(), http_state.clone())
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
