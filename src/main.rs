use actix_web::{App, HttpServer, middleware::Logger, web};
use chrono::Local; // timestamp in log lines
use env_logger::{Env, Target};
use std::io::Write; // for env_logger custom formatter

use upick_backend::{
    config::Config,
    external::{SupabaseClient, TwilioVerifyService},
    handlers,
    middlewares::create_cors,
    services::{AuthService, MessageService},
    storage::JsonFileStore,
    swagger::swagger_config,
    utils::JwtService,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            let ts = Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z");
            let level = record.level().as_str().to_ascii_lowercase();
            let msg_json = serde_json::to_string(&format!("{}", record.args()))
                .unwrap_or_else(|_| "\"<invalid utf8>\"".to_string());
            writeln!(
                buf,
                "{{\"timestamp\":\"{}\",\"level\":\"{}\",\"message\":{},\"target\":\"{}\"}}",
                ts,
                level,
                msg_json,
                record.target(),
            )
        })
        .target(Target::Stdout)
        .init();

    // Fail fast on missing credentials rather than on the first request
    let config = Config::from_toml().expect("Failed to load configuration");

    let jwt_service = JwtService::new(&config.jwt.secret, config.jwt.expires_in);

    // External clients
    let twilio_service = TwilioVerifyService::new(config.twilio.clone());
    let supabase_client = SupabaseClient::new(config.supabase.clone());
    let message_store = JsonFileStore::new(&config.messages.file_path);

    let auth_service = AuthService::new(twilio_service, supabase_client, jwt_service);
    let message_service = MessageService::new(message_store);

    log::info!(
        "Starting HTTP server at {}:{}",
        config.server.host,
        config.server.port
    );

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(create_cors())
            .app_data(web::Data::new(auth_service.clone()))
            .app_data(web::Data::new(message_service.clone()))
            .configure(swagger_config)
            .route("/", web::get().to(handlers::health))
            .configure(handlers::auth_config)
            .configure(handlers::message_config)
    })
    .bind((config.server.host.as_str(), config.server.port))?
    .run()
    .await
}
