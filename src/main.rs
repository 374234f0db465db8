mod config;
mod error;
mod prompts;
mod provider;
mod tokens;
mod web;

use actix_web::{middleware, web::Data, web::PayloadConfig, App, HttpServer};
use dotenv::dotenv;
use log::{error, info, warn};
use std::sync::Arc;

use config::RelayConfig;
use provider::OpenAiClient;
use tokens::{TiktokenCounter, TokenCounter};
use web::routes;

// App state structure
struct AppState {
    config: RelayConfig,
    provider: OpenAiClient,
    tokenizer: Arc<dyn TokenCounter>,
    persona_tokens: usize,
}

impl AppState {
    fn new(config: RelayConfig, tokenizer: Arc<dyn TokenCounter>) -> Self {
        let persona_tokens = tokenizer.count_tokens(&config.persona_prompt);
        Self {
            provider: OpenAiClient::new(config.api_base.clone()),
            config,
            tokenizer,
            persona_tokens,
        }
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize environment
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    info!("Starting KALL-E chat relay");

    let config = match RelayConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {:#}", e);
            std::process::exit(1);
        }
    };

    if config.api_key().is_none() {
        warn!("OPENAI_KEY is not set; chat requests will fail until it is provided");
    }

    info!(
        "Model: {}, temperature: {}, token limit: {}",
        config.model, config.temperature, config.token_limit
    );

    let bind_addr = config.bind_addr.clone();
    let max_body_bytes = config.max_body_bytes;
    let tokenizer = Arc::new(TiktokenCounter::for_model(&config.model));
    let app_state = Data::new(AppState::new(config, tokenizer));

    info!("Persona prompt uses {} tokens", app_state.persona_tokens);
    info!("Listening on {}", bind_addr);

    // Start web server
    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .app_data(PayloadConfig::new(max_body_bytes))
            .wrap(middleware::Logger::default())
            .configure(routes::configure)
    })
    .bind(bind_addr)?
    .run()
    .await
}
