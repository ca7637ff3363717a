// src/config.rs

use std::env;

use anyhow::Context;

use crate::{
    models::client::Client,
    services::{DashboardService, IntakeService},
    store::{seed, ClientStore},
};

#[derive(Debug, Clone)]
pub struct AppConfig {
    // Render/Heroku inject PORT; default 3000.
    pub port: u16,

    // Externally reachable URL. When set, a keep-alive task pings the
    // webhook liveness route so free-tier hosting does not idle out.
    pub base_url: Option<String>,

    // Reserved for the AI-insight feature; no route uses it server-side,
    // deployments set it for the frontend build.
    pub gemini_api_key: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            base_url: None,
            gemini_api_key: None,
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub store: ClientStore,
    pub intake_service: IntakeService,
    pub dashboard_service: DashboardService,
}

impl AppState {
    // Reads the environment and seeds the store with the demo dataset.
    // If configuration is broken the application should not start.
    pub fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let port = match env::var("PORT") {
            Ok(value) => value.parse().context("PORT must be a valid port number")?,
            Err(_) => 3000,
        };
        let base_url = env::var("BASE_URL").ok().filter(|s| !s.is_empty());
        let gemini_api_key = env::var("GEMINI_API_KEY").ok().filter(|s| !s.is_empty());

        let config = AppConfig {
            port,
            base_url,
            gemini_api_key,
        };
        Ok(Self::with_clients(config, seed::demo_clients()))
    }

    // Builds the dependency graph around a given collection. The store is
    // constructed once here and handed by clone to every service; they
    // all share the same mutex.
    pub fn with_clients(config: AppConfig, clients: Vec<Client>) -> Self {
        let store = ClientStore::with_clients(clients);
        let intake_service = IntakeService::new(store.clone());
        let dashboard_service = DashboardService::new(store.clone());

        Self {
            config,
            store,
            intake_service,
            dashboard_service,
        }
    }
}
