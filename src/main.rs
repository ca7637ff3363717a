//src/main.rs

use mortgage_crm::{config::AppState, create_router};
use tokio::net::TcpListener;
use tokio::time::{self, Duration};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() is fine here: if configuration fails, don't start.
    let app_state = AppState::new().expect("Failed to initialize application state.");
    tracing::info!("✅ Store seeded with {} clients", app_state.store.len());

    // Free-tier hosts spin the instance down when idle; ping our own
    // liveness route to stay warm. Best-effort, failures only warn.
    if let Some(base_url) = app_state.config.base_url.clone() {
        tokio::spawn(async move {
            let target = format!("{}/api/webhook", base_url.trim_end_matches('/'));
            let mut interval = time::interval(Duration::from_secs(14 * 60));

            // The first tick completes immediately. Skip it.
            interval.tick().await;

            loop {
                interval.tick().await;
                match reqwest::get(&target).await {
                    Ok(response) => {
                        tracing::debug!("keep-alive ping {}: {}", target, response.status())
                    }
                    Err(e) => tracing::warn!("keep-alive ping failed: {}", e),
                }
            }
        });
    }

    let addr = format!("0.0.0.0:{}", app_state.config.port);
    let app = create_router(app_state);

    let listener = TcpListener::bind(&addr)
        .await
        .expect("Failed to bind TCP listener");
    tracing::info!("🚀 CRM server listening on {}", listener.local_addr().unwrap());
    tracing::info!("Webhook endpoint: POST /api/webhook");

    axum::serve(listener, app).await.expect("Axum server error");
}
