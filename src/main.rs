//! SquadFeed client — headless realtime session.
//!
//! Wires storage, the application store and the socket layer together and
//! runs until interrupted.

use std::sync::{Arc, Mutex};

use clap::Parser;
use tokio::sync::broadcast::error::RecvError;
use tracing_subscriber::{EnvFilter, fmt};

use squadfeed_cache::StorageManager;
use squadfeed_cache::keys;
use squadfeed_core::config::AppConfig;
use squadfeed_core::error::AppError;
use squadfeed_core::traits::{KeyValueStore, Navigator};
use squadfeed_core::types::Route;
use squadfeed_realtime::{NotificationCache, SocketPlugin};
use squadfeed_store::{AppStore, Mutation, Store, StoreEvent};

/// SquadFeed realtime client
#[derive(Debug, Parser)]
#[command(name = "squadfeed-client", version, about, long_about = None)]
struct Cli {
    /// Base configuration file, without extension
    #[arg(short, long, default_value = "config/default")]
    config: String,

    /// Environment overlay loaded from `config/{env}`
    #[arg(short, long, default_value = "development")]
    env: String,

    /// WebSocket endpoint, overriding configuration
    #[arg(long)]
    endpoint: Option<String>,

    /// Store this credential before connecting
    #[arg(long)]
    token: Option<String>,

    /// Merchant the session is embedded in
    #[arg(long)]
    merchant: Option<String>,

    /// Squad landing parameter, e.g. `user:42_comments`
    #[arg(long)]
    squad: Option<String>,
}

/// Navigator for a headless session: remembers the route and logs pushes.
#[derive(Debug)]
struct LogNavigator {
    route: Mutex<Route>,
}

impl Navigator for LogNavigator {
    fn current_route(&self) -> Route {
        self.route.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn push(&self, target: Route) {
        tracing::info!(route = ?target, "Navigating");
        *self.route.lock().unwrap_or_else(|e| e.into_inner()) = target;
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let mut config = match AppConfig::load_from(&cli.config, &cli.env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };
    if let Some(endpoint) = cli.endpoint.clone() {
        config.realtime.endpoint = endpoint;
    }

    init_logging(&config);

    if let Err(e) = run(config, cli).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

async fn run(config: AppConfig, cli: Cli) -> Result<(), AppError> {
    tracing::info!("Starting SquadFeed client v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Storage ──────────────────────────────────────────
    let storage = StorageManager::new(&config.storage)?;
    if let Some(token) = cli.token.as_deref() {
        storage.durable().set(keys::USER_TOKEN, token)?;
        tracing::info!("Credential stored");
    }

    // ── Step 2: Application store ────────────────────────────────
    let store = Arc::new(AppStore::new(
        storage.session(),
        config.notifications.clone(),
        config.realtime.store_event_buffer_size,
    ));
    store.commit(Mutation::SetMerchant(cli.merchant.clone()));
    store.commit(Mutation::SetSquadParams(cli.squad.clone()));

    // ── Step 3: Store observers ──────────────────────────────────
    let notifications = NotificationCache::new(storage.session(), &config.notifications);
    let observer = tokio::spawn(observe_store(Arc::clone(&store), notifications));

    // ── Step 4: Socket layer ─────────────────────────────────────
    let navigator = Arc::new(LogNavigator {
        route: Mutex::new(Route::home()),
    });
    let plugin = SocketPlugin::from_config(&config, store.clone(), &storage, navigator)?;

    // ── Step 5: Run until interrupted ────────────────────────────
    shutdown_signal().await;
    tracing::info!("Shutdown signal received");

    plugin.shutdown();
    observer.abort();
    tracing::info!("SquadFeed client stopped");
    Ok(())
}

/// Log bell events and load notifications once a session authenticates.
async fn observe_store(store: Arc<AppStore>, notifications: NotificationCache) {
    let mut events = store.subscribe();
    loop {
        match events.recv().await {
            Ok(StoreEvent::Bell(message)) => tracing::info!(%message, "Unread notifications"),
            Ok(StoreEvent::Committed(Mutation::SetSocketAuth(true))) => {
                let source = notifications.fetch_notifications(store.as_ref());
                tracing::debug!(?source, "Notifications requested");
            }
            Ok(StoreEvent::Committed(_)) => {}
            Err(RecvError::Lagged(skipped)) => tracing::warn!(skipped, "Store observer lagged"),
            Err(RecvError::Closed) => break,
        }
    }
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
