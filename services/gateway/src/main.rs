//! Casedrop gateway: the HTTP and realtime shell around the opening engine.
//!
//! Catalog management, marketplace, and session auth live elsewhere; this
//! service wires the engine to its collaborators (stores, progression,
//! broadcaster) and exposes the one paying operation plus the realtime
//! feed.

mod registry;
mod routes;
mod ws;

use anyhow::Context;
use axum::routing::{get, post};
use axum::Router;
use casedrop_engine::{CaseOpening, MemoryStore, SpendCurve};
use casedrop_types::{CaseDefinition, CaseId, ItemId, Rarity, RewardItem, UserAccount, UserId};
use registry::ConnectionRegistry;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;
use ws::WsBroadcaster;

type Engine = CaseOpening<Arc<MemoryStore>, Arc<MemoryStore>, SpendCurve, WsBroadcaster>;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) opening: Arc<Engine>,
    pub(crate) registry: Arc<ConnectionRegistry>,
}

#[derive(Clone, Debug)]
struct GatewayConfig {
    host: String,
    port: u16,
    catalog_path: Option<String>,
    accounts_path: Option<String>,
}

impl GatewayConfig {
    fn from_env() -> Self {
        Self {
            host: std::env::var("GATEWAY_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: read_u16("GATEWAY_PORT", 5001),
            catalog_path: std::env::var("GATEWAY_CATALOG_PATH").ok(),
            accounts_path: std::env::var("GATEWAY_ACCOUNTS_PATH").ok(),
        }
    }
}

fn read_u16(key: &str, fallback: u16) -> u16 {
    std::env::var(key)
        .ok()
        .and_then(|raw| raw.parse::<u16>().ok())
        .unwrap_or(fallback)
}

fn seed_store(store: &MemoryStore, config: &GatewayConfig) -> anyhow::Result<()> {
    match &config.catalog_path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("reading catalog seed {path}"))?;
            let cases: Vec<CaseDefinition> =
                serde_json::from_str(&raw).with_context(|| format!("parsing catalog seed {path}"))?;
            for case in cases {
                store.insert_case(case);
            }
        }
        None => {
            for case in demo_catalog() {
                store.insert_case(case);
            }
        }
    }

    match &config.accounts_path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("reading accounts seed {path}"))?;
            let accounts: Vec<UserAccount> = serde_json::from_str(&raw)
                .with_context(|| format!("parsing accounts seed {path}"))?;
            for account in accounts {
                store.insert_user(account);
            }
        }
        None => {
            for account in demo_accounts() {
                store.insert_user(account);
            }
        }
    }

    Ok(())
}

fn demo_catalog() -> Vec<CaseDefinition> {
    let item = |id: &str, rarity: Rarity| RewardItem {
        id: ItemId::from(id),
        rarity,
        name: id.replace('-', " "),
        image: format!("/items/{id}.png"),
    };

    vec![
        CaseDefinition {
            id: CaseId::from("mil-spec"),
            name: "Mil-Spec Case".to_string(),
            price: 10,
            image: "/cases/mil-spec.png".to_string(),
            items: vec![
                item("sand-dune", Rarity::Common),
                item("urban-ddpat", Rarity::Common),
                item("boreal-forest", Rarity::Common),
                item("guardian", Rarity::Uncommon),
                item("nightshade", Rarity::Uncommon),
                item("emerald-web", Rarity::Rare),
                item("dragon-fire", Rarity::Epic),
                item("golden-howl", Rarity::Legendary),
            ],
        },
        // Deliberately misses the top tiers; openings fall back to the
        // stocked ones.
        CaseDefinition {
            id: CaseId::from("starter"),
            name: "Starter Case".to_string(),
            price: 2,
            image: "/cases/starter.png".to_string(),
            items: vec![
                item("plain-jane", Rarity::Common),
                item("rust-coat", Rarity::Common),
                item("blue-steel", Rarity::Rare),
            ],
        },
    ]
}

fn demo_accounts() -> Vec<UserAccount> {
    vec![UserAccount {
        id: UserId::from("demo-user"),
        display_name: "Demo User".to_string(),
        avatar: "/avatars/demo-user.png".to_string(),
        wallet_balance: 1_000,
        xp: 0,
        level: 1,
        inventory: vec![],
        version: 0,
    }]
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let config = GatewayConfig::from_env();

    let store = Arc::new(MemoryStore::new());
    seed_store(&store, &config)?;
    info!(
        cases = store.case_count(),
        users = store.user_count(),
        "store seeded"
    );

    let registry = Arc::new(ConnectionRegistry::new());
    let broadcaster = WsBroadcaster::new(Arc::clone(&registry));
    let opening = Arc::new(CaseOpening::new(
        Arc::clone(&store),
        Arc::clone(&store),
        SpendCurve,
        broadcaster,
    ));

    let state = AppState { opening, registry };

    let app = Router::new()
        .route("/games/openCase/:caseId", post(routes::open_case))
        .route("/ws", get(ws::ws_handler))
        .route("/healthz", get(routes::healthz))
        .layer(CorsLayer::permissive())
        .with_state(state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .context("invalid listen addr")?;
    info!(%addr, "gateway listening");

    axum::serve(tokio::net::TcpListener::bind(addr).await?, app).await?;
    Ok(())
}
