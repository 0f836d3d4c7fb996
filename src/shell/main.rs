use anyhow::Context;
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{Extension, routing::get};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{EnvFilter, fmt};

use storefront_cart::modules::cart::adapters::outbound::cart_snapshot::CartSnapshotRepository;
use storefront_cart::modules::cart::adapters::outbound::http_catalog::HttpCatalogApi;
use storefront_cart::modules::cart::application::cart_manager::{CartManager, CartPorts};
use storefront_cart::shared::infrastructure::key_value_store::file::FileKeyValueStore;
use storefront_cart::shared::infrastructure::notifier::{CompositeNotifier, Notifier};
use storefront_cart::shared::infrastructure::notifier::in_memory::InMemoryNotifier;
use storefront_cart::shared::infrastructure::notifier::logging::TracingNotifier;
use storefront_cart::shell::config::Config;
use storefront_cart::shell::graphql::{AppSchema, schema};
use storefront_cart::shell::http::router;
use storefront_cart::shell::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let config = Config::from_env()?;

    let catalog = Arc::new(HttpCatalogApi::new(&config.api_base_url, config.http_timeout)?);
    let store = Arc::new(FileKeyValueStore::new(&config.store_path));
    let notifications = Arc::new(InMemoryNotifier::new());
    let sinks: Vec<Arc<dyn Notifier>> = vec![notifications.clone(), Arc::new(TracingNotifier)];
    let notifier = Arc::new(CompositeNotifier::new(sinks));

    let cart = CartManager::restore(CartPorts {
        stock: catalog.clone(),
        products: catalog,
        snapshots: CartSnapshotRepository::new(store, config.storage_key.clone()),
        notifier,
    })
    .await
    .with_context(|| format!("restoring cart from {}", config.store_path.display()))?;

    let state = AppState {
        cart: Arc::new(cart),
        notifications,
    };

    let app = router(state.clone())
        .route("/gql", get(graphiql).post(graphql))
        .layer(Extension(schema(state)))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    tracing::info!(api = %config.api_base_url, "catalog API");
    tracing::info!("HTTP endpoint: http://{}/cart", config.listen_addr);
    tracing::info!("GraphQL endpoint: http://{}/gql", config.listen_addr);
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

async fn graphql(Extension(schema): Extension<AppSchema>, req: GraphQLRequest) -> GraphQLResponse {
    schema.execute(req.into_inner()).await.into()
}

async fn graphiql() -> axum::response::Html<String> {
    use async_graphql::http::GraphiQLSource;
    axum::response::Html(GraphiQLSource::build().endpoint("/gql").finish())
}
