/*
 * Responsibility
 * - Config読み込み → 依存生成 → Router 組み立て
 * - tracing / panic hook の初期化
 * - runtime level: Boot → (state built) → Run
 * - axum::serve() で起動
 */
use std::{panic, process, sync::Arc};

use anyhow::{Context, Result};
use axum::{Router, routing::any};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::api;
use crate::config::Config;
use crate::middleware;
use crate::services::auth::AuthService;
use crate::services::routing::{
    ContentContextFactory, ContentFinderRouter, HandlerRegistry, InMemoryContentCache,
    PublishedContentCache, ReservedPathFilter, RouteValueTransformer, RouteValuesFactory,
    RuntimeLevel, RuntimeStatus,
};
use crate::state::AppState;

fn init_tracing() {
    // Prefer RUST_LOG if set; otherwise use a sensible default.
    // Ex:
    // RUST_LOG=info,content_gateway=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        tracing::error!(?info, "panic");

        // development: crash the whole process so we notice immediately
        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();
    let config = Config::from_env()?;

    let abort_on_panic = !config.app_env.is_production();
    init_panic_hook(abort_on_panic);

    tracing::info!(
        "starting content gateway in {:?} mode on {}",
        config.app_env,
        config.addr
    );

    let runtime = RuntimeStatus::new(RuntimeLevel::Boot);
    let state = match build_state(&config, runtime.clone()) {
        Ok(state) => state,
        Err(err) => {
            runtime.set_level(RuntimeLevel::BootFailed);
            return Err(err);
        }
    };
    runtime.set_level(RuntimeLevel::Run);

    let app = build_router(state, &config);
    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("cannot bind {}", config.addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Build process-level services and inject them into the shared application state.
pub fn build_state(config: &Config, runtime: RuntimeStatus) -> Result<AppState> {
    let auth = AuthService::new(
        &config.access_jwt_public_key_pem,
        &config.auth_issuer,
        &config.auth_audience,
        config.access_token_leeway_seconds,
    )?;

    let content: Arc<dyn PublishedContentCache> = match &config.content_seed_path {
        Some(path) => {
            let cache = InMemoryContentCache::from_json_file(path)
                .with_context(|| format!("cannot load content seed {}", path.display()))?;
            tracing::info!(
                items = cache.content_count(),
                path = %path.display(),
                "content seed loaded"
            );
            Arc::new(cache)
        }
        None => {
            tracing::info!("no content seed configured, starting with an empty content cache");
            Arc::new(InMemoryContentCache::empty())
        }
    };

    let handlers = HandlerRegistry::new(config.content_controllers.iter().cloned());
    let filter = ReservedPathFilter::new(&config.backoffice_path, &config.reserved_paths);
    let transformer = RouteValueTransformer::new(
        Arc::new(runtime.clone()),
        Arc::new(filter),
        Arc::new(ContentFinderRouter::new(Arc::clone(&content), handlers)),
        RouteValuesFactory::new(),
    );

    Ok(AppState::new(
        runtime,
        Arc::new(auth),
        ContentContextFactory::new(config.public_base_url.clone(), content),
        Arc::new(transformer),
    ))
}

/// Website catch-all behind the content pipeline, back office API nested under
/// `{BACKOFFICE_PATH}/api`, HTTP-level layers around everything.
pub fn build_router(state: AppState, config: &Config) -> Router {
    let website = Router::new()
        .route("/", any(api::website::render))
        .route("/{*path}", any(api::website::render));
    // Layers run outermost-last: content context first, then routing.
    let website = middleware::routing::apply(website, state.clone());
    let website = middleware::content_context::apply(website, state.clone());

    let router = Router::new()
        .nest(
            &format!("{}/api", config.backoffice_path),
            api::backoffice::routes(state.clone()),
        )
        .merge(website)
        .with_state(state);

    middleware::http::apply(router, config.http_limits())
}
