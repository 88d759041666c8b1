use std::convert::Infallible;
use std::fs;
use std::net::SocketAddr;
use std::net::ToSocketAddrs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use warp::filters::BoxedFilter;
use warp::{Filter, Rejection};

use axiomind_engine::player::Seat;

use crate::events::TableEventBus;
use crate::handlers;
use crate::registry::{RegistryError, TableRegistry};
use crate::settings::SettingsStore;
use crate::static_handler::StaticHandler;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    host: String,
    port: u16,
    static_dir: PathBuf,
}

impl ServerConfig {
    pub fn new(host: impl Into<String>, port: u16, static_dir: impl Into<PathBuf>) -> Self {
        Self {
            host: host.into(),
            port,
            static_dir: static_dir.into(),
        }
    }

    pub fn for_tests() -> Self {
        let dir = std::env::temp_dir().join("axiomind_web_static");
        Self::new("127.0.0.1", 0, dir)
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn static_dir(&self) -> &Path {
        &self.static_dir
    }
}

#[derive(Clone)]
pub struct AppContext {
    config: ServerConfig,
    event_bus: Arc<TableEventBus>,
    registry: Arc<TableRegistry>,
    settings: Arc<SettingsStore>,
    static_handler: Arc<StaticHandler>,
}

impl AppContext {
    pub fn new(config: ServerConfig) -> Result<Self, ServerError> {
        if !config.static_dir().exists() {
            fs::create_dir_all(config.static_dir())
                .map_err(|err| ServerError::ConfigError(err.to_string()))?;
        }

        let event_bus = Arc::new(TableEventBus::new());
        let registry = Arc::new(TableRegistry::new(Arc::clone(&event_bus)));
        let settings = Arc::new(SettingsStore::new());
        let static_handler = Arc::new(StaticHandler::new(config.static_dir().to_path_buf()));

        Ok(Self::new_with_dependencies(
            config,
            event_bus,
            registry,
            settings,
            static_handler,
        ))
    }

    pub fn new_with_dependencies(
        config: ServerConfig,
        event_bus: Arc<TableEventBus>,
        registry: Arc<TableRegistry>,
        settings: Arc<SettingsStore>,
        static_handler: Arc<StaticHandler>,
    ) -> Self {
        Self {
            config,
            event_bus,
            registry,
            settings,
            static_handler,
        }
    }

    pub fn new_for_tests() -> Self {
        Self::new(ServerConfig::for_tests()).expect("test context")
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn event_bus(&self) -> Arc<TableEventBus> {
        Arc::clone(&self.event_bus)
    }

    pub fn registry(&self) -> Arc<TableRegistry> {
        Arc::clone(&self.registry)
    }

    pub fn settings(&self) -> Arc<SettingsStore> {
        Arc::clone(&self.settings)
    }

    pub fn static_handler(&self) -> Arc<StaticHandler> {
        Arc::clone(&self.static_handler)
    }
}

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Failed to bind to address: {0}")]
    BindError(#[from] std::io::Error),
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("Registry error: {0}")]
    RegistryError(#[from] RegistryError),
}

#[derive(Clone)]
pub struct WebServer {
    context: AppContext,
}

impl WebServer {
    pub fn new(config: ServerConfig) -> Result<Self, ServerError> {
        let context = AppContext::new(config)?;
        Ok(Self { context })
    }

    pub fn from_context(context: AppContext) -> Self {
        Self { context }
    }

    pub fn context(&self) -> &AppContext {
        &self.context
    }

    pub async fn start(self) -> Result<ServerHandle, ServerError> {
        let WebServer { context } = self;
        let config = context.config().clone();
        let bind_addr = Self::bind_addr(&config)?;

        let preflight = if bind_addr.port() != 0 {
            Some(std::net::TcpListener::bind(bind_addr).map_err(ServerError::BindError)?)
        } else {
            None
        };
        drop(preflight);

        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let routes = Self::routes(&context);
        let shutdown_signal = async move {
            let _ = shutdown_rx.await;
        };

        let (addr, server_future) = warp::serve(routes)
            .try_bind_with_graceful_shutdown(bind_addr, shutdown_signal)
            .map_err(Self::map_warp_error)?;

        tracing::info!("web server listening on http://{}", addr);

        let task = tokio::spawn(async move {
            server_future.await;
            Ok(())
        });

        Ok(ServerHandle::new(addr, shutdown_tx, task, context))
    }

    fn bind_addr(config: &ServerConfig) -> Result<SocketAddr, ServerError> {
        let host = config.host();

        if let Ok(addr) = host.parse::<SocketAddr>() {
            return Ok(addr);
        }

        if let Ok(ip) = host.parse::<std::net::IpAddr>() {
            return Ok(SocketAddr::new(ip, config.port()));
        }

        let candidate = format!("{}:{}", host, config.port());
        let mut addrs = candidate.to_socket_addrs().map_err(|err| {
            ServerError::ConfigError(format!("failed to resolve address `{candidate}`: {err}"))
        })?;

        addrs.next().ok_or_else(|| {
            ServerError::ConfigError(format!("failed to resolve address `{candidate}`"))
        })
    }

    fn map_warp_error(err: warp::Error) -> ServerError {
        use std::error::Error as StdError;

        if let Some(source) = err.source() {
            if let Some(io_err) = source.downcast_ref::<std::io::Error>() {
                let recreated = std::io::Error::new(io_err.kind(), io_err.to_string());
                return ServerError::BindError(recreated);
            }
        }

        ServerError::ConfigError(err.to_string())
    }

    fn routes(context: &AppContext) -> BoxedFilter<(warp::reply::Response,)> {
        let health = Self::health_route();
        let static_routes = Self::static_routes(context);
        let table_routes = Self::table_routes(context);
        let stream_routes = Self::stream_routes(context);
        let settings_routes = Self::settings_routes(context);

        health
            .or(static_routes)
            .unify()
            .or(table_routes)
            .unify()
            .or(stream_routes)
            .unify()
            .or(settings_routes)
            .unify()
            .boxed()
    }

    fn health_route() -> BoxedFilter<(warp::reply::Response,)> {
        warp::path("health")
            .and(warp::get())
            .and(warp::path::end())
            .map(|| handlers::health().into_response())
            .boxed()
    }

    fn static_routes(context: &AppContext) -> BoxedFilter<(warp::reply::Response,)> {
        let handler = context.static_handler();

        let index = warp::path::end()
            .and(warp::get())
            .and(Self::with_static_handler(handler.clone()))
            .and_then(|handler: Arc<StaticHandler>| async move {
                let response = handler
                    .index()
                    .await
                    .unwrap_or_else(|err| handler.error_response(err));
                Ok::<_, Infallible>(response)
            });

        let assets = warp::path("static")
            .and(warp::path::tail())
            .and(warp::get())
            .and(Self::with_static_handler(handler))
            .and_then(
                |tail: warp::path::Tail, handler: Arc<StaticHandler>| async move {
                    let response = handler
                        .asset(tail.as_str())
                        .await
                        .unwrap_or_else(|err| handler.error_response(err));
                    Ok::<_, Infallible>(response)
                },
            );

        index.or(assets).unify().boxed()
    }

    fn table_routes(context: &AppContext) -> BoxedFilter<(warp::reply::Response,)> {
        let registry = context.registry();
        let settings = context.settings();

        let create = warp::path!("api" / "tables")
            .and(warp::post())
            .and(Self::with_registry(registry.clone()))
            .and(Self::with_settings(settings))
            .and(warp::body::json())
            .and_then(
                |registry: Arc<TableRegistry>,
                 settings: Arc<SettingsStore>,
                 request: handlers::CreateTableRequest| async move {
                    let response = handlers::create_table(registry, settings, request).await;
                    Ok::<_, Infallible>(response)
                },
            );

        let attach = warp::path!("api" / "tables" / String / "seats" / Seat)
            .and(warp::post())
            .and(Self::with_registry(registry.clone()))
            .and(warp::body::json())
            .and_then(
                |table_id: String,
                 seat: Seat,
                 registry: Arc<TableRegistry>,
                 request: handlers::AttachSeatRequest| async move {
                    let response = handlers::attach_seat(registry, table_id, seat, request).await;
                    Ok::<_, Infallible>(response)
                },
            );

        let detach = warp::path!("api" / "tables" / String / "seats" / Seat)
            .and(warp::delete())
            .and(Self::with_registry(registry.clone()))
            .and_then(
                |table_id: String, seat: Seat, registry: Arc<TableRegistry>| async move {
                    let response = handlers::detach_seat(registry, table_id, seat).await;
                    Ok::<_, Infallible>(response)
                },
            );

        let start = warp::path!("api" / "tables" / String / "hands")
            .and(warp::post())
            .and(Self::with_registry(registry.clone()))
            .and_then(|table_id: String, registry: Arc<TableRegistry>| async move {
                let response = handlers::start_hand(registry, table_id).await;
                Ok::<_, Infallible>(response)
            });

        let action = warp::path!("api" / "tables" / String / "actions")
            .and(warp::post())
            .and(Self::with_registry(registry.clone()))
            .and(warp::body::json())
            .and_then(
                |table_id: String,
                 registry: Arc<TableRegistry>,
                 action: axiomind_engine::player::PlayerAction| async move {
                    let response = handlers::submit_action(registry, table_id, action).await;
                    Ok::<_, Infallible>(response)
                },
            );

        let state = warp::path!("api" / "tables" / String / "state")
            .and(warp::get())
            .and(warp::query::<SeatQuery>())
            .and(Self::with_registry(registry))
            .and_then(
                |table_id: String, query: SeatQuery, registry: Arc<TableRegistry>| async move {
                    let response = handlers::snapshot(registry, table_id, query.seat).await;
                    Ok::<_, Infallible>(response)
                },
            );

        create
            .or(attach)
            .unify()
            .or(detach)
            .unify()
            .or(start)
            .unify()
            .or(action)
            .unify()
            .or(state)
            .unify()
            .boxed()
    }

    fn stream_routes(context: &AppContext) -> BoxedFilter<(warp::reply::Response,)> {
        let registry = context.registry();
        let event_bus = context.event_bus();

        let state_stream = warp::path!("api" / "tables" / String / "events")
            .and(warp::get())
            .and(warp::query::<SeatQuery>())
            .and(Self::with_registry(registry.clone()))
            .and(Self::with_event_bus(event_bus))
            .and_then(
                |table_id: String,
                 query: SeatQuery,
                 registry: Arc<TableRegistry>,
                 event_bus: Arc<TableEventBus>| async move {
                    let response =
                        handlers::stream_state(table_id, query.seat, registry, event_bus).await;
                    Ok::<_, Infallible>(response)
                },
            );

        let settlement_stream = warp::path!("api" / "tables" / String / "settlements")
            .and(warp::get())
            .and(Self::with_registry(registry))
            .and_then(|table_id: String, registry: Arc<TableRegistry>| async move {
                let response = handlers::stream_settlements(table_id, registry).await;
                Ok::<_, Infallible>(response)
            });

        state_stream.or(settlement_stream).unify().boxed()
    }

    fn settings_routes(context: &AppContext) -> BoxedFilter<(warp::reply::Response,)> {
        let settings = context.settings();

        let get = warp::path!("api" / "settings")
            .and(warp::get())
            .and(Self::with_settings(settings.clone()))
            .and_then(|settings: Arc<SettingsStore>| async move {
                Ok::<_, Infallible>(handlers::get_settings(settings).await)
            });

        let update = warp::path!("api" / "settings")
            .and(warp::patch())
            .and(Self::with_settings(settings.clone()))
            .and(warp::body::json())
            .and_then(
                |settings: Arc<SettingsStore>, request: handlers::UpdateSettingsRequest| async move {
                    Ok::<_, Infallible>(handlers::update_settings(settings, request).await)
                },
            );

        let reset = warp::path!("api" / "settings" / "reset")
            .and(warp::post())
            .and(Self::with_settings(settings))
            .and_then(|settings: Arc<SettingsStore>| async move {
                Ok::<_, Infallible>(handlers::reset_settings(settings).await)
            });

        get.or(update).unify().or(reset).unify().boxed()
    }

    fn with_registry(
        registry: Arc<TableRegistry>,
    ) -> impl Filter<Extract = (Arc<TableRegistry>,), Error = Infallible> + Clone {
        warp::any().map(move || Arc::clone(&registry))
    }

    fn with_settings(
        settings: Arc<SettingsStore>,
    ) -> impl Filter<Extract = (Arc<SettingsStore>,), Error = Infallible> + Clone {
        warp::any().map(move || Arc::clone(&settings))
    }

    fn with_event_bus(
        event_bus: Arc<TableEventBus>,
    ) -> impl Filter<Extract = (Arc<TableEventBus>,), Error = Infallible> + Clone {
        warp::any().map(move || Arc::clone(&event_bus))
    }

    fn with_static_handler(
        handler: Arc<StaticHandler>,
    ) -> impl Filter<Extract = (Arc<StaticHandler>,), Error = Infallible> + Clone {
        warp::any().map(move || handler.clone())
    }
}

#[derive(Debug, serde::Deserialize)]
struct SeatQuery {
    seat: Option<Seat>,
}

pub struct ServerHandle {
    addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<Result<(), ServerError>>>,
    context: AppContext,
}

impl ServerHandle {
    fn new(
        addr: SocketAddr,
        shutdown: oneshot::Sender<()>,
        task: JoinHandle<Result<(), ServerError>>,
        context: AppContext,
    ) -> Self {
        Self {
            addr,
            shutdown: Some(shutdown),
            task: Some(task),
            context,
        }
    }

    pub fn address(&self) -> SocketAddr {
        self.addr
    }

    pub fn context(&self) -> &AppContext {
        &self.context
    }

    pub async fn shutdown(mut self) -> Result<(), ServerError> {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }

        if let Some(task) = self.task.take() {
            match task.await {
                Ok(result) => result?,
                Err(err) => {
                    return Err(ServerError::ConfigError(format!(
                        "server task join error: {err}"
                    )))
                }
            }
        }

        Ok(())
    }
}

impl Drop for ServerHandle {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }

        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
