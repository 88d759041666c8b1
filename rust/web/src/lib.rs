pub mod errors;
pub mod events;
pub mod handlers;
pub mod logging;
pub mod metrics;
pub mod middleware;
pub mod registry;
pub mod server;
pub mod settings;
pub mod static_handler;

pub use errors::{ErrorResponse, ErrorSeverity, IntoErrorResponse};
pub use events::{BroadcastEnvelope, TableEventBus};
pub use logging::{init_logging, init_test_logging, LogEntry, TestLogSubscriber};
pub use metrics::{MetricsCollector, MetricsSnapshot, RequestTimer};
pub use middleware::{log_response, with_request_logging, RequestMetrics};
pub use registry::{RegistryError, TableHandle, TableRegistry};
pub use server::{AppContext, ServerConfig, ServerError, ServerHandle, WebServer};
pub use settings::{SettingsError, SettingsStore, TableSettings};
pub use static_handler::{StaticError, StaticHandler};
