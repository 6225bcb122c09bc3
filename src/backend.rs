use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderValue, Method, StatusCode, Uri},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use std::{
    collections::HashMap,
    env::VarError,
    path::PathBuf,
    sync::atomic::{AtomicU64, Ordering},
    sync::Arc,
    time::{Instant, SystemTime, UNIX_EPOCH},
};
use thiserror::Error;
use tower_http::services::{ServeDir, ServeFile};
use tracing_subscriber::EnvFilter;

use crate::site::contact::DeliveryCredentials;

pub const ENV_ENDPOINT_PATH: &str = "/.netlify/functions/env";
pub const ENV_ENDPOINT_ALIAS: &str = "/api/env";

const SERVICE_ID_VAR: &str = "VITE_EMAILJS_SERVICE_ID";
const TEMPLATE_ID_VAR: &str = "VITE_EMAILJS_TEMPLATE_ID";
const PUBLIC_KEY_VAR: &str = "VITE_EMAILJS_PUBLIC_KEY";

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_STATIC_DIR: &str = "dist";
const DEFAULT_LOG_LEVEL: LogLevel = LogLevel::Info;
const DEFAULT_LOG_FORMAT: LogFormat = LogFormat::Json;
const PORT_BOUNDS: (u16, u16) = (1, u16::MAX);
const REQUEST_ID_HEADER: &str = "x-request-id";

static REQUEST_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum LogFormat {
    Json,
    Pretty,
}

#[derive(Clone, Debug)]
struct ServerConfig {
    port: u16,
    static_dir: PathBuf,
    log_level: LogLevel,
    log_format: LogFormat,
}

impl ServerConfig {
    fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let port = non_empty("PORT")
            .and_then(|value| value.parse::<u16>().ok())
            .filter(|value| (PORT_BOUNDS.0..=PORT_BOUNDS.1).contains(value))
            .unwrap_or(DEFAULT_PORT);
        let static_dir = non_empty("STATIC_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR));
        let log_level = parse_log_level(non_empty("LOG_LEVEL").as_deref(), DEFAULT_LOG_LEVEL);
        let log_format = parse_log_format(non_empty("LOG_FORMAT").as_deref(), DEFAULT_LOG_FORMAT);

        Self {
            port,
            static_dir,
            log_level,
            log_format,
        }
    }
}

fn parse_log_level(value: Option<&str>, default: LogLevel) -> LogLevel {
    match value.map(str::to_ascii_lowercase).as_deref() {
        Some("debug") => LogLevel::Debug,
        Some("info") => LogLevel::Info,
        Some("warn") => LogLevel::Warn,
        Some("error") => LogLevel::Error,
        _ => default,
    }
}

fn parse_log_format(value: Option<&str>, default: LogFormat) -> LogFormat {
    match value.map(str::to_ascii_lowercase).as_deref() {
        Some("json") => LogFormat::Json,
        Some("pretty") => LogFormat::Pretty,
        _ => default,
    }
}

#[derive(Debug, Error)]
enum EnvError {
    #[error("environment variable {name} is not valid unicode")]
    NotUnicode { name: &'static str },
}

pub trait EnvSource: Send + Sync {
    fn var(&self, name: &str) -> Result<String, VarError>;
}

struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, name: &str) -> Result<String, VarError> {
        std::env::var(name)
    }
}

impl EnvSource for HashMap<String, String> {
    fn var(&self, name: &str) -> Result<String, VarError> {
        self.get(name).cloned().ok_or(VarError::NotPresent)
    }
}

#[derive(Clone)]
pub struct AppState {
    env: Arc<dyn EnvSource>,
}

impl AppState {
    pub fn new(env: Arc<dyn EnvSource>) -> Self {
        Self { env }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = ServerConfig::from_env();
    init_tracing(&config);

    let bind_address = format!("0.0.0.0:{}", config.port);
    let state = AppState::new(Arc::new(ProcessEnv));
    let app = router(state, &config.static_dir);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    tracing::info!(
        event = "server_listening",
        port = config.port,
        static_dir = %config.static_dir.display(),
        "server listening on http://127.0.0.1:{}",
        config.port
    );
    axum::serve(listener, app).await?;
    Ok(())
}

fn init_tracing(config: &ServerConfig) {
    let builder = tracing_subscriber::fmt().with_env_filter(EnvFilter::new(config.log_level.as_str()));
    let installed = match config.log_format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.try_init(),
    };

    if let Err(error) = installed {
        eprintln!("tracing subscriber already installed: {error}");
    }
}

pub fn router(state: AppState, static_dir: &std::path::Path) -> Router {
    let static_service =
        ServeDir::new(static_dir).not_found_service(ServeFile::new(static_dir.join("index.html")));

    Router::new()
        .route(ENV_ENDPOINT_PATH, get(get_env))
        .route(ENV_ENDPOINT_ALIAS, get(get_env))
        .fallback_service(static_service)
        .with_state(state)
}

fn read_optional(env: &dyn EnvSource, name: &'static str) -> Result<String, EnvError> {
    match env.var(name) {
        Ok(value) => Ok(value),
        Err(VarError::NotPresent) => Ok(String::new()),
        Err(VarError::NotUnicode(_)) => Err(EnvError::NotUnicode { name }),
    }
}

fn read_credentials(env: &dyn EnvSource) -> Result<DeliveryCredentials, EnvError> {
    Ok(DeliveryCredentials {
        service_id: read_optional(env, SERVICE_ID_VAR)?,
        template_id: read_optional(env, TEMPLATE_ID_VAR)?,
        public_key: read_optional(env, PUBLIC_KEY_VAR)?,
    })
}

async fn get_env(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> impl IntoResponse {
    let request_started_at = Instant::now();
    let request_id = resolve_request_id(&headers);

    tracing::info!(
        event = "env_request_start",
        request_id = request_id.as_str(),
        method = method.as_str(),
        path = uri.path(),
    );

    let mut response_headers = HeaderMap::new();
    response_headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));

    match read_credentials(state.env.as_ref()) {
        Ok(credentials) => {
            tracing::info!(
                event = "env_request_complete",
                request_id = request_id.as_str(),
                status = StatusCode::OK.as_u16(),
                duration_ms = request_started_at.elapsed().as_millis() as u64,
                service_id = DeliveryCredentials::presence(&credentials.service_id),
                template_id = DeliveryCredentials::presence(&credentials.template_id),
                public_key = DeliveryCredentials::presence(&credentials.public_key),
            );
            response_with_request_id(StatusCode::OK, response_headers, Json(credentials), &request_id)
        }
        Err(error) => {
            tracing::error!(
                event = "env_request_failed",
                request_id = request_id.as_str(),
                status = StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
                duration_ms = request_started_at.elapsed().as_millis() as u64,
                message = %error,
            );
            let body = ErrorBody {
                error: error.to_string(),
            };
            response_with_request_id(
                StatusCode::INTERNAL_SERVER_ERROR,
                response_headers,
                Json(body),
                &request_id,
            )
        }
    }
}

fn now_unix_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|value| value.as_millis())
        .unwrap_or(0)
}

fn generate_request_id() -> String {
    let counter = REQUEST_ID_COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("req-{}-{counter}", now_unix_millis())
}

fn resolve_request_id(headers: &HeaderMap) -> String {
    let value = headers
        .get(REQUEST_ID_HEADER)
        .and_then(|raw| raw.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(ToString::to_string);

    value.unwrap_or_else(generate_request_id)
}

fn response_with_request_id(
    status: StatusCode,
    mut headers: HeaderMap,
    payload: impl IntoResponse,
    request_id: &str,
) -> axum::response::Response {
    if let Ok(request_id_header) = HeaderValue::from_str(request_id) {
        headers.insert(REQUEST_ID_HEADER, request_id_header);
    }
    (status, headers, payload).into_response()
}
