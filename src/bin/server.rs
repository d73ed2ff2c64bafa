//! Thin HTTP boundary (spec.md §6): an `axum` router over [`skinforge::Engine`].
//!
//! Grounded in `original_source/src/routes/{face,body,skin,uuid,ping}.go`'s
//! request flow (parse query params against route config, resolve the path
//! segment to a UUID, render-or-serve-from-cache, set `X-Cache-Hit`/
//! `Content-Disposition`) and `original_source/src/routes/init.go`'s
//! package-level collaborators, here replaced by the explicit `Engine`
//! passed through `axum::extract::State` instead of globals.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use serde::Deserialize;

use skinforge::cache::MemoryBackend;
use skinforge::config::Config;
use skinforge::identity::MojangIdentityClient;
use skinforge::image::OutputFormat;
use skinforge::player::PlayerUuid;
use skinforge::render::{RenderKind, RenderOptions};
use skinforge::{Engine, EngineError};

type AppEngine = Engine<MemoryBackend, MojangIdentityClient>;

#[derive(Clone)]
struct AppState {
    engine: Arc<AppEngine>,
}

#[derive(Debug, Deserialize, Default)]
struct RenderQuery {
    scale: Option<i64>,
    overlay: Option<bool>,
    download: Option<bool>,
    square: Option<bool>,
    format: Option<String>,
}

#[tokio::main]
async fn main() {
    env_logger::init();

    let raw_config = std::env::var("SKINFORGE_CONFIG")
        .ok()
        .and_then(|path| std::fs::read_to_string(path).ok());
    let config = match raw_config {
        Some(raw) => Config::from_yaml(&raw).unwrap_or_else(|err| {
            log::error!("failed to parse SKINFORGE_CONFIG, using defaults: {err}");
            Config::default()
        }),
        None => Config::default(),
    };

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .expect("host/port must form a valid socket address");

    let cache = Arc::new(MemoryBackend::new());
    let identity = Arc::new(MojangIdentityClient::default());
    let engine = Arc::new(Engine::new(cache, identity, reqwest::Client::new(), config));
    let state = AppState { engine };

    let app = Router::new()
        .route("/ping", get(ping))
        .route("/uuid/:user", get(uuid_handler))
        .route("/skin/:user", get(skin_handler))
        .route("/face/:user", get(face_handler))
        .route("/head/:user", get(head_handler))
        .route("/body/full/:user", get(full_body_handler))
        .route("/body/front/:user", get(front_body_handler))
        .route("/body/back/:user", get(back_body_handler))
        .route("/body/left/:user", get(left_body_handler))
        .route("/body/right/:user", get(right_body_handler))
        .with_state(state);

    log::info!("listening on {addr}");
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("failed to bind listener");
    axum::serve(listener, app).await.expect("server error");
}

async fn ping() -> &'static str {
    "Pong!"
}

async fn uuid_handler(
    State(state): State<AppState>,
    Path(user): Path<String>,
) -> Result<String, ApiError> {
    match state.engine.resolve_uuid(&user).await? {
        Some(uuid) => Ok(uuid.to_string()),
        None => Err(ApiError(EngineError::InvalidUuid(user))),
    }
}

async fn skin_handler(
    State(state): State<AppState>,
    Path(user): Path<String>,
    Query(query): Query<RenderQuery>,
) -> Result<Response, ApiError> {
    let (user, _) = split_extension(&user);
    let route = state.engine.config().routes.raw_skin;
    let uuid = resolve_or_404(&state, &user).await?;

    let bytes = state.engine.raw_skin(uuid).await?;

    let mut response = bytes_response(bytes, OutputFormat::Png);
    if query.download.unwrap_or(route.default_download) {
        set_download_header(&mut response, &user);
    }
    Ok(response)
}

async fn face_handler(
    state: State<AppState>,
    path: Path<String>,
    query: Query<RenderQuery>,
) -> Result<Response, ApiError> {
    render_handler(state, path, query, RenderKind::Face).await
}

async fn head_handler(
    state: State<AppState>,
    path: Path<String>,
    query: Query<RenderQuery>,
) -> Result<Response, ApiError> {
    render_handler(state, path, query, RenderKind::Head).await
}

async fn full_body_handler(
    state: State<AppState>,
    path: Path<String>,
    query: Query<RenderQuery>,
) -> Result<Response, ApiError> {
    render_handler(state, path, query, RenderKind::FullBody).await
}

async fn front_body_handler(
    state: State<AppState>,
    path: Path<String>,
    query: Query<RenderQuery>,
) -> Result<Response, ApiError> {
    render_handler(state, path, query, RenderKind::FrontBody).await
}

async fn back_body_handler(
    state: State<AppState>,
    path: Path<String>,
    query: Query<RenderQuery>,
) -> Result<Response, ApiError> {
    render_handler(state, path, query, RenderKind::BackBody).await
}

async fn left_body_handler(
    state: State<AppState>,
    path: Path<String>,
    query: Query<RenderQuery>,
) -> Result<Response, ApiError> {
    render_handler(state, path, query, RenderKind::LeftBody).await
}

async fn right_body_handler(
    state: State<AppState>,
    path: Path<String>,
    query: Query<RenderQuery>,
) -> Result<Response, ApiError> {
    render_handler(state, path, query, RenderKind::RightBody).await
}

/// Shared request flow for every render-kind route (spec.md §6): split the
/// optional `.ext` suffix, resolve the path segment to a UUID, clamp query
/// params against the route's configured defaults/bounds, render, and set
/// the response headers.
async fn render_handler(
    State(state): State<AppState>,
    Path(user): Path<String>,
    Query(query): Query<RenderQuery>,
    kind: RenderKind,
) -> Result<Response, ApiError> {
    let (user, ext) = split_extension(&user);
    let route = state.engine.config().route_for(kind);

    let format = match query.format.as_deref().or(ext.as_deref()) {
        Some(raw) => OutputFormat::parse(raw)?,
        None => OutputFormat::Png,
    };

    let scale = route.clamp_scale(query.scale.unwrap_or(route.default_scale));
    let overlay = query.overlay.unwrap_or(route.default_overlay);
    let download = query.download.unwrap_or(route.default_download);
    let square = query.square.unwrap_or(false);
    let opts = RenderOptions::new(scale, overlay, false, square)?;

    let uuid = resolve_or_404(&state, &user).await?;

    let (bytes, hit) = state.engine.render(kind, uuid, opts, format).await?;

    let mut response = bytes_response(bytes, format);
    response.headers_mut().insert(
        "X-Cache-Hit",
        HeaderValue::from_static(if hit { "true" } else { "false" }),
    );
    if download {
        set_download_header(&mut response, &user);
    }
    Ok(response)
}

/// Resolves `user` to a UUID, returning `EngineError::InvalidUuid` (mapped to
/// 404 by `ApiError`'s special-case below) when neither a well-formed UUID
/// nor a known username was given.
async fn resolve_or_404(state: &AppState, user: &str) -> Result<PlayerUuid, ApiError> {
    match state.engine.resolve_uuid(user).await? {
        Some(uuid) => Ok(uuid),
        None => Err(ApiError(EngineError::InvalidUuid(user.to_string()))),
    }
}

fn bytes_response(bytes: Vec<u8>, format: OutputFormat) -> Response {
    let mut response = bytes.into_response();
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static(format.content_type()),
    );
    response
}

fn set_download_header(response: &mut Response, user: &str) {
    if let Ok(value) = HeaderValue::from_str(&format!(r#"attachment; filename="{user}.png""#)) {
        response.headers_mut().insert(header::CONTENT_DISPOSITION, value);
    }
}

/// Strips a trailing `.ext` from a path segment, e.g. `notch.png` ->
/// `("notch", Some("png"))`. UUIDs and usernames never legitimately contain
/// a dot, so any suffix after the last one is treated as a format hint.
fn split_extension(segment: &str) -> (String, Option<String>) {
    match segment.rsplit_once('.') {
        Some((base, ext)) if !base.is_empty() => (base.to_string(), Some(ext.to_string())),
        _ => (segment.to_string(), None),
    }
}

/// Maps `EngineError` to the HTTP response shape spec.md §7 describes:
/// input-validation errors become 400, everything else is a 500.
struct ApiError(EngineError);

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.0 {
            EngineError::InvalidUuid(_) => StatusCode::NOT_FOUND,
            EngineError::InvalidFormat(_) | EngineError::InvalidScale(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, self.0.to_string()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_extension_separates_known_suffix() {
        assert_eq!(
            split_extension("notch.png"),
            ("notch".to_string(), Some("png".to_string()))
        );
        assert_eq!(split_extension("notch"), ("notch".to_string(), None));
    }

    #[test]
    fn split_extension_leaves_bare_uuid_untouched() {
        let (base, ext) = split_extension("069a79f444e94726a5befca90e38aaf5");
        assert_eq!(base, "069a79f444e94726a5befca90e38aaf5");
        assert_eq!(ext, None);
    }
}
