use std::net::SocketAddr;

use axum::extract::{DefaultBodyLimit, Path, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::body::HttpBody;
use axum::{BoxError, Json, Router};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::Config;
use crate::controllers::snippet;
use crate::store::AnyStore;
use crate::types::api::{CreateSnippet, SnippetCreated, SnippetView, PASSWORD_HEADER};
use crate::App;

const USAGE: &str = "\
snipbin - share short text snippets under four-character codes

    POST /api/snippets          create a snippet from a JSON body:
                                {title?, content, syntax?, expiry?, isPrivate?, password?}
                                expiry is one of 1h, 24h (default), 7d, 30d, never
    GET  /api/snippets/{code}   fetch a snippet as JSON
    GET  /share/{code}          fetch a snippet's content as plain text

Protected snippets need their password in the x-snippet-password header.
";

pub async fn run(app: App) -> anyhow::Result<()> {
    let addr = SocketAddr::from(([127, 0, 0, 1], app.config.port));
    // JSON framing on top of the content itself
    let body_limit = app.config.limits.max_content_size * 2 + 4096;

    let router = router(app).layer(RequestBodyLimitLayer::new(body_limit));

    info!("listening on {addr}");
    axum::Server::bind(&addr)
        .serve(router.into_make_service())
        .await?;

    Ok(())
}

pub fn router<B>(app: App) -> Router<(), B>
where
    B: HttpBody + Send + 'static,
    B::Data: Send,
    B::Error: Into<BoxError>,
{
    Router::new()
        .route("/", get(index))
        .route("/api/snippets", post(create_snippet))
        .route("/api/snippets/:code", get(get_snippet))
        .route("/share/:code", get(get_snippet_raw))
        .layer(DefaultBodyLimit::disable())
        .layer(TraceLayer::new_for_http())
        .with_state(app)
}

async fn index() -> &'static str {
    USAGE
}

async fn create_snippet(
    State(config): State<Config>,
    State(mut store): State<AnyStore>,
    Json(request): Json<CreateSnippet>,
) -> crate::AppResult<impl IntoResponse> {
    let snippet = snippet::create(&mut store, &config.limits, request.into()).await?;

    let path = format!("/share/{code}", code = snippet.code);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, path)],
        Json(SnippetCreated {
            url: config.share_url(&snippet.code),
            code: snippet.code,
            expiry: snippet.expiry,
        }),
    ))
}

async fn get_snippet(
    State(mut store): State<AnyStore>,
    Path(code): Path<String>,
    headers: HeaderMap,
) -> crate::AppResult<Json<SnippetView>> {
    let snippet = snippet::retrieve(&mut store, &code, password(&headers)).await?;
    Ok(Json(snippet.into()))
}

async fn get_snippet_raw(
    State(mut store): State<AnyStore>,
    Path(code): Path<String>,
    headers: HeaderMap,
) -> crate::AppResult<impl IntoResponse> {
    let snippet = snippet::retrieve(&mut store, &code, password(&headers)).await?;
    Ok((
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        snippet.content,
    ))
}

fn password(headers: &HeaderMap) -> Option<&str> {
    headers.get(PASSWORD_HEADER).and_then(|v| v.to_str().ok())
}
