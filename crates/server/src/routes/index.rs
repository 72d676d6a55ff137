use axum::response::Html;

const INDEX_HTML: &str = include_str!("../../templates/index.html");

/// GET /
/// Serves the bundled frontend.
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}
