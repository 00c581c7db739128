use axum::extract::State;
use axum::response::Html;

use crate::inbound::http::router::AppState;

pub async fn admin_metrics(State(state): State<AppState>) -> Html<String> {
    Html(render_metrics_page(state.metrics.file_server_hits()))
}

fn render_metrics_page(hits: u64) -> String {
    format!(
        "<html><body><h1>Welcome, Chirpy Admin</h1><p>Chirpy has been visited {hits} times!</p></body></html>"
    )
}
