/// Liveness check.
pub async fn healthz() -> &'static str {
    "OK"
}
