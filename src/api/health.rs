/// Liveness probe
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Server is up", body = String),
    ),
    tag = "Service"
)]
pub async fn handle_health() -> &'static str {
    "OK"
}
