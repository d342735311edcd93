// src/handlers/dashboard.rs

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};

use crate::{
    common::error::AppError,
    config::AppState,
    handlers::mensalidades::PeriodoQuery,
    models::dashboard::ResumoDashboard,
};

// GET /api/dashboard/resumo
#[utoipa::path(
    get,
    path = "/api/dashboard/resumo",
    tag = "Dashboard",
    params(PeriodoQuery),
    responses(
        (status = 200, description = "Resumo financeiro do mês para os cards da página inicial", body = ResumoDashboard)
    )
)]
pub async fn resumo(
    State(app_state): State<AppState>,
    Query(periodo): Query<PeriodoQuery>,
) -> Result<impl IntoResponse, AppError> {
    let resumo = app_state
        .dashboard_service
        .resumo_do_mes(periodo.mes_ou_atual())
        .await?;

    Ok((StatusCode::OK, Json(resumo)))
}
