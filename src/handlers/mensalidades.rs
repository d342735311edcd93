// src/handlers/mensalidades.rs

use axum::{
    Json,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use chrono::{Local, NaiveDate};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::mensalidade::{Mensalidade, MensalidadeView, ResumoMensalidades},
    services::{export_service, metricas::primeiro_dia_do_mes},
};

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PeriodoQuery {
    /// Qualquer dia do mês desejado (default: mês corrente)
    pub mes: Option<NaiveDate>,
}

impl PeriodoQuery {
    pub fn mes_ou_atual(&self) -> NaiveDate {
        primeiro_dia_do_mes(self.mes.unwrap_or_else(|| Local::now().date_naive()))
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GerarMensalidadesPayload {
    #[schema(value_type = String, format = Date, example = "2026-08-01")]
    pub mes_referencia: NaiveDate,

    #[schema(example = "150.00")]
    pub valor: Decimal,

    #[schema(value_type = String, format = Date, example = "2026-08-10")]
    pub data_vencimento: NaiveDate,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PagarMensalidadePayload {
    /// Default: hoje
    #[schema(value_type = Option<String>, format = Date)]
    pub data_pagamento: Option<NaiveDate>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AtualizarMensalidadePayload {
    pub valor: Decimal,

    #[schema(value_type = String, format = Date)]
    pub data_vencimento: NaiveDate,

    #[validate(length(min = 1, message = "O status não pode ficar vazio"))]
    #[schema(example = "aberto")]
    pub status: String,

    pub observacao: Option<String>,
}

// GET /api/mensalidades
#[utoipa::path(
    get,
    path = "/api/mensalidades",
    tag = "Mensalidades",
    params(PeriodoQuery),
    responses(
        (status = 200, description = "Mensalidades do mês, com status derivado", body = Vec<MensalidadeView>)
    )
)]
pub async fn listar(
    State(app_state): State<AppState>,
    Query(periodo): Query<PeriodoQuery>,
) -> Result<impl IntoResponse, AppError> {
    let views = app_state
        .mensalidade_service
        .listar_por_mes(periodo.mes_ou_atual())
        .await?;

    Ok((StatusCode::OK, Json(views)))
}

// GET /api/mensalidades/resumo
#[utoipa::path(
    get,
    path = "/api/mensalidades/resumo",
    tag = "Mensalidades",
    params(PeriodoQuery),
    responses(
        (status = 200, description = "Totais por balde de status e taxa de conversão", body = ResumoMensalidades)
    )
)]
pub async fn resumo(
    State(app_state): State<AppState>,
    Query(periodo): Query<PeriodoQuery>,
) -> Result<impl IntoResponse, AppError> {
    let resumo = app_state
        .mensalidade_service
        .resumo_do_mes(periodo.mes_ou_atual())
        .await?;

    Ok((StatusCode::OK, Json(resumo)))
}

// POST /api/mensalidades/gerar
#[utoipa::path(
    post,
    path = "/api/mensalidades/gerar",
    tag = "Mensalidades",
    request_body = GerarMensalidadesPayload,
    responses(
        (status = 201, description = "Cobranças geradas para os membros ativos do período")
    )
)]
pub async fn gerar(
    State(app_state): State<AppState>,
    Json(payload): Json<GerarMensalidadesPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let criadas = app_state
        .mensalidade_service
        .gerar_para_periodo(payload.mes_referencia, payload.valor, payload.data_vencimento)
        .await?;

    Ok((StatusCode::CREATED, Json(json!({ "criadas": criadas }))))
}

// PATCH /api/mensalidades/{id}/pagar
#[utoipa::path(
    patch,
    path = "/api/mensalidades/{id}/pagar",
    tag = "Mensalidades",
    request_body = PagarMensalidadePayload,
    responses(
        (status = 200, description = "Pagamento registrado", body = Mensalidade),
        (status = 404, description = "Mensalidade não encontrada")
    )
)]
pub async fn pagar(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<PagarMensalidadePayload>,
) -> Result<impl IntoResponse, AppError> {
    let mensalidade = app_state
        .mensalidade_service
        .marcar_paga(id, payload.data_pagamento)
        .await?;

    Ok((StatusCode::OK, Json(mensalidade)))
}

// PUT /api/mensalidades/{id}
#[utoipa::path(
    put,
    path = "/api/mensalidades/{id}",
    tag = "Mensalidades",
    request_body = AtualizarMensalidadePayload,
    responses(
        (status = 200, description = "Mensalidade atualizada", body = Mensalidade),
        (status = 404, description = "Mensalidade não encontrada")
    )
)]
pub async fn atualizar(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<AtualizarMensalidadePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let mensalidade = app_state
        .mensalidade_service
        .atualizar(
            id,
            payload.valor,
            payload.data_vencimento,
            &payload.status,
            payload.observacao.as_deref(),
        )
        .await?;

    Ok((StatusCode::OK, Json(mensalidade)))
}

// GET /api/mensalidades/export/csv
#[utoipa::path(
    get,
    path = "/api/mensalidades/export/csv",
    tag = "Mensalidades",
    params(PeriodoQuery),
    responses(
        (status = 200, description = "CSV do mês (UTF-8 com BOM, separado por ;)")
    )
)]
pub async fn exportar_csv(
    State(app_state): State<AppState>,
    Query(periodo): Query<PeriodoQuery>,
) -> Result<Response, AppError> {
    let views = app_state
        .mensalidade_service
        .listar_por_mes(periodo.mes_ou_atual())
        .await?;

    let csv = export_service::csv_mensalidades(&views);
    let nome = export_service::nome_arquivo_csv("mensalidades", Local::now().date_naive());

    // Headers para o navegador baixar a planilha
    let headers = [
        (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", nome),
        ),
    ];

    Ok((headers, csv).into_response())
}
