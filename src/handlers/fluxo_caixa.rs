// src/handlers/fluxo_caixa.rs

use axum::{
    Json,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
};
use chrono::{Local, NaiveDate};
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    handlers::mensalidades::PeriodoQuery,
    models::fluxo_caixa::{LancamentoCaixa, ResumoFluxoCaixa, TipoFluxo},
    services::export_service,
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CriarLancamentoPayload {
    pub tipo: TipoFluxo,

    #[validate(length(min = 2, message = "A categoria deve ter no mínimo 2 caracteres"))]
    #[schema(example = "Eventos")]
    pub categoria: String,

    #[validate(length(min = 2, message = "A descrição deve ter no mínimo 2 caracteres"))]
    #[schema(example = "Aluguel do salão")]
    pub descricao: String,

    #[schema(example = "200.00")]
    pub valor: Decimal,

    #[schema(value_type = String, format = Date, example = "2026-08-05")]
    pub data: NaiveDate,

    pub anexo_url: Option<String>,
}

// GET /api/fluxo-caixa
#[utoipa::path(
    get,
    path = "/api/fluxo-caixa",
    tag = "Fluxo de Caixa",
    params(PeriodoQuery),
    responses(
        (status = 200, description = "Lançamentos do mês", body = Vec<LancamentoCaixa>)
    )
)]
pub async fn listar(
    State(app_state): State<AppState>,
    Query(periodo): Query<PeriodoQuery>,
) -> Result<impl IntoResponse, AppError> {
    let lancamentos = app_state
        .fluxo_caixa_service
        .listar_por_mes(periodo.mes_ou_atual())
        .await?;

    Ok((StatusCode::OK, Json(lancamentos)))
}

// GET /api/fluxo-caixa/resumo
#[utoipa::path(
    get,
    path = "/api/fluxo-caixa/resumo",
    tag = "Fluxo de Caixa",
    params(PeriodoQuery),
    responses(
        (status = 200, description = "Totais e saldo do mês", body = ResumoFluxoCaixa)
    )
)]
pub async fn resumo(
    State(app_state): State<AppState>,
    Query(periodo): Query<PeriodoQuery>,
) -> Result<impl IntoResponse, AppError> {
    let resumo = app_state
        .fluxo_caixa_service
        .resumo_do_mes(periodo.mes_ou_atual())
        .await?;

    Ok((StatusCode::OK, Json(resumo)))
}

// POST /api/fluxo-caixa
#[utoipa::path(
    post,
    path = "/api/fluxo-caixa",
    tag = "Fluxo de Caixa",
    request_body = CriarLancamentoPayload,
    responses(
        (status = 201, description = "Lançamento criado", body = LancamentoCaixa),
        (status = 400, description = "Dados inválidos")
    )
)]
pub async fn criar(
    State(app_state): State<AppState>,
    Json(payload): Json<CriarLancamentoPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let lancamento = app_state
        .fluxo_caixa_service
        .criar(
            payload.tipo,
            &payload.categoria,
            &payload.descricao,
            payload.valor,
            payload.data,
            payload.anexo_url.as_deref(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(lancamento)))
}

// PUT /api/fluxo-caixa/{id}
#[utoipa::path(
    put,
    path = "/api/fluxo-caixa/{id}",
    tag = "Fluxo de Caixa",
    request_body = CriarLancamentoPayload,
    responses(
        (status = 200, description = "Lançamento atualizado", body = LancamentoCaixa),
        (status = 404, description = "Lançamento não encontrado")
    )
)]
pub async fn atualizar(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<CriarLancamentoPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let lancamento = app_state
        .fluxo_caixa_service
        .atualizar(
            id,
            &payload.categoria,
            &payload.descricao,
            payload.valor,
            payload.data,
            payload.anexo_url.as_deref(),
        )
        .await?;

    Ok((StatusCode::OK, Json(lancamento)))
}

// DELETE /api/fluxo-caixa/{id}
#[utoipa::path(
    delete,
    path = "/api/fluxo-caixa/{id}",
    tag = "Fluxo de Caixa",
    responses(
        (status = 204, description = "Lançamento excluído"),
        (status = 404, description = "Lançamento não encontrado")
    )
)]
pub async fn excluir(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.fluxo_caixa_service.excluir(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// GET /api/fluxo-caixa/export/csv
#[utoipa::path(
    get,
    path = "/api/fluxo-caixa/export/csv",
    tag = "Fluxo de Caixa",
    params(PeriodoQuery),
    responses(
        (status = 200, description = "CSV do mês (UTF-8 com BOM, separado por ;)")
    )
)]
pub async fn exportar_csv(
    State(app_state): State<AppState>,
    Query(periodo): Query<PeriodoQuery>,
) -> Result<Response, AppError> {
    let lancamentos = app_state
        .fluxo_caixa_service
        .listar_por_mes(periodo.mes_ou_atual())
        .await?;

    let csv = export_service::csv_fluxo_caixa(&lancamentos);
    let nome = export_service::nome_arquivo_csv("fluxo_caixa", Local::now().date_naive());

    let headers = [
        (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", nome),
        ),
    ];

    Ok((headers, csv).into_response())
}

// GET /api/fluxo-caixa/relatorio
#[utoipa::path(
    get,
    path = "/api/fluxo-caixa/relatorio",
    tag = "Fluxo de Caixa",
    params(PeriodoQuery),
    responses(
        (status = 200, description = "Relatório HTML pronto para o diálogo de impressão")
    )
)]
pub async fn relatorio(
    State(app_state): State<AppState>,
    Query(periodo): Query<PeriodoQuery>,
) -> Result<impl IntoResponse, AppError> {
    let mes = periodo.mes_ou_atual();
    let lancamentos = app_state.fluxo_caixa_service.listar_por_mes(mes).await?;
    let resumo = crate::services::fluxo_caixa_service::resumir_fluxo(&lancamentos);

    Ok(Html(export_service::relatorio_html_fluxo_caixa(
        mes,
        &lancamentos,
        &resumo,
    )))
}
