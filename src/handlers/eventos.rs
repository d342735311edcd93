// src/handlers/eventos.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::membro::MembroContext,
    models::evento::{Evento, EventoComPresenca, ResultadoConfirmacao},
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CriarEventoPayload {
    #[validate(length(min = 2, message = "O título deve ter no mínimo 2 caracteres"))]
    #[schema(example = "Encontro Nacional 2026")]
    pub titulo: String,

    pub descricao: Option<String>,
    pub local: Option<String>,

    #[schema(value_type = String, format = Date, example = "2026-09-12")]
    pub data_evento: NaiveDate,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmarPresencaPayload {
    #[validate(range(min = 0, message = "Acompanhantes não pode ser negativo"))]
    #[serde(default)]
    pub acompanhantes: i32,

    #[validate(range(min = 0, message = "Convidados não pode ser negativo"))]
    #[serde(default)]
    pub convidados: i32,
}

// GET /api/eventos
#[utoipa::path(
    get,
    path = "/api/eventos",
    tag = "Eventos",
    params(
        ("x-membro-id" = Uuid, Header, description = "Membro que está consultando")
    ),
    responses(
        (status = 200, description = "Agenda com contadores e a confirmação do membro", body = Vec<EventoComPresenca>)
    )
)]
pub async fn listar(
    State(app_state): State<AppState>,
    membro: MembroContext,
) -> Result<impl IntoResponse, AppError> {
    let eventos = app_state
        .evento_service
        .listar_com_presenca(membro.0)
        .await?;

    Ok((StatusCode::OK, Json(eventos)))
}

// POST /api/eventos
#[utoipa::path(
    post,
    path = "/api/eventos",
    tag = "Eventos",
    request_body = CriarEventoPayload,
    responses(
        (status = 201, description = "Evento criado", body = Evento),
        (status = 400, description = "Dados inválidos")
    )
)]
pub async fn criar(
    State(app_state): State<AppState>,
    Json(payload): Json<CriarEventoPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let evento = app_state
        .evento_service
        .criar(
            &payload.titulo,
            payload.descricao.as_deref(),
            payload.local.as_deref(),
            payload.data_evento,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(evento)))
}

// PUT /api/eventos/{id}
#[utoipa::path(
    put,
    path = "/api/eventos/{id}",
    tag = "Eventos",
    request_body = CriarEventoPayload,
    responses(
        (status = 200, description = "Evento atualizado", body = Evento),
        (status = 404, description = "Evento não encontrado")
    )
)]
pub async fn atualizar(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<CriarEventoPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let evento = app_state
        .evento_service
        .atualizar(
            id,
            &payload.titulo,
            payload.descricao.as_deref(),
            payload.local.as_deref(),
            payload.data_evento,
        )
        .await?;

    Ok((StatusCode::OK, Json(evento)))
}

// POST /api/eventos/{id}/confirmacao
#[utoipa::path(
    post,
    path = "/api/eventos/{id}/confirmacao",
    tag = "Eventos",
    request_body = ConfirmarPresencaPayload,
    params(
        ("x-membro-id" = Uuid, Header, description = "Membro confirmando/cancelando presença")
    ),
    responses(
        (status = 200, description = "Presença alternada; contadores atualizados", body = ResultadoConfirmacao),
        (status = 409, description = "Já existe um toggle em andamento para este evento")
    )
)]
pub async fn alternar_presenca(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    membro: MembroContext,
    Json(payload): Json<ConfirmarPresencaPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let resultado = app_state
        .evento_service
        .alternar_presenca(id, membro.0, payload.acompanhantes, payload.convidados)
        .await?;

    Ok((StatusCode::OK, Json(resultado)))
}

// DELETE /api/eventos/{id}
#[utoipa::path(
    delete,
    path = "/api/eventos/{id}",
    tag = "Eventos",
    responses(
        (status = 204, description = "Evento excluído"),
        (status = 404, description = "Evento não encontrado")
    )
)]
pub async fn excluir(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.evento_service.excluir(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
