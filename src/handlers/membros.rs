// src/handlers/membros.rs

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
    models::membro::{Membro, MembroComCargos, StatusMembro},
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CriarMembroPayload {
    #[validate(length(min = 2, message = "O nome deve ter no mínimo 2 caracteres"))]
    #[schema(example = "Carlos Eduardo Souza")]
    pub nome: String,

    #[validate(length(min = 2, message = "O nome de guerra deve ter no mínimo 2 caracteres"))]
    #[schema(example = "Trovão")]
    pub nome_de_guerra: String,

    #[validate(email(message = "E-mail inválido"))]
    pub email: Option<String>,

    pub telefone: Option<String>,

    pub status: StatusMembro,

    #[schema(value_type = Option<String>, format = Date)]
    pub data_entrada: Option<NaiveDate>,
}

// GET /api/membros
#[utoipa::path(
    get,
    path = "/api/membros",
    tag = "Membros",
    responses(
        (status = 200, description = "Roster completo, com cargos ativos", body = Vec<MembroComCargos>)
    )
)]
pub async fn listar(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let roster = app_state.membro_service.listar().await?;
    Ok((StatusCode::OK, Json(roster)))
}

// POST /api/membros
#[utoipa::path(
    post,
    path = "/api/membros",
    tag = "Membros",
    request_body = CriarMembroPayload,
    responses(
        (status = 201, description = "Membro criado", body = Membro),
        (status = 400, description = "Dados inválidos")
    )
)]
pub async fn criar(
    State(app_state): State<AppState>,
    Json(payload): Json<CriarMembroPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let membro = app_state
        .membro_service
        .criar(
            &payload.nome,
            &payload.nome_de_guerra,
            payload.email.as_deref(),
            payload.telefone.as_deref(),
            payload.status,
            payload.data_entrada,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(membro)))
}

// GET /api/membros/{id}
#[utoipa::path(
    get,
    path = "/api/membros/{id}",
    tag = "Membros",
    responses(
        (status = 200, description = "Membro pelo id", body = Membro),
        (status = 404, description = "Membro não encontrado")
    )
)]
pub async fn buscar(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let membro = app_state.membro_service.buscar_por_id(id).await?;
    Ok((StatusCode::OK, Json(membro)))
}

// PUT /api/membros/{id}
#[utoipa::path(
    put,
    path = "/api/membros/{id}",
    tag = "Membros",
    request_body = CriarMembroPayload,
    responses(
        (status = 200, description = "Membro atualizado", body = Membro),
        (status = 404, description = "Membro não encontrado")
    )
)]
pub async fn atualizar(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<CriarMembroPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let membro = app_state
        .membro_service
        .atualizar(
            id,
            &payload.nome,
            &payload.nome_de_guerra,
            payload.email.as_deref(),
            payload.telefone.as_deref(),
            payload.status,
        )
        .await?;

    Ok((StatusCode::OK, Json(membro)))
}

// PATCH /api/membros/{id}/desativar
#[utoipa::path(
    patch,
    path = "/api/membros/{id}/desativar",
    tag = "Membros",
    responses(
        (status = 200, description = "Membro desativado (baixa lógica)", body = Membro),
        (status = 404, description = "Membro não encontrado")
    )
)]
pub async fn desativar(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let membro = app_state.membro_service.desativar(id).await?;
    Ok((StatusCode::OK, Json(membro)))
}
