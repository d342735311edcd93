// src/handlers/comunicados.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::membro::MembroContext,
    models::comunicado::{
        AlvoDestinatario, Comunicado, ComunicadoComEstatisticas, ComunicadoParaMembro,
    },
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CriarComunicadoPayload {
    #[validate(length(min = 2, message = "O título deve ter no mínimo 2 caracteres"))]
    #[schema(example = "Assembleia geral de agosto")]
    pub titulo: String,

    #[validate(length(min = 1, message = "O conteúdo não pode ficar vazio"))]
    pub conteudo: String,

    pub destinatario_tipo: AlvoDestinatario,
    pub cargo_id: Option<Uuid>,
    pub membro_id: Option<Uuid>,
}

// GET /api/comunicados
#[utoipa::path(
    get,
    path = "/api/comunicados",
    tag = "Comunicados",
    responses(
        (status = 200, description = "Todos os comunicados com estatística de leitura", body = Vec<ComunicadoComEstatisticas>)
    )
)]
pub async fn listar(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let comunicados = app_state
        .comunicado_service
        .listar_com_estatisticas()
        .await?;

    Ok((StatusCode::OK, Json(comunicados)))
}

// GET /api/comunicados/meus
#[utoipa::path(
    get,
    path = "/api/comunicados/meus",
    tag = "Comunicados",
    params(
        ("x-membro-id" = Uuid, Header, description = "Membro que está lendo")
    ),
    responses(
        (status = 200, description = "Comunicados endereçados ao membro, com flag de lido", body = Vec<ComunicadoParaMembro>)
    )
)]
pub async fn listar_meus(
    State(app_state): State<AppState>,
    membro: MembroContext,
) -> Result<impl IntoResponse, AppError> {
    let comunicados = app_state
        .comunicado_service
        .listar_para_membro(membro.0)
        .await?;

    Ok((StatusCode::OK, Json(comunicados)))
}

// POST /api/comunicados
#[utoipa::path(
    post,
    path = "/api/comunicados",
    tag = "Comunicados",
    request_body = CriarComunicadoPayload,
    responses(
        (status = 201, description = "Comunicado criado", body = Comunicado),
        (status = 400, description = "Dados inválidos")
    )
)]
pub async fn criar(
    State(app_state): State<AppState>,
    Json(payload): Json<CriarComunicadoPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let comunicado = app_state
        .comunicado_service
        .criar(
            &payload.titulo,
            &payload.conteudo,
            payload.destinatario_tipo,
            payload.cargo_id,
            payload.membro_id,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(comunicado)))
}

// POST /api/comunicados/{id}/leitura
#[utoipa::path(
    post,
    path = "/api/comunicados/{id}/leitura",
    tag = "Comunicados",
    params(
        ("x-membro-id" = Uuid, Header, description = "Membro que leu")
    ),
    responses(
        (status = 204, description = "Leitura registrada (repetir não é erro)")
    )
)]
pub async fn marcar_leitura(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    membro: MembroContext,
) -> Result<impl IntoResponse, AppError> {
    app_state
        .comunicado_service
        .marcar_leitura(id, membro.0)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

// DELETE /api/comunicados/{id}
#[utoipa::path(
    delete,
    path = "/api/comunicados/{id}",
    tag = "Comunicados",
    responses(
        (status = 204, description = "Comunicado excluído"),
        (status = 404, description = "Comunicado não encontrado")
    )
)]
pub async fn excluir(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.comunicado_service.excluir(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
