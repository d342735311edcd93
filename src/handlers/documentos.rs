// src/handlers/documentos.rs

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
    models::{
        comunicado::AlvoDestinatario,
        documento::{Documento, DocumentoComEstatisticas, DocumentoParaMembro},
    },
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CriarDocumentoPayload {
    #[validate(length(min = 2, message = "O título deve ter no mínimo 2 caracteres"))]
    #[schema(example = "Estatuto 2026")]
    pub titulo: String,

    pub descricao: Option<String>,

    #[validate(url(message = "URL do arquivo inválida"))]
    pub arquivo_url: String,

    pub destinatario_tipo: AlvoDestinatario,
    pub cargo_id: Option<Uuid>,
    pub membro_id: Option<Uuid>,
}

// GET /api/documentos
#[utoipa::path(
    get,
    path = "/api/documentos",
    tag = "Documentos",
    responses(
        (status = 200, description = "Todos os documentos com estatística de acesso", body = Vec<DocumentoComEstatisticas>)
    )
)]
pub async fn listar(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let documentos = app_state
        .documento_service
        .listar_com_estatisticas()
        .await?;

    Ok((StatusCode::OK, Json(documentos)))
}

// GET /api/documentos/meus
#[utoipa::path(
    get,
    path = "/api/documentos/meus",
    tag = "Documentos",
    params(
        ("x-membro-id" = Uuid, Header, description = "Membro que está consultando")
    ),
    responses(
        (status = 200, description = "Documentos endereçados ao membro, com flag de acesso", body = Vec<DocumentoParaMembro>)
    )
)]
pub async fn listar_meus(
    State(app_state): State<AppState>,
    membro: MembroContext,
) -> Result<impl IntoResponse, AppError> {
    let documentos = app_state
        .documento_service
        .listar_para_membro(membro.0)
        .await?;

    Ok((StatusCode::OK, Json(documentos)))
}

// POST /api/documentos
#[utoipa::path(
    post,
    path = "/api/documentos",
    tag = "Documentos",
    request_body = CriarDocumentoPayload,
    responses(
        (status = 201, description = "Documento criado", body = Documento),
        (status = 400, description = "Dados inválidos")
    )
)]
pub async fn criar(
    State(app_state): State<AppState>,
    Json(payload): Json<CriarDocumentoPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let documento = app_state
        .documento_service
        .criar(
            &payload.titulo,
            payload.descricao.as_deref(),
            &payload.arquivo_url,
            payload.destinatario_tipo,
            payload.cargo_id,
            payload.membro_id,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(documento)))
}

// POST /api/documentos/{id}/acesso
#[utoipa::path(
    post,
    path = "/api/documentos/{id}/acesso",
    tag = "Documentos",
    params(
        ("x-membro-id" = Uuid, Header, description = "Membro que acessou")
    ),
    responses(
        (status = 204, description = "Acesso registrado (repetir não é erro)")
    )
)]
pub async fn registrar_acesso(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    membro: MembroContext,
) -> Result<impl IntoResponse, AppError> {
    app_state
        .documento_service
        .registrar_acesso(id, membro.0)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

// DELETE /api/documentos/{id}
#[utoipa::path(
    delete,
    path = "/api/documentos/{id}",
    tag = "Documentos",
    responses(
        (status = 204, description = "Documento excluído"),
        (status = 404, description = "Documento não encontrado")
    )
)]
pub async fn excluir(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.documento_service.excluir(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
