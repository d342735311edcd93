// src/handlers/enquetes.rs

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
    models::enquete::{Enquete, EnqueteComResultados, TipoEnquete, Voto},
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CriarEnquetePayload {
    #[validate(length(min = 2, message = "O título deve ter no mínimo 2 caracteres"))]
    #[schema(example = "Destino do bate-volta de setembro")]
    pub titulo: String,

    pub descricao: Option<String>,

    pub tipo: TipoEnquete,

    /// Obrigatório (mínimo 2) para múltipla escolha; ignorado em texto livre
    #[serde(default)]
    pub opcoes: Vec<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VotarPayload {
    pub opcao_id: Option<Uuid>,
    pub resposta_texto: Option<String>,
}

// GET /api/enquetes
#[utoipa::path(
    get,
    path = "/api/enquetes",
    tag = "Enquetes",
    params(
        ("x-membro-id" = Uuid, Header, description = "Membro que está consultando")
    ),
    responses(
        (status = 200, description = "Enquetes com apuração e o voto do membro", body = Vec<EnqueteComResultados>)
    )
)]
pub async fn listar(
    State(app_state): State<AppState>,
    membro: MembroContext,
) -> Result<impl IntoResponse, AppError> {
    let enquetes = app_state
        .enquete_service
        .listar_com_resultados(membro.0)
        .await?;

    Ok((StatusCode::OK, Json(enquetes)))
}

// POST /api/enquetes
#[utoipa::path(
    post,
    path = "/api/enquetes",
    tag = "Enquetes",
    request_body = CriarEnquetePayload,
    responses(
        (status = 201, description = "Enquete criada com suas opções", body = Enquete),
        (status = 400, description = "Dados inválidos")
    )
)]
pub async fn criar(
    State(app_state): State<AppState>,
    Json(payload): Json<CriarEnquetePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let enquete = app_state
        .enquete_service
        .criar(
            &payload.titulo,
            payload.descricao.as_deref(),
            payload.tipo,
            &payload.opcoes,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(enquete)))
}

// POST /api/enquetes/{id}/votar
#[utoipa::path(
    post,
    path = "/api/enquetes/{id}/votar",
    tag = "Enquetes",
    request_body = VotarPayload,
    params(
        ("x-membro-id" = Uuid, Header, description = "Membro que está votando")
    ),
    responses(
        (status = 201, description = "Voto registrado", body = Voto),
        (status = 422, description = "Voto inválido ou enquete encerrada")
    )
)]
pub async fn votar(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    membro: MembroContext,
    Json(payload): Json<VotarPayload>,
) -> Result<impl IntoResponse, AppError> {
    let voto = app_state
        .enquete_service
        .votar(
            id,
            membro.0,
            payload.opcao_id,
            payload.resposta_texto.as_deref(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(voto)))
}

// PATCH /api/enquetes/{id}/encerrar
#[utoipa::path(
    patch,
    path = "/api/enquetes/{id}/encerrar",
    tag = "Enquetes",
    responses(
        (status = 200, description = "Enquete encerrada", body = Enquete),
        (status = 404, description = "Enquete não encontrada")
    )
)]
pub async fn encerrar(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let enquete = app_state.enquete_service.encerrar(id).await?;
    Ok((StatusCode::OK, Json(enquete)))
}

// DELETE /api/enquetes/{id}
#[utoipa::path(
    delete,
    path = "/api/enquetes/{id}",
    tag = "Enquetes",
    responses(
        (status = 204, description = "Enquete excluída"),
        (status = 404, description = "Enquete não encontrada")
    )
)]
pub async fn excluir(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.enquete_service.excluir(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
