// src/middleware/membro.rs

use axum::{extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

use crate::common::error::AppError;

/// Identidade do membro que está usando a aplicação, vinda do cabeçalho
/// `x-membro-id`. Autenticação de verdade fica fora deste serviço; aqui só
/// interessa saber QUEM pediu, para leituras "minhas" e ações por membro.
pub struct MembroContext(pub Uuid);

impl<S> FromRequestParts<S> for MembroContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get("x-membro-id")
            .and_then(|valor| valor.to_str().ok())
            .and_then(|texto| Uuid::parse_str(texto).ok())
            .map(MembroContext)
            .ok_or(AppError::MembroNaoIdentificado)
    }
}
