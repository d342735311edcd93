// src/models/documento.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::comunicado::AlvoDestinatario;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Documento {
    pub id: Uuid,

    #[schema(example = "Estatuto 2026")]
    pub titulo: String,

    pub descricao: Option<String>,

    /// Apenas a URL: o armazenamento do arquivo em si é externo
    pub arquivo_url: String,

    pub destinatario_tipo: AlvoDestinatario,
    pub cargo_id: Option<Uuid>,
    pub membro_id: Option<Uuid>,

    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, FromRow)]
pub struct AcessoRow {
    pub documento_id: Uuid,
    pub membro_id: Uuid,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DocumentoComEstatisticas {
    #[serde(flatten)]
    pub documento: Documento,

    pub total_acessos: u64,
    pub total_destinatarios: u64,

    #[schema(example = 40.0)]
    pub percentual_acesso: f64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DocumentoParaMembro {
    #[serde(flatten)]
    pub documento: Documento,
    pub acessado: bool,
}
