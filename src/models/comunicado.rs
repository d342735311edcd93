// src/models/comunicado.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Modo de endereçamento de comunicados e documentos
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "alvo_destinatario", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlvoDestinatario {
    Geral,  // Todos os membros ativos
    Cargo,  // Apenas quem ocupa o cargo
    Membro, // Um único destinatário
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Comunicado {
    pub id: Uuid,

    #[schema(example = "Assembleia geral de agosto")]
    pub titulo: String,

    pub conteudo: String,

    pub destinatario_tipo: AlvoDestinatario,
    pub cargo_id: Option<Uuid>,
    pub membro_id: Option<Uuid>,

    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, FromRow)]
pub struct LeituraRow {
    pub comunicado_id: Uuid,
    pub membro_id: Uuid,
}

/// Visão administrativa: comunicado + estatística de leitura
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ComunicadoComEstatisticas {
    #[serde(flatten)]
    pub comunicado: Comunicado,

    pub total_leituras: u64,

    /// Destinatários reais, expandindo o alvo contra o roster ativo
    pub total_destinatarios: u64,

    #[schema(example = 62.5)]
    pub percentual_leitura: f64,
}

/// Visão do membro: comunicado + flag de já lido
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ComunicadoParaMembro {
    #[serde(flatten)]
    pub comunicado: Comunicado,
    pub lido: bool,
}
