// src/models/membro.rs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// --- Enums (Mapeando o Postgres) ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "status_membro", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatusMembro {
    Brasionado, // Membro pleno, já recebeu o brasão
    Prospect,   // Em avaliação
}

// --- Structs ---

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Membro {
    pub id: Uuid,

    #[schema(example = "Carlos Eduardo Souza")]
    pub nome: String,

    /// Identidade de exibição dentro do clube
    #[schema(example = "Trovão")]
    pub nome_de_guerra: String,

    pub email: Option<String>,
    pub telefone: Option<String>,

    pub status: StatusMembro,

    /// Desligamento é sempre lógico, nunca apaga a linha
    pub ativo: bool,

    #[schema(value_type = Option<String>, format = Date, example = "2023-03-15")]
    pub data_entrada: Option<NaiveDate>,

    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Cargo {
    pub id: Uuid,

    #[schema(example = "Tesoureiro")]
    pub nome: String,

    pub descricao: Option<String>,
    pub ativo: bool,
}

/// Linha da associação membro <-> cargo (apenas associações ativas interessam
/// para a montagem do roster)
#[derive(Debug, Clone, FromRow)]
pub struct MembroCargoRow {
    pub membro_id: Uuid,
    pub cargo_id: Uuid,
    pub cargo_nome: String,
}

/// View do roster: membro + seus cargos ativos
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MembroComCargos {
    #[serde(flatten)]
    pub membro: Membro,
    pub cargos: Vec<CargoResumido>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CargoResumido {
    pub id: Uuid,
    pub nome: String,
}
