// src/models/enquete.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "tipo_enquete", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TipoEnquete {
    MultiplaEscolha,
    TextoLivre,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Enquete {
    pub id: Uuid,

    #[schema(example = "Destino do bate-volta de setembro")]
    pub titulo: String,

    pub descricao: Option<String>,

    pub tipo: TipoEnquete,

    pub ativa: bool,

    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EnqueteOpcao {
    pub id: Uuid,
    pub enquete_id: Uuid,

    #[schema(example = "Serra do Rio do Rastro")]
    pub texto: String,

    pub ordem: i32,
}

/// Um voto por membro por enquete: ou opcao_id ou resposta_texto, nunca os dois
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Voto {
    pub id: Uuid,
    pub enquete_id: Uuid,
    pub membro_id: Uuid,
    pub opcao_id: Option<Uuid>,
    pub resposta_texto: Option<String>,
    pub votado_em: Option<DateTime<Utc>>,
}

/// Opção com a apuração já feita
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OpcaoComResultado {
    #[serde(flatten)]
    pub opcao: EnqueteOpcao,

    pub votos: u64,

    /// votos da opção / total de votos da enquete; 0 quando não há votos
    #[schema(example = 33.3)]
    pub percentual: f64,
}

/// Resposta de texto livre, com a identidade de exibição de quem respondeu
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RespostaTexto {
    pub nome_de_guerra: String,
    pub texto: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EnqueteComResultados {
    #[serde(flatten)]
    pub enquete: Enquete,

    pub total_votos: u64,
    pub opcoes: Vec<OpcaoComResultado>,
    pub respostas: Vec<RespostaTexto>,

    /// Voto do membro que fez a requisição, se houver
    pub meu_voto: Option<Voto>,
}
