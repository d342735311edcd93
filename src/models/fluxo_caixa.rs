// src/models/fluxo_caixa.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "tipo_fluxo", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TipoFluxo {
    Entrada,
    Saida,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LancamentoCaixa {
    pub id: Uuid,

    pub tipo: TipoFluxo,

    #[schema(example = "Mensalidades")]
    pub categoria: String,

    #[schema(example = "Recebimento mensalidades agosto")]
    pub descricao: String,

    #[schema(example = "450.00")]
    pub valor: Decimal,

    #[schema(value_type = String, format = Date, example = "2026-08-05")]
    pub data: NaiveDate,

    /// Saída sem anexo fica marcada como "comprovante pendente"
    pub anexo_url: Option<String>,

    pub created_at: Option<DateTime<Utc>>,
}

impl LancamentoCaixa {
    /// Saída sem comprovante anexado
    pub fn comprovante_pendente(&self) -> bool {
        self.tipo == TipoFluxo::Saida && self.anexo_url.is_none()
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResumoFluxoCaixa {
    pub total_entradas: Decimal,
    pub total_saidas: Decimal,

    /// saldo = Σ entradas − Σ saídas
    pub saldo: Decimal,

    pub qtd_lancamentos: u64,
    pub saidas_sem_comprovante: u64,
}
