// src/models/mensalidade.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Status derivado de uma mensalidade. O texto gravado na tabela é apenas
/// informativo; este enum é sempre recalculado na leitura a partir das datas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum StatusMensalidade {
    Pago,
    Isento,
    Atrasado,
    Pendente,
    Aberto,
    Cancelado,
}

impl StatusMensalidade {
    /// Rótulo de exibição (listagens, CSV, relatórios)
    pub fn rotulo(&self) -> &'static str {
        match self {
            StatusMensalidade::Pago => "Pago",
            StatusMensalidade::Isento => "Isento",
            StatusMensalidade::Atrasado => "Atrasado",
            StatusMensalidade::Pendente => "Pendente",
            StatusMensalidade::Aberto => "Aberto",
            StatusMensalidade::Cancelado => "Cancelado",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Mensalidade {
    pub id: Uuid,

    pub membro_id: Uuid,

    /// Sempre o primeiro dia do mês de competência (YYYY-MM-01)
    #[schema(value_type = String, format = Date, example = "2026-08-01")]
    pub mes_referencia: NaiveDate,

    #[schema(example = "150.00")]
    pub valor: Decimal,

    #[schema(value_type = String, format = Date, example = "2026-08-10")]
    pub data_vencimento: NaiveDate,

    #[schema(value_type = Option<String>, format = Date)]
    pub data_pagamento: Option<NaiveDate>,

    /// Texto bruto gravado no banco. Não confiar: usar o status derivado.
    pub status: String,

    pub observacao: Option<String>,

    pub created_at: Option<DateTime<Utc>>,
}

/// Linha de listagem: mensalidade + nome de guerra do membro, já com o
/// status derivado e os dias de atraso calculados.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MensalidadeView {
    #[serde(flatten)]
    pub mensalidade: Mensalidade,

    #[schema(example = "Trovão")]
    pub nome_de_guerra: String,

    pub status_derivado: StatusMensalidade,

    #[schema(example = 3)]
    pub dias_atraso: u32,
}

/// Linha crua do JOIN mensalidades x membros
#[derive(Debug, Clone, FromRow)]
pub struct MensalidadeComMembroRow {
    pub id: Uuid,
    pub membro_id: Uuid,
    pub mes_referencia: NaiveDate,
    pub valor: Decimal,
    pub data_vencimento: NaiveDate,
    pub data_pagamento: Option<NaiveDate>,
    pub status: String,
    pub observacao: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub nome_de_guerra: String,
}

/// Totais do período, por balde de status derivado
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResumoMensalidades {
    pub total_pago: Decimal,
    pub total_pendente: Decimal,
    pub total_atrasado: Decimal,
    pub total_isento: Decimal,

    pub qtd_pagas: u64,
    pub qtd_atrasadas: u64,
    pub qtd_total: u64,

    /// pagas / total, em percentual com uma casa decimal
    #[schema(example = 87.5)]
    pub taxa_conversao: f64,
}
