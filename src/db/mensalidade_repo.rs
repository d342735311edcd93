// src/db/mensalidade_repo.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::mensalidade::{Mensalidade, MensalidadeComMembroRow},
};

#[derive(Clone)]
pub struct MensalidadeRepository {
    pool: PgPool,
}

impl MensalidadeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Mensalidades do período já com o nome de guerra do membro (um JOIN,
    /// nunca uma query por linha)
    pub async fn listar_por_mes(
        &self,
        mes_referencia: NaiveDate,
    ) -> Result<Vec<MensalidadeComMembroRow>, AppError> {
        let linhas = sqlx::query_as::<_, MensalidadeComMembroRow>(
            r#"
            SELECT m.id, m.membro_id, m.mes_referencia, m.valor,
                   m.data_vencimento, m.data_pagamento, m.status,
                   m.observacao, m.created_at,
                   mb.nome_de_guerra
            FROM mensalidades m
            JOIN membros mb ON mb.id = m.membro_id
            WHERE m.mes_referencia = $1
            ORDER BY mb.nome_de_guerra ASC
            "#,
        )
        .bind(mes_referencia)
        .fetch_all(&self.pool)
        .await?;

        Ok(linhas)
    }

    /// Geração em lote: uma mensalidade por membro ativo que ainda não tem
    /// uma para o período. Retorna quantas linhas foram criadas.
    pub async fn gerar_para_periodo(
        &self,
        mes_referencia: NaiveDate,
        valor: Decimal,
        data_vencimento: NaiveDate,
    ) -> Result<u64, AppError> {
        let resultado = sqlx::query(
            r#"
            INSERT INTO mensalidades (membro_id, mes_referencia, valor, data_vencimento)
            SELECT id, $1, $2, $3 FROM membros WHERE ativo
            ON CONFLICT (membro_id, mes_referencia) DO NOTHING
            "#,
        )
        .bind(mes_referencia)
        .bind(valor)
        .bind(data_vencimento)
        .execute(&self.pool)
        .await?;

        Ok(resultado.rows_affected())
    }

    pub async fn marcar_paga(
        &self,
        id: Uuid,
        data_pagamento: NaiveDate,
    ) -> Result<Mensalidade, AppError> {
        let mensalidade = sqlx::query_as::<_, Mensalidade>(
            r#"
            UPDATE mensalidades
            SET status = 'pago', data_pagamento = $2
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(data_pagamento)
        .fetch_optional(&self.pool)
        .await?;

        mensalidade.ok_or(AppError::NaoEncontrado)
    }

    pub async fn atualizar(
        &self,
        id: Uuid,
        valor: Decimal,
        data_vencimento: NaiveDate,
        status: &str,
        observacao: Option<&str>,
    ) -> Result<Mensalidade, AppError> {
        let mensalidade = sqlx::query_as::<_, Mensalidade>(
            r#"
            UPDATE mensalidades
            SET valor = $2, data_vencimento = $3, status = $4, observacao = $5
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(valor)
        .bind(data_vencimento)
        .bind(status)
        .bind(observacao)
        .fetch_optional(&self.pool)
        .await?;

        mensalidade.ok_or(AppError::NaoEncontrado)
    }
}
