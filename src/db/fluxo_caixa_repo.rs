// src/db/fluxo_caixa_repo.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::fluxo_caixa::{LancamentoCaixa, TipoFluxo},
};

#[derive(Clone)]
pub struct FluxoCaixaRepository {
    pool: PgPool,
}

impl FluxoCaixaRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Lançamentos com data dentro de [inicio, fim)
    pub async fn listar_por_periodo(
        &self,
        inicio: NaiveDate,
        fim: NaiveDate,
    ) -> Result<Vec<LancamentoCaixa>, AppError> {
        let lancamentos = sqlx::query_as::<_, LancamentoCaixa>(
            r#"
            SELECT * FROM fluxo_caixa
            WHERE data >= $1 AND data < $2
            ORDER BY data DESC, created_at DESC
            "#,
        )
        .bind(inicio)
        .bind(fim)
        .fetch_all(&self.pool)
        .await?;

        Ok(lancamentos)
    }

    pub async fn criar(
        &self,
        tipo: TipoFluxo,
        categoria: &str,
        descricao: &str,
        valor: Decimal,
        data: NaiveDate,
        anexo_url: Option<&str>,
    ) -> Result<LancamentoCaixa, AppError> {
        let lancamento = sqlx::query_as::<_, LancamentoCaixa>(
            r#"
            INSERT INTO fluxo_caixa (tipo, categoria, descricao, valor, data, anexo_url)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(tipo)
        .bind(categoria)
        .bind(descricao)
        .bind(valor)
        .bind(data)
        .bind(anexo_url)
        .fetch_one(&self.pool)
        .await?;

        Ok(lancamento)
    }

    pub async fn atualizar(
        &self,
        id: Uuid,
        categoria: &str,
        descricao: &str,
        valor: Decimal,
        data: NaiveDate,
        anexo_url: Option<&str>,
    ) -> Result<LancamentoCaixa, AppError> {
        let lancamento = sqlx::query_as::<_, LancamentoCaixa>(
            r#"
            UPDATE fluxo_caixa
            SET categoria = $2, descricao = $3, valor = $4, data = $5, anexo_url = $6
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(categoria)
        .bind(descricao)
        .bind(valor)
        .bind(data)
        .bind(anexo_url)
        .fetch_optional(&self.pool)
        .await?;

        lancamento.ok_or(AppError::NaoEncontrado)
    }

    pub async fn excluir(&self, id: Uuid) -> Result<(), AppError> {
        let resultado = sqlx::query("DELETE FROM fluxo_caixa WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if resultado.rows_affected() == 0 {
            return Err(AppError::NaoEncontrado);
        }

        Ok(())
    }
}
