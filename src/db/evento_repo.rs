// src/db/evento_repo.rs

use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::evento::{ConfirmacaoPresenca, Evento},
};

#[derive(Clone)]
pub struct EventoRepository {
    pool: PgPool,
}

impl EventoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn listar(&self) -> Result<Vec<Evento>, AppError> {
        let eventos = sqlx::query_as::<_, Evento>(
            "SELECT * FROM eventos ORDER BY data_evento ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(eventos)
    }

    pub async fn criar(
        &self,
        titulo: &str,
        descricao: Option<&str>,
        local: Option<&str>,
        data_evento: NaiveDate,
    ) -> Result<Evento, AppError> {
        let evento = sqlx::query_as::<_, Evento>(
            r#"
            INSERT INTO eventos (titulo, descricao, local, data_evento)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(titulo)
        .bind(descricao)
        .bind(local)
        .bind(data_evento)
        .fetch_one(&self.pool)
        .await?;

        Ok(evento)
    }

    pub async fn atualizar(
        &self,
        id: Uuid,
        titulo: &str,
        descricao: Option<&str>,
        local: Option<&str>,
        data_evento: NaiveDate,
    ) -> Result<Evento, AppError> {
        let evento = sqlx::query_as::<_, Evento>(
            r#"
            UPDATE eventos
            SET titulo = $2, descricao = $3, local = $4, data_evento = $5
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(titulo)
        .bind(descricao)
        .bind(local)
        .bind(data_evento)
        .fetch_optional(&self.pool)
        .await?;

        evento.ok_or(AppError::NaoEncontrado)
    }

    pub async fn excluir(&self, id: Uuid) -> Result<(), AppError> {
        let resultado = sqlx::query("DELETE FROM eventos WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if resultado.rows_affected() == 0 {
            return Err(AppError::NaoEncontrado);
        }

        Ok(())
    }

    /// Confirmações de um lote de eventos, em uma query só
    pub async fn listar_confirmacoes(
        &self,
        evento_ids: &[Uuid],
    ) -> Result<Vec<ConfirmacaoPresenca>, AppError> {
        let confirmacoes = sqlx::query_as::<_, ConfirmacaoPresenca>(
            "SELECT * FROM confirmacoes_presenca WHERE evento_id = ANY($1)",
        )
        .bind(evento_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(confirmacoes)
    }

    /// Toggle de presença dentro de uma transação: a leitura do evento trava a
    /// linha (FOR UPDATE), os contadores são recalculados em memória (com piso
    /// em zero) e gravados de volta junto com a confirmação.
    pub async fn alternar_confirmacao(
        &self,
        evento_id: Uuid,
        membro_id: Uuid,
        acompanhantes: i32,
        convidados: i32,
    ) -> Result<(bool, Evento), AppError> {
        let mut tx = self.pool.begin().await?;

        let mut evento = sqlx::query_as::<_, Evento>(
            "SELECT * FROM eventos WHERE id = $1 FOR UPDATE",
        )
        .bind(evento_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(AppError::NaoEncontrado)?;

        let existente = sqlx::query_as::<_, ConfirmacaoPresenca>(
            "SELECT * FROM confirmacoes_presenca WHERE evento_id = $1 AND membro_id = $2",
        )
        .bind(evento_id)
        .bind(membro_id)
        .fetch_optional(&mut *tx)
        .await?;

        let confirmado = match existente {
            // Confirmed -> Unconfirmed: apaga a linha e devolve os contadores
            Some(confirmacao) => {
                sqlx::query("DELETE FROM confirmacoes_presenca WHERE id = $1")
                    .bind(confirmacao.id)
                    .execute(&mut *tx)
                    .await?;

                evento.remover_confirmacao(&confirmacao);
                false
            }
            // Unconfirmed -> Confirmed: cria a linha e soma os contadores
            None => {
                let confirmacao = sqlx::query_as::<_, ConfirmacaoPresenca>(
                    r#"
                    INSERT INTO confirmacoes_presenca
                        (evento_id, membro_id, acompanhantes, convidados)
                    VALUES ($1, $2, $3, $4)
                    RETURNING *
                    "#,
                )
                .bind(evento_id)
                .bind(membro_id)
                .bind(acompanhantes)
                .bind(convidados)
                .fetch_one(&mut *tx)
                .await?;

                evento.aplicar_confirmacao(&confirmacao);
                true
            }
        };

        let evento = sqlx::query_as::<_, Evento>(
            r#"
            UPDATE eventos
            SET confirmados = $2, acompanhantes = $3, convidados = $4
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(evento_id)
        .bind(evento.confirmados)
        .bind(evento.acompanhantes)
        .bind(evento.convidados)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok((confirmado, evento))
    }
}
