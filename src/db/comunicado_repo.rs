// src/db/comunicado_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::{AppError, eh_violacao_unicidade},
    models::comunicado::{AlvoDestinatario, Comunicado, LeituraRow},
};

#[derive(Clone)]
pub struct ComunicadoRepository {
    pool: PgPool,
}

impl ComunicadoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn listar(&self) -> Result<Vec<Comunicado>, AppError> {
        let comunicados = sqlx::query_as::<_, Comunicado>(
            "SELECT * FROM comunicados ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(comunicados)
    }

    /// Comunicados endereçados ao membro: GERAL, um dos cargos dele, ou ele
    /// mesmo como destinatário direto
    pub async fn listar_para_membro(
        &self,
        membro_id: Uuid,
        cargo_ids: &[Uuid],
    ) -> Result<Vec<Comunicado>, AppError> {
        let comunicados = sqlx::query_as::<_, Comunicado>(
            r#"
            SELECT * FROM comunicados
            WHERE destinatario_tipo = 'GERAL'
               OR (destinatario_tipo = 'CARGO' AND cargo_id = ANY($1))
               OR (destinatario_tipo = 'MEMBRO' AND membro_id = $2)
            ORDER BY created_at DESC
            "#,
        )
        .bind(cargo_ids)
        .bind(membro_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(comunicados)
    }

    /// Todas as leituras de um lote de comunicados, em uma query só
    pub async fn listar_leituras(
        &self,
        comunicado_ids: &[Uuid],
    ) -> Result<Vec<LeituraRow>, AppError> {
        let leituras = sqlx::query_as::<_, LeituraRow>(
            r#"
            SELECT comunicado_id, membro_id
            FROM comunicados_leitura
            WHERE comunicado_id = ANY($1)
            "#,
        )
        .bind(comunicado_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(leituras)
    }

    /// Ids dos comunicados do lote que o membro já leu
    pub async fn leituras_do_membro(
        &self,
        comunicado_ids: &[Uuid],
        membro_id: Uuid,
    ) -> Result<Vec<Uuid>, AppError> {
        let lidos = sqlx::query_scalar::<_, Uuid>(
            r#"
            SELECT comunicado_id
            FROM comunicados_leitura
            WHERE comunicado_id = ANY($1) AND membro_id = $2
            "#,
        )
        .bind(comunicado_ids)
        .bind(membro_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(lidos)
    }

    /// Inserção idempotente: violação de chave única significa que o membro
    /// já tinha lido, e isso é sucesso-no-op (retorna false), nunca erro.
    pub async fn registrar_leitura(
        &self,
        comunicado_id: Uuid,
        membro_id: Uuid,
    ) -> Result<bool, AppError> {
        let resultado = sqlx::query(
            "INSERT INTO comunicados_leitura (comunicado_id, membro_id) VALUES ($1, $2)",
        )
        .bind(comunicado_id)
        .bind(membro_id)
        .execute(&self.pool)
        .await;

        match resultado {
            Ok(_) => Ok(true),
            Err(e) if eh_violacao_unicidade(&e) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn criar(
        &self,
        titulo: &str,
        conteudo: &str,
        destinatario_tipo: AlvoDestinatario,
        cargo_id: Option<Uuid>,
        membro_id: Option<Uuid>,
    ) -> Result<Comunicado, AppError> {
        let comunicado = sqlx::query_as::<_, Comunicado>(
            r#"
            INSERT INTO comunicados (titulo, conteudo, destinatario_tipo, cargo_id, membro_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(titulo)
        .bind(conteudo)
        .bind(destinatario_tipo)
        .bind(cargo_id)
        .bind(membro_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(comunicado)
    }

    pub async fn excluir(&self, id: Uuid) -> Result<(), AppError> {
        let resultado = sqlx::query("DELETE FROM comunicados WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if resultado.rows_affected() == 0 {
            return Err(AppError::NaoEncontrado);
        }

        Ok(())
    }
}
