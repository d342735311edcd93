// src/db/documento_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::{AppError, eh_violacao_unicidade},
    models::{
        comunicado::AlvoDestinatario,
        documento::{AcessoRow, Documento},
    },
};

#[derive(Clone)]
pub struct DocumentoRepository {
    pool: PgPool,
}

impl DocumentoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn listar(&self) -> Result<Vec<Documento>, AppError> {
        let documentos = sqlx::query_as::<_, Documento>(
            "SELECT * FROM documentos ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(documentos)
    }

    pub async fn listar_para_membro(
        &self,
        membro_id: Uuid,
        cargo_ids: &[Uuid],
    ) -> Result<Vec<Documento>, AppError> {
        let documentos = sqlx::query_as::<_, Documento>(
            r#"
            SELECT * FROM documentos
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

        Ok(documentos)
    }

    pub async fn listar_acessos(
        &self,
        documento_ids: &[Uuid],
    ) -> Result<Vec<AcessoRow>, AppError> {
        let acessos = sqlx::query_as::<_, AcessoRow>(
            r#"
            SELECT documento_id, membro_id
            FROM documentos_acesso
            WHERE documento_id = ANY($1)
            "#,
        )
        .bind(documento_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(acessos)
    }

    pub async fn acessos_do_membro(
        &self,
        documento_ids: &[Uuid],
        membro_id: Uuid,
    ) -> Result<Vec<Uuid>, AppError> {
        let acessados = sqlx::query_scalar::<_, Uuid>(
            r#"
            SELECT documento_id
            FROM documentos_acesso
            WHERE documento_id = ANY($1) AND membro_id = $2
            "#,
        )
        .bind(documento_ids)
        .bind(membro_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(acessados)
    }

    /// Mesma semântica idempotente do registrar_leitura de comunicados
    pub async fn registrar_acesso(
        &self,
        documento_id: Uuid,
        membro_id: Uuid,
    ) -> Result<bool, AppError> {
        let resultado = sqlx::query(
            "INSERT INTO documentos_acesso (documento_id, membro_id) VALUES ($1, $2)",
        )
        .bind(documento_id)
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
        descricao: Option<&str>,
        arquivo_url: &str,
        destinatario_tipo: AlvoDestinatario,
        cargo_id: Option<Uuid>,
        membro_id: Option<Uuid>,
    ) -> Result<Documento, AppError> {
        let documento = sqlx::query_as::<_, Documento>(
            r#"
            INSERT INTO documentos
                (titulo, descricao, arquivo_url, destinatario_tipo, cargo_id, membro_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(titulo)
        .bind(descricao)
        .bind(arquivo_url)
        .bind(destinatario_tipo)
        .bind(cargo_id)
        .bind(membro_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(documento)
    }

    pub async fn excluir(&self, id: Uuid) -> Result<(), AppError> {
        let resultado = sqlx::query("DELETE FROM documentos WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if resultado.rows_affected() == 0 {
            return Err(AppError::NaoEncontrado);
        }

        Ok(())
    }
}
