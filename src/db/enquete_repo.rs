// src/db/enquete_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::{AppError, eh_violacao_unicidade},
    models::enquete::{Enquete, EnqueteOpcao, TipoEnquete, Voto},
};

#[derive(Clone)]
pub struct EnqueteRepository {
    pool: PgPool,
}

impl EnqueteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn listar(&self) -> Result<Vec<Enquete>, AppError> {
        let enquetes = sqlx::query_as::<_, Enquete>(
            "SELECT * FROM enquetes ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(enquetes)
    }

    pub async fn buscar_por_id(&self, id: Uuid) -> Result<Option<Enquete>, AppError> {
        let enquete = sqlx::query_as::<_, Enquete>("SELECT * FROM enquetes WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(enquete)
    }

    /// Enquete + opções nascem juntas, na mesma transação
    pub async fn criar(
        &self,
        titulo: &str,
        descricao: Option<&str>,
        tipo: TipoEnquete,
        opcoes: &[String],
    ) -> Result<Enquete, AppError> {
        let mut tx = self.pool.begin().await?;

        let enquete = sqlx::query_as::<_, Enquete>(
            r#"
            INSERT INTO enquetes (titulo, descricao, tipo)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(titulo)
        .bind(descricao)
        .bind(tipo)
        .fetch_one(&mut *tx)
        .await?;

        for (ordem, texto) in opcoes.iter().enumerate() {
            sqlx::query(
                "INSERT INTO enquete_opcoes (enquete_id, texto, ordem) VALUES ($1, $2, $3)",
            )
            .bind(enquete.id)
            .bind(texto)
            .bind(ordem as i32)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(enquete)
    }

    pub async fn encerrar(&self, id: Uuid) -> Result<Enquete, AppError> {
        let enquete = sqlx::query_as::<_, Enquete>(
            "UPDATE enquetes SET ativa = FALSE WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        enquete.ok_or(AppError::NaoEncontrado)
    }

    pub async fn excluir(&self, id: Uuid) -> Result<(), AppError> {
        let resultado = sqlx::query("DELETE FROM enquetes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if resultado.rows_affected() == 0 {
            return Err(AppError::NaoEncontrado);
        }

        Ok(())
    }

    /// Opções de um lote de enquetes, em uma query só
    pub async fn listar_opcoes(
        &self,
        enquete_ids: &[Uuid],
    ) -> Result<Vec<EnqueteOpcao>, AppError> {
        let opcoes = sqlx::query_as::<_, EnqueteOpcao>(
            r#"
            SELECT * FROM enquete_opcoes
            WHERE enquete_id = ANY($1)
            ORDER BY ordem ASC
            "#,
        )
        .bind(enquete_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(opcoes)
    }

    /// Votos de um lote de enquetes, em uma query só
    pub async fn listar_votos(&self, enquete_ids: &[Uuid]) -> Result<Vec<Voto>, AppError> {
        let votos = sqlx::query_as::<_, Voto>(
            "SELECT * FROM enquete_votos WHERE enquete_id = ANY($1)",
        )
        .bind(enquete_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(votos)
    }

    pub async fn opcao_pertence_a_enquete(
        &self,
        enquete_id: Uuid,
        opcao_id: Uuid,
    ) -> Result<bool, AppError> {
        let existe = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM enquete_opcoes WHERE id = $1 AND enquete_id = $2)",
        )
        .bind(opcao_id)
        .bind(enquete_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(existe)
    }

    /// Um voto por membro por enquete: a chave única faz a garantia final e a
    /// violação vira um erro de negócio, não um 500.
    pub async fn registrar_voto(
        &self,
        enquete_id: Uuid,
        membro_id: Uuid,
        opcao_id: Option<Uuid>,
        resposta_texto: Option<&str>,
    ) -> Result<Voto, AppError> {
        let resultado = sqlx::query_as::<_, Voto>(
            r#"
            INSERT INTO enquete_votos (enquete_id, membro_id, opcao_id, resposta_texto)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(enquete_id)
        .bind(membro_id)
        .bind(opcao_id)
        .bind(resposta_texto)
        .fetch_one(&self.pool)
        .await;

        match resultado {
            Ok(voto) => Ok(voto),
            Err(e) if eh_violacao_unicidade(&e) => {
                Err(AppError::VotoInvalido("este membro já votou nesta enquete"))
            }
            Err(e) => Err(e.into()),
        }
    }
}
