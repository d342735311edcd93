// src/db/membro_repo.rs

use chrono::NaiveDate;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::membro::{Membro, MembroCargoRow, StatusMembro},
};

/// Contagem de membros ativos por cargo, para expandir destinatários CARGO
#[derive(Debug, Clone, FromRow)]
pub struct ContagemCargoRow {
    pub cargo_id: Uuid,
    pub total: i64,
}

/// DTO enxuto para resolver identidade de exibição em lote
#[derive(Debug, Clone, FromRow)]
pub struct NomeGuerraRow {
    pub id: Uuid,
    pub nome_de_guerra: String,
}

#[derive(Clone)]
pub struct MembroRepository {
    pool: PgPool,
}

impl MembroRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn listar(&self) -> Result<Vec<Membro>, AppError> {
        let membros = sqlx::query_as::<_, Membro>(
            "SELECT * FROM membros ORDER BY nome_de_guerra ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(membros)
    }

    pub async fn buscar_por_id(&self, id: Uuid) -> Result<Option<Membro>, AppError> {
        let membro = sqlx::query_as::<_, Membro>("SELECT * FROM membros WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(membro)
    }

    /// Associações ativas de cargo para um lote de membros, em uma query só
    pub async fn listar_cargos_de_membros(
        &self,
        membro_ids: &[Uuid],
    ) -> Result<Vec<MembroCargoRow>, AppError> {
        let linhas = sqlx::query_as::<_, MembroCargoRow>(
            r#"
            SELECT mc.membro_id, mc.cargo_id, c.nome AS cargo_nome
            FROM membros_cargos mc
            JOIN cargos c ON c.id = mc.cargo_id
            WHERE mc.ativo AND c.ativo AND mc.membro_id = ANY($1)
            "#,
        )
        .bind(membro_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(linhas)
    }

    /// Cargos ativos de um único membro (para filtrar comunicados/documentos)
    pub async fn cargos_do_membro(&self, membro_id: Uuid) -> Result<Vec<Uuid>, AppError> {
        let ids = sqlx::query_scalar::<_, Uuid>(
            "SELECT cargo_id FROM membros_cargos WHERE membro_id = $1 AND ativo",
        )
        .bind(membro_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(ids)
    }

    pub async fn contar_ativos(&self) -> Result<i64, AppError> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM membros WHERE ativo")
            .fetch_one(&self.pool)
            .await?;

        Ok(total)
    }

    pub async fn contar_ativos_por_cargo(&self) -> Result<Vec<ContagemCargoRow>, AppError> {
        let contagens = sqlx::query_as::<_, ContagemCargoRow>(
            r#"
            SELECT mc.cargo_id, COUNT(*) AS total
            FROM membros_cargos mc
            JOIN membros m ON m.id = mc.membro_id
            WHERE mc.ativo AND m.ativo
            GROUP BY mc.cargo_id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(contagens)
    }

    /// Resolve nome de guerra para um conjunto de ids, em lote
    pub async fn nomes_de_guerra(&self, ids: &[Uuid]) -> Result<Vec<NomeGuerraRow>, AppError> {
        let nomes = sqlx::query_as::<_, NomeGuerraRow>(
            "SELECT id, nome_de_guerra FROM membros WHERE id = ANY($1)",
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(nomes)
    }

    pub async fn criar(
        &self,
        nome: &str,
        nome_de_guerra: &str,
        email: Option<&str>,
        telefone: Option<&str>,
        status: StatusMembro,
        data_entrada: Option<NaiveDate>,
    ) -> Result<Membro, AppError> {
        let membro = sqlx::query_as::<_, Membro>(
            r#"
            INSERT INTO membros (nome, nome_de_guerra, email, telefone, status, data_entrada)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(nome)
        .bind(nome_de_guerra)
        .bind(email)
        .bind(telefone)
        .bind(status)
        .bind(data_entrada)
        .fetch_one(&self.pool)
        .await?;

        Ok(membro)
    }

    pub async fn atualizar(
        &self,
        id: Uuid,
        nome: &str,
        nome_de_guerra: &str,
        email: Option<&str>,
        telefone: Option<&str>,
        status: StatusMembro,
    ) -> Result<Membro, AppError> {
        let membro = sqlx::query_as::<_, Membro>(
            r#"
            UPDATE membros
            SET nome = $2, nome_de_guerra = $3, email = $4, telefone = $5,
                status = $6, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(nome)
        .bind(nome_de_guerra)
        .bind(email)
        .bind(telefone)
        .bind(status)
        .fetch_optional(&self.pool)
        .await?;

        membro.ok_or(AppError::MembroNaoEncontrado)
    }

    /// Desligamento é sempre lógico; a linha nunca é apagada
    pub async fn desativar(&self, id: Uuid) -> Result<Membro, AppError> {
        let membro = sqlx::query_as::<_, Membro>(
            r#"
            UPDATE membros
            SET ativo = FALSE, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        membro.ok_or(AppError::MembroNaoEncontrado)
    }
}
