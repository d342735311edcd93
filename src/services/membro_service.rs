// src/services/membro_service.rs

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::{
    common::{cache::CacheComTtl, error::AppError},
    db::MembroRepository,
    models::membro::{CargoResumido, Membro, MembroCargoRow, MembroComCargos, StatusMembro},
};

/// O roster muda pouco e é lido em toda página: 5 minutos de cache seguram a
/// maior parte das releituras sem nunca ser fonte de verdade.
pub const TTL_ROSTER: Duration = Duration::from_secs(300);

/// Junta membros e associações de cargo (já buscadas em lote) em uma passada
pub fn montar_roster(
    membros: Vec<Membro>,
    associacoes: Vec<MembroCargoRow>,
) -> Vec<MembroComCargos> {
    let mut cargos_por_membro: HashMap<Uuid, Vec<CargoResumido>> = HashMap::new();
    for assoc in associacoes {
        cargos_por_membro
            .entry(assoc.membro_id)
            .or_default()
            .push(CargoResumido {
                id: assoc.cargo_id,
                nome: assoc.cargo_nome,
            });
    }

    membros
        .into_iter()
        .map(|membro| {
            let cargos = cargos_por_membro.remove(&membro.id).unwrap_or_default();
            MembroComCargos { membro, cargos }
        })
        .collect()
}

#[derive(Clone)]
pub struct MembroService {
    repo: MembroRepository,
    cache_roster: Arc<CacheComTtl<Vec<MembroComCargos>>>,
}

impl MembroService {
    pub fn new(repo: MembroRepository, cache_roster: Arc<CacheComTtl<Vec<MembroComCargos>>>) -> Self {
        Self { repo, cache_roster }
    }

    /// Roster completo: membros + cargos ativos. Duas queries em lote (nunca
    /// uma por membro), com cache de 5 minutos na frente.
    pub async fn listar(&self) -> Result<Vec<MembroComCargos>, AppError> {
        if let Some(roster) = self.cache_roster.obter().await {
            return Ok(roster);
        }

        let membros = self.repo.listar().await?;
        let ids: Vec<Uuid> = membros.iter().map(|m| m.id).collect();
        let associacoes = self.repo.listar_cargos_de_membros(&ids).await?;

        let roster = montar_roster(membros, associacoes);
        self.cache_roster.guardar(roster.clone()).await;

        Ok(roster)
    }

    pub async fn buscar_por_id(&self, id: Uuid) -> Result<Membro, AppError> {
        self.repo
            .buscar_por_id(id)
            .await?
            .ok_or(AppError::MembroNaoEncontrado)
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
        let membro = self
            .repo
            .criar(nome, nome_de_guerra, email, telefone, status, data_entrada)
            .await?;

        self.cache_roster.invalidar().await;
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
        let membro = self
            .repo
            .atualizar(id, nome, nome_de_guerra, email, telefone, status)
            .await?;

        self.cache_roster.invalidar().await;
        Ok(membro)
    }

    pub async fn desativar(&self, id: Uuid) -> Result<Membro, AppError> {
        let membro = self.repo.desativar(id).await?;
        self.cache_roster.invalidar().await;
        Ok(membro)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn membro(nome_de_guerra: &str) -> Membro {
        Membro {
            id: Uuid::new_v4(),
            nome: format!("Nome de {}", nome_de_guerra),
            nome_de_guerra: nome_de_guerra.to_string(),
            email: None,
            telefone: None,
            status: StatusMembro::Brasionado,
            ativo: true,
            data_entrada: None,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn roster_junta_cargos_no_membro_certo() {
        let tesoureiro = membro("Trovão");
        let sem_cargo = membro("Faísca");
        let associacoes = vec![MembroCargoRow {
            membro_id: tesoureiro.id,
            cargo_id: Uuid::new_v4(),
            cargo_nome: "Tesoureiro".to_string(),
        }];

        let roster = montar_roster(vec![tesoureiro.clone(), sem_cargo.clone()], associacoes);

        assert_eq!(roster.len(), 2);
        let com_cargo = roster.iter().find(|r| r.membro.id == tesoureiro.id).unwrap();
        assert_eq!(com_cargo.cargos.len(), 1);
        assert_eq!(com_cargo.cargos[0].nome, "Tesoureiro");

        let vazio = roster.iter().find(|r| r.membro.id == sem_cargo.id).unwrap();
        assert!(vazio.cargos.is_empty());
    }

    #[test]
    fn membro_com_varios_cargos_recebe_todos() {
        let diretor = membro("Comandante");
        let diretor_id = diretor.id;
        let cargo = |nome: &str| MembroCargoRow {
            membro_id: diretor_id,
            cargo_id: Uuid::new_v4(),
            cargo_nome: nome.to_string(),
        };

        let roster = montar_roster(
            vec![diretor],
            vec![cargo("Presidente"), cargo("Diretor de Eventos")],
        );

        assert_eq!(roster[0].cargos.len(), 2);
    }
}
