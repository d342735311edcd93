// src/services/documento_service.rs

use std::collections::{HashMap, HashSet};

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{DocumentoRepository, MembroRepository},
    models::{
        comunicado::AlvoDestinatario,
        documento::{AcessoRow, Documento, DocumentoComEstatisticas, DocumentoParaMembro},
    },
    services::{comunicado_service::contar_destinatarios, metricas::percentual},
};

/// Mesma dobra dos comunicados, sobre os acessos de documentos
pub fn montar_estatisticas(
    documentos: Vec<Documento>,
    acessos: &[AcessoRow],
    total_ativos: u64,
    ativos_por_cargo: &HashMap<Uuid, u64>,
) -> Vec<DocumentoComEstatisticas> {
    let mut acessos_por_documento: HashMap<Uuid, u64> = HashMap::new();
    for acesso in acessos {
        *acessos_por_documento
            .entry(acesso.documento_id)
            .or_default() += 1;
    }

    documentos
        .into_iter()
        .map(|documento| {
            let total_acessos = acessos_por_documento
                .get(&documento.id)
                .copied()
                .unwrap_or(0);
            let total_destinatarios = contar_destinatarios(
                documento.destinatario_tipo,
                documento.cargo_id,
                total_ativos,
                ativos_por_cargo,
            );

            DocumentoComEstatisticas {
                documento,
                total_acessos,
                total_destinatarios,
                percentual_acesso: percentual(total_acessos, total_destinatarios),
            }
        })
        .collect()
}

#[derive(Clone)]
pub struct DocumentoService {
    repo: DocumentoRepository,
    membro_repo: MembroRepository,
}

impl DocumentoService {
    pub fn new(repo: DocumentoRepository, membro_repo: MembroRepository) -> Self {
        Self { repo, membro_repo }
    }

    pub async fn listar_com_estatisticas(
        &self,
    ) -> Result<Vec<DocumentoComEstatisticas>, AppError> {
        let documentos = self.repo.listar().await?;
        if documentos.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<Uuid> = documentos.iter().map(|d| d.id).collect();

        let (acessos, total_ativos, contagens_cargo) = tokio::try_join!(
            self.repo.listar_acessos(&ids),
            self.membro_repo.contar_ativos(),
            self.membro_repo.contar_ativos_por_cargo(),
        )?;

        let ativos_por_cargo: HashMap<Uuid, u64> = contagens_cargo
            .into_iter()
            .map(|linha| (linha.cargo_id, linha.total.max(0) as u64))
            .collect();

        Ok(montar_estatisticas(
            documentos,
            &acessos,
            total_ativos.max(0) as u64,
            &ativos_por_cargo,
        ))
    }

    pub async fn listar_para_membro(
        &self,
        membro_id: Uuid,
    ) -> Result<Vec<DocumentoParaMembro>, AppError> {
        let cargos = self.membro_repo.cargos_do_membro(membro_id).await?;
        let documentos = self.repo.listar_para_membro(membro_id, &cargos).await?;
        if documentos.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<Uuid> = documentos.iter().map(|d| d.id).collect();
        let acessados: HashSet<Uuid> = self
            .repo
            .acessos_do_membro(&ids, membro_id)
            .await?
            .into_iter()
            .collect();

        Ok(documentos
            .into_iter()
            .map(|documento| {
                let acessado = acessados.contains(&documento.id);
                DocumentoParaMembro { documento, acessado }
            })
            .collect())
    }

    /// Registrar acesso é idempotente, igual ao marcar-como-lido
    pub async fn registrar_acesso(
        &self,
        documento_id: Uuid,
        membro_id: Uuid,
    ) -> Result<(), AppError> {
        self.repo.registrar_acesso(documento_id, membro_id).await?;
        Ok(())
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
        crate::services::comunicado_service::validar_alvo(destinatario_tipo, cargo_id, membro_id)?;
        self.repo
            .criar(
                titulo,
                descricao,
                arquivo_url,
                destinatario_tipo,
                cargo_id,
                membro_id,
            )
            .await
    }

    pub async fn excluir(&self, id: Uuid) -> Result<(), AppError> {
        self.repo.excluir(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn documento() -> Documento {
        Documento {
            id: Uuid::new_v4(),
            titulo: "Estatuto".to_string(),
            descricao: None,
            arquivo_url: "https://arquivos/estatuto.pdf".to_string(),
            destinatario_tipo: AlvoDestinatario::Geral,
            cargo_id: None,
            membro_id: None,
            created_at: None,
        }
    }

    #[test]
    fn conta_acessos_do_documento_certo() {
        let doc_a = documento();
        let doc_b = documento();
        let acessos = vec![
            AcessoRow { documento_id: doc_a.id, membro_id: Uuid::new_v4() },
            AcessoRow { documento_id: doc_a.id, membro_id: Uuid::new_v4() },
        ];

        let views = montar_estatisticas(
            vec![doc_a.clone(), doc_b.clone()],
            &acessos,
            4,
            &HashMap::new(),
        );

        let view_a = views.iter().find(|v| v.documento.id == doc_a.id).unwrap();
        assert_eq!(view_a.total_acessos, 2);
        assert_eq!(view_a.percentual_acesso, 50.0);

        let view_b = views.iter().find(|v| v.documento.id == doc_b.id).unwrap();
        assert_eq!(view_b.total_acessos, 0);
        assert_eq!(view_b.percentual_acesso, 0.0);
    }
}
