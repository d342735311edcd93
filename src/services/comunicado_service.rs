// src/services/comunicado_service.rs

use std::collections::{HashMap, HashSet};

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{ComunicadoRepository, MembroRepository},
    models::comunicado::{
        AlvoDestinatario, Comunicado, ComunicadoComEstatisticas, ComunicadoParaMembro,
        LeituraRow,
    },
    services::metricas::percentual,
};

// =========================================================================
//  AGREGAÇÃO EM LOTE
// =========================================================================
// O protocolo é sempre o mesmo: busca a lista pai, coleta os ids, busca os
// filhos do lote inteiro em uma query (nunca uma por pai), dobra em um mapa
// por id do pai e fecha o zip. Qualquer query que falhe aborta a leitura
// inteira: agregado parcial não sai daqui.

/// Destinatários reais de um comunicado, expandindo o alvo contra o roster
/// ativo: GERAL alcança todos, CARGO alcança quem ocupa o cargo, MEMBRO é um.
pub fn contar_destinatarios(
    destinatario_tipo: AlvoDestinatario,
    cargo_id: Option<Uuid>,
    total_ativos: u64,
    ativos_por_cargo: &HashMap<Uuid, u64>,
) -> u64 {
    match destinatario_tipo {
        AlvoDestinatario::Geral => total_ativos,
        AlvoDestinatario::Cargo => cargo_id
            .and_then(|id| ativos_por_cargo.get(&id))
            .copied()
            .unwrap_or(0),
        AlvoDestinatario::Membro => 1,
    }
}

/// CARGO exige cargo_id e MEMBRO exige membro_id; GERAL não carrega nenhum
pub fn validar_alvo(
    destinatario_tipo: AlvoDestinatario,
    cargo_id: Option<Uuid>,
    membro_id: Option<Uuid>,
) -> Result<(), AppError> {
    match destinatario_tipo {
        AlvoDestinatario::Cargo if cargo_id.is_none() => {
            Err(AppError::RequisicaoInvalida("alvo CARGO exige cargo_id"))
        }
        AlvoDestinatario::Membro if membro_id.is_none() => {
            Err(AppError::RequisicaoInvalida("alvo MEMBRO exige membro_id"))
        }
        _ => Ok(()),
    }
}

/// Dobra as leituras (já buscadas em lote) sobre os comunicados
pub fn montar_estatisticas(
    comunicados: Vec<Comunicado>,
    leituras: &[LeituraRow],
    total_ativos: u64,
    ativos_por_cargo: &HashMap<Uuid, u64>,
) -> Vec<ComunicadoComEstatisticas> {
    let mut leituras_por_comunicado: HashMap<Uuid, u64> = HashMap::new();
    for leitura in leituras {
        *leituras_por_comunicado
            .entry(leitura.comunicado_id)
            .or_default() += 1;
    }

    comunicados
        .into_iter()
        .map(|comunicado| {
            let total_leituras = leituras_por_comunicado
                .get(&comunicado.id)
                .copied()
                .unwrap_or(0);
            let total_destinatarios = contar_destinatarios(
                comunicado.destinatario_tipo,
                comunicado.cargo_id,
                total_ativos,
                ativos_por_cargo,
            );

            ComunicadoComEstatisticas {
                comunicado,
                total_leituras,
                total_destinatarios,
                percentual_leitura: percentual(total_leituras, total_destinatarios),
            }
        })
        .collect()
}

#[derive(Clone)]
pub struct ComunicadoService {
    repo: ComunicadoRepository,
    membro_repo: MembroRepository,
}

impl ComunicadoService {
    pub fn new(repo: ComunicadoRepository, membro_repo: MembroRepository) -> Self {
        Self { repo, membro_repo }
    }

    /// Visão administrativa: todos os comunicados com estatística de leitura.
    /// Três queries em lote, independente de quantos comunicados existam.
    pub async fn listar_com_estatisticas(
        &self,
    ) -> Result<Vec<ComunicadoComEstatisticas>, AppError> {
        let comunicados = self.repo.listar().await?;
        if comunicados.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<Uuid> = comunicados.iter().map(|c| c.id).collect();

        // fan-out / fan-in: as queries de filhos saem juntas e a dobra só
        // roda depois de todas voltarem
        let (leituras, total_ativos, contagens_cargo) = tokio::try_join!(
            self.repo.listar_leituras(&ids),
            self.membro_repo.contar_ativos(),
            self.membro_repo.contar_ativos_por_cargo(),
        )?;

        let ativos_por_cargo: HashMap<Uuid, u64> = contagens_cargo
            .into_iter()
            .map(|linha| (linha.cargo_id, linha.total.max(0) as u64))
            .collect();

        Ok(montar_estatisticas(
            comunicados,
            &leituras,
            total_ativos.max(0) as u64,
            &ativos_por_cargo,
        ))
    }

    /// Visão do membro: o que foi endereçado a ele, com flag de lido
    pub async fn listar_para_membro(
        &self,
        membro_id: Uuid,
    ) -> Result<Vec<ComunicadoParaMembro>, AppError> {
        let cargos = self.membro_repo.cargos_do_membro(membro_id).await?;
        let comunicados = self.repo.listar_para_membro(membro_id, &cargos).await?;
        if comunicados.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<Uuid> = comunicados.iter().map(|c| c.id).collect();
        let lidos: HashSet<Uuid> = self
            .repo
            .leituras_do_membro(&ids, membro_id)
            .await?
            .into_iter()
            .collect();

        Ok(comunicados
            .into_iter()
            .map(|comunicado| {
                let lido = lidos.contains(&comunicado.id);
                ComunicadoParaMembro { comunicado, lido }
            })
            .collect())
    }

    /// Marcar como lido é idempotente: repetir a chamada não cria segunda
    /// linha nem devolve erro para o usuário.
    pub async fn marcar_leitura(
        &self,
        comunicado_id: Uuid,
        membro_id: Uuid,
    ) -> Result<(), AppError> {
        self.repo
            .registrar_leitura(comunicado_id, membro_id)
            .await?;
        Ok(())
    }

    pub async fn criar(
        &self,
        titulo: &str,
        conteudo: &str,
        destinatario_tipo: AlvoDestinatario,
        cargo_id: Option<Uuid>,
        membro_id: Option<Uuid>,
    ) -> Result<Comunicado, AppError> {
        validar_alvo(destinatario_tipo, cargo_id, membro_id)?;
        self.repo
            .criar(titulo, conteudo, destinatario_tipo, cargo_id, membro_id)
            .await
    }

    pub async fn excluir(&self, id: Uuid) -> Result<(), AppError> {
        self.repo.excluir(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn comunicado(
        destinatario_tipo: AlvoDestinatario,
        cargo_id: Option<Uuid>,
    ) -> Comunicado {
        Comunicado {
            id: Uuid::new_v4(),
            titulo: "Aviso".to_string(),
            conteudo: "Conteúdo".to_string(),
            destinatario_tipo,
            cargo_id,
            membro_id: None,
            created_at: None,
        }
    }

    fn leituras_de(comunicado_id: Uuid, quantas: usize) -> Vec<LeituraRow> {
        (0..quantas)
            .map(|_| LeituraRow {
                comunicado_id,
                membro_id: Uuid::new_v4(),
            })
            .collect()
    }

    #[test]
    fn percentual_usa_o_denominador_do_alvo() {
        let geral = comunicado(AlvoDestinatario::Geral, None);
        let cargo_id = Uuid::new_v4();
        let por_cargo = comunicado(AlvoDestinatario::Cargo, Some(cargo_id));

        let mut leituras = leituras_de(geral.id, 5);
        leituras.extend(leituras_de(por_cargo.id, 2));

        let ativos_por_cargo = HashMap::from([(cargo_id, 4u64)]);
        let views = montar_estatisticas(
            vec![geral.clone(), por_cargo.clone()],
            &leituras,
            10,
            &ativos_por_cargo,
        );

        let view_geral = views.iter().find(|v| v.comunicado.id == geral.id).unwrap();
        assert_eq!(view_geral.total_destinatarios, 10);
        assert_eq!(view_geral.percentual_leitura, 50.0);

        let view_cargo = views.iter().find(|v| v.comunicado.id == por_cargo.id).unwrap();
        assert_eq!(view_cargo.total_destinatarios, 4);
        assert_eq!(view_cargo.percentual_leitura, 50.0);
    }

    #[test]
    fn comunicado_sem_leitura_fica_em_zero() {
        let c = comunicado(AlvoDestinatario::Geral, None);
        let views = montar_estatisticas(vec![c], &[], 8, &HashMap::new());

        assert_eq!(views[0].total_leituras, 0);
        assert_eq!(views[0].percentual_leitura, 0.0);
    }

    #[test]
    fn alvo_membro_tem_denominador_um() {
        let destinatarios =
            contar_destinatarios(AlvoDestinatario::Membro, None, 50, &HashMap::new());
        assert_eq!(destinatarios, 1);
    }

    #[test]
    fn alvo_exige_o_id_correspondente() {
        assert!(validar_alvo(AlvoDestinatario::Geral, None, None).is_ok());
        assert!(validar_alvo(AlvoDestinatario::Cargo, None, None).is_err());
        assert!(validar_alvo(AlvoDestinatario::Cargo, Some(Uuid::new_v4()), None).is_ok());
        assert!(validar_alvo(AlvoDestinatario::Membro, None, None).is_err());
        assert!(validar_alvo(AlvoDestinatario::Membro, None, Some(Uuid::new_v4())).is_ok());
    }

    #[test]
    fn cargo_sem_ocupantes_nao_divide_por_zero() {
        let c = comunicado(AlvoDestinatario::Cargo, Some(Uuid::new_v4()));
        let views = montar_estatisticas(vec![c], &[], 8, &HashMap::new());

        assert_eq!(views[0].total_destinatarios, 0);
        assert_eq!(views[0].percentual_leitura, 0.0);
    }
}
