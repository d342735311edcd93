// src/services/enquete_service.rs

use std::collections::HashMap;

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{EnqueteRepository, MembroRepository},
    models::enquete::{
        Enquete, EnqueteComResultados, EnqueteOpcao, OpcaoComResultado, RespostaTexto,
        TipoEnquete, Voto,
    },
    services::metricas::percentual,
};

// =========================================================================
//  APURAÇÃO
// =========================================================================

/// Dobra opções e votos (buscados em lote) sobre as enquetes. Enquete sem
/// voto fica com 0% em todas as opções, nunca NaN.
pub fn montar_resultados(
    enquetes: Vec<Enquete>,
    opcoes: Vec<EnqueteOpcao>,
    votos: Vec<Voto>,
    nomes: &HashMap<Uuid, String>,
    membro_id: Uuid,
) -> Vec<EnqueteComResultados> {
    let mut opcoes_por_enquete: HashMap<Uuid, Vec<EnqueteOpcao>> = HashMap::new();
    for opcao in opcoes {
        opcoes_por_enquete
            .entry(opcao.enquete_id)
            .or_default()
            .push(opcao);
    }

    let mut votos_por_enquete: HashMap<Uuid, Vec<Voto>> = HashMap::new();
    for voto in votos {
        votos_por_enquete
            .entry(voto.enquete_id)
            .or_default()
            .push(voto);
    }

    enquetes
        .into_iter()
        .map(|enquete| {
            let votos = votos_por_enquete.remove(&enquete.id).unwrap_or_default();
            let total_votos = votos.len() as u64;

            let mut votos_por_opcao: HashMap<Uuid, u64> = HashMap::new();
            for voto in &votos {
                if let Some(opcao_id) = voto.opcao_id {
                    *votos_por_opcao.entry(opcao_id).or_default() += 1;
                }
            }

            let opcoes = opcoes_por_enquete
                .remove(&enquete.id)
                .unwrap_or_default()
                .into_iter()
                .map(|opcao| {
                    let votos_opcao = votos_por_opcao.get(&opcao.id).copied().unwrap_or(0);
                    OpcaoComResultado {
                        opcao,
                        votos: votos_opcao,
                        percentual: percentual(votos_opcao, total_votos),
                    }
                })
                .collect();

            let respostas = votos
                .iter()
                .filter_map(|voto| {
                    voto.resposta_texto.as_ref().map(|texto| RespostaTexto {
                        nome_de_guerra: nomes
                            .get(&voto.membro_id)
                            .cloned()
                            .unwrap_or_default(),
                        texto: texto.clone(),
                    })
                })
                .collect();

            let meu_voto = votos.iter().find(|v| v.membro_id == membro_id).cloned();

            EnqueteComResultados {
                enquete,
                total_votos,
                opcoes,
                respostas,
                meu_voto,
            }
        })
        .collect()
}

/// Ou opção (múltipla escolha) ou texto (livre), nunca os dois
pub fn validar_voto(
    tipo: TipoEnquete,
    opcao_id: Option<Uuid>,
    resposta_texto: Option<&str>,
) -> Result<(), AppError> {
    match tipo {
        TipoEnquete::MultiplaEscolha => {
            if opcao_id.is_none() {
                return Err(AppError::VotoInvalido(
                    "enquete de múltipla escolha exige uma opção",
                ));
            }
            if resposta_texto.is_some() {
                return Err(AppError::VotoInvalido(
                    "resposta de texto não se aplica a enquete de múltipla escolha",
                ));
            }
        }
        TipoEnquete::TextoLivre => {
            if resposta_texto.map(str::trim).filter(|t| !t.is_empty()).is_none() {
                return Err(AppError::VotoInvalido(
                    "enquete de texto livre exige uma resposta",
                ));
            }
            if opcao_id.is_some() {
                return Err(AppError::VotoInvalido(
                    "opção não se aplica a enquete de texto livre",
                ));
            }
        }
    }

    Ok(())
}

#[derive(Clone)]
pub struct EnqueteService {
    repo: EnqueteRepository,
    membro_repo: MembroRepository,
}

impl EnqueteService {
    pub fn new(repo: EnqueteRepository, membro_repo: MembroRepository) -> Self {
        Self { repo, membro_repo }
    }

    /// Enquetes com apuração completa e o voto de quem pediu. Quatro queries
    /// em lote: enquetes, opções, votos e nomes de quem respondeu texto.
    pub async fn listar_com_resultados(
        &self,
        membro_id: Uuid,
    ) -> Result<Vec<EnqueteComResultados>, AppError> {
        let enquetes = self.repo.listar().await?;
        if enquetes.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<Uuid> = enquetes.iter().map(|e| e.id).collect();

        let (opcoes, votos) = tokio::try_join!(
            self.repo.listar_opcoes(&ids),
            self.repo.listar_votos(&ids),
        )?;

        // terceira entidade: quem respondeu texto livre aparece pelo nome de
        // guerra, resolvido em um único lote
        let ids_respondentes: Vec<Uuid> = {
            let mut vistos: Vec<Uuid> = votos
                .iter()
                .filter(|v| v.resposta_texto.is_some())
                .map(|v| v.membro_id)
                .collect();
            vistos.sort_unstable();
            vistos.dedup();
            vistos
        };

        let nomes: HashMap<Uuid, String> = if ids_respondentes.is_empty() {
            HashMap::new()
        } else {
            self.membro_repo
                .nomes_de_guerra(&ids_respondentes)
                .await?
                .into_iter()
                .map(|linha| (linha.id, linha.nome_de_guerra))
                .collect()
        };

        Ok(montar_resultados(enquetes, opcoes, votos, &nomes, membro_id))
    }

    pub async fn votar(
        &self,
        enquete_id: Uuid,
        membro_id: Uuid,
        opcao_id: Option<Uuid>,
        resposta_texto: Option<&str>,
    ) -> Result<Voto, AppError> {
        let enquete = self
            .repo
            .buscar_por_id(enquete_id)
            .await?
            .ok_or(AppError::NaoEncontrado)?;

        if !enquete.ativa {
            return Err(AppError::EnqueteEncerrada);
        }

        validar_voto(enquete.tipo, opcao_id, resposta_texto)?;

        if let Some(opcao_id) = opcao_id {
            if !self
                .repo
                .opcao_pertence_a_enquete(enquete_id, opcao_id)
                .await?
            {
                return Err(AppError::VotoInvalido("opção não pertence à enquete"));
            }
        }

        self.repo
            .registrar_voto(enquete_id, membro_id, opcao_id, resposta_texto)
            .await
    }

    pub async fn criar(
        &self,
        titulo: &str,
        descricao: Option<&str>,
        tipo: TipoEnquete,
        opcoes: &[String],
    ) -> Result<Enquete, AppError> {
        if tipo == TipoEnquete::MultiplaEscolha && opcoes.len() < 2 {
            return Err(AppError::RequisicaoInvalida(
                "enquete de múltipla escolha exige ao menos duas opções",
            ));
        }

        self.repo.criar(titulo, descricao, tipo, opcoes).await
    }

    pub async fn encerrar(&self, id: Uuid) -> Result<Enquete, AppError> {
        self.repo.encerrar(id).await
    }

    pub async fn excluir(&self, id: Uuid) -> Result<(), AppError> {
        self.repo.excluir(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enquete(tipo: TipoEnquete) -> Enquete {
        Enquete {
            id: Uuid::new_v4(),
            titulo: "Destino de setembro".to_string(),
            descricao: None,
            tipo,
            ativa: true,
            created_at: None,
        }
    }

    fn opcao(enquete_id: Uuid, texto: &str, ordem: i32) -> EnqueteOpcao {
        EnqueteOpcao {
            id: Uuid::new_v4(),
            enquete_id,
            texto: texto.to_string(),
            ordem,
        }
    }

    fn voto_em(enquete_id: Uuid, opcao_id: Uuid) -> Voto {
        Voto {
            id: Uuid::new_v4(),
            enquete_id,
            membro_id: Uuid::new_v4(),
            opcao_id: Some(opcao_id),
            resposta_texto: None,
            votado_em: None,
        }
    }

    #[test]
    fn apuracao_calcula_percentual_por_opcao() {
        let enquete = enquete(TipoEnquete::MultiplaEscolha);
        let serra = opcao(enquete.id, "Serra", 0);
        let litoral = opcao(enquete.id, "Litoral", 1);

        let votos = vec![
            voto_em(enquete.id, serra.id),
            voto_em(enquete.id, serra.id),
            voto_em(enquete.id, litoral.id),
        ];

        let resultados = montar_resultados(
            vec![enquete],
            vec![serra.clone(), litoral.clone()],
            votos,
            &HashMap::new(),
            Uuid::new_v4(),
        );

        assert_eq!(resultados[0].total_votos, 3);
        let r_serra = &resultados[0].opcoes[0];
        assert_eq!(r_serra.opcao.id, serra.id);
        assert_eq!(r_serra.votos, 2);
        assert_eq!(r_serra.percentual, 66.7);
        assert_eq!(resultados[0].opcoes[1].percentual, 33.3);
    }

    #[test]
    fn enquete_sem_votos_fica_toda_em_zero() {
        let enquete = enquete(TipoEnquete::MultiplaEscolha);
        let opcoes = vec![opcao(enquete.id, "A", 0), opcao(enquete.id, "B", 1)];

        let resultados = montar_resultados(
            vec![enquete],
            opcoes,
            Vec::new(),
            &HashMap::new(),
            Uuid::new_v4(),
        );

        assert_eq!(resultados[0].total_votos, 0);
        for opcao in &resultados[0].opcoes {
            assert_eq!(opcao.percentual, 0.0);
        }
    }

    #[test]
    fn meu_voto_aparece_no_resultado() {
        let enquete = enquete(TipoEnquete::MultiplaEscolha);
        let escolha = opcao(enquete.id, "A", 0);
        let mut voto = voto_em(enquete.id, escolha.id);
        let eu = Uuid::new_v4();
        voto.membro_id = eu;

        let resultados = montar_resultados(
            vec![enquete],
            vec![escolha],
            vec![voto.clone()],
            &HashMap::new(),
            eu,
        );

        assert_eq!(resultados[0].meu_voto.as_ref().unwrap().id, voto.id);
    }

    #[test]
    fn resposta_de_texto_carrega_o_nome_de_guerra() {
        let enquete = enquete(TipoEnquete::TextoLivre);
        let autor = Uuid::new_v4();
        let voto = Voto {
            id: Uuid::new_v4(),
            enquete_id: enquete.id,
            membro_id: autor,
            opcao_id: None,
            resposta_texto: Some("Campos do Jordão".to_string()),
            votado_em: None,
        };
        let nomes = HashMap::from([(autor, "Trovão".to_string())]);

        let resultados =
            montar_resultados(vec![enquete], Vec::new(), vec![voto], &nomes, Uuid::new_v4());

        assert_eq!(resultados[0].respostas.len(), 1);
        assert_eq!(resultados[0].respostas[0].nome_de_guerra, "Trovão");
    }

    #[test]
    fn voto_exige_opcao_ou_texto_conforme_o_tipo() {
        assert!(validar_voto(TipoEnquete::MultiplaEscolha, Some(Uuid::new_v4()), None).is_ok());
        assert!(validar_voto(TipoEnquete::MultiplaEscolha, None, None).is_err());
        assert!(
            validar_voto(TipoEnquete::MultiplaEscolha, Some(Uuid::new_v4()), Some("x")).is_err()
        );

        assert!(validar_voto(TipoEnquete::TextoLivre, None, Some("resposta")).is_ok());
        assert!(validar_voto(TipoEnquete::TextoLivre, None, Some("   ")).is_err());
        assert!(validar_voto(TipoEnquete::TextoLivre, Some(Uuid::new_v4()), Some("x")).is_err());
    }
}
