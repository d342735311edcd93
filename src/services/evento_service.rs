// src/services/evento_service.rs

use std::collections::HashMap;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::{
    common::{error::AppError, single_flight::SingleFlight},
    db::EventoRepository,
    models::evento::{ConfirmacaoPresenca, Evento, EventoComPresenca, ResultadoConfirmacao},
};

/// Zip das confirmações (buscadas em lote) sobre os eventos, destacando a do
/// membro que pediu a listagem
pub fn montar_com_presenca(
    eventos: Vec<Evento>,
    confirmacoes: Vec<ConfirmacaoPresenca>,
    membro_id: Uuid,
) -> Vec<EventoComPresenca> {
    let mut minha_por_evento: HashMap<Uuid, ConfirmacaoPresenca> = confirmacoes
        .into_iter()
        .filter(|c| c.membro_id == membro_id)
        .map(|c| (c.evento_id, c))
        .collect();

    eventos
        .into_iter()
        .map(|evento| {
            let minha_confirmacao = minha_por_evento.remove(&evento.id);
            EventoComPresenca {
                evento,
                minha_confirmacao,
            }
        })
        .collect()
}

#[derive(Clone)]
pub struct EventoService {
    repo: EventoRepository,
    em_voo: SingleFlight,
}

impl EventoService {
    pub fn new(repo: EventoRepository) -> Self {
        Self {
            repo,
            em_voo: SingleFlight::new(),
        }
    }

    pub async fn listar_com_presenca(
        &self,
        membro_id: Uuid,
    ) -> Result<Vec<EventoComPresenca>, AppError> {
        let eventos = self.repo.listar().await?;
        if eventos.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<Uuid> = eventos.iter().map(|e| e.id).collect();
        let confirmacoes = self.repo.listar_confirmacoes(&ids).await?;

        Ok(montar_com_presenca(eventos, confirmacoes, membro_id))
    }

    /// Toggle de presença com guarda de voo único por evento: um segundo
    /// clique enquanto o primeiro ainda está em andamento é recusado, não
    /// duplicado.
    pub async fn alternar_presenca(
        &self,
        evento_id: Uuid,
        membro_id: Uuid,
        acompanhantes: i32,
        convidados: i32,
    ) -> Result<ResultadoConfirmacao, AppError> {
        if !self.em_voo.acquire(evento_id) {
            return Err(AppError::OperacaoEmAndamento);
        }

        let resultado = self
            .repo
            .alternar_confirmacao(evento_id, membro_id, acompanhantes, convidados)
            .await;

        // libera sempre, inclusive quando a transação falhou
        self.em_voo.release(evento_id);

        let (confirmado, evento) = resultado?;
        Ok(ResultadoConfirmacao { confirmado, evento })
    }

    pub async fn criar(
        &self,
        titulo: &str,
        descricao: Option<&str>,
        local: Option<&str>,
        data_evento: NaiveDate,
    ) -> Result<Evento, AppError> {
        self.repo.criar(titulo, descricao, local, data_evento).await
    }

    pub async fn atualizar(
        &self,
        id: Uuid,
        titulo: &str,
        descricao: Option<&str>,
        local: Option<&str>,
        data_evento: NaiveDate,
    ) -> Result<Evento, AppError> {
        self.repo
            .atualizar(id, titulo, descricao, local, data_evento)
            .await
    }

    pub async fn excluir(&self, id: Uuid) -> Result<(), AppError> {
        self.repo.excluir(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn evento(titulo: &str) -> Evento {
        Evento {
            id: Uuid::new_v4(),
            titulo: titulo.to_string(),
            descricao: None,
            local: None,
            data_evento: NaiveDate::from_ymd_opt(2026, 9, 12).unwrap(),
            confirmados: 0,
            acompanhantes: 0,
            convidados: 0,
            created_at: None,
        }
    }

    fn confirmacao(evento_id: Uuid, membro_id: Uuid) -> ConfirmacaoPresenca {
        ConfirmacaoPresenca {
            id: Uuid::new_v4(),
            evento_id,
            membro_id,
            acompanhantes: 1,
            convidados: 0,
            confirmado_em: None,
        }
    }

    #[test]
    fn so_a_minha_confirmacao_entra_no_zip() {
        let encontro = evento("Encontro");
        let bate_volta = evento("Bate-volta");
        let eu = Uuid::new_v4();

        let confirmacoes = vec![
            confirmacao(encontro.id, eu),
            confirmacao(encontro.id, Uuid::new_v4()),
            confirmacao(bate_volta.id, Uuid::new_v4()),
        ];

        let views = montar_com_presenca(
            vec![encontro.clone(), bate_volta.clone()],
            confirmacoes,
            eu,
        );

        let view_encontro = views.iter().find(|v| v.evento.id == encontro.id).unwrap();
        assert!(view_encontro.minha_confirmacao.is_some());

        let view_bate_volta = views.iter().find(|v| v.evento.id == bate_volta.id).unwrap();
        assert!(view_bate_volta.minha_confirmacao.is_none());
    }
}
