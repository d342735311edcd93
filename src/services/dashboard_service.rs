// src/services/dashboard_service.rs

use chrono::{Local, NaiveDate};

use crate::{
    common::error::AppError,
    db::{FluxoCaixaRepository, MembroRepository, MensalidadeRepository},
    models::dashboard::ResumoDashboard,
    services::{
        fluxo_caixa_service::resumir_fluxo,
        mensalidade_service::resumir,
        metricas::{periodo_do_mes, primeiro_dia_do_mes},
    },
};

#[derive(Clone)]
pub struct DashboardService {
    mensalidade_repo: MensalidadeRepository,
    fluxo_repo: FluxoCaixaRepository,
    membro_repo: MembroRepository,
}

impl DashboardService {
    pub fn new(
        mensalidade_repo: MensalidadeRepository,
        fluxo_repo: FluxoCaixaRepository,
        membro_repo: MembroRepository,
    ) -> Self {
        Self {
            mensalidade_repo,
            fluxo_repo,
            membro_repo,
        }
    }

    /// Os cards da página inicial em uma rodada só: as três buscas saem em
    /// paralelo e qualquer falha derruba o resumo inteiro.
    pub async fn resumo_do_mes(&self, mes: NaiveDate) -> Result<ResumoDashboard, AppError> {
        let mes = primeiro_dia_do_mes(mes);
        let (inicio, fim) = periodo_do_mes(mes);

        let (mensalidades, lancamentos, membros_ativos) = tokio::try_join!(
            self.mensalidade_repo.listar_por_mes(mes),
            self.fluxo_repo.listar_por_periodo(inicio, fim),
            self.membro_repo.contar_ativos(),
        )?;

        let hoje = Local::now().date_naive();

        Ok(ResumoDashboard {
            mensalidades: resumir(&mensalidades, hoje),
            fluxo_caixa: resumir_fluxo(&lancamentos),
            membros_ativos: membros_ativos.max(0) as u64,
        })
    }
}
