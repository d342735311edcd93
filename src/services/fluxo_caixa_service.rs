// src/services/fluxo_caixa_service.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::FluxoCaixaRepository,
    models::fluxo_caixa::{LancamentoCaixa, ResumoFluxoCaixa, TipoFluxo},
    services::metricas::periodo_do_mes,
};

/// saldo = Σ entradas − Σ saídas. Redutor puro; nunca falha por causa de um
/// lançamento estranho, no máximo ignora o que não soma.
pub fn resumir_fluxo(lancamentos: &[LancamentoCaixa]) -> ResumoFluxoCaixa {
    let mut resumo = ResumoFluxoCaixa {
        total_entradas: Decimal::ZERO,
        total_saidas: Decimal::ZERO,
        saldo: Decimal::ZERO,
        qtd_lancamentos: 0,
        saidas_sem_comprovante: 0,
    };

    for lancamento in lancamentos {
        resumo.qtd_lancamentos += 1;
        match lancamento.tipo {
            TipoFluxo::Entrada => resumo.total_entradas += lancamento.valor,
            TipoFluxo::Saida => {
                resumo.total_saidas += lancamento.valor;
                if lancamento.comprovante_pendente() {
                    resumo.saidas_sem_comprovante += 1;
                }
            }
        }
    }

    resumo.saldo = resumo.total_entradas - resumo.total_saidas;
    resumo
}

#[derive(Clone)]
pub struct FluxoCaixaService {
    repo: FluxoCaixaRepository,
}

impl FluxoCaixaService {
    pub fn new(repo: FluxoCaixaRepository) -> Self {
        Self { repo }
    }

    pub async fn listar_por_mes(
        &self,
        mes: NaiveDate,
    ) -> Result<Vec<LancamentoCaixa>, AppError> {
        let (inicio, fim) = periodo_do_mes(mes);
        self.repo.listar_por_periodo(inicio, fim).await
    }

    pub async fn resumo_do_mes(&self, mes: NaiveDate) -> Result<ResumoFluxoCaixa, AppError> {
        let lancamentos = self.listar_por_mes(mes).await?;
        Ok(resumir_fluxo(&lancamentos))
    }

    pub async fn criar(
        &self,
        tipo: TipoFluxo,
        categoria: &str,
        descricao: &str,
        valor: Decimal,
        data: NaiveDate,
        anexo_url: Option<&str>,
    ) -> Result<LancamentoCaixa, AppError> {
        self.repo
            .criar(tipo, categoria, descricao, valor, data, anexo_url)
            .await
    }

    pub async fn atualizar(
        &self,
        id: Uuid,
        categoria: &str,
        descricao: &str,
        valor: Decimal,
        data: NaiveDate,
        anexo_url: Option<&str>,
    ) -> Result<LancamentoCaixa, AppError> {
        self.repo
            .atualizar(id, categoria, descricao, valor, data, anexo_url)
            .await
    }

    pub async fn excluir(&self, id: Uuid) -> Result<(), AppError> {
        self.repo.excluir(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lancamento(tipo: TipoFluxo, valor: i64, anexo: Option<&str>) -> LancamentoCaixa {
        LancamentoCaixa {
            id: Uuid::new_v4(),
            tipo,
            categoria: "Geral".to_string(),
            descricao: "teste".to_string(),
            valor: Decimal::new(valor, 2),
            data: NaiveDate::from_ymd_opt(2026, 8, 5).unwrap(),
            anexo_url: anexo.map(str::to_string),
            created_at: None,
        }
    }

    #[test]
    fn saldo_eh_entradas_menos_saidas() {
        let lancamentos = vec![
            lancamento(TipoFluxo::Entrada, 45000, None),
            lancamento(TipoFluxo::Entrada, 15000, None),
            lancamento(TipoFluxo::Saida, 20000, Some("https://anexo/1.jpg")),
        ];

        let resumo = resumir_fluxo(&lancamentos);

        assert_eq!(resumo.total_entradas, Decimal::new(60000, 2));
        assert_eq!(resumo.total_saidas, Decimal::new(20000, 2));
        assert_eq!(resumo.saldo, Decimal::new(40000, 2));
        assert_eq!(resumo.qtd_lancamentos, 3);
    }

    #[test]
    fn saida_sem_anexo_conta_como_comprovante_pendente() {
        let lancamentos = vec![
            lancamento(TipoFluxo::Saida, 10000, None),
            lancamento(TipoFluxo::Saida, 10000, Some("https://anexo/2.jpg")),
            lancamento(TipoFluxo::Entrada, 10000, None), // entrada sem anexo não conta
        ];

        assert_eq!(resumir_fluxo(&lancamentos).saidas_sem_comprovante, 1);
    }

    #[test]
    fn saldo_pode_ficar_negativo() {
        let lancamentos = vec![lancamento(TipoFluxo::Saida, 5000, None)];
        assert_eq!(resumir_fluxo(&lancamentos).saldo, Decimal::new(-5000, 2));
    }
}
