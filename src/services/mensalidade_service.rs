// src/services/mensalidade_service.rs

use chrono::{Local, NaiveDate};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::MensalidadeRepository,
    models::mensalidade::{
        Mensalidade, MensalidadeComMembroRow, MensalidadeView, ResumoMensalidades,
        StatusMensalidade,
    },
    services::metricas::{percentual, primeiro_dia_do_mes},
};

// =========================================================================
//  DERIVAÇÃO DE STATUS
// =========================================================================
// O texto gravado na tabela é apenas informativo. O status que vale é sempre
// recalculado aqui, a cada leitura, e nunca gravado de volta.

/// Deriva o status de uma mensalidade a partir do texto bruto e das datas.
/// Função pura e total: data ausente nunca marca atraso.
pub fn calcular_status(
    status_bruto: &str,
    data_vencimento: Option<NaiveDate>,
    hoje: NaiveDate,
) -> StatusMensalidade {
    let bruto = status_bruto.trim().to_lowercase();

    // Pago e isento ganham de qualquer data: mensalidade quitada nunca é
    // rebaixada para atrasada.
    match bruto.as_str() {
        "pago" => return StatusMensalidade::Pago,
        "isento" => return StatusMensalidade::Isento,
        _ => {}
    }

    // Vencida ontem ou antes (comparação por dia de calendário; vencer hoje
    // ainda não é atraso)
    if let Some(vencimento) = data_vencimento {
        if vencimento < hoje {
            return StatusMensalidade::Atrasado;
        }
    }

    match bruto.as_str() {
        "pendente" => StatusMensalidade::Pendente,
        "atrasado" => StatusMensalidade::Atrasado,
        "cancelado" => StatusMensalidade::Cancelado,
        _ => StatusMensalidade::Aberto,
    }
}

/// Dias de atraso, sempre >= 0. Pago e isento valem 0 mesmo com vencimento no
/// passado.
pub fn calcular_dias_atraso(
    status_bruto: &str,
    data_vencimento: Option<NaiveDate>,
    hoje: NaiveDate,
) -> u32 {
    match calcular_status(status_bruto, data_vencimento, hoje) {
        StatusMensalidade::Pago | StatusMensalidade::Isento => 0,
        _ => data_vencimento
            .map(|vencimento| (hoje - vencimento).num_days().max(0) as u32)
            .unwrap_or(0),
    }
}

// =========================================================================
//  REDUTORES
// =========================================================================

/// Totais do período por balde de status derivado. Somas com precisão total;
/// só a taxa de conversão é arredondada (uma casa), para exibição.
pub fn resumir(linhas: &[MensalidadeComMembroRow], hoje: NaiveDate) -> ResumoMensalidades {
    let mut resumo = ResumoMensalidades {
        total_pago: Decimal::ZERO,
        total_pendente: Decimal::ZERO,
        total_atrasado: Decimal::ZERO,
        total_isento: Decimal::ZERO,
        qtd_pagas: 0,
        qtd_atrasadas: 0,
        qtd_total: 0,
        taxa_conversao: 0.0,
    };

    for linha in linhas {
        resumo.qtd_total += 1;
        match calcular_status(&linha.status, Some(linha.data_vencimento), hoje) {
            StatusMensalidade::Pago => {
                resumo.total_pago += linha.valor;
                resumo.qtd_pagas += 1;
            }
            StatusMensalidade::Isento => resumo.total_isento += linha.valor,
            StatusMensalidade::Atrasado => {
                resumo.total_atrasado += linha.valor;
                resumo.qtd_atrasadas += 1;
            }
            StatusMensalidade::Pendente | StatusMensalidade::Aberto => {
                resumo.total_pendente += linha.valor;
            }
            StatusMensalidade::Cancelado => {}
        }
    }

    resumo.taxa_conversao = percentual(resumo.qtd_pagas, resumo.qtd_total);
    resumo
}

fn montar_view(linha: MensalidadeComMembroRow, hoje: NaiveDate) -> MensalidadeView {
    let status_derivado = calcular_status(&linha.status, Some(linha.data_vencimento), hoje);
    let dias_atraso = calcular_dias_atraso(&linha.status, Some(linha.data_vencimento), hoje);

    MensalidadeView {
        mensalidade: Mensalidade {
            id: linha.id,
            membro_id: linha.membro_id,
            mes_referencia: linha.mes_referencia,
            valor: linha.valor,
            data_vencimento: linha.data_vencimento,
            data_pagamento: linha.data_pagamento,
            status: linha.status,
            observacao: linha.observacao,
            created_at: linha.created_at,
        },
        nome_de_guerra: linha.nome_de_guerra,
        status_derivado,
        dias_atraso,
    }
}

// =========================================================================
//  SERVIÇO
// =========================================================================

#[derive(Clone)]
pub struct MensalidadeService {
    repo: MensalidadeRepository,
}

impl MensalidadeService {
    pub fn new(repo: MensalidadeRepository) -> Self {
        Self { repo }
    }

    pub async fn listar_por_mes(
        &self,
        mes_referencia: NaiveDate,
    ) -> Result<Vec<MensalidadeView>, AppError> {
        let mes = primeiro_dia_do_mes(mes_referencia);
        let linhas = self.repo.listar_por_mes(mes).await?;

        let hoje = Local::now().date_naive();
        Ok(linhas
            .into_iter()
            .map(|linha| montar_view(linha, hoje))
            .collect())
    }

    pub async fn resumo_do_mes(
        &self,
        mes_referencia: NaiveDate,
    ) -> Result<ResumoMensalidades, AppError> {
        let mes = primeiro_dia_do_mes(mes_referencia);
        let linhas = self.repo.listar_por_mes(mes).await?;

        Ok(resumir(&linhas, Local::now().date_naive()))
    }

    /// Gera a cobrança do período para todos os membros ativos; membros que já
    /// têm mensalidade no mês são pulados. Retorna quantas foram criadas.
    pub async fn gerar_para_periodo(
        &self,
        mes_referencia: NaiveDate,
        valor: Decimal,
        data_vencimento: NaiveDate,
    ) -> Result<u64, AppError> {
        let mes = primeiro_dia_do_mes(mes_referencia);
        let criadas = self
            .repo
            .gerar_para_periodo(mes, valor, data_vencimento)
            .await?;

        tracing::info!("Geradas {} mensalidades para {}", criadas, mes);
        Ok(criadas)
    }

    pub async fn marcar_paga(
        &self,
        id: Uuid,
        data_pagamento: Option<NaiveDate>,
    ) -> Result<Mensalidade, AppError> {
        let data = data_pagamento.unwrap_or_else(|| Local::now().date_naive());
        self.repo.marcar_paga(id, data).await
    }

    pub async fn atualizar(
        &self,
        id: Uuid,
        valor: Decimal,
        data_vencimento: NaiveDate,
        status: &str,
        observacao: Option<&str>,
    ) -> Result<Mensalidade, AppError> {
        self.repo
            .atualizar(id, valor, data_vencimento, status, observacao)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};

    fn hoje() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 6).unwrap()
    }

    fn linha(status: &str, vencimento: NaiveDate, valor: i64) -> MensalidadeComMembroRow {
        MensalidadeComMembroRow {
            id: Uuid::new_v4(),
            membro_id: Uuid::new_v4(),
            mes_referencia: NaiveDate::from_ymd_opt(2026, 8, 1).unwrap(),
            valor: Decimal::new(valor, 2),
            data_vencimento: vencimento,
            data_pagamento: None,
            status: status.to_string(),
            observacao: None,
            created_at: None::<DateTime<Utc>>,
            nome_de_guerra: String::new(),
        }
    }

    #[test]
    fn pago_nunca_vira_atrasado_mesmo_vencido() {
        let vencido = NaiveDate::from_ymd_opt(2026, 7, 10).unwrap();
        assert_eq!(
            calcular_status("pago", Some(vencido), hoje()),
            StatusMensalidade::Pago
        );
        assert_eq!(calcular_dias_atraso("pago", Some(vencido), hoje()), 0);
    }

    #[test]
    fn status_bruto_eh_normalizado_antes_de_comparar() {
        assert_eq!(
            calcular_status("  PAGO ", None, hoje()),
            StatusMensalidade::Pago
        );
        assert_eq!(
            calcular_status("Isento", None, hoje()),
            StatusMensalidade::Isento
        );
    }

    #[test]
    fn vencida_ontem_fica_atrasada_com_um_dia() {
        let ontem = hoje().pred_opt().unwrap();
        assert_eq!(
            calcular_status("Aberto", Some(ontem), hoje()),
            StatusMensalidade::Atrasado
        );
        assert_eq!(calcular_dias_atraso("Aberto", Some(ontem), hoje()), 1);
    }

    #[test]
    fn vencer_hoje_nao_eh_atraso() {
        assert_eq!(
            calcular_status("aberto", Some(hoje()), hoje()),
            StatusMensalidade::Aberto
        );
        assert_eq!(calcular_dias_atraso("aberto", Some(hoje()), hoje()), 0);
    }

    #[test]
    fn status_conhecido_passa_normalizado_quando_nao_vencida() {
        let amanha = hoje().succ_opt().unwrap();
        assert_eq!(
            calcular_status("pendente", Some(amanha), hoje()),
            StatusMensalidade::Pendente
        );
        assert_eq!(
            calcular_status("cancelado", Some(amanha), hoje()),
            StatusMensalidade::Cancelado
        );
        // "atrasado" gravado no banco passa direto, mas os dias são calculados
        // pelas datas e nunca ficam negativos
        assert_eq!(
            calcular_status("atrasado", Some(amanha), hoje()),
            StatusMensalidade::Atrasado
        );
        assert_eq!(calcular_dias_atraso("atrasado", Some(amanha), hoje()), 0);
    }

    #[test]
    fn status_desconhecido_vira_aberto() {
        assert_eq!(
            calcular_status("qualquer coisa", None, hoje()),
            StatusMensalidade::Aberto
        );
        assert_eq!(calcular_status("", None, hoje()), StatusMensalidade::Aberto);
    }

    #[test]
    fn data_ausente_nunca_marca_atraso() {
        assert_eq!(
            calcular_status("aberto", None, hoje()),
            StatusMensalidade::Aberto
        );
        assert_eq!(calcular_dias_atraso("aberto", None, hoje()), 0);
    }

    #[test]
    fn resumo_soma_por_balde_e_calcula_taxa() {
        let ontem = hoje().pred_opt().unwrap();
        let amanha = hoje().succ_opt().unwrap();
        let linhas = vec![
            linha("pago", ontem, 15000),     // 150,00 pago (vencido, mas pago)
            linha("pago", amanha, 15000),    // 150,00 pago
            linha("aberto", ontem, 15000),   // 150,00 atrasado
            linha("aberto", amanha, 15000),  // 150,00 pendente
            linha("isento", amanha, 15000),  // isento fora da taxa
        ];

        let resumo = resumir(&linhas, hoje());

        assert_eq!(resumo.total_pago, Decimal::new(30000, 2));
        assert_eq!(resumo.total_atrasado, Decimal::new(15000, 2));
        assert_eq!(resumo.total_pendente, Decimal::new(15000, 2));
        assert_eq!(resumo.total_isento, Decimal::new(15000, 2));
        assert_eq!(resumo.qtd_pagas, 2);
        assert_eq!(resumo.qtd_atrasadas, 1);
        assert_eq!(resumo.qtd_total, 5);
        assert_eq!(resumo.taxa_conversao, 40.0);
    }

    #[test]
    fn resumo_de_lista_vazia_nao_divide_por_zero() {
        let resumo = resumir(&[], hoje());
        assert_eq!(resumo.qtd_total, 0);
        assert_eq!(resumo.taxa_conversao, 0.0);
    }
}
