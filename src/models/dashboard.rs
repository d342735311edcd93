// src/models/dashboard.rs

use serde::Serialize;
use utoipa::ToSchema;

use crate::models::fluxo_caixa::ResumoFluxoCaixa;
use crate::models::mensalidade::ResumoMensalidades;

/// Os cards do topo da página inicial: situação financeira do mês
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResumoDashboard {
    pub mensalidades: ResumoMensalidades,
    pub fluxo_caixa: ResumoFluxoCaixa,

    pub membros_ativos: u64,
}
