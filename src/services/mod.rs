// src/services/mod.rs

pub mod comunicado_service;
pub mod dashboard_service;
pub mod documento_service;
pub mod enquete_service;
pub mod evento_service;
pub mod export_service;
pub mod fluxo_caixa_service;
pub mod membro_service;
pub mod mensalidade_service;
pub mod metricas;

pub use comunicado_service::ComunicadoService;
pub use dashboard_service::DashboardService;
pub use documento_service::DocumentoService;
pub use enquete_service::EnqueteService;
pub use evento_service::EventoService;
pub use fluxo_caixa_service::FluxoCaixaService;
pub use membro_service::MembroService;
pub use mensalidade_service::MensalidadeService;
