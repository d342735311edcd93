// src/models/mod.rs

pub mod comunicado;
pub mod dashboard;
pub mod documento;
pub mod enquete;
pub mod evento;
pub mod fluxo_caixa;
pub mod membro;
pub mod mensalidade;
