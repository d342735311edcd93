// src/handlers/mod.rs

pub mod comunicados;
pub mod dashboard;
pub mod documentos;
pub mod enquetes;
pub mod eventos;
pub mod fluxo_caixa;
pub mod membros;
pub mod mensalidades;
