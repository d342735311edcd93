// src/db/mod.rs

mod comunicado_repo;
mod documento_repo;
mod enquete_repo;
mod evento_repo;
mod fluxo_caixa_repo;
mod membro_repo;
mod mensalidade_repo;

pub use comunicado_repo::ComunicadoRepository;
pub use documento_repo::DocumentoRepository;
pub use enquete_repo::EnqueteRepository;
pub use evento_repo::EventoRepository;
pub use fluxo_caixa_repo::FluxoCaixaRepository;
pub use membro_repo::{ContagemCargoRow, MembroRepository, NomeGuerraRow};
pub use mensalidade_repo::MensalidadeRepository;
