// src/config.rs

use std::sync::Arc;
use std::{env, time::Duration};

use sqlx::{PgPool, postgres::PgPoolOptions};

use crate::common::cache::{CacheComTtl, RelogioSistema};
use crate::db::{
    ComunicadoRepository, DocumentoRepository, EnqueteRepository, EventoRepository,
    FluxoCaixaRepository, MembroRepository, MensalidadeRepository,
};
use crate::services::{
    ComunicadoService, DashboardService, DocumentoService, EnqueteService, EventoService,
    FluxoCaixaService, MembroService, MensalidadeService, membro_service::TTL_ROSTER,
};

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub membro_service: MembroService,
    pub mensalidade_service: MensalidadeService,
    pub fluxo_caixa_service: FluxoCaixaService,
    pub comunicado_service: ComunicadoService,
    pub documento_service: DocumentoService,
    pub enquete_service: EnqueteService,
    pub evento_service: EventoService,
    pub dashboard_service: DashboardService,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL deve ser definida");

        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // --- Monta o gráfico de dependências ---
        let membro_repo = MembroRepository::new(db_pool.clone());
        let mensalidade_repo = MensalidadeRepository::new(db_pool.clone());
        let fluxo_repo = FluxoCaixaRepository::new(db_pool.clone());

        // Cache do roster: objeto explícito com relógio injetado, construído
        // uma vez e compartilhado, nunca um global de módulo
        let cache_roster = Arc::new(CacheComTtl::new(TTL_ROSTER, Arc::new(RelogioSistema)));

        let membro_service = MembroService::new(membro_repo.clone(), cache_roster);
        let mensalidade_service = MensalidadeService::new(mensalidade_repo.clone());
        let fluxo_caixa_service = FluxoCaixaService::new(fluxo_repo.clone());
        let comunicado_service = ComunicadoService::new(
            ComunicadoRepository::new(db_pool.clone()),
            membro_repo.clone(),
        );
        let documento_service = DocumentoService::new(
            DocumentoRepository::new(db_pool.clone()),
            membro_repo.clone(),
        );
        let enquete_service = EnqueteService::new(
            EnqueteRepository::new(db_pool.clone()),
            membro_repo.clone(),
        );
        let evento_service = EventoService::new(EventoRepository::new(db_pool.clone()));
        let dashboard_service = DashboardService::new(mensalidade_repo, fluxo_repo, membro_repo);

        Ok(Self {
            db_pool,
            membro_service,
            mensalidade_service,
            fluxo_caixa_service,
            comunicado_service,
            documento_service,
            enquete_service,
            evento_service,
            dashboard_service,
        })
    }
}
