//src/main.rs

use axum::{
    Router,
    routing::{get, patch, post},
};
use tokio::net::TcpListener;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod middleware;
mod models;
mod services;

use crate::config::AppState;
use crate::docs::ApiDoc;

#[tokio::main]
async fn main() {
    // Inicializa o logger
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() é bom aqui: se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    // Roda as migrações do SQLx na inicialização
    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Falha ao rodar as migrações do banco de dados.");

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    let membros_routes = Router::new()
        .route("/", post(handlers::membros::criar).get(handlers::membros::listar))
        .route(
            "/{id}",
            get(handlers::membros::buscar).put(handlers::membros::atualizar),
        )
        .route("/{id}/desativar", patch(handlers::membros::desativar));

    let mensalidades_routes = Router::new()
        .route("/", get(handlers::mensalidades::listar))
        .route("/resumo", get(handlers::mensalidades::resumo))
        .route("/gerar", post(handlers::mensalidades::gerar))
        .route("/export/csv", get(handlers::mensalidades::exportar_csv))
        .route("/{id}", axum::routing::put(handlers::mensalidades::atualizar))
        .route("/{id}/pagar", patch(handlers::mensalidades::pagar));

    let fluxo_caixa_routes = Router::new()
        .route(
            "/",
            post(handlers::fluxo_caixa::criar).get(handlers::fluxo_caixa::listar),
        )
        .route("/resumo", get(handlers::fluxo_caixa::resumo))
        .route("/export/csv", get(handlers::fluxo_caixa::exportar_csv))
        .route("/relatorio", get(handlers::fluxo_caixa::relatorio))
        .route(
            "/{id}",
            axum::routing::put(handlers::fluxo_caixa::atualizar)
                .delete(handlers::fluxo_caixa::excluir),
        );

    let comunicados_routes = Router::new()
        .route(
            "/",
            post(handlers::comunicados::criar).get(handlers::comunicados::listar),
        )
        .route("/meus", get(handlers::comunicados::listar_meus))
        .route("/{id}", axum::routing::delete(handlers::comunicados::excluir))
        .route("/{id}/leitura", post(handlers::comunicados::marcar_leitura));

    let documentos_routes = Router::new()
        .route(
            "/",
            post(handlers::documentos::criar).get(handlers::documentos::listar),
        )
        .route("/meus", get(handlers::documentos::listar_meus))
        .route("/{id}", axum::routing::delete(handlers::documentos::excluir))
        .route("/{id}/acesso", post(handlers::documentos::registrar_acesso));

    let enquetes_routes = Router::new()
        .route(
            "/",
            post(handlers::enquetes::criar).get(handlers::enquetes::listar),
        )
        .route("/{id}", axum::routing::delete(handlers::enquetes::excluir))
        .route("/{id}/votar", post(handlers::enquetes::votar))
        .route("/{id}/encerrar", patch(handlers::enquetes::encerrar));

    let eventos_routes = Router::new()
        .route(
            "/",
            post(handlers::eventos::criar).get(handlers::eventos::listar),
        )
        .route(
            "/{id}",
            axum::routing::put(handlers::eventos::atualizar)
                .delete(handlers::eventos::excluir),
        )
        .route("/{id}/confirmacao", post(handlers::eventos::alternar_presenca));

    let dashboard_routes = Router::new().route("/resumo", get(handlers::dashboard::resumo));

    // Combina tudo no router principal
    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/membros", membros_routes)
        .nest("/api/mensalidades", mensalidades_routes)
        .nest("/api/fluxo-caixa", fluxo_caixa_routes)
        .nest("/api/comunicados", comunicados_routes)
        .nest("/api/documentos", documentos_routes)
        .nest("/api/enquetes", enquetes_routes)
        .nest("/api/eventos", eventos_routes)
        .nest("/api/dashboard", dashboard_routes)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(app_state);

    // Inicia o servidor
    let addr = "0.0.0.0:3000";
    let listener = TcpListener::bind(addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr().unwrap());
    axum::serve(listener, app)
        .await
        .expect("Erro no servidor Axum");
}
