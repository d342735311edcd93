// src/docs.rs

use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Membros ---
        handlers::membros::listar,
        handlers::membros::buscar,
        handlers::membros::criar,
        handlers::membros::atualizar,
        handlers::membros::desativar,

        // --- Mensalidades ---
        handlers::mensalidades::listar,
        handlers::mensalidades::resumo,
        handlers::mensalidades::gerar,
        handlers::mensalidades::pagar,
        handlers::mensalidades::atualizar,
        handlers::mensalidades::exportar_csv,

        // --- Fluxo de Caixa ---
        handlers::fluxo_caixa::listar,
        handlers::fluxo_caixa::resumo,
        handlers::fluxo_caixa::criar,
        handlers::fluxo_caixa::atualizar,
        handlers::fluxo_caixa::excluir,
        handlers::fluxo_caixa::exportar_csv,
        handlers::fluxo_caixa::relatorio,

        // --- Comunicados ---
        handlers::comunicados::listar,
        handlers::comunicados::listar_meus,
        handlers::comunicados::criar,
        handlers::comunicados::marcar_leitura,
        handlers::comunicados::excluir,

        // --- Documentos ---
        handlers::documentos::listar,
        handlers::documentos::listar_meus,
        handlers::documentos::criar,
        handlers::documentos::registrar_acesso,
        handlers::documentos::excluir,

        // --- Enquetes ---
        handlers::enquetes::listar,
        handlers::enquetes::criar,
        handlers::enquetes::votar,
        handlers::enquetes::encerrar,
        handlers::enquetes::excluir,

        // --- Eventos ---
        handlers::eventos::listar,
        handlers::eventos::criar,
        handlers::eventos::atualizar,
        handlers::eventos::alternar_presenca,
        handlers::eventos::excluir,

        // --- Dashboard ---
        handlers::dashboard::resumo,
    ),
    components(
        schemas(
            models::membro::Membro,
            models::membro::MembroComCargos,
            models::membro::CargoResumido,
            models::membro::StatusMembro,
            models::mensalidade::Mensalidade,
            models::mensalidade::MensalidadeView,
            models::mensalidade::ResumoMensalidades,
            models::mensalidade::StatusMensalidade,
            models::fluxo_caixa::LancamentoCaixa,
            models::fluxo_caixa::ResumoFluxoCaixa,
            models::fluxo_caixa::TipoFluxo,
            models::comunicado::Comunicado,
            models::comunicado::ComunicadoComEstatisticas,
            models::comunicado::ComunicadoParaMembro,
            models::comunicado::AlvoDestinatario,
            models::documento::Documento,
            models::documento::DocumentoComEstatisticas,
            models::documento::DocumentoParaMembro,
            models::enquete::Enquete,
            models::enquete::EnqueteOpcao,
            models::enquete::EnqueteComResultados,
            models::enquete::OpcaoComResultado,
            models::enquete::RespostaTexto,
            models::enquete::TipoEnquete,
            models::enquete::Voto,
            models::evento::Evento,
            models::evento::ConfirmacaoPresenca,
            models::evento::EventoComPresenca,
            models::evento::ResultadoConfirmacao,
            models::dashboard::ResumoDashboard,
            handlers::membros::CriarMembroPayload,
            handlers::mensalidades::GerarMensalidadesPayload,
            handlers::mensalidades::PagarMensalidadePayload,
            handlers::mensalidades::AtualizarMensalidadePayload,
            handlers::fluxo_caixa::CriarLancamentoPayload,
            handlers::comunicados::CriarComunicadoPayload,
            handlers::documentos::CriarDocumentoPayload,
            handlers::enquetes::CriarEnquetePayload,
            handlers::enquetes::VotarPayload,
            handlers::eventos::CriarEventoPayload,
            handlers::eventos::ConfirmarPresencaPayload,
        )
    ),
    tags(
        (name = "Membros", description = "Roster do clube"),
        (name = "Mensalidades", description = "Cobrança e situação financeira dos membros"),
        (name = "Fluxo de Caixa", description = "Livro caixa do clube"),
        (name = "Comunicados", description = "Avisos com alvo e leitura"),
        (name = "Documentos", description = "Arquivos com alvo e acesso"),
        (name = "Enquetes", description = "Votações internas"),
        (name = "Eventos", description = "Agenda e confirmação de presença"),
        (name = "Dashboard", description = "Resumo da página inicial"),
    ),
    info(
        title = "Moto Clube - API de Gestão",
        description = "Backend de gestão do clube: membros, mensalidades, caixa, comunicados, documentos, enquetes e eventos.",
        version = "0.1.0"
    )
)]
pub struct ApiDoc;
