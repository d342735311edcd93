use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Registro não encontrado")]
    NaoEncontrado,

    #[error("Membro não encontrado")]
    MembroNaoEncontrado,

    #[error("Cabeçalho x-membro-id ausente ou inválido")]
    MembroNaoIdentificado,

    #[error("Já existe uma operação em andamento para este registro")]
    OperacaoEmAndamento,

    #[error("Enquete encerrada")]
    EnqueteEncerrada,

    #[error("Voto inválido: {0}")]
    VotoInvalido(&'static str),

    #[error("Requisição inválida: {0}")]
    RequisicaoInvalida(&'static str),

    // Variante para erros de banco de dados
    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),
}

/// Violação de chave única: a única classe de erro de banco que alguns
/// fluxos (marcar como lido, registrar acesso) engolem como no-op.
pub fn eh_violacao_unicidade(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(|db_err| db_err.is_unique_violation())
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            // Retorna todos os detalhes da validação.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "Um ou mais campos são inválidos.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::NaoEncontrado => (StatusCode::NOT_FOUND, "Registro não encontrado."),
            AppError::MembroNaoEncontrado => (StatusCode::NOT_FOUND, "Membro não encontrado."),
            AppError::MembroNaoIdentificado => (
                StatusCode::BAD_REQUEST,
                "Cabeçalho x-membro-id ausente ou inválido.",
            ),
            AppError::OperacaoEmAndamento => (
                StatusCode::CONFLICT,
                "Já existe uma operação em andamento para este registro.",
            ),
            AppError::EnqueteEncerrada => {
                (StatusCode::UNPROCESSABLE_ENTITY, "Esta enquete já foi encerrada.")
            }
            AppError::VotoInvalido(motivo) => {
                let body = Json(json!({ "error": motivo }));
                return (StatusCode::UNPROCESSABLE_ENTITY, body).into_response();
            }
            AppError::RequisicaoInvalida(motivo) => {
                let body = Json(json!({ "error": motivo }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }

            // Todos os outros erros (DatabaseError, InternalServerError) viram 500.
            // O `tracing` loga a mensagem detalhada que `thiserror` nos deu.
            ref e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Ocorreu um erro inesperado.")
            }
        };

        // Resposta padrão para erros simples que só têm uma mensagem.
        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as StdError;
    use std::fmt;

    #[derive(Debug)]
    struct ErroUnicidadeFake;

    impl fmt::Display for ErroUnicidadeFake {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "duplicate key value violates unique constraint")
        }
    }

    impl StdError for ErroUnicidadeFake {}

    impl sqlx::error::DatabaseError for ErroUnicidadeFake {
        fn message(&self) -> &str {
            "duplicate key value violates unique constraint"
        }

        fn kind(&self) -> sqlx::error::ErrorKind {
            sqlx::error::ErrorKind::UniqueViolation
        }

        fn as_error(&self) -> &(dyn StdError + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn StdError + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn StdError + Send + Sync + 'static> {
            self
        }
    }

    #[test]
    fn classifica_violacao_de_unicidade() {
        let err = sqlx::Error::Database(Box::new(ErroUnicidadeFake));
        assert!(eh_violacao_unicidade(&err));
    }

    #[test]
    fn nao_classifica_outros_erros_como_duplicidade() {
        assert!(!eh_violacao_unicidade(&sqlx::Error::RowNotFound));
    }
}
