// src/models/evento.rs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Evento {
    pub id: Uuid,

    #[schema(example = "Encontro Nacional 2026")]
    pub titulo: String,

    pub descricao: Option<String>,

    #[schema(example = "Sede do clube")]
    pub local: Option<String>,

    #[schema(value_type = String, format = Date, example = "2026-09-12")]
    pub data_evento: NaiveDate,

    // Contadores desnormalizados, mantidos pelo toggle de presença
    pub confirmados: i32,
    pub acompanhantes: i32,
    pub convidados: i32,

    pub created_at: Option<DateTime<Utc>>,
}

impl Evento {
    /// Soma a confirmação aos contadores desnormalizados
    pub fn aplicar_confirmacao(&mut self, confirmacao: &ConfirmacaoPresenca) {
        self.confirmados += 1;
        self.acompanhantes += confirmacao.acompanhantes;
        self.convidados += confirmacao.convidados;
    }

    /// Devolve a confirmação, com piso em zero: um decremento duplicado vindo
    /// de cliques concorrentes nunca deixa contador negativo
    pub fn remover_confirmacao(&mut self, confirmacao: &ConfirmacaoPresenca) {
        self.confirmados = (self.confirmados - 1).max(0);
        self.acompanhantes = (self.acompanhantes - confirmacao.acompanhantes).max(0);
        self.convidados = (self.convidados - confirmacao.convidados).max(0);
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmacaoPresenca {
    pub id: Uuid,
    pub evento_id: Uuid,
    pub membro_id: Uuid,
    pub acompanhantes: i32,
    pub convidados: i32,
    pub confirmado_em: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventoComPresenca {
    #[serde(flatten)]
    pub evento: Evento,

    /// Confirmação do membro que fez a requisição, se houver
    pub minha_confirmacao: Option<ConfirmacaoPresenca>,
}

/// Resultado do toggle de presença
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResultadoConfirmacao {
    pub confirmado: bool,
    pub evento: Evento,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn evento(confirmados: i32, acompanhantes: i32, convidados: i32) -> Evento {
        Evento {
            id: Uuid::new_v4(),
            titulo: "Encontro".to_string(),
            descricao: None,
            local: None,
            data_evento: NaiveDate::from_ymd_opt(2026, 9, 12).unwrap(),
            confirmados,
            acompanhantes,
            convidados,
            created_at: None,
        }
    }

    fn confirmacao(evento_id: Uuid, acompanhantes: i32, convidados: i32) -> ConfirmacaoPresenca {
        ConfirmacaoPresenca {
            id: Uuid::new_v4(),
            evento_id,
            membro_id: Uuid::new_v4(),
            acompanhantes,
            convidados,
            confirmado_em: None,
        }
    }

    #[test]
    fn confirmar_e_desconfirmar_volta_aos_contadores_originais() {
        let mut evento = evento(5, 2, 1);
        let confirmacao = confirmacao(evento.id, 2, 3);

        evento.aplicar_confirmacao(&confirmacao);
        assert_eq!(evento.confirmados, 6);
        assert_eq!(evento.acompanhantes, 4);
        assert_eq!(evento.convidados, 4);

        evento.remover_confirmacao(&confirmacao);
        assert_eq!(evento.confirmados, 5);
        assert_eq!(evento.acompanhantes, 2);
        assert_eq!(evento.convidados, 1);
    }

    #[test]
    fn remover_nunca_deixa_contador_negativo() {
        let mut evento = evento(0, 0, 0);
        let confirmacao = confirmacao(evento.id, 4, 4);

        evento.remover_confirmacao(&confirmacao);
        assert_eq!(evento.confirmados, 0);
        assert_eq!(evento.acompanhantes, 0);
        assert_eq!(evento.convidados, 0);
    }
}
