// src/services/metricas.rs

use chrono::{Datelike, Months, NaiveDate};

/// Percentual com uma casa decimal. Total zero nunca divide: devolve 0.
pub fn percentual(parte: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    ((parte as f64 / total as f64) * 1000.0).round() / 10.0
}

/// Normaliza qualquer data do mês para o primeiro dia (YYYY-MM-01)
pub fn primeiro_dia_do_mes(data: NaiveDate) -> NaiveDate {
    data.with_day(1).expect("dia 1 sempre existe")
}

/// Intervalo [primeiro dia do mês, primeiro dia do mês seguinte)
pub fn periodo_do_mes(data: NaiveDate) -> (NaiveDate, NaiveDate) {
    let inicio = primeiro_dia_do_mes(data);
    let fim = inicio
        .checked_add_months(Months::new(1))
        .expect("mês seguinte sempre existe");
    (inicio, fim)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentual_com_uma_casa_decimal() {
        assert_eq!(percentual(1, 3), 33.3);
        assert_eq!(percentual(2, 3), 66.7);
        assert_eq!(percentual(7, 8), 87.5);
        assert_eq!(percentual(5, 5), 100.0);
    }

    #[test]
    fn percentual_de_total_zero_eh_zero() {
        assert_eq!(percentual(0, 0), 0.0);
        assert_eq!(percentual(3, 0), 0.0);
    }

    #[test]
    fn periodo_cobre_o_mes_inteiro_inclusive_dezembro() {
        let (inicio, fim) = periodo_do_mes(NaiveDate::from_ymd_opt(2026, 12, 15).unwrap());
        assert_eq!(inicio, NaiveDate::from_ymd_opt(2026, 12, 1).unwrap());
        assert_eq!(fim, NaiveDate::from_ymd_opt(2027, 1, 1).unwrap());
    }
}
