// src/services/export_service.rs
//
// Exportações para planilha e impressão. O CSV sai com ; como separador e BOM
// UTF-8 na frente, que é o que o Excel em português espera; valores monetários
// usam vírgula como separador decimal. O "PDF" é um documento HTML completo
// servido para o diálogo de impressão do navegador, não um codificador de PDF.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::models::{
    fluxo_caixa::{LancamentoCaixa, ResumoFluxoCaixa, TipoFluxo},
    mensalidade::MensalidadeView,
};

/// Marca de ordem de bytes UTF-8, na frente de todo CSV gerado
pub const BOM: &str = "\u{feff}";

/// R$ com vírgula decimal e duas casas: 1234.5 -> "1234,50"
pub fn formatar_moeda(valor: Decimal) -> String {
    format!("{:.2}", valor).replace('.', ",")
}

/// `<nome>_<data ISO>.csv`
pub fn nome_arquivo_csv(prefixo: &str, data: NaiveDate) -> String {
    format!("{}_{}.csv", prefixo, data.format("%Y-%m-%d"))
}

/// Uma linha de cabeçalho + uma linha por registro, separadas por \n. Os
/// valores entram como estão: o consumidor é planilha tolerante ao ; e os
/// campos do domínio não carregam quebra de linha.
pub fn gerar_csv(cabecalho: &[&str], linhas: &[Vec<String>]) -> String {
    let mut saida = String::from(BOM);
    saida.push_str(&cabecalho.join(";"));

    for linha in linhas {
        saida.push('\n');
        saida.push_str(&linha.join(";"));
    }

    saida
}

pub fn csv_mensalidades(views: &[MensalidadeView]) -> String {
    let cabecalho = [
        "Membro",
        "Mês de referência",
        "Valor",
        "Vencimento",
        "Pagamento",
        "Status",
        "Dias de atraso",
    ];

    let linhas: Vec<Vec<String>> = views
        .iter()
        .map(|view| {
            vec![
                view.nome_de_guerra.clone(),
                view.mensalidade.mes_referencia.format("%Y-%m").to_string(),
                formatar_moeda(view.mensalidade.valor),
                view.mensalidade.data_vencimento.format("%d/%m/%Y").to_string(),
                view.mensalidade
                    .data_pagamento
                    .map(|d| d.format("%d/%m/%Y").to_string())
                    .unwrap_or_default(),
                view.status_derivado.rotulo().to_string(),
                view.dias_atraso.to_string(),
            ]
        })
        .collect();

    gerar_csv(&cabecalho, &linhas)
}

pub fn csv_fluxo_caixa(lancamentos: &[LancamentoCaixa]) -> String {
    let cabecalho = ["Data", "Tipo", "Categoria", "Descrição", "Valor", "Comprovante"];

    let linhas: Vec<Vec<String>> = lancamentos
        .iter()
        .map(|lancamento| {
            let tipo = match lancamento.tipo {
                TipoFluxo::Entrada => "Entrada",
                TipoFluxo::Saida => "Saída",
            };
            vec![
                lancamento.data.format("%d/%m/%Y").to_string(),
                tipo.to_string(),
                lancamento.categoria.clone(),
                lancamento.descricao.clone(),
                formatar_moeda(lancamento.valor),
                if lancamento.comprovante_pendente() {
                    "Pendente".to_string()
                } else {
                    "OK".to_string()
                },
            ]
        })
        .collect();

    gerar_csv(&cabecalho, &linhas)
}

/// Documento HTML completo (CSS embutido, tabela zebrada) que abre o diálogo
/// de impressão sozinho.
pub fn relatorio_html_fluxo_caixa(
    mes: NaiveDate,
    lancamentos: &[LancamentoCaixa],
    resumo: &ResumoFluxoCaixa,
) -> String {
    let mut linhas = String::new();
    for lancamento in lancamentos {
        let tipo = match lancamento.tipo {
            TipoFluxo::Entrada => "Entrada",
            TipoFluxo::Saida => "Saída",
        };
        linhas.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td class=\"num\">R$ {}</td></tr>\n",
            lancamento.data.format("%d/%m/%Y"),
            tipo,
            lancamento.categoria,
            lancamento.descricao,
            formatar_moeda(lancamento.valor),
        ));
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="pt-BR">
<head>
<meta charset="utf-8">
<title>Fluxo de Caixa - {mes}</title>
<style>
  body {{ font-family: Arial, Helvetica, sans-serif; margin: 24px; color: #222; }}
  h1 {{ font-size: 20px; }}
  table {{ border-collapse: collapse; width: 100%; margin-top: 16px; }}
  th, td {{ border: 1px solid #ccc; padding: 6px 8px; font-size: 12px; text-align: left; }}
  th {{ background: #333; color: #fff; }}
  tr:nth-child(even) {{ background: #f2f2f2; }}
  td.num {{ text-align: right; }}
  .resumo {{ margin-top: 16px; font-size: 13px; }}
</style>
</head>
<body>
<h1>Fluxo de Caixa — {mes}</h1>
<table>
<thead>
<tr><th>Data</th><th>Tipo</th><th>Categoria</th><th>Descrição</th><th>Valor</th></tr>
</thead>
<tbody>
{linhas}</tbody>
</table>
<p class="resumo">
  Entradas: R$ {entradas} · Saídas: R$ {saidas} · <strong>Saldo: R$ {saldo}</strong>
</p>
<script>window.print()</script>
</body>
</html>
"#,
        mes = mes.format("%m/%Y"),
        linhas = linhas,
        entradas = formatar_moeda(resumo.total_entradas),
        saidas = formatar_moeda(resumo.total_saidas),
        saldo = formatar_moeda(resumo.saldo),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::fluxo_caixa_service::resumir_fluxo;
    use uuid::Uuid;

    fn lancamento(tipo: TipoFluxo, valor: i64) -> LancamentoCaixa {
        LancamentoCaixa {
            id: Uuid::new_v4(),
            tipo,
            categoria: "Eventos".to_string(),
            descricao: "Aluguel do salão".to_string(),
            valor: Decimal::new(valor, 2),
            data: NaiveDate::from_ymd_opt(2026, 8, 5).unwrap(),
            anexo_url: None,
            created_at: None,
        }
    }

    #[test]
    fn csv_comeca_com_bom_e_tem_uma_linha_por_registro() {
        let lancamentos = vec![
            lancamento(TipoFluxo::Entrada, 45000),
            lancamento(TipoFluxo::Saida, 20000),
        ];

        let csv = csv_fluxo_caixa(&lancamentos);

        assert!(csv.starts_with(BOM));
        assert!(csv.as_bytes().starts_with(&[0xEF, 0xBB, 0xBF]));

        let linhas: Vec<&str> = csv.lines().collect();
        assert_eq!(linhas.len(), 3); // cabeçalho + 2 registros

        // cada linha tem o mesmo número de separadores do cabeçalho
        let separadores = linhas[0].matches(';').count();
        for linha in &linhas[1..] {
            assert_eq!(linha.matches(';').count(), separadores);
        }
    }

    #[test]
    fn moeda_sai_com_virgula_decimal() {
        assert_eq!(formatar_moeda(Decimal::new(123450, 2)), "1234,50");
        assert_eq!(formatar_moeda(Decimal::new(450, 0)), "450,00");
    }

    #[test]
    fn nome_de_arquivo_carrega_a_data_iso() {
        let data = NaiveDate::from_ymd_opt(2026, 8, 6).unwrap();
        assert_eq!(
            nome_arquivo_csv("fluxo_caixa", data),
            "fluxo_caixa_2026-08-06.csv"
        );
    }

    #[test]
    fn relatorio_html_tem_tabela_zebrada_e_saldo() {
        let lancamentos = vec![lancamento(TipoFluxo::Entrada, 45000)];
        let resumo = resumir_fluxo(&lancamentos);
        let mes = NaiveDate::from_ymd_opt(2026, 8, 1).unwrap();

        let html = relatorio_html_fluxo_caixa(mes, &lancamentos, &resumo);

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("nth-child(even)"));
        assert!(html.contains("Saldo: R$ 450,00"));
        assert!(html.contains("window.print()"));
    }
}
