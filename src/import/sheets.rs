//! Sheet readers
//!
//! Each sheet is a CSV file with a header row. Columns are located by header
//! text, so their order does not matter and missing columns read as empty.

use std::collections::HashMap;
use std::io::Read;

use csv::{ReaderBuilder, StringRecord};

use crate::error::{SheetfinError, SheetfinResult};
use crate::models::{Card, CategoryLimit, Transaction};

use super::values::{optional_text, parse_currency, parse_date, parse_day};

/// Column positions by header text
struct Columns {
    index: HashMap<String, usize>,
}

impl Columns {
    fn new(headers: &StringRecord) -> Self {
        let index = headers
            .iter()
            .enumerate()
            .map(|(i, h)| (h.trim_start_matches('\u{feff}').trim().to_string(), i))
            .collect();
        Self { index }
    }

    /// Raw cell text, "" when the column or cell is absent
    fn get<'r>(&self, record: &'r StringRecord, header: &str) -> &'r str {
        self.index
            .get(header)
            .and_then(|&i| record.get(i))
            .unwrap_or("")
    }

    fn text(&self, record: &StringRecord, header: &str) -> String {
        self.get(record, header).trim().to_string()
    }
}

/// Read every non-blank row of a sheet and map it with `row`
fn read_rows<R, T, F>(reader: R, sheet: &str, mut row: F) -> SheetfinResult<Vec<T>>
where
    R: Read,
    F: FnMut(&Columns, &StringRecord) -> T,
{
    let mut csv_reader = ReaderBuilder::new().flexible(true).from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|e| SheetfinError::Import(format!("{}: cannot read header row: {}", sheet, e)))?;
    let columns = Columns::new(headers);

    let mut rows = Vec::new();
    for (i, result) in csv_reader.records().enumerate() {
        // Header is line 1
        let record = result.map_err(|e| {
            SheetfinError::Import(format!("{}: cannot read row {}: {}", sheet, i + 2, e))
        })?;

        if record.iter().all(|field| field.trim().is_empty()) {
            continue;
        }
        rows.push(row(&columns, &record));
    }

    tracing::debug!(sheet, rows = rows.len(), "read sheet");
    Ok(rows)
}

/// Read the `Movimentacoes` sheet
pub fn read_transactions<R: Read>(reader: R) -> SheetfinResult<Vec<Transaction>> {
    read_rows(reader, "Movimentacoes", |c, r| Transaction {
        id: c.text(r, "ID_Movimentacao"),
        movement_date: parse_date(c.get(r, "Data da Movimentação")),
        payment_date: parse_date(c.get(r, "Data do Pagamento")),
        kind: c.text(r, "Tipo"),
        category: c.text(r, "Categoria"),
        description: c.text(r, "Descrição"),
        amount: parse_currency(c.get(r, "Valor")),
        payment_method: c.text(r, "Método de Pagamento"),
        counterparty_account: optional_text(c.get(r, "Conta de Origem/Destino")),
        payment_form: c.text(r, "Forma de Pagamento"),
        installment_number: c.text(r, "Nº da Parcela"),
        status: c.text(r, "Situação"),
        payment_reference: c.text(r, "Ref. Pagamento"),
        movement_reference: c.text(r, "Ref. Movimentação"),
        classification_hint: c.text(r, "Classificação.1"),
        week_of_month: c.text(r, "Semana_do_Mês"),
    })
}

/// Read the `Despesas` sheet
pub fn read_category_limits<R: Read>(reader: R) -> SheetfinResult<Vec<CategoryLimit>> {
    read_rows(reader, "Despesas", |c, r| CategoryLimit {
        category: c.text(r, "Categoria"),
        classification: c.text(r, "Classificação"),
        monthly_limit: parse_currency(c.get(r, "Limite_Gastos")),
        examples: c.text(r, "Exemplos"),
    })
}

/// Read the `Cartoes` sheet
pub fn read_cards<R: Read>(reader: R) -> SheetfinResult<Vec<Card>> {
    read_rows(reader, "Cartoes", |c, r| Card {
        name: c.text(r, "Nome do Cartão"),
        closing_day: parse_day(c.get(r, "Data do Fechamento da Fatura")),
        due_day: parse_day(c.get(r, "Data do Vencimento da Fatura")),
        credit_limit: parse_currency(c.get(r, "Limite Total do Cartão")),
    })
}
