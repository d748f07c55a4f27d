use crate::dates::clean_date_column;
use crate::errors::MergeError;
use crate::fragment::{Fragment, Record};
use crate::ledger::{parse_number, serialize_amount, single_line, Ledger};
use crate::schema::usable_fragments;
use log::debug;
use serde::Serialize;

/// Descriptions of the balance lines statements repeat on every page. They
/// are not transactions and are dropped from the ledger.
const BALANCE_MARKERS: [&str; 2] = ["opening balance", "closing balance"];

/// One row of the bank-account ledger.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct BankRow {
    pub date: String,
    pub description: String,

    /// Signed: negative for withdrawals, positive for deposits.
    #[serde(serialize_with = "serialize_amount")]
    pub amount: f64,

    /// Copied from the statement as written, blank when the cell was.
    pub balance: String,
}

impl BankRow {
    fn is_balance_marker(&self) -> bool {
        let description = self.description.to_lowercase();
        BALANCE_MARKERS
            .iter()
            .any(|marker| description.contains(marker))
    }
}

struct Columns {
    date: usize,
    description: usize,
    withdrawals: usize,
    deposit: usize,
    balance: usize,
}

impl Columns {
    fn locate(fragment: &Fragment) -> Option<Self> {
        Some(Self {
            date: fragment.column_index("Date")?,
            description: fragment.column_index("Description")?,
            withdrawals: fragment.column_index("Withdrawals")?,
            deposit: fragment.column_index("Deposit")?,
            balance: fragment.column_index("Balance")?,
        })
    }
}

/// A row picked out of a fragment by column name, not yet cleaned.
struct RawRow<'a> {
    date: Option<&'a str>,
    description: Option<&'a str>,
    withdrawals: Option<&'a str>,
    deposit: Option<&'a str>,
    balance: Option<&'a str>,
}

impl<'a> RawRow<'a> {
    fn pick(record: Record<'a>, columns: &Columns) -> Self {
        Self {
            date: record.get(columns.date),
            description: record.get(columns.description),
            withdrawals: record.get(columns.withdrawals),
            deposit: record.get(columns.deposit),
            balance: record.get(columns.balance),
        }
    }

    fn into_row(self, date: String) -> Result<BankRow, MergeError> {
        let withdrawals = parse_number("Withdrawals", self.withdrawals)?.unwrap_or(0.0);
        let deposit = parse_number("Deposit", self.deposit)?.unwrap_or(0.0);

        Ok(BankRow {
            date,
            description: single_line(self.description.unwrap_or_default()),
            amount: deposit - withdrawals,
            balance: self.balance.unwrap_or_default().to_string(),
        })
    }
}

/// Consolidates every bank-account fragment into one ledger.
///
/// Rows are concatenated in fragment order, dates are cleaned, withdrawals
/// and deposits are folded into one signed amount, and rows are stably
/// sorted by date. Opening and closing balance lines are dropped last.
///
/// Returns `Ok(None)` when there is nothing to write: no usable fragments,
/// no rows, or only balance lines.
pub fn merge_bank_account(
    fragments: &[Fragment],
) -> Result<Option<Ledger<BankRow>>, MergeError> {
    let raw_rows = usable_fragments(fragments, Columns::locate)
        .into_iter()
        .flat_map(|(fragment, columns)| {
            fragment
                .records()
                .map(move |record| RawRow::pick(record, &columns))
        })
        .collect::<Vec<_>>();

    if raw_rows.is_empty() {
        debug!("no bank account rows to merge");
        return Ok(None);
    }

    let dates = clean_date_column(
        "Date",
        raw_rows
            .iter()
            .map(|raw| raw.date.map(str::to_string))
            .collect(),
    )?;

    let mut rows = raw_rows
        .into_iter()
        .zip(dates)
        .map(|(raw, date)| raw.into_row(date))
        .collect::<Result<Vec<_>, _>>()?;

    // sort_by is stable, rows sharing a date keep their statement order.
    rows.sort_by(|a, b| a.date.cmp(&b.date));
    rows.retain(|row| !row.is_balance_marker());

    if rows.is_empty() {
        debug!("only balance lines in bank account rows");
        return Ok(None);
    }

    Ok(Some(Ledger::new(rows)))
}
