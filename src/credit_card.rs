use crate::dates::clean_date_column;
use crate::errors::MergeError;
use crate::fragment::{Fragment, Record};
use crate::ledger::{parse_number, serialize_optional_amount, single_line, Ledger};
use crate::schema::{usable_fragments, TRANSACTION_DATE};
use log::debug;
use serde::Serialize;

const POSTING_DATE: &str = "Posting Date";

/// Some extractions label the description column this way instead.
const ACTIVITY_DESCRIPTION: &str = "Activity Description";

/// One row of the credit-card ledger.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CardRow {
    #[serde(rename = "Transaction Date")]
    pub transaction_date: String,

    #[serde(rename = "Posting Date")]
    pub posting_date: String,

    #[serde(rename = "Description")]
    pub description: String,

    /// Signed: negative for purchases and charges, positive for credits and
    /// refunds. A blank source amount stays blank.
    #[serde(rename = "Amount", serialize_with = "serialize_optional_amount")]
    pub amount: Option<f64>,
}

struct Columns {
    transaction_date: usize,
    posting_date: usize,
    description: usize,
    amount: usize,
}

impl Columns {
    fn locate(fragment: &Fragment) -> Option<Self> {
        Some(Self {
            transaction_date: fragment.column_index(TRANSACTION_DATE)?,
            posting_date: fragment.column_index(POSTING_DATE)?,
            // "Description" wins when a fragment carries both.
            description: fragment
                .first_column_index(&["Description", ACTIVITY_DESCRIPTION])?,
            amount: fragment.column_index("Amount")?,
        })
    }
}

struct RawRow<'a> {
    transaction_date: Option<&'a str>,
    posting_date: Option<&'a str>,
    description: Option<&'a str>,
    amount: Option<&'a str>,
}

impl<'a> RawRow<'a> {
    fn pick(record: Record<'a>, columns: &Columns) -> Self {
        Self {
            transaction_date: record.get(columns.transaction_date),
            posting_date: record.get(columns.posting_date),
            description: record.get(columns.description),
            amount: record.get(columns.amount),
        }
    }

    fn into_row(
        self,
        transaction_date: String,
        posting_date: String,
    ) -> Result<CardRow, MergeError> {
        // Statements list purchases as positive amounts.
        let amount = parse_number("Amount", self.amount)?.map(|amount| -amount);

        Ok(CardRow {
            transaction_date,
            posting_date,
            description: single_line(self.description.unwrap_or_default()),
            amount,
        })
    }
}

fn date_cells<'a, F>(raw_rows: &[RawRow<'a>], pick: F) -> Vec<Option<String>>
where
    F: Fn(&RawRow<'a>) -> Option<&'a str>,
{
    raw_rows
        .iter()
        .map(|raw| pick(raw).map(str::to_string))
        .collect()
}

/// Consolidates every credit-card fragment into one ledger.
///
/// Both date columns are cleaned independently, amounts are negated so that
/// charges come out negative, and rows are stably sorted by transaction
/// date. No rows are filtered out.
///
/// Returns `Ok(None)` when the group has no usable rows.
pub fn merge_credit_card(
    fragments: &[Fragment],
) -> Result<Option<Ledger<CardRow>>, MergeError> {
    let raw_rows = usable_fragments(fragments, Columns::locate)
        .into_iter()
        .flat_map(|(fragment, columns)| {
            fragment
                .records()
                .map(move |record| RawRow::pick(record, &columns))
        })
        .collect::<Vec<_>>();

    if raw_rows.is_empty() {
        debug!("no credit card rows to merge");
        return Ok(None);
    }

    let transaction_dates = clean_date_column(
        TRANSACTION_DATE,
        date_cells(&raw_rows, |raw| raw.transaction_date),
    )?;
    let posting_dates =
        clean_date_column(POSTING_DATE, date_cells(&raw_rows, |raw| raw.posting_date))?;

    let mut rows = raw_rows
        .into_iter()
        .zip(transaction_dates.into_iter().zip(posting_dates))
        .map(|(raw, (transaction_date, posting_date))| {
            raw.into_row(transaction_date, posting_date)
        })
        .collect::<Result<Vec<_>, _>>()?;

    rows.sort_by(|a, b| a.transaction_date.cmp(&b.transaction_date));

    Ok(Some(Ledger::new(rows)))
}
