use crate::fragment::Fragment;
use csv::StringRecord;
use log::{debug, warn};

pub const TRANSACTION_DATE: &str = "Transaction Date";

/// The two column layouts a fragment can follow.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Schema {
    /// Chequing/savings statements: Date, Description, Withdrawals, Deposit
    /// and Balance.
    BankAccount,

    /// Credit card statements: Transaction Date, Posting Date, Description
    /// (or Activity Description) and Amount.
    CreditCard,
}

impl Schema {
    /// Classifies a fragment by its header row. Only the presence of a
    /// "Transaction Date" column matters.
    pub fn classify(headers: &StringRecord) -> Self {
        if headers.iter().any(|header| header == TRANSACTION_DATE) {
            Schema::CreditCard
        } else {
            Schema::BankAccount
        }
    }

    /// Columns a fragment of this schema must carry before it can be merged.
    /// Each entry lists interchangeable names, preferred name first.
    pub fn required_columns(self) -> &'static [&'static [&'static str]] {
        match self {
            Schema::BankAccount => &[
                &["Date"],
                &["Description"],
                &["Withdrawals"],
                &["Deposit"],
                &["Balance"],
            ],
            Schema::CreditCard => &[
                &[TRANSACTION_DATE],
                &["Posting Date"],
                &["Description", "Activity Description"],
                &["Amount"],
            ],
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Schema::BankAccount => "bank account",
            Schema::CreditCard => "credit card",
        }
    }
}

/// Fragments split by schema, each group in the order it was loaded.
#[derive(Debug, Default)]
pub struct Partition {
    pub bank_account: Vec<Fragment>,
    pub credit_card: Vec<Fragment>,
}

pub fn partition(fragments: Vec<Fragment>) -> Partition {
    fragments
        .into_iter()
        .fold(Partition::default(), |mut partition, fragment| {
            match fragment.schema() {
                Schema::BankAccount => partition.bank_account.push(fragment),
                Schema::CreditCard => partition.credit_card.push(fragment),
            }
            partition
        })
}

/// Selects the fragments of a group that can contribute rows, paired with
/// the column layout `locate` found in each.
///
/// Empty fragments are passed over quietly. A fragment with rows that
/// `locate` rejects is skipped with a warning naming its missing columns;
/// the rest of the group is still merged.
pub fn usable_fragments<C, F>(fragments: &[Fragment], locate: F) -> Vec<(&Fragment, C)>
where
    F: Fn(&Fragment) -> Option<C>,
{
    fragments
        .iter()
        .filter_map(|fragment| {
            if fragment.is_empty() {
                debug!("{} has no rows", fragment.source().display());
                return None;
            }

            match locate(fragment) {
                Some(columns) => Some((fragment, columns)),
                None => {
                    warn!(
                        "skipping {} fragment {}, missing columns: {}",
                        fragment.schema().name(),
                        fragment.source().display(),
                        fragment.missing_columns().join(", ")
                    );
                    None
                }
            }
        })
        .collect()
}
