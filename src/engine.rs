use crate::bank::merge_bank_account;
use crate::credit_card::merge_credit_card;
use crate::errors::{MergeError, PipelineError};
use crate::fragment::Fragment;
use crate::ledger::Ledger;
use crate::paths::{common_root, discover, OutputPaths};
use crate::schema::{partition, Schema};
use log::{debug, error, info};
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// Everything a run needs to know about where its fragments come from.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// Files and directories to merge. Empty means "scan `scan_root`".
    pub inputs: Vec<PathBuf>,

    /// Directory walked recursively when no inputs are given.
    pub scan_root: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            inputs: Vec::new(),
            scan_root: PathBuf::from("."),
        }
    }
}

/// A ledger file produced by a run.
#[derive(Debug, PartialEq)]
pub struct WrittenLedger {
    pub schema: Schema,
    pub path: PathBuf,
    pub rows: usize,
}

/// What a run did. Groups that had nothing to write appear in neither list.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub fragments: usize,
    pub written: Vec<WrittenLedger>,
    pub failed: Vec<(Schema, MergeError)>,
}

impl RunSummary {
    fn record<T: Serialize>(
        &mut self,
        schema: Schema,
        merged: Result<Option<Ledger<T>>, MergeError>,
        path: &Path,
    ) -> Result<(), PipelineError> {
        match merged {
            Ok(Some(ledger)) => {
                ledger
                    .write_to_path(path)
                    .map_err(|source| PipelineError::Write {
                        path: path.to_path_buf(),
                        source,
                    })?;

                info!(
                    "wrote {} {} rows to {}",
                    ledger.len(),
                    schema.name(),
                    path.display()
                );
                self.written.push(WrittenLedger {
                    schema,
                    path: path.to_path_buf(),
                    rows: ledger.len(),
                });
            }
            Ok(None) => debug!("no {} ledger to write", schema.name()),
            Err(err) => {
                // A broken group never stops the other one from being written.
                error!("skipping {} ledger: {}", schema.name(), err);
                self.failed.push((schema, err));
            }
        }

        Ok(())
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "merged {} fragments: {} ledgers written, {} groups failed",
            self.fragments,
            self.written.len(),
            self.failed.len()
        )
    }
}

fn load(files: Vec<PathBuf>) -> Result<Vec<Fragment>, PipelineError> {
    files
        .into_iter()
        .map(|path| {
            info!("reading {}", path.display());
            Fragment::try_from(path.clone())
                .map_err(|source| PipelineError::Load { path, source })
        })
        .collect()
}

/// Runs the whole pipeline: discover fragments, load them, split them by
/// schema, merge each group and write its ledger next to the common root of
/// the inputs.
///
/// Failing to find any fragment, to read one, or to write a ledger aborts the
/// run. A group that cannot be merged is reported in the summary and skipped.
pub fn run(config: &Config) -> Result<RunSummary, PipelineError> {
    let files = discover(&config.inputs, &config.scan_root)?;
    if files.is_empty() {
        return Err(PipelineError::NoFragments);
    }

    let outputs = OutputPaths::for_root(&common_root(&files));
    let fragments = load(files)?;

    let mut summary = RunSummary {
        fragments: fragments.len(),
        ..RunSummary::default()
    };

    let groups = partition(fragments);
    summary.record(
        Schema::BankAccount,
        merge_bank_account(&groups.bank_account),
        &outputs.account,
    )?;
    summary.record(
        Schema::CreditCard,
        merge_credit_card(&groups.credit_card),
        &outputs.credit_card,
    )?;

    Ok(summary)
}
