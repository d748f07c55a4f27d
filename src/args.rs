use crate::engine::Config;
use clap::{App, Arg};
use std::path::PathBuf;

pub struct Args {
    pub inputs: Vec<String>,
}

impl Args {
    pub fn parse() -> Self {
        Self::from_matches(Self::app().get_matches())
    }

    fn app() -> App<'static, 'static> {
        App::new("ledger_merge")
            .version(env!("CARGO_PKG_VERSION"))
            .about("Merges extracted statement CSVs into bank account and credit card ledgers")
            .arg(
                Arg::with_name("inputs")
                    .value_name("INPUT")
                    .multiple(true)
                    .help("CSV fragments or directories to scan for them (default: **/*.csv)"),
            )
    }

    fn from_matches(matches: clap::ArgMatches) -> Self {
        Self {
            inputs: matches
                .values_of("inputs")
                .map(|values| values.map(String::from).collect())
                .unwrap_or_default(),
        }
    }
}

impl From<Args> for Config {
    fn from(args: Args) -> Self {
        Self {
            inputs: args.inputs.into_iter().map(PathBuf::from).collect(),
            ..Config::default()
        }
    }
}
