use ledger_merge::args::Args;
use ledger_merge::engine::{self, Config};
use log::{error, info};
use std::process;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from(Args::parse());

    let summary = match engine::run(&config) {
        Ok(summary) => summary,
        Err(err) => {
            error!("{}", err);
            process::exit(1);
        }
    };

    info!("{}", summary);
}
