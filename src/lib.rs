pub mod args;
pub mod bank;
pub mod credit_card;
pub mod dates;
pub mod engine;
pub mod errors;
pub mod fragment;
pub mod ledger;
pub mod paths;
pub mod schema;
