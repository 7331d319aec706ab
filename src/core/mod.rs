pub mod aggregate;
pub mod calculator;
pub mod clock;
pub mod del;
pub mod edit;
pub mod ledger;
pub mod rates;
