// src/services/mod.rs
pub mod coingecko;
pub mod error;
pub mod market;
pub mod news;
pub mod portfolio;
pub mod pricing;
pub mod stooq;
pub mod store;

#[cfg(test)]
pub(crate) mod stub;
