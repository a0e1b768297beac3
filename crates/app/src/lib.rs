//! Cart domain, persistence contract and `PostgreSQL` store.

pub mod context;
pub mod database;
pub mod domain;
pub mod ids;

#[cfg(test)]
mod test;
