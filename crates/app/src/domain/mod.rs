//! Cartly Domain Concerns

pub mod carts;
