//! Cart item routes

mod handlers;

pub(crate) use handlers::*;
