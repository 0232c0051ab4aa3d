//! Modelos de datos
//!
//! Structs que mapean a las tablas del schema PostgreSQL.

pub mod operator;
pub mod order;
pub mod route;
