//! DTOs de la API
//!
//! Requests y responses que viajan por HTTP, separados de los modelos
//! persistidos.

pub mod common;
pub mod operator_dto;
pub mod order_dto;
pub mod route_dto;

pub use common::ApiResponse;
