//! Repositorios de acceso a datos

pub mod operator_repository;
pub mod order_repository;
pub mod route_repository;
