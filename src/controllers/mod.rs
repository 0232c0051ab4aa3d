//! Controllers de la aplicación
//!
//! Orquestación y validación de cada flujo, por encima de los
//! repositorios.

pub mod operator_controller;
pub mod order_controller;
pub mod route_controller;
