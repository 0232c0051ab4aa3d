//! Backend de operaciones logísticas de última milla: órdenes, rutas
//! con asignación ordenada de entregas y operadores con sus documentos.

pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;
