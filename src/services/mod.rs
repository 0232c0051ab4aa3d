//! Services module
//!
//! Este módulo contiene la lógica que no es acceso directo a tablas:
//! parseo de importación CSV e integración con el object storage.

pub mod csv_import_service;
pub mod storage_service;
