//! Controller de órdenes
//!
//! Altas manuales, CRUD de lectura e importación masiva desde CSV.

use sqlx::PgPool;
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use crate::dto::common::ApiResponse;
use crate::dto::order_dto::{
    CreateOrderRequest, CsvImportRequest, CsvImportResponse, OrderResponse, UpdateOrderRequest,
};
use crate::repositories::order_repository::OrderRepository;
use crate::services::csv_import_service::{parse_csv, CsvImportReport, CsvOrderRow};
use crate::utils::errors::AppError;
use crate::utils::validation::validate_coordinates;

/// Separar las filas listas para insertar de las rechazadas por campos
/// requeridos faltantes. Cada fila conserva su número de línea en el
/// archivo (el header es la línea 1); los rechazos traen el campo que
/// faltó. Una fila mala nunca afecta a las demás.
pub fn screen_rows(rows: Vec<CsvOrderRow>) -> (Vec<(usize, CsvOrderRow)>, Vec<(usize, &'static str)>) {
    let mut importable = Vec::new();
    let mut rejected = Vec::new();

    for (index, row) in rows.into_iter().enumerate() {
        let line = index + 2;
        match row.missing_required() {
            Some(field) => rejected.push((line, field)),
            None => importable.push((line, row)),
        }
    }

    (importable, rejected)
}

pub struct OrderController {
    repository: OrderRepository,
}

impl OrderController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: OrderRepository::new(pool),
        }
    }

    pub async fn create(
        &self,
        request: CreateOrderRequest,
        user_id: Uuid,
    ) -> Result<ApiResponse<OrderResponse>, AppError> {
        request.validate()?;

        // Las coordenadas son opcionales pero deben venir en pareja y en rango
        match (request.lat, request.lng) {
            (Some(lat), Some(lng)) => {
                validate_coordinates(lat, lng)
                    .map_err(|_| AppError::Validation("Coordenadas inválidas".to_string()))?;
            }
            (None, None) => {}
            _ => {
                return Err(AppError::Validation(
                    "Las coordenadas requieren latitud y longitud".to_string(),
                ));
            }
        }

        let order = self.repository.create(&request, user_id).await?;

        Ok(ApiResponse::success_with_message(
            order.into(),
            "Orden creada exitosamente".to_string(),
        ))
    }

    pub async fn list(&self) -> Result<Vec<OrderResponse>, AppError> {
        let orders = self.repository.list_all().await?;
        Ok(orders.into_iter().map(OrderResponse::from).collect())
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<OrderResponse, AppError> {
        let order = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Orden no encontrada".to_string()))?;

        Ok(order.into())
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateOrderRequest,
    ) -> Result<ApiResponse<OrderResponse>, AppError> {
        request.validate()?;

        let order = self.repository.update(id, &request).await?;

        Ok(ApiResponse::success_with_message(
            order.into(),
            "Orden actualizada exitosamente".to_string(),
        ))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        self.repository.delete(id).await
    }

    /// Importación masiva: cada fila se inserta de forma independiente y
    /// el resultado es un conteo agregado. Una fila mala no tira el lote;
    /// un archivo que excede el límite se rechaza completo antes de
    /// insertar nada.
    pub async fn import_csv(
        &self,
        request: CsvImportRequest,
        user_id: Uuid,
    ) -> Result<CsvImportResponse, AppError> {
        let rows = parse_csv(&request.content)?;
        let (importable, rejected) = screen_rows(rows);

        for (line, field) in &rejected {
            warn!("Fila {} sin campo requerido '{}'", line, field);
        }

        let mut created = 0;
        let mut errors = rejected.len();

        for (line, row) in &importable {
            match self.repository.create_from_csv_row(row, user_id).await {
                Ok(_) => created += 1,
                Err(e) => {
                    warn!("Error importando fila {}: {}", line, e);
                    errors += 1;
                }
            }
        }

        let report = CsvImportReport { created, errors };
        info!(
            "Importación CSV de '{}': {} creadas, {} errores",
            request.file_name.as_deref().unwrap_or("archivo"),
            created,
            errors
        );

        Ok(CsvImportResponse {
            created,
            errors,
            message: report.message(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "street,number,int_number,neighborhood,postal_code,administrative_area,sub_administrative_area,reference,notes";

    fn csv_with_bad_third_row() -> String {
        let mut text = String::from(HEADER);
        for i in 1..=10 {
            if i == 3 {
                // Sin street
                text.push_str("\n,10,,Centro,06000,CDMX,Ciudad de México,,");
            } else {
                text.push_str(&format!(
                    "\nCalle {},10,,Centro,06000,CDMX,Ciudad de México,,",
                    i
                ));
            }
        }
        text
    }

    #[test]
    fn test_one_bad_row_out_of_ten_counts_nine_and_one() {
        let rows = parse_csv(&csv_with_bad_third_row()).unwrap();
        let (importable, rejected) = screen_rows(rows);

        assert_eq!(importable.len(), 9);
        // La tercera fila de datos es la línea 4 del archivo
        assert_eq!(rejected, vec![(4, "street")]);

        let report = CsvImportReport {
            created: importable.len(),
            errors: rejected.len(),
        };
        assert_eq!(
            report.message(),
            "Importación completada: 9 órdenes creadas, 1 errores"
        );
    }

    #[test]
    fn test_screen_preserves_file_line_numbers() {
        let text = format!(
            "{}\nCalle A,1,,Centro,06000,CDMX,Ciudad de México,,\nCalle B,2,,Centro,06000,CDMX,Ciudad de México,,",
            HEADER
        );
        let rows = parse_csv(&text).unwrap();
        let (importable, rejected) = screen_rows(rows);

        assert!(rejected.is_empty());
        let lines: Vec<usize> = importable.iter().map(|(line, _)| *line).collect();
        assert_eq!(lines, vec![2, 3]);
    }

    #[test]
    fn test_screen_all_rows_rejected() {
        let text = format!("{}\n,,,,,,,,\n,,,,,,,,", HEADER);
        let rows = parse_csv(&text).unwrap();
        let (importable, rejected) = screen_rows(rows);

        assert!(importable.is_empty());
        assert_eq!(rejected.len(), 2);
        assert_eq!(rejected[0], (2, "street"));
    }
}
