//! Repositorio de órdenes
//!
//! Acceso a la tabla `orders`: altas manuales, altas por importación CSV,
//! consulta del pool de órdenes sin asignar y CRUD de lectura.

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::order_dto::{CreateOrderRequest, UpdateOrderRequest};
use crate::models::order::Order;
use crate::services::csv_import_service::CsvOrderRow;
use crate::utils::errors::AppError;

/// País por defecto del dashboard
pub const DEFAULT_COUNTRY: &str = "MX";

pub struct OrderRepository {
    pool: PgPool,
}

impl OrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, request: &CreateOrderRequest, user_id: Uuid) -> Result<Order, AppError> {
        let id = Uuid::new_v4();
        let now = Utc::now();

        let order = sqlx::query_as::<_, Order>(
            r#"
            INSERT INTO orders (
                id, street, number, int_number, neighborhood, postal_code,
                administrative_area, sub_administrative_area, country,
                lat, lng, reference, notes, is_manual, route_assigned,
                user_id, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, TRUE, FALSE, $14, $15, $15)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&request.street)
        .bind(&request.number)
        .bind(&request.int_number)
        .bind(&request.neighborhood)
        .bind(&request.postal_code)
        .bind(&request.administrative_area)
        .bind(&request.sub_administrative_area)
        .bind(DEFAULT_COUNTRY)
        .bind(request.lat)
        .bind(request.lng)
        .bind(&request.reference)
        .bind(&request.notes)
        .bind(user_id)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(order)
    }

    /// Alta de una fila importada de CSV. Los campos requeridos viajan como
    /// Option y es la base quien rechaza los NULL; la importación cuenta el
    /// rechazo como error de fila y continúa.
    pub async fn create_from_csv_row(
        &self,
        row: &CsvOrderRow,
        user_id: Uuid,
    ) -> Result<Order, AppError> {
        let id = Uuid::new_v4();
        let now = Utc::now();

        let order = sqlx::query_as::<_, Order>(
            r#"
            INSERT INTO orders (
                id, street, number, int_number, neighborhood, postal_code,
                administrative_area, sub_administrative_area, country,
                reference, notes, is_manual, route_assigned,
                user_id, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, TRUE, FALSE, $12, $13, $13)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&row.street)
        .bind(&row.number)
        .bind(&row.int_number)
        .bind(&row.neighborhood)
        .bind(&row.postal_code)
        .bind(&row.administrative_area)
        .bind(&row.sub_administrative_area)
        .bind(DEFAULT_COUNTRY)
        .bind(&row.reference)
        .bind(&row.notes)
        .bind(user_id)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(order)
    }

    /// Pool de candidatas para crear rutas: órdenes sin asignar, más
    /// recientes primero. Sin paginación; el conjunto vacío es un estado
    /// normal.
    pub async fn list_unassigned(&self) -> Result<Vec<Order>, AppError> {
        let orders = sqlx::query_as::<_, Order>(
            "SELECT * FROM orders WHERE route_assigned = FALSE ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(orders)
    }

    pub async fn list_all(&self) -> Result<Vec<Order>, AppError> {
        let orders =
            sqlx::query_as::<_, Order>("SELECT * FROM orders ORDER BY created_at DESC")
                .fetch_all(&self.pool)
                .await?;

        Ok(orders)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Order>, AppError> {
        let order = sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(order)
    }

    pub async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Order>, AppError> {
        let orders = sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE id = ANY($1)")
            .bind(ids)
            .fetch_all(&self.pool)
            .await?;

        Ok(orders)
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: &UpdateOrderRequest,
    ) -> Result<Order, AppError> {
        let current = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Orden no encontrada".to_string()))?;

        let order = sqlx::query_as::<_, Order>(
            r#"
            UPDATE orders
            SET street = $2, number = $3, int_number = $4, neighborhood = $5,
                postal_code = $6, lat = $7, lng = $8, reference = $9, notes = $10,
                updated_at = $11
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(request.street.clone().unwrap_or(current.street))
        .bind(request.number.clone().unwrap_or(current.number))
        .bind(request.int_number.clone().or(current.int_number))
        .bind(request.neighborhood.clone().unwrap_or(current.neighborhood))
        .bind(request.postal_code.clone().unwrap_or(current.postal_code))
        .bind(request.lat.or(current.lat))
        .bind(request.lng.or(current.lng))
        .bind(request.reference.clone().or(current.reference))
        .bind(request.notes.clone().or(current.notes))
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(order)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM orders WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Orden no encontrada".to_string()));
        }

        Ok(())
    }
}
