//! Repositorio de rutas
//!
//! Acceso a las tablas `routes` y `route_orders`. La creación de una ruta
//! con sus órdenes es una transacción: o queda todo persistido (ruta,
//! asociaciones y flags de asignación) o no queda nada.

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::route::{OrderAssignment, Route, RouteOrder, RouteWithStats};
use crate::utils::errors::AppError;

/// El update condicional debe reclamar exactamente la selección completa.
/// Un faltante significa que una orden ya estaba asignada a otra ruta, o
/// que fue borrada entre la selección y el update.
fn all_orders_claimed(affected: u64, selected: usize) -> bool {
    affected == selected as u64
}

pub struct RouteRepository {
    pool: PgPool,
}

impl RouteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Crear la ruta, sus asociaciones ordenadas y marcar las órdenes como
    /// asignadas, todo en una transacción.
    ///
    /// El update de flags es condicional (`AND route_assigned = FALSE`): si
    /// alguna orden ya fue reclamada por otra ruta, o no existe, el número
    /// de filas afectadas no coincide con la selección y toda la operación
    /// se revierte con un conflicto. Dos operadores compitiendo por la
    /// misma orden no pueden ganar ambos.
    pub async fn create_with_orders(
        &self,
        alias: &str,
        assignments: &[OrderAssignment],
    ) -> Result<Route, AppError> {
        let mut tx = self.pool.begin().await?;
        let now = Utc::now();

        let route = sqlx::query_as::<_, Route>(
            r#"
            INSERT INTO routes (id, alias, status, operator_id, created_at, updated_at)
            VALUES ($1, $2, 'pending', NULL, $3, $3)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(alias)
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;

        let order_ids: Vec<Uuid> = assignments.iter().map(|a| a.order_id).collect();
        let sequence_numbers: Vec<i32> = assignments.iter().map(|a| a.sequence_number).collect();

        // Inserción en lote de las asociaciones, preservando la posición
        sqlx::query(
            r#"
            INSERT INTO route_orders (id, route_id, order_id, sequence_number, created_at)
            SELECT gen_random_uuid(), $1, t.order_id, t.sequence_number, $4
            FROM UNNEST($2::uuid[], $3::int4[]) AS t(order_id, sequence_number)
            "#,
        )
        .bind(route.id)
        .bind(&order_ids)
        .bind(&sequence_numbers)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        let result = sqlx::query(
            r#"
            UPDATE orders
            SET route_assigned = TRUE, updated_at = $2
            WHERE id = ANY($1) AND route_assigned = FALSE
            "#,
        )
        .bind(&order_ids)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        if !all_orders_claimed(result.rows_affected(), order_ids.len()) {
            // El drop de la transacción revierte la ruta y sus asociaciones
            return Err(AppError::Conflict(
                "Una o más órdenes ya fueron asignadas a otra ruta".to_string(),
            ));
        }

        tx.commit().await?;

        Ok(route)
    }

    /// Listado con número de paradas y nombre del operador asignado.
    /// `status_filter` en None lista todas.
    pub async fn list_with_stats(
        &self,
        status_filter: Option<&str>,
    ) -> Result<Vec<RouteWithStats>, AppError> {
        let routes = sqlx::query_as::<_, RouteWithStats>(
            r#"
            SELECT r.id, r.alias, r.status, r.operator_id, r.created_at, r.updated_at,
                   COUNT(ro.order_id) AS stops,
                   op.name AS operator_name, op.lastname AS operator_lastname
            FROM routes r
            LEFT JOIN route_orders ro ON ro.route_id = r.id
            LEFT JOIN operators op ON op.id = r.operator_id
            WHERE ($1::text IS NULL OR r.status = $1)
            GROUP BY r.id, op.name, op.lastname
            ORDER BY r.created_at DESC
            "#,
        )
        .bind(status_filter)
        .fetch_all(&self.pool)
        .await?;

        Ok(routes)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Route>, AppError> {
        let route = sqlx::query_as::<_, Route>("SELECT * FROM routes WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(route)
    }

    /// Asociaciones de una ruta, en orden de entrega ascendente
    pub async fn list_route_orders(&self, route_id: Uuid) -> Result<Vec<RouteOrder>, AppError> {
        let links = sqlx::query_as::<_, RouteOrder>(
            "SELECT * FROM route_orders WHERE route_id = $1 ORDER BY sequence_number ASC",
        )
        .bind(route_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(links)
    }

    pub async fn assign_operator(
        &self,
        route_id: Uuid,
        operator_id: Uuid,
    ) -> Result<Route, AppError> {
        let route = sqlx::query_as::<_, Route>(
            r#"
            UPDATE routes
            SET operator_id = $2, updated_at = $3
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(route_id)
        .bind(operator_id)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Ruta no encontrada".to_string()))?;

        Ok(route)
    }

    /// Cambiar el estado de la ruta. El valor ya viene validado por el
    /// controller contra el conjunto conocido.
    pub async fn update_status(&self, route_id: Uuid, status: &str) -> Result<Route, AppError> {
        let route = sqlx::query_as::<_, Route>(
            r#"
            UPDATE routes
            SET status = $2, updated_at = $3
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(route_id)
        .bind(status)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Ruta no encontrada".to_string()))?;

        Ok(route)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_selection_claimed() {
        assert!(all_orders_claimed(3, 3));
        assert!(all_orders_claimed(1, 1));
    }

    #[test]
    fn test_order_already_assigned_aborts_claim() {
        // Dos de tres libres: la tercera ya la ganó otra ruta
        assert!(!all_orders_claimed(2, 3));
    }

    #[test]
    fn test_order_deleted_mid_flight_aborts_claim() {
        assert!(!all_orders_claimed(0, 1));
    }
}
