//! Controller de rutas
//!
//! Orquesta el flujo de asignación: consulta del pool de órdenes sin
//! asignar, creación de la ruta con sus órdenes en orden de selección,
//! y lecturas de listado/detalle.

use sqlx::PgPool;
use tracing::warn;
use uuid::Uuid;

use crate::dto::common::ApiResponse;
use crate::dto::order_dto::OrderResponse;
use crate::dto::route_dto::{
    CreateRouteRequest, RouteDetailResponse, RouteListResponse, RouteResponse,
};
use crate::models::order::{Order, OrderWithSequence};
use crate::models::route::{OrderAssignment, RouteOrder, RouteStatus};
use crate::repositories::order_repository::OrderRepository;
use crate::repositories::route_repository::RouteRepository;
use crate::utils::errors::AppError;

/// Reintentos automáticos para lecturas con fallas transitorias.
/// Las escrituras nunca se reintentan solas; eso lo decide el usuario.
const READ_RETRY_ATTEMPTS: u32 = 2;

/// Validar las precondiciones de creación antes de tocar la base.
/// Devuelve el alias ya recortado.
pub fn validate_create_request(alias: &str, order_ids: &[Uuid]) -> Result<String, AppError> {
    let alias = alias.trim();
    if alias.is_empty() {
        return Err(AppError::Validation("El alias es requerido".to_string()));
    }

    if order_ids.is_empty() {
        return Err(AppError::Validation(
            "Selecciona al menos una orden".to_string(),
        ));
    }

    let mut seen = std::collections::HashSet::new();
    for id in order_ids {
        if !seen.insert(id) {
            return Err(AppError::Validation(
                "La selección contiene órdenes repetidas".to_string(),
            ));
        }
    }

    Ok(alias.to_string())
}

/// Posiciones de entrega 1-based en el orden de selección, nunca
/// re-ordenadas.
pub fn build_assignments(order_ids: &[Uuid]) -> Vec<OrderAssignment> {
    order_ids
        .iter()
        .enumerate()
        .map(|(index, order_id)| OrderAssignment {
            order_id: *order_id,
            sequence_number: (index + 1) as i32,
        })
        .collect()
}

/// Unir asociaciones con sus órdenes, ordenadas por posición de entrega.
/// Una asociación que apunta a una orden borrada se descarta del resultado
/// (se registra en los logs, no se expone al usuario).
pub fn merge_orders_with_sequence(
    links: &[RouteOrder],
    orders: Vec<Order>,
) -> Vec<OrderWithSequence> {
    let mut by_id: std::collections::HashMap<Uuid, Order> =
        orders.into_iter().map(|o| (o.id, o)).collect();

    let mut merged: Vec<OrderWithSequence> = links
        .iter()
        .filter_map(|link| match by_id.remove(&link.order_id) {
            Some(order) => Some(OrderWithSequence {
                order,
                sequence_number: link.sequence_number,
            }),
            None => {
                warn!(
                    "route_orders {} referencia la orden inexistente {}",
                    link.id, link.order_id
                );
                None
            }
        })
        .collect();

    merged.sort_by_key(|entry| entry.sequence_number);
    merged
}

pub struct RouteController {
    routes: RouteRepository,
    orders: OrderRepository,
}

impl RouteController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            routes: RouteRepository::new(pool.clone()),
            orders: OrderRepository::new(pool),
        }
    }

    /// Pool de candidatas para armar una ruta. Lista vacía es normal.
    pub async fn list_unassigned_orders(&self) -> Result<Vec<OrderResponse>, AppError> {
        let mut attempt = 0;
        let orders = loop {
            match self.orders.list_unassigned().await {
                Ok(orders) => break orders,
                Err(e) if attempt < READ_RETRY_ATTEMPTS && e.is_transient() => {
                    attempt += 1;
                    warn!(
                        "Lectura de órdenes sin asignar falló (intento {}): {}",
                        attempt, e
                    );
                }
                Err(e) => return Err(e),
            }
        };

        Ok(orders.into_iter().map(OrderResponse::from).collect())
    }

    /// Crear la ruta con sus órdenes. Las precondiciones se validan antes
    /// de cualquier escritura; los tres pasos de escritura viajan en una
    /// sola transacción dentro del repositorio.
    pub async fn create(
        &self,
        request: CreateRouteRequest,
    ) -> Result<ApiResponse<RouteResponse>, AppError> {
        let alias = validate_create_request(&request.alias, &request.order_ids)?;
        let assignments = build_assignments(&request.order_ids);

        let route = self.routes.create_with_orders(&alias, &assignments).await?;

        Ok(ApiResponse::success_with_message(
            route.into(),
            "Ruta creada exitosamente".to_string(),
        ))
    }

    /// Listado de rutas con paradas y operador. `todas` (o sin filtro)
    /// lista todo; un filtro fuera del conjunto conocido es un error de
    /// validación.
    pub async fn list(&self, status: Option<String>) -> Result<Vec<RouteListResponse>, AppError> {
        let filter = match status.as_deref() {
            None | Some("") | Some("todas") => None,
            Some(raw) => Some(RouteStatus::parse(raw).ok_or_else(|| {
                AppError::Validation(format!("Estado de ruta desconocido: '{}'", raw))
            })?),
        };
        let filter_str = filter.map(|s| s.as_str());

        let mut attempt = 0;
        let rows = loop {
            match self.routes.list_with_stats(filter_str).await {
                Ok(rows) => break rows,
                Err(e) if attempt < READ_RETRY_ATTEMPTS && e.is_transient() => {
                    attempt += 1;
                    warn!("Lectura de rutas falló (intento {}): {}", attempt, e);
                }
                Err(e) => return Err(e),
            }
        };

        Ok(rows.into_iter().map(RouteListResponse::from).collect())
    }

    /// Detalle de la ruta: sus órdenes en orden de entrega ascendente.
    /// Cero órdenes es una lista vacía, no un error.
    pub async fn detail(&self, route_id: Uuid) -> Result<RouteDetailResponse, AppError> {
        let route = self
            .routes
            .find_by_id(route_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Ruta no encontrada".to_string()))?;

        let links = self.routes.list_route_orders(route_id).await?;
        if links.is_empty() {
            return Ok(RouteDetailResponse {
                route: route.into(),
                orders: vec![],
            });
        }

        let order_ids: Vec<Uuid> = links.iter().map(|link| link.order_id).collect();
        let orders = self.orders.find_by_ids(&order_ids).await?;

        let merged = merge_orders_with_sequence(&links, orders);

        Ok(RouteDetailResponse {
            route: route.into(),
            orders: merged.into_iter().map(Into::into).collect(),
        })
    }

    pub async fn assign_operator(
        &self,
        route_id: Uuid,
        operator_id: Uuid,
    ) -> Result<ApiResponse<RouteResponse>, AppError> {
        let route = self.routes.assign_operator(route_id, operator_id).await?;

        Ok(ApiResponse::success_with_message(
            route.into(),
            "Operador asignado exitosamente".to_string(),
        ))
    }

    pub async fn update_status(
        &self,
        route_id: Uuid,
        status: &str,
    ) -> Result<ApiResponse<RouteResponse>, AppError> {
        let status = RouteStatus::parse(status).ok_or_else(|| {
            AppError::Validation(format!("Estado de ruta desconocido: '{}'", status))
        })?;

        let route = self.routes.update_status(route_id, status.as_str()).await?;

        Ok(ApiResponse::success_with_message(
            route.into(),
            "Estado de la ruta actualizado".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn make_order(id: Uuid) -> Order {
        Order {
            id,
            street: "Av Insurgentes".to_string(),
            number: "123".to_string(),
            int_number: None,
            neighborhood: "Condesa".to_string(),
            postal_code: "06140".to_string(),
            administrative_area: "CDMX".to_string(),
            sub_administrative_area: "Ciudad de México".to_string(),
            country: "MX".to_string(),
            lat: None,
            lng: None,
            reference: None,
            notes: None,
            is_manual: true,
            route_assigned: true,
            user_id: Uuid::new_v4(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn make_link(route_id: Uuid, order_id: Uuid, seq: i32) -> RouteOrder {
        RouteOrder {
            id: Uuid::new_v4(),
            route_id,
            order_id,
            sequence_number: seq,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_empty_alias_rejected_before_any_write() {
        let result = validate_create_request("", &[Uuid::new_v4()]);
        assert!(matches!(result, Err(AppError::Validation(_))));

        let result = validate_create_request("   ", &[Uuid::new_v4()]);
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_empty_selection_rejected_before_any_write() {
        let result = validate_create_request("Zona Norte", &[]);
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_duplicate_selection_rejected() {
        let id = Uuid::new_v4();
        let result = validate_create_request("Zona Norte", &[id, Uuid::new_v4(), id]);
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_valid_request_returns_trimmed_alias() {
        let alias = validate_create_request("  Zona Norte - Mañana  ", &[Uuid::new_v4()]).unwrap();
        assert_eq!(alias, "Zona Norte - Mañana");
    }

    #[test]
    fn test_sequence_reflects_selection_order() {
        let o3 = Uuid::new_v4();
        let o1 = Uuid::new_v4();
        let o2 = Uuid::new_v4();

        let assignments = build_assignments(&[o3, o1, o2]);

        assert_eq!(
            assignments,
            vec![
                OrderAssignment {
                    order_id: o3,
                    sequence_number: 1
                },
                OrderAssignment {
                    order_id: o1,
                    sequence_number: 2
                },
                OrderAssignment {
                    order_id: o2,
                    sequence_number: 3
                },
            ]
        );
    }

    #[test]
    fn test_merge_sorts_by_sequence_regardless_of_fetch_order() {
        let route_id = Uuid::new_v4();
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let c = Uuid::new_v4();

        // Asociaciones desordenadas y órdenes en otro orden distinto
        let links = vec![
            make_link(route_id, b, 2),
            make_link(route_id, c, 3),
            make_link(route_id, a, 1),
        ];
        let orders = vec![make_order(c), make_order(a), make_order(b)];

        let merged = merge_orders_with_sequence(&links, orders);

        let sequences: Vec<i32> = merged.iter().map(|e| e.sequence_number).collect();
        assert_eq!(sequences, vec![1, 2, 3]);
        let ids: Vec<Uuid> = merged.iter().map(|e| e.order.id).collect();
        assert_eq!(ids, vec![a, b, c]);
    }

    #[test]
    fn test_merge_drops_dangling_links() {
        let route_id = Uuid::new_v4();
        let existing = Uuid::new_v4();
        let deleted = Uuid::new_v4();

        let links = vec![
            make_link(route_id, existing, 1),
            make_link(route_id, deleted, 2),
        ];
        let orders = vec![make_order(existing)];

        let merged = merge_orders_with_sequence(&links, orders);

        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].order.id, existing);
    }

    #[test]
    fn test_merge_empty_route_is_empty_not_error() {
        let merged = merge_orders_with_sequence(&[], vec![]);
        assert!(merged.is_empty());
    }
}
