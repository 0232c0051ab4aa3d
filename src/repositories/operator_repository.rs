//! Repositorio de operadores
//!
//! Acceso a `operators` y sus tablas hijas `operator_documents` y
//! `operator_vehicles`. Los hijos pertenecen exclusivamente a un operador.

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::operator_dto::{CreateOperatorRequest, CreateVehicleRequest, UpdateOperatorRequest};
use crate::models::operator::{Operator, OperatorDocument, OperatorVehicle};
use crate::utils::errors::AppError;

pub struct OperatorRepository {
    pool: PgPool,
}

impl OperatorRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, request: &CreateOperatorRequest) -> Result<Operator, AppError> {
        let id = Uuid::new_v4();
        let now = Utc::now();

        let operator = sqlx::query_as::<_, Operator>(
            r#"
            INSERT INTO operators (
                id, name, lastname, second_lastname, email, phone, birth_date,
                curp, rfc, sex, offer_source, short_id, user_id, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, NULL, NULL, $12, $12)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&request.name)
        .bind(&request.lastname)
        .bind(&request.second_lastname)
        .bind(&request.email)
        .bind(&request.phone)
        .bind(request.birth_date)
        .bind(&request.curp)
        .bind(&request.rfc)
        .bind(&request.sex)
        .bind(&request.offer_source)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(operator)
    }

    pub async fn list(&self) -> Result<Vec<Operator>, AppError> {
        let operators =
            sqlx::query_as::<_, Operator>("SELECT * FROM operators ORDER BY created_at DESC")
                .fetch_all(&self.pool)
                .await?;

        Ok(operators)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Operator>, AppError> {
        let operator = sqlx::query_as::<_, Operator>("SELECT * FROM operators WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(operator)
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: &UpdateOperatorRequest,
    ) -> Result<Operator, AppError> {
        let current = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Operador no encontrado".to_string()))?;

        let operator = sqlx::query_as::<_, Operator>(
            r#"
            UPDATE operators
            SET name = $2, lastname = $3, second_lastname = $4, email = $5,
                phone = $6, updated_at = $7
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(request.name.clone().unwrap_or(current.name))
        .bind(request.lastname.clone().unwrap_or(current.lastname))
        .bind(
            request
                .second_lastname
                .clone()
                .unwrap_or(current.second_lastname),
        )
        .bind(request.email.clone().unwrap_or(current.email))
        .bind(request.phone.clone().unwrap_or(current.phone))
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(operator)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM operators WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Operador no encontrado".to_string()));
        }

        Ok(())
    }

    // ---- Documentos ----

    pub async fn insert_document(
        &self,
        operator_id: Uuid,
        document_type: &str,
        file_name: &str,
        file_path: &str,
    ) -> Result<OperatorDocument, AppError> {
        let document = sqlx::query_as::<_, OperatorDocument>(
            r#"
            INSERT INTO operator_documents (id, operator_id, document_type, file_name, file_path, uploaded_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(operator_id)
        .bind(document_type)
        .bind(file_name)
        .bind(file_path)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(document)
    }

    pub async fn list_documents(&self, operator_id: Uuid) -> Result<Vec<OperatorDocument>, AppError> {
        let documents = sqlx::query_as::<_, OperatorDocument>(
            "SELECT * FROM operator_documents WHERE operator_id = $1 ORDER BY uploaded_at DESC",
        )
        .bind(operator_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(documents)
    }

    pub async fn find_document(
        &self,
        operator_id: Uuid,
        document_id: Uuid,
    ) -> Result<Option<OperatorDocument>, AppError> {
        let document = sqlx::query_as::<_, OperatorDocument>(
            "SELECT * FROM operator_documents WHERE id = $1 AND operator_id = $2",
        )
        .bind(document_id)
        .bind(operator_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(document)
    }

    pub async fn delete_document(&self, document_id: Uuid) -> Result<(), AppError> {
        sqlx::query("DELETE FROM operator_documents WHERE id = $1")
            .bind(document_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    // ---- Vehículos ----

    pub async fn insert_vehicle(
        &self,
        operator_id: Uuid,
        request: &CreateVehicleRequest,
    ) -> Result<OperatorVehicle, AppError> {
        let now = Utc::now();

        let vehicle = sqlx::query_as::<_, OperatorVehicle>(
            r#"
            INSERT INTO operator_vehicles (id, operator_id, brand, model, year, plate, color, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $8)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(operator_id)
        .bind(&request.brand)
        .bind(&request.model)
        .bind(request.year)
        .bind(&request.plate)
        .bind(&request.color)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(vehicle)
    }

    pub async fn list_vehicles(&self, operator_id: Uuid) -> Result<Vec<OperatorVehicle>, AppError> {
        let vehicles = sqlx::query_as::<_, OperatorVehicle>(
            "SELECT * FROM operator_vehicles WHERE operator_id = $1 ORDER BY created_at DESC",
        )
        .bind(operator_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(vehicles)
    }
}
