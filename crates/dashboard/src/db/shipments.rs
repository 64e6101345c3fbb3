//! Shipment repository for database operations.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use streamline_core::{ShipmentId, ShipmentStatus, TrackingCode, UserId, Weight};

use super::constraint_error;
use crate::backend::BackendError;
use crate::models::{NewShipment, Shipment, ShipmentQuery, StatusUpdate};

const SHIPMENT_COLUMNS: &str = "id, tracking_id, customer_id, origin, destination, status, \
     service_type, weight, estimated_delivery, actual_delivery, notes, created_at";

#[derive(sqlx::FromRow)]
struct ShipmentRow {
    id: Uuid,
    tracking_id: String,
    customer_id: Option<Uuid>,
    origin: String,
    destination: String,
    status: ShipmentStatus,
    service_type: String,
    weight: Decimal,
    estimated_delivery: Option<NaiveDate>,
    actual_delivery: Option<NaiveDate>,
    notes: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<ShipmentRow> for Shipment {
    type Error = BackendError;

    fn try_from(r: ShipmentRow) -> Result<Self, Self::Error> {
        let tracking_code = TrackingCode::parse(&r.tracking_id).map_err(|e| {
            BackendError::DataCorruption(format!("invalid tracking code in database: {e}"))
        })?;
        let weight = Weight::new(r.weight).map_err(|e| {
            BackendError::DataCorruption(format!("invalid weight in database: {e}"))
        })?;

        Ok(Self {
            id: ShipmentId::new(r.id),
            tracking_code,
            customer_id: r.customer_id.map(UserId::new),
            origin: r.origin,
            destination: r.destination,
            status: r.status,
            service_type: r.service_type,
            weight,
            estimated_delivery: r.estimated_delivery,
            actual_delivery: r.actual_delivery,
            notes: r.notes,
            created_at: r.created_at,
        })
    }
}

/// Repository for shipment database operations.
pub struct ShipmentRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ShipmentRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List shipments newest first, optionally restricted to one customer.
    ///
    /// # Errors
    ///
    /// Returns `BackendError::Database` if the query fails.
    pub async fn list(&self, query: ShipmentQuery) -> Result<Vec<Shipment>, BackendError> {
        let sql = format!(
            "SELECT {SHIPMENT_COLUMNS} FROM shipments \
             WHERE ($1::uuid IS NULL OR customer_id = $1) \
             ORDER BY created_at DESC, id DESC"
        );
        let rows: Vec<ShipmentRow> = sqlx::query_as(&sql)
            .bind(query.customer_id)
            .fetch_all(self.pool)
            .await?;

        rows.into_iter().map(Shipment::try_from).collect()
    }

    /// Get a shipment by its row ID.
    ///
    /// # Errors
    ///
    /// Returns `BackendError::Database` if the query fails.
    pub async fn get_by_id(&self, id: ShipmentId) -> Result<Option<Shipment>, BackendError> {
        let sql = format!("SELECT {SHIPMENT_COLUMNS} FROM shipments WHERE id = $1");
        let row: Option<ShipmentRow> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        row.map(Shipment::try_from).transpose()
    }

    /// Get a shipment by its tracking code.
    ///
    /// # Errors
    ///
    /// Returns `BackendError::Database` if the query fails.
    pub async fn get_by_code(
        &self,
        code: &TrackingCode,
    ) -> Result<Option<Shipment>, BackendError> {
        let sql = format!("SELECT {SHIPMENT_COLUMNS} FROM shipments WHERE tracking_id = $1");
        let row: Option<ShipmentRow> = sqlx::query_as(&sql)
            .bind(code.as_str())
            .fetch_optional(self.pool)
            .await?;

        row.map(Shipment::try_from).transpose()
    }

    /// # Errors
    ///
    /// Returns `BackendError::Database` if the query fails.
    pub async fn code_exists(&self, code: &TrackingCode) -> Result<bool, BackendError> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM shipments WHERE tracking_id = $1)")
                .bind(code.as_str())
                .fetch_one(self.pool)
                .await?;
        Ok(exists)
    }

    /// Insert a shipment.
    ///
    /// # Errors
    ///
    /// Returns `BackendError::Conflict` if the tracking code already exists.
    /// Returns `BackendError::UnknownReference` if `customer_id` names no user.
    /// Returns `BackendError::Database` for other database errors.
    pub async fn create(&self, new: &NewShipment) -> Result<Shipment, BackendError> {
        let sql = format!(
            "INSERT INTO shipments \
                 (tracking_id, customer_id, origin, destination, status, service_type, \
                  weight, estimated_delivery, notes) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING {SHIPMENT_COLUMNS}"
        );
        let row: ShipmentRow = sqlx::query_as(&sql)
            .bind(new.tracking_code.as_str())
            .bind(new.customer_id)
            .bind(&new.origin)
            .bind(&new.destination)
            .bind(new.status)
            .bind(&new.service_type)
            .bind(new.weight.as_decimal())
            .bind(new.estimated_delivery)
            .bind(new.notes.as_deref())
            .fetch_one(self.pool)
            .await
            .map_err(|e| constraint_error(e, "tracking code", "customer"))?;

        Shipment::try_from(row)
    }

    /// Persist a status change.
    ///
    /// # Errors
    ///
    /// Returns `BackendError::NotFound` if no shipment has this ID.
    /// Returns `BackendError::Database` for other database errors.
    pub async fn update_status(&self, update: StatusUpdate) -> Result<Shipment, BackendError> {
        let sql = format!(
            "UPDATE shipments SET status = $2, actual_delivery = $3 \
             WHERE id = $1 \
             RETURNING {SHIPMENT_COLUMNS}"
        );
        let row: Option<ShipmentRow> = sqlx::query_as(&sql)
            .bind(update.id)
            .bind(update.status)
            .bind(update.actual_delivery)
            .fetch_optional(self.pool)
            .await?;

        row.map(Shipment::try_from)
            .transpose()?
            .ok_or(BackendError::NotFound)
    }
}
