//! Shipment list, creation and status updates.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use rust_decimal::Decimal;
use serde::Deserialize;

use streamline_core::{ShipmentId, UserId};

use crate::error::Result;
use crate::middleware::RequireSession;
use crate::models::Shipment;
use crate::services::{ShipmentForm, ShipmentRegistry};
use crate::state::AppState;

/// Weight as sent by a form (string) or a JSON client (number).
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum WeightInput {
    Number(serde_json::Number),
    Text(String),
}

impl WeightInput {
    /// Plain decimal text for the weight parser.
    ///
    /// JSON numbers may arrive in exponent form (`1e21`). Those are expanded
    /// so the parser reports the real problem, usually that the value is too
    /// large, rather than a malformed number.
    fn into_string(self) -> String {
        match self {
            Self::Number(n) => {
                let text = n.to_string();
                if !text.contains(['e', 'E']) {
                    return text;
                }
                match Decimal::from_scientific(&text) {
                    Ok(value) => value.to_string(),
                    Err(_) if n.as_f64().is_some_and(f64::is_sign_negative) => {
                        (-Decimal::MAX).to_string()
                    }
                    Err(_) => Decimal::MAX.to_string(),
                }
            }
            Self::Text(s) => s,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateShipmentRequest {
    pub origin: String,
    pub destination: String,
    pub service_type: String,
    pub weight: WeightInput,
    #[serde(default)]
    pub estimated_delivery: Option<String>,
    #[serde(default)]
    pub customer_id: Option<UserId>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl From<CreateShipmentRequest> for ShipmentForm {
    fn from(req: CreateShipmentRequest) -> Self {
        Self {
            origin: req.origin,
            destination: req.destination,
            service_type: req.service_type,
            weight: req.weight.into_string(),
            estimated_delivery: req.estimated_delivery,
            customer_id: req.customer_id,
            notes: req.notes,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct StatusRequest {
    pub status: String,
}

/// GET /api/shipments
///
/// # Errors
///
/// Returns 500 if the backend read fails.
pub async fn list(
    State(state): State<AppState>,
    RequireSession(ctx): RequireSession,
) -> Result<Json<Vec<Shipment>>> {
    Ok(Json(state.registry().list(&ctx).await?))
}

/// POST /api/shipments
///
/// # Errors
///
/// Returns 403 for customers, 400 for invalid input.
pub async fn create(
    State(state): State<AppState>,
    RequireSession(ctx): RequireSession,
    Json(req): Json<CreateShipmentRequest>,
) -> Result<(StatusCode, Json<Shipment>)> {
    let form = ShipmentForm::from(req);
    let shipment = state.registry().create(&ctx, &form).await?;
    Ok((StatusCode::CREATED, Json(shipment)))
}

/// POST /api/shipments/{id}/status
///
/// # Errors
///
/// Returns 400 for an unknown status, 403 for customers, 404 for a missing
/// shipment and 409 when the transition policy rejects the change.
pub async fn update_status(
    State(state): State<AppState>,
    RequireSession(ctx): RequireSession,
    Path(id): Path<ShipmentId>,
    Json(req): Json<StatusRequest>,
) -> Result<Json<Shipment>> {
    let status = ShipmentRegistry::parse_status(&req.status)?;
    let shipment = state.registry().update_status(&ctx, id, status).await?;
    Ok(Json(shipment))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use streamline_core::{Weight, WeightError};

    use super::*;

    fn weight_from_json(raw: &str) -> std::result::Result<Weight, WeightError> {
        let input: WeightInput = serde_json::from_str(raw).unwrap();
        Weight::parse(&input.into_string())
    }

    #[test]
    fn test_plain_numbers_and_text() {
        assert_eq!(
            weight_from_json("1500").unwrap().as_decimal(),
            Decimal::from(1500)
        );
        assert_eq!(
            weight_from_json("\"12.5\"").unwrap().as_decimal(),
            Decimal::new(125, 1)
        );
    }

    #[test]
    fn test_exponent_numbers_report_size() {
        assert_eq!(weight_from_json("1e21"), Err(WeightError::TooLarge));
        assert_eq!(weight_from_json("1e300"), Err(WeightError::TooLarge));
        assert_eq!(weight_from_json("-1e300"), Err(WeightError::Negative));
        assert_eq!(
            weight_from_json("2.5e3").unwrap().as_decimal(),
            Decimal::from(2500)
        );
    }
}
