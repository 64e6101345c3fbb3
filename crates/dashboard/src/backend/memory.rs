//! In-process backend.
//!
//! Tables live behind a single `RwLock`. Used for local development
//! (`STREAMLINE_BACKEND=memory`) and by the test suites.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use streamline_core::{
    ContactMessageId, Email, MessageStatus, ProfileId, Role, ShipmentId, TrackingCode, UserId,
};

use super::{Backend, BackendError};
use crate::models::{
    ContactMessage, NewContactMessage, NewShipment, Profile, Shipment, ShipmentQuery,
    StatusUpdate, UserCredentials,
};

#[derive(Default)]
struct Tables {
    users: Vec<UserCredentials>,
    profiles: Vec<Profile>,
    // Kept in insertion order; listing sorts.
    shipments: Vec<Shipment>,
    messages: Vec<ContactMessage>,
}

/// Backend keeping every table in memory.
#[derive(Default)]
pub struct MemoryBackend {
    tables: RwLock<Tables>,
}

impl MemoryBackend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a user account together with its profile.
    ///
    /// # Errors
    ///
    /// Returns `BackendError::Conflict` if the email is already registered.
    pub async fn provision_user(
        &self,
        email: Email,
        password_hash: String,
        full_name: &str,
        role: Role,
    ) -> Result<Profile, BackendError> {
        let mut tables = self.tables.write().await;
        if tables.users.iter().any(|u| u.email == email) {
            return Err(BackendError::Conflict("email already exists".to_owned()));
        }

        let user_id = UserId::generate();
        tables.users.push(UserCredentials {
            user_id,
            email,
            password_hash,
        });

        let profile = Profile {
            id: ProfileId::generate(),
            user_id,
            full_name: full_name.to_owned(),
            company_name: None,
            phone: None,
            role,
            created_at: Utc::now(),
        };
        tables.profiles.push(profile.clone());
        Ok(profile)
    }

    /// Create a user account without a profile.
    ///
    /// # Errors
    ///
    /// Returns `BackendError::Conflict` if the email is already registered.
    pub async fn provision_user_without_profile(
        &self,
        email: Email,
        password_hash: String,
    ) -> Result<UserId, BackendError> {
        let mut tables = self.tables.write().await;
        if tables.users.iter().any(|u| u.email == email) {
            return Err(BackendError::Conflict("email already exists".to_owned()));
        }
        let user_id = UserId::generate();
        tables.users.push(UserCredentials {
            user_id,
            email,
            password_hash,
        });
        Ok(user_id)
    }

    /// Insert a fully formed shipment, keeping its `created_at`.
    ///
    /// # Errors
    ///
    /// Returns `BackendError::Conflict` if the tracking code is taken.
    pub async fn seed_shipment(&self, shipment: Shipment) -> Result<(), BackendError> {
        let mut tables = self.tables.write().await;
        if tables
            .shipments
            .iter()
            .any(|s| s.tracking_code == shipment.tracking_code)
        {
            return Err(duplicate_code(&shipment.tracking_code));
        }
        tables.shipments.push(shipment);
        Ok(())
    }

    /// Insert a fully formed contact message, keeping its `created_at`.
    pub async fn seed_contact_message(&self, message: ContactMessage) {
        self.tables.write().await.messages.push(message);
    }
}

fn duplicate_code(code: &TrackingCode) -> BackendError {
    BackendError::Conflict(format!("tracking code {code} already exists"))
}

/// Newest first; rows created at the same instant keep reverse insertion order.
fn newest_first<T>(
    rows: impl DoubleEndedIterator<Item = T>,
    key: fn(&T) -> DateTime<Utc>,
) -> Vec<T> {
    let mut out: Vec<T> = rows.rev().collect();
    out.sort_by(|a, b| key(b).cmp(&key(a)));
    out
}

#[async_trait]
impl Backend for MemoryBackend {
    async fn ping(&self) -> Result<(), BackendError> {
        Ok(())
    }

    async fn find_credentials(
        &self,
        email: &Email,
    ) -> Result<Option<UserCredentials>, BackendError> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| &u.email == email).cloned())
    }

    async fn find_profile(&self, user_id: UserId) -> Result<Option<Profile>, BackendError> {
        let tables = self.tables.read().await;
        Ok(tables
            .profiles
            .iter()
            .find(|p| p.user_id == user_id)
            .cloned())
    }

    async fn list_shipments(&self, query: ShipmentQuery) -> Result<Vec<Shipment>, BackendError> {
        let tables = self.tables.read().await;
        Ok(newest_first(
            tables.shipments.iter().filter(|s| query.matches(s)).cloned(),
            |s| s.created_at,
        ))
    }

    async fn find_shipment(&self, id: ShipmentId) -> Result<Option<Shipment>, BackendError> {
        let tables = self.tables.read().await;
        Ok(tables.shipments.iter().find(|s| s.id == id).cloned())
    }

    async fn find_shipment_by_code(
        &self,
        code: &TrackingCode,
    ) -> Result<Option<Shipment>, BackendError> {
        let tables = self.tables.read().await;
        Ok(tables
            .shipments
            .iter()
            .find(|s| &s.tracking_code == code)
            .cloned())
    }

    async fn tracking_code_exists(&self, code: &TrackingCode) -> Result<bool, BackendError> {
        let tables = self.tables.read().await;
        Ok(tables.shipments.iter().any(|s| &s.tracking_code == code))
    }

    async fn insert_shipment(&self, new: NewShipment) -> Result<Shipment, BackendError> {
        let mut tables = self.tables.write().await;
        if tables
            .shipments
            .iter()
            .any(|s| s.tracking_code == new.tracking_code)
        {
            return Err(duplicate_code(&new.tracking_code));
        }
        if let Some(customer_id) = new.customer_id
            && !tables.users.iter().any(|u| u.user_id == customer_id)
        {
            return Err(BackendError::UnknownReference("customer".to_owned()));
        }

        let shipment = Shipment {
            id: ShipmentId::generate(),
            tracking_code: new.tracking_code,
            customer_id: new.customer_id,
            origin: new.origin,
            destination: new.destination,
            status: new.status,
            service_type: new.service_type,
            weight: new.weight,
            estimated_delivery: new.estimated_delivery,
            actual_delivery: None,
            notes: new.notes,
            created_at: Utc::now(),
        };
        tables.shipments.push(shipment.clone());
        Ok(shipment)
    }

    async fn update_shipment_status(
        &self,
        update: StatusUpdate,
    ) -> Result<Shipment, BackendError> {
        let mut tables = self.tables.write().await;
        let shipment = tables
            .shipments
            .iter_mut()
            .find(|s| s.id == update.id)
            .ok_or(BackendError::NotFound)?;

        shipment.status = update.status;
        shipment.actual_delivery = update.actual_delivery;
        Ok(shipment.clone())
    }

    async fn list_contact_messages(&self) -> Result<Vec<ContactMessage>, BackendError> {
        let tables = self.tables.read().await;
        Ok(newest_first(tables.messages.iter().cloned(), |m| m.created_at))
    }

    async fn insert_contact_message(
        &self,
        new: NewContactMessage,
    ) -> Result<ContactMessage, BackendError> {
        let message = ContactMessage {
            id: ContactMessageId::generate(),
            name: new.name,
            email: new.email,
            phone: new.phone,
            company: new.company,
            service: new.service,
            message: new.message,
            status: MessageStatus::New,
            created_at: Utc::now(),
        };
        self.tables.write().await.messages.push(message.clone());
        Ok(message)
    }

    async fn mark_message_read(
        &self,
        id: ContactMessageId,
    ) -> Result<ContactMessage, BackendError> {
        let mut tables = self.tables.write().await;
        let message = tables
            .messages
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or(BackendError::NotFound)?;
        message.status = MessageStatus::Read;
        Ok(message.clone())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Duration;
    use streamline_core::{ShipmentStatus, Weight};

    use super::*;

    fn shipment(code: &str, created_at: DateTime<Utc>, owner: Option<UserId>) -> Shipment {
        Shipment {
            id: ShipmentId::generate(),
            tracking_code: TrackingCode::parse(code).unwrap(),
            customer_id: owner,
            origin: "Los Angeles, CA".to_owned(),
            destination: "New York, NY".to_owned(),
            status: ShipmentStatus::Pending,
            service_type: "Standard Shipping".to_owned(),
            weight: Weight::parse("10").unwrap(),
            estimated_delivery: None,
            actual_delivery: None,
            notes: None,
            created_at,
        }
    }

    #[tokio::test]
    async fn test_list_is_newest_first_for_every_insertion_order() {
        let base = Utc::now();
        let rows = [
            ("SL000001", base),
            ("SL000002", base + Duration::minutes(1)),
            ("SL000003", base + Duration::minutes(2)),
        ];
        let orders: [[usize; 3]; 6] = [
            [0, 1, 2],
            [0, 2, 1],
            [1, 0, 2],
            [1, 2, 0],
            [2, 0, 1],
            [2, 1, 0],
        ];

        for order in orders {
            let backend = MemoryBackend::new();
            for i in order {
                let (code, at) = rows[i];
                backend.seed_shipment(shipment(code, at, None)).await.unwrap();
            }
            let codes: Vec<String> = backend
                .list_shipments(ShipmentQuery::all())
                .await
                .unwrap()
                .into_iter()
                .map(|s| s.tracking_code.to_string())
                .collect();
            assert_eq!(codes, ["SL000003", "SL000002", "SL000001"], "order {order:?}");
        }
    }

    #[tokio::test]
    async fn test_owner_filter() {
        let backend = MemoryBackend::new();
        let owner = UserId::generate();
        let now = Utc::now();
        backend.seed_shipment(shipment("SL100000", now, Some(owner))).await.unwrap();
        backend.seed_shipment(shipment("SL200000", now, None)).await.unwrap();

        let mine = backend
            .list_shipments(ShipmentQuery::owned_by(owner))
            .await
            .unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].tracking_code.as_str(), "SL100000");
    }

    #[tokio::test]
    async fn test_duplicate_tracking_code_conflicts() {
        let backend = MemoryBackend::new();
        backend
            .seed_shipment(shipment("SL123456", Utc::now(), None))
            .await
            .unwrap();
        let err = backend
            .seed_shipment(shipment("SL123456", Utc::now(), None))
            .await
            .unwrap_err();
        assert!(matches!(err, BackendError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_insert_with_unknown_customer_is_rejected() {
        let backend = MemoryBackend::new();
        let mut new = NewShipment {
            tracking_code: TrackingCode::parse("SL654321").unwrap(),
            customer_id: Some(UserId::generate()),
            origin: "Chicago, IL".to_owned(),
            destination: "Houston, TX".to_owned(),
            status: ShipmentStatus::Pending,
            service_type: "Standard Shipping".to_owned(),
            weight: Weight::parse("10").unwrap(),
            estimated_delivery: None,
            notes: None,
        };

        let err = backend.insert_shipment(new.clone()).await.unwrap_err();
        assert!(matches!(err, BackendError::UnknownReference(ref what) if what == "customer"));

        let owner = backend
            .provision_user(
                Email::parse("owner@example.com").unwrap(),
                "hash".to_owned(),
                "Owner",
                Role::Customer,
            )
            .await
            .unwrap();
        new.customer_id = Some(owner.user_id);
        let shipment = backend.insert_shipment(new).await.unwrap();
        assert_eq!(shipment.customer_id, Some(owner.user_id));
    }

    #[tokio::test]
    async fn test_update_missing_shipment_is_not_found() {
        let backend = MemoryBackend::new();
        let err = backend
            .update_shipment_status(StatusUpdate {
                id: ShipmentId::generate(),
                status: ShipmentStatus::Delivered,
                actual_delivery: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, BackendError::NotFound));
    }

    #[tokio::test]
    async fn test_provision_rejects_duplicate_email() {
        let backend = MemoryBackend::new();
        let email = Email::parse("ops@streamline.io").unwrap();
        backend
            .provision_user(email.clone(), "hash".to_owned(), "Ops", Role::Staff)
            .await
            .unwrap();
        let err = backend
            .provision_user(email, "hash".to_owned(), "Ops", Role::Staff)
            .await
            .unwrap_err();
        assert!(matches!(err, BackendError::Conflict(_)));
    }
}
