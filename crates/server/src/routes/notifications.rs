//! Admin notification handlers: unread orders, reviews and contact messages.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::instrument;

use royal_trust_core::{ContactId, OrderId, ReviewId};

use super::{JsonBody, parse_id};
use crate::db::{ContactRepository, OrderRepository, ReviewRepository};
use crate::error::{AppError, Result};
use crate::models::{ContactMessage, Order, Review};
use crate::state::AppState;

/// Unread items returned per kind.
const UNREAD_LIMIT: i64 = 10;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnreadNotifications {
    pub unread_orders: Vec<Order>,
    pub unread_reviews: Vec<Review>,
    pub unread_contacts: Vec<ContactMessage>,
}

/// What to mark as read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Order,
    Review,
    Contact,
    All,
}

#[derive(Debug, Deserialize)]
pub struct MarkReadRequest {
    #[serde(rename = "type")]
    pub kind: Option<NotificationKind>,
    pub id: Option<String>,
}

/// GET /api/admin/notifications
#[instrument(skip(state))]
pub async fn unread(State(state): State<AppState>) -> Result<Json<UnreadNotifications>> {
    let orders = OrderRepository::new(state.pool());
    let reviews = ReviewRepository::new(state.pool());
    let contacts = ContactRepository::new(state.pool());
    let (unread_orders, unread_reviews, unread_contacts) = tokio::try_join!(
        orders.list_unread(UNREAD_LIMIT),
        reviews.list_unread(UNREAD_LIMIT),
        contacts.list_unread(UNREAD_LIMIT),
    )?;

    Ok(Json(UnreadNotifications {
        unread_orders,
        unread_reviews,
        unread_contacts,
    }))
}

/// Mark one item, or every item of a kind, as read. `all` clears
/// everything and ignores `id`.
///
/// POST /api/admin/notifications/read
#[instrument(skip(state, request))]
pub async fn mark_read(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<MarkReadRequest>,
) -> Result<Json<Value>> {
    let orders = OrderRepository::new(state.pool());
    let reviews = ReviewRepository::new(state.pool());
    let contacts = ContactRepository::new(state.pool());
    let kind = request
        .kind
        .ok_or_else(|| AppError::BadRequest("type is required".to_owned()))?;
    let id = request
        .id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty());

    let updated = match (kind, id) {
        (NotificationKind::All, _) => {
            let (o, r, c) = tokio::try_join!(
                orders.mark_all_read(),
                reviews.mark_all_read(),
                contacts.mark_all_read(),
            )?;
            o + r + c
        }
        (NotificationKind::Order, Some(id)) => {
            let id: OrderId = parse_id(id, "Order")?;
            u64::from(orders.mark_read(id).await?)
        }
        (NotificationKind::Order, None) => orders.mark_all_read().await?,
        (NotificationKind::Review, Some(id)) => {
            let id: ReviewId = parse_id(id, "Review")?;
            u64::from(reviews.mark_read(id).await?)
        }
        (NotificationKind::Review, None) => reviews.mark_all_read().await?,
        (NotificationKind::Contact, Some(id)) => {
            let id: ContactId = parse_id(id, "Message")?;
            u64::from(contacts.mark_read(id).await?.is_some())
        }
        (NotificationKind::Contact, None) => contacts.mark_all_read().await?,
    };

    tracing::debug!(kind = ?kind, updated, "Notifications marked read");
    Ok(Json(json!({ "success": true, "updated": updated })))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_mark_read_request() {
        let request: MarkReadRequest =
            serde_json::from_value(json!({ "type": "review", "id": "x" })).unwrap();
        assert_eq!(request.kind, Some(NotificationKind::Review));
        assert_eq!(request.id.as_deref(), Some("x"));

        let request: MarkReadRequest = serde_json::from_value(json!({ "type": "all" })).unwrap();
        assert_eq!(request.kind, Some(NotificationKind::All));
        assert!(request.id.is_none());

        assert!(serde_json::from_value::<MarkReadRequest>(json!({ "type": "slider" })).is_err());
    }
}
