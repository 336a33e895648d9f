use async_trait::async_trait;
use contracts::domain::a001_order::aggregate::{
    DeleteResult, Order, OrderId, UpdateOrderStatusDto, UpdateResult,
};
use gloo_net::http::Request;

use crate::shared::api_utils::{api_url, authorized, decode_json, ApiError};
use crate::system::auth::identity::Identity;

/// Which orders a caller is allowed to list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderScope {
    All,
    Customer(String),
}

impl OrderScope {
    pub fn for_identity(identity: &Identity) -> Self {
        if identity.is_admin {
            Self::All
        } else {
            Self::Customer(identity.email.clone())
        }
    }
}

pub fn list_path(scope: &OrderScope) -> String {
    match scope {
        OrderScope::All => "/orders".to_string(),
        OrderScope::Customer(email) => {
            format!("/orders?email={}", urlencoding::encode(email))
        }
    }
}

pub fn order_path(id: &OrderId) -> String {
    format!("/orders/{}", urlencoding::encode(id.as_str()))
}

/// Order store endpoints consumed by the dashboard
#[async_trait(?Send)]
pub trait OrdersApi {
    async fn list(&self, scope: &OrderScope) -> Result<Vec<Order>, ApiError>;

    /// Set `status` on the order (true = shipped)
    async fn update_status(&self, id: &OrderId, status: bool) -> Result<UpdateResult, ApiError>;

    async fn delete(&self, id: &OrderId) -> Result<DeleteResult, ApiError>;
}

/// `OrdersApi` over HTTP via gloo-net
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpOrdersApi;

#[async_trait(?Send)]
impl OrdersApi for HttpOrdersApi {
    async fn list(&self, scope: &OrderScope) -> Result<Vec<Order>, ApiError> {
        let response = authorized(Request::get(&api_url(&list_path(scope))))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        decode_json(response).await
    }

    async fn update_status(&self, id: &OrderId, status: bool) -> Result<UpdateResult, ApiError> {
        let response = authorized(Request::put(&api_url(&order_path(id))))
            .json(&UpdateOrderStatusDto { status })
            .map_err(|e| ApiError::Encode(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        decode_json(response).await
    }

    async fn delete(&self, id: &OrderId) -> Result<DeleteResult, ApiError> {
        let response = authorized(Request::delete(&api_url(&order_path(id))))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        decode_json(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_for_admin_is_unfiltered() {
        let scope = OrderScope::for_identity(&Identity::admin("root@example.com"));
        assert_eq!(scope, OrderScope::All);
        assert_eq!(list_path(&scope), "/orders");
    }

    #[test]
    fn test_scope_for_customer_filters_by_email() {
        let scope = OrderScope::for_identity(&Identity::customer("jo+shop@example.com"));
        assert_eq!(scope, OrderScope::Customer("jo+shop@example.com".into()));
        assert_eq!(list_path(&scope), "/orders?email=jo%2Bshop%40example.com");
    }

    #[test]
    fn test_order_path() {
        assert_eq!(order_path(&OrderId::new("64f1a2")), "/orders/64f1a2");
        assert_eq!(order_path(&OrderId::new("a/b")), "/orders/a%2Fb");
    }
}
