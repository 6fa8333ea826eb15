//! User registration and order history

use crate::core::error::{EntityKind, ShopError, ShopResult};
use crate::core::model::{Order, User};
use crate::core::service::{OrderStore, UserStore};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use validator::Validate;

#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserStore>,
    orders: Arc<dyn OrderStore>,
}

impl UserService {
    pub fn new(users: Arc<dyn UserStore>, orders: Arc<dyn OrderStore>) -> Self {
        Self { users, orders }
    }

    pub async fn create_user(&self, user: User) -> ShopResult<User> {
        user.validate().map_err(|e| ShopError::from_validation(&e))?;
        let created = self.users.insert_user(user).await?;
        tracing::info!(user_id = %created.user_id, "user created");
        Ok(created)
    }

    pub async fn user_info(&self, user_id: &str) -> ShopResult<User> {
        self.users
            .get_user(user_id)
            .await?
            .ok_or_else(|| ShopError::not_found(EntityKind::User, user_id))
    }

    /// Orders of a known user, newest first, optionally bounded (inclusive)
    /// by creation time
    pub async fn user_orders(
        &self,
        user_id: &str,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> ShopResult<Vec<Order>> {
        if let (Some(start), Some(end)) = (start, end)
            && start > end
        {
            return Err(ShopError::invalid_input(
                "start_date",
                "start date must not be after end date",
            ));
        }
        self.user_info(user_id).await?;
        self.orders.orders_for_user(user_id, start, end).await
    }
}
