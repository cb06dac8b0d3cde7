use sea_orm::{ActiveValue, QueryFilter, QueryOrder, TransactionTrait, prelude::*};

use crate::{EngineError, Order, OrderCmd, OrderUpdate, ResultEngine, orders};

use super::{Engine, normalize_required, with_tx};

impl Engine {
    /// Place a new order. The order number is allocated inside the DB
    /// transaction so two concurrent orders cannot share one.
    pub async fn new_order(&self, mut cmd: OrderCmd) -> ResultEngine<Order> {
        cmd.customer_name = normalize_required(&cmd.customer_name, "customerName")?;
        cmd.customer_phone = normalize_required(&cmd.customer_phone, "customerPhone")?;
        cmd.customer_address = normalize_required(&cmd.customer_address, "customerAddress")?;
        if cmd.items.is_empty() {
            return Err(EngineError::MissingField("items".to_string()));
        }
        if cmd.total_amount < 0 {
            return Err(EngineError::InvalidQuantity(
                "total amount must not be negative".to_string(),
            ));
        }

        with_tx!(self, |db_tx| {
            // The sequence follows the highest number ever issued, not the
            // row count, so deletions never free a number for reuse.
            let last = orders::Entity::find()
                .order_by_desc(orders::Column::OrderNumber)
                .one(&db_tx)
                .await?;
            let next = last
                .and_then(|model| model.order_number.strip_prefix("ORD")?.parse::<u64>().ok())
                .unwrap_or(0)
                + 1;
            let order_number = format!("ORD{next:06}");

            let order = Order::new(order_number, cmd);
            let entry: orders::ActiveModel = (&order).into();
            entry.insert(&db_tx).await?;
            Ok(order)
        })
    }

    /// Return a single order by id.
    pub async fn order(&self, order_id: &str) -> ResultEngine<Order> {
        let model = orders::Entity::find_by_id(order_id)
            .one(&self.database)
            .await?
            .ok_or_else(|| EngineError::NotFound("order".to_string()))?;
        Order::try_from(model)
    }

    /// List orders, newest first.
    pub async fn list_orders(&self) -> ResultEngine<Vec<Order>> {
        let models = orders::Entity::find()
            .order_by_desc(orders::Column::CreatedAt)
            .all(&self.database)
            .await?;
        models.into_iter().map(Order::try_from).collect()
    }

    /// List orders placed by a customer phone number, newest first.
    pub async fn list_orders_for_phone(&self, phone: &str) -> ResultEngine<Vec<Order>> {
        let models = orders::Entity::find()
            .filter(orders::Column::CustomerPhone.eq(phone))
            .order_by_desc(orders::Column::CreatedAt)
            .all(&self.database)
            .await?;
        models.into_iter().map(Order::try_from).collect()
    }

    /// Update an order. A status change must follow the fulfillment state
    /// machine; anything else is rejected with `InvalidTransition`.
    pub async fn update_order(&self, order_id: &str, update: OrderUpdate) -> ResultEngine<Order> {
        with_tx!(self, |db_tx| {
            let model = orders::Entity::find_by_id(order_id)
                .one(&db_tx)
                .await?
                .ok_or_else(|| EngineError::NotFound("order".to_string()))?;
            let mut order = Order::try_from(model)?;

            if let Some(status) = update.status {
                if !order.status.can_transition_to(status) {
                    return Err(EngineError::InvalidTransition(format!(
                        "cannot move order from '{}' to '{}'",
                        order.status.as_str(),
                        status.as_str()
                    )));
                }
                order.status = status;
            }
            if let Some(customer_name) = update.customer_name {
                order.customer_name = normalize_required(&customer_name, "customerName")?;
            }
            if let Some(customer_phone) = update.customer_phone {
                order.customer_phone = normalize_required(&customer_phone, "customerPhone")?;
            }
            if let Some(customer_address) = update.customer_address {
                order.customer_address = normalize_required(&customer_address, "customerAddress")?;
            }
            if let Some(notes) = update.notes {
                order.notes = notes;
            }
            order.updated_at = chrono::Utc::now();

            let mut entry: orders::ActiveModel = (&order).into();
            entry.id = ActiveValue::Unchanged(order.id.clone());
            entry.created_at = ActiveValue::Unchanged(order.created_at);
            entry.update(&db_tx).await?;
            Ok(order)
        })
    }

    /// Delete an order. Orders are plain records; nothing is reversed.
    pub async fn delete_order(&self, order_id: &str) -> ResultEngine<()> {
        let result = orders::Entity::delete_by_id(order_id)
            .exec(&self.database)
            .await?;
        if result.rows_affected == 0 {
            return Err(EngineError::NotFound("order".to_string()));
        }
        Ok(())
    }
}
