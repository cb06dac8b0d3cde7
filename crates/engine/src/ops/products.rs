use sea_orm::{ActiveValue, QueryFilter, QueryOrder, TransactionTrait, prelude::*};

use crate::{EngineError, Product, ProductCmd, ProductUpdate, ResultEngine, products};

use super::{Engine, check_rating, normalize_required, with_tx};

impl Engine {
    /// List products, optionally filtered by category, newest first.
    pub async fn list_products(&self, category: Option<&str>) -> ResultEngine<Vec<Product>> {
        let mut query = products::Entity::find().order_by_desc(products::Column::CreatedAt);
        if let Some(category) = category {
            query = query.filter(products::Column::Category.eq(category));
        }
        let models = query.all(&self.database).await?;
        Ok(models.into_iter().map(Product::from).collect())
    }

    /// Return a single product by id.
    pub async fn product(&self, product_id: &str) -> ResultEngine<Product> {
        let model = products::Entity::find_by_id(product_id)
            .one(&self.database)
            .await?
            .ok_or_else(|| EngineError::NotFound("product".to_string()))?;
        Ok(Product::from(model))
    }

    /// Add a product to the catalog.
    pub async fn new_product(&self, mut cmd: ProductCmd) -> ResultEngine<Product> {
        cmd.name = normalize_required(&cmd.name, "name")?;
        if cmd.price < 0 {
            return Err(EngineError::InvalidQuantity(
                "price must not be negative".to_string(),
            ));
        }
        if let Some(rating) = cmd.rating {
            check_rating(rating)?;
        }

        let product = Product::new(cmd);
        let entry: products::ActiveModel = (&product).into();
        entry.insert(&self.database).await?;
        Ok(product)
    }

    /// Update a product's catalog fields.
    pub async fn update_product(
        &self,
        product_id: &str,
        update: ProductUpdate,
    ) -> ResultEngine<Product> {
        with_tx!(self, |db_tx| {
            let model = products::Entity::find_by_id(product_id)
                .one(&db_tx)
                .await?
                .ok_or_else(|| EngineError::NotFound("product".to_string()))?;
            let mut product = Product::from(model);

            if let Some(name) = update.name.as_deref() {
                product.name = normalize_required(name, "name")?;
            }
            if let Some(category) = update.category.as_deref() {
                product.category = category.trim().to_string();
            }
            if let Some(price) = update.price {
                if price < 0 {
                    return Err(EngineError::InvalidQuantity(
                        "price must not be negative".to_string(),
                    ));
                }
                product.price = price;
            }
            if let Some(description) = update.description {
                product.description = description;
            }
            if let Some(image_url) = update.image_url {
                product.image_url = image_url;
            }
            if let Some(in_stock) = update.in_stock {
                product.in_stock = in_stock;
            }
            if let Some(quantity) = update.quantity {
                if quantity < 0 {
                    return Err(EngineError::InvalidQuantity(
                        "quantity must not be negative".to_string(),
                    ));
                }
                product.quantity = quantity;
            }
            if let Some(rating) = update.rating {
                check_rating(rating)?;
                product.rating = rating;
            }
            product.updated_at = chrono::Utc::now();

            let mut entry: products::ActiveModel = (&product).into();
            entry.id = ActiveValue::Unchanged(product.id.clone());
            entry.created_at = ActiveValue::Unchanged(product.created_at);
            entry.update(&db_tx).await?;
            Ok(product)
        })
    }

    /// Remove a product from the catalog.
    pub async fn delete_product(&self, product_id: &str) -> ResultEngine<()> {
        let result = products::Entity::delete_by_id(product_id)
            .exec(&self.database)
            .await?;
        if result.rows_affected == 0 {
            return Err(EngineError::NotFound("product".to_string()));
        }
        Ok(())
    }
}
