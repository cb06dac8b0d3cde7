use sea_orm::{ActiveValue, QueryOrder, TransactionTrait, prelude::*};

use crate::{EngineError, ResultEngine, Store, StoreCmd, StoreUpdate, stores};

use super::{Engine, check_rating, normalize_required, with_tx};

impl Engine {
    /// List stores, newest first.
    pub async fn list_stores(&self) -> ResultEngine<Vec<Store>> {
        let models = stores::Entity::find()
            .order_by_desc(stores::Column::CreatedAt)
            .all(&self.database)
            .await?;
        models.into_iter().map(Store::try_from).collect()
    }

    /// Return a single store by id.
    pub async fn store(&self, store_id: &str) -> ResultEngine<Store> {
        let model = stores::Entity::find_by_id(store_id)
            .one(&self.database)
            .await?
            .ok_or_else(|| EngineError::NotFound("store".to_string()))?;
        Store::try_from(model)
    }

    /// Register a new store location.
    pub async fn new_store(&self, mut cmd: StoreCmd) -> ResultEngine<Store> {
        cmd.name = normalize_required(&cmd.name, "name")?;
        cmd.address = normalize_required(&cmd.address, "address")?;
        if let Some(rating) = cmd.rating {
            check_rating(rating)?;
        }

        let store = Store::new(cmd);
        let entry: stores::ActiveModel = (&store).into();
        entry.insert(&self.database).await?;
        Ok(store)
    }

    /// Update a store's fields.
    pub async fn update_store(&self, store_id: &str, update: StoreUpdate) -> ResultEngine<Store> {
        with_tx!(self, |db_tx| {
            let model = stores::Entity::find_by_id(store_id)
                .one(&db_tx)
                .await?
                .ok_or_else(|| EngineError::NotFound("store".to_string()))?;
            let mut store = Store::try_from(model)?;

            if let Some(name) = update.name.as_deref() {
                store.name = normalize_required(name, "name")?;
            }
            if let Some(address) = update.address.as_deref() {
                store.address = normalize_required(address, "address")?;
            }
            if let Some(lat) = update.lat {
                store.lat = lat;
            }
            if let Some(lng) = update.lng {
                store.lng = lng;
            }
            if let Some(phone) = update.phone {
                store.phone = phone;
            }
            if let Some(image) = update.image {
                store.image = image;
            }
            if let Some(opening_hours) = update.opening_hours {
                store.opening_hours = opening_hours;
            }
            if let Some(status) = update.status {
                store.status = status;
            }
            if let Some(description) = update.description {
                store.description = description;
            }
            if let Some(rating) = update.rating {
                check_rating(rating)?;
                store.rating = rating;
            }
            store.updated_at = chrono::Utc::now();

            let mut entry: stores::ActiveModel = (&store).into();
            entry.id = ActiveValue::Unchanged(store.id.clone());
            entry.created_at = ActiveValue::Unchanged(store.created_at);
            entry.update(&db_tx).await?;
            Ok(store)
        })
    }

    /// Remove a store location.
    pub async fn delete_store(&self, store_id: &str) -> ResultEngine<()> {
        let result = stores::Entity::delete_by_id(store_id)
            .exec(&self.database)
            .await?;
        if result.rows_affected == 0 {
            return Err(EngineError::NotFound("store".to_string()));
        }
        Ok(())
    }
}
