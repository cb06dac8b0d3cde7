//! Application users. Authentication is a thin collaborator around the core:
//! register/login issue an opaque bearer token, and the middleware resolves
//! it back to a user.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use sha2::{Digest, Sha256};

/// A user without its password digest.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct User {
    pub email: String,
    pub full_name: String,
    pub phone: String,
    pub role: String,
    pub token: String,
    pub created_at: DateTime<Utc>,
}

pub(crate) fn password_digest(password: &str) -> String {
    format!("{:x}", Sha256::digest(password.as_bytes()))
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub email: String,
    pub password_digest: String,
    pub full_name: String,
    pub phone: String,
    pub role: String,
    pub token: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for User {
    fn from(model: Model) -> Self {
        Self {
            email: model.email,
            full_name: model.full_name,
            phone: model.phone,
            role: model.role,
            token: model.token,
            created_at: model.created_at,
        }
    }
}

impl From<&User> for ActiveModel {
    fn from(user: &User) -> Self {
        Self {
            email: ActiveValue::Set(user.email.clone()),
            full_name: ActiveValue::Set(user.full_name.clone()),
            phone: ActiveValue::Set(user.phone.clone()),
            role: ActiveValue::Set(user.role.clone()),
            token: ActiveValue::Set(user.token.clone()),
            ..Default::default()
        }
    }
}
