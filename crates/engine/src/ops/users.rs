use sea_orm::{ActiveValue, QueryFilter, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{EngineError, RegisterCmd, ResultEngine, User, users};

use super::{Engine, normalize_required, with_tx};

impl Engine {
    /// Register a new user and hand back its bearer token.
    pub async fn register_user(&self, cmd: RegisterCmd) -> ResultEngine<User> {
        let email = normalize_required(&cmd.email, "email")?.to_lowercase();
        if !is_plausible_email(&email) {
            return Err(EngineError::InvalidName(
                "email address is not valid".to_string(),
            ));
        }
        if cmd.password.len() < 6 {
            return Err(EngineError::InvalidOperation(
                "password must be at least 6 characters".to_string(),
            ));
        }
        let full_name = normalize_required(&cmd.full_name, "fullName")?;
        let role = cmd.role.unwrap_or_else(|| "user".to_string());
        if role != "user" && role != "admin" {
            return Err(EngineError::InvalidType(format!(
                "unknown role '{role}'"
            )));
        }

        let now = chrono::Utc::now();
        let user = User {
            email: email.clone(),
            full_name,
            phone: cmd.phone.unwrap_or_default(),
            role,
            token: Uuid::new_v4().to_string(),
            created_at: now,
        };

        with_tx!(self, |db_tx| {
            let exists = users::Entity::find_by_id(&email).one(&db_tx).await?.is_some();
            if exists {
                return Err(EngineError::DuplicateName(email));
            }

            let mut entry: users::ActiveModel = (&user).into();
            entry.password_digest = ActiveValue::Set(users::password_digest(&cmd.password));
            entry.created_at = ActiveValue::Set(now);
            entry.insert(&db_tx).await?;
            Ok(user)
        })
    }

    /// Check credentials and rotate the bearer token.
    pub async fn login(&self, email: &str, password: &str) -> ResultEngine<User> {
        let email = email.trim().to_lowercase();
        with_tx!(self, |db_tx| {
            let model = users::Entity::find_by_id(&email)
                .one(&db_tx)
                .await?
                .ok_or(EngineError::InvalidCredentials)?;
            if model.password_digest != users::password_digest(password) {
                return Err(EngineError::InvalidCredentials);
            }

            let token = Uuid::new_v4().to_string();
            let entry = users::ActiveModel {
                email: ActiveValue::Unchanged(email),
                token: ActiveValue::Set(token.clone()),
                ..Default::default()
            };
            let updated = entry.update(&db_tx).await?;
            Ok(User::from(updated))
        })
    }

    /// Resolve a bearer token back to its user.
    pub async fn user_by_token(&self, token: &str) -> ResultEngine<User> {
        let model = users::Entity::find()
            .filter(users::Column::Token.eq(token))
            .one(&self.database)
            .await?
            .ok_or(EngineError::InvalidCredentials)?;
        Ok(User::from(model))
    }

    /// Update the profile fields of the authenticated user.
    pub async fn update_profile(
        &self,
        email: &str,
        full_name: Option<&str>,
        phone: Option<&str>,
    ) -> ResultEngine<User> {
        with_tx!(self, |db_tx| {
            let model = users::Entity::find_by_id(email)
                .one(&db_tx)
                .await?
                .ok_or_else(|| EngineError::NotFound("user".to_string()))?;
            let mut user = User::from(model);

            if let Some(full_name) = full_name {
                user.full_name = normalize_required(full_name, "fullName")?;
            }
            if let Some(phone) = phone {
                user.phone = phone.trim().to_string();
            }

            let entry = users::ActiveModel {
                email: ActiveValue::Unchanged(user.email.clone()),
                full_name: ActiveValue::Set(user.full_name.clone()),
                phone: ActiveValue::Set(user.phone.clone()),
                ..Default::default()
            };
            entry.update(&db_tx).await?;
            Ok(user)
        })
    }
}

/// A minimal shape check, enough to catch obvious typos.
fn is_plausible_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}
