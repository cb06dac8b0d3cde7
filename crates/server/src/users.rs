//! User and authentication API endpoints

use api_types::user::{AuthResponse, Login, ProfileUpdate, Register, UserView};
use axum::{Extension, Json, extract::State};

use crate::{ServerError, required, server::ServerState};

fn user_view(user: &engine::User) -> UserView {
    UserView {
        email: user.email.clone(),
        full_name: user.full_name.clone(),
        phone: user.phone.clone(),
        role: user.role.clone(),
        created_at: user.created_at,
    }
}

fn auth_response(user: engine::User) -> AuthResponse {
    AuthResponse {
        ok: true,
        token: user.token.clone(),
        user: user_view(&user),
    }
}

pub async fn register(
    State(state): State<ServerState>,
    Json(payload): Json<Register>,
) -> Result<Json<AuthResponse>, ServerError> {
    let cmd = engine::RegisterCmd {
        email: required(payload.email, "email")?,
        password: required(payload.password, "password")?,
        full_name: required(payload.full_name, "fullName")?,
        phone: payload.phone,
        role: payload.role,
    };
    let user = state.engine.register_user(cmd).await?;
    Ok(Json(auth_response(user)))
}

pub async fn login(
    State(state): State<ServerState>,
    Json(payload): Json<Login>,
) -> Result<Json<AuthResponse>, ServerError> {
    let email = required(payload.email, "email")?;
    let password = required(payload.password, "password")?;
    let user = state.engine.login(&email, &password).await?;
    Ok(Json(auth_response(user)))
}

pub async fn me(
    Extension(user): Extension<engine::User>,
) -> Result<Json<UserView>, ServerError> {
    Ok(Json(user_view(&user)))
}

pub async fn update_profile(
    Extension(user): Extension<engine::User>,
    State(state): State<ServerState>,
    Json(payload): Json<ProfileUpdate>,
) -> Result<Json<UserView>, ServerError> {
    let user = state
        .engine
        .update_profile(
            &user.email,
            payload.full_name.as_deref(),
            payload.phone.as_deref(),
        )
        .await?;
    Ok(Json(user_view(&user)))
}
