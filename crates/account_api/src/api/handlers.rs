//! HTTP API request handlers

use crate::api::error::ApiError;
use crate::app::AppState;
use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{info, warn};
use types::{Account, AccountServiceError};

/// Liveness probe
pub async fn ping() -> StatusCode {
    info!("Ping");
    StatusCode::OK
}

/// Create or replace an account keyed by its `id` field
pub async fn create_account(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<(StatusCode, Json<Account>), ApiError> {
    info!("Request received to create an account");

    let account = match Account::from_json_slice(&body) {
        Ok(account) => account,
        Err(e) if state.config.api.lenient_decoding => {
            warn!(error = %e, "Could not decode account payload, storing an empty account");
            Account::default()
        }
        Err(e) => {
            warn!(error = %e, "Rejecting undecodable account payload");
            return Err(AccountServiceError::from(e).into());
        }
    };

    state.store.put(account.id.clone(), account.clone()).await;
    let accounts = state.store.len().await;

    info!(
        account_id = %account.id,
        account = %account,
        accounts,
        "Added account"
    );

    Ok((StatusCode::CREATED, Json(account)))
}

/// Get an account by ID
pub async fn get_account(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Account>, ApiError> {
    info!(account_id = %id, "Request received to get an account");

    match state.store.get(&id).await {
        Some(account) => {
            info!(account_id = %id, account = %account, "Retrieved account");
            Ok(Json(account))
        }
        None => {
            info!(account_id = %id, "Requested account not found");
            Err(AccountServiceError::NotFound { id }.into())
        }
    }
}

/// Delete an account by ID
pub async fn delete_account(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    info!(account_id = %id, "Request received to delete an account");

    if state.store.delete(&id).await {
        info!(account_id = %id, "Removed account");
        Ok(StatusCode::OK)
    } else {
        info!(account_id = %id, "Delete failed: account does not exist");
        Err(AccountServiceError::NotFound { id }.into())
    }
}

/// Health check endpoint
pub async fn health_check(State(state): State<Arc<AppState>>) -> (StatusCode, Json<Value>) {
    let accounts = state.store.len().await;

    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "version": env!("CARGO_PKG_VERSION"),
            "timestamp": chrono::Utc::now().to_rfc3339(),
            "accounts": accounts
        })),
    )
}
