use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use crate::api::{AppState, ListQuery};
use crate::domain::Customer;
use crate::error::AppError;

/// Full field set for creating or replacing a customer.
///
/// The same shape serves POST and PUT: updates overwrite every field
/// unconditionally, there is no partial-merge semantics.
#[derive(Debug, Deserialize)]
pub struct CustomerPayload {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

pub async fn create_customer(
    State(state): State<AppState>,
    Json(payload): Json<CustomerPayload>,
) -> Result<Json<Customer>, AppError> {
    let customer = state
        .repo
        .insert_customer(
            &payload.name,
            &payload.email,
            payload.phone.as_deref(),
            payload.address.as_deref(),
        )
        .await?;

    Ok(Json(customer))
}

pub async fn list_customers(
    Query(params): Query<ListQuery>,
    State(state): State<AppState>,
) -> Result<Json<Vec<Customer>>, AppError> {
    let customers = state.repo.list_customers(params.skip, params.limit).await?;
    Ok(Json(customers))
}

pub async fn get_customer(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<Customer>, AppError> {
    state
        .repo
        .get_customer(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Customer not found".into()))
}

pub async fn update_customer(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    Json(payload): Json<CustomerPayload>,
) -> Result<Json<Customer>, AppError> {
    state
        .repo
        .update_customer(
            id,
            &payload.name,
            &payload.email,
            payload.phone.as_deref(),
            payload.address.as_deref(),
        )
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Customer not found".into()))
}

pub async fn delete_customer(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, AppError> {
    if !state.repo.delete_customer(id).await? {
        return Err(AppError::NotFound("Customer not found".into()));
    }

    Ok(Json(json!({"message": "Customer deleted"})))
}
