//! Log browser and ingestion endpoints.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use serde_json::{json, Value};
use tracing::info;
use uuid::Uuid;

use crate::{
    api::{api_error::ApiError, validated_json::ValidatedJson},
    app::App,
    database::models::interface_log::Model,
    interface_logs::{
        self,
        filter::LogListParams,
        payload::{BulkInterfaceLogPayload, InterfaceLogPayload},
        DistinctField,
    },
};

/// A stored record as returned to clients.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogView {
    #[serde(flatten)]
    pub log: Model,
    pub formatted_duration: String,
}

impl From<Model> for LogView {
    fn from(log: Model) -> Self {
        Self {
            formatted_duration: log.formatted_duration(),
            log,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogPage {
    pub logs: Vec<LogView>,
    pub total_pages: u64,
    pub current_page: u64,
    pub total_count: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkInsertResponse {
    pub logs: Vec<LogView>,
    pub inserted_count: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterValues {
    pub interface_names: Vec<String>,
    pub integration_keys: Vec<String>,
    pub statuses: Vec<String>,
    pub severities: Vec<String>,
}

fn parse_id(id: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(id).map_err(|_| ApiError::Validation(format!("Invalid log id '{id}'"), None))
}

pub async fn list(
    State(app): State<App>,
    Query(params): Query<LogListParams>,
) -> Result<Json<LogPage>, ApiError> {
    let (filter, pagination) = params.parse(&app.config.pagination)?;
    let (logs, total_count) = interface_logs::find_page(&app.db, &filter, pagination).await?;

    Ok(Json(LogPage {
        logs: logs.into_iter().map(LogView::from).collect(),
        total_pages: pagination.total_pages(total_count),
        current_page: pagination.page,
        total_count,
    }))
}

pub async fn get(State(app): State<App>, Path(id): Path<String>) -> Result<Json<LogView>, ApiError> {
    let id = parse_id(&id)?;

    interface_logs::find_by_id(&app.db, id)
        .await?
        .map(|log| Json(LogView::from(log)))
        .ok_or(ApiError::NotFound)
}

pub async fn create(
    State(app): State<App>,
    ValidatedJson(payload): ValidatedJson<InterfaceLogPayload>,
) -> Result<(StatusCode, Json<LogView>), ApiError> {
    let log = interface_logs::insert(&app.db, payload.into_new_log()?).await?;

    Ok((StatusCode::CREATED, Json(LogView::from(log))))
}

pub async fn create_bulk(
    State(app): State<App>,
    ValidatedJson(payload): ValidatedJson<BulkInterfaceLogPayload>,
) -> Result<(StatusCode, Json<BulkInsertResponse>), ApiError> {
    let logs = interface_logs::insert_many(&app.db, payload.into_new_logs()?).await?;
    let inserted_count = logs.len();

    info!(inserted_count, "Bulk inserted interface logs");

    Ok((
        StatusCode::CREATED,
        Json(BulkInsertResponse {
            logs: logs.into_iter().map(LogView::from).collect(),
            inserted_count,
        }),
    ))
}

pub async fn replace(
    State(app): State<App>,
    Path(id): Path<String>,
    ValidatedJson(payload): ValidatedJson<InterfaceLogPayload>,
) -> Result<Json<LogView>, ApiError> {
    let id = parse_id(&id)?;

    interface_logs::replace(&app.db, id, payload.into_new_log()?)
        .await?
        .map(|log| Json(LogView::from(log)))
        .ok_or(ApiError::NotFound)
}

pub async fn delete(
    State(app): State<App>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = parse_id(&id)?;

    if !interface_logs::delete(&app.db, id).await? {
        return Err(ApiError::NotFound);
    }

    Ok(Json(json!({ "message": "Log deleted successfully" })))
}

pub async fn filter_values(State(app): State<App>) -> Result<Json<FilterValues>, ApiError> {
    Ok(Json(FilterValues {
        interface_names: interface_logs::distinct_values(&app.db, DistinctField::InterfaceName)
            .await?,
        integration_keys: interface_logs::distinct_values(&app.db, DistinctField::IntegrationKey)
            .await?,
        statuses: interface_logs::distinct_values(&app.db, DistinctField::Status).await?,
        severities: interface_logs::distinct_values(&app.db, DistinctField::Severity).await?,
    }))
}
