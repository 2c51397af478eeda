use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::{
    api::api_error::ApiError,
    app::App,
    dashboard::{
        interface_health::{self, InterfaceHealth},
        period::Period,
        summary::{self, Summary},
        trends::{self, TrendPoint},
    },
    interface_logs,
};

#[derive(Debug, Default, Deserialize)]
pub struct PeriodParams {
    pub period: Option<String>,
}

impl PeriodParams {
    fn period(&self) -> Period {
        Period::parse_or_default(self.period.as_deref())
    }
}

#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    #[serde(flatten)]
    pub summary: Summary,
    pub period: Period,
}

#[derive(Debug, Serialize)]
pub struct TrendsResponse {
    pub trends: Vec<TrendPoint>,
    pub period: Period,
}

#[derive(Debug, Serialize)]
pub struct InterfacesResponse {
    pub interfaces: Vec<InterfaceHealth>,
    pub period: Period,
}

pub async fn summary(
    State(app): State<App>,
    Query(params): Query<PeriodParams>,
) -> Result<Json<SummaryResponse>, ApiError> {
    let period = params.period();
    let summary = summary::summary(&app.db, period, interface_logs::now()).await?;

    Ok(Json(SummaryResponse { summary, period }))
}

pub async fn trends(
    State(app): State<App>,
    Query(params): Query<PeriodParams>,
) -> Result<Json<TrendsResponse>, ApiError> {
    let period = params.period();
    let trends = trends::trends(&app.db, period, interface_logs::now()).await?;

    Ok(Json(TrendsResponse { trends, period }))
}

pub async fn interfaces(
    State(app): State<App>,
    Query(params): Query<PeriodParams>,
) -> Result<Json<InterfacesResponse>, ApiError> {
    let period = params.period();
    let interfaces =
        interface_health::interface_health(&app.db, period, interface_logs::now()).await?;

    Ok(Json(InterfacesResponse { interfaces, period }))
}
