//! Interface run record store.
//!
//! Every write takes a [`NewInterfaceLog`], which only exists once a payload has
//! passed validation, so the store never sees an unchecked record.

use chrono::{DateTime, SubsecRound, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Select,
};
use tracing::debug;
use uuid::Uuid;

use crate::database::models::interface_log::{ActiveModel, Column, Entity, Model};

pub mod duration;
pub mod filter;
pub mod payload;

use self::{
    filter::{fold_case, LogFilter, Pagination},
    payload::NewInterfaceLog,
};

/// Current time at the millisecond precision every stored instant uses.
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

fn build_model(
    log: NewInterfaceLog,
    id: Uuid,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    default_timestamp: DateTime<Utc>,
) -> Model {
    Model {
        id,
        interface_name_folded: fold_case(&log.interface_name),
        integration_key_folded: fold_case(&log.integration_key),
        message_folded: fold_case(&log.message),
        interface_name: log.interface_name,
        integration_key: log.integration_key,
        status: log.status,
        message: log.message,
        severity: log.severity,
        duration: log.duration,
        records_processed: log.records_processed,
        timestamp: log.timestamp.unwrap_or(default_timestamp),
        metadata: log.metadata.map(serde_json::Value::Object),
        created_at,
        updated_at,
    }
}

fn to_active_model(model: &Model) -> ActiveModel {
    model.clone().into_active_model().reset_all()
}

pub async fn insert<C: ConnectionTrait>(db: &C, log: NewInterfaceLog) -> Result<Model, DbErr> {
    let now = now();
    let model = build_model(log, Uuid::new_v4(), now, now, now);

    Entity::insert(to_active_model(&model))
        .exec_without_returning(db)
        .await?;

    debug!(
        id = %model.id,
        interface = %model.interface_name,
        status = %model.status,
        "Inserted interface log"
    );
    Ok(model)
}

/// Inserts all records in a single statement: either every record is stored or none is.
pub async fn insert_many<C: ConnectionTrait>(
    db: &C,
    logs: Vec<NewInterfaceLog>,
) -> Result<Vec<Model>, DbErr> {
    if logs.is_empty() {
        return Ok(Vec::new());
    }

    let now = now();
    let models: Vec<Model> = logs
        .into_iter()
        .map(|log| build_model(log, Uuid::new_v4(), now, now, now))
        .collect();

    Entity::insert_many(models.iter().map(to_active_model))
        .exec_without_returning(db)
        .await?;

    debug!(count = models.len(), "Inserted interface logs in bulk");
    Ok(models)
}

pub async fn find_by_id<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<Option<Model>, DbErr> {
    Entity::find_by_id(id).one(db).await
}

/// Replaces every user-supplied field of an existing record.
///
/// `created_at` is kept, `updated_at` is refreshed, and an omitted timestamp keeps
/// the stored one. Returns `None` when no record has the given id.
pub async fn replace<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
    log: NewInterfaceLog,
) -> Result<Option<Model>, DbErr> {
    let Some(existing) = find_by_id(db, id).await? else {
        return Ok(None);
    };

    let model = build_model(log, id, existing.created_at, now(), existing.timestamp);

    let result = Entity::update_many()
        .set(to_active_model(&model))
        .filter(Column::Id.eq(id))
        .exec(db)
        .await?;

    if result.rows_affected == 0 {
        // Deleted between the lookup and the update
        return Ok(None);
    }

    debug!(%id, status = %model.status, "Replaced interface log");
    Ok(Some(model))
}

/// Returns `false` when no record has the given id.
pub async fn delete<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<bool, DbErr> {
    let result = Entity::delete_by_id(id).exec(db).await?;
    Ok(result.rows_affected > 0)
}

pub async fn delete_all<C: ConnectionTrait>(db: &C) -> Result<u64, DbErr> {
    let result = Entity::delete_many().exec(db).await?;
    Ok(result.rows_affected)
}

fn matching(filter: &LogFilter) -> Select<Entity> {
    Entity::find().filter(filter.condition())
}

/// One page of records matching `filter`, newest first, plus the total match count.
///
/// Ties on `timestamp` are broken by id so that consecutive pages never overlap. A
/// page whose offset does not fit the database's signed 64-bit range is empty.
pub async fn find_page<C: ConnectionTrait>(
    db: &C,
    filter: &LogFilter,
    pagination: Pagination,
) -> Result<(Vec<Model>, u64), DbErr> {
    let total_count = matching(filter).count(db).await?;

    let Some(offset) = pagination.offset() else {
        debug!(page = pagination.page, "Requested page lies beyond any offset");
        return Ok((Vec::new(), total_count));
    };
    if offset >= total_count {
        return Ok((Vec::new(), total_count));
    }

    let logs = matching(filter)
        .order_by_desc(Column::Timestamp)
        .order_by_desc(Column::Id)
        .offset(offset)
        .limit(pagination.limit)
        .all(db)
        .await?;

    Ok((logs, total_count))
}

/// Fields offered as filter choices in the log browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistinctField {
    InterfaceName,
    IntegrationKey,
    Status,
    Severity,
}

impl DistinctField {
    const fn column(self) -> Column {
        match self {
            Self::InterfaceName => Column::InterfaceName,
            Self::IntegrationKey => Column::IntegrationKey,
            Self::Status => Column::Status,
            Self::Severity => Column::Severity,
        }
    }
}

/// Distinct values currently stored for `field`, sorted alphabetically.
pub async fn distinct_values<C: ConnectionTrait>(
    db: &C,
    field: DistinctField,
) -> Result<Vec<String>, DbErr> {
    let mut values: Vec<String> = Entity::find()
        .select_only()
        .column(field.column())
        .distinct()
        .into_tuple()
        .all(db)
        .await?;

    // Collation differs between backends
    values.sort();
    Ok(values)
}
