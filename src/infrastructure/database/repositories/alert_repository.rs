//! SeaORM implementation of AlertRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::info;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use uuid::Uuid;

use crate::domain::alert::{Alert, AlertRepository, AlertSeverity, NewAlert};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::alert;
use crate::shared::errors::InfraError;

pub struct SeaOrmAlertRepository {
    db: DatabaseConnection,
}

impl SeaOrmAlertRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Infra(InfraError::Database(e))
}

fn severity_from_string(s: &str) -> AlertSeverity {
    AlertSeverity::parse(s).unwrap_or(AlertSeverity::Low)
}

fn alert_from_model(model: alert::Model) -> Alert {
    Alert {
        id: model.id,
        truck_id: model.truck_id,
        kind: model.kind,
        severity: severity_from_string(&model.severity),
        message: model.message,
        resolved: model.resolved,
        created_at: model.created_at,
        resolved_at: model.resolved_at,
    }
}

// ── AlertRepository impl ────────────────────────────────────────

#[async_trait]
impl AlertRepository for SeaOrmAlertRepository {
    async fn create(&self, new: NewAlert) -> DomainResult<Alert> {
        let active = alert::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            truck_id: Set(new.truck_id),
            kind: Set(new.kind),
            severity: Set(new.severity.to_string()),
            message: Set(new.message),
            resolved: Set(false),
            created_at: Set(Utc::now()),
            resolved_at: Set(None),
        };

        let inserted = active.insert(&self.db).await.map_err(db_err)?;
        info!(
            "Alert created: {} [{}] for truck {}",
            inserted.id, inserted.severity, inserted.truck_id
        );
        Ok(alert_from_model(inserted))
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Alert>> {
        let model = alert::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(model.map(alert_from_model))
    }

    async fn find_all(&self) -> DomainResult<Vec<Alert>> {
        let models = alert::Entity::find()
            .order_by_desc(alert::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(models.into_iter().map(alert_from_model).collect())
    }

    async fn find_by_truck(&self, truck_id: &str) -> DomainResult<Vec<Alert>> {
        let models = alert::Entity::find()
            .filter(alert::Column::TruckId.eq(truck_id))
            .order_by_desc(alert::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(models.into_iter().map(alert_from_model).collect())
    }

    async fn trucks_with_open_alerts(&self) -> DomainResult<Vec<String>> {
        alert::Entity::find()
            .select_only()
            .column(alert::Column::TruckId)
            .filter(alert::Column::Resolved.eq(false))
            .distinct()
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(db_err)
    }

    async fn resolve(&self, id: &str) -> DomainResult<(Alert, bool)> {
        let model = alert::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        let Some(model) = model else {
            return Err(DomainError::not_found("Alert", "id", id));
        };

        if model.resolved {
            return Ok((alert_from_model(model), false));
        }

        let mut active: alert::ActiveModel = model.into();
        active.resolved = Set(true);
        active.resolved_at = Set(Some(Utc::now()));
        let updated = active.update(&self.db).await.map_err(db_err)?;

        Ok((alert_from_model(updated), true))
    }

    async fn delete_resolved_before(&self, cutoff: DateTime<Utc>) -> DomainResult<u64> {
        let result = alert::Entity::delete_many()
            .filter(alert::Column::Resolved.eq(true))
            .filter(alert::Column::ResolvedAt.lt(cutoff))
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        Ok(result.rows_affected)
    }
}
