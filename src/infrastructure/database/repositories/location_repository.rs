//! SeaORM implementation of LocationRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

use crate::domain::location::{LocationRepository, LocationSample, NewLocationSample};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::location_sample;
use crate::shared::errors::InfraError;

pub struct SeaOrmLocationRepository {
    db: DatabaseConnection,
}

impl SeaOrmLocationRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Infra(InfraError::Database(e))
}

fn sample_from_model(model: location_sample::Model) -> LocationSample {
    LocationSample {
        id: model.id,
        truck_id: model.truck_id,
        latitude: model.latitude,
        longitude: model.longitude,
        speed_kmh: model.speed_kmh,
        heading: model.heading,
        fuel_level: model.fuel_level,
        recorded_at: model.recorded_at,
    }
}

// ── LocationRepository impl ─────────────────────────────────────

#[async_trait]
impl LocationRepository for SeaOrmLocationRepository {
    async fn append(&self, sample: NewLocationSample) -> DomainResult<()> {
        let active = location_sample::ActiveModel {
            id: NotSet,
            truck_id: Set(sample.truck_id),
            latitude: Set(sample.latitude),
            longitude: Set(sample.longitude),
            speed_kmh: Set(sample.speed_kmh),
            heading: Set(sample.heading),
            fuel_level: Set(sample.fuel_level),
            recorded_at: Set(sample.recorded_at),
        };

        active.insert(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn find_recent(&self, truck_id: &str, limit: u64) -> DomainResult<Vec<LocationSample>> {
        let models = location_sample::Entity::find()
            .filter(location_sample::Column::TruckId.eq(truck_id))
            .order_by_desc(location_sample::Column::RecordedAt)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(models.into_iter().map(sample_from_model).collect())
    }

    async fn prune_before(&self, cutoff: DateTime<Utc>) -> DomainResult<u64> {
        let result = location_sample::Entity::delete_many()
            .filter(location_sample::Column::RecordedAt.lt(cutoff))
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        Ok(result.rows_affected)
    }

    async fn count(&self) -> DomainResult<u64> {
        location_sample::Entity::find()
            .count(&self.db)
            .await
            .map_err(db_err)
    }
}
