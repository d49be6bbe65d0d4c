//! SeaORM implementation of FleetRepository (reference data)

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::domain::fleet::{
    Driver, FleetGroup, FleetRepository, NewDriver, NewFleetGroup, NewTruckModel, TruckModel,
};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::{driver, fleet_group, truck_model};
use crate::shared::errors::InfraError;

pub struct SeaOrmFleetRepository {
    db: DatabaseConnection,
}

impl SeaOrmFleetRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Infra(InfraError::Database(e))
}

fn group_from_model(model: fleet_group::Model) -> FleetGroup {
    FleetGroup {
        id: model.id,
        name: model.name,
        description: model.description,
        created_at: model.created_at,
    }
}

fn truck_model_from_model(model: truck_model::Model) -> TruckModel {
    TruckModel {
        id: model.id,
        manufacturer: model.manufacturer,
        name: model.name,
        capacity_tons: model.capacity_tons,
        created_at: model.created_at,
    }
}

fn driver_from_model(model: driver::Model) -> Driver {
    Driver {
        id: model.id,
        full_name: model.full_name,
        license_class: model.license_class,
        shift: model.shift,
        created_at: model.created_at,
    }
}

// ── FleetRepository impl ────────────────────────────────────────

#[async_trait]
impl FleetRepository for SeaOrmFleetRepository {
    async fn list_groups(&self) -> DomainResult<Vec<FleetGroup>> {
        let models = fleet_group::Entity::find()
            .order_by_asc(fleet_group::Column::Name)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(models.into_iter().map(group_from_model).collect())
    }

    async fn create_group(&self, new: NewFleetGroup) -> DomainResult<FleetGroup> {
        let active = fleet_group::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            name: Set(new.name),
            description: Set(new.description),
            created_at: Set(Utc::now()),
        };

        let inserted = active.insert(&self.db).await.map_err(db_err)?;
        Ok(group_from_model(inserted))
    }

    async fn find_group_by_name(&self, name: &str) -> DomainResult<Option<FleetGroup>> {
        let model = fleet_group::Entity::find()
            .filter(fleet_group::Column::Name.eq(name))
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(model.map(group_from_model))
    }

    async fn list_models(&self) -> DomainResult<Vec<TruckModel>> {
        let models = truck_model::Entity::find()
            .order_by_asc(truck_model::Column::Manufacturer)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(models.into_iter().map(truck_model_from_model).collect())
    }

    async fn create_model(&self, new: NewTruckModel) -> DomainResult<TruckModel> {
        let active = truck_model::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            manufacturer: Set(new.manufacturer),
            name: Set(new.name),
            capacity_tons: Set(new.capacity_tons),
            created_at: Set(Utc::now()),
        };

        let inserted = active.insert(&self.db).await.map_err(db_err)?;
        Ok(truck_model_from_model(inserted))
    }

    async fn list_drivers(&self) -> DomainResult<Vec<Driver>> {
        let models = driver::Entity::find()
            .order_by_asc(driver::Column::FullName)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(models.into_iter().map(driver_from_model).collect())
    }

    async fn create_driver(&self, new: NewDriver) -> DomainResult<Driver> {
        let active = driver::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            full_name: Set(new.full_name),
            license_class: Set(new.license_class),
            shift: Set(new.shift),
            created_at: Set(Utc::now()),
        };

        let inserted = active.insert(&self.db).await.map_err(db_err)?;
        Ok(driver_from_model(inserted))
    }

    async fn find_driver_by_id(&self, id: &str) -> DomainResult<Option<Driver>> {
        let model = driver::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(model.map(driver_from_model))
    }
}
