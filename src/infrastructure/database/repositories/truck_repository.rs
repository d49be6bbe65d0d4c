//! SeaORM implementation of TruckRepository

use async_trait::async_trait;
use chrono::Utc;
use log::{debug, info};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::domain::truck::{
    NewTruck, Position, TelemetryUpdate, Truck, TruckRepository, TruckStatus, TruckUpdate,
};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::truck;
use crate::shared::errors::InfraError;

pub struct SeaOrmTruckRepository {
    db: DatabaseConnection,
}

impl SeaOrmTruckRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Infra(InfraError::Database(e))
}

fn status_from_string(s: &str) -> TruckStatus {
    TruckStatus::parse(s).unwrap_or(TruckStatus::Inactive)
}

fn truck_from_model(model: truck::Model) -> DomainResult<Truck> {
    let position = Position::from_pair(model.latitude, model.longitude)?;
    Ok(Truck {
        id: model.id,
        plate_number: model.plate_number,
        model_id: model.model_id,
        fleet_group_id: model.fleet_group_id,
        driver_id: model.driver_id,
        status: status_from_string(&model.status),
        position,
        heading: model.heading,
        speed_kmh: model.speed_kmh,
        fuel_level: model.fuel_level,
        payload_tons: model.payload_tons,
        odometer_km: model.odometer_km,
        engine_hours: model.engine_hours,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

fn trucks_from_models(models: Vec<truck::Model>) -> DomainResult<Vec<Truck>> {
    models.into_iter().map(truck_from_model).collect()
}

// ── TruckRepository impl ────────────────────────────────────────

#[async_trait]
impl TruckRepository for SeaOrmTruckRepository {
    async fn create(&self, new: NewTruck) -> DomainResult<Truck> {
        let now = Utc::now();
        let model = truck::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            plate_number: Set(new.plate_number),
            model_id: Set(new.model_id),
            fleet_group_id: Set(new.fleet_group_id),
            driver_id: Set(new.driver_id),
            status: Set(new.status.unwrap_or_default().to_string()),
            latitude: Set(new.position.map(|p| p.latitude)),
            longitude: Set(new.position.map(|p| p.longitude)),
            heading: Set(0.0),
            speed_kmh: Set(0.0),
            fuel_level: Set(new.fuel_level.unwrap_or(100.0)),
            payload_tons: Set(new.payload_tons.unwrap_or(0.0)),
            odometer_km: Set(new.odometer_km.unwrap_or(0.0)),
            engine_hours: Set(new.engine_hours.unwrap_or(0.0)),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let inserted = model.insert(&self.db).await.map_err(db_err)?;
        info!("Truck created: {} ({})", inserted.plate_number, inserted.id);
        truck_from_model(inserted)
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Truck>> {
        let model = truck::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        model.map(truck_from_model).transpose()
    }

    async fn find_by_plate(&self, plate_number: &str) -> DomainResult<Option<Truck>> {
        let model = truck::Entity::find()
            .filter(truck::Column::PlateNumber.eq(plate_number))
            .one(&self.db)
            .await
            .map_err(db_err)?;

        model.map(truck_from_model).transpose()
    }

    async fn find_all(&self) -> DomainResult<Vec<Truck>> {
        let models = truck::Entity::find()
            .order_by_asc(truck::Column::PlateNumber)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        trucks_from_models(models)
    }

    async fn find_simulation_candidates(&self) -> DomainResult<Vec<Truck>> {
        let models = truck::Entity::find()
            .filter(truck::Column::Status.eq(TruckStatus::Active.to_string()))
            .filter(truck::Column::Latitude.is_not_null())
            .filter(truck::Column::Longitude.is_not_null())
            .all(&self.db)
            .await
            .map_err(db_err)?;

        trucks_from_models(models)
    }

    async fn update(&self, id: &str, update: TruckUpdate) -> DomainResult<Truck> {
        debug!("Updating truck: {}", id);

        let existing = truck::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        let Some(existing) = existing else {
            return Err(DomainError::not_found("Truck", "id", id));
        };

        let mut active: truck::ActiveModel = existing.into();
        if let Some(plate) = update.plate_number {
            active.plate_number = Set(plate);
        }
        if let Some(model_id) = update.model_id {
            active.model_id = Set(Some(model_id));
        }
        if let Some(group_id) = update.fleet_group_id {
            active.fleet_group_id = Set(Some(group_id));
        }
        if let Some(driver_id) = update.driver_id {
            active.driver_id = Set(Some(driver_id));
        }
        if let Some(position) = update.position {
            active.latitude = Set(Some(position.latitude));
            active.longitude = Set(Some(position.longitude));
        }
        if let Some(fuel) = update.fuel_level {
            active.fuel_level = Set(fuel);
        }
        if let Some(payload) = update.payload_tons {
            active.payload_tons = Set(payload);
        }
        if let Some(odometer) = update.odometer_km {
            active.odometer_km = Set(odometer);
        }
        if let Some(hours) = update.engine_hours {
            active.engine_hours = Set(hours);
        }
        active.updated_at = Set(Utc::now());

        let updated = active.update(&self.db).await.map_err(db_err)?;
        truck_from_model(updated)
    }

    async fn update_status(&self, id: &str, status: TruckStatus) -> DomainResult<Truck> {
        let active = truck::ActiveModel {
            id: Set(id.to_string()),
            status: Set(status.to_string()),
            updated_at: Set(Utc::now()),
            ..Default::default()
        };

        match active.update(&self.db).await {
            Ok(model) => {
                info!("Truck {} status updated to {}", id, status);
                truck_from_model(model)
            }
            Err(sea_orm::DbErr::RecordNotUpdated) => {
                Err(DomainError::not_found("Truck", "id", id))
            }
            Err(e) => Err(db_err(e)),
        }
    }

    async fn apply_telemetry(&self, id: &str, telemetry: TelemetryUpdate) -> DomainResult<()> {
        // One UPDATE covering position, speed, heading, fuel and updated_at
        let active = truck::ActiveModel {
            id: Set(id.to_string()),
            latitude: Set(Some(telemetry.position.latitude)),
            longitude: Set(Some(telemetry.position.longitude)),
            speed_kmh: Set(telemetry.speed_kmh),
            heading: Set(telemetry.heading),
            fuel_level: Set(telemetry.fuel_level),
            updated_at: Set(Utc::now()),
            ..Default::default()
        };

        match active.update(&self.db).await {
            Ok(_) => Ok(()),
            Err(sea_orm::DbErr::RecordNotUpdated) => {
                Err(DomainError::not_found("Truck", "id", id))
            }
            Err(e) => Err(db_err(e)),
        }
    }

    async fn delete(&self, id: &str) -> DomainResult<bool> {
        let result = truck::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        if result.rows_affected > 0 {
            info!("Truck deleted: {}", id);
        }
        Ok(result.rows_affected > 0)
    }
}
