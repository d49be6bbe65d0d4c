//! SeaORM implementation of TireRepository

use async_trait::async_trait;
use chrono::Utc;
use log::debug;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::domain::tire::{
    clamp_pressure, shifted_pressure, TireReading, TireRepository, TireStatus,
};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::tire_reading;
use crate::shared::errors::InfraError;

pub struct SeaOrmTireRepository {
    db: DatabaseConnection,
}

impl SeaOrmTireRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Infra(InfraError::Database(e))
}

fn status_from_string(s: &str) -> TireStatus {
    TireStatus::parse(s).unwrap_or(TireStatus::Normal)
}

fn reading_from_model(model: tire_reading::Model) -> TireReading {
    TireReading {
        id: model.id,
        truck_id: model.truck_id,
        slot: model.slot as u32,
        pressure_psi: model.pressure_psi,
        status: status_from_string(&model.status),
        temperature_c: model.temperature_c,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

// ── TireRepository impl ─────────────────────────────────────────

#[async_trait]
impl TireRepository for SeaOrmTireRepository {
    async fn find_by_truck(&self, truck_id: &str) -> DomainResult<Vec<TireReading>> {
        let models = tire_reading::Entity::find()
            .filter(tire_reading::Column::TruckId.eq(truck_id))
            .order_by_asc(tire_reading::Column::Slot)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(models.into_iter().map(reading_from_model).collect())
    }

    async fn find_by_truck_and_slot(
        &self,
        truck_id: &str,
        slot: u32,
    ) -> DomainResult<Option<TireReading>> {
        let model = tire_reading::Entity::find()
            .filter(tire_reading::Column::TruckId.eq(truck_id))
            .filter(tire_reading::Column::Slot.eq(slot as i32))
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(model.map(reading_from_model))
    }

    async fn upsert(
        &self,
        truck_id: &str,
        slot: u32,
        pressure_psi: f64,
        temperature_c: f64,
    ) -> DomainResult<TireReading> {
        let pressure = clamp_pressure(pressure_psi);
        let status = TireStatus::from_pressure(pressure);
        let now = Utc::now();

        let existing = tire_reading::Entity::find()
            .filter(tire_reading::Column::TruckId.eq(truck_id))
            .filter(tire_reading::Column::Slot.eq(slot as i32))
            .one(&self.db)
            .await
            .map_err(db_err)?;

        let model = match existing {
            Some(model) => {
                let mut active: tire_reading::ActiveModel = model.into();
                active.pressure_psi = Set(pressure);
                active.status = Set(status.to_string());
                active.temperature_c = Set(temperature_c);
                active.updated_at = Set(now);
                active.update(&self.db).await.map_err(db_err)?
            }
            None => {
                let active = tire_reading::ActiveModel {
                    id: Set(Uuid::new_v4().to_string()),
                    truck_id: Set(truck_id.to_string()),
                    slot: Set(slot as i32),
                    pressure_psi: Set(pressure),
                    status: Set(status.to_string()),
                    temperature_c: Set(temperature_c),
                    created_at: Set(now),
                    updated_at: Set(now),
                };
                active.insert(&self.db).await.map_err(db_err)?
            }
        };

        Ok(reading_from_model(model))
    }

    async fn shift_all_pressures(&self, truck_id: &str, delta_psi: f64) -> DomainResult<usize> {
        // One transaction covering every slot of the truck, so readers
        // never observe a half-shifted axle set
        let txn = self.db.begin().await.map_err(db_err)?;

        let models = tire_reading::Entity::find()
            .filter(tire_reading::Column::TruckId.eq(truck_id))
            .all(&txn)
            .await
            .map_err(db_err)?;

        let count = models.len();
        let now = Utc::now();
        for model in models {
            let (pressure, status) = shifted_pressure(model.pressure_psi, delta_psi);
            let mut active: tire_reading::ActiveModel = model.into();
            active.pressure_psi = Set(pressure);
            active.status = Set(status.to_string());
            active.updated_at = Set(now);
            active.update(&txn).await.map_err(db_err)?;
        }

        txn.commit().await.map_err(db_err)?;

        debug!(
            "Shifted {} tire readings for truck {} by {:+.2} psi",
            count, truck_id, delta_psi
        );
        Ok(count)
    }

    async fn count_by_status(&self, status: TireStatus) -> DomainResult<u64> {
        tire_reading::Entity::find()
            .filter(tire_reading::Column::Status.eq(status.to_string()))
            .count(&self.db)
            .await
            .map_err(db_err)
    }
}
