//! Modelo de Vehicle
//!
//! Este módulo contiene el struct Vehicle que mapea a la tabla vehicles.
//! El campo transfer_code está presente solo mientras hay una transferencia
//! pendiente y es único entre los códigos activos (índice parcial en DB).
//! Solo el protocolo de transferencia (y la creación) mutan owner_id.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Vehicle principal - mapea exactamente a la tabla vehicles
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Vehicle {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub vin: Option<String>,
    pub transfer_code: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Vehicle {
    pub fn new(owner_id: Uuid, make: String, model: String, year: i32, vin: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner_id,
            make,
            model,
            year,
            vin,
            transfer_code: None,
            created_at: Utc::now(),
        }
    }
}
