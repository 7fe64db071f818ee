//! Modelo de User
//!
//! Este módulo contiene el struct User que mapea a la tabla users.
//! El password_hash nunca se expone en las respuestas de la API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// User principal - mapea exactamente a la tabla users
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(email: String, full_name: String, password_hash: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            email,
            full_name,
            password_hash,
            created_at: Utc::now(),
        }
    }
}
