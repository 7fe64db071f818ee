//! Módulo de configuración

pub mod database;
pub mod environment;

pub use environment::EnvironmentConfig;
