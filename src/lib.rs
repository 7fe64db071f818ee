//! Garage Ledger - libreta de mantenimiento vehicular
//!
//! Backend HTTP para registrar vehículos, su historial de mantenimiento
//! y transferir la propiedad de un vehículo mediante un código de un solo uso.

pub mod config;
pub mod controllers;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;
