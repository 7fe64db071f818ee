//! Módulo de utilidades
//!
//! Contiene helpers compartidos del sistema.

pub mod errors;
pub mod jwt;
pub mod validation;
