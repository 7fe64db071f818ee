//! Funciones de validación
//!
//! Este módulo contiene funciones helper de validación reutilizables
//! para los datos de entrada de la API.

use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

lazy_static! {
    // VIN estándar: 17 caracteres alfanuméricos, sin I, O ni Q
    static ref VIN_REGEX: Regex = Regex::new(r"^[A-HJ-NPR-Z0-9]{17}$").unwrap();
}

/// Validar que un string no esté vacío (ignorando espacios)
pub fn validate_not_empty(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_empty");
        error.add_param("value".into(), &value);
        return Err(error);
    }
    Ok(())
}

/// Validar el formato de un VIN
pub fn validate_vin(value: &str) -> Result<(), ValidationError> {
    if !VIN_REGEX.is_match(&value.to_ascii_uppercase()) {
        let mut error = ValidationError::new("vin");
        error.add_param("value".into(), &value);
        return Err(error);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_not_empty() {
        assert!(validate_not_empty("Toyota").is_ok());
        assert!(validate_not_empty("").is_err());
        assert!(validate_not_empty("   ").is_err());
    }

    #[test]
    fn test_validate_vin() {
        assert!(validate_vin("1HGBH41JXMN109186").is_ok());
        assert!(validate_vin("1hgbh41jxmn109186").is_ok());

        // Demasiado corto
        assert!(validate_vin("1HGBH41").is_err());
        // Contiene caracteres prohibidos (I, O, Q)
        assert!(validate_vin("1HGBH41JXMN10918I").is_err());
    }

}
