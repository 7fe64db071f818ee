//! Generación de códigos de transferencia
//!
//! Los códigos son cortos y pensados para dictarse o copiarse a mano:
//! alfabeto en mayúsculas sin caracteres ambiguos (I, L, O, 0, 1).
//! Con 8 caracteres sobre 31 posibles el espacio de códigos ronda 8.5e11,
//! suficiente contra fuerza bruta dentro de la ventana de una transferencia.

use rand::distributions::{Distribution, Uniform};
use rand::rngs::OsRng;

/// Longitud del código generado
pub const CODE_LENGTH: usize = 8;

/// Alfabeto sin caracteres ambiguos
pub const CODE_ALPHABET: &[u8] = b"ABCDEFGHJKMNPQRSTUVWXYZ23456789";

/// Generar un código de transferencia uniforme sobre el alfabeto
///
/// Usa OsRng (CSPRNG del sistema) con una distribución Uniform sobre los
/// índices del alfabeto, sin sesgo por módulo.
pub fn generate_transfer_code() -> String {
    let dist = Uniform::from(0..CODE_ALPHABET.len());
    let mut rng = OsRng;

    (0..CODE_LENGTH)
        .map(|_| CODE_ALPHABET[dist.sample(&mut rng)] as char)
        .collect()
}

/// Normalizar un código presentado por el usuario antes de buscarlo
///
/// La comparación es insensible a mayúsculas y espacios alrededor.
pub fn normalize_code(raw: &str) -> String {
    raw.trim().to_ascii_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_length_and_alphabet() {
        let code = generate_transfer_code();
        assert_eq!(code.len(), CODE_LENGTH);
        assert!(code.bytes().all(|b| CODE_ALPHABET.contains(&b)));
    }

    #[test]
    fn test_code_avoids_ambiguous_characters() {
        for _ in 0..50 {
            let code = generate_transfer_code();
            for forbidden in ['I', 'L', 'O', '0', '1'] {
                assert!(!code.contains(forbidden), "code {} contains {}", code, forbidden);
            }
        }
    }

    #[test]
    fn test_codes_are_distinct() {
        let a = generate_transfer_code();
        let b = generate_transfer_code();
        assert_ne!(a, b);
    }

    #[test]
    fn test_normalize_code() {
        assert_eq!(normalize_code("  x7z9a  "), "X7Z9A");
        assert_eq!(normalize_code("ABCD2345"), "ABCD2345");
        assert_eq!(normalize_code("   "), "");
    }
}
