//! Utilidades de validación
//!
//! Este módulo contiene funciones helper para validación de datos
//! y conversión de tipos.

use validator::ValidationError;

/// Validar que un string no esté vacío
pub fn validate_not_empty(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_empty");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar que un valor esté en un rango específico
pub fn validate_range<T: PartialOrd + std::fmt::Display + serde::Serialize>(
    value: T,
    min: T,
    max: T,
) -> Result<(), ValidationError> {
    if value < min || value > max {
        let mut error = ValidationError::new("range");
        error.add_param("min".into(), &min);
        error.add_param("max".into(), &max);
        error.add_param("actual".into(), &value);
        return Err(error);
    }
    Ok(())
}

/// Validar formato de teléfono (básico)
pub fn validate_phone(value: &str) -> Result<(), ValidationError> {
    let clean_phone = value.chars().filter(|c| c.is_ascii_digit()).collect::<String>();
    if clean_phone.len() < 10 || clean_phone.len() > 15 {
        let mut error = ValidationError::new("phone");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar formato de coordenadas GPS (simplificado)
pub fn validate_coordinates(lat: f64, lng: f64) -> Result<(), ValidationError> {
    if !(-90.0..=90.0).contains(&lat) {
        let mut error = ValidationError::new("latitude");
        error.add_param("value".into(), &lat);
        error.add_param("range".into(), &"-90.0 to 90.0".to_string());
        return Err(error);
    }

    if !(-180.0..=180.0).contains(&lng) {
        let mut error = ValidationError::new("longitude");
        error.add_param("value".into(), &lng);
        error.add_param("range".into(), &"-180.0 to 180.0".to_string());
        return Err(error);
    }

    Ok(())
}

/// Validar que un valor sea positivo
pub fn validate_positive<T: PartialOrd + std::fmt::Display + num_traits::Zero + serde::Serialize>(
    value: T,
) -> Result<(), ValidationError> {
    if value <= T::zero() {
        let mut error = ValidationError::new("positive");
        error.add_param("value".into(), &value);
        return Err(error);
    }
    Ok(())
}

/// Validar formato de placa vehicular
pub fn validate_plate(value: &str) -> Result<(), ValidationError> {
    let clean_plate = value.replace([' ', '-', '_'], "");
    if clean_plate.len() < 5 || clean_plate.len() > 10 {
        let mut error = ValidationError::new("plate");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar formato de CURP (18 caracteres alfanuméricos)
pub fn validate_curp(value: &str) -> Result<(), ValidationError> {
    if value.len() != 18 || !value.chars().all(|c| c.is_ascii_alphanumeric()) {
        let mut error = ValidationError::new("curp");
        error.add_param("value".into(), &value.to_string());
        error.add_param("format".into(), &"18 caracteres alfanuméricos".to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar formato de RFC (12 o 13 caracteres alfanuméricos)
pub fn validate_rfc(value: &str) -> Result<(), ValidationError> {
    let len = value.len();
    if !(12..=13).contains(&len) || !value.chars().all(|c| c.is_ascii_alphanumeric()) {
        let mut error = ValidationError::new("rfc");
        error.add_param("value".into(), &value.to_string());
        error.add_param("format".into(), &"12-13 caracteres alfanuméricos".to_string());
        return Err(error);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_not_empty() {
        assert!(validate_not_empty("algo").is_ok());
        assert!(validate_not_empty("").is_err());
        assert!(validate_not_empty("   ").is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range(5, 1, 10).is_ok());
        assert!(validate_range(0, 1, 10).is_err());
        assert!(validate_range(15, 1, 10).is_err());
    }

    #[test]
    fn test_validate_phone() {
        assert!(validate_phone("5512345678").is_ok());
        assert!(validate_phone("123").is_err());
        assert!(validate_phone("1234567890123456").is_err());
    }

    #[test]
    fn test_validate_coordinates() {
        assert!(validate_coordinates(19.4326, -99.1332).is_ok());
        assert!(validate_coordinates(91.0, -99.0).is_err());
        assert!(validate_coordinates(19.0, -181.0).is_err());
    }

    #[test]
    fn test_validate_positive() {
        assert!(validate_positive(5).is_ok());
        assert!(validate_positive(0).is_err());
        assert!(validate_positive(-5).is_err());
    }

    #[test]
    fn test_validate_plate() {
        assert!(validate_plate("AB-123-CD").is_ok());
        assert!(validate_plate("A").is_err());
        assert!(validate_plate("ABCDEFGHIJK").is_err());
    }

    #[test]
    fn test_validate_curp() {
        assert!(validate_curp("GOMC900101HDFLRL09").is_ok());
        assert!(validate_curp("GOMC900101").is_err());
        assert!(validate_curp("GOMC900101HDFLRL0-").is_err());
    }

    #[test]
    fn test_validate_rfc() {
        assert!(validate_rfc("GOMC900101AB1").is_ok());
        assert!(validate_rfc("GOMC900101AB").is_ok());
        assert!(validate_rfc("GOMC").is_err());
    }
}
