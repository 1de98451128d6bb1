use std::sync::Arc;

/// IATA-style airport code, e.g. `DEL`.
pub type AirportId = Arc<str>;

pub fn airport_id(code: &str) -> AirportId {
    Arc::from(code.trim().to_ascii_uppercase().as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_normalised() {
        assert_eq!(airport_id(" del "), Arc::from("DEL"));
        assert_eq!(airport_id("MUM"), Arc::from("MUM"));
    }
}
