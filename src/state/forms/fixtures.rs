//! Shared test fixtures

use super::schema::names;

/// Values that satisfy every registration rule
pub fn valid_values() -> Vec<(&'static str, &'static str)> {
    vec![
        (names::FIRST_NAME, "Al"),
        (names::LAST_NAME, "Lee"),
        (names::EMAIL, "a@b.co"),
        (names::MOBILE, "1234567890"),
        (names::SSN, "123456789"),
        (names::CONFIRM_SSN, "123456789"),
        (names::EMERGENCY_NAME, "Jo"),
        (names::EMERGENCY_MOBILE, "1234567890"),
        (names::ADDRESS, "123 Main St long enough"),
        (names::CITY, "Metropolis"),
        (names::PASSWORD, "secret1"),
    ]
}
