//! Input validation functions
//!
//! Field-level rules for staff and menu input. Length, range and email
//! checks are declared on the request types with the `validator` derive;
//! the character-level rules live here.

use regex_lite::Regex;
use rust_decimal::Decimal;
use std::sync::OnceLock;
use validator::ValidationErrors;

const USERNAME_PATTERN: &str = r"^[A-Za-z0-9_.\-]+$";
const MOBILE_PATTERN: &str = r"^\+?[0-9]{10,15}$";

fn compiled(cell: &'static OnceLock<Option<Regex>>, pattern: &str) -> Option<&'static Regex> {
    cell.get_or_init(|| Regex::new(pattern).ok()).as_ref()
}

fn username_regex() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    compiled(&RE, USERNAME_PATTERN)
}

fn mobile_regex() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    compiled(&RE, MOBILE_PATTERN)
}

/// Validate username characters
///
/// Letters, digits, `_`, `.` and `-` only. Length is checked on the request type.
pub fn validate_username(username: &str) -> Result<(), String> {
    if username.trim().is_empty() {
        return Err("Username is required".to_string());
    }
    if !username_regex().is_some_and(|re| re.is_match(username)) {
        return Err("Username may only contain letters, digits, '_', '.' and '-'".to_string());
    }
    Ok(())
}

/// Validate a mobile number: 10-15 digits, optionally prefixed with `+`
pub fn validate_mobile(mobile: &str) -> Result<(), String> {
    if !mobile_regex().is_some_and(|re| re.is_match(mobile)) {
        return Err("Enter 10-15 digits (optionally starting with +)".to_string());
    }
    Ok(())
}

/// Validate salary amount
pub fn validate_salary(salary: &Decimal) -> Result<(), String> {
    if salary.is_sign_negative() {
        return Err("Salary cannot be negative".to_string());
    }
    Ok(())
}

/// Validate menu price
pub fn validate_price(price: &Decimal) -> Result<(), String> {
    if price.is_sign_negative() {
        return Err("Price cannot be negative".to_string());
    }
    Ok(())
}

/// Flatten derive-validation errors into one stable message
///
/// Picks the alphabetically first failing field so the same input always
/// yields the same message.
pub fn first_error_message(errors: &ValidationErrors) -> String {
    let mut messages: Vec<(String, String)> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            let field = field.to_string();
            errs.iter().map(move |e| {
                let message = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid value for {}", field));
                (field.clone(), message)
            })
        })
        .collect();
    messages.sort();
    messages
        .into_iter()
        .next()
        .map(|(_, message)| message)
        .unwrap_or_else(|| "Invalid input".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    #[rstest]
    #[case("alice")]
    #[case("front.desk_01")]
    #[case("night-manager")]
    fn test_valid_usernames(#[case] username: &str) {
        assert!(validate_username(username).is_ok());
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("alice smith")]
    #[case("alice@hotel")]
    #[case("élise")]
    #[case("alice\n")]
    fn test_invalid_usernames(#[case] username: &str) {
        assert!(validate_username(username).is_err());
    }

    #[rstest]
    #[case("+911234567890", true)]
    #[case("9876543210", true)]
    #[case("12345", false)]
    #[case("+91-12345-67890", false)]
    #[case("1234567890123456", false)]
    #[case("+ 1234567890", false)]
    #[case("１２３４５６７８９０", false)]
    fn test_validate_mobile(#[case] mobile: &str, #[case] ok: bool) {
        assert_eq!(validate_mobile(mobile).is_ok(), ok);
    }

    #[test]
    fn test_patterns_compile() {
        assert!(username_regex().is_some());
        assert!(mobile_regex().is_some());
    }

    #[test]
    fn test_negative_amounts_rejected() {
        assert!(validate_salary(&Decimal::new(-1, 0)).is_err());
        assert!(validate_salary(&Decimal::ZERO).is_ok());
        assert!(validate_price(&Decimal::new(-150, 2)).is_err());
        assert!(validate_price(&Decimal::new(14999, 2)).is_ok());
    }

    proptest! {
        #[test]
        fn prop_digit_strings_of_valid_length_are_mobiles(
            digits in "[0-9]{10,15}",
            plus in any::<bool>(),
        ) {
            let mobile = if plus { format!("+{}", digits) } else { digits };
            prop_assert!(validate_mobile(&mobile).is_ok());
        }

        #[test]
        fn prop_usernames_with_spaces_are_rejected(
            head in "[a-z]{2,10}",
            tail in "[a-z]{2,10}",
        ) {
            let username = format!("{} {}", head, tail);
            prop_assert!(validate_username(&username).is_err());
        }
    }
}
