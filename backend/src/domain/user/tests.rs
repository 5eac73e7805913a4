//! Tests for the domain user model.

use super::*;
use rstest::rstest;

#[rstest]
#[case("3fa85f64-5717-4562-b3fc-2c963f66afa6", true)]
#[case(" 3fa85f64-5717-4562-b3fc-2c963f66afa6", false)]
#[case("not-a-uuid", false)]
#[case("", false)]
fn user_id_parsing(#[case] raw: &str, #[case] accepted: bool) {
    assert_eq!(UserId::new(raw).is_ok(), accepted);
}

#[rstest]
fn user_id_displays_canonical_uuid() {
    let uuid = Uuid::new_v4();
    assert_eq!(UserId::from_uuid(uuid).to_string(), uuid.to_string());
}

#[rstest]
#[case("  Demo User ", Ok("Demo User"))]
#[case("   ", Err(UserValidationError::EmptyName))]
fn user_name_is_trimmed(#[case] raw: &str, #[case] expected: Result<&str, UserValidationError>) {
    let result = UserName::new(raw);
    match expected {
        Ok(name) => assert_eq!(result.expect("valid name").as_ref(), name),
        Err(err) => assert_eq!(result, Err(err)),
    }
}

#[rstest]
fn user_name_rejects_overlong_values() {
    let raw = "n".repeat(USER_NAME_MAX + 1);
    assert_eq!(
        UserName::new(raw),
        Err(UserValidationError::NameTooLong {
            max: USER_NAME_MAX
        })
    );
}

#[rstest]
#[case("demo@example.com")]
#[case("first.last+tag@sub.example.org")]
fn email_accepts_plausible_addresses(#[case] raw: &str) {
    assert_eq!(Email::new(raw).expect("valid email").as_ref(), raw);
}

#[rstest]
#[case("", UserValidationError::EmptyEmail)]
#[case("demo", UserValidationError::InvalidEmail)]
#[case("@example.com", UserValidationError::InvalidEmail)]
#[case("demo@example", UserValidationError::InvalidEmail)]
#[case("demo@@example.com", UserValidationError::InvalidEmail)]
#[case("de mo@example.com", UserValidationError::InvalidEmail)]
#[case("demo@example..com", UserValidationError::InvalidEmail)]
fn email_rejects_malformed_addresses(#[case] raw: &str, #[case] expected: UserValidationError) {
    assert_eq!(Email::new(raw), Err(expected));
}

#[rstest]
fn email_preserves_case() {
    let email = Email::new("Demo@Example.com").expect("valid email");
    assert_ne!(email, Email::new("demo@example.com").expect("valid email"));
}

#[rstest]
fn validation_errors_report_their_field() {
    assert_eq!(UserValidationError::EmptyName.field(), "name");
    assert_eq!(UserValidationError::InvalidEmail.field(), "email");
}

#[rstest]
fn account_into_user_drops_hash() {
    let user = User::new(
        UserId::random(),
        UserName::new("Demo User").expect("name"),
        Email::new("demo@example.com").expect("email"),
    );
    let account = UserAccount::new(user.clone(), PasswordHash::new("$2b$10$hash"));
    assert_eq!(account.into_user(), user);
}
