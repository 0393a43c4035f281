use serde::Deserialize;
use validator::Validate;

use crate::domain::types::Username;
use crate::forms::{FormErrors, NON_FIELD_ERRORS};

/// Minimum accepted password length in characters.
pub const MIN_PASSWORD_LEN: usize = 8;

pub const INVALID_LOGIN_MESSAGE: &str = "Please enter a correct username and password.";
pub const DUPLICATE_USERNAME_MESSAGE: &str = "A user with that username already exists.";
const INVALID_USERNAME_MESSAGE: &str = "Enter a valid username. This value may contain only \
     letters, numbers, and @/./+/-/_ characters.";

/// Keep `next` only when it points back into this site.
///
/// Browsers drop tabs and newlines from URLs, so any whitespace or control
/// character inside the path is rejected outright.
pub fn sanitize_next(next: Option<String>) -> Option<String> {
    next.map(|n| n.trim().to_string()).filter(|n| {
        n.starts_with('/')
            && !n.starts_with("//")
            && !n.contains('\\')
            && !n.chars().any(|c| c.is_whitespace() || c.is_control())
    })
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct SignupForm {
    #[serde(default)]
    #[validate(length(min = 1, message = "This field is required."))]
    pub username: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "This field is required."))]
    pub password1: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "This field is required."))]
    pub password2: String,
}

/// Validated signup data. The password is still plain text; hashing happens
/// in the auth service.
#[derive(Debug, Clone, PartialEq)]
pub struct SignupPayload {
    pub username: Username,
    pub password: String,
}

fn check_password(password: &str, username: &str, errors: &mut FormErrors) {
    if password.chars().count() < MIN_PASSWORD_LEN {
        errors.add(
            "password2",
            format!(
                "This password is too short. It must contain at least {MIN_PASSWORD_LEN} characters."
            ),
        );
    }
    if password.chars().all(|c| c.is_ascii_digit()) {
        errors.add("password2", "This password is entirely numeric.");
    }
    if !username.is_empty() && password.to_lowercase() == username.to_lowercase() {
        errors.add("password2", "The password is too similar to the username.");
    }
}

impl TryFrom<SignupForm> for SignupPayload {
    type Error = FormErrors;

    fn try_from(value: SignupForm) -> Result<Self, Self::Error> {
        let mut errors = match value.validate() {
            Ok(()) => FormErrors::new(),
            Err(e) => FormErrors::from(e),
        };

        let username = match Username::new(value.username.as_str()) {
            Ok(username) => Some(username),
            Err(_) if value.username.trim().is_empty() => None,
            Err(_) => {
                errors.add("username", INVALID_USERNAME_MESSAGE);
                None
            }
        };

        if !value.password1.is_empty() && !value.password2.is_empty() {
            if value.password1 != value.password2 {
                errors.add("password2", "The two password fields didn't match.");
            } else {
                check_password(&value.password2, value.username.trim(), &mut errors);
            }
        }

        errors.into_result()?;
        match username {
            Some(username) => Ok(Self {
                username,
                password: value.password1,
            }),
            None => Err(FormErrors::non_field(INVALID_USERNAME_MESSAGE)),
        }
    }
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct LoginForm {
    #[serde(default)]
    #[validate(length(min = 1, message = "This field is required."))]
    pub username: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "This field is required."))]
    pub password: String,
    pub next: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoginPayload {
    pub username: Username,
    pub password: String,
    /// Local path to continue to after login.
    pub next: Option<String>,
}

impl TryFrom<LoginForm> for LoginPayload {
    type Error = FormErrors;

    fn try_from(value: LoginForm) -> Result<Self, Self::Error> {
        value.validate()?;
        // A name that could never have been registered is reported like a
        // wrong password.
        let username = Username::new(value.username)
            .map_err(|_| FormErrors::non_field(INVALID_LOGIN_MESSAGE))?;
        Ok(Self {
            username,
            password: value.password,
            next: sanitize_next(value.next),
        })
    }
}

/// Errors used when the signup service rejects an otherwise valid form.
pub fn duplicate_username() -> FormErrors {
    let mut errors = FormErrors::new();
    errors.add("username", DUPLICATE_USERNAME_MESSAGE);
    errors
}

/// Errors shown on the login page for a failed credential check.
pub fn invalid_login() -> FormErrors {
    let mut errors = FormErrors::new();
    errors.add(NON_FIELD_ERRORS, INVALID_LOGIN_MESSAGE);
    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signup(username: &str, password1: &str, password2: &str) -> SignupForm {
        SignupForm {
            username: username.to_string(),
            password1: password1.to_string(),
            password2: password2.to_string(),
        }
    }

    #[test]
    fn accepts_valid_signup() {
        let payload: SignupPayload = signup(" alice ", "correct-horse", "correct-horse")
            .try_into()
            .unwrap();

        assert_eq!(payload.username.as_str(), "alice");
        assert_eq!(payload.password, "correct-horse");
    }

    #[test]
    fn rejects_mismatched_passwords() {
        let errors = SignupPayload::try_from(signup("alice", "correct-horse", "correct-horsf"))
            .unwrap_err();

        assert_eq!(
            errors.field("password2"),
            ["The two password fields didn't match."]
        );
    }

    #[test]
    fn collects_every_password_problem() {
        let errors = SignupPayload::try_from(signup("1234", "1234", "1234")).unwrap_err();

        let messages = errors.field("password2");
        assert_eq!(messages.len(), 3);
        assert!(messages[0].starts_with("This password is too short."));
        assert_eq!(messages[1], "This password is entirely numeric.");
        assert_eq!(messages[2], "The password is too similar to the username.");
    }

    #[test]
    fn password_similarity_ignores_case() {
        let errors =
            SignupPayload::try_from(signup("LongUserName", "longusername", "longusername"))
                .unwrap_err();

        assert_eq!(
            errors.field("password2"),
            ["The password is too similar to the username."]
        );
    }

    #[test]
    fn reports_missing_fields() {
        let errors = SignupPayload::try_from(SignupForm::default()).unwrap_err();

        assert_eq!(errors.field("username"), ["This field is required."]);
        assert_eq!(errors.field("password1"), ["This field is required."]);
        assert_eq!(errors.field("password2"), ["This field is required."]);
    }

    #[test]
    fn rejects_invalid_username_characters() {
        let errors =
            SignupPayload::try_from(signup("bad name", "correct-horse", "correct-horse"))
                .unwrap_err();

        assert_eq!(errors.field("username"), [INVALID_USERNAME_MESSAGE]);
    }

    #[test]
    fn login_keeps_local_next_only() {
        let form = |next: &str| LoginForm {
            username: "alice".into(),
            password: "secret".into(),
            next: Some(next.into()),
        };

        let local: LoginPayload = form("/wishlist").try_into().unwrap();
        assert_eq!(local.next.as_deref(), Some("/wishlist"));

        for next in [
            "//evil.example",
            "https://evil.example/",
            "wishlist",
            "/\\evil",
            "/\t/evil.example",
            "/\n/evil.example",
            "/ /evil.example",
        ] {
            let payload: LoginPayload = form(next).try_into().unwrap();
            assert_eq!(payload.next, None, "{next}");
        }
    }

    #[test]
    fn login_requires_both_fields() {
        let errors = LoginPayload::try_from(LoginForm::default()).unwrap_err();

        assert!(!errors.field("username").is_empty());
        assert!(!errors.field("password").is_empty());
    }
}
