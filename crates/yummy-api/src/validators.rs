//! Input validators for user-supplied text
//!
//! Pure functions: each takes raw request fields, normalizes them, and
//! either returns the normalized values or the first violated rule as a
//! `ValidationError`. Callers turn the error into a 400 response.
//!
//! Rule precedence is fixed: presence of all fields, secret word, username
//! pattern, email syntax, password length.

use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;
use validator::ValidateEmail;
use yummy_core::text::{collapse_whitespace, normalize_email, normalize_name};

lazy_static! {
    /// Letters, digits, spaces, hyphens, and periods only
    static ref NAME_PATTERN: Regex = Regex::new(r"^[A-Za-z0-9 .-]+$").unwrap();
}

/// First violated validation rule, carrying the message for the 400 body
#[derive(Debug, Error, PartialEq, Eq)]
#[error("{0}")]
pub struct ValidationError(pub String);

impl ValidationError {
    fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

impl From<ValidationError> for crate::error::AppError {
    fn from(err: ValidationError) -> Self {
        Self::ValidationFailed(err.0)
    }
}

/// Normalized registration fields, ready for hashing and persistence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRegistration {
    pub email: String,
    pub username: String,
    pub password: String,
    pub secret_word: String,
}

/// Validate and normalize a registration request
pub fn validate_registration(
    email: &str,
    username: &str,
    password: &str,
    secret_word: &str,
) -> Result<NewRegistration, ValidationError> {
    let email = normalize_email(email);
    let username = normalize_name(username);
    let secret_word = collapse_whitespace(secret_word);

    if email.is_empty() || username.is_empty() || password.is_empty() {
        return Err(ValidationError::new("Kindly provide all details"));
    }
    if secret_word.is_empty() {
        return Err(ValidationError::new("Kindly provide a secret word"));
    }
    if !NAME_PATTERN.is_match(&username) {
        return Err(ValidationError::new(format!(
            "{username} is not a valid username"
        )));
    }
    if !email.validate_email() {
        return Err(ValidationError::new(format!("{email} is not a valid email")));
    }
    if password.chars().count() < 6 {
        return Err(ValidationError::new(
            "Password should be more than six characters",
        ));
    }

    Ok(NewRegistration {
        email,
        username,
        password: password.to_string(),
        secret_word,
    })
}

/// Validate a login request: both fields present, no format checks
pub fn validate_login(email: &str, password: &str) -> Result<String, ValidationError> {
    let email = normalize_email(email);
    if email.is_empty() || password.is_empty() {
        return Err(ValidationError::new("Kindly provide email and password"));
    }
    Ok(email)
}

/// Normalized password-reset fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordReset {
    pub email: String,
    pub reset_password: String,
    pub secret_word: String,
}

/// Validate a password-reset request
pub fn validate_password_reset(
    email: &str,
    reset_password: &str,
    secret_word: &str,
) -> Result<PasswordReset, ValidationError> {
    let email = normalize_email(email);
    let reset_password = collapse_whitespace(reset_password);
    let secret_word = collapse_whitespace(secret_word);

    if reset_password.is_empty() {
        return Err(ValidationError::new("Kindly provide a reset password"));
    }
    if email.is_empty() {
        return Err(ValidationError::new("Invalid user email"));
    }
    if secret_word.is_empty() {
        return Err(ValidationError::new("Invalid secret word"));
    }

    Ok(PasswordReset {
        email,
        reset_password,
        secret_word,
    })
}

/// Validate and normalize a category name
pub fn validate_category_name(category_name: &str) -> Result<String, ValidationError> {
    let category_name = normalize_name(category_name);

    if category_name.is_empty() {
        return Err(ValidationError::new("Category name not provided"));
    }
    if !NAME_PATTERN.is_match(&category_name) {
        return Err(ValidationError::new("Category name is not valid"));
    }

    Ok(category_name)
}

/// Normalized recipe fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRecipe {
    pub recipe_name: String,
    pub recipe_ingredients: String,
    pub recipe_methods: String,
}

/// Validate and normalize recipe fields
pub fn validate_recipe(
    recipe_name: &str,
    recipe_ingredients: &str,
    recipe_methods: &str,
) -> Result<NewRecipe, ValidationError> {
    let recipe_name = normalize_name(recipe_name);
    let recipe_ingredients = collapse_whitespace(recipe_ingredients);
    let recipe_methods = collapse_whitespace(recipe_methods);

    if recipe_name.is_empty() {
        return Err(ValidationError::new("Recipe name not provided"));
    }
    if recipe_ingredients.is_empty() {
        return Err(ValidationError::new("Recipe ingredients not provided"));
    }
    if recipe_methods.is_empty() {
        return Err(ValidationError::new(
            "Recipe preparation methods not provided",
        ));
    }
    if !NAME_PATTERN.is_match(&recipe_name) {
        return Err(ValidationError::new("Recipe name is not valid"));
    }

    Ok(NewRecipe {
        recipe_name,
        recipe_ingredients,
        recipe_methods,
    })
}
