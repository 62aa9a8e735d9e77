//! # Error Types Module
//!
//! Error types for the fallible boundaries around the merge core: recipe
//! authoring, share-link decoding and free-text ingredient parsing. The
//! core itself (normalization, merge, rounding, dietary detection) never
//! fails.

/// Reasons a recipe or ingredient is rejected at authoring time
#[derive(Debug, Clone, PartialEq)]
pub enum RecipeValidationError {
    /// Recipe name is empty or whitespace
    EmptyName,
    /// Recipe name exceeds the maximum length
    NameTooLong(usize),
    /// Recipe has no ingredients
    NoIngredients,
    /// Base servings is zero
    InvalidServings,
    /// An ingredient has an empty name
    EmptyIngredientName,
    /// An ingredient has a zero, negative or non-finite quantity
    InvalidQuantity { name: String, quantity: f64 },
}

impl std::fmt::Display for RecipeValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecipeValidationError::EmptyName => write!(f, "Recipe name cannot be empty"),
            RecipeValidationError::NameTooLong(max) => {
                write!(f, "Recipe name is too long (maximum {max} characters)")
            }
            RecipeValidationError::NoIngredients => {
                write!(f, "Recipe must have at least one ingredient")
            }
            RecipeValidationError::InvalidServings => write!(f, "Servings must be at least 1"),
            RecipeValidationError::EmptyIngredientName => write!(f, "Ingredient name cannot be empty"),
            RecipeValidationError::InvalidQuantity { name, quantity } => {
                write!(f, "Ingredient '{name}' has invalid quantity {quantity}")
            }
        }
    }
}

impl std::error::Error for RecipeValidationError {}

/// Reasons a share code cannot be decoded
#[derive(Debug)]
pub enum ShareDecodeError {
    /// The code is not valid base64
    Base64(base64::DecodeError),
    /// The decoded bytes are not UTF-8
    Utf8(std::string::FromUtf8Error),
    /// The payload is not JSON of the expected shape
    Json(serde_json::Error),
    /// The URL has no `list` parameter
    MissingListParameter,
}

impl std::fmt::Display for ShareDecodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShareDecodeError::Base64(err) => write!(f, "Invalid share code encoding: {err}"),
            ShareDecodeError::Utf8(err) => write!(f, "Share code is not valid text: {err}"),
            ShareDecodeError::Json(err) => write!(f, "Share code has an invalid payload: {err}"),
            ShareDecodeError::MissingListParameter => write!(f, "Share URL has no list parameter"),
        }
    }
}

impl std::error::Error for ShareDecodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ShareDecodeError::Base64(err) => Some(err),
            ShareDecodeError::Utf8(err) => Some(err),
            ShareDecodeError::Json(err) => Some(err),
            ShareDecodeError::MissingListParameter => None,
        }
    }
}

impl From<base64::DecodeError> for ShareDecodeError {
    fn from(err: base64::DecodeError) -> Self {
        ShareDecodeError::Base64(err)
    }
}

impl From<std::string::FromUtf8Error> for ShareDecodeError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        ShareDecodeError::Utf8(err)
    }
}

impl From<serde_json::Error> for ShareDecodeError {
    fn from(err: serde_json::Error) -> Self {
        ShareDecodeError::Json(err)
    }
}

/// Reasons a free-text ingredient line cannot be parsed
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    EmptyLine,
    NoIngredientName,
    InvalidNumber(String),
    DivisionByZero,
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::EmptyLine => write!(f, "Ingredient line is empty"),
            ParseError::NoIngredientName => write!(f, "No ingredient name found"),
            ParseError::InvalidNumber(text) => write!(f, "Invalid number format: {text}"),
            ParseError::DivisionByZero => write!(f, "Division by zero in fraction"),
        }
    }
}

impl std::error::Error for ParseError {}
