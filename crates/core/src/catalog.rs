//! Field rules for catalog categories and books.
//!
//! Lengths are counted in characters, not bytes, so Cyrillic and other
//! multi-byte titles get the same budget as ASCII ones. The database
//! schema carries matching `CHECK` constraints.

use crate::error::CoreError;

/// Maximum length of a category title.
pub const MAX_CATEGORY_TITLE_LEN: usize = 100;

/// Maximum length of a book title.
pub const MAX_BOOK_TITLE_LEN: usize = 200;

/// Maximum length of a book description.
pub const MAX_BOOK_DESCRIPTION_LEN: usize = 2000;

/// Maximum length of a book URL.
pub const MAX_BOOK_URL_LEN: usize = 500;

/// Entity names used in error payloads.
pub const ENTITY_CATEGORY: &str = "Category";
pub const ENTITY_BOOK: &str = "Book";

/// Reject NUL characters, which PostgreSQL `text` columns cannot store.
fn validate_no_nul(field: &str, value: &str) -> Result<(), CoreError> {
    if value.contains('\0') {
        return Err(CoreError::Validation(format!(
            "{field} must not contain NUL characters"
        )));
    }
    Ok(())
}

fn validate_length(field: &str, value: &str, min: usize, max: usize) -> Result<(), CoreError> {
    validate_no_nul(field, value)?;
    let len = value.chars().count();
    if len < min {
        return Err(CoreError::Validation(format!("{field} must not be empty")));
    }
    if len > max {
        return Err(CoreError::Validation(format!(
            "{field} must not exceed {max} characters"
        )));
    }
    Ok(())
}

/// Validate a category title: 1 to [`MAX_CATEGORY_TITLE_LEN`] characters.
pub fn validate_category_title(title: &str) -> Result<(), CoreError> {
    validate_length("Category title", title, 1, MAX_CATEGORY_TITLE_LEN)
}

/// Validate a book title: 1 to [`MAX_BOOK_TITLE_LEN`] characters.
pub fn validate_book_title(title: &str) -> Result<(), CoreError> {
    validate_length("Book title", title, 1, MAX_BOOK_TITLE_LEN)
}

/// Validate an optional book description.
pub fn validate_book_description(description: Option<&str>) -> Result<(), CoreError> {
    match description {
        Some(d) => validate_length("Book description", d, 0, MAX_BOOK_DESCRIPTION_LEN),
        None => Ok(()),
    }
}

/// Validate an optional book URL.
pub fn validate_book_url(url: Option<&str>) -> Result<(), CoreError> {
    match url {
        Some(u) => validate_length("Book url", u, 0, MAX_BOOK_URL_LEN),
        None => Ok(()),
    }
}

/// Validate a price: finite and not negative.
pub fn validate_price(field: &str, price: f64) -> Result<(), CoreError> {
    if !price.is_finite() {
        return Err(CoreError::Validation(format!(
            "{field} must be a finite number"
        )));
    }
    if price < 0.0 {
        return Err(CoreError::Validation(format!(
            "{field} must be greater than or equal to 0"
        )));
    }
    Ok(())
}

/// Validate every field of a book in one pass.
pub fn validate_book_fields(
    title: &str,
    description: Option<&str>,
    price: f64,
    url: Option<&str>,
) -> Result<(), CoreError> {
    validate_book_title(title)?;
    validate_book_description(description)?;
    validate_price("Book price", price)?;
    validate_book_url(url)?;
    Ok(())
}

/// Validate the optional title needle of a book search.
pub fn validate_title_filter(title: Option<&str>) -> Result<(), CoreError> {
    match title {
        Some(t) => validate_no_nul("title", t),
        None => Ok(()),
    }
}

/// Validate optional price bounds of a book search.
///
/// An inverted range (`min > max`) is allowed and simply matches nothing.
pub fn validate_price_filter(
    min_price: Option<f64>,
    max_price: Option<f64>,
) -> Result<(), CoreError> {
    if let Some(min) = min_price {
        validate_price("min_price", min)?;
    }
    if let Some(max) = max_price {
        validate_price("max_price", max)?;
    }
    Ok(())
}
