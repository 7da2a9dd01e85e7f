//! Submission validation.
//!
//! Bodies are inspected as raw JSON so that a wrong type yields the same
//! field-level message as a wrong value.

use serde_json::Value;

use crate::error::ValidationError;
use crate::protocol::{NewScore, MAX_EMAIL_CHARS, MAX_NAME_CHARS, MAX_SCORE};

/// Turn a raw `POST /scores` body into a normalised [`NewScore`].
///
/// The name is trimmed; the email is trimmed and lowercased.
pub fn parse_submission(body: &Value) -> Result<NewScore, ValidationError> {
    let (Some(name), Some(email), Some(score)) = (
        field(body, "playerName"),
        field(body, "playerEmail"),
        field(body, "score"),
    )
    else {
        return Err(ValidationError::MissingFields);
    };

    let player_name = validate_name(name)?;
    let player_email = validate_email(email)?;
    let score = validate_score(score)?;

    Ok(NewScore {
        player_name,
        player_email,
        score,
    })
}

fn field<'a>(body: &'a Value, key: &str) -> Option<&'a Value> {
    body.get(key).filter(|v| !v.is_null())
}

fn validate_name(value: &Value) -> Result<String, ValidationError> {
    let name = value.as_str().ok_or(ValidationError::InvalidName)?.trim();
    if name.is_empty() {
        return Err(ValidationError::InvalidName);
    }
    if name.chars().count() > MAX_NAME_CHARS {
        return Err(ValidationError::NameTooLong);
    }
    Ok(name.to_string())
}

fn validate_email(value: &Value) -> Result<String, ValidationError> {
    let email = value
        .as_str()
        .ok_or(ValidationError::InvalidEmail)?
        .trim()
        .to_lowercase();
    if email.chars().count() > MAX_EMAIL_CHARS {
        return Err(ValidationError::EmailTooLong);
    }
    if !is_valid_email(&email) {
        return Err(ValidationError::InvalidEmail);
    }
    Ok(email)
}

fn validate_score(value: &Value) -> Result<u32, ValidationError> {
    let score = match value.as_u64() {
        Some(n) => n,
        None => match value.as_f64() {
            Some(f) if f >= 0.0 && f.fract() == 0.0 => f as u64,
            _ => return Err(ValidationError::InvalidScore),
        },
    };
    if score > u64::from(MAX_SCORE) {
        return Err(ValidationError::InvalidScore);
    }
    Ok(score as u32)
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Word characters split by single `.` or `-`, no separator at either end.
fn is_word_run(s: &str) -> bool {
    !s.is_empty()
        && s.split(|c| c == '.' || c == '-')
            .all(|part| !part.is_empty() && part.chars().all(is_word_char))
}

/// Email shape check: `local@domain.tld`.
///
/// Local part and domain are word runs; the domain must end in a `.`
/// followed by a 2 or 3 character label, with at least one label before it.
///
/// ```
/// use tui_snake_leaderboard::is_valid_email;
///
/// assert!(is_valid_email("ana.silva@mail.example.com"));
/// assert!(!is_valid_email("ana@localhost"));
/// ```
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if !is_word_run(local) || !is_word_run(domain) {
        return false;
    }
    let Some(dot) = domain.rfind('.') else {
        return false;
    };
    let tld = &domain[dot + 1..];
    dot > 0 && !tld.contains('-') && (2..=3).contains(&tld.len())
}
