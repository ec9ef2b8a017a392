#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum NameError {
    #[error("service name is empty")]
    Empty,
    #[error("service name {0:?} contains an invalid character {1:?}")]
    InvalidCharacter(String, char),
    #[error("service name {0:?} contains an empty token")]
    EmptyToken(String),
    #[error("service name {0:?} has a token starting with a digit")]
    LeadingDigit(String),
}

/// Makes a relative service name absolute: `add_two_ints` becomes `/add_two_ints`.
pub fn to_absolute_name(name: &str) -> Result<String, NameError> {
    let trimmed = name.trim_start_matches('/');
    if trimmed.is_empty() {
        return Err(NameError::Empty);
    }
    if let Some(c) = trimmed
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '_' || *c == '/'))
    {
        return Err(NameError::InvalidCharacter(name.to_owned(), c));
    }
    let mut tokens = trimmed.split('/');
    if tokens.clone().any(str::is_empty) {
        return Err(NameError::EmptyToken(name.to_owned()));
    }
    if tokens.any(|token| token.starts_with(|c: char| c.is_ascii_digit())) {
        return Err(NameError::LeadingDigit(name.to_owned()));
    }
    Ok(format!("/{trimmed}"))
}

/// Flattens a service name into an id usable as a socket or pipe name.
///
/// Namespace separators become `.`, which valid names never contain, so
/// distinct names never share an endpoint.
pub fn endpoint_id(name: &str) -> Result<String, NameError> {
    let absolute = to_absolute_name(name)?;
    Ok(absolute[1..].replace('/', "."))
}
