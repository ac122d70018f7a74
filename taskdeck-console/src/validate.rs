/// Typed input validation
///
/// Every check returns either the cleaned value or a `ValidationError`,
/// never a boolean with out-parameters. The same bounds apply as in the web
/// backend: title 1..=200 characters, description up to 500.

/// Maximum title length in characters
pub const MAX_TITLE_LENGTH: usize = 200;

/// Maximum description length in characters
pub const MAX_DESCRIPTION_LENGTH: usize = 500;

/// Validation failure with a printable message
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Title missing or empty after trimming
    #[error("Task title cannot be empty")]
    EmptyTitle,

    /// Title over the length bound
    #[error("Task title must be at most {MAX_TITLE_LENGTH} characters")]
    TitleTooLong,

    /// Description over the length bound
    #[error("Task description must be at most {MAX_DESCRIPTION_LENGTH} characters")]
    DescriptionTooLong,

    /// Task id input did not parse as a positive integer
    #[error("Task ID must be a positive number")]
    InvalidTaskId,
}

/// Validates and trims a title
///
/// # Errors
///
/// `EmptyTitle` when the trimmed title is empty, `TitleTooLong` past 200
/// characters
pub fn validate_title(input: &str) -> Result<String, ValidationError> {
    let title = input.trim();

    if title.is_empty() {
        return Err(ValidationError::EmptyTitle);
    }
    if title.chars().count() > MAX_TITLE_LENGTH {
        return Err(ValidationError::TitleTooLong);
    }

    Ok(title.to_string())
}

/// Validates and trims an optional description
///
/// Empty or whitespace-only input becomes `None`.
///
/// # Errors
///
/// `DescriptionTooLong` past 500 characters
pub fn validate_description(input: &str) -> Result<Option<String>, ValidationError> {
    let description = input.trim();

    if description.is_empty() {
        return Ok(None);
    }
    if description.chars().count() > MAX_DESCRIPTION_LENGTH {
        return Err(ValidationError::DescriptionTooLong);
    }

    Ok(Some(description.to_string()))
}

/// Parses a task id from user input
///
/// # Errors
///
/// `InvalidTaskId` unless the input is a positive integer
pub fn parse_task_id(input: &str) -> Result<u64, ValidationError> {
    match input.trim().parse::<u64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(ValidationError::InvalidTaskId),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_title_trims() {
        assert_eq!(validate_title("  Buy milk  ").unwrap(), "Buy milk");
    }

    #[test]
    fn test_validate_title_empty() {
        assert_eq!(validate_title(""), Err(ValidationError::EmptyTitle));
        assert_eq!(validate_title("   "), Err(ValidationError::EmptyTitle));
        assert_eq!(validate_title("\t\n"), Err(ValidationError::EmptyTitle));
    }

    #[test]
    fn test_validate_title_length_bound() {
        let exactly = "a".repeat(MAX_TITLE_LENGTH);
        assert!(validate_title(&exactly).is_ok());

        let over = "a".repeat(MAX_TITLE_LENGTH + 1);
        assert_eq!(validate_title(&over), Err(ValidationError::TitleTooLong));
    }

    #[test]
    fn test_validate_description_empty_becomes_none() {
        assert_eq!(validate_description("").unwrap(), None);
        assert_eq!(validate_description("   ").unwrap(), None);
    }

    #[test]
    fn test_validate_description_length_bound() {
        let exactly = "d".repeat(MAX_DESCRIPTION_LENGTH);
        assert_eq!(validate_description(&exactly).unwrap(), Some(exactly.clone()));

        let over = "d".repeat(MAX_DESCRIPTION_LENGTH + 1);
        assert_eq!(
            validate_description(&over),
            Err(ValidationError::DescriptionTooLong)
        );
    }

    #[test]
    fn test_parse_task_id() {
        assert_eq!(parse_task_id("1").unwrap(), 1);
        assert_eq!(parse_task_id(" 42 ").unwrap(), 42);

        assert_eq!(parse_task_id("0"), Err(ValidationError::InvalidTaskId));
        assert_eq!(parse_task_id("-3"), Err(ValidationError::InvalidTaskId));
        assert_eq!(parse_task_id("abc"), Err(ValidationError::InvalidTaskId));
        assert_eq!(parse_task_id(""), Err(ValidationError::InvalidTaskId));
        assert_eq!(parse_task_id("1.5"), Err(ValidationError::InvalidTaskId));
    }
}
