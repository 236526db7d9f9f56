//! Input validation helpers.
//!
//! The transport layer passes trimmed strings; these checks enforce the
//! structural rules the repositories rely on. Output encoding of markup is
//! deliberately not done here - that is a render-time concern.

use crate::error::DomainError;

/// Characters allowed in a stored filename besides ASCII alphanumerics.
const FILENAME_EXTRA: &[char] = &['.', '-', '_', ' '];

/// Validate registration input: all fields required, email must look like one.
pub fn registration(username: &str, password: &str, email: &str) -> Result<(), DomainError> {
    if username.is_empty() {
        return Err(DomainError::Validation("Username is required".into()));
    }
    if password.is_empty() {
        return Err(DomainError::Validation("Password is required".into()));
    }
    if email.is_empty() || !email.contains('@') {
        return Err(DomainError::Validation("A valid mail address is required".into()));
    }
    Ok(())
}

/// Validate post input: title and body are required.
pub fn post_input(title: &str, body: &str) -> Result<(), DomainError> {
    if title.is_empty() {
        return Err(DomainError::Validation("Title is required".into()));
    }
    if body.is_empty() {
        return Err(DomainError::Validation("Body is required".into()));
    }
    Ok(())
}

/// Validate comment input.
pub fn comment_input(body: &str) -> Result<(), DomainError> {
    if body.is_empty() {
        return Err(DomainError::Validation("Comment body is required".into()));
    }
    Ok(())
}

/// Reduce an uploaded filename to a safe basename.
///
/// Strips directory components (both separator styles), drops characters
/// outside the allowed set, and rejects names that end up empty or dot-only.
pub fn sanitize_filename(raw: &str) -> Result<String, DomainError> {
    let basename = raw
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default();

    let cleaned: String = basename
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || FILENAME_EXTRA.contains(c))
        .collect();

    let cleaned = cleaned.trim().to_string();
    if cleaned.is_empty() || cleaned.chars().all(|c| c == '.') {
        return Err(DomainError::Validation(format!(
            "Unusable filename: {raw:?}"
        )));
    }

    Ok(cleaned)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registration_requires_all_fields() {
        assert!(registration("alice", "pw123!", "alice@example.com").is_ok());
        assert!(registration("", "pw", "a@b").is_err());
        assert!(registration("alice", "", "a@b").is_err());
        assert!(registration("alice", "pw", "").is_err());
        assert!(registration("alice", "pw", "not-a-mail").is_err());
    }

    #[test]
    fn post_requires_title_and_body() {
        assert!(post_input("Hello", "World").is_ok());
        assert!(post_input("", "World").is_err());
        assert!(post_input("Hello", "").is_err());
    }

    #[test]
    fn sanitize_keeps_plain_names() {
        assert_eq!(sanitize_filename("photo.png").unwrap(), "photo.png");
        assert_eq!(sanitize_filename("My Notes-v2.txt").unwrap(), "My Notes-v2.txt");
    }

    #[test]
    fn sanitize_strips_path_traversal() {
        assert_eq!(
            sanitize_filename("../../etc/passwd").unwrap(),
            "passwd"
        );
        assert_eq!(
            sanitize_filename("..\\..\\windows\\system.ini").unwrap(),
            "system.ini"
        );
    }

    #[test]
    fn sanitize_rejects_unusable_names() {
        assert!(sanitize_filename("").is_err());
        assert!(sanitize_filename("..").is_err());
        assert!(sanitize_filename("///").is_err());
        assert!(sanitize_filename("☃☃☃").is_err());
    }
}
