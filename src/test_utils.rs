//! Test utilities for Chartroom
//!
//! This module provides common test utilities including temporary directory
//! management, test file creation, and assertion helpers.

use crate::error::Result;
use crate::setup::SetupForm;
use std::path::PathBuf;
use tempfile::TempDir;

/// Create a temporary directory for testing
///
/// # Returns
///
/// Returns a TempDir that will be cleaned up when dropped
pub fn temp_dir() -> TempDir {
    TempDir::new().expect("Failed to create temporary directory")
}

/// Create a test file with the given content
///
/// # Arguments
///
/// * `dir` - Directory to create the file in
/// * `name` - Name of the file
/// * `content` - Content to write to the file
///
/// # Returns
///
/// Returns the path to the created file
///
/// # Panics
///
/// Panics if file creation or writing fails
pub fn create_test_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("Failed to write test file");
    path
}

/// Assert that an error contains the expected message
///
/// # Panics
///
/// Panics if the result is Ok or if the error doesn't contain the expected message
pub fn assert_error_contains<T>(result: Result<T>, expected: &str) {
    match result {
        Ok(_) => panic!("Expected error containing '{}' but got Ok", expected),
        Err(e) => {
            let error_msg = e.to_string();
            assert!(
                error_msg.contains(expected),
                "Error message '{}' does not contain '{}'",
                error_msg,
                expected
            );
        }
    }
}

/// A filled-in setup form for a software engineering interview
pub fn engineer_form() -> SetupForm {
    SetupForm {
        resume_text: "Ten years building payment systems.".to_string(),
        company_context: "Acme Payments".to_string(),
        projects_text: "Ledger rewrite".to_string(),
        experience_level: "software_engineer".to_string(),
        software_years: "3_5".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ChartroomError;

    #[test]
    fn test_temp_dir_creation() {
        let dir = temp_dir();
        assert!(dir.path().exists());
    }

    #[test]
    fn test_create_test_file() {
        let dir = temp_dir();
        let path = create_test_file(&dir, "resume.md", "content");
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "content");
    }

    #[test]
    fn test_assert_error_contains_success() {
        let result: Result<()> =
            Err(ChartroomError::Api("HTTP 502 Bad Gateway".to_string()).into());
        assert_error_contains(result, "502");
    }

    #[test]
    #[should_panic(expected = "Expected error containing")]
    fn test_assert_error_contains_ok() {
        let result: Result<()> = Ok(());
        assert_error_contains(result, "error");
    }

    #[test]
    #[should_panic(expected = "does not contain")]
    fn test_assert_error_contains_wrong_message() {
        let result: Result<()> =
            Err(ChartroomError::Config("different error".to_string()).into());
        assert_error_contains(result, "not present");
    }

    #[test]
    fn test_engineer_form_is_software_engineer() {
        let form = engineer_form();
        assert_eq!(form.experience_level, "software_engineer");
        assert!(!form.software_years.is_empty());
    }
}
