//! Setup form values and the payload derived from them
//!
//! The setup payload is recomputed from the current form values on every
//! start and send call; nothing here is persisted.

use crate::error::{ChartroomError, Result};
use crate::mode::{InterviewMode, SOFTWARE_ENGINEER_EXPERIENCE};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Extensions accepted for resume files
pub const RESUME_EXTENSIONS: [&str; 2] = [".txt", ".md"];

/// Raw values of the setup form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SetupForm {
    /// Resume text, pasted or loaded from a file
    pub resume_text: String,
    /// Company context
    pub company_context: String,
    /// Projects description
    pub projects_text: String,
    /// Experience selection (e.g. `student`, `software_engineer`)
    pub experience_level: String,
    /// Years-of-experience bucket for software engineers (e.g. `3_5`)
    pub software_years: String,
}

/// Setup fields sent with start and respond requests
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetupPayload {
    pub resume_text: String,
    pub company_context: String,
    pub projects_text: String,
    pub coding_experience_level: String,
}

impl SetupForm {
    /// Build the payload for the given mode
    ///
    /// The coding experience level is only set in interview mode; software
    /// engineers get their years bucket appended.
    ///
    /// # Examples
    ///
    /// ```
    /// use chartroom::mode::InterviewMode;
    /// use chartroom::setup::SetupForm;
    ///
    /// let form = SetupForm {
    ///     experience_level: "software_engineer".to_string(),
    ///     software_years: "3_5".to_string(),
    ///     ..Default::default()
    /// };
    /// let payload = form.payload(InterviewMode::InterviewOneOnOne);
    /// assert_eq!(payload.coding_experience_level, "software_engineer_3_5");
    /// assert_eq!(form.payload(InterviewMode::BoardInvestors).coding_experience_level, "");
    /// ```
    pub fn payload(&self, mode: InterviewMode) -> SetupPayload {
        SetupPayload {
            resume_text: self.resume_text.clone(),
            company_context: self.company_context.clone(),
            projects_text: self.projects_text.clone(),
            coding_experience_level: self.coding_experience_level(mode),
        }
    }

    fn coding_experience_level(&self, mode: InterviewMode) -> String {
        match mode {
            InterviewMode::BoardInvestors => String::new(),
            InterviewMode::InterviewOneOnOne
                if self.experience_level == SOFTWARE_ENGINEER_EXPERIENCE =>
            {
                format!("{}_{}", SOFTWARE_ENGINEER_EXPERIENCE, self.software_years)
            }
            InterviewMode::InterviewOneOnOne => self.experience_level.clone(),
        }
    }
}

/// Whether a file name has an accepted resume extension (case-insensitive)
pub fn is_supported_resume(file_name: &str) -> bool {
    let lower = file_name.to_lowercase();
    RESUME_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

/// Read a resume file as text
///
/// # Errors
///
/// Returns [`ChartroomError::UnsupportedResumeFormat`] for names without a
/// `.txt`/`.md` extension, before touching the file system, and an IO error
/// if the file cannot be read.
pub async fn read_resume(path: &Path) -> Result<String> {
    let name = display_name(path);
    if !is_supported_resume(&name) {
        return Err(ChartroomError::UnsupportedResumeFormat(name).into());
    }
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(ChartroomError::from)?;
    tracing::debug!("Read {} bytes of resume text from {}", text.len(), name);
    Ok(text)
}

/// File name component of a path, or the whole path when it has none
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{assert_error_contains, create_test_file, temp_dir};

    fn form() -> SetupForm {
        SetupForm {
            resume_text: "Ten years of Rust".to_string(),
            company_context: "Seed-stage fintech".to_string(),
            projects_text: "Payments ledger".to_string(),
            experience_level: "student".to_string(),
            software_years: "0_2".to_string(),
        }
    }

    #[test]
    fn test_payload_copies_text_fields() {
        let payload = form().payload(InterviewMode::BoardInvestors);
        assert_eq!(payload.resume_text, "Ten years of Rust");
        assert_eq!(payload.company_context, "Seed-stage fintech");
        assert_eq!(payload.projects_text, "Payments ledger");
    }

    #[test]
    fn test_board_mode_has_no_experience_level() {
        let payload = form().payload(InterviewMode::BoardInvestors);
        assert_eq!(payload.coding_experience_level, "");
    }

    #[test]
    fn test_interview_mode_uses_selection() {
        let payload = form().payload(InterviewMode::InterviewOneOnOne);
        assert_eq!(payload.coding_experience_level, "student");
    }

    #[test]
    fn test_software_engineer_appends_years() {
        let mut f = form();
        f.experience_level = SOFTWARE_ENGINEER_EXPERIENCE.to_string();
        f.software_years = "5_plus".to_string();
        let payload = f.payload(InterviewMode::InterviewOneOnOne);
        assert_eq!(payload.coding_experience_level, "software_engineer_5_plus");
    }

    #[test]
    fn test_payload_serializes_wire_fields() {
        let value = serde_json::to_value(form().payload(InterviewMode::InterviewOneOnOne)).unwrap();
        assert_eq!(value["projects_text"], "Payments ledger");
        assert_eq!(value["coding_experience_level"], "student");
    }

    #[test]
    fn test_supported_resume_extensions() {
        assert!(is_supported_resume("resume.txt"));
        assert!(is_supported_resume("RESUME.MD"));
        assert!(!is_supported_resume("resume.pdf"));
        assert!(!is_supported_resume("resume"));
        assert!(!is_supported_resume("notes.txt.docx"));
    }

    #[tokio::test]
    async fn test_read_resume_txt() {
        let dir = temp_dir();
        let path = create_test_file(&dir, "resume.txt", "Staff engineer");
        assert_eq!(read_resume(&path).await.unwrap(), "Staff engineer");
    }

    #[tokio::test]
    async fn test_read_resume_rejects_pdf_without_reading() {
        let err = read_resume(Path::new("/does/not/exist/resume.pdf"))
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ChartroomError>(),
            Some(ChartroomError::UnsupportedResumeFormat(name)) if name == "resume.pdf"
        ));
    }

    #[tokio::test]
    async fn test_read_resume_missing_file() {
        let dir = temp_dir();
        assert_error_contains(read_resume(&dir.path().join("missing.md")).await, "IO error");
    }
}
