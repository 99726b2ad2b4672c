//! Form validation.
//!
//! Pure functions: no storage or network access. Each check fails fast with
//! the first violated rule, in the order the form presents its fields.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::{ContactMessage, ValidatedDraft};
use crate::enums::Field;
use crate::errors::ValidationError;
use crate::image::ImageData;
use crate::tags::TagList;

pub const MIN_TITLE_CHARS: usize = 3;
pub const MIN_DESCRIPTION_CHARS: usize = 10;
pub const MIN_NAME_CHARS: usize = 2;
pub const MIN_SUBJECT_CHARS: usize = 3;
pub const MIN_MESSAGE_CHARS: usize = 10;
pub const MIN_PASSWORD_CHARS: usize = 6;

/// Text fields of the admin "add project" form, as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawSubmission {
    pub title: String,
    pub description: String,
    pub link: String,
    pub github: String,
}

/// Fields of the public contact form, as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawContact {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

/// Validate a project submission into a draft ready for persistence.
///
/// Checks, in order: title length, description length, project URL, source
/// URL, image presence, at least one technology. Text is trimmed first.
///
/// # Errors
///
/// Returns the [`ValidationError`] for the first rule that fails.
pub fn validate(
    raw: &RawSubmission,
    image: Option<ImageData>,
    technologies: &TagList,
) -> Result<ValidatedDraft, ValidationError> {
    let title = raw.title.trim();
    if char_len(title) < MIN_TITLE_CHARS {
        return Err(ValidationError::new(
            Field::Title,
            format!("title must be at least {MIN_TITLE_CHARS} characters"),
        ));
    }

    let description = raw.description.trim();
    if char_len(description) < MIN_DESCRIPTION_CHARS {
        return Err(ValidationError::new(
            Field::Description,
            format!("description must be at least {MIN_DESCRIPTION_CHARS} characters"),
        ));
    }

    let link = raw.link.trim();
    if !is_valid_url(link) {
        return Err(ValidationError::new(Field::Link, "project URL is not valid"));
    }

    let github = raw.github.trim();
    if !is_valid_url(github) {
        return Err(ValidationError::new(Field::Github, "source URL is not valid"));
    }

    let Some(image_data) = image else {
        return Err(ValidationError::new(
            Field::Image,
            "an image must be selected for the project",
        ));
    };

    if technologies.is_empty() {
        return Err(ValidationError::new(
            Field::Technologies,
            "at least one technology must be added",
        ));
    }

    Ok(ValidatedDraft {
        title: title.to_string(),
        description: description.to_string(),
        image_data,
        primary_link: link.to_string(),
        source_link: github.to_string(),
        technologies: technologies.clone(),
        view_count: 0,
        featured: false,
    })
}

/// Validate a contact form submission, stamping it with `now`.
///
/// Checks, in order: name, email, subject, message.
///
/// # Errors
///
/// Returns the [`ValidationError`] for the first rule that fails.
pub fn validate_contact(
    raw: &RawContact,
    now: DateTime<Utc>,
) -> Result<ContactMessage, ValidationError> {
    let name = raw.name.trim();
    if char_len(name) < MIN_NAME_CHARS {
        return Err(ValidationError::new(
            Field::Name,
            format!("name must be at least {MIN_NAME_CHARS} characters"),
        ));
    }

    let email = raw.email.trim();
    if !is_valid_email(email) {
        return Err(ValidationError::new(
            Field::Email,
            "please enter a valid email address",
        ));
    }

    let subject = raw.subject.trim();
    if char_len(subject) < MIN_SUBJECT_CHARS {
        return Err(ValidationError::new(
            Field::Subject,
            format!("subject must be at least {MIN_SUBJECT_CHARS} characters"),
        ));
    }

    let message = raw.message.trim();
    if char_len(message) < MIN_MESSAGE_CHARS {
        return Err(ValidationError::new(
            Field::Message,
            format!("message must be at least {MIN_MESSAGE_CHARS} characters"),
        ));
    }

    Ok(ContactMessage {
        name: name.to_string(),
        email: email.to_string(),
        subject: subject.to_string(),
        message: message.to_string(),
        created_at: now,
    })
}

/// Check a replacement admin password.
///
/// # Errors
///
/// Returns a [`ValidationError`] on [`Field::Password`] if it is too short.
pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    if char_len(password) < MIN_PASSWORD_CHARS {
        return Err(ValidationError::new(
            Field::Password,
            format!("password must be at least {MIN_PASSWORD_CHARS} characters"),
        ));
    }
    Ok(())
}

/// Whether `value` parses as an absolute URL.
#[must_use]
pub fn is_valid_url(value: &str) -> bool {
    url::Url::parse(value).is_ok()
}

/// `local@domain.tld` with no whitespace and a single `@`.
#[must_use]
pub fn is_valid_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .char_indices()
        .any(|(idx, ch)| ch == '.' && idx > 0 && idx + 1 < domain.len())
}

fn char_len(value: &str) -> usize {
    value.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn valid_raw() -> RawSubmission {
        RawSubmission {
            title: "My App".into(),
            description: "A sample project description".into(),
            link: "https://example.com".into(),
            github: "https://github.com/x/y".into(),
        }
    }

    fn image() -> Option<ImageData> {
        Some(ImageData::from_encoded("data:image/png;base64,AAAA"))
    }

    fn tags() -> TagList {
        ["Go"].into_iter().collect()
    }

    #[test]
    fn valid_submission_builds_draft() {
        let draft = validate(&valid_raw(), image(), &tags()).unwrap();
        assert_eq!(draft.title(), "My App");
        assert_eq!(draft.description(), "A sample project description");
        assert_eq!(draft.primary_link(), "https://example.com");
        assert_eq!(draft.source_link(), "https://github.com/x/y");
        assert_eq!(draft.technologies(), ["Go"]);
    }

    #[test]
    fn text_is_trimmed() {
        let raw = RawSubmission {
            title: "  My App  ".into(),
            ..valid_raw()
        };
        let draft = validate(&raw, image(), &tags()).unwrap();
        assert_eq!(draft.title(), "My App");
    }

    #[rstest]
    #[case::short_title(RawSubmission { title: "ab".into(), ..valid_raw() }, Field::Title)]
    #[case::short_description(RawSubmission { description: "short".into(), ..valid_raw() }, Field::Description)]
    #[case::bad_link(RawSubmission { link: "not-a-url".into(), ..valid_raw() }, Field::Link)]
    #[case::bad_github(RawSubmission { github: "github.com/x".into(), ..valid_raw() }, Field::Github)]
    fn rejects_each_text_rule(#[case] raw: RawSubmission, #[case] field: Field) {
        let err = validate(&raw, image(), &tags()).unwrap_err();
        assert_eq!(err.field, field);
    }

    #[test]
    fn rejects_missing_image() {
        let err = validate(&valid_raw(), None, &tags()).unwrap_err();
        assert_eq!(err.field, Field::Image);
    }

    #[test]
    fn rejects_empty_technologies() {
        let err = validate(&valid_raw(), image(), &TagList::new()).unwrap_err();
        assert_eq!(err.field, Field::Technologies);
        assert_eq!(err.to_string(), "at least one technology must be added");
    }

    #[test]
    fn earliest_failing_check_wins() {
        let raw = RawSubmission {
            title: "ab".into(),
            description: "short".into(),
            link: "not-a-url".into(),
            github: String::new(),
        };
        let err = validate(&raw, None, &TagList::new()).unwrap_err();
        assert_eq!(err.field, Field::Title);

        let raw = RawSubmission {
            description: "short".into(),
            link: "not-a-url".into(),
            ..valid_raw()
        };
        let err = validate(&raw, None, &TagList::new()).unwrap_err();
        assert_eq!(err.field, Field::Description);

        let raw = RawSubmission {
            link: "not-a-url".into(),
            ..valid_raw()
        };
        let err = validate(&raw, None, &TagList::new()).unwrap_err();
        assert_eq!(err.field, Field::Link);
    }

    #[test]
    fn each_violation_has_distinct_message() {
        let messages = [
            validate(&RawSubmission { title: "ab".into(), ..valid_raw() }, image(), &tags()),
            validate(&RawSubmission { description: "short".into(), ..valid_raw() }, image(), &tags()),
            validate(&RawSubmission { link: "x".into(), ..valid_raw() }, image(), &tags()),
            validate(&RawSubmission { github: "x".into(), ..valid_raw() }, image(), &tags()),
            validate(&valid_raw(), None, &tags()),
            validate(&valid_raw(), image(), &TagList::new()),
        ]
        .into_iter()
        .map(|result| result.unwrap_err().reason)
        .collect::<std::collections::HashSet<_>>();
        assert_eq!(messages.len(), 6);
    }

    #[rstest]
    #[case("user@example.com", true)]
    #[case("a@b.co", true)]
    #[case("no-at-sign.com", false)]
    #[case("two@@example.com", false)]
    #[case("user@nodot", false)]
    #[case("user@.com", false)]
    #[case("user@example.", false)]
    #[case("sp ace@example.com", false)]
    #[case("@example.com", false)]
    fn email_shape(#[case] email: &str, #[case] expected: bool) {
        assert_eq!(is_valid_email(email), expected);
    }

    #[test]
    fn contact_checks_run_in_order() {
        let now = Utc::now();
        let raw = RawContact {
            name: "A".into(),
            email: "bad".into(),
            subject: "x".into(),
            message: "short".into(),
        };
        assert_eq!(validate_contact(&raw, now).unwrap_err().field, Field::Name);

        let raw = RawContact {
            name: "Ana".into(),
            ..raw
        };
        assert_eq!(validate_contact(&raw, now).unwrap_err().field, Field::Email);

        let raw = RawContact {
            email: "ana@example.com".into(),
            ..raw
        };
        assert_eq!(
            validate_contact(&raw, now).unwrap_err().field,
            Field::Subject
        );

        let raw = RawContact {
            subject: "Hello".into(),
            ..raw
        };
        assert_eq!(
            validate_contact(&raw, now).unwrap_err().field,
            Field::Message
        );

        let raw = RawContact {
            message: "I would like to talk about a project".into(),
            ..raw
        };
        let message = validate_contact(&raw, now).unwrap();
        assert_eq!(message.email, "ana@example.com");
        assert_eq!(message.created_at, now);
    }

    #[test]
    fn password_minimum_length() {
        assert!(validate_password("12345").is_err());
        assert!(validate_password("123456").is_ok());
    }
}
