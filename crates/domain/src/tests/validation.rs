// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    DomainError, MAX_NEWS_TITLE_LENGTH, MAX_NOTE_TITLE_LENGTH, MAX_SLUG_LENGTH,
    validate_comment_text, validate_news_fields, validate_note_fields,
};

#[test]
fn test_valid_note_fields() {
    assert!(validate_note_fields("Заголовок", "Текст", None).is_ok());
    assert!(validate_note_fields("Заголовок", "Текст", Some("my-slug_1")).is_ok());
}

#[test]
fn test_blank_slug_is_treated_as_absent() {
    assert!(validate_note_fields("Заголовок", "Текст", Some("   ")).is_ok());
}

#[test]
fn test_note_reports_every_violation() {
    let errors: Vec<DomainError> = validate_note_fields("", " ", Some("bad slug!")).unwrap_err();
    assert_eq!(
        errors,
        vec![
            DomainError::EmptyField { field: "title" },
            DomainError::EmptyField { field: "text" },
            DomainError::InvalidSlug {
                slug: String::from("bad slug!")
            },
        ]
    );
}

#[test]
fn test_note_title_length_is_counted_in_characters() {
    let at_limit: String = "ж".repeat(MAX_NOTE_TITLE_LENGTH);
    assert!(validate_note_fields(&at_limit, "Текст", None).is_ok());

    let too_long: String = "ж".repeat(MAX_NOTE_TITLE_LENGTH + 1);
    assert_eq!(
        validate_note_fields(&too_long, "Текст", None).unwrap_err(),
        vec![DomainError::FieldTooLong {
            field: "title",
            max: MAX_NOTE_TITLE_LENGTH,
            actual: MAX_NOTE_TITLE_LENGTH + 1,
        }]
    );
}

#[test]
fn test_supplied_slug_too_long() {
    let slug: String = "s".repeat(MAX_SLUG_LENGTH + 1);
    assert_eq!(
        validate_note_fields("Заголовок", "Текст", Some(&slug)).unwrap_err(),
        vec![DomainError::FieldTooLong {
            field: "slug",
            max: MAX_SLUG_LENGTH,
            actual: MAX_SLUG_LENGTH + 1,
        }]
    );
}

#[test]
fn test_supplied_slug_with_cyrillic_is_invalid() {
    let errors: Vec<DomainError> =
        validate_note_fields("Заголовок", "Текст", Some("заметка")).unwrap_err();
    assert!(matches!(errors.as_slice(), [DomainError::InvalidSlug { .. }]));
}

#[test]
fn test_comment_text_required() {
    assert!(validate_comment_text("Новый комментарий").is_ok());
    assert_eq!(
        validate_comment_text("\n\t "),
        Err(DomainError::EmptyField { field: "text" })
    );
}

#[test]
fn test_news_fields() {
    assert!(validate_news_fields("Новость", "Просто текст.").is_ok());
    assert_eq!(
        validate_news_fields("", "Просто текст."),
        Err(DomainError::EmptyField { field: "title" })
    );
    assert!(matches!(
        validate_news_fields(&"t".repeat(MAX_NEWS_TITLE_LENGTH + 1), "Текст"),
        Err(DomainError::FieldTooLong { .. })
    ));
    assert_eq!(
        validate_news_fields("Новость", ""),
        Err(DomainError::EmptyField { field: "text" })
    );
}
