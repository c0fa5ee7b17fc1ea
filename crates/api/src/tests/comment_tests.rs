// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for posting, editing and deleting comments.

use newsroom_domain::{Comment, Identity, News, RecordStore};
use newsroom_persistence::Persistence;

use crate::tests::helpers::{
    as_user, comment_form, create_test_news, create_test_persistence, create_test_time,
    create_test_user, expect_validation,
};
use crate::{
    ApiError, REQUIRED_FIELD_MESSAGE, Redirect, RequestContext, Settings, create_comment,
    delete_comment, edit_comment, news_detail,
};

const COMMENT_TEXT: &str = "Текст комментария";

fn post_comment(persistence: &mut Persistence, author: Identity, news: &News) -> Comment {
    let path: String = format!("/news/{}/", news.news_id);
    create_comment(
        persistence,
        &as_user(author, &path),
        &Settings::default(),
        news.news_id,
        &comment_form(COMMENT_TEXT),
        create_test_time(),
    )
    .unwrap();

    persistence
        .list_comments_for_news(news.news_id)
        .unwrap()
        .pop()
        .expect("comment stored")
}

#[test]
fn test_anonymous_user_cant_create_comment() {
    let mut persistence = create_test_persistence();
    let news: News = create_test_news(&mut persistence);
    let path: String = format!("/news/{}/", news.news_id);

    let result = create_comment(
        &mut persistence,
        &RequestContext::anonymous(path.clone()),
        &Settings::default(),
        news.news_id,
        &comment_form(COMMENT_TEXT),
        create_test_time(),
    );

    assert_eq!(result, Err(ApiError::LoginRequired { next: path }));
    assert_eq!(persistence.count_comments().unwrap(), 0);
}

#[test]
fn test_user_can_create_comment() {
    let mut persistence = create_test_persistence();
    let author: Identity = create_test_user(&mut persistence, "Автор");
    let news: News = create_test_news(&mut persistence);

    let redirect: Redirect = create_comment(
        &mut persistence,
        &as_user(author, "/news/1/"),
        &Settings::default(),
        news.news_id,
        &comment_form(COMMENT_TEXT),
        create_test_time(),
    )
    .unwrap();

    assert_eq!(redirect.location, format!("/news/{}/#comments", news.news_id));
    assert_eq!(persistence.count_comments().unwrap(), 1);

    let comment: Comment = persistence
        .list_comments_for_news(news.news_id)
        .unwrap()
        .remove(0);
    assert_eq!(comment.text, COMMENT_TEXT);
    assert_eq!(comment.news_id, news.news_id);
    assert_eq!(comment.author, author);
    assert_eq!(comment.created, create_test_time());
}

#[test]
fn test_comment_text_is_trimmed() {
    let mut persistence = create_test_persistence();
    let author: Identity = create_test_user(&mut persistence, "Автор");
    let news: News = create_test_news(&mut persistence);

    create_comment(
        &mut persistence,
        &as_user(author, "/news/1/"),
        &Settings::default(),
        news.news_id,
        &comment_form("  Привет  "),
        create_test_time(),
    )
    .unwrap();

    let comments: Vec<Comment> = persistence.list_comments_for_news(news.news_id).unwrap();
    assert_eq!(comments[0].text, "Привет");
}

#[test]
fn test_comment_on_missing_news_is_not_found() {
    let mut persistence = create_test_persistence();
    let author: Identity = create_test_user(&mut persistence, "Автор");

    let result = create_comment(
        &mut persistence,
        &as_user(author, "/news/42/"),
        &Settings::default(),
        42,
        &comment_form(COMMENT_TEXT),
        create_test_time(),
    );

    assert!(matches!(result, Err(ApiError::NotFound { .. })));
    assert_eq!(persistence.count_comments().unwrap(), 0);
}

#[test]
fn test_user_cant_use_bad_words() {
    let settings: Settings = Settings::default();

    for bad_word in ["редиска", "негодяй"] {
        let mut persistence = create_test_persistence();
        let author: Identity = create_test_user(&mut persistence, "Автор");
        let news: News = create_test_news(&mut persistence);

        let result = create_comment(
            &mut persistence,
            &as_user(author, "/news/1/"),
            &settings,
            news.news_id,
            &comment_form(&format!("Какой-то текст, {bad_word}, еще текст")),
            create_test_time(),
        );

        let errors = expect_validation(result.unwrap_err());
        assert_eq!(errors.get("text"), Some(&[String::from("Не ругайтесь!")][..]));
        assert_eq!(persistence.count_comments().unwrap(), 0);
    }
}

#[test]
fn test_moderation_uses_configured_words() {
    let mut persistence = create_test_persistence();
    let author: Identity = create_test_user(&mut persistence, "Автор");
    let news: News = create_test_news(&mut persistence);
    let settings: Settings = Settings::new(10, vec![String::from("spam")]).unwrap();

    let rejected = create_comment(
        &mut persistence,
        &as_user(author, "/news/1/"),
        &settings,
        news.news_id,
        &comment_form("buy spam now"),
        create_test_time(),
    );
    assert!(matches!(rejected, Err(ApiError::Validation(_))));

    let accepted = create_comment(
        &mut persistence,
        &as_user(author, "/news/1/"),
        &settings,
        news.news_id,
        &comment_form("редиска"),
        create_test_time(),
    );
    assert!(accepted.is_ok());
    assert_eq!(persistence.count_comments().unwrap(), 1);
}

#[test]
fn test_blank_comment_is_rejected() {
    let mut persistence = create_test_persistence();
    let author: Identity = create_test_user(&mut persistence, "Автор");
    let news: News = create_test_news(&mut persistence);

    let result = create_comment(
        &mut persistence,
        &as_user(author, "/news/1/"),
        &Settings::default(),
        news.news_id,
        &comment_form("   "),
        create_test_time(),
    );

    let errors = expect_validation(result.unwrap_err());
    assert_eq!(
        errors.get("text"),
        Some(&[String::from(REQUIRED_FIELD_MESSAGE)][..])
    );
}

#[test]
fn test_author_can_edit_comment() {
    let mut persistence = create_test_persistence();
    let author: Identity = create_test_user(&mut persistence, "Автор");
    let news: News = create_test_news(&mut persistence);
    let comment: Comment = post_comment(&mut persistence, author, &news);

    let redirect: Redirect = edit_comment(
        &mut persistence,
        &as_user(author, "/edit_comment/1/"),
        &Settings::default(),
        comment.comment_id,
        &comment_form("Обновлённый комментарий"),
    )
    .unwrap();

    assert_eq!(redirect.location, format!("/news/{}/#comments", news.news_id));
    let updated: Comment = persistence
        .find_comment_by_id(comment.comment_id)
        .unwrap()
        .unwrap();
    assert_eq!(updated.text, "Обновлённый комментарий");
    assert_eq!(updated.author, author);
    assert_eq!(updated.created, comment.created);
}

#[test]
fn test_user_cant_edit_comment_of_another_user() {
    let mut persistence = create_test_persistence();
    let author: Identity = create_test_user(&mut persistence, "Автор");
    let reader: Identity = create_test_user(&mut persistence, "Читатель");
    let news: News = create_test_news(&mut persistence);
    let comment: Comment = post_comment(&mut persistence, author, &news);

    let result = edit_comment(
        &mut persistence,
        &as_user(reader, "/edit_comment/1/"),
        &Settings::default(),
        comment.comment_id,
        &comment_form("Обновлённый комментарий"),
    );

    assert!(matches!(result, Err(ApiError::NotFound { .. })));
    let unchanged: Comment = persistence
        .find_comment_by_id(comment.comment_id)
        .unwrap()
        .unwrap();
    assert_eq!(unchanged.text, COMMENT_TEXT);
}

#[test]
fn test_non_owner_and_missing_comment_get_same_answer() {
    let mut persistence = create_test_persistence();
    let author: Identity = create_test_user(&mut persistence, "Автор");
    let reader: Identity = create_test_user(&mut persistence, "Читатель");
    let news: News = create_test_news(&mut persistence);
    let comment: Comment = post_comment(&mut persistence, author, &news);

    let foreign = delete_comment(
        &mut persistence,
        &as_user(reader, "/delete_comment/1/"),
        &Settings::default(),
        comment.comment_id,
    )
    .unwrap_err();
    let missing = delete_comment(
        &mut persistence,
        &as_user(reader, "/delete_comment/999/"),
        &Settings::default(),
        999,
    )
    .unwrap_err();

    assert!(matches!(foreign, ApiError::NotFound { .. }));
    assert!(matches!(missing, ApiError::NotFound { .. }));
    assert_eq!(persistence.count_comments().unwrap(), 1);
}

#[test]
fn test_owner_check_runs_before_validation() {
    let mut persistence = create_test_persistence();
    let author: Identity = create_test_user(&mut persistence, "Автор");
    let reader: Identity = create_test_user(&mut persistence, "Читатель");
    let news: News = create_test_news(&mut persistence);
    let comment: Comment = post_comment(&mut persistence, author, &news);

    let result = edit_comment(
        &mut persistence,
        &as_user(reader, "/edit_comment/1/"),
        &Settings::default(),
        comment.comment_id,
        &comment_form("негодяй"),
    );

    assert!(matches!(result, Err(ApiError::NotFound { .. })));
}

#[test]
fn test_edit_with_bad_word_keeps_old_text() {
    let mut persistence = create_test_persistence();
    let author: Identity = create_test_user(&mut persistence, "Автор");
    let news: News = create_test_news(&mut persistence);
    let comment: Comment = post_comment(&mut persistence, author, &news);

    let result = edit_comment(
        &mut persistence,
        &as_user(author, "/edit_comment/1/"),
        &Settings::default(),
        comment.comment_id,
        &comment_form("ты негодяй"),
    );

    assert!(matches!(result, Err(ApiError::Validation(_))));
    let unchanged: Comment = persistence
        .find_comment_by_id(comment.comment_id)
        .unwrap()
        .unwrap();
    assert_eq!(unchanged.text, COMMENT_TEXT);
}

#[test]
fn test_author_can_delete_comment() {
    let mut persistence = create_test_persistence();
    let author: Identity = create_test_user(&mut persistence, "Автор");
    let news: News = create_test_news(&mut persistence);
    let comment: Comment = post_comment(&mut persistence, author, &news);

    let redirect: Redirect = delete_comment(
        &mut persistence,
        &as_user(author, "/delete_comment/1/"),
        &Settings::default(),
        comment.comment_id,
    )
    .unwrap();

    assert_eq!(redirect.location, format!("/news/{}/#comments", news.news_id));
    assert_eq!(persistence.count_comments().unwrap(), 0);
}

#[test]
fn test_anonymous_user_is_sent_to_login_for_edit_and_delete() {
    let mut persistence = create_test_persistence();
    let author: Identity = create_test_user(&mut persistence, "Автор");
    let news: News = create_test_news(&mut persistence);
    let comment: Comment = post_comment(&mut persistence, author, &news);
    let edit_path: String = format!("/edit_comment/{}/", comment.comment_id);
    let delete_path: String = format!("/delete_comment/{}/", comment.comment_id);

    let edit = edit_comment(
        &mut persistence,
        &RequestContext::anonymous(edit_path.clone()),
        &Settings::default(),
        comment.comment_id,
        &comment_form("Обновлённый комментарий"),
    );
    let delete = delete_comment(
        &mut persistence,
        &RequestContext::anonymous(delete_path.clone()),
        &Settings::default(),
        comment.comment_id,
    );

    assert_eq!(edit, Err(ApiError::LoginRequired { next: edit_path }));
    assert_eq!(delete, Err(ApiError::LoginRequired { next: delete_path }));
    assert_eq!(persistence.count_comments().unwrap(), 1);
}

#[test]
fn test_comment_form_only_offered_to_authenticated_users() {
    let mut persistence = create_test_persistence();
    let author: Identity = create_test_user(&mut persistence, "Автор");
    let news: News = create_test_news(&mut persistence);

    let anonymous = news_detail(
        &mut persistence,
        &RequestContext::anonymous("/news/1/"),
        &Settings::default(),
        news.news_id,
    )
    .unwrap();
    let signed_in = news_detail(
        &mut persistence,
        &as_user(author, "/news/1/"),
        &Settings::default(),
        news.news_id,
    )
    .unwrap();

    assert!(!anonymous.comment_form_available);
    assert!(signed_in.comment_form_available);
}
