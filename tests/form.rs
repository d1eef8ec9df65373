use coursedeck::entities::{Category, Course, Lesson, Status};
use coursedeck::form::{CourseDraft, FormError, LessonDraft};

fn filled_draft() -> CourseDraft {
    CourseDraft::new()
        .with_name("  Rust for Backends ")
        .with_description("Ownership, async and axum")
        .with_category(Category::Fullstack)
        .with_lesson_name(0, "Intro")
        .unwrap()
        .with_lesson_url(0, " https://youtu.be/dQw4w9WgXcQ ")
        .unwrap()
}

#[test]
fn test_new_draft_defaults() {
    let draft = CourseDraft::new();
    assert!(draft.is_new());
    assert!(draft.name.is_empty());
    assert_eq!(draft.category, Category::Backend);
    assert_eq!(draft.status, Status::Active);
    assert_eq!(draft.lessons, vec![LessonDraft::blank()]);
}

#[test]
fn test_edits_leave_the_original_untouched() {
    let original = CourseDraft::new();
    let renamed = original.with_name("Rust");
    let with_lesson = renamed.add_lesson();

    assert!(original.name.is_empty());
    assert_eq!(renamed.name, "Rust");
    assert_eq!(renamed.lessons.len(), 1);
    assert_eq!(with_lesson.lessons.len(), 2);
}

#[test]
fn test_added_lessons_are_independent() {
    let draft = CourseDraft::new().add_lesson().add_lesson();
    let edited = draft.with_lesson_name(1, "Second").unwrap();

    assert_eq!(edited.lessons[0].name, "");
    assert_eq!(edited.lessons[1].name, "Second");
    assert_eq!(edited.lessons[2].name, "");
}

#[test]
fn test_last_lesson_cannot_be_removed() {
    let draft = CourseDraft::new();
    assert_eq!(draft.remove_lesson(0), Err(FormError::LastLesson));

    let two = draft.add_lesson().with_lesson_name(1, "Keep me").unwrap();
    let one = two.remove_lesson(0).unwrap();
    assert_eq!(one.lessons.len(), 1);
    assert_eq!(one.lessons[0].name, "Keep me");
}

#[test]
fn test_lesson_index_out_of_range() {
    let draft = CourseDraft::new();
    assert_eq!(draft.remove_lesson(3), Err(FormError::LessonOutOfRange(4)));
    assert_eq!(draft.with_lesson_url(1, "x"), Err(FormError::LessonOutOfRange(2)));
}

#[test]
fn test_validation_reports_first_missing_field() {
    let draft = CourseDraft::new();
    assert_eq!(draft.validate(), Err(FormError::MissingName));

    let named = draft.with_name("Rust");
    assert_eq!(named.validate(), Err(FormError::MissingLessonName(1)));

    let lesson_named = named.with_lesson_name(0, "Intro").unwrap();
    assert_eq!(lesson_named.validate(), Err(FormError::MissingLessonUrl(1)));

    let second_blank = filled_draft().add_lesson();
    assert_eq!(second_blank.validate(), Err(FormError::MissingLessonName(2)));
    assert_eq!(
        second_blank.to_payload().unwrap_err().to_string(),
        "Lesson 2 needs a name"
    );
}

#[test]
fn test_whitespace_only_name_is_missing() {
    let draft = filled_draft().with_name("   ");
    assert_eq!(draft.validate(), Err(FormError::MissingName));
}

#[test]
fn test_payload_trims_and_omits_empty_description() {
    let payload = filled_draft().to_payload().unwrap();
    assert_eq!(payload.id, None);
    assert_eq!(payload.name, "Rust for Backends");
    assert_eq!(payload.category, Category::Fullstack);
    assert_eq!(payload.lessons[0].youtube_url, "https://youtu.be/dQw4w9WgXcQ");

    let without_description = filled_draft().with_description("  ").to_payload().unwrap();
    assert_eq!(without_description.description, None);

    let json = serde_json::to_value(&without_description).unwrap();
    assert!(json.get("description").is_none());
    assert_eq!(json["category"], "FULLSTACK");
    assert_eq!(json["status"], "ACTIVE");
    assert_eq!(json["lessons"][0]["name"], "Intro");
}

#[test]
fn test_seeding_from_course_replaces_every_field() {
    let course = Course {
        id: Some(9),
        name: "Go".to_string(),
        description: None,
        category: Category::Frontend,
        status: Status::Inactive,
        lessons: vec![Lesson {
            id: Some(90),
            name: "Goroutines".to_string(),
            youtube_url: "https://www.youtube.com/watch?v=abcdefghijk".to_string(),
            course_id: Some(9),
            ..Default::default()
        }],
        created_at: None,
        updated_at: None,
    };

    let draft = CourseDraft::from_course(&course);
    assert!(!draft.is_new());
    assert_eq!(draft.id, Some(9));
    assert_eq!(draft.description, "");
    assert_eq!(draft.category, Category::Frontend);
    assert_eq!(draft.status, Status::Inactive);
    assert_eq!(draft.lessons[0].id, Some(90));

    // Lesson ids survive the round trip so the backend can match them
    let payload = draft.to_payload().unwrap();
    assert_eq!(payload.id, Some(9));
    assert_eq!(payload.lessons[0].id, Some(90));
}

#[test]
fn test_seeding_course_without_lessons_adds_blank_entry() {
    let course = Course {
        id: Some(1),
        name: "Empty".to_string(),
        description: Some("Nothing yet".to_string()),
        category: Category::Backend,
        status: Status::Active,
        lessons: Vec::new(),
        created_at: None,
        updated_at: None,
    };

    let draft = CourseDraft::from_course(&course);
    assert_eq!(draft.lessons, vec![LessonDraft::blank()]);
    assert_eq!(draft.description, "Nothing yet");
}
