//! Editable course drafts.
//!
//! A [`CourseDraft`] is the state behind the create/edit form. Every edit
//! returns a new draft and leaves the receiver untouched, so a UI can keep
//! the previous value around (or compare against it) without cloning first.

use crate::entities::{Category, Course, Lesson, Status};

/// Why a draft cannot be edited or submitted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("Course name is required")]
    MissingName,
    #[error("Lesson {0} needs a name")]
    MissingLessonName(usize),
    #[error("Lesson {0} needs a video URL")]
    MissingLessonUrl(usize),
    #[error("A course needs at least one lesson")]
    LastLesson,
    #[error("There is no lesson {0}")]
    LessonOutOfRange(usize),
}

/// One editable lesson entry.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LessonDraft {
    pub id: Option<i64>,
    pub name: String,
    pub youtube_url: String,
}

impl LessonDraft {
    /// A fresh, empty entry. Each call yields an independent value.
    pub fn blank() -> Self {
        Self::default()
    }

    fn from_lesson(lesson: &Lesson) -> Self {
        Self {
            id: lesson.id,
            name: lesson.name.clone(),
            youtube_url: lesson.youtube_url.clone(),
        }
    }
}

/// Editable copy of a course.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseDraft {
    pub id: Option<i64>,
    pub name: String,
    pub description: String,
    pub category: Category,
    pub status: Status,
    pub lessons: Vec<LessonDraft>,
}

impl Default for CourseDraft {
    fn default() -> Self {
        Self {
            id: None,
            name: String::new(),
            description: String::new(),
            category: Category::Backend,
            status: Status::Active,
            lessons: vec![LessonDraft::blank()],
        }
    }
}

impl CourseDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a draft from a stored course, replacing every field.
    ///
    /// A course stored without lessons gets one blank entry so the draft
    /// can still be submitted.
    pub fn from_course(course: &Course) -> Self {
        let mut lessons: Vec<LessonDraft> = course.lessons.iter().map(LessonDraft::from_lesson).collect();
        if lessons.is_empty() {
            lessons.push(LessonDraft::blank());
        }

        Self {
            id: course.id,
            name: course.name.clone(),
            description: course.description.clone().unwrap_or_default(),
            category: course.category,
            status: course.status,
            lessons,
        }
    }

    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }

    #[must_use]
    pub fn with_name(&self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_description(&self, description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_category(&self, category: Category) -> Self {
        Self {
            category,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_status(&self, status: Status) -> Self {
        Self {
            status,
            ..self.clone()
        }
    }

    pub fn with_lesson_name(&self, index: usize, name: impl Into<String>) -> Result<Self, FormError> {
        let name = name.into();
        self.map_lesson(index, |lesson| LessonDraft {
            name,
            ..lesson.clone()
        })
    }

    pub fn with_lesson_url(&self, index: usize, youtube_url: impl Into<String>) -> Result<Self, FormError> {
        let youtube_url = youtube_url.into();
        self.map_lesson(index, |lesson| LessonDraft {
            youtube_url,
            ..lesson.clone()
        })
    }

    #[must_use]
    pub fn add_lesson(&self) -> Self {
        let mut next = self.clone();
        next.lessons.push(LessonDraft::blank());
        next
    }

    /// Drop the lesson at `index`. The last remaining lesson cannot be removed.
    pub fn remove_lesson(&self, index: usize) -> Result<Self, FormError> {
        if index >= self.lessons.len() {
            return Err(FormError::LessonOutOfRange(index + 1));
        }
        if self.lessons.len() == 1 {
            return Err(FormError::LastLesson);
        }

        let mut next = self.clone();
        next.lessons.remove(index);
        Ok(next)
    }

    /// Check the required fields. Positions in errors are 1-based.
    pub fn validate(&self) -> Result<(), FormError> {
        if self.name.trim().is_empty() {
            return Err(FormError::MissingName);
        }
        if self.lessons.is_empty() {
            return Err(FormError::LastLesson);
        }
        for (index, lesson) in self.lessons.iter().enumerate() {
            if lesson.name.trim().is_empty() {
                return Err(FormError::MissingLessonName(index + 1));
            }
            if lesson.youtube_url.trim().is_empty() {
                return Err(FormError::MissingLessonUrl(index + 1));
            }
        }
        Ok(())
    }

    /// Validate and build the payload handed to the persist action.
    ///
    /// Video URLs are trimmed; an empty description is omitted.
    pub fn to_payload(&self) -> Result<Course, FormError> {
        self.validate()?;

        let description = self.description.trim();
        Ok(Course {
            id: self.id,
            name: self.name.trim().to_string(),
            description: (!description.is_empty()).then(|| description.to_string()),
            category: self.category,
            status: self.status,
            lessons: self
                .lessons
                .iter()
                .map(|lesson| Lesson {
                    id: lesson.id,
                    name: lesson.name.clone(),
                    youtube_url: lesson.youtube_url.trim().to_string(),
                    ..Default::default()
                })
                .collect(),
            created_at: None,
            updated_at: None,
        })
    }

    fn map_lesson<F>(&self, index: usize, f: F) -> Result<Self, FormError>
    where
        F: FnOnce(&LessonDraft) -> LessonDraft,
    {
        let lesson = self.lessons.get(index).ok_or(FormError::LessonOutOfRange(index + 1))?;
        let replacement = f(lesson);

        let mut next = self.clone();
        next.lessons[index] = replacement;
        Ok(next)
    }
}
