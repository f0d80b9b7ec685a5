use serde::{Deserialize, Serialize};
use std::{backtrace::Backtrace, fmt, fmt::Debug};
use strum::Display;

pub type QuillResult<T> = Result<T, QuillError>;

#[derive(Display, Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Hash)]
#[serde(tag = "error", content = "message", rename_all = "snake_case")]
#[non_exhaustive]
pub enum QuillErrorType {
  NotFound,
  NotLoggedIn,
  NoPostEditAllowed,
  PostTextRequired,
  CommentTextRequired,
  CouldntCreatePost,
  CouldntUpdatePost,
  CouldntCreateComment,
  CouldntFollowAuthor,
  Unknown(String),
}

pub struct QuillError {
  pub error_type: QuillErrorType,
  pub inner: anyhow::Error,
  pub context: Backtrace,
}

impl<T> From<T> for QuillError
where
  T: Into<anyhow::Error>,
{
  fn from(t: T) -> Self {
    let cause = t.into();
    let error_type = match cause.downcast_ref::<diesel::result::Error>() {
      Some(&diesel::NotFound) => QuillErrorType::NotFound,
      _ => QuillErrorType::Unknown(format!("{}", &cause)),
    };
    QuillError {
      error_type,
      inner: cause,
      context: Backtrace::capture(),
    }
  }
}

impl Debug for QuillError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("QuillError")
      .field("message", &self.error_type)
      .field("inner", &self.inner)
      .field("context", &self.context)
      .finish()
  }
}

impl fmt::Display for QuillError {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    write!(f, "{}: ", &self.error_type)?;
    writeln!(f, "{}", self.inner)?;
    fmt::Display::fmt(&self.context, f)
  }
}

impl From<QuillErrorType> for QuillError {
  fn from(error_type: QuillErrorType) -> Self {
    let inner = anyhow::anyhow!("{}", error_type);
    QuillError {
      error_type,
      inner,
      context: Backtrace::capture(),
    }
  }
}

pub trait QuillErrorExt<T, E: Into<anyhow::Error>> {
  fn with_quill_type(self, error_type: QuillErrorType) -> QuillResult<T>;
}

impl<T, E: Into<anyhow::Error>> QuillErrorExt<T, E> for Result<T, E> {
  fn with_quill_type(self, error_type: QuillErrorType) -> QuillResult<T> {
    self.map_err(|error| QuillError {
      error_type,
      inner: error.into(),
      context: Backtrace::capture(),
    })
  }
}

pub trait QuillErrorExt2<T> {
  fn with_quill_type(self, error_type: QuillErrorType) -> QuillResult<T>;
  fn into_anyhow(self) -> Result<T, anyhow::Error>;
}

impl<T> QuillErrorExt2<T> for QuillResult<T> {
  fn with_quill_type(self, error_type: QuillErrorType) -> QuillResult<T> {
    self.map_err(|mut e| {
      e.error_type = error_type;
      e
    })
  }

  // can't be an impl From because it would conflict with the blanket Into impl
  fn into_anyhow(self) -> Result<T, anyhow::Error> {
    self.map_err(|e| e.inner)
  }
}
