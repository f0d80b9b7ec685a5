use crate::{
  context::QuillContext,
  error::{QuillErrorType, QuillResult},
  newtypes::UserId,
};
use serde::Serialize;

pub mod comment;
pub mod feed;
pub mod follow;
pub mod post;

/// The identity (or anonymity) of the current requester.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Viewpoint {
  Anonymous,
  User(UserId),
}

impl Viewpoint {
  pub fn user_id(&self) -> Option<UserId> {
    match self {
      Viewpoint::User(user_id) => Some(*user_id),
      Viewpoint::Anonymous => None,
    }
  }

  pub fn require_user(&self) -> QuillResult<UserId> {
    self
      .user_id()
      .ok_or_else(|| QuillErrorType::NotLoggedIn.into())
  }
}

pub trait Perform {
  type Response: Serialize + Send;

  fn perform(&self, context: &QuillContext, viewpoint: &Viewpoint) -> QuillResult<Self::Response>;
}
