use crate::{
  api::{Perform, Viewpoint},
  context::QuillContext,
  db::{
    follow::{Follow, FollowForm},
    user::User_,
    Followable,
  },
  error::{QuillErrorExt, QuillErrorType, QuillResult},
};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug)]
pub struct FollowAuthor {
  pub username: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct FollowAuthorResponse {
  pub author: User_,
  pub following: bool,
}

impl Perform for FollowAuthor {
  type Response = FollowAuthorResponse;

  #[tracing::instrument(skip(context, viewpoint))]
  fn perform(
    &self,
    context: &QuillContext,
    viewpoint: &Viewpoint,
  ) -> QuillResult<FollowAuthorResponse> {
    let user_id = viewpoint.require_user()?;
    let conn = &mut context.conn()?;
    let author = User_::read_from_name(conn, &self.username)?;

    // Following yourself or someone you already follow leaves the graph
    // unchanged and reports the current state.
    let form = FollowForm {
      user_id,
      author_id: author.id,
    };
    Follow::follow(conn, &form).with_quill_type(QuillErrorType::CouldntFollowAuthor)?;

    let following = Follow::is_following(conn, user_id, author.id)?;
    Ok(FollowAuthorResponse { author, following })
  }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct UnfollowAuthor {
  pub username: String,
}

impl Perform for UnfollowAuthor {
  type Response = FollowAuthorResponse;

  #[tracing::instrument(skip(context, viewpoint))]
  fn perform(
    &self,
    context: &QuillContext,
    viewpoint: &Viewpoint,
  ) -> QuillResult<FollowAuthorResponse> {
    let user_id = viewpoint.require_user()?;
    let conn = &mut context.conn()?;
    let author = User_::read_from_name(conn, &self.username)?;

    let form = FollowForm {
      user_id,
      author_id: author.id,
    };
    Follow::unfollow(conn, &form)?;

    Ok(FollowAuthorResponse {
      author,
      following: false,
    })
  }
}
