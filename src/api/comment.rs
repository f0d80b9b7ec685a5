use crate::{
  api::{Perform, Viewpoint},
  context::QuillContext,
  db::{
    comment::{Comment, CommentForm},
    post::Post,
    Crud,
  },
  error::{QuillErrorExt, QuillErrorType, QuillResult},
  newtypes::PostId,
};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug)]
pub struct CreateComment {
  pub post_id: PostId,
  pub text: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct CommentResponse {
  pub comment: Comment,
}

impl Perform for CreateComment {
  type Response = CommentResponse;

  #[tracing::instrument(skip(context, viewpoint))]
  fn perform(&self, context: &QuillContext, viewpoint: &Viewpoint) -> QuillResult<CommentResponse> {
    let user_id = viewpoint.require_user()?;
    if self.text.trim().is_empty() {
      return Err(QuillErrorType::CommentTextRequired.into());
    }

    let conn = &mut context.conn()?;
    let post = Post::read(conn, self.post_id)?;

    let comment_form = CommentForm {
      post_id: post.id,
      author_id: user_id,
      text: self.text.clone(),
      published: None,
    };
    let comment = Comment::create(conn, &comment_form)
      .with_quill_type(QuillErrorType::CouldntCreateComment)?;

    Ok(CommentResponse { comment })
  }
}
