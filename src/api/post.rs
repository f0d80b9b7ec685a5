use crate::{
  api::{Perform, Viewpoint},
  context::QuillContext,
  db::{
    post::{Post, PostForm},
    Crud,
  },
  error::{QuillErrorExt, QuillErrorType, QuillResult},
  newtypes::{GroupId, PostId},
};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug)]
pub struct CreatePost {
  pub text: String,
  pub group_id: Option<GroupId>,
  pub image: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct PostResponse {
  pub post: Post,
}

impl Perform for CreatePost {
  type Response = PostResponse;

  #[tracing::instrument(skip(context, viewpoint))]
  fn perform(&self, context: &QuillContext, viewpoint: &Viewpoint) -> QuillResult<PostResponse> {
    let user_id = viewpoint.require_user()?;
    if self.text.trim().is_empty() {
      return Err(QuillErrorType::PostTextRequired.into());
    }

    let conn = &mut context.conn()?;
    let post_form = PostForm {
      text: self.text.clone(),
      author_id: user_id,
      group_id: Some(self.group_id),
      image: Some(self.image.clone()),
      published: None,
    };
    let post =
      Post::create(conn, &post_form).with_quill_type(QuillErrorType::CouldntCreatePost)?;

    Ok(PostResponse { post })
  }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct EditPost {
  pub post_id: PostId,
  pub text: String,
  pub group_id: Option<GroupId>,
  pub image: Option<String>,
}

impl Perform for EditPost {
  type Response = PostResponse;

  #[tracing::instrument(skip(context, viewpoint))]
  fn perform(&self, context: &QuillContext, viewpoint: &Viewpoint) -> QuillResult<PostResponse> {
    let user_id = viewpoint.require_user()?;
    let conn = &mut context.conn()?;

    let orig_post = Post::read(conn, self.post_id)?;
    if orig_post.author_id != user_id {
      return Err(QuillErrorType::NoPostEditAllowed.into());
    }
    if self.text.trim().is_empty() {
      return Err(QuillErrorType::PostTextRequired.into());
    }

    let post_form = PostForm {
      text: self.text.clone(),
      author_id: orig_post.author_id,
      group_id: Some(self.group_id),
      image: Some(self.image.clone()),
      published: None,
    };
    let post = Post::update(conn, self.post_id, &post_form)
      .with_quill_type(QuillErrorType::CouldntUpdatePost)?;

    Ok(PostResponse { post })
  }
}
