use crate::{
  api::{Perform, Viewpoint},
  context::QuillContext,
  db::{comment::Comment, follow::Follow, group::Group, post::Post, user::User_, Crud},
  error::QuillResult,
  newtypes::PostId,
  pagination::{paginate, Page, DEFAULT_PAGE_SIZE},
};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Serialize, Deserialize, Debug)]
pub struct GetHomeFeed {
  pub page: Option<usize>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct HomeFeedResponse {
  pub page: Page<Post>,
}

impl Perform for GetHomeFeed {
  type Response = HomeFeedResponse;

  #[tracing::instrument(skip(context, _viewpoint))]
  fn perform(
    &self,
    context: &QuillContext,
    _viewpoint: &Viewpoint,
  ) -> QuillResult<HomeFeedResponse> {
    if let Some(cached) = context.cache().get() {
      debug!("home feed cache hit");
      return Ok(cached);
    }
    debug!("home feed cache miss");

    let conn = &mut context.conn()?;
    let posts = Post::list_all(conn)?;
    let response = HomeFeedResponse {
      page: paginate(posts, DEFAULT_PAGE_SIZE, self.page.unwrap_or(1)),
    };
    context.cache().set(response.clone());
    Ok(response)
  }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct GetGroupFeed {
  pub slug: String,
  pub page: Option<usize>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct GroupFeedResponse {
  pub group: Group,
  pub page: Page<Post>,
}

impl Perform for GetGroupFeed {
  type Response = GroupFeedResponse;

  #[tracing::instrument(skip(context, _viewpoint))]
  fn perform(
    &self,
    context: &QuillContext,
    _viewpoint: &Viewpoint,
  ) -> QuillResult<GroupFeedResponse> {
    let conn = &mut context.conn()?;
    let group = Group::read_from_slug(conn, &self.slug)?;
    let posts = Post::for_group(conn, group.id)?;
    Ok(GroupFeedResponse {
      group,
      page: paginate(posts, DEFAULT_PAGE_SIZE, self.page.unwrap_or(1)),
    })
  }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct GetProfileFeed {
  pub username: String,
  pub page: Option<usize>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ProfileFeedResponse {
  pub author: User_,
  /// Whether the viewer follows this author; false for anonymous viewers.
  pub following: bool,
  pub page: Page<Post>,
}

impl Perform for GetProfileFeed {
  type Response = ProfileFeedResponse;

  #[tracing::instrument(skip(context, viewpoint))]
  fn perform(
    &self,
    context: &QuillContext,
    viewpoint: &Viewpoint,
  ) -> QuillResult<ProfileFeedResponse> {
    let conn = &mut context.conn()?;
    let author = User_::read_from_name(conn, &self.username)?;
    let following = match viewpoint.user_id() {
      Some(user_id) => Follow::is_following(conn, user_id, author.id)?,
      None => false,
    };
    let posts = Post::for_author(conn, author.id)?;
    Ok(ProfileFeedResponse {
      author,
      following,
      page: paginate(posts, DEFAULT_PAGE_SIZE, self.page.unwrap_or(1)),
    })
  }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct GetFollowingFeed {
  pub page: Option<usize>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct FollowingFeedResponse {
  pub page: Page<Post>,
}

impl Perform for GetFollowingFeed {
  type Response = FollowingFeedResponse;

  #[tracing::instrument(skip(context, viewpoint))]
  fn perform(
    &self,
    context: &QuillContext,
    viewpoint: &Viewpoint,
  ) -> QuillResult<FollowingFeedResponse> {
    let user_id = viewpoint.require_user()?;
    let conn = &mut context.conn()?;
    let posts = Post::for_followed_authors(conn, user_id)?;
    Ok(FollowingFeedResponse {
      page: paginate(posts, DEFAULT_PAGE_SIZE, self.page.unwrap_or(1)),
    })
  }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct GetPost {
  pub post_id: PostId,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct GetPostResponse {
  pub post: Post,
  pub comments: Vec<Comment>,
}

impl Perform for GetPost {
  type Response = GetPostResponse;

  #[tracing::instrument(skip(context, _viewpoint))]
  fn perform(&self, context: &QuillContext, _viewpoint: &Viewpoint) -> QuillResult<GetPostResponse> {
    let conn = &mut context.conn()?;
    let post = Post::read(conn, self.post_id)?;
    let comments = Comment::for_post(conn, post.id)?;
    Ok(GetPostResponse { post, comments })
  }
}
