use crate::{
  db::Crud,
  newtypes::{CommentId, PostId, UserId},
  schema::comment,
};
use chrono::NaiveDateTime;
use diesel::{dsl::insert_into, prelude::*, result::Error};
use serde::{Deserialize, Serialize};

#[derive(Queryable, Identifiable, PartialEq, Debug, Clone, Serialize, Deserialize)]
#[diesel(table_name = comment)]
pub struct Comment {
  pub id: CommentId,
  pub post_id: PostId,
  pub author_id: UserId,
  pub text: String,
  pub published: NaiveDateTime,
}

#[derive(Insertable, AsChangeset, Clone)]
#[diesel(table_name = comment)]
pub struct CommentForm {
  pub post_id: PostId,
  pub author_id: UserId,
  pub text: String,
  pub published: Option<NaiveDateTime>,
}

impl Crud for Comment {
  type Form = CommentForm;
  type IdType = CommentId;

  fn read(conn: &mut SqliteConnection, from_comment_id: CommentId) -> Result<Self, Error> {
    use crate::schema::comment::dsl::*;
    comment.find(from_comment_id).first::<Self>(conn)
  }

  fn delete(conn: &mut SqliteConnection, from_comment_id: CommentId) -> Result<usize, Error> {
    use crate::schema::comment::dsl::*;
    diesel::delete(comment.find(from_comment_id)).execute(conn)
  }

  fn create(conn: &mut SqliteConnection, form: &CommentForm) -> Result<Self, Error> {
    use crate::schema::comment::dsl::*;
    insert_into(comment).values(form).get_result::<Self>(conn)
  }

  fn update(
    conn: &mut SqliteConnection,
    from_comment_id: CommentId,
    form: &CommentForm,
  ) -> Result<Self, Error> {
    use crate::schema::comment::dsl::*;
    diesel::update(comment.find(from_comment_id))
      .set(form)
      .get_result::<Self>(conn)
  }
}

impl Comment {
  /// A post's comments, oldest first.
  pub fn for_post(conn: &mut SqliteConnection, from_post_id: PostId) -> Result<Vec<Self>, Error> {
    use crate::schema::comment::dsl::*;
    comment
      .filter(post_id.eq(from_post_id))
      .order_by(published.asc())
      .then_order_by(id.asc())
      .load::<Self>(conn)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::db::{
    establish_test_connection,
    post::{Post, PostForm},
    user::{User_, UserForm},
  };
  use pretty_assertions::assert_eq;

  fn setup(conn: &mut SqliteConnection) -> (User_, Post) {
    let author = User_::create(
      conn,
      &UserForm {
        name: "sara".into(),
        published: None,
      },
    )
    .unwrap();
    let inserted_post = Post::create(
      conn,
      &PostForm {
        text: "A test post".into(),
        author_id: author.id,
        group_id: None,
        image: None,
        published: None,
      },
    )
    .unwrap();
    (author, inserted_post)
  }

  #[test]
  fn test_crud() {
    let conn = &mut establish_test_connection();
    let (author, inserted_post) = setup(conn);

    let new_comment = CommentForm {
      post_id: inserted_post.id,
      author_id: author.id,
      text: "A test comment".into(),
      published: None,
    };

    let inserted_comment = Comment::create(conn, &new_comment).unwrap();

    let expected_comment = Comment {
      id: inserted_comment.id,
      post_id: inserted_post.id,
      author_id: author.id,
      text: "A test comment".into(),
      published: inserted_comment.published,
    };

    let read_comment = Comment::read(conn, inserted_comment.id).unwrap();
    let updated_comment = Comment::update(conn, inserted_comment.id, &new_comment).unwrap();
    let num_deleted = Comment::delete(conn, inserted_comment.id).unwrap();

    assert_eq!(expected_comment, read_comment);
    assert_eq!(expected_comment, inserted_comment);
    assert_eq!(expected_comment, updated_comment);
    assert_eq!(1, num_deleted);
  }

  #[test]
  fn test_post_delete_cascades_to_comments() {
    let conn = &mut establish_test_connection();
    let (author, inserted_post) = setup(conn);

    for i in 0..3 {
      Comment::create(
        conn,
        &CommentForm {
          post_id: inserted_post.id,
          author_id: author.id,
          text: format!("comment {i}"),
          published: None,
        },
      )
      .unwrap();
    }
    assert_eq!(3, Comment::for_post(conn, inserted_post.id).unwrap().len());

    Post::delete(conn, inserted_post.id).unwrap();
    assert!(Comment::for_post(conn, inserted_post.id).unwrap().is_empty());
  }
}
