use crate::{
  db::Crud,
  newtypes::{GroupId, PostId, UserId},
  schema::{follow, post},
};
use chrono::NaiveDateTime;
use diesel::{dsl::insert_into, prelude::*, result::Error};
use serde::{Deserialize, Serialize};

#[derive(Queryable, Identifiable, PartialEq, Debug, Clone, Serialize, Deserialize)]
#[diesel(table_name = post)]
pub struct Post {
  pub id: PostId,
  pub text: String,
  pub author_id: UserId,
  pub group_id: Option<GroupId>,
  pub image: Option<String>,
  pub published: NaiveDateTime,
}

#[derive(Insertable, AsChangeset, Clone)]
#[diesel(table_name = post)]
pub struct PostForm {
  pub text: String,
  pub author_id: UserId,
  pub group_id: Option<Option<GroupId>>,
  pub image: Option<Option<String>>,
  pub published: Option<NaiveDateTime>,
}

impl Crud for Post {
  type Form = PostForm;
  type IdType = PostId;

  fn read(conn: &mut SqliteConnection, from_post_id: PostId) -> Result<Self, Error> {
    use crate::schema::post::dsl::*;
    post.find(from_post_id).first::<Self>(conn)
  }

  fn delete(conn: &mut SqliteConnection, from_post_id: PostId) -> Result<usize, Error> {
    use crate::schema::post::dsl::*;
    diesel::delete(post.find(from_post_id)).execute(conn)
  }

  fn create(conn: &mut SqliteConnection, form: &PostForm) -> Result<Self, Error> {
    use crate::schema::post::dsl::*;
    insert_into(post).values(form).get_result::<Self>(conn)
  }

  fn update(
    conn: &mut SqliteConnection,
    from_post_id: PostId,
    form: &PostForm,
  ) -> Result<Self, Error> {
    use crate::schema::post::dsl::*;
    diesel::update(post.find(from_post_id))
      .set(form)
      .get_result::<Self>(conn)
  }
}

// The canonical feed order is newest first; ids break ties between
// posts published in the same instant.
impl Post {
  pub fn list_all(conn: &mut SqliteConnection) -> Result<Vec<Self>, Error> {
    post::table
      .order_by(post::published.desc())
      .then_order_by(post::id.desc())
      .load::<Self>(conn)
  }

  pub fn for_group(
    conn: &mut SqliteConnection,
    from_group_id: GroupId,
  ) -> Result<Vec<Self>, Error> {
    post::table
      .filter(post::group_id.eq(from_group_id))
      .order_by(post::published.desc())
      .then_order_by(post::id.desc())
      .load::<Self>(conn)
  }

  pub fn for_author(
    conn: &mut SqliteConnection,
    from_author_id: UserId,
  ) -> Result<Vec<Self>, Error> {
    post::table
      .filter(post::author_id.eq(from_author_id))
      .order_by(post::published.desc())
      .then_order_by(post::id.desc())
      .load::<Self>(conn)
  }

  /// Posts written by any author the given user follows.
  pub fn for_followed_authors(
    conn: &mut SqliteConnection,
    from_user_id: UserId,
  ) -> Result<Vec<Self>, Error> {
    post::table
      .inner_join(follow::table.on(follow::author_id.eq(post::author_id)))
      .filter(follow::user_id.eq(from_user_id))
      .select(post::all_columns)
      .order_by(post::published.desc())
      .then_order_by(post::id.desc())
      .load::<Self>(conn)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{
    db::{
      establish_test_connection,
      follow::{Follow, FollowForm},
      group::{Group, GroupForm},
      user::{User_, UserForm},
      Followable,
    },
    naive_now,
  };
  use chrono::Duration;
  use pretty_assertions::assert_eq;

  fn make_user(conn: &mut SqliteConnection, name: &str) -> User_ {
    User_::create(
      conn,
      &UserForm {
        name: name.into(),
        published: None,
      },
    )
    .unwrap()
  }

  fn make_group(conn: &mut SqliteConnection, slug: &str) -> Group {
    Group::create(
      conn,
      &GroupForm {
        title: slug.to_uppercase(),
        slug: slug.into(),
        description: String::new(),
      },
    )
    .unwrap()
  }

  fn make_post(
    conn: &mut SqliteConnection,
    author_id: UserId,
    group_id: Option<GroupId>,
    age_secs: i64,
  ) -> Post {
    Post::create(
      conn,
      &PostForm {
        text: format!("post from {age_secs}s ago"),
        author_id,
        group_id: Some(group_id),
        image: None,
        published: Some(naive_now() - Duration::seconds(age_secs)),
      },
    )
    .unwrap()
  }

  #[test]
  fn test_crud() {
    let conn = &mut establish_test_connection();
    let author = make_user(conn, "sara");
    let group = make_group(conn, "travel");

    let new_post = PostForm {
      text: "A test post".into(),
      author_id: author.id,
      group_id: Some(Some(group.id)),
      image: None,
      published: None,
    };

    let inserted_post = Post::create(conn, &new_post).unwrap();

    let expected_post = Post {
      id: inserted_post.id,
      text: "A test post".into(),
      author_id: author.id,
      group_id: Some(group.id),
      image: None,
      published: inserted_post.published,
    };

    let read_post = Post::read(conn, inserted_post.id).unwrap();
    let updated_post = Post::update(conn, inserted_post.id, &new_post).unwrap();
    let num_deleted = Post::delete(conn, inserted_post.id).unwrap();

    assert_eq!(expected_post, read_post);
    assert_eq!(expected_post, inserted_post);
    assert_eq!(expected_post, updated_post);
    assert_eq!(1, num_deleted);
  }

  #[test]
  fn test_list_all_newest_first() {
    let conn = &mut establish_test_connection();
    let author = make_user(conn, "sara");

    let old = make_post(conn, author.id, None, 30);
    let newest = make_post(conn, author.id, None, 0);
    let middle = make_post(conn, author.id, None, 10);

    let listed = Post::list_all(conn).unwrap();
    assert_eq!(vec![newest, middle, old], listed);
  }

  #[test]
  fn test_for_group_only_contains_that_group() {
    let conn = &mut establish_test_connection();
    let author = make_user(conn, "sara");
    let travel = make_group(conn, "travel");
    let cooking = make_group(conn, "cooking");

    let travel_post = make_post(conn, author.id, Some(travel.id), 0);
    let cooking_post = make_post(conn, author.id, Some(cooking.id), 5);
    make_post(conn, author.id, None, 10);

    assert_eq!(vec![travel_post], Post::for_group(conn, travel.id).unwrap());
    assert_eq!(
      vec![cooking_post],
      Post::for_group(conn, cooking.id).unwrap()
    );
  }

  #[test]
  fn test_group_delete_nullifies_posts() {
    let conn = &mut establish_test_connection();
    let author = make_user(conn, "sara");
    let group = make_group(conn, "travel");

    let first = make_post(conn, author.id, Some(group.id), 0);
    let second = make_post(conn, author.id, Some(group.id), 5);

    Group::delete(conn, group.id).unwrap();

    // Both posts survive, detached from the deleted group.
    let orphaned_first = Post::read(conn, first.id).unwrap();
    let orphaned_second = Post::read(conn, second.id).unwrap();
    assert_eq!(None, orphaned_first.group_id);
    assert_eq!(None, orphaned_second.group_id);
  }

  #[test]
  fn test_for_followed_authors() {
    let conn = &mut establish_test_connection();
    let reader = make_user(conn, "reader");
    let followed = make_user(conn, "followed");
    let ignored = make_user(conn, "ignored");

    let older = make_post(conn, followed.id, None, 20);
    let newer = make_post(conn, followed.id, None, 0);
    make_post(conn, ignored.id, None, 10);

    Follow::follow(
      conn,
      &FollowForm {
        user_id: reader.id,
        author_id: followed.id,
      },
    )
    .unwrap();

    let feed = Post::for_followed_authors(conn, reader.id).unwrap();
    assert_eq!(vec![newer, older], feed);

    // Following nobody means an empty feed.
    assert!(Post::for_followed_authors(conn, followed.id)
      .unwrap()
      .is_empty());
  }

  #[test]
  fn test_author_delete_cascades_to_posts() {
    let conn = &mut establish_test_connection();
    let author = make_user(conn, "sara");
    let inserted_post = make_post(conn, author.id, None, 0);

    User_::delete(conn, author.id).unwrap();
    assert_eq!(
      Error::NotFound,
      Post::read(conn, inserted_post.id).unwrap_err()
    );
  }
}
