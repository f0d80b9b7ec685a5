use crate::{
  db::Followable,
  newtypes::{FollowId, UserId},
  schema::follow,
};
use chrono::NaiveDateTime;
use diesel::{
  dsl::{exists, insert_into},
  prelude::*,
  result::Error,
  select,
};
use serde::{Deserialize, Serialize};

#[derive(Queryable, Identifiable, PartialEq, Debug, Clone, Serialize, Deserialize)]
#[diesel(table_name = follow)]
pub struct Follow {
  pub id: FollowId,
  pub user_id: UserId,
  pub author_id: UserId,
  pub published: NaiveDateTime,
}

#[derive(Insertable, Clone)]
#[diesel(table_name = follow)]
pub struct FollowForm {
  pub user_id: UserId,
  pub author_id: UserId,
}

impl Followable for Follow {
  type Form = FollowForm;

  fn follow(conn: &mut SqliteConnection, form: &FollowForm) -> Result<Option<Self>, Error> {
    use crate::schema::follow::dsl::*;
    if form.user_id == form.author_id {
      return Ok(None);
    }
    // The unique constraint turns a concurrent double-follow into a
    // single edge without a read-then-write race.
    insert_into(follow)
      .values(form)
      .on_conflict((user_id, author_id))
      .do_nothing()
      .execute(conn)?;
    follow
      .filter(user_id.eq(form.user_id))
      .filter(author_id.eq(form.author_id))
      .first::<Self>(conn)
      .map(Some)
  }

  fn unfollow(conn: &mut SqliteConnection, form: &FollowForm) -> Result<usize, Error> {
    use crate::schema::follow::dsl::*;
    let count = diesel::delete(
      follow
        .filter(user_id.eq(form.user_id))
        .filter(author_id.eq(form.author_id)),
    )
    .execute(conn)?;
    if count == 0 {
      Err(Error::NotFound)
    } else {
      Ok(count)
    }
  }
}

impl Follow {
  pub fn is_following(
    conn: &mut SqliteConnection,
    from_user_id: UserId,
    from_author_id: UserId,
  ) -> Result<bool, Error> {
    use crate::schema::follow::dsl::*;
    select(exists(
      follow
        .filter(user_id.eq(from_user_id))
        .filter(author_id.eq(from_author_id)),
    ))
    .get_result(conn)
  }

  /// All authors a given user follows.
  pub fn followed_author_ids(
    conn: &mut SqliteConnection,
    from_user_id: UserId,
  ) -> Result<Vec<UserId>, Error> {
    use crate::schema::follow::dsl::*;
    follow
      .filter(user_id.eq(from_user_id))
      .select(author_id)
      .load::<UserId>(conn)
  }
}
