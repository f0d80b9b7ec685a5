use crate::{db::Crud, newtypes::UserId, schema::user_};
use chrono::NaiveDateTime;
use diesel::{dsl::insert_into, prelude::*, result::Error};
use serde::{Deserialize, Serialize};

#[derive(Queryable, Identifiable, PartialEq, Debug, Clone, Serialize, Deserialize)]
#[diesel(table_name = user_)]
pub struct User_ {
  pub id: UserId,
  pub name: String,
  pub published: NaiveDateTime,
}

#[derive(Insertable, AsChangeset, Clone)]
#[diesel(table_name = user_)]
pub struct UserForm {
  pub name: String,
  pub published: Option<NaiveDateTime>,
}

impl Crud for User_ {
  type Form = UserForm;
  type IdType = UserId;

  fn read(conn: &mut SqliteConnection, from_user_id: UserId) -> Result<Self, Error> {
    use crate::schema::user_::dsl::*;
    user_.find(from_user_id).first::<Self>(conn)
  }

  fn delete(conn: &mut SqliteConnection, from_user_id: UserId) -> Result<usize, Error> {
    use crate::schema::user_::dsl::*;
    diesel::delete(user_.find(from_user_id)).execute(conn)
  }

  fn create(conn: &mut SqliteConnection, form: &UserForm) -> Result<Self, Error> {
    use crate::schema::user_::dsl::*;
    insert_into(user_).values(form).get_result::<Self>(conn)
  }

  fn update(
    conn: &mut SqliteConnection,
    from_user_id: UserId,
    form: &UserForm,
  ) -> Result<Self, Error> {
    use crate::schema::user_::dsl::*;
    diesel::update(user_.find(from_user_id))
      .set(form)
      .get_result::<Self>(conn)
  }
}

impl User_ {
  pub fn read_from_name(conn: &mut SqliteConnection, from_name: &str) -> Result<Self, Error> {
    use crate::schema::user_::dsl::*;
    user_.filter(name.eq(from_name)).first::<Self>(conn)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::db::establish_test_connection;
  use pretty_assertions::assert_eq;

  #[test]
  fn test_crud() {
    let conn = &mut establish_test_connection();

    let new_user = UserForm {
      name: "terry".into(),
      published: None,
    };

    let inserted_user = User_::create(conn, &new_user).unwrap();

    let expected_user = User_ {
      id: inserted_user.id,
      name: "terry".into(),
      published: inserted_user.published,
    };

    let read_user = User_::read(conn, inserted_user.id).unwrap();
    let read_by_name = User_::read_from_name(conn, "terry").unwrap();
    let updated_user = User_::update(conn, inserted_user.id, &new_user).unwrap();
    let num_deleted = User_::delete(conn, inserted_user.id).unwrap();

    assert_eq!(expected_user, read_user);
    assert_eq!(expected_user, read_by_name);
    assert_eq!(expected_user, inserted_user);
    assert_eq!(expected_user, updated_user);
    assert_eq!(1, num_deleted);
  }

  #[test]
  fn test_unknown_name_is_not_found() {
    let conn = &mut establish_test_connection();
    let err = User_::read_from_name(conn, "nobody").unwrap_err();
    assert_eq!(Error::NotFound, err);
  }
}
