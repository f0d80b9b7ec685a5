use crate::{db::Crud, newtypes::GroupId, schema::group_};
use diesel::{dsl::insert_into, prelude::*, result::Error};
use serde::{Deserialize, Serialize};

#[derive(Queryable, Identifiable, PartialEq, Debug, Clone, Serialize, Deserialize)]
#[diesel(table_name = group_)]
pub struct Group {
  pub id: GroupId,
  pub title: String,
  pub slug: String,
  pub description: String,
}

#[derive(Insertable, AsChangeset, Clone)]
#[diesel(table_name = group_)]
pub struct GroupForm {
  pub title: String,
  pub slug: String,
  pub description: String,
}

impl Crud for Group {
  type Form = GroupForm;
  type IdType = GroupId;

  fn read(conn: &mut SqliteConnection, from_group_id: GroupId) -> Result<Self, Error> {
    use crate::schema::group_::dsl::*;
    group_.find(from_group_id).first::<Self>(conn)
  }

  fn delete(conn: &mut SqliteConnection, from_group_id: GroupId) -> Result<usize, Error> {
    use crate::schema::group_::dsl::*;
    diesel::delete(group_.find(from_group_id)).execute(conn)
  }

  fn create(conn: &mut SqliteConnection, form: &GroupForm) -> Result<Self, Error> {
    use crate::schema::group_::dsl::*;
    insert_into(group_).values(form).get_result::<Self>(conn)
  }

  fn update(
    conn: &mut SqliteConnection,
    from_group_id: GroupId,
    form: &GroupForm,
  ) -> Result<Self, Error> {
    use crate::schema::group_::dsl::*;
    diesel::update(group_.find(from_group_id))
      .set(form)
      .get_result::<Self>(conn)
  }
}

impl Group {
  pub fn read_from_slug(conn: &mut SqliteConnection, from_slug: &str) -> Result<Self, Error> {
    use crate::schema::group_::dsl::*;
    group_.filter(slug.eq(from_slug)).first::<Self>(conn)
  }
}
