use crate::{error::QuillResult, settings::Settings};
use diesel::{
  connection::SimpleConnection,
  r2d2::{ConnectionManager, CustomizeConnection, Pool, PooledConnection},
  result::Error,
  SqliteConnection,
};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use tracing::info;

pub mod comment;
pub mod follow;
pub mod group;
pub mod post;
pub mod user;

pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;
pub type DbConn = PooledConnection<ConnectionManager<SqliteConnection>>;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

pub trait Crud {
  type Form;
  type IdType;
  fn create(conn: &mut SqliteConnection, form: &Self::Form) -> Result<Self, Error>
  where
    Self: Sized;
  fn read(conn: &mut SqliteConnection, id: Self::IdType) -> Result<Self, Error>
  where
    Self: Sized;
  fn update(
    conn: &mut SqliteConnection,
    id: Self::IdType,
    form: &Self::Form,
  ) -> Result<Self, Error>
  where
    Self: Sized;
  fn delete(conn: &mut SqliteConnection, id: Self::IdType) -> Result<usize, Error>
  where
    Self: Sized;
}

pub trait Followable {
  type Form;
  /// Creates the edge when it doesn't exist. Self-follows and repeated
  /// calls are no-ops: the current edge (if any) is returned unchanged.
  fn follow(conn: &mut SqliteConnection, form: &Self::Form) -> Result<Option<Self>, Error>
  where
    Self: Sized;
  /// Removes the edge, with `Error::NotFound` when it was never there.
  fn unfollow(conn: &mut SqliteConnection, form: &Self::Form) -> Result<usize, Error>
  where
    Self: Sized;
}

// Sqlite only honors referential actions with the pragma switched on,
// so every pooled connection gets it at acquire time.
#[derive(Debug)]
struct ConnectionCustomizer;

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for ConnectionCustomizer {
  fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
    conn
      .batch_execute("PRAGMA foreign_keys = ON; PRAGMA busy_timeout = 5000;")
      .map_err(diesel::r2d2::Error::QueryError)
  }
}

pub fn build_db_pool(settings: &Settings) -> QuillResult<DbPool> {
  let db_url = settings.get_database_url();
  let manager = ConnectionManager::<SqliteConnection>::new(&db_url);
  let pool = Pool::builder()
    .max_size(settings.pool_size)
    .connection_customizer(Box::new(ConnectionCustomizer))
    .build(manager)?;
  let mut conn = pool.get()?;
  run_migrations(&mut conn)?;
  Ok(pool)
}

pub fn run_migrations(conn: &mut SqliteConnection) -> QuillResult<()> {
  info!("Running database migrations");
  conn
    .run_pending_migrations(MIGRATIONS)
    .map_err(|e| anyhow::anyhow!("Couldn't run migrations: {e}"))?;
  info!("Database migrations complete");
  Ok(())
}

#[cfg(test)]
pub(crate) fn establish_test_connection() -> SqliteConnection {
  use diesel::Connection;

  let mut conn =
    SqliteConnection::establish(":memory:").expect("establish in-memory connection");
  conn
    .batch_execute("PRAGMA foreign_keys = ON;")
    .expect("enable foreign keys");
  conn
    .run_pending_migrations(MIGRATIONS)
    .expect("run migrations");
  conn
}
