pub mod api;
pub mod cache;
pub mod context;
pub mod db;
pub mod error;
pub mod newtypes;
pub mod pagination;
pub mod schema;
pub mod settings;

use chrono::NaiveDateTime;

pub fn naive_now() -> NaiveDateTime {
  chrono::Utc::now().naive_utc()
}
