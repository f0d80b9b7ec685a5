diesel::table! {
  comment (id) {
    id -> Integer,
    post_id -> Integer,
    author_id -> Integer,
    text -> Text,
    published -> Timestamp,
  }
}

diesel::table! {
  follow (id) {
    id -> Integer,
    user_id -> Integer,
    author_id -> Integer,
    published -> Timestamp,
  }
}

diesel::table! {
  group_ (id) {
    id -> Integer,
    title -> Text,
    slug -> Text,
    description -> Text,
  }
}

diesel::table! {
  post (id) {
    id -> Integer,
    text -> Text,
    author_id -> Integer,
    group_id -> Nullable<Integer>,
    image -> Nullable<Text>,
    published -> Timestamp,
  }
}

diesel::table! {
  user_ (id) {
    id -> Integer,
    name -> Text,
    published -> Timestamp,
  }
}

diesel::joinable!(comment -> post (post_id));
diesel::joinable!(comment -> user_ (author_id));
diesel::joinable!(post -> group_ (group_id));
diesel::joinable!(post -> user_ (author_id));

diesel::allow_tables_to_appear_in_same_query!(comment, follow, group_, post, user_);
