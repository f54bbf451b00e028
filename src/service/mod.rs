pub mod chat;
pub mod favourite;
pub mod post;
pub mod repost;
pub mod settings;
