pub mod cleanup;
pub mod repost_purge;
