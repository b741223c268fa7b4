pub mod minify;
pub mod slug;
