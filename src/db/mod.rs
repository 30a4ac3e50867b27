pub mod comments;

pub use comments::Comments;
