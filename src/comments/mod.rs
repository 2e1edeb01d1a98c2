//! Page comments stored as GitHub Discussion replies.
//!
//! Each page maps to one discussion titled `Page: <page>`; each comment is a
//! reply whose body carries the anchor metadata in a fenced JSON block.

pub mod codec;
pub mod model;
pub mod resolver;
pub mod service;

pub use codec::{CommentBody, decode_body, encode_body};
pub use model::{Comment, NewComment, ResolveRequest, SetupIds};
pub use resolver::{DiscussionResolver, DiscussionTarget};
pub use service::CommentService;
