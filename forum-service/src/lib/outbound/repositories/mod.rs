pub mod comment;
pub mod post;
pub mod topic;
pub mod user;

pub use comment::PostgresCommentRepository;
pub use post::PostgresPostRepository;
pub use topic::PostgresTopicRepository;
pub use user::PostgresUserRepository;
