pub mod dispatch;
pub mod id;
pub mod lifecycle;
pub mod schema;
