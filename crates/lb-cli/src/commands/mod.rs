pub mod dispatch;
pub mod model;
pub mod predict;
pub mod schema;
pub mod session;
mod shared;
