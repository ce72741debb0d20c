pub mod artifact_schema;
pub mod defaults;
pub mod dispatch;
pub mod form;
pub mod predict;
pub mod row;
pub mod schema;
mod shared;
