pub mod field;
pub mod profile;
pub mod record;
pub mod schema;
