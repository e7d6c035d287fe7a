pub mod model;
pub mod outcome;
pub mod record;
pub mod schema;
