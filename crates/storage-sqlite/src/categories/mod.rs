mod model;
mod repository;

pub use model::{CategoryChangesDB, CategoryDB};
pub use repository::CategoryRepository;
