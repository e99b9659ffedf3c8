mod initdb;
mod seed_demo;
mod serve;

pub use initdb::init_database;
pub use seed_demo::seed_demo_catalog;
pub use serve::serve;
