// Library for tests to access modules

pub mod aggregation;
pub mod config;
pub mod csv_repo;
pub mod models;
pub mod routes;
pub mod scale;
pub mod series;
pub mod timefmt;
pub mod version;
