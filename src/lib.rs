// Library for tests to access modules

pub mod cache;
pub mod camera;
pub mod config;
pub mod error;
pub mod models;
pub mod moonraker;
pub mod normalize;
pub mod routes;
pub mod settings_repo;
pub mod version;
