pub mod app_info;
pub mod backend;
pub mod models;
pub mod openapi;
pub mod routes;

#[cfg(test)]
mod additional_tests;
