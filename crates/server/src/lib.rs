pub mod errors;
pub mod routes;
pub mod services;
pub mod startup;

pub use startup::run;
