pub mod analyze;
pub mod combine;
pub mod config;
pub mod subtract;
