mod api_error;
mod incident;

pub use api_error::*;
pub use incident::*;
