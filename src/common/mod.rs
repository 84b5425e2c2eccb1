pub mod extract;
pub mod response;

pub use extract::{JsonBody, PathParam};
pub use response::{ErrorResponse, INTERNAL_ERROR_MESSAGE};
