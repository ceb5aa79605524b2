pub use crate::server::backend::*;
pub use crate::server::backend_data::*;
pub use crate::server::diagnostic_result::*;
pub use crate::server::text_document::*;

pub mod backend;
pub mod backend_data;
pub mod diagnostic_result;
pub mod position;
pub mod syntax_errors;
pub mod text_document;
