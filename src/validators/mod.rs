pub mod body;
pub mod request;
pub mod response;

pub use body::BodyValidator;
pub use request::RequestBodyValidator;
pub use response::ResponseValidator;
