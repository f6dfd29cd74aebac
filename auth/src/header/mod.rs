pub mod errors;
pub mod parser;

pub use errors::HeaderError;
pub use parser::api_key;
pub use parser::bearer_token;
pub use parser::extract;
pub use parser::API_KEY;
pub use parser::BEARER;
