pub mod http;
pub mod types;


pub use http::HttpClient;
pub use types::*;
