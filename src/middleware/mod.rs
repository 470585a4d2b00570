pub mod security_headers;

pub use security_headers::{add_security_headers, SecurityPolicy};
