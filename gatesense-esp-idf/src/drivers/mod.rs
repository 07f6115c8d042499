pub mod http;
pub mod relay;
pub mod status_line;
pub mod wifi;
