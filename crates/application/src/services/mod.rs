mod resolution_server;

pub use resolution_server::{ResolutionServer, DEFAULT_QUERY_TIMEOUT};
