// Library root for the decision desk core: request collection, the
// decision service client, and deterministic rendering onto a display port.

pub mod client;
pub mod collector;
pub mod display;
pub mod error;
pub mod format;
pub mod protocol;
pub mod render;
pub mod scan;
pub mod session;
