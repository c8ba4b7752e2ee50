mod catalog;
mod common;

pub use catalog::catalog_routes;
pub use common::common_routes_with_ready;
