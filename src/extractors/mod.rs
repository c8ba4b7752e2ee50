//! Request extractors: HTTP Basic credentials, path item ids and schema-validated JSON bodies.

mod basic_auth;
mod item_id;
mod validated_json;

pub use basic_auth::{parse_basic_authorization, BasicCredentials};
pub use item_id::{parse_item_id, ItemId};
pub use validated_json::{SchemaBound, ValidatedJson};
