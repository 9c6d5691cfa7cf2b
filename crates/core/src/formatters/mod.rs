pub mod json;
pub mod post;

pub use json::{JsonConfig, JsonOutput, convert_to_json};
pub use post::{PostFormatter, format_post, format_post_with_rng};
