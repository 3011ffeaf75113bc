//! OpenAPI仕様書の読み込みとエンドポイント分類

pub mod classifier;
pub mod loader;

pub use classifier::{
    classify, exclusion_reason, extract_get_operations, is_status_endpoint, Exclusion,
    CONTROL_KEYWORDS,
};
pub use loader::SpecDocument;
