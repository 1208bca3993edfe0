//! DTOs for slug generation endpoint.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Query parameters for `GET /api/slugs`.
#[derive(Debug, Deserialize, Validate)]
pub struct SlugQuery {
    #[validate(range(min = 1, max = 255, message = "Length must be between 1 and 255"))]
    pub length: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct SlugResponse {
    pub slug: String,
}
