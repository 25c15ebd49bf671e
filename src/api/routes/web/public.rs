//! Public types for the landing page
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize)]
pub struct PageErrorResponse {
    pub error: String,
}
