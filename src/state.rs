use std::sync::Arc;

use crate::uploads::storage::MediaStore;

/// Shared application state: the storage sink for accepted uploads.
pub struct AppState {
    pub store: Arc<dyn MediaStore>,
}
