use std::sync::{Arc, Mutex, MutexGuard};

use actix_web::error::ErrorInternalServerError;
use chrono::Local;

use crate::attendance::capture::CheckInForm;
use crate::attendance::store::RecordStore;
use crate::db::KeyValueStore;
use crate::imaging::client::ImageClient;
use crate::view::ViewRouter;

/// Application state shared by every worker. Created once at startup from
/// the persisted records; nothing needs tearing down.
pub struct AppState {
    pub records: Mutex<RecordStore>,
    pub check_in: Mutex<CheckInForm>,
    pub view: Mutex<ViewRouter>,
    pub images: ImageClient,
}

impl AppState {
    pub fn new(backend: Arc<dyn KeyValueStore>, images: ImageClient) -> Self {
        Self {
            records: Mutex::new(RecordStore::load(backend)),
            check_in: Mutex::new(CheckInForm::new(Local::now())),
            view: Mutex::new(ViewRouter::new()),
            images,
        }
    }
}

/// Locks `m`, turning a poisoned lock into a 500.
pub fn lock<'a, T>(m: &'a Mutex<T>, what: &str) -> actix_web::Result<MutexGuard<'a, T>> {
    m.lock().map_err(|_| {
        tracing::error!(state = what, "State lock poisoned");
        ErrorInternalServerError("Internal Server Error")
    })
}
