//! localStorage persistence for the save dialog's placeholder.

use gateshell_core::SaveNameStore;
use gloo_storage::{LocalStorage, Storage};

const LAST_SAVE_NAME_KEY: &str = "gateshell_last_save_name";

pub struct LocalNameStore;

impl SaveNameStore for LocalNameStore {
    fn last_name(&self) -> Option<String> {
        LocalStorage::get(LAST_SAVE_NAME_KEY).ok()
    }

    fn remember(&self, name: &str) {
        let _ = LocalStorage::set(LAST_SAVE_NAME_KEY, name);
    }
}
