use std::sync::Arc;

use connect_logging::{connect_info, connect_warn};

use crate::{KeyValueStore, StoreError};

/// Store key holding the percent-encoded endpoints, oldest first.
pub const HISTORY_KEY: &str = "theia.remote.history";

pub fn encode_endpoint(url: &str) -> String {
    urlencoding::encode(url).into_owned()
}

/// Entries that are not valid percent-encoded UTF-8 are returned verbatim.
pub fn decode_endpoint(entry: &str) -> String {
    match urlencoding::decode(entry) {
        Ok(decoded) => decoded.into_owned(),
        Err(err) => {
            connect_warn!("Keeping undecodable history entry {:?}: {}", entry, err);
            entry.to_string()
        }
    }
}

/// Previously connected endpoints, in the order they were first opened.
#[derive(Clone)]
pub struct History {
    store: Arc<dyn KeyValueStore>,
}

impl History {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn entries(&self) -> Result<Vec<String>, StoreError> {
        let stored = self.store.get_or(HISTORY_KEY, Vec::new())?;
        Ok(stored.iter().map(|entry| decode_endpoint(entry)).collect())
    }

    /// Appends `url` unless its encoded form is already present.
    /// Returns whether the list changed.
    pub fn remember(&self, url: &str) -> Result<bool, StoreError> {
        let encoded = encode_endpoint(url);
        let mut appended = false;
        self.store.update(HISTORY_KEY, &mut |current| {
            let mut list = current.unwrap_or_default();
            if !list.contains(&encoded) {
                list.push(encoded.clone());
                appended = true;
            }
            Some(list)
        })?;
        if appended {
            connect_info!("Remembered remote endpoint {}", url);
        }
        Ok(appended)
    }

    pub fn clear(&self) -> Result<(), StoreError> {
        self.store.remove(HISTORY_KEY)?;
        connect_info!("Cleared remote history");
        Ok(())
    }
}
