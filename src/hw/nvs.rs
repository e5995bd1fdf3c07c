//! NVS-backed settings store.
//!
//! Each access opens a scoped session on the default partition:
//! read-only for gets, read-write for puts - mirroring how the
//! namespaces are small and touched rarely (calibration, brightness).

use esp_idf_svc::nvs::{EspDefaultNvsPartition, EspNvs, NvsDefault};
use log::warn;

use crate::storage::KvStore;

pub struct NvsStore {
    partition: EspDefaultNvsPartition,
}

impl NvsStore {
    pub fn new(partition: EspDefaultNvsPartition) -> Self {
        Self { partition }
    }

    fn open(&self, namespace: &str, read_write: bool) -> Option<EspNvs<NvsDefault>> {
        match EspNvs::new(self.partition.clone(), namespace, read_write) {
            Ok(nvs) => Some(nvs),
            Err(e) => {
                warn!("NVS open '{}' failed: {}", namespace, e);
                None
            }
        }
    }
}

impl KvStore for NvsStore {
    fn get_u32(&mut self, namespace: &str, key: &str) -> Option<u32> {
        self.open(namespace, false)?.get_u32(key).ok().flatten()
    }

    fn put_u32(&mut self, namespace: &str, key: &str, value: u32) -> bool {
        match self.open(namespace, true) {
            Some(mut nvs) => nvs.set_u32(key, value).is_ok(),
            None => false,
        }
    }

    fn get_u8(&mut self, namespace: &str, key: &str) -> Option<u8> {
        self.open(namespace, false)?.get_u8(key).ok().flatten()
    }

    fn put_u8(&mut self, namespace: &str, key: &str, value: u8) -> bool {
        match self.open(namespace, true) {
            Some(mut nvs) => nvs.set_u8(key, value).is_ok(),
            None => false,
        }
    }
}
