//! Customer service for loading the records the list displays.

use crate::domain::Customer;
use crate::error::{CustomerError, CustomerResult};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Read-only source of customer records backed by a JSON array on disk
pub struct CustomerService {
    path: PathBuf,
}

impl CustomerService {
    /// Create a new CustomerService
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load every customer in file order
    pub fn load(&self) -> CustomerResult<Vec<Customer>> {
        if !self.path.exists() {
            return Err(CustomerError::NotFound(self.path.clone()));
        }

        let raw = fs::read_to_string(&self.path).map_err(CustomerError::Io)?;
        let customers: Vec<Customer> =
            serde_json::from_str(&raw).map_err(|e| CustomerError::Parse {
                path: self.path.clone(),
                message: e.to_string(),
            })?;

        // Ids key rendered items, so repeats are worth flagging even though they load
        let mut seen = HashSet::new();
        for customer in &customers {
            if !seen.insert(customer.id.as_str()) {
                tracing::warn!(
                    "Duplicate customer id {} in {}",
                    customer.id,
                    self.path.display()
                );
            }
        }

        tracing::info!(
            "Loaded {} customers from {}",
            customers.len(),
            self.path.display()
        );
        Ok(customers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_customers(json: &str) -> (TempDir, PathBuf) {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("customers.json");
        fs::write(&path, json).unwrap();
        (temp, path)
    }

    #[test]
    fn test_load_preserves_file_order() {
        let (_temp, path) = write_customers(
            r#"[
                {"id":"b","name":"Bea","phone":"555-0102","shirt":"S","pants":"28x30"},
                {"id":"a","name":"Abe","phone":"555-0101","shirt":"XL","pants":"38x30","other_measurements":"Hat 7"}
            ]"#,
        );
        let service = CustomerService::new(path);

        let customers = service.load().unwrap();
        assert_eq!(customers.len(), 2);
        assert_eq!(customers[0].name, "Bea");
        assert_eq!(customers[1].other(), Some("Hat 7"));
    }

    #[test]
    fn test_load_missing_file() {
        let temp = TempDir::new().unwrap();
        let service = CustomerService::new(temp.path().join("nope.json"));

        assert!(matches!(service.load(), Err(CustomerError::NotFound(_))));
    }

    #[test]
    fn test_load_malformed_file() {
        let (_temp, path) = write_customers(r#"[{"id":"1","name":"Half"}]"#);
        let service = CustomerService::new(path);

        assert!(matches!(service.load(), Err(CustomerError::Parse { .. })));
    }

    #[test]
    fn test_load_empty_list() {
        let (_temp, path) = write_customers("[]");
        let service = CustomerService::new(path);

        assert!(service.load().unwrap().is_empty());
    }
}
