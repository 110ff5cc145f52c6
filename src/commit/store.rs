use crate::error::StoreError;
use crate::types::{EmployeeRecord, InventoryRecord};

/// Persistence collaborator the committer writes to, one record per call.
///
/// Implementations own retry and timeout policy; the committer waits for each call to return
/// before moving to the next row.
pub trait RecordStore {
    fn insert_inventory(&mut self, record: &InventoryRecord) -> Result<(), StoreError>;

    fn insert_employee(&mut self, record: &EmployeeRecord) -> Result<(), StoreError>;
}

impl<S: RecordStore + ?Sized> RecordStore for &mut S {
    fn insert_inventory(&mut self, record: &InventoryRecord) -> Result<(), StoreError> {
        (**self).insert_inventory(record)
    }

    fn insert_employee(&mut self, record: &EmployeeRecord) -> Result<(), StoreError> {
        (**self).insert_employee(record)
    }
}

/// A store that keeps everything in memory and accepts every insert.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    inventory: Vec<InventoryRecord>,
    employees: Vec<EmployeeRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inventory records in insertion order.
    pub fn inventory(&self) -> &[InventoryRecord] {
        &self.inventory
    }

    /// Employee records in insertion order.
    pub fn employees(&self) -> &[EmployeeRecord] {
        &self.employees
    }

    /// Total number of records held.
    pub fn len(&self) -> usize {
        self.inventory.len() + self.employees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl RecordStore for MemoryStore {
    fn insert_inventory(&mut self, record: &InventoryRecord) -> Result<(), StoreError> {
        self.inventory.push(record.clone());
        Ok(())
    }

    fn insert_employee(&mut self, record: &EmployeeRecord) -> Result<(), StoreError> {
        self.employees.push(record.clone());
        Ok(())
    }
}
