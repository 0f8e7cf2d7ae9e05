//! In-memory [`DataAccess`] over a fixed starting set of records.
//!
//! A `Snapshot` behaves like the record store: ids are assigned on create,
//! updates replace all fields, deletes remove the record. It also counts
//! writes, so callers can assert that a rejected mutation never reached it.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;

use crate::data_access::{DataAccess, DataAccessError};
use crate::types::{Customer, Flavour, ItemType, Order, Payload, Record};

#[derive(Debug, Default, Clone)]
struct Records {
    customers: Vec<Customer>,
    flavours: Vec<Flavour>,
    orders: Vec<Order>,
}

impl Records {
    fn next_id(&self, item_type: ItemType) -> Option<i32> {
        let max = match item_type {
            ItemType::Customers => self.customers.iter().map(|c| c.id.as_i32()).max(),
            ItemType::Flavours => self.flavours.iter().map(|f| f.id.as_i32()).max(),
            ItemType::Orders => self.orders.iter().map(|o| o.id.as_i32()).max(),
        };
        max.unwrap_or(0).checked_add(1)
    }

    fn put(&mut self, record: Record) -> bool {
        fn replace<T>(items: &mut Vec<T>, item: T, same: impl Fn(&T) -> bool) -> bool {
            match items.iter_mut().find(|existing| same(existing)) {
                Some(slot) => {
                    *slot = item;
                    true
                }
                None => {
                    items.push(item);
                    false
                }
            }
        }

        match record {
            Record::Customer(c) => {
                let id = c.id;
                replace(&mut self.customers, c, |x| x.id == id)
            }
            Record::Flavour(f) => {
                let id = f.id;
                replace(&mut self.flavours, f, |x| x.id == id)
            }
            Record::Order(o) => {
                let id = o.id;
                replace(&mut self.orders, o, |x| x.id == id)
            }
        }
    }

    fn contains(&self, item_type: ItemType, id: i32) -> bool {
        match item_type {
            ItemType::Customers => self.customers.iter().any(|c| c.id.as_i32() == id),
            ItemType::Flavours => self.flavours.iter().any(|f| f.id.as_i32() == id),
            ItemType::Orders => self.orders.iter().any(|o| o.id.as_i32() == id),
        }
    }

    fn remove(&mut self, item_type: ItemType, id: i32) -> bool {
        let before = self.len(item_type);
        match item_type {
            ItemType::Customers => self.customers.retain(|c| c.id.as_i32() != id),
            ItemType::Flavours => self.flavours.retain(|f| f.id.as_i32() != id),
            ItemType::Orders => self.orders.retain(|o| o.id.as_i32() != id),
        }
        self.len(item_type) < before
    }

    fn len(&self, item_type: ItemType) -> usize {
        match item_type {
            ItemType::Customers => self.customers.len(),
            ItemType::Flavours => self.flavours.len(),
            ItemType::Orders => self.orders.len(),
        }
    }
}

/// In-memory record set implementing [`DataAccess`].
#[derive(Debug, Default)]
pub struct Snapshot {
    records: RwLock<Records>,
    writes: AtomicUsize,
}

impl Snapshot {
    /// Create a snapshot holding the given records.
    #[must_use]
    pub fn new(customers: Vec<Customer>, flavours: Vec<Flavour>, orders: Vec<Order>) -> Self {
        Self {
            records: RwLock::new(Records {
                customers,
                flavours,
                orders,
            }),
            writes: AtomicUsize::new(0),
        }
    }

    /// Number of create/update/delete calls that reached this snapshot.
    #[must_use]
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn read<T>(&self, f: impl FnOnce(&Records) -> T) -> T {
        let guard = self.records.read().unwrap_or_else(PoisonError::into_inner);
        f(&guard)
    }

    fn write<T>(&self, f: impl FnOnce(&mut Records) -> T) -> T {
        self.writes.fetch_add(1, Ordering::SeqCst);
        let mut guard = self.records.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }
}

#[async_trait]
impl DataAccess for Snapshot {
    async fn customers(&self) -> Result<Vec<Customer>, DataAccessError> {
        Ok(self.read(|r| r.customers.clone()))
    }

    async fn flavours(&self) -> Result<Vec<Flavour>, DataAccessError> {
        Ok(self.read(|r| r.flavours.clone()))
    }

    async fn orders(&self) -> Result<Vec<Order>, DataAccessError> {
        Ok(self.read(|r| r.orders.clone()))
    }

    async fn create(&self, payload: &Payload) -> Result<Record, DataAccessError> {
        let item_type = payload.item_type();
        self.write(|r| {
            let id = r
                .next_id(item_type)
                .ok_or(DataAccessError::IdsExhausted(item_type))?;
            let record = payload.clone().into_record(id);
            r.put(record.clone());
            Ok(record)
        })
    }

    async fn update(&self, id: i32, payload: &Payload) -> Result<Record, DataAccessError> {
        let item_type = payload.item_type();
        self.write(|r| {
            if !r.contains(item_type, id) {
                return Err(DataAccessError::NotFound { item_type, id });
            }
            let record = payload.clone().into_record(id);
            r.put(record.clone());
            Ok(record)
        })
    }

    async fn delete(&self, item_type: ItemType, id: i32) -> Result<(), DataAccessError> {
        self.write(|r| {
            if r.remove(item_type, id) {
                Ok(())
            } else {
                Err(DataAccessError::NotFound { item_type, id })
            }
        })
    }
}
