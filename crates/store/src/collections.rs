//! In-memory record collections.
//!
//! One collection per [`ItemType`]. Records are stored as the JSON objects
//! clients sent, plus the store-assigned integer `id`. The store does not
//! check record shapes; that is the admin's job.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;
use zia_mia_core::ItemType;

pub type Object = Map<String, Value>;

/// Errors loading a seed file.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("failed to read seed file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid seed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("a record in {collection} has no integer id")]
    MissingId { collection: ItemType },

    #[error("duplicate id {id} in {collection}")]
    DuplicateId { collection: ItemType, id: i32 },
}

/// Every id of a collection up to `i32::MAX` is taken.
#[derive(Debug, Error)]
#[error("no ids left in {0}")]
pub struct IdsExhausted(pub ItemType);

/// Initial contents of the store, in the layout of a `db.json` file.
#[derive(Debug, Default, Deserialize)]
pub struct Seed {
    #[serde(default)]
    pub customers: Vec<Object>,
    #[serde(default)]
    pub flavours: Vec<Object>,
    #[serde(default)]
    pub orders: Vec<Object>,
}

impl Seed {
    /// Read a seed from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a seed object.
    pub fn load(path: &Path) -> Result<Self, SeedError> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }
}

/// Integer id of a stored object.
pub fn record_id(object: &Object) -> Option<i32> {
    object
        .get("id")
        .and_then(Value::as_i64)
        .and_then(|id| i32::try_from(id).ok())
}

/// All collections of the store.
#[derive(Debug, Default)]
pub struct Collections {
    records: BTreeMap<ItemType, Vec<Object>>,
}

impl TryFrom<Seed> for Collections {
    type Error = SeedError;

    fn try_from(seed: Seed) -> Result<Self, Self::Error> {
        let mut records = BTreeMap::new();
        for (collection, objects) in [
            (ItemType::Customers, seed.customers),
            (ItemType::Flavours, seed.flavours),
            (ItemType::Orders, seed.orders),
        ] {
            let mut seen = Vec::with_capacity(objects.len());
            for object in &objects {
                let id = record_id(object).ok_or(SeedError::MissingId { collection })?;
                if seen.contains(&id) {
                    return Err(SeedError::DuplicateId { collection, id });
                }
                seen.push(id);
            }
            records.insert(collection, objects);
        }
        Ok(Self { records })
    }
}

impl Collections {
    fn collection(&self, item_type: ItemType) -> &[Object] {
        self.records.get(&item_type).map(Vec::as_slice).unwrap_or_default()
    }

    fn collection_mut(&mut self, item_type: ItemType) -> &mut Vec<Object> {
        self.records.entry(item_type).or_default()
    }

    /// All objects of a collection, in insertion order.
    #[must_use]
    pub fn list(&self, item_type: ItemType) -> Vec<Object> {
        self.collection(item_type).to_vec()
    }

    #[must_use]
    pub fn get(&self, item_type: ItemType, id: i32) -> Option<Object> {
        self.collection(item_type)
            .iter()
            .find(|object| record_id(object) == Some(id))
            .cloned()
    }

    /// Store a new object under the next free id.
    ///
    /// Any `id` in the object is replaced.
    ///
    /// # Errors
    ///
    /// Returns [`IdsExhausted`] once the highest id is `i32::MAX`.
    pub fn insert(
        &mut self,
        item_type: ItemType,
        mut object: Object,
    ) -> Result<Object, IdsExhausted> {
        let id = self
            .collection(item_type)
            .iter()
            .filter_map(record_id)
            .max()
            .unwrap_or(0)
            .checked_add(1)
            .ok_or(IdsExhausted(item_type))?;
        object.insert("id".to_string(), Value::from(id));
        self.collection_mut(item_type).push(object.clone());
        Ok(object)
    }

    /// Replace every field of an existing object, keeping its id.
    pub fn replace(&mut self, item_type: ItemType, id: i32, mut object: Object) -> Option<Object> {
        let slot = self
            .collection_mut(item_type)
            .iter_mut()
            .find(|existing| record_id(existing) == Some(id))?;
        object.insert("id".to_string(), Value::from(id));
        *slot = object.clone();
        Some(object)
    }

    /// Remove an object; `false` if it did not exist.
    pub fn remove(&mut self, item_type: ItemType, id: i32) -> bool {
        let objects = self.collection_mut(item_type);
        let before = objects.len();
        objects.retain(|object| record_id(object) != Some(id));
        objects.len() != before
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    fn object(value: Value) -> Object {
        match value {
            Value::Object(map) => map,
            other => panic!("not an object: {other}"),
        }
    }

    fn seeded() -> Collections {
        let seed: Seed = serde_json::from_value(json!({
            "flavours": [
                {"id": 1, "name": "Vanilla", "price": 3},
                {"id": 4, "name": "Mango", "price": 4.5}
            ]
        }))
        .unwrap();
        Collections::try_from(seed).unwrap()
    }

    #[test]
    fn test_insert_assigns_next_id() {
        let mut collections = seeded();
        let created = collections
            .insert(
                ItemType::Flavours,
                object(json!({"id": 1, "name": "Lemon", "price": 2})),
            )
            .unwrap();
        assert_eq!(record_id(&created), Some(5));
        assert_eq!(collections.list(ItemType::Flavours).len(), 3);

        let first = collections
            .insert(ItemType::Customers, object(json!({"name": "Ann"})))
            .unwrap();
        assert_eq!(record_id(&first), Some(1));
    }

    #[test]
    fn test_insert_after_max_id_is_refused() {
        let seed: Seed =
            serde_json::from_value(json!({"customers": [{"id": i32::MAX, "name": "Last"}]}))
                .unwrap();
        let mut collections = Collections::try_from(seed).unwrap();

        let err = collections
            .insert(ItemType::Customers, Object::new())
            .unwrap_err();
        assert_eq!(err.to_string(), "no ids left in customers");
        assert_eq!(collections.list(ItemType::Customers).len(), 1);
    }

    #[test]
    fn test_replace_keeps_id() {
        let mut collections = seeded();
        let replaced = collections
            .replace(ItemType::Flavours, 4, object(json!({"name": "Mango", "price": 5})))
            .unwrap();
        assert_eq!(replaced["id"], 4);
        assert_eq!(collections.get(ItemType::Flavours, 4).unwrap()["price"], 5);
        assert!(
            collections
                .replace(ItemType::Flavours, 9, object(json!({})))
                .is_none()
        );
    }

    #[test]
    fn test_remove() {
        let mut collections = seeded();
        assert!(collections.remove(ItemType::Flavours, 1));
        assert!(!collections.remove(ItemType::Flavours, 1));
        assert!(collections.get(ItemType::Flavours, 1).is_none());
    }

    #[test]
    fn test_seed_requires_unique_integer_ids() {
        let seed: Seed =
            serde_json::from_value(json!({"orders": [{"status": "paid"}]})).unwrap();
        assert!(matches!(
            Collections::try_from(seed),
            Err(SeedError::MissingId {
                collection: ItemType::Orders
            })
        ));

        let seed: Seed =
            serde_json::from_value(json!({"customers": [{"id": 2}, {"id": 2}]})).unwrap();
        assert!(matches!(
            Collections::try_from(seed),
            Err(SeedError::DuplicateId { id: 2, .. })
        ));
    }
}
