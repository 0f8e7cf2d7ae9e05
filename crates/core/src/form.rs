//! Form fields: raw text in, typed drafts out.
//!
//! Every submitted value is trimmed. `id` and `customerId` are parsed as
//! integers, everything else stays text for the rules to judge. A form with an
//! `id` is an update, a form without one is an add.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::types::{
    CustomerDraft, CustomerId, Draft, FlavourDraft, FlavourId, ItemType, Operation, OrderDraft,
    OrderId, Record,
};
use crate::validation::{Verdict, Violation};

const CUSTOMER_FIELDS: &[&str] = &["name", "email"];
const FLAVOUR_FIELDS: &[&str] = &["name", "price"];
const ORDER_FIELDS: &[&str] = &["customerId", "date", "status", "orderDescription"];

/// Fields an order update may change; the rest are read-only once placed.
const ORDER_EDITABLE_FIELDS: &[&str] = &["status"];

/// Form field names of an item type, in display order.
#[must_use]
pub const fn field_names(item_type: ItemType) -> &'static [&'static str] {
    match item_type {
        ItemType::Customers => CUSTOMER_FIELDS,
        ItemType::Flavours => FLAVOUR_FIELDS,
        ItemType::Orders => ORDER_FIELDS,
    }
}

/// Problems with the shape of a form, before any business rule runs.
///
/// The messages are user-facing and end up in a [`Verdict`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Incorrect item type")]
    UnknownItemType(String),

    #[error("Invalid record id: {0}")]
    InvalidId(String),

    #[error("{field} is not a field of {item_type}.")]
    UnknownField { item_type: ItemType, field: String },

    #[error("Only the status of an order can be changed.")]
    ReadOnlyField(String),
}

impl From<FormError> for Verdict {
    fn from(err: FormError) -> Self {
        match err {
            FormError::UnknownItemType(_) => Self::incorrect_item_type(),
            other => Self::rejected(Violation::new(other.to_string())),
        }
    }
}

/// Raw form values keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields(BTreeMap<String, String>);

impl FormFields {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Prefilled fields of an existing record, including its id.
    #[must_use]
    pub fn from_record(record: &Record) -> Self {
        let mut fields: Self = record
            .fields()
            .into_iter()
            .map(|(name, value)| (name.to_owned(), value))
            .collect();
        fields.insert("id", record.id().to_string());
        fields
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    /// The trimmed value of a field, if present.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(|v| v.trim())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    fn text(&self, name: &str) -> String {
        self.get(name).unwrap_or_default().to_owned()
    }

    fn check_names(&self, item_type: ItemType) -> Result<(), FormError> {
        let allowed = field_names(item_type);
        match self
            .0
            .keys()
            .find(|name| name.as_str() != "id" && !allowed.contains(&name.as_str()))
        {
            Some(field) => Err(FormError::UnknownField {
                item_type,
                field: field.clone(),
            }),
            None => Ok(()),
        }
    }
}

impl FromIterator<(String, String)> for FormFields {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// A parsed form: what to do and with which data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub operation: Operation,
    pub draft: Draft,
}

/// Parse raw form fields for an item type into a submission.
///
/// # Errors
///
/// Returns a [`FormError`] if the item type is unknown, a field does not
/// belong to the type, or the `id` is not an integer.
pub fn parse_submission(item_type: &str, fields: &FormFields) -> Result<Submission, FormError> {
    let item_type: ItemType = item_type
        .parse()
        .map_err(|_| FormError::UnknownItemType(item_type.to_owned()))?;
    fields.check_names(item_type)?;

    let id = match fields.get("id") {
        None | Some("") => None,
        Some(raw) => Some(
            raw.parse::<i32>()
                .map_err(|_| FormError::InvalidId(raw.to_owned()))?,
        ),
    };
    let operation = if id.is_some() {
        Operation::Update
    } else {
        Operation::Add
    };

    let draft = match item_type {
        ItemType::Customers => Draft::Customer(CustomerDraft {
            id: id.map(CustomerId::new),
            name: fields.text("name"),
            email: fields.text("email"),
        }),
        ItemType::Flavours => Draft::Flavour(FlavourDraft {
            id: id.map(FlavourId::new),
            name: fields.text("name"),
            price: fields.text("price"),
        }),
        ItemType::Orders => Draft::Order(OrderDraft {
            id: id.map(OrderId::new),
            customer_id: fields
                .get("customerId")
                .and_then(|raw| raw.parse::<i32>().ok())
                .map(CustomerId::new),
            date: fields.text("date"),
            status: fields.text("status"),
            order_description: fields.text("orderDescription"),
        }),
    };

    Ok(Submission { operation, draft })
}

/// Apply changes to the prefilled fields of an existing record.
///
/// Orders only allow their status to change once placed; other order fields
/// are read-only.
///
/// # Errors
///
/// Returns a [`FormError`] if a change names an unknown field or touches a
/// read-only field.
pub fn edit_fields(record: &Record, changes: &FormFields) -> Result<FormFields, FormError> {
    let item_type = record.item_type();
    changes.check_names(item_type)?;

    let mut fields = FormFields::from_record(record);
    for (name, value) in changes.iter() {
        if name == "id" {
            continue;
        }
        let read_only =
            item_type == ItemType::Orders && !ORDER_EDITABLE_FIELDS.contains(&name);
        if read_only && fields.get(name) != Some(value.trim()) {
            return Err(FormError::ReadOnlyField(name.to_owned()));
        }
        fields.insert(name, value);
    }
    Ok(fields)
}
