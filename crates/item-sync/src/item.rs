//! Item Entity
//!
//! The server-owned item plus the client-only drafts used while composing or editing one.

use std::fmt;

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};

/// Server-assigned item identifier (opaque, never invented client-side)
///
/// Decodes from a JSON string or number; numbers keep their textual form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ItemId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

struct ItemIdVisitor;

impl Visitor<'_> for ItemIdVisitor {
    type Value = ItemId;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a string or numeric item id")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<ItemId, E> {
        Ok(ItemId::new(v))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<ItemId, E> {
        Ok(ItemId(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<ItemId, E> {
        Ok(ItemId(v.to_string()))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<ItemId, E> {
        Ok(ItemId(v.to_string()))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<ItemId, E> {
        Ok(ItemId(v.to_string()))
    }
}

impl<'de> Deserialize<'de> for ItemId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ItemIdVisitor)
    }
}

/// An item as returned by the service
///
/// The backend keys items by `_id`; plain `id` is accepted too, and `_id` wins when
/// both are present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "WireItem")]
pub struct Item {
    #[serde(rename = "_id")]
    pub id: ItemId,
    pub name: String,
    pub description: String,
}

/// Decoding shape: either id key, extra keys ignored
#[derive(Deserialize)]
struct WireItem {
    #[serde(rename = "_id", default)]
    underscore_id: Option<ItemId>,
    #[serde(default)]
    id: Option<ItemId>,
    name: String,
    description: String,
}

impl TryFrom<WireItem> for Item {
    type Error = &'static str;

    fn try_from(wire: WireItem) -> Result<Self, Self::Error> {
        let id = wire
            .underscore_id
            .or(wire.id)
            .ok_or("missing field `_id` (or `id`)")?;
        Ok(Item {
            id,
            name: wire.name,
            description: wire.description,
        })
    }
}

impl Item {
    pub fn new(id: impl Into<ItemId>, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
        }
    }
}

/// Request body for create and update
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemFields {
    pub name: String,
    pub description: String,
}

impl ItemFields {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }

    /// Both fields must be non-empty.
    pub fn is_complete(&self) -> bool {
        !self.name.is_empty() && !self.description.is_empty()
    }
}

/// Staging record for the "add new item" form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewDraft {
    pub name: String,
    pub description: String,
}

impl NewDraft {
    pub fn fields(&self) -> ItemFields {
        ItemFields::new(self.name.clone(), self.description.clone())
    }

    pub fn clear(&mut self) {
        self.name.clear();
        self.description.clear();
    }
}

/// Edit-mode state: at most one item is under edit at a time
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EditSession {
    /// No edit target; the form composes a new item
    #[default]
    Idle,
    /// Editing an existing item (draft copy of its fields)
    Editing {
        id: ItemId,
        name: String,
        description: String,
    },
}

impl EditSession {
    /// Start editing from the item's current fields
    pub fn of(item: &Item) -> Self {
        EditSession::Editing {
            id: item.id.clone(),
            name: item.name.clone(),
            description: item.description.clone(),
        }
    }

    pub fn is_editing(&self) -> bool {
        matches!(self, EditSession::Editing { .. })
    }

    /// Target id, if editing
    pub fn target(&self) -> Option<&ItemId> {
        match self {
            EditSession::Idle => None,
            EditSession::Editing { id, .. } => Some(id),
        }
    }

    /// Draft fields, if editing
    pub fn fields(&self) -> Option<ItemFields> {
        match self {
            EditSession::Idle => None,
            EditSession::Editing { name, description, .. } => {
                Some(ItemFields::new(name.clone(), description.clone()))
            }
        }
    }
}
