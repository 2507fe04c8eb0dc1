//! Item value - objects lying in rooms or carried in inventories
//!
//! Items are plain values, not referenced entities. They live inside a room's
//! item list or a player's inventory and move between the two by value.
//! Lists are ordered and never deduplicated: lookups take the first item whose
//! name matches, ignoring case.

use serde::{Deserialize, Serialize};

use super::names_match;

/// Special effect an item has when used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemEffect {
    Light,
    /// Unknown effect for forward compatibility
    #[serde(other)]
    Unknown,
}

/// An object that can lie in a room or be carried.
///
/// Any combination of field values is valid, so the fields are public.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub effect: Option<ItemEffect>,
    /// Name of the item this one combines with
    #[serde(default)]
    pub combine_item_name: Option<String>,
    /// Name of the item produced by using or combining this one
    #[serde(default)]
    pub replace_with_after_use: Option<String>,
}

impl Item {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            effect: None,
            combine_item_name: None,
            replace_with_after_use: None,
        }
    }

    /// Case-insensitive exact name match.
    pub fn is_named(&self, name: &str) -> bool {
        names_match(&self.name, name)
    }
}

/// First item in `items` called `name`.
pub fn find_named<'a>(items: &'a [Item], name: &str) -> Option<&'a Item> {
    items.iter().find(|item| item.is_named(name))
}

/// Removes and returns the first item in `items` called `name`.
///
/// The rest of the list keeps its order.
pub fn take_named(items: &mut Vec<Item>, name: &str) -> Option<Item> {
    let index = items.iter().position(|item| item.is_named(name))?;
    Some(items.remove(index))
}
