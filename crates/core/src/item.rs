//! Stocked-item identity.

use serde::{Deserialize, Serialize};

use crate::id::ItemId;

/// Kind of stocked item. Closed set; unknown kinds are rejected once at the
/// serde boundary rather than re-validated inside business logic.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Material,
    Hardware,
    Supply,
    Tool,
}

impl ItemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Material => "material",
            ItemKind::Hardware => "hardware",
            ItemKind::Supply => "supply",
            ItemKind::Tool => "tool",
        }
    }
}

impl core::fmt::Display for ItemKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Composite identity of a stocked item: the kind partitions the id space
/// (material ids and tool ids come from different catalogs).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemKey {
    pub kind: ItemKind,
    pub id: ItemId,
}

impl ItemKey {
    pub fn new(kind: ItemKind, id: ItemId) -> Self {
        Self { kind, id }
    }

    pub fn material(id: ItemId) -> Self {
        Self::new(ItemKind::Material, id)
    }

    pub fn hardware(id: ItemId) -> Self {
        Self::new(ItemKind::Hardware, id)
    }

    pub fn supply(id: ItemId) -> Self {
        Self::new(ItemKind::Supply, id)
    }

    pub fn tool(id: ItemId) -> Self {
        Self::new(ItemKind::Tool, id)
    }
}

impl core::fmt::Display for ItemKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}/{}", self.kind, self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_kind_is_rejected_at_the_serde_boundary() {
        let err = serde_json::from_str::<ItemKind>("\"gadget\"").unwrap_err();
        assert!(err.to_string().contains("gadget"));
    }

    #[test]
    fn kind_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&ItemKind::Material).unwrap(), "\"material\"");
    }

    #[test]
    fn key_display_is_kind_slash_id() {
        let id = ItemId::new();
        let key = ItemKey::material(id);
        assert_eq!(key.to_string(), format!("material/{id}"));
    }
}
