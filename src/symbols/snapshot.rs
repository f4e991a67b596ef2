//! Immutable point-in-time symbol mapping

use std::collections::HashMap;
use std::fmt;
use std::time::Instant;

use serde::{Deserialize, Serialize};

/// Asset class an identifier belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetClass {
    /// Perpetual futures
    Perp,
    /// Spot pairs
    Spot,
}

impl fmt::Display for AssetClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetClass::Perp => write!(f, "perp"),
            AssetClass::Spot => write!(f, "spot"),
        }
    }
}

/// Conversion direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Exchange-internal identifier to display symbol (read path)
    ToDisplay,
    /// Display symbol to exchange-internal identifier (request path)
    ToInternal,
}

/// One tradeable asset in the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetSymbolEntry {
    pub internal_id: String,
    pub display_name: String,
    pub class: AssetClass,
}

impl AssetSymbolEntry {
    pub fn new(
        internal_id: impl Into<String>,
        display_name: impl Into<String>,
        class: AssetClass,
    ) -> Self {
        Self {
            internal_id: internal_id.into(),
            display_name: display_name.into(),
            class,
        }
    }

    pub fn perp(internal_id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self::new(internal_id, display_name, AssetClass::Perp)
    }

    pub fn spot(internal_id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self::new(internal_id, display_name, AssetClass::Spot)
    }
}

/// Forward and reverse tables for a single asset class
#[derive(Debug, Clone, Default)]
struct SymbolTable {
    forward: HashMap<String, String>,
    reverse: HashMap<String, String>,
    /// Display names in catalog order
    order: Vec<String>,
}

impl SymbolTable {
    fn insert(&mut self, class: AssetClass, internal_id: String, display_name: String) {
        if let Some(previous) = self.forward.get(&internal_id) {
            tracing::warn!(
                %class,
                internal_id = %internal_id,
                previous = %previous,
                replacement = %display_name,
                "duplicate internal id in asset catalog"
            );
            let previous = previous.clone();
            self.reverse.remove(&previous);
            self.order.retain(|name| name != &previous);
        }
        if let Some(previous) = self.reverse.get(&display_name) {
            tracing::warn!(
                %class,
                display_name = %display_name,
                previous = %previous,
                replacement = %internal_id,
                "duplicate display name in asset catalog"
            );
            let previous = previous.clone();
            self.forward.remove(&previous);
            self.order.retain(|name| name != &display_name);
        }
        self.order.push(display_name.clone());
        self.reverse.insert(display_name.clone(), internal_id.clone());
        self.forward.insert(internal_id, display_name);
    }

    fn get(&self, id: &str, direction: Direction) -> Option<&str> {
        let table = match direction {
            Direction::ToDisplay => &self.forward,
            Direction::ToInternal => &self.reverse,
        };
        table.get(id).map(String::as_str)
    }

    fn len(&self) -> usize {
        self.forward.len()
    }
}

/// Immutable bidirectional mapping between internal identifiers and display symbols.
///
/// A snapshot is never mutated after construction. The registry replaces it
/// wholesale, so a reference captured at the start of a conversion stays
/// consistent for the whole traversal.
#[derive(Debug, Clone)]
pub struct SymbolSnapshot {
    perp: SymbolTable,
    spot: SymbolTable,
    version: u64,
    loaded_at: Instant,
}

impl SymbolSnapshot {
    /// The empty snapshot a registry starts with
    pub fn empty() -> Self {
        Self {
            perp: SymbolTable::default(),
            spot: SymbolTable::default(),
            version: 0,
            loaded_at: Instant::now(),
        }
    }

    /// Build a snapshot from catalog entries.
    ///
    /// Within a class, a repeated internal id or display name replaces the
    /// earlier entry.
    pub fn build(entries: impl IntoIterator<Item = AssetSymbolEntry>, version: u64) -> Self {
        let mut snapshot = Self {
            version,
            ..Self::empty()
        };
        for entry in entries {
            let table = match entry.class {
                AssetClass::Perp => &mut snapshot.perp,
                AssetClass::Spot => &mut snapshot.spot,
            };
            table.insert(entry.class, entry.internal_id, entry.display_name);
        }
        snapshot
    }

    /// Look up `id`, trying perpetuals first and then spot.
    ///
    /// Returns `id` itself when neither class knows it.
    pub fn lookup<'a>(&'a self, id: &'a str, direction: Direction) -> &'a str {
        self.find(id, direction).unwrap_or(id)
    }

    /// Strict lookup across both classes, perpetuals first
    pub fn find(&self, id: &str, direction: Direction) -> Option<&str> {
        self.perp
            .get(id, direction)
            .or_else(|| self.spot.get(id, direction))
    }

    /// Look up `id` within a single asset class, returning `id` on a miss
    pub fn lookup_in<'a>(&'a self, class: AssetClass, id: &'a str, direction: Direction) -> &'a str {
        self.get(class, id, direction).unwrap_or(id)
    }

    /// Strict lookup within one class
    pub fn get(&self, class: AssetClass, id: &str, direction: Direction) -> Option<&str> {
        self.table(class).get(id, direction)
    }

    /// Whether either class maps `id` in the given direction
    pub fn contains(&self, id: &str, direction: Direction) -> bool {
        self.find(id, direction).is_some()
    }

    /// Display symbols of one class, in catalog order
    pub fn display_symbols(&self, class: AssetClass) -> &[String] {
        &self.table(class).order
    }

    /// Number of assets in one class
    pub fn len(&self, class: AssetClass) -> usize {
        self.table(class).len()
    }

    /// Whether the snapshot holds no assets at all
    pub fn is_empty(&self) -> bool {
        self.perp.len() == 0 && self.spot.len() == 0
    }

    /// Registry-assigned version; `0` is the initial empty snapshot
    pub fn version(&self) -> u64 {
        self.version
    }

    /// When this snapshot was built
    pub fn loaded_at(&self) -> Instant {
        self.loaded_at
    }

    fn table(&self, class: AssetClass) -> &SymbolTable {
        match class {
            AssetClass::Perp => &self.perp,
            AssetClass::Spot => &self.spot,
        }
    }
}

impl Default for SymbolSnapshot {
    fn default() -> Self {
        Self::empty()
    }
}
