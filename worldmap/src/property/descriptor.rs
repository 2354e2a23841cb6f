use serde::Serialize;

use super::value::ValueKind;

/// One entry of a property list, in host display order.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PropertyDescriptor {
    /// Element count of a record array; the host groups `prefix*` keys under it.
    ArrayCount {
        name: String,
        label: String,
        prefix: String,
    },
    Field {
        name: String,
        value: ValueKind,
    },
    /// Write-only pseudo-property assigning one field on every record.
    BulkSet {
        name: String,
        value: ValueKind,
    },
    /// Derived from other state; reading computes, writing solves.
    Computed {
        name: String,
        value: ValueKind,
    },
}

impl PropertyDescriptor {
    pub fn name(&self) -> &str {
        match self {
            PropertyDescriptor::ArrayCount { name, .. }
            | PropertyDescriptor::Field { name, .. }
            | PropertyDescriptor::BulkSet { name, .. }
            | PropertyDescriptor::Computed { name, .. } => name,
        }
    }
}
