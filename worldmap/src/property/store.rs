//! Index-addressed record arrays exposed as virtual properties.
//!
//! A `RecordArray` stores each record together with its hit region in one slot,
//! so resizing the records resizes the regions in the same step.

use log::debug;

use super::descriptor::PropertyDescriptor;
use super::key::PropertyKey;
use super::value::{Value, ValueKind};
use crate::error::{PropertyError, Result};
use crate::hit_region::HitRegionHost;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: ValueKind,
}

/// Why a record refused a field write.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldRejection {
    Unknown,
    Type(ValueKind),
    NonFinite,
}

pub trait Record: Default {
    /// Fields in display order.
    const FIELDS: &'static [FieldSpec];
    /// Field assigned by the `<category>_set_all` pseudo-property, if any.
    const BULK_FIELD: Option<FieldSpec> = None;

    fn get(&self, field: &str) -> Option<Value>;
    fn set(&mut self, field: &str, value: &Value) -> std::result::Result<(), FieldRejection>;
}

pub struct Slot<R, H> {
    pub record: R,
    pub region: H,
}

/// What a successful write changed; resizes also change the property list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Change {
    Resized { from: usize, to: usize },
    Fields,
}

pub struct RecordArray<R, H = ()> {
    category: &'static str,
    label: &'static str,
    slots: Vec<Slot<R, H>>,
}

impl<R: Record, H> RecordArray<R, H> {
    pub fn new(category: &'static str, label: &'static str) -> Self {
        RecordArray {
            category,
            label,
            slots: Vec::new(),
        }
    }

    pub fn category(&self) -> &'static str {
        self.category
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&R> {
        self.slots.get(index).map(|s| &s.record)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut R> {
        self.slots.get_mut(index).map(|s| &mut s.record)
    }

    pub fn records(&self) -> impl Iterator<Item = &R> {
        self.slots.iter().map(|s| &s.record)
    }

    pub fn records_mut(&mut self) -> impl Iterator<Item = &mut R> {
        self.slots.iter_mut().map(|s| &mut s.record)
    }

    pub fn slots_mut(&mut self) -> impl Iterator<Item = &mut Slot<R, H>> {
        self.slots.iter_mut()
    }

    pub fn push<Host>(&mut self, record: R, host: &mut Host) -> usize
    where
        Host: HitRegionHost<Region = H>,
    {
        let index = self.slots.len();
        let region = host.create(index);
        self.slots.push(Slot { record, region });
        index
    }

    /// Grow with default records or truncate, creating/disposing regions to match.
    pub fn resize<Host>(&mut self, len: usize, host: &mut Host)
    where
        Host: HitRegionHost<Region = H>,
    {
        let from = self.slots.len();
        if len < from {
            for slot in self.slots.drain(len..) {
                host.dispose(slot.region);
            }
        } else {
            for index in from..len {
                let region = host.create(index);
                self.slots.push(Slot {
                    record: R::default(),
                    region,
                });
            }
        }
        debug!("{}: resized {} -> {}", self.category, from, len);
    }

    /// Remove one slot, disposing its region and re-indexing the ones after it.
    pub fn remove<Host>(&mut self, index: usize, host: &mut Host) -> Option<R>
    where
        Host: HitRegionHost<Region = H>,
    {
        if index >= self.slots.len() {
            return None;
        }
        let slot = self.slots.remove(index);
        host.dispose(slot.region);
        for (i, s) in self.slots.iter_mut().enumerate().skip(index) {
            host.reindex(&mut s.region, i);
        }
        Some(slot.record)
    }

    /// Keep only records matching `keep`; used for connections, which own no regions.
    pub fn retain<Host>(&mut self, mut keep: impl FnMut(&R) -> bool, host: &mut Host)
    where
        Host: HitRegionHost<Region = H>,
    {
        let mut i = 0;
        while i < self.slots.len() {
            if keep(&self.slots[i].record) {
                i += 1;
            } else {
                let _ = self.remove(i, host);
            }
        }
    }

    pub fn count_key(&self) -> String {
        PropertyKey::Count(self.category).to_string()
    }

    pub fn count_descriptor(&self) -> PropertyDescriptor {
        PropertyDescriptor::ArrayCount {
            name: self.count_key(),
            label: self.label.to_string(),
            prefix: format!("{}_", self.category),
        }
    }

    /// Per-index field descriptors, skipping fields `visible` rejects.
    pub fn field_descriptors(&self, visible: impl Fn(&FieldSpec) -> bool) -> Vec<PropertyDescriptor> {
        let fields: Vec<&FieldSpec> = R::FIELDS.iter().filter(|f| visible(f)).collect();
        let mut out = Vec::with_capacity(self.len() * fields.len());
        for index in 0..self.len() {
            for f in &fields {
                out.push(PropertyDescriptor::Field {
                    name: PropertyKey::Field {
                        category: self.category,
                        index,
                        field: f.name,
                    }
                    .to_string(),
                    value: f.kind,
                });
            }
        }
        out
    }

    pub fn bulk_descriptor(&self) -> Option<PropertyDescriptor> {
        R::BULK_FIELD.map(|f| PropertyDescriptor::BulkSet {
            name: PropertyKey::SetAll(self.category).to_string(),
            value: f.kind,
        })
    }

    /// Read a key addressed to this array. `None` for unknown fields, out-of-range
    /// indices and the write-only bulk key.
    pub fn get_property(&self, key: &PropertyKey<'_>) -> Option<Value> {
        match *key {
            PropertyKey::Count(c) if c == self.category => Some(Value::from(self.len())),
            PropertyKey::Field { category, index, field } if category == self.category => {
                self.get(index)?.get(field)
            }
            _ => None,
        }
    }

    /// Apply a write addressed to this array.
    pub fn set_property<Host>(
        &mut self,
        key: &PropertyKey<'_>,
        value: &Value,
        host: &mut Host,
        max_records: usize,
    ) -> Result<Change>
    where
        Host: HitRegionHost<Region = H>,
    {
        match *key {
            PropertyKey::Count(c) if c == self.category => {
                let n = value
                    .as_int()
                    .and_then(|n| u64::try_from(n).ok())
                    .ok_or_else(|| PropertyError::TypeMismatch {
                        key: key.to_string(),
                        expected: ValueKind::Int,
                    })?;
                let requested = usize::try_from(n)
                    .ok()
                    .filter(|r| *r <= max_records)
                    .ok_or_else(|| PropertyError::LimitExceeded {
                        key: key.to_string(),
                        requested: n,
                        max: max_records,
                    })?;
                let from = self.len();
                self.resize(requested, host);
                Ok(Change::Resized { from, to: requested })
            }
            PropertyKey::SetAll(c) if c == self.category => {
                let field = R::BULK_FIELD.ok_or_else(|| PropertyError::UnknownKey(key.to_string()))?;
                // Validate once so a bad value leaves every record untouched.
                R::default()
                    .set(field.name, value)
                    .map_err(|r| Self::rejection_for(key, r))?;
                for record in self.records_mut() {
                    let _ = record.set(field.name, value);
                }
                Ok(Change::Fields)
            }
            PropertyKey::Field { category, index, field } if category == self.category => {
                if !R::FIELDS.iter().any(|f| f.name == field) {
                    return Err(PropertyError::UnknownKey(key.to_string()));
                }
                let count = self.len();
                let record = self.get_mut(index).ok_or_else(|| PropertyError::IndexOutOfRange {
                    category: category.to_string(),
                    index,
                    count,
                })?;
                record.set(field, value).map_err(|r| Self::rejection_for(key, r))?;
                Ok(Change::Fields)
            }
            _ => Err(PropertyError::UnknownKey(key.to_string())),
        }
    }

    fn rejection_for(key: &PropertyKey<'_>, r: FieldRejection) -> PropertyError {
        match r {
            FieldRejection::Unknown => PropertyError::UnknownKey(key.to_string()),
            FieldRejection::Type(expected) => PropertyError::TypeMismatch {
                key: key.to_string(),
                expected,
            },
            FieldRejection::NonFinite => PropertyError::NonFinite(key.to_string()),
        }
    }
}
