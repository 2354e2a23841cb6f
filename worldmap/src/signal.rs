//! Notifications the models push to the host.
//!
//! Signals queue synchronously while an operation runs and are drained by the
//! host afterwards. Redraw and property-list-changed are coalesced: at most one
//! of each is pending at a time.

use serde::Serialize;

use crate::model::{NodeTypeRef, RawInput};

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Signal {
    Redraw,
    PropertyListChanged,
    NodeInput {
        event: RawInput,
        index: usize,
        node_type: NodeTypeRef,
    },
}

#[derive(Debug, Default)]
pub struct Signals {
    pending: Vec<Signal>,
}

impl Signals {
    pub fn redraw(&mut self) {
        if !self.pending.contains(&Signal::Redraw) {
            self.pending.push(Signal::Redraw);
        }
    }

    pub fn property_list_changed(&mut self) {
        if !self.pending.contains(&Signal::PropertyListChanged) {
            self.pending.push(Signal::PropertyListChanged);
        }
    }

    pub fn node_input(&mut self, event: RawInput, index: usize, node_type: NodeTypeRef) {
        self.pending.push(Signal::NodeInput {
            event,
            index,
            node_type,
        });
    }

    pub fn pending(&self) -> &[Signal] {
        &self.pending
    }

    pub fn take(&mut self) -> Vec<Signal> {
        std::mem::take(&mut self.pending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{NodeType, Vec2};

    #[test]
    fn coalesces_redraws_but_keeps_inputs() {
        let mut s = Signals::default();
        s.redraw();
        s.redraw();
        s.property_list_changed();
        let t = NodeType::new("town", Vec2::new(8.0, 8.0));
        s.node_input(RawInput::default(), 0, t.clone());
        s.node_input(RawInput::default(), 0, t);
        s.redraw();
        assert_eq!(s.pending().len(), 4);
        assert_eq!(s.take()[0], Signal::Redraw);
        assert!(s.pending().is_empty());
    }
}
