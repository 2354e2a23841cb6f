//! Typed parsing of virtual property keys.
//!
//! Keys take three shapes: `<category>_count`, `<category>_set_all` and
//! `<category>_<index>/<field>`.

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PropertyKey<'a> {
    Count(&'a str),
    SetAll(&'a str),
    Field {
        category: &'a str,
        index: usize,
        field: &'a str,
    },
}

impl<'a> PropertyKey<'a> {
    /// `None` for anything that is not one of the three key shapes.
    pub fn parse(key: &'a str) -> Option<PropertyKey<'a>> {
        if let Some((head, field)) = key.split_once('/') {
            let (category, index) = head.rsplit_once('_')?;
            if category.is_empty() || field.is_empty() || field.contains('/') {
                return None;
            }
            if index.is_empty() || !index.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            let index = index.parse().ok()?;
            return Some(PropertyKey::Field { category, index, field });
        }
        if let Some(category) = key.strip_suffix("_count") {
            return (!category.is_empty()).then_some(PropertyKey::Count(category));
        }
        if let Some(category) = key.strip_suffix("_set_all") {
            return (!category.is_empty()).then_some(PropertyKey::SetAll(category));
        }
        None
    }

    pub fn category(&self) -> &'a str {
        match *self {
            PropertyKey::Count(c) | PropertyKey::SetAll(c) => c,
            PropertyKey::Field { category, .. } => category,
        }
    }
}

impl fmt::Display for PropertyKey<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyKey::Count(c) => write!(f, "{}_count", c),
            PropertyKey::SetAll(c) => write!(f, "{}_set_all", c),
            PropertyKey::Field { category, index, field } => {
                write!(f, "{}_{}/{}", category, index, field)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_the_three_shapes() {
        assert_eq!(PropertyKey::parse("node_count"), Some(PropertyKey::Count("node")));
        assert_eq!(
            PropertyKey::parse("node_set_all"),
            Some(PropertyKey::SetAll("node"))
        );
        assert_eq!(
            PropertyKey::parse("connection_12/endpoints"),
            Some(PropertyKey::Field {
                category: "connection",
                index: 12,
                field: "endpoints"
            })
        );
    }

    #[test]
    fn malformed_keys_are_rejected() {
        for key in [
            "",
            "node",
            "_count",
            "node_/data",
            "node_x/data",
            "node_+1/data",
            "node_1/",
            "/data",
            "node_1/data/extra",
            "connection_mode",
            "start",
        ] {
            assert_eq!(PropertyKey::parse(key), None, "key {:?}", key);
        }
    }

    #[test]
    fn display_round_trips() {
        for key in ["node_count", "node_set_all", "node_3/position"] {
            assert_eq!(PropertyKey::parse(key).unwrap().to_string(), key);
        }
    }
}
