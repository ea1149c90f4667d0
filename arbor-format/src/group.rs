//! Groups: named nodes holding nested groups and datasets

use indexmap::map::Entry;
use indexmap::IndexMap;

use crate::dataset::Dataset;
use crate::error::{ArborError, Result};

/// An entry in a group
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Nested group
    Group(Group),
    /// Stored value
    Dataset(Dataset),
}

impl Node {
    /// Borrow as a group, if this node is one
    pub fn as_group(&self) -> Option<&Group> {
        match self {
            Node::Group(group) => Some(group),
            Node::Dataset(_) => None,
        }
    }

    /// Borrow as a dataset, if this node is one
    pub fn as_dataset(&self) -> Option<&Dataset> {
        match self {
            Node::Group(_) => None,
            Node::Dataset(dataset) => Some(dataset),
        }
    }
}

/// A group of named entries. Entry order is insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Group {
    entries: IndexMap<String, Node>,
}

/// Check that `name` can label an entry inside a group.
pub fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() || name == "." || name.contains('/') {
        return Err(ArborError::InvalidName(name.to_string()));
    }
    Ok(())
}

impl Group {
    /// Create an empty group
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty child group and return it for filling.
    pub fn create_group(&mut self, name: &str) -> Result<&mut Group> {
        match self.vacant(name)? {
            Entry::Vacant(slot) => match slot.insert(Node::Group(Group::new())) {
                Node::Group(group) => Ok(group),
                Node::Dataset(_) => Err(ArborError::Internal(
                    "freshly inserted group is a dataset".to_string(),
                )),
            },
            Entry::Occupied(_) => Err(ArborError::DuplicateName(name.to_string())),
        }
    }

    /// Store a dataset under `name`.
    pub fn create_dataset(&mut self, name: &str, dataset: Dataset) -> Result<()> {
        match self.vacant(name)? {
            Entry::Vacant(slot) => {
                slot.insert(Node::Dataset(dataset));
                Ok(())
            }
            Entry::Occupied(_) => Err(ArborError::DuplicateName(name.to_string())),
        }
    }

    fn vacant(&mut self, name: &str) -> Result<Entry<'_, String, Node>> {
        validate_name(name)?;
        Ok(self.entries.entry(name.to_string()))
    }

    /// Names of the entries in this group
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.keys().map(String::as_str)
    }

    /// Entries in stored order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Node)> + '_ {
        self.entries.iter().map(|(name, node)| (name.as_str(), node))
    }

    /// Consume the group, yielding entries in stored order
    pub fn into_entries(self) -> impl Iterator<Item = (String, Node)> {
        self.entries.into_iter()
    }

    /// Look up an entry
    pub fn get(&self, name: &str) -> Option<&Node> {
        self.entries.get(name)
    }

    /// Look up a child group
    pub fn group(&self, name: &str) -> Option<&Group> {
        self.get(name).and_then(Node::as_group)
    }

    /// Look up a dataset
    pub fn dataset(&self, name: &str) -> Option<&Dataset> {
        self.get(name).and_then(Node::as_dataset)
    }

    /// Number of direct entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the group has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Insert a decoded node without name checks beyond uniqueness.
    pub(crate) fn insert_decoded(&mut self, name: String, node: Node) -> Result<()> {
        match self.entries.entry(name) {
            Entry::Vacant(slot) => {
                slot.insert(node);
                Ok(())
            }
            Entry::Occupied(slot) => Err(ArborError::CorruptNode(format!(
                "duplicate entry {:?}",
                slot.key()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Data;

    fn int(v: i64) -> Dataset {
        Dataset::scalar(Data::Int(vec![v])).unwrap()
    }

    #[test]
    fn test_create_nested_groups_and_datasets() {
        let mut root = Group::new();
        let a = root.create_group("a").unwrap();
        a.create_dataset("b", int(1)).unwrap();
        a.create_group("empty").unwrap();
        root.create_dataset("c", int(2)).unwrap();

        assert_eq!(root.keys().collect::<Vec<_>>(), vec!["a", "c"]);
        let a = root.group("a").unwrap();
        assert_eq!(a.dataset("b"), Some(&int(1)));
        assert!(a.group("empty").unwrap().is_empty());
        assert!(root.group("c").is_none());
        assert!(root.dataset("a").is_none());
    }

    #[test]
    fn test_rejects_invalid_names() {
        let mut root = Group::new();
        for name in ["", ".", "a/b", "/"] {
            assert!(matches!(
                root.create_group(name),
                Err(ArborError::InvalidName(_))
            ));
            assert!(matches!(
                root.create_dataset(name, int(0)),
                Err(ArborError::InvalidName(_))
            ));
        }
        assert!(root.is_empty());
    }

    #[test]
    fn test_rejects_duplicate_names() {
        let mut root = Group::new();
        root.create_group("x").unwrap();
        assert!(matches!(
            root.create_dataset("x", int(0)),
            Err(ArborError::DuplicateName(_))
        ));
        assert!(matches!(
            root.create_group("x"),
            Err(ArborError::DuplicateName(_))
        ));
        assert_eq!(root.len(), 1);
    }
}
