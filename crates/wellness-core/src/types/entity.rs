//! Static entity descriptors.
//!
//! An [`EntityDescriptor`] is the small amount of metadata the generic
//! repository needs about one entity: its table name, its fields and
//! relations, how it is deleted, and what it eager-loads by default.

use crate::types::projection::{Projection, ProjectionItem};

/// Name of the deletion-timestamp field on soft-delete entities.
pub const SOFT_DELETE_MARKER: &str = "deletedAt";

/// How an entity's `delete` behaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeletePolicy {
    /// `delete` sets the marker field to the current time and default reads
    /// exclude rows where the marker is set.
    Soft {
        /// The deletion-timestamp field.
        marker: &'static str,
    },
    /// `delete` removes the row.
    Hard,
}

impl DeletePolicy {
    /// Soft delete on the standard `deletedAt` field.
    pub const SOFT: Self = Self::Soft {
        marker: SOFT_DELETE_MARKER,
    };

    /// Return the marker field for soft-delete entities.
    pub fn marker(&self) -> Option<&'static str> {
        match self {
            Self::Soft { marker } => Some(marker),
            Self::Hard => None,
        }
    }
}

/// Whether a relation points at one row or many.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    /// A to-one relation (the related row or nothing).
    One,
    /// A to-many relation.
    Many,
}

/// A named relation from one entity to another.
#[derive(Debug)]
pub struct RelationDef {
    /// Relation name as used in `include`, `select` and `where`.
    pub name: &'static str,
    /// The related entity.
    pub target: &'static EntityDescriptor,
    /// One or many related rows.
    pub cardinality: Cardinality,
    /// Field on this entity whose value is matched.
    pub local_key: &'static str,
    /// Field on the target entity matched against `local_key`.
    pub foreign_key: &'static str,
}

/// Static description of one entity.
#[derive(Debug)]
pub struct EntityDescriptor {
    /// Table / model name.
    pub name: &'static str,
    /// Scalar fields, in declaration order.
    pub fields: &'static [&'static str],
    /// Relations to other entities.
    pub relations: &'static [RelationDef],
    /// Field holding the URL slug, if the entity has one.
    pub slug_field: Option<&'static str>,
    /// Fields with a unique constraint (besides `id`).
    pub unique: &'static [&'static str],
    /// Delete behavior.
    pub delete_policy: DeletePolicy,
    /// Relations eager-loaded when a query names neither `include` nor `select`.
    pub default_include: &'static [&'static str],
}

impl EntityDescriptor {
    /// Whether `name` is a scalar field of this entity.
    pub fn has_field(&self, name: &str) -> bool {
        self.fields.contains(&name)
    }

    /// Look up a relation by name.
    pub fn relation(&self, name: &str) -> Option<&RelationDef> {
        self.relations.iter().find(|r| r.name == name)
    }

    /// Soft-delete marker field, if any.
    pub fn marker(&self) -> Option<&'static str> {
        self.delete_policy.marker()
    }

    /// The projection applied when the caller specifies none.
    pub fn default_projection(&self) -> Option<Projection> {
        if self.default_include.is_empty() {
            return None;
        }
        Some(Projection::Include(
            self.default_include
                .iter()
                .map(|name| ProjectionItem::new(*name))
                .collect(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static PARENT: EntityDescriptor = EntityDescriptor {
        name: "parent",
        fields: &["id", "name", "deletedAt"],
        relations: &[RelationDef {
            name: "children",
            target: &CHILD,
            cardinality: Cardinality::Many,
            local_key: "id",
            foreign_key: "parentId",
        }],
        slug_field: None,
        unique: &[],
        delete_policy: DeletePolicy::SOFT,
        default_include: &["children"],
    };

    static CHILD: EntityDescriptor = EntityDescriptor {
        name: "child",
        fields: &["id", "parentId"],
        relations: &[RelationDef {
            name: "parent",
            target: &PARENT,
            cardinality: Cardinality::One,
            local_key: "parentId",
            foreign_key: "id",
        }],
        slug_field: None,
        unique: &[],
        delete_policy: DeletePolicy::Hard,
        default_include: &[],
    };

    #[test]
    fn test_lookup() {
        assert!(PARENT.has_field("name"));
        assert!(!PARENT.has_field("children"));
        assert_eq!(PARENT.relation("children").map(|r| r.target.name), Some("child"));
        assert_eq!(CHILD.relation("parent").map(|r| r.target.name), Some("parent"));
    }

    #[test]
    fn test_markers() {
        assert_eq!(PARENT.marker(), Some("deletedAt"));
        assert_eq!(CHILD.marker(), None);
    }

    #[test]
    fn test_default_projection() {
        assert!(CHILD.default_projection().is_none());
        match PARENT.default_projection() {
            Some(Projection::Include(items)) => assert_eq!(items[0].name, "children"),
            other => panic!("unexpected {other:?}"),
        }
    }
}
