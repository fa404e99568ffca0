//! `include` / `select` evaluation.

use serde_json::Value;

use wellness_core::types::{
    Cardinality, Document, EntityDescriptor, Projection, ProjectionItem, RelationDef,
};

use super::matcher::{Tables, related_rows};

/// Shape `row` according to `projection`. Without a projection the row is
/// returned with its scalar fields only.
pub(crate) fn project(
    tables: &Tables,
    entity: &'static EntityDescriptor,
    row: &Document,
    projection: Option<&Projection>,
) -> Document {
    match projection {
        None => row.clone(),
        Some(Projection::Include(items)) => {
            let mut out = row.clone();
            for item in items {
                if let Some(def) = entity.relation(&item.name) {
                    out.insert(item.name.clone(), load_relation(tables, row, def, item));
                }
            }
            out
        }
        Some(Projection::Select(items)) => {
            let mut out = Document::new();
            for item in items {
                match entity.relation(&item.name) {
                    Some(def) => {
                        out.insert(item.name.clone(), load_relation(tables, row, def, item));
                    }
                    None => {
                        let value = row.get(&item.name).cloned().unwrap_or(Value::Null);
                        out.insert(item.name.clone(), value);
                    }
                }
            }
            out
        }
    }
}

/// Related rows are loaded as stored; the soft-delete default applies to
/// the queried entity only.
fn load_relation(
    tables: &Tables,
    row: &Document,
    def: &RelationDef,
    item: &ProjectionItem,
) -> Value {
    let nested = item.nested.as_deref();
    let mut related = related_rows(tables, row, def)
        .into_iter()
        .map(|r| Value::Object(project(tables, def.target, r, nested)));
    match def.cardinality {
        Cardinality::One => related.next().unwrap_or(Value::Null),
        Cardinality::Many => Value::Array(related.collect()),
    }
}
