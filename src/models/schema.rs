use serde::Serialize;
use serde_json::{Map, Value};

use super::{Game, Match, Player, Record, Team, Tournament};

/// Field names and type descriptors of one record kind, for viewer tools
#[derive(Debug, Serialize)]
pub struct SchemaExport {
    pub name: &'static str,
    pub fields: Map<String, Value>,
}

impl SchemaExport {
    fn of<R: Record>() -> Self {
        let fields = R::FIELDS
            .iter()
            .map(|(name, ty)| (name.to_string(), Value::from(*ty)))
            .collect();

        Self { name: R::KIND, fields }
    }
}

pub fn export_schemas() -> Vec<SchemaExport> {
    vec![
        SchemaExport::of::<Game>(),
        SchemaExport::of::<Player>(),
        SchemaExport::of::<Team>(),
        SchemaExport::of::<Tournament>(),
        SchemaExport::of::<Match>(),
    ]
}
