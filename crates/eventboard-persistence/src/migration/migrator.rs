use crate::traits::FormatVersion;
use eventboard_core::{BoardError, BoardResult};
use serde_json::{Map, Value};

/// Keys of a V1 board object that are not columns.
const V1_RESERVED_KEYS: [&str; 3] = ["title", "columnColors", "history"];

/// Orchestrates migrations between format versions
pub struct Migrator;

impl Migrator {
    /// Detect the version of a parsed file.
    ///
    /// V2 files are an object with a numeric `version`; V1 files are a bare
    /// array of boards. Anything else is not a board file.
    pub fn detect_version(value: &Value) -> BoardResult<FormatVersion> {
        match value {
            Value::Array(_) => Ok(FormatVersion::V1),
            Value::Object(map) => {
                let version = map
                    .get("version")
                    .and_then(Value::as_u64)
                    .ok_or_else(|| BoardError::MalformedData("missing format version".to_string()))?;
                u32::try_from(version)
                    .ok()
                    .and_then(FormatVersion::from_u32)
                    .ok_or_else(|| {
                        BoardError::MalformedData(format!("unsupported format version {}", version))
                    })
            }
            _ => Err(BoardError::MalformedData(
                "expected a board array or a versioned envelope".to_string(),
            )),
        }
    }

    /// Migrate a board array from one version to another
    pub fn migrate(from: FormatVersion, to: FormatVersion, boards: Value) -> BoardResult<Value> {
        if from == to {
            return Ok(boards);
        }

        match (from, to) {
            (FormatVersion::V1, FormatVersion::V2) => Self::migrate_v1_to_v2(boards),
            _ => Err(BoardError::Serialization(format!(
                "Unsupported migration: {:?} -> {:?}",
                from, to
            ))),
        }
    }

    /// Move every non-reserved key of each board into an explicit `columns`
    /// array, keeping the original key order as the column order. Entries
    /// that are not objects are dropped, as are null tasks.
    fn migrate_v1_to_v2(boards: Value) -> BoardResult<Value> {
        let Value::Array(boards) = boards else {
            return Err(BoardError::MalformedData(
                "V1 data must be an array of boards".to_string(),
            ));
        };

        let total = boards.len();
        let migrated: Vec<Value> = boards
            .into_iter()
            .filter_map(|board| match board {
                Value::Object(map) => Some(Value::Object(Self::migrate_board(map))),
                other => {
                    tracing::warn!("Skipping non-object board entry: {}", other);
                    None
                }
            })
            .collect();

        tracing::info!(
            "Migrated {} of {} boards from V1 to V2",
            migrated.len(),
            total
        );
        Ok(Value::Array(migrated))
    }

    fn migrate_board(map: Map<String, Value>) -> Map<String, Value> {
        let mut board = Map::new();
        let mut columns = Vec::new();

        for (key, value) in map {
            if V1_RESERVED_KEYS.contains(&key.as_str()) {
                board.insert(key, value);
                continue;
            }
            let tasks = match value {
                Value::Array(tasks) => tasks,
                Value::Null => Vec::new(),
                other => {
                    tracing::warn!("Skipping key '{}' holding {}", key, other);
                    continue;
                }
            };
            let tasks: Vec<Value> = tasks.into_iter().filter(Value::is_object).collect();
            let mut column = Map::new();
            column.insert("title".to_string(), Value::String(key));
            column.insert("tasks".to_string(), Value::Array(tasks));
            columns.push(Value::Object(column));
        }

        board.insert("columns".to_string(), Value::Array(columns));
        board
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_detect_v1_format() {
        let v1_data = json!([{ "title": "Trip", "To do": [] }]);
        assert_eq!(Migrator::detect_version(&v1_data).unwrap(), FormatVersion::V1);
    }

    #[test]
    fn test_detect_v2_format() {
        let v2_data = json!({
            "version": 2,
            "metadata": {},
            "data": []
        });
        assert_eq!(Migrator::detect_version(&v2_data).unwrap(), FormatVersion::V2);
    }

    #[test]
    fn test_detect_rejects_unknown_shapes() {
        assert!(Migrator::detect_version(&json!({ "version": 9 })).is_err());
        assert!(Migrator::detect_version(&json!({ "boards": [] })).is_err());
        assert!(Migrator::detect_version(&json!("boards")).is_err());
    }

    #[test]
    fn test_migrate_v1_to_v2() {
        let v1_data = json!([{
            "title": "Trip",
            "To do": [{ "id": "1", "name": "Pack", "details": "Bags", "priority": "high", "dueDate": null }, null],
            "In progress": [],
            "Completed": [],
            "Souvenirs": [],
            "columnColors": { "To do": "#faad14" },
            "history": []
        }]);

        let migrated = Migrator::migrate(FormatVersion::V1, FormatVersion::V2, v1_data).unwrap();
        let board = &migrated[0];

        assert_eq!(board["title"], "Trip");
        assert_eq!(board["columnColors"]["To do"], "#faad14");
        let titles: Vec<&str> = board["columns"]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["title"].as_str().unwrap())
            .collect();
        assert_eq!(titles, vec!["To do", "In progress", "Completed", "Souvenirs"]);
        assert_eq!(board["columns"][0]["tasks"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_migrate_skips_non_object_boards() {
        let migrated =
            Migrator::migrate(FormatVersion::V1, FormatVersion::V2, json!([null, { "title": "A" }]))
                .unwrap();
        assert_eq!(migrated.as_array().unwrap().len(), 1);
        assert_eq!(migrated[0]["columns"], json!([]));
    }

    #[test]
    fn test_same_version_is_untouched() {
        let data = json!([{ "title": "A", "columns": [] }]);
        let migrated = Migrator::migrate(FormatVersion::V2, FormatVersion::V2, data.clone()).unwrap();
        assert_eq!(migrated, data);
    }
}
