//! Lookup of computed values by the source position they annotate.

use std::collections::HashMap;

use catln_model::{Annotation, Position, PositionKey, Val};
use tracing::{debug, warn};

/// Maps each annotated position to its value.
///
/// Built once per document; when two annotations share a position the later
/// one wins.
#[derive(Debug, Clone, Default)]
pub struct PositionIndex {
    values: HashMap<PositionKey, Val>,
}

impl PositionIndex {
    pub fn build<'a>(annotations: impl IntoIterator<Item = &'a Annotation>) -> Self {
        let mut values = HashMap::new();
        for annotation in annotations {
            let Some(position) = annotation.position() else {
                warn!(value = ?annotation.value.tuple_name(), "annotation has no position, skipped");
                continue;
            };
            let key = position.key();
            if values.insert(key.clone(), annotation.value.clone()).is_some() {
                debug!(position = %key, "duplicate annotation position, keeping the later value");
            }
        }
        Self { values }
    }

    pub fn get(&self, position: &Position) -> Option<&Val> {
        self.values.get(&position.key())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catln_model::{Expr, Unrecognized};
    use serde_json::{Value, json};

    fn annotation(position: Value, text: &str) -> Annotation {
        serde_json::from_value(json!([
            {"tag": "RawValue", "contents": [[{"tag": "TopType"}, position], "#print"]},
            {"tag": "StrVal", "contents": text}
        ]))
        .unwrap()
    }

    #[test]
    fn later_annotation_wins() {
        let position = json!(["main.ct", [2, 1]]);
        let annotations = [
            annotation(position.clone(), "first"),
            annotation(json!(["main.ct", [9, 1]]), "other"),
            annotation(position.clone(), "second"),
        ];
        let index = PositionIndex::build(&annotations);
        assert_eq!(index.len(), 2);
        assert_eq!(
            index.get(&Position::new(position)),
            Some(&Val::Str("second".to_string()))
        );
    }

    #[test]
    fn unpositioned_annotations_are_skipped() {
        let annotations = [Annotation {
            expr: Expr::Unrecognized(Unrecognized::untagged("no meta")),
            value: Val::NoVal,
        }];
        let index = PositionIndex::build(&annotations);
        assert!(index.is_empty());
    }

    #[test]
    fn null_positions_are_not_indexed() {
        let annotations = [annotation(Value::Null, "first"), annotation(Value::Null, "second")];
        let index = PositionIndex::build(&annotations);
        assert!(index.is_empty());
    }
}
