use crate::stroke::Stroke;

/// Finished strokes in drawing order.
///
/// Removing the last stroke is the only way to delete one, so undo always
/// matches drawing order.
#[derive(Debug, Default)]
pub struct StrokeStore {
    strokes: Vec<Stroke>,
}

impl StrokeStore {
    pub fn new() -> Self {
        Self {
            strokes: Vec::new(),
        }
    }

    pub fn append(&mut self, stroke: Stroke) {
        self.strokes.push(stroke);
    }

    /// Drop the most recent stroke. Does nothing when the store is empty.
    pub fn remove_last(&mut self) {
        self.strokes.pop();
    }

    pub fn all(&self) -> &[Stroke] {
        &self.strokes
    }

    pub fn len(&self) -> usize {
        self.strokes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brush::BrushSettings;
    use crate::stroke::ActiveStroke;

    fn stroke() -> Stroke {
        ActiveStroke::new(&BrushSettings::default()).finish()
    }

    #[test]
    fn test_append_preserves_order() {
        let mut store = StrokeStore::new();
        let first = stroke();
        let second = stroke();
        let ids = [first.id(), second.id()];

        store.append(first);
        store.append(second);

        let stored: Vec<_> = store.all().iter().map(Stroke::id).collect();
        assert_eq!(stored, ids);
    }

    #[test]
    fn test_remove_last_is_lifo() {
        let mut store = StrokeStore::new();
        let first = stroke();
        let first_id = first.id();
        store.append(first);
        store.append(stroke());

        store.remove_last();
        assert_eq!(store.len(), 1);
        assert_eq!(store.all()[0].id(), first_id);
    }

    #[test]
    fn test_remove_last_on_empty_store() {
        let mut store = StrokeStore::new();
        store.remove_last();
        store.remove_last();
        assert!(store.is_empty());
    }
}
