//! Measured field positions within the scrollable form content

use super::schema::{FormSchema, SchemaError};
use std::collections::HashMap;

/// Vertical offset (in rows, content coordinates) of each measured field.
///
/// Entries appear as fields are laid out and are overwritten on every
/// layout pass; a field that was never measured has no entry.
#[derive(Debug, Clone, Default)]
pub struct FieldLayout {
    offsets: HashMap<String, u16>,
    heights: HashMap<String, u16>,
}

impl FieldLayout {
    /// Record a field's position after it was laid out
    pub fn register(
        &mut self,
        schema: &FormSchema,
        name: &str,
        offset: u16,
        height: u16,
    ) -> Result<(), SchemaError> {
        schema.check_field(name)?;
        self.offsets.insert(name.to_string(), offset);
        self.heights.insert(name.to_string(), height);
        Ok(())
    }

    pub fn offset(&self, name: &str) -> Option<u16> {
        self.offsets.get(name).copied()
    }

    pub fn height(&self, name: &str) -> Option<u16> {
        self.heights.get(name).copied()
    }

    /// Field whose block contains `row`
    pub fn field_at(&self, row: u16) -> Option<&str> {
        self.offsets.iter().find_map(|(name, &offset)| {
            let height = self.heights.get(name).copied().unwrap_or(1);
            (row >= offset && row < offset.saturating_add(height)).then_some(name.as_str())
        })
    }

    pub fn clear(&mut self) {
        self.offsets.clear();
        self.heights.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unmeasured_field_is_unknown() {
        let layout = FieldLayout::default();
        assert_eq!(layout.offset("email"), None);
        assert_eq!(layout.offset("email"), None);
    }

    #[test]
    fn test_register_and_overwrite() {
        let schema = FormSchema::registration();
        let mut layout = FieldLayout::default();
        layout.register(&schema, "email", 12, 3).unwrap();
        assert_eq!(layout.offset("email"), Some(12));
        layout.register(&schema, "email", 14, 4).unwrap();
        assert_eq!(layout.offset("email"), Some(14));
        assert_eq!(layout.height("email"), Some(4));
    }

    #[test]
    fn test_register_unknown_field_rejected() {
        let schema = FormSchema::registration();
        let mut layout = FieldLayout::default();
        assert_eq!(
            layout.register(&schema, "nickname", 0, 3),
            Err(SchemaError::UnknownField("nickname".to_string()))
        );
        assert_eq!(layout.offset("nickname"), None);
    }

    #[test]
    fn test_field_at_row() {
        let schema = FormSchema::registration();
        let mut layout = FieldLayout::default();
        layout.register(&schema, "firstName", 2, 3).unwrap();
        layout.register(&schema, "lastName", 5, 4).unwrap();
        assert_eq!(layout.field_at(1), None);
        assert_eq!(layout.field_at(2), Some("firstName"));
        assert_eq!(layout.field_at(4), Some("firstName"));
        assert_eq!(layout.field_at(8), Some("lastName"));
        assert_eq!(layout.field_at(9), None);
    }

    #[test]
    fn test_clear() {
        let schema = FormSchema::registration();
        let mut layout = FieldLayout::default();
        layout.register(&schema, "city", 30, 3).unwrap();
        layout.clear();
        assert_eq!(layout.offset("city"), None);
    }
}
