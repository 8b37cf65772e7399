//! A decoded copy of the blank form.
//!
//! Each page of output gets its own [`FormInstance`] decoded from the cached
//! template bytes, so nothing written for one page can leak into the next.

use crate::error::ReqFormError;
use crate::record::FieldValue;
use std::io::Cursor;
use umya_spreadsheet::Spreadsheet;

/// One spreadsheet being filled in. All writes go to the active sheet.
pub struct FormInstance {
    book: Spreadsheet,
}

impl FormInstance {
    /// Decode a fresh instance from the raw `.xlsx` bytes of the template.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ReqFormError> {
        let book = umya_spreadsheet::reader::xlsx::read_reader(Cursor::new(bytes), true)
            .map_err(|e| ReqFormError::TemplateDecode {
                detail: e.to_string(),
            })?;
        Ok(Self { book })
    }

    /// An empty one-sheet workbook.
    pub fn blank() -> Self {
        Self {
            book: umya_spreadsheet::new_file(),
        }
    }

    /// Write `value` into `cell` (e.g. `"B11"`): numbers as numeric cells,
    /// anything else as text.
    pub fn set(&mut self, cell: &str, value: &FieldValue) {
        let target = self.book.get_active_sheet_mut().get_cell_mut(cell);
        match value.as_number() {
            Some(x) => {
                target.set_value_number(x);
            }
            None => {
                target.set_value_string(value.to_string());
            }
        }
    }

    pub fn set_text(&mut self, cell: &str, text: impl Into<String>) {
        self.book
            .get_active_sheet_mut()
            .get_cell_mut(cell)
            .set_value_string(text.into());
    }

    /// Text of `cell` on the active sheet, `""` when empty.
    pub fn value(&self, cell: &str) -> String {
        self.book.get_active_sheet().get_value(cell)
    }

    /// Serialise the workbook back to `.xlsx` bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>, String> {
        let mut cursor = Cursor::new(Vec::new());
        umya_spreadsheet::writer::xlsx::write_writer(&self.book, &mut cursor)
            .map_err(|e| e.to_string())?;
        Ok(cursor.into_inner())
    }
}

impl std::fmt::Debug for FormInstance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormInstance").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_survive_a_byte_round_trip() {
        let mut form = FormInstance::blank();
        form.set("B11", &FieldValue::text("Thorlabs"));
        form.set("L32", &FieldValue::Int(3));
        let bytes = form.to_bytes().unwrap();

        let reread = FormInstance::from_bytes(&bytes).unwrap();
        assert_eq!(reread.value("B11"), "Thorlabs");
        assert_eq!(reread.value("L32"), "3");
        assert_eq!(reread.value("Z99"), "");
    }

    #[test]
    fn booleans_are_written_as_text() {
        let mut form = FormInstance::blank();
        form.set("B32", &FieldValue::Bool(true));
        form.set("Q32", &FieldValue::Float(12.5));
        let reread = FormInstance::from_bytes(&form.to_bytes().unwrap()).unwrap();
        // A boolean cell would read back as "TRUE".
        assert_eq!(reread.value("B32"), "true");
        assert_eq!(reread.value("Q32"), "12.5");
    }

    #[test]
    fn instances_from_the_same_bytes_are_independent() {
        let template = FormInstance::blank().to_bytes().unwrap();
        let mut first = FormInstance::from_bytes(&template).unwrap();
        first.set_text("A52", "Sheet 1 of 2");
        let second = FormInstance::from_bytes(&template).unwrap();
        assert_eq!(second.value("A52"), "");
    }

    #[test]
    fn garbage_bytes_are_a_decode_error() {
        let err = FormInstance::from_bytes(b"not a zip file").unwrap_err();
        assert!(matches!(err, ReqFormError::TemplateDecode { .. }));
    }
}
