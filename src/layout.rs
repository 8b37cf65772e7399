//! Cell layout of the 2014 UNL Physics requisition form.
//!
//! Every cell the tool writes is listed here. The item rows and the page
//! capacity are tied to the printable area of that specific template: rows
//! 32–41 hold line items, row 43 carries the cost object and row 52 the
//! sheet number, so [`ITEMS_PER_FORM`] cannot grow without overwriting them.

use crate::record::{text_or_empty, FieldValue, Requisition};

/// Line items that fit on one copy of the form.
pub const ITEMS_PER_FORM: usize = 10;

/// Spreadsheet row of the first line item (1-based, as in `A32`).
pub const ITEM_ROW_ORIGIN: u32 = 32;

/// Cell receiving `"Sheet {i} of {n}"`.
pub const SHEET_NUMBER_CELL: &str = "A52";

/// `strftime` format of the default submission date, e.g. `Oct. 18, 2026`.
pub const DATE_FORMAT: &str = "%b. %d, %Y";

/// Unit price written when an item has none.
pub const UNIT_PRICE_PLACEHOLDER: &str = "N/A";

/// Quantity written when an item has none.
pub const DEFAULT_QUANTITY: i64 = 1;

/// Columns of one line-item row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemColumns {
    pub key: &'static str,
    pub desc: &'static str,
    pub quantity: &'static str,
    pub unit_price: &'static str,
}

pub const ITEM_COLUMNS: ItemColumns = ItemColumns {
    key: "A",
    desc: "B",
    quantity: "L",
    unit_price: "Q",
};

/// Cell address of line item `position` (0-based within its page) in `column`.
pub fn item_cell(column: &str, position: usize) -> String {
    format!("{column}{}", ITEM_ROW_ORIGIN as usize + position)
}

/// What to do when a field is absent from the order file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldPolicy {
    /// Write an empty string.
    Optional,
    /// Abort the run.
    Required,
    /// Write the current date in [`DATE_FORMAT`].
    Today,
}

/// One scalar field of the form: where it goes and how it is read.
#[derive(Clone, Copy)]
pub struct FieldMapping {
    pub name: &'static str,
    pub cell: &'static str,
    pub policy: FieldPolicy,
    pub read: fn(&Requisition) -> Option<FieldValue>,
}

impl std::fmt::Debug for FieldMapping {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldMapping")
            .field("name", &self.name)
            .field("cell", &self.cell)
            .field("policy", &self.policy)
            .finish()
    }
}

/// `"{city}, {state} {zip}"`, each part blank when missing.
pub fn city_state_zip(r: &Requisition) -> String {
    let v = &r.vendor;
    format!(
        "{}, {} {}",
        text_or_empty(&v.city),
        text_or_empty(&v.state),
        text_or_empty(&v.zip)
    )
}

/// `"{contact_name}, {contact_phone}"`, each part blank when missing.
pub fn vendor_contact(r: &Requisition) -> String {
    let v = &r.vendor;
    format!(
        "{}, {}",
        text_or_empty(&v.contact_name),
        text_or_empty(&v.contact_phone)
    )
}

/// Scalar fields of the form, in sheet order.
pub const MISC_FIELDS: &[FieldMapping] = &[
    FieldMapping {
        name: "vendor.name",
        cell: "B11",
        policy: FieldPolicy::Optional,
        read: |r| r.vendor.name.clone(),
    },
    FieldMapping {
        name: "vendor.address",
        cell: "B13",
        policy: FieldPolicy::Optional,
        read: |r| r.vendor.address.clone(),
    },
    FieldMapping {
        name: "vendor.city_state_zip",
        cell: "B16",
        policy: FieldPolicy::Optional,
        read: |r| Some(FieldValue::Text(city_state_zip(r))),
    },
    FieldMapping {
        name: "use_for_project",
        cell: "B18",
        policy: FieldPolicy::Required,
        read: |r| r.use_for_project.clone(),
    },
    FieldMapping {
        name: "vendor.phone",
        cell: "B22",
        policy: FieldPolicy::Optional,
        read: |r| r.vendor.phone.clone(),
    },
    FieldMapping {
        name: "vendor.fax",
        cell: "F22",
        policy: FieldPolicy::Optional,
        read: |r| r.vendor.fax.clone(),
    },
    FieldMapping {
        name: "vendor.contact",
        cell: "B24",
        policy: FieldPolicy::Optional,
        read: |r| Some(FieldValue::Text(vendor_contact(r))),
    },
    FieldMapping {
        name: "vendor.url",
        cell: "B26",
        policy: FieldPolicy::Optional,
        read: |r| r.vendor.url.clone(),
    },
    FieldMapping {
        name: "delivery_date",
        cell: "E28",
        policy: FieldPolicy::Optional,
        read: |r| r.delivery_date.clone(),
    },
    FieldMapping {
        name: "cost_object",
        cell: "D43",
        policy: FieldPolicy::Optional,
        read: |r| r.cost_object.clone(),
    },
    FieldMapping {
        name: "submission_date",
        cell: "B45",
        policy: FieldPolicy::Today,
        read: |r| r.submission_date.clone(),
    },
    FieldMapping {
        name: "requestor_name",
        cell: "C47",
        policy: FieldPolicy::Required,
        read: |r| r.requestor_name.clone(),
    },
    FieldMapping {
        name: "requestor_phone",
        cell: "K47",
        policy: FieldPolicy::Required,
        read: |r| r.requestor_phone.clone(),
    },
    FieldMapping {
        name: "supervisor_name",
        cell: "C49",
        policy: FieldPolicy::Required,
        read: |r| r.supervisor_name.clone(),
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Vendor;
    use std::collections::HashSet;

    #[test]
    fn composite_address() {
        let r = Requisition {
            vendor: Vendor {
                city: Some("Lincoln".into()),
                state: Some("NE".into()),
                zip: Some(FieldValue::Int(68588)),
                ..Vendor::default()
            },
            ..Requisition::default()
        };
        assert_eq!(city_state_zip(&r), "Lincoln, NE 68588");
    }

    #[test]
    fn composite_contact() {
        let r = Requisition {
            vendor: Vendor {
                contact_name: Some("Jane Doe".into()),
                contact_phone: Some("555-1234".into()),
                ..Vendor::default()
            },
            ..Requisition::default()
        };
        assert_eq!(vendor_contact(&r), "Jane Doe, 555-1234");
    }

    #[test]
    fn composites_keep_separators_when_empty() {
        let r = Requisition::default();
        assert_eq!(city_state_zip(&r), ",  ");
        assert_eq!(vendor_contact(&r), ", ");
    }

    #[test]
    fn item_rows_cover_the_printable_area() {
        assert_eq!(item_cell(ITEM_COLUMNS.key, 0), "A32");
        assert_eq!(item_cell(ITEM_COLUMNS.unit_price, ITEMS_PER_FORM - 1), "Q41");
    }

    #[test]
    fn field_cells_are_unique_and_clear_of_item_rows() {
        let mut seen = HashSet::new();
        for field in MISC_FIELDS {
            assert!(seen.insert(field.cell), "duplicate cell {}", field.cell);
            let row: usize = field.cell.trim_start_matches(char::is_alphabetic).parse().unwrap();
            let items = ITEM_ROW_ORIGIN as usize..ITEM_ROW_ORIGIN as usize + ITEMS_PER_FORM;
            assert!(!items.contains(&row), "{} overlaps item rows", field.name);
        }
        assert!(!seen.contains(SHEET_NUMBER_CELL));
    }

    #[test]
    fn required_fields_match_the_order_file_format() {
        let required: Vec<&str> = MISC_FIELDS
            .iter()
            .filter(|f| f.policy == FieldPolicy::Required)
            .map(|f| f.name)
            .collect();
        assert_eq!(
            required,
            vec!["use_for_project", "requestor_name", "requestor_phone", "supervisor_name"]
        );
    }
}
