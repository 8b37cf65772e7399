//! Field mapping: write the order record into a [`FormInstance`].
//!
//! Scalar fields are resolved once per run by [`resolve_fields`], before any
//! template is fetched, so a missing required field aborts the run without
//! leaving a partial set of forms behind. The resolved list is then replayed
//! onto every page together with that page's items and sheet number.

use crate::error::ReqFormError;
use crate::form::FormInstance;
use crate::layout::{
    item_cell, FieldPolicy, DATE_FORMAT, DEFAULT_QUANTITY, ITEM_COLUMNS, MISC_FIELDS,
    SHEET_NUMBER_CELL, UNIT_PRICE_PLACEHOLDER,
};
use crate::record::{FieldValue, Item, Requisition};
use chrono::NaiveDate;
use indexmap::IndexMap;

/// A scalar field with its value settled.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedField {
    pub cell: &'static str,
    pub value: FieldValue,
}

/// Apply every policy in [`MISC_FIELDS`] to `requisition`.
///
/// `today` fills `submission_date` when the order does not set one.
pub fn resolve_fields(
    requisition: &Requisition,
    today: NaiveDate,
) -> Result<Vec<ResolvedField>, ReqFormError> {
    MISC_FIELDS
        .iter()
        .map(|field| {
            let value = match ((field.read)(requisition), field.policy) {
                (Some(value), _) => value,
                (None, FieldPolicy::Optional) => FieldValue::text(""),
                (None, FieldPolicy::Today) => FieldValue::Text(today.format(DATE_FORMAT).to_string()),
                (None, FieldPolicy::Required) => {
                    return Err(ReqFormError::MissingField { field: field.name })
                }
            };
            Ok(ResolvedField {
                cell: field.cell,
                value,
            })
        })
        .collect()
}

/// Write the resolved scalar fields.
pub fn apply_fields(form: &mut FormInstance, fields: &[ResolvedField]) {
    for field in fields {
        form.set(field.cell, &field.value);
    }
}

/// Write one row per item, starting at the first item row of the form.
pub fn populate_items(form: &mut FormInstance, items: &IndexMap<String, Item>) {
    let cols = ITEM_COLUMNS;
    for (pos, (key, item)) in items.iter().enumerate() {
        form.set_text(&item_cell(cols.key, pos), key.as_str());
        form.set(
            &item_cell(cols.desc, pos),
            item.desc.as_ref().unwrap_or(&FieldValue::text("")),
        );
        form.set(
            &item_cell(cols.quantity, pos),
            item.quantity
                .as_ref()
                .unwrap_or(&FieldValue::Int(DEFAULT_QUANTITY)),
        );
        form.set(
            &item_cell(cols.unit_price, pos),
            item.unit_price
                .as_ref()
                .unwrap_or(&FieldValue::text(UNIT_PRICE_PLACEHOLDER)),
        );
    }
}

/// `"Sheet {index} of {total}"`, `index` being 1-based.
pub fn sheet_label(index: usize, total: usize) -> String {
    format!("Sheet {index} of {total}")
}

pub fn place_sheet_number(form: &mut FormInstance, index: usize, total: usize) {
    form.set_text(SHEET_NUMBER_CELL, sheet_label(index, total));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{Items, Vendor};
    use pretty_assertions::assert_eq;

    fn complete() -> Requisition {
        Requisition {
            vendor: Vendor {
                name: Some("Newport".into()),
                city: Some("Lincoln".into()),
                state: Some("NE".into()),
                zip: Some(FieldValue::Int(68588)),
                contact_name: Some("Jane Doe".into()),
                contact_phone: Some("555-1234".into()),
                ..Vendor::default()
            },
            requestor_name: Some("Ann".into()),
            requestor_phone: Some("402-555-0101".into()),
            supervisor_name: Some("Dr. Sample".into()),
            use_for_project: Some("Laser alignment".into()),
            items: Some(Items::new()),
            ..Requisition::default()
        }
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }

    fn value_at<'a>(fields: &'a [ResolvedField], cell: &str) -> &'a FieldValue {
        &fields.iter().find(|f| f.cell == cell).unwrap().value
    }

    #[test]
    fn resolves_composites_and_defaults() {
        let fields = resolve_fields(&complete(), day()).unwrap();
        assert_eq!(fields.len(), MISC_FIELDS.len());
        assert_eq!(value_at(&fields, "B16"), &FieldValue::text("Lincoln, NE 68588"));
        assert_eq!(value_at(&fields, "B24"), &FieldValue::text("Jane Doe, 555-1234"));
        assert_eq!(value_at(&fields, "B13"), &FieldValue::text(""));
        assert_eq!(value_at(&fields, "B45"), &FieldValue::text("Oct. 18, 2026"));
    }

    #[test]
    fn explicit_submission_date_wins() {
        let mut r = complete();
        r.submission_date = Some("2026-01-05".into());
        let fields = resolve_fields(&r, day()).unwrap();
        assert_eq!(value_at(&fields, "B45"), &FieldValue::text("2026-01-05"));
    }

    #[test]
    fn each_required_field_is_enforced() {
        type Clear = fn(&mut Requisition);
        let cases: [(&str, Clear); 4] = [
            ("requestor_name", |r| r.requestor_name = None),
            ("requestor_phone", |r| r.requestor_phone = None),
            ("supervisor_name", |r| r.supervisor_name = None),
            ("use_for_project", |r| r.use_for_project = None),
        ];
        for (name, clear) in cases {
            let mut r = complete();
            clear(&mut r);
            match resolve_fields(&r, day()) {
                Err(ReqFormError::MissingField { field }) => assert_eq!(field, name),
                other => panic!("{name}: expected MissingField, got {other:?}"),
            }
        }
    }

    #[test]
    fn item_rows_use_defaults() {
        let items: IndexMap<String, Item> = [
            ("LA1131".to_string(), Item::new("Lens", 4_i64, 25.75)),
            ("KM100".to_string(), Item::default()),
        ]
        .into_iter()
        .collect();

        let mut form = FormInstance::blank();
        populate_items(&mut form, &items);

        assert_eq!(form.value("A32"), "LA1131");
        assert_eq!(form.value("B32"), "Lens");
        assert_eq!(form.value("L32"), "4");
        assert_eq!(form.value("Q32"), "25.75");
        assert_eq!(form.value("A33"), "KM100");
        assert_eq!(form.value("B33"), "");
        assert_eq!(form.value("L33"), "1");
        assert_eq!(form.value("Q33"), "N/A");
        assert_eq!(form.value("A34"), "");
    }

    #[test]
    fn sheet_number_text() {
        assert_eq!(sheet_label(2, 3), "Sheet 2 of 3");
        let mut form = FormInstance::blank();
        place_sheet_number(&mut form, 2, 3);
        assert_eq!(form.value("A52"), "Sheet 2 of 3");
    }

    #[test]
    fn applied_fields_land_in_their_cells() {
        let fields = resolve_fields(&complete(), day()).unwrap();
        let mut form = FormInstance::blank();
        apply_fields(&mut form, &fields);
        assert_eq!(form.value("B11"), "Newport");
        assert_eq!(form.value("C47"), "Ann");
        assert_eq!(form.value("K47"), "402-555-0101");
        assert_eq!(form.value("C49"), "Dr. Sample");
        assert_eq!(form.value("B18"), "Laser alignment");
    }
}
