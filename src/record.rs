//! The order record read from the YAML source file.
//!
//! Scalars are kept as [`FieldValue`] rather than `String` because people
//! write `zip: 68588` or `quantity: 4` without quotes, and the form should
//! show `68588`, not a type error. Every scalar is optional at this level;
//! which fields are actually required is decided by the field table in
//! [`crate::layout`], so the whole policy lives in one place.

use indexmap::IndexMap;
use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::Deserialize;
use std::fmt;

/// A YAML scalar as written by the user.
///
/// Integers that do not fit an `i64` (long part numbers, mostly) are kept as
/// their exact digits in `Text`.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Int(i64),
    Float(f64),
    Bool(bool),
    Text(String),
}

impl FieldValue {
    pub fn text(s: impl Into<String>) -> Self {
        FieldValue::Text(s.into())
    }

    /// The numeric value of integers and floats, which land in numeric cells.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Int(i) => Some(*i as f64),
            FieldValue::Float(x) => Some(*x),
            FieldValue::Bool(_) | FieldValue::Text(_) => None,
        }
    }
}

impl<'de> Deserialize<'de> for FieldValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct FieldValueVisitor;

        impl<'de> Visitor<'de> for FieldValueVisitor {
            type Value = FieldValue;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a string, number or boolean")
            }

            fn visit_bool<E: de::Error>(self, v: bool) -> Result<FieldValue, E> {
                Ok(FieldValue::Bool(v))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<FieldValue, E> {
                Ok(FieldValue::Int(v))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<FieldValue, E> {
                Ok(i64::try_from(v)
                    .map(FieldValue::Int)
                    .unwrap_or_else(|_| FieldValue::Text(v.to_string())))
            }

            fn visit_i128<E: de::Error>(self, v: i128) -> Result<FieldValue, E> {
                Ok(i64::try_from(v)
                    .map(FieldValue::Int)
                    .unwrap_or_else(|_| FieldValue::Text(v.to_string())))
            }

            fn visit_u128<E: de::Error>(self, v: u128) -> Result<FieldValue, E> {
                Ok(i64::try_from(v)
                    .map(FieldValue::Int)
                    .unwrap_or_else(|_| FieldValue::Text(v.to_string())))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<FieldValue, E> {
                Ok(FieldValue::Float(v))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<FieldValue, E> {
                Ok(FieldValue::Text(v.to_string()))
            }

            fn visit_string<E: de::Error>(self, v: String) -> Result<FieldValue, E> {
                Ok(FieldValue::Text(v))
            }
        }

        deserializer.deserialize_any(FieldValueVisitor)
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Int(i) => write!(f, "{i}"),
            FieldValue::Float(x) => write!(f, "{x}"),
            FieldValue::Bool(b) => write!(f, "{b}"),
            FieldValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<i64> for FieldValue {
    fn from(i: i64) -> Self {
        FieldValue::Int(i)
    }
}

impl From<f64> for FieldValue {
    fn from(x: f64) -> Self {
        FieldValue::Float(x)
    }
}

/// Render an optional scalar, `""` when absent.
pub(crate) fn text_or_empty(value: &Option<FieldValue>) -> String {
    value.as_ref().map(ToString::to_string).unwrap_or_default()
}

/// Vendor block of the order. Every entry is optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Vendor {
    pub name: Option<FieldValue>,
    pub address: Option<FieldValue>,
    pub city: Option<FieldValue>,
    pub state: Option<FieldValue>,
    pub zip: Option<FieldValue>,
    pub contact_name: Option<FieldValue>,
    pub contact_phone: Option<FieldValue>,
    pub phone: Option<FieldValue>,
    pub fax: Option<FieldValue>,
    pub url: Option<FieldValue>,
}

/// One line item. The item key (part number) is the map key in [`Items`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Item {
    #[serde(default, alias = "description")]
    pub desc: Option<FieldValue>,
    #[serde(default)]
    pub quantity: Option<FieldValue>,
    #[serde(default)]
    pub unit_price: Option<FieldValue>,
}

impl Item {
    pub fn new(
        desc: impl Into<FieldValue>,
        quantity: impl Into<FieldValue>,
        unit_price: impl Into<FieldValue>,
    ) -> Self {
        Self {
            desc: Some(desc.into()),
            quantity: Some(quantity.into()),
            unit_price: Some(unit_price.into()),
        }
    }
}

/// Line items keyed by part number, in the order they appear in the file.
///
/// Keys are unique: a repeated key is a deserialisation error rather than a
/// silent overwrite, since the overwritten line would vanish from the form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Items(IndexMap<String, Item>);

impl Items {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Item> {
        self.0.iter()
    }

    pub fn get(&self, key: &str) -> Option<&Item> {
        self.0.get(key)
    }

    pub fn as_map(&self) -> &IndexMap<String, Item> {
        &self.0
    }
}

impl From<IndexMap<String, Item>> for Items {
    fn from(map: IndexMap<String, Item>) -> Self {
        Items(map)
    }
}

impl FromIterator<(String, Item)> for Items {
    fn from_iter<I: IntoIterator<Item = (String, Item)>>(iter: I) -> Self {
        Items(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Items {
    type Item = (&'a String, &'a Item);
    type IntoIter = indexmap::map::Iter<'a, String, Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<'de> Deserialize<'de> for Items {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ItemsVisitor;

        impl<'de> Visitor<'de> for ItemsVisitor {
            type Value = Items;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a mapping of item keys to item details")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Items, A::Error> {
                let mut map = IndexMap::with_capacity(access.size_hint().unwrap_or(0));
                while let Some(key) = access.next_key::<FieldValue>()? {
                    let key = key.to_string();
                    // `part-42:` with nothing after it is an item with all defaults.
                    let item = access.next_value::<Option<Item>>()?.unwrap_or_default();
                    if map.contains_key(&key) {
                        return Err(de::Error::custom(format!("duplicate item key '{key}'")));
                    }
                    map.insert(key, item);
                }
                Ok(Items(map))
            }
        }

        deserializer.deserialize_map(ItemsVisitor)
    }
}

/// A purchase requisition: the unit of work for one run.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Requisition {
    #[serde(default, deserialize_with = "null_as_default")]
    pub vendor: Vendor,
    pub delivery_date: Option<FieldValue>,
    pub cost_object: Option<FieldValue>,
    pub submission_date: Option<FieldValue>,
    pub requestor_name: Option<FieldValue>,
    pub requestor_phone: Option<FieldValue>,
    pub supervisor_name: Option<FieldValue>,
    pub use_for_project: Option<FieldValue>,
    pub items: Option<Items>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn scalars_keep_their_natural_text() {
        assert_eq!(FieldValue::Int(68588).to_string(), "68588");
        assert_eq!(FieldValue::Float(12.5).to_string(), "12.5");
        assert_eq!(FieldValue::text("NE").to_string(), "NE");
        assert_eq!(FieldValue::Int(1).as_number(), Some(1.0));
        assert_eq!(FieldValue::text("1").as_number(), None);
        assert_eq!(FieldValue::Bool(true).as_number(), None);
    }

    #[test]
    fn long_numeric_item_keys_keep_every_digit() {
        let items: Items = serde_yaml::from_str(
            "12345678901234567890: {desc: twenty digits}\n\
             123456789012345678901234: {desc: twenty-four digits}\n\
             -98765432109876543210: {desc: negative}\n\
             42: {desc: small}\n",
        )
        .unwrap();
        let keys: Vec<&str> = items.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(
            keys,
            vec![
                "12345678901234567890",
                "123456789012345678901234",
                "-98765432109876543210",
                "42",
            ]
        );
    }

    #[test]
    fn oversized_integers_become_exact_text() {
        let v: Vendor = serde_yaml::from_str("zip: 123456789012345678901234\nphone: 4025550100\n")
            .unwrap();
        assert_eq!(v.zip, Some(FieldValue::text("123456789012345678901234")));
        assert_eq!(v.phone, Some(FieldValue::Int(4025550100)));
    }

    #[test]
    fn booleans_and_floats_deserialize() {
        let item: Item = serde_yaml::from_str("desc: true\nunit_price: 12.5\n").unwrap();
        assert_eq!(item.desc, Some(FieldValue::Bool(true)));
        assert_eq!(item.unit_price, Some(FieldValue::Float(12.5)));
    }

    #[test]
    fn unquoted_numbers_deserialize_as_numbers() {
        let v: Vendor = serde_yaml::from_str("zip: 68588\nphone: '402-555-0100'\n").unwrap();
        assert_eq!(v.zip, Some(FieldValue::Int(68588)));
        assert_eq!(v.phone, Some(FieldValue::text("402-555-0100")));
        assert_eq!(v.city, None);
    }

    #[test]
    fn items_preserve_file_order() {
        let items: Items = serde_yaml::from_str(
            "zeta: {desc: last letter}\nalpha: {desc: first letter}\n1234: {quantity: 2}\n",
        )
        .unwrap();
        let keys: Vec<&str> = items.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["zeta", "alpha", "1234"]);
        assert_eq!(items.get("1234").unwrap().quantity, Some(FieldValue::Int(2)));
    }

    #[test]
    fn description_alias_is_accepted() {
        let item: Item = serde_yaml::from_str("description: Oscilloscope probe\n").unwrap();
        assert_eq!(item.desc, Some(FieldValue::text("Oscilloscope probe")));
    }

    #[test]
    fn bare_item_key_gets_defaults() {
        let items: Items = serde_yaml::from_str("cable:\nplug: {desc: plug}\n").unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items.get("cable"), Some(&Item::default()));
    }

    #[test]
    fn duplicate_item_keys_are_rejected() {
        let err = serde_yaml::from_str::<Items>("a: {desc: one}\nb: {}\na: {desc: two}\n")
            .unwrap_err();
        assert!(err.to_string().contains("duplicate"), "got: {err}");
    }

    #[test]
    fn missing_and_null_vendor_default_to_empty() {
        let r: Requisition = serde_yaml::from_str("requestor_name: Ann\n").unwrap();
        assert_eq!(r.vendor, Vendor::default());
        let r: Requisition = serde_yaml::from_str("vendor:\nrequestor_name: Ann\n").unwrap();
        assert_eq!(r.vendor, Vendor::default());
        assert_eq!(r.items, None);
    }
}
