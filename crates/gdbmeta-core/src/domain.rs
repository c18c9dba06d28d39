//! Attribute domain model.

use crate::definition::DomainDefinition;
use crate::mappings;
use crate::props::{Properties, PropertyValue};

/// The two logical domain types a geodatabase can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomainKind {
    /// Enumerated code → display name list.
    CodedValue,
    /// Numeric min/max constraint.
    Range,
}

impl DomainKind {
    /// Display label.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            DomainKind::CodedValue => "Coded value",
            DomainKind::Range => "Range",
        }
    }

    /// Classify a serialized definition by its XML root tag.
    ///
    /// The system catalog stores many object kinds; only the two domain
    /// tags are meaningful here and everything else maps to `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use gdbmeta_core::DomainKind;
    ///
    /// assert_eq!(
    ///     DomainKind::from_root_tag("GPCodedValueDomain2"),
    ///     Some(DomainKind::CodedValue)
    /// );
    /// assert_eq!(DomainKind::from_root_tag("GPRangeDomain2"), Some(DomainKind::Range));
    /// assert_eq!(DomainKind::from_root_tag("DEFeatureClassInfo"), None);
    /// ```
    #[must_use]
    pub fn from_root_tag(tag: &str) -> Option<Self> {
        match tag {
            "GPCodedValueDomain2" => Some(DomainKind::CodedValue),
            "GPRangeDomain2" => Some(DomainKind::Range),
            _ => None,
        }
    }
}

/// A constraint on a field's allowed values: an enumerated code list or a
/// numeric range.
///
/// Scalar attributes hold display labels already; absent optional fields are
/// empty strings.
#[derive(Debug, Clone)]
pub struct Domain {
    /// Domain name.
    pub name: String,
    /// Owning user; usually empty outside enterprise geodatabases.
    pub owner: String,
    /// Free-form description.
    pub description: String,
    /// Coded-value or range.
    pub kind: DomainKind,
    /// Field type label (e.g. "String", "Double").
    pub field_type: String,
    /// Merge policy label.
    pub merge_policy: String,
    /// Split policy label.
    pub split_policy: String,
    /// `(min, max)` of a range domain when both bounds were present.
    pub range: Option<(f64, f64)>,
    /// Code/name pairs of a coded-value domain, in definition order.
    pub coded_values: Vec<(String, String)>,
}

impl Domain {
    /// Build a domain from its parsed definition, translating raw esri
    /// tokens into display labels.
    #[must_use]
    pub(crate) fn from_definition(def: DomainDefinition) -> Self {
        Domain {
            name: def.name.unwrap_or_default(),
            owner: def.owner.unwrap_or_default(),
            description: def.description.unwrap_or_default(),
            kind: def.kind,
            field_type: def
                .field_type
                .as_deref()
                .map(|token| mappings::field_type_label(token).to_string())
                .unwrap_or_default(),
            merge_policy: def
                .merge_policy
                .as_deref()
                .map(|token| mappings::merge_policy_label(token).to_string())
                .unwrap_or_default(),
            split_policy: def
                .split_policy
                .as_deref()
                .map(|token| mappings::split_policy_label(token).to_string())
                .unwrap_or_default(),
            range: def.range,
            coded_values: def.coded_values,
        }
    }

    /// Fixed-order property projection (see [`mappings::DOMAIN_PROPS`]).
    #[must_use]
    pub fn pretty_props(&self) -> Properties {
        let mut props = Properties::new();
        props.push("Name", PropertyValue::text(&self.name));
        props.push("Owner", PropertyValue::text(&self.owner));
        props.push("Description", PropertyValue::text(&self.description));
        props.push("Domain type", PropertyValue::Text(self.kind.as_str().to_string()));
        props.push("Field type", PropertyValue::text(&self.field_type));
        props.push("Merge policy", PropertyValue::text(&self.merge_policy));
        props.push("Split policy", PropertyValue::text(&self.split_policy));
        props.push(
            "Range",
            match self.range {
                Some((min, max)) => PropertyValue::Range(min, max),
                None => PropertyValue::Empty,
            },
        );
        props.push(
            "Coded values",
            if self.coded_values.is_empty() {
                PropertyValue::Empty
            } else {
                PropertyValue::Pairs(self.coded_values.clone())
            },
        );
        props
    }
}
