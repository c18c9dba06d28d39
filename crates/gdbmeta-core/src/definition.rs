//! Typed views over the serialized XML object definitions stored in a
//! geodatabase's system catalog.
//!
//! Each row of `GDB_Items` carries one XML document describing a catalog
//! object (`DEWorkspace`, table and feature class descriptions, attribute
//! domains, ...). The event stream from quick-xml is folded into a small
//! element tree, and the typed extractors below pull out the handful of
//! elements this crate cares about. Element lookups return `Option`:
//! definitions written by different tools omit optional elements freely, and
//! absences must surface as empty placeholders, not errors.

use quick_xml::Reader;
use quick_xml::events::Event;

use crate::domain::DomainKind;
use crate::error::DefinitionError;
use crate::mappings;

/// A parsed XML element: local tag name, concatenated text, child elements.
///
/// Attributes and namespaces are deliberately dropped; geodatabase
/// definitions put everything of interest in element text.
#[derive(Debug, Clone, Default)]
pub struct XmlElement {
    /// Local (prefix-stripped) tag name.
    pub tag: String,
    /// Concatenated character data directly inside this element.
    pub text: String,
    /// Child elements in document order.
    pub children: Vec<XmlElement>,
}

impl XmlElement {
    /// Parse one definition document and return its root element.
    ///
    /// # Errors
    ///
    /// Returns [`DefinitionError`] when the document is not well-formed.
    pub fn parse(xml: &str) -> Result<XmlElement, DefinitionError> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        // Sentinel holder at the bottom of the stack collects the root.
        let mut stack: Vec<XmlElement> = vec![XmlElement::default()];
        loop {
            match reader.read_event()? {
                Event::Start(start) => {
                    let tag = String::from_utf8_lossy(start.local_name().as_ref()).into_owned();
                    stack.push(XmlElement {
                        tag,
                        ..XmlElement::default()
                    });
                },
                Event::Empty(start) => {
                    let tag = String::from_utf8_lossy(start.local_name().as_ref()).into_owned();
                    if let Some(parent) = stack.last_mut() {
                        parent.children.push(XmlElement {
                            tag,
                            ..XmlElement::default()
                        });
                    }
                },
                Event::Text(text) => {
                    let unescaped = text.unescape()?;
                    if let Some(current) = stack.last_mut() {
                        current.text.push_str(&unescaped);
                    }
                },
                Event::CData(cdata) => {
                    if let Some(current) = stack.last_mut() {
                        current.text.push_str(&String::from_utf8_lossy(&cdata.into_inner()));
                    }
                },
                Event::End(_) => {
                    let Some(finished) = stack.pop() else {
                        return Err(DefinitionError::Malformed(
                            "closing tag without matching element".to_string(),
                        ));
                    };
                    match stack.last_mut() {
                        Some(parent) => parent.children.push(finished),
                        None => {
                            return Err(DefinitionError::Malformed(
                                "closing tag without matching element".to_string(),
                            ));
                        },
                    }
                },
                Event::Eof => break,
                _ => {},
            }
        }

        if stack.len() != 1 {
            return Err(DefinitionError::Malformed(
                "document ends inside an open element".to_string(),
            ));
        }
        let Some(holder) = stack.pop() else {
            return Err(DefinitionError::Malformed("empty document".to_string()));
        };
        holder
            .children
            .into_iter()
            .next()
            .ok_or_else(|| DefinitionError::Malformed("document has no root element".to_string()))
    }

    /// First child element with the given local tag name.
    #[must_use]
    pub fn child(&self, tag: &str) -> Option<&XmlElement> {
        self.children.iter().find(|child| child.tag == tag)
    }

    /// Trimmed text of a child element; `None` when the child is missing or
    /// its text is blank.
    #[must_use]
    pub fn child_text(&self, tag: &str) -> Option<&str> {
        self.child(tag)
            .map(|child| child.text.trim())
            .filter(|text| !text.is_empty())
    }

    /// All children with the given local tag name, in document order.
    pub fn children_named<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a XmlElement> {
        self.children.iter().filter(move |child| child.tag == tag)
    }
}

/// Workspace-level metadata from a `DEWorkspace` definition.
#[derive(Debug, Clone, Default)]
pub struct WorkspaceDefinition {
    /// Major component of the release triplet.
    pub major: Option<String>,
    /// Minor component of the release triplet.
    pub minor: Option<String>,
    /// Bugfix component of the release triplet.
    pub bugfix: Option<String>,
    /// The COM ProgID of the workspace factory that created the container.
    pub factory_progid: Option<String>,
}

impl WorkspaceDefinition {
    /// Root tag of a workspace definition document.
    pub const ROOT_TAG: &'static str = "DEWorkspace";

    /// Extract the workspace metadata from a parsed definition.
    #[must_use]
    pub fn from_element(root: &XmlElement) -> Self {
        WorkspaceDefinition {
            major: root.child_text("MajorVersion").map(str::to_string),
            minor: root.child_text("MinorVersion").map(str::to_string),
            bugfix: root.child_text("BugfixVersion").map(str::to_string),
            factory_progid: root.child_text("WorkspaceFactoryProgID").map(str::to_string),
        }
    }

    /// Release label for the stored version triplet; empty when the triplet
    /// is incomplete or unknown.
    #[must_use]
    pub fn release_label(&self) -> &'static str {
        match (&self.major, &self.minor, &self.bugfix) {
            (Some(major), Some(minor), Some(bugfix)) => {
                mappings::release_label(major, minor, bugfix)
            },
            _ => "",
        }
    }
}

/// An attribute domain extracted from its XML definition.
///
/// All scalar fields are raw token text; translation to display labels
/// happens in [`crate::domain::Domain::from_definition`].
#[derive(Debug, Clone)]
pub struct DomainDefinition {
    /// Coded-value or range, classified from the root tag.
    pub kind: DomainKind,
    /// Domain name.
    pub name: Option<String>,
    /// Owning user, usually empty outside enterprise geodatabases.
    pub owner: Option<String>,
    /// Free-form description.
    pub description: Option<String>,
    /// Raw `esriFieldType*` token.
    pub field_type: Option<String>,
    /// Raw merge policy token.
    pub merge_policy: Option<String>,
    /// Raw split policy token.
    pub split_policy: Option<String>,
    /// `(min, max)` of a range domain when both bounds are present.
    pub range: Option<(f64, f64)>,
    /// Code/name pairs of a coded-value domain, in definition order.
    pub coded_values: Vec<(String, String)>,
}

impl DomainDefinition {
    /// Extract a domain from a parsed definition document.
    ///
    /// Returns `Ok(None)` when the root tag is not a domain definition at
    /// all; the catalog holds many other object kinds and the domain scan
    /// simply skips them.
    ///
    /// # Errors
    ///
    /// Returns [`DefinitionError::InvalidNumber`] when a range bound is
    /// present but not numeric.
    pub fn from_element(root: &XmlElement) -> Result<Option<DomainDefinition>, DefinitionError> {
        let Some(kind) = DomainKind::from_root_tag(&root.tag) else {
            return Ok(None);
        };

        let range = match kind {
            DomainKind::Range => {
                match (root.child_text("MinValue"), root.child_text("MaxValue")) {
                    (Some(min), Some(max)) => {
                        Some((parse_bound("MinValue", min)?, parse_bound("MaxValue", max)?))
                    },
                    _ => None,
                }
            },
            DomainKind::CodedValue => None,
        };

        let coded_values = root
            .child("CodedValues")
            .map(|values| {
                values
                    .children_named("CodedValue")
                    .filter_map(|coded| {
                        // A value without a code cannot be keyed; a missing
                        // name degrades to the empty placeholder.
                        let code = coded.child_text("Code")?;
                        let name = coded.child_text("Name").unwrap_or("");
                        Some((code.to_string(), name.to_string()))
                    })
                    .collect()
            })
            .unwrap_or_default();

        Ok(Some(DomainDefinition {
            kind,
            name: root.child_text("DomainName").map(str::to_string),
            owner: root.child_text("Owner").map(str::to_string),
            description: root.child_text("Description").map(str::to_string),
            field_type: root.child_text("FieldType").map(str::to_string),
            merge_policy: root.child_text("MergePolicy").map(str::to_string),
            split_policy: root.child_text("SplitPolicy").map(str::to_string),
            range,
            coded_values,
        }))
    }
}

fn parse_bound(element: &str, value: &str) -> Result<f64, DefinitionError> {
    value
        .parse::<f64>()
        .map_err(|_| DefinitionError::InvalidNumber {
            element: element.to_string(),
            value: value.to_string(),
        })
}

/// Spatial metadata from a feature class definition.
#[derive(Debug, Clone, Default)]
pub struct FeatureClassDefinition {
    /// Display alias.
    pub alias: Option<String>,
    /// Raw `esriGeometry*` token.
    pub shape_type: Option<String>,
    /// Resolved spatial reference label.
    pub spatial_reference: Option<String>,
}

impl FeatureClassDefinition {
    /// Extract feature class metadata from a parsed definition.
    #[must_use]
    pub fn from_element(root: &XmlElement) -> Self {
        FeatureClassDefinition {
            alias: root.child_text("AliasName").map(str::to_string),
            shape_type: root.child_text("ShapeType").map(str::to_string),
            spatial_reference: root.child("SpatialReference").and_then(spatial_reference_label),
        }
    }
}

/// Human-readable label for a `SpatialReference` element: the coordinate
/// system name out of the WKT when available, else the EPSG code.
fn spatial_reference_label(srs: &XmlElement) -> Option<String> {
    if let Some(wkt) = srs.child_text("WKT") {
        if let Some(name) = wkt.split('"').nth(1) {
            if !name.is_empty() {
                return Some(name.to_string());
            }
        }
    }
    srs.child_text("LatestWKID")
        .or_else(|| srs.child_text("WKID"))
        .map(|wkid| format!("EPSG:{wkid}"))
}
