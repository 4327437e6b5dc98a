//! Label/value choice lists built from Discover rowsets.
//!
//! These back the selection widgets of a host UI: pick a catalog, then a
//! cube, then dimensions, measures and member properties.

use serde::{Deserialize, Serialize};

use crate::client::{Transport, XmlaClient, XmlaResult};
use crate::dialect::RequestType;
use crate::document::Document;

/// One selectable entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    pub label: String,
    /// Absent for hint entries that cannot be selected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl Choice {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: Some(value.into()),
        }
    }

    /// A label-only entry telling the user what to do first.
    pub fn hint(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: None,
        }
    }
}

/// A choice list, serialized as `{"choices": [...]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choices {
    pub choices: Vec<Choice>,
}

impl Choices {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hint(label: impl Into<String>) -> Self {
        Self {
            choices: vec![Choice::hint(label)],
        }
    }

    pub fn push(&mut self, choice: Choice) {
        self.choices.push(choice);
    }

    pub fn len(&self) -> usize {
        self.choices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.choices.is_empty()
    }

    pub fn labels(&self) -> Vec<&str> {
        self.choices.iter().map(|c| c.label.as_str()).collect()
    }

    pub fn values(&self) -> Vec<&str> {
        self.choices.iter().filter_map(|c| c.value.as_deref()).collect()
    }
}

impl FromIterator<Choice> for Choices {
    fn from_iter<I: IntoIterator<Item = Choice>>(iter: I) -> Self {
        Self {
            choices: iter.into_iter().collect(),
        }
    }
}

pub const SELECT_CATALOG_HINT: &str = "Select a catalog";
pub const SELECT_CUBE_HINT: &str = "Select a cube";
pub const IGNORED_HINT: &str = "Ignored";

/// What the user has picked so far.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Selection {
    #[serde(rename = "select_catalog")]
    pub catalog: Option<String>,
    #[serde(rename = "select_schema_cube")]
    pub cube: Option<String>,
    #[serde(rename = "select_dimensions")]
    pub dimensions: Vec<String>,
}

impl Selection {
    fn catalog(&self) -> Option<&str> {
        self.catalog.as_deref().filter(|s| !s.is_empty())
    }

    fn cube(&self) -> Option<&str> {
        self.cube.as_deref().filter(|s| !s.is_empty())
    }
}

fn field<'a>(row: &'a Document, name: &str) -> Option<&'a str> {
    row.text_of(name)
}

fn in_cube(row: &Document, catalog: &str, cube: &str) -> bool {
    field(row, "CATALOG_NAME") == Some(catalog) && field(row, "CUBE_NAME") == Some(cube)
}

fn choice_from(row: &Document, label: &str, value: &str) -> Choice {
    Choice {
        label: field(row, label).unwrap_or_default().to_string(),
        value: field(row, value).map(str::to_string),
    }
}

/// Every catalog on the server.
pub async fn catalogs<T: Transport>(client: &XmlaClient<T>) -> XmlaResult<Choices> {
    let rows = client.discover(RequestType::Catalogs).await?;
    Ok(rows
        .iter()
        .map(|row| choice_from(row, "CATALOG_NAME", "CATALOG_NAME"))
        .collect())
}

/// Cubes of `catalog`.
pub async fn cubes<T: Transport>(client: &XmlaClient<T>, catalog: &str) -> XmlaResult<Choices> {
    let rows = client.discover(RequestType::Cubes).await?;
    Ok(rows
        .iter()
        .filter(|row| field(row, "CATALOG_NAME") == Some(catalog))
        .map(|row| choice_from(row, "CUBE_NAME", "CUBE_NAME"))
        .collect())
}

/// Dimensions of one cube, valued by unique name.
pub async fn dimensions<T: Transport>(
    client: &XmlaClient<T>,
    catalog: &str,
    cube: &str,
) -> XmlaResult<Choices> {
    let rows = client.discover(RequestType::Dimensions).await?;
    Ok(rows
        .iter()
        .filter(|row| in_cube(row, catalog, cube))
        .map(|row| choice_from(row, "DIMENSION_NAME", "DIMENSION_UNIQUE_NAME"))
        .collect())
}

/// Measures of one cube, valued by unique name.
pub async fn measures<T: Transport>(
    client: &XmlaClient<T>,
    catalog: &str,
    cube: &str,
) -> XmlaResult<Choices> {
    let rows = client.discover(RequestType::Measures).await?;
    Ok(rows
        .iter()
        .filter(|row| in_cube(row, catalog, cube))
        .map(|row| choice_from(row, "MEASURE_NAME", "MEASURE_UNIQUE_NAME"))
        .collect())
}

/// Member properties of the selected dimensions.
///
/// Each entry is tagged `<dimension unique name>.<property name>`, the form
/// the MDX builder matches back to its dimension.
pub async fn properties<T: Transport, S: AsRef<str>>(
    client: &XmlaClient<T>,
    catalog: &str,
    cube: &str,
    dimensions: &[S],
) -> XmlaResult<Choices> {
    let rows = client.discover(RequestType::Properties).await?;
    Ok(rows
        .iter()
        .filter(|row| in_cube(row, catalog, cube))
        .filter_map(|row| {
            let dimension = field(row, "DIMENSION_UNIQUE_NAME")?;
            if !dimensions.iter().any(|d| d.as_ref() == dimension) {
                return None;
            }
            let tag = format!("{}.{}", dimension, field(row, "PROPERTY_NAME").unwrap_or_default());
            Some(Choice::new(tag.clone(), tag))
        })
        .collect())
}

/// Answer a UI parameter request.
///
/// Unknown parameters get an empty list.
pub async fn choices_for<T: Transport>(
    client: &XmlaClient<T>,
    parameter: &str,
    selection: &Selection,
) -> XmlaResult<Choices> {
    let needs_cube = matches!(
        parameter,
        "select_dimensions" | "select_measures" | "select_properties"
    );

    match parameter {
        "select_catalog" => catalogs(client).await,
        "select_hierarchy" => Ok(Choices::hint(IGNORED_HINT)),
        "select_schema_cube" => match selection.catalog() {
            Some(catalog) => cubes(client, catalog).await,
            None => Ok(Choices::hint(SELECT_CATALOG_HINT)),
        },
        _ if needs_cube => {
            let Some(catalog) = selection.catalog() else {
                return Ok(Choices::hint(SELECT_CATALOG_HINT));
            };
            let Some(cube) = selection.cube() else {
                return Ok(Choices::hint(SELECT_CUBE_HINT));
            };
            match parameter {
                "select_dimensions" => dimensions(client, catalog, cube).await,
                "select_measures" => measures(client, catalog, cube).await,
                _ => properties(client, catalog, cube, &selection.dimensions).await,
            }
        }
        _ => Ok(Choices::new()),
    }
}
