//! Typed style records for diagram elements.
//!
//! Styles are open-ended per element but closed over a fixed set of known
//! property names. Each property declares the value kind it accepts, and the
//! checked setters reject mismatched kinds at the boundary, so a record that
//! exists is always well-formed.

use peniko::Color;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }

    pub fn white() -> Self {
        Self::new(255, 255, 255, 255)
    }

    pub fn transparent() -> Self {
        Self::new(0, 0, 0, 0)
    }
}

impl From<Color> for SerializableColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<SerializableColor> for Color {
    fn from(color: SerializableColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Horizontal text alignment within an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TextAlign {
    Left,
    #[default]
    Center,
    Right,
}

impl TextAlign {
    /// Cycle to the next alignment.
    pub fn next(self) -> Self {
        match self {
            TextAlign::Left => TextAlign::Center,
            TextAlign::Center => TextAlign::Right,
            TextAlign::Right => TextAlign::Left,
        }
    }
}

/// The closed set of style property names.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum StyleProperty {
    Fill,
    Stroke,
    StrokeWidth,
    Opacity,
    CornerRadius,
    FontSize,
    FontWeight,
    FontFamily,
    TextAlign,
}

impl StyleProperty {
    /// The value kind this property accepts.
    pub fn value_kind(&self) -> ValueKind {
        match self {
            StyleProperty::Fill | StyleProperty::Stroke => ValueKind::Color,
            StyleProperty::StrokeWidth
            | StyleProperty::Opacity
            | StyleProperty::CornerRadius
            | StyleProperty::FontSize
            | StyleProperty::FontWeight => ValueKind::Number,
            StyleProperty::FontFamily => ValueKind::Text,
            StyleProperty::TextAlign => ValueKind::Align,
        }
    }

    /// All known properties, in record order.
    pub fn all() -> &'static [StyleProperty] {
        &[
            StyleProperty::Fill,
            StyleProperty::Stroke,
            StyleProperty::StrokeWidth,
            StyleProperty::Opacity,
            StyleProperty::CornerRadius,
            StyleProperty::FontSize,
            StyleProperty::FontWeight,
            StyleProperty::FontFamily,
            StyleProperty::TextAlign,
        ]
    }
}

/// Kind of value a style property holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ValueKind {
    Number,
    Text,
    Color,
    Align,
}

/// A typed style value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StyleValue {
    Number(f64),
    Text(String),
    Color(SerializableColor),
    Align(TextAlign),
}

impl StyleValue {
    pub fn kind(&self) -> ValueKind {
        match self {
            StyleValue::Number(_) => ValueKind::Number,
            StyleValue::Text(_) => ValueKind::Text,
            StyleValue::Color(_) => ValueKind::Color,
            StyleValue::Align(_) => ValueKind::Align,
        }
    }

    /// The numeric payload, if this is a number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            StyleValue::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl From<f64> for StyleValue {
    fn from(n: f64) -> Self {
        StyleValue::Number(n)
    }
}

impl From<SerializableColor> for StyleValue {
    fn from(c: SerializableColor) -> Self {
        StyleValue::Color(c)
    }
}

impl From<Color> for StyleValue {
    fn from(c: Color) -> Self {
        StyleValue::Color(c.into())
    }
}

impl From<TextAlign> for StyleValue {
    fn from(a: TextAlign) -> Self {
        StyleValue::Align(a)
    }
}

impl From<&str> for StyleValue {
    fn from(s: &str) -> Self {
        StyleValue::Text(s.to_string())
    }
}

/// Style record errors.
#[derive(Debug, Error)]
pub enum StyleError {
    #[error("property {property:?} expects a {expected:?} value, got {got:?}")]
    KindMismatch {
        property: StyleProperty,
        expected: ValueKind,
        got: ValueKind,
    },
}

/// An ordered mapping from style properties to typed values.
///
/// Records are partial: properties a record does not mention fall back to
/// whatever the renderer's defaults are. `BTreeMap` keeps serialization and
/// iteration order stable.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StyleRecord {
    properties: BTreeMap<StyleProperty, StyleValue>,
}

impl StyleRecord {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a property after checking the value kind.
    ///
    /// Returns the previous value, if any.
    pub fn set(
        &mut self,
        property: StyleProperty,
        value: impl Into<StyleValue>,
    ) -> Result<Option<StyleValue>, StyleError> {
        let value = value.into();
        let expected = property.value_kind();
        if value.kind() != expected {
            return Err(StyleError::KindMismatch {
                property,
                expected,
                got: value.kind(),
            });
        }
        Ok(self.properties.insert(property, value))
    }

    /// Builder-style checked set for literal construction.
    pub fn with(mut self, property: StyleProperty, value: impl Into<StyleValue>) -> Self {
        // Kind mismatches in literal construction are programmer errors; keep
        // the record unchanged and leave a trace in the log.
        if let Err(err) = self.set(property, value) {
            log::warn!("ignoring style value: {err}");
        }
        self
    }

    /// Set a property without a kind check.
    ///
    /// Only for values derived from an existing well-formed record, where the
    /// kind is already known to match.
    pub(crate) fn set_unchecked(&mut self, property: StyleProperty, value: StyleValue) {
        self.properties.insert(property, value);
    }

    pub fn get(&self, property: StyleProperty) -> Option<&StyleValue> {
        self.properties.get(&property)
    }

    pub fn remove(&mut self, property: StyleProperty) -> Option<StyleValue> {
        self.properties.remove(&property)
    }

    pub fn contains(&self, property: StyleProperty) -> bool {
        self.properties.contains_key(&property)
    }

    pub fn iter(&self) -> impl Iterator<Item = (StyleProperty, &StyleValue)> {
        self.properties.iter().map(|(p, v)| (*p, v))
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Default look for a newly created element.
    pub fn element_default() -> Self {
        Self::new()
            .with(StyleProperty::Stroke, SerializableColor::black())
            .with(StyleProperty::StrokeWidth, 2.0)
            .with(StyleProperty::Opacity, 1.0)
    }

    /// Default look for a newly created connection.
    pub fn connection_default() -> Self {
        Self::new()
            .with(StyleProperty::Stroke, SerializableColor::black())
            .with(StyleProperty::StrokeWidth, 2.0)
    }
}

impl FromIterator<(StyleProperty, StyleValue)> for StyleRecord {
    fn from_iter<T: IntoIterator<Item = (StyleProperty, StyleValue)>>(iter: T) -> Self {
        let mut record = StyleRecord::new();
        for (property, value) in iter {
            if let Err(err) = record.set(property, value) {
                log::warn!("ignoring style value: {err}");
            }
        }
        record
    }
}
