//! Separators and limits that are part of the persisted key and wire format.
//!
//! None of the separators may appear unescaped inside a component value.

/// Joins the dotted parts of a single identifier.
pub const ID_SEPARATOR: char = '.';
/// Joins the two components of a first-order composite identifier.
pub const FIRST_ORDER_COMPOSITE_ID_SEPARATOR: char = '|';
/// Joins identifiers in an identifier list.
pub const SECOND_ORDER_COMPOSITE_ID_SEPARATOR: char = '*';
/// Joins properties in a property list string.
pub const PROPERTIES_SEPARATOR: char = ',';
/// Separates a property id from its typed data.
pub const PROPERTY_ID_AND_DATA_SEPARATOR: char = ':';
/// Separates a data type code from its value.
pub const DATA_TYPE_AND_VALUE_SEPARATOR: char = '|';
/// Salt between the parts of a content hash input.
pub const TO_HASH_SEPARATOR: char = '_';

/// Separators that must not occur inside a single id component.
pub const RESERVED_COMPONENT_SEPARATORS: [char; 4] = [
    FIRST_ORDER_COMPOSITE_ID_SEPARATOR,
    SECOND_ORDER_COMPOSITE_ID_SEPARATOR,
    PROPERTIES_SEPARATOR,
    PROPERTY_ID_AND_DATA_SEPARATOR,
];

/// Maximum number of properties on an immutable or mutable list.
pub const MAX_PROPERTY_COUNT: usize = 22;
