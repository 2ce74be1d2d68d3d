//! Record and Cell Abstractions
//!
//! Typed access from a record to the values shown in its table cells. Column keys are
//! per-record `Copy` enums, so a column can only name a field the record actually has.

use std::cmp::Ordering;
use std::fmt;
use std::hash::Hash;

/// A field identifier of a table record
pub trait FieldKey: Copy + Eq + Hash + fmt::Debug + Send + Sync + 'static {
    /// Wire name of the field (used for `sort_by`)
    fn name(&self) -> &'static str;
}

/// A record that can be displayed in a data table
pub trait TableRecord {
    type Field: FieldKey;

    /// Value of a single field
    fn cell(&self, field: Self::Field) -> CellValue<'_>;
}

/// A scalar value read from a record
///
/// Ordering is total: `Null` sorts first, then booleans, then numbers (compared
/// numerically regardless of int/float), then text (lexicographic).
#[derive(Debug, Clone, Copy)]
pub enum CellValue<'a> {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(&'a str),
}

impl CellValue<'_> {
    fn rank(&self) -> u8 {
        match self {
            CellValue::Null => 0,
            CellValue::Bool(_) => 1,
            CellValue::Int(_) | CellValue::Float(_) => 2,
            CellValue::Text(_) => 3,
        }
    }

    /// Numeric view of the value, if it is a number
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Int(v) => Some(*v as f64),
            CellValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// Text view of the value, if it is text
    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Case-folded display text, the haystack for search filtering
    pub fn search_text(&self) -> String {
        self.to_string().to_lowercase()
    }
}

impl Ord for CellValue<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (CellValue::Null, CellValue::Null) => Ordering::Equal,
            (CellValue::Bool(a), CellValue::Bool(b)) => a.cmp(b),
            (CellValue::Int(a), CellValue::Int(b)) => a.cmp(b),
            (CellValue::Text(a), CellValue::Text(b)) => a.cmp(b),
            (CellValue::Float(a), CellValue::Float(b)) => cmp_floats(*a, *b),
            (CellValue::Int(a), CellValue::Float(b)) => cmp_int_float(*a, *b),
            (CellValue::Float(a), CellValue::Int(b)) => cmp_int_float(*b, *a).reverse(),
            (a, b) => a.rank().cmp(&b.rank()),
        }
    }
}

/// Numeric order with `-0.0 == 0.0`. NaN goes after every number, or before them
/// when its sign bit is set.
fn cmp_floats(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or_else(|| a.total_cmp(&b))
}

/// Compare without rounding the integer, so large values stay totally ordered
fn cmp_int_float(i: i64, f: f64) -> Ordering {
    let rounded = i as f64;
    if rounded == f {
        // f is integral and within 2^63 of zero here, so the cast is exact
        i128::from(i).cmp(&(f as i128))
    } else {
        cmp_floats(rounded, f)
    }
}

impl PartialOrd for CellValue<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for CellValue<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for CellValue<'_> {}

impl fmt::Display for CellValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Null => Ok(()),
            CellValue::Bool(v) => write!(f, "{v}"),
            CellValue::Int(v) => write!(f, "{v}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Text(v) => f.write_str(v),
        }
    }
}

/// Conversion from a record field to a cell value
pub trait IntoCell {
    fn to_cell(&self) -> CellValue<'_>;
}

impl IntoCell for String {
    fn to_cell(&self) -> CellValue<'_> {
        CellValue::Text(self.as_str())
    }
}

impl IntoCell for f64 {
    fn to_cell(&self) -> CellValue<'_> {
        CellValue::Float(*self)
    }
}

impl IntoCell for i64 {
    fn to_cell(&self) -> CellValue<'_> {
        CellValue::Int(*self)
    }
}

impl IntoCell for u32 {
    fn to_cell(&self) -> CellValue<'_> {
        CellValue::Int(i64::from(*self))
    }
}

impl IntoCell for bool {
    fn to_cell(&self) -> CellValue<'_> {
        CellValue::Bool(*self)
    }
}

impl<T: IntoCell> IntoCell for Option<T> {
    fn to_cell(&self) -> CellValue<'_> {
        match self {
            Some(v) => v.to_cell(),
            None => CellValue::Null,
        }
    }
}

/// Declare the field enum of a record and implement [`TableRecord`] for it.
///
/// ```ignore
/// table_record! {
///     RouteReliability => RouteReliabilityField {
///         Origin = "origin" => origin,
///         ReliabilityScore = "reliability_score" => reliability_score,
///     }
/// }
/// ```
///
/// Nested fields are addressed with a dotted path (`=> performance_metrics.total_revenue`).
#[macro_export]
macro_rules! table_record {
    (
        $(#[$meta:meta])*
        $record:ty => $field:ident {
            $( $variant:ident = $name:literal => $($path:ident).+ ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $field {
            $( $variant ),+
        }

        impl $crate::components::data_table::FieldKey for $field {
            fn name(&self) -> &'static str {
                match self {
                    $( $field::$variant => $name ),+
                }
            }
        }

        impl $crate::components::data_table::TableRecord for $record {
            type Field = $field;

            fn cell(&self, field: $field) -> $crate::components::data_table::CellValue<'_> {
                match field {
                    $( $field::$variant => $crate::components::data_table::IntoCell::to_cell(&self.$($path).+) ),+
                }
            }
        }
    };
}
