use std::borrow::{Borrow, Cow};
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use crate::error::{StatsError, StatsResult};
use crate::tags::TagKey;
use crate::validation::validate_name;

use super::{Aggregation, Measure};

/// The unique name of a [`View`].
///
/// Names are non-empty printable ASCII of at most 255 characters.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ViewName(Cow<'static, str>);

impl ViewName {
    /// Creates a validated view name.
    pub fn new(name: impl Into<Cow<'static, str>>) -> StatsResult<Self> {
        let name = name.into();
        validate_name(&name)?;
        Ok(ViewName(name))
    }

    /// The name as a string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for ViewName {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for ViewName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, PartialEq)]
struct ViewInner {
    name: ViewName,
    description: Cow<'static, str>,
    measure: Measure,
    aggregation: Aggregation,
    columns: Vec<TagKey>,
}

/// Binds a [`Measure`] to an [`Aggregation`], partitioned by tag keys.
///
/// Measurements recorded on the view's measure are aggregated separately for
/// each combination of values of the view's columns. Views are immutable and
/// cheap to clone.
#[derive(Clone, Debug, PartialEq)]
pub struct View(Arc<ViewInner>);

impl View {
    /// Creates a view.
    ///
    /// Returns an error if a column key is not a valid tag key name, or if a
    /// column appears more than once.
    ///
    /// # Examples
    ///
    /// ```
    /// use opentelemetry_stats::stats::{Aggregation, MeasureLong, View, ViewName};
    /// use opentelemetry_stats::tags::TagKey;
    ///
    /// # fn main() -> Result<(), opentelemetry_stats::StatsError> {
    /// let bytes = MeasureLong::new("grpc/sent_bytes", "Bytes sent", "By")?;
    /// let view = View::new(
    ///     ViewName::new("grpc/sent_bytes/count")?,
    ///     "Number of sends by method",
    ///     bytes,
    ///     Aggregation::Count,
    ///     vec![TagKey::new("method")],
    /// )?;
    /// assert_eq!(view.columns().len(), 1);
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(
        name: ViewName,
        description: impl Into<Cow<'static, str>>,
        measure: impl Into<Measure>,
        aggregation: Aggregation,
        columns: Vec<TagKey>,
    ) -> StatsResult<Self> {
        let mut seen = HashSet::with_capacity(columns.len());
        for column in &columns {
            validate_name(column.as_str())?;
            if !seen.insert(column) {
                return Err(StatsError::DuplicateColumn(column.to_string()));
            }
        }

        Ok(View(Arc::new(ViewInner {
            name,
            description: description.into(),
            measure: measure.into(),
            aggregation,
            columns,
        })))
    }

    /// The view's name.
    pub fn name(&self) -> &ViewName {
        &self.0.name
    }

    /// The view's description.
    pub fn description(&self) -> &str {
        &self.0.description
    }

    /// The measure whose recordings this view aggregates.
    pub fn measure(&self) -> &Measure {
        &self.0.measure
    }

    /// How recordings are aggregated.
    pub fn aggregation(&self) -> &Aggregation {
        &self.0.aggregation
    }

    /// The tag keys recordings are partitioned by, in order.
    pub fn columns(&self) -> &[TagKey] {
        &self.0.columns
    }
}
