use std::borrow::Cow;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::error::StatsResult;
use crate::validation::{validate_name, validate_unit};

/// The kind of value a [`Measure`] records.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MeasureKind {
    /// Values are `f64`.
    Double,
    /// Values are `i64`.
    Long,
}

impl fmt::Display for MeasureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeasureKind::Double => f.write_str("Double"),
            MeasureKind::Long => f.write_str("Long"),
        }
    }
}

#[derive(Debug)]
struct MeasureDescriptor {
    name: Cow<'static, str>,
    description: Cow<'static, str>,
    unit: Cow<'static, str>,
}

impl MeasureDescriptor {
    fn new(
        name: impl Into<Cow<'static, str>>,
        description: impl Into<Cow<'static, str>>,
        unit: impl Into<Cow<'static, str>>,
    ) -> StatsResult<Arc<Self>> {
        let (name, description, unit) = (name.into(), description.into(), unit.into());
        validate_name(&name)?;
        validate_unit(&unit)?;
        Ok(Arc::new(MeasureDescriptor {
            name,
            description,
            unit,
        }))
    }
}

// Identity is the name alone; the kind is carried by the wrapping type.
impl PartialEq for MeasureDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for MeasureDescriptor {}

impl Hash for MeasureDescriptor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

/// A named recording point for `f64` values.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MeasureDouble(Arc<MeasureDescriptor>);

impl MeasureDouble {
    /// Creates a new measure for `f64` values.
    ///
    /// The name must be non-empty printable ASCII of at most 255 characters
    /// and the unit ASCII of fewer than 64 characters.
    pub fn new(
        name: impl Into<Cow<'static, str>>,
        description: impl Into<Cow<'static, str>>,
        unit: impl Into<Cow<'static, str>>,
    ) -> StatsResult<Self> {
        MeasureDescriptor::new(name, description, unit).map(MeasureDouble)
    }

    /// The name of the measure.
    pub fn name(&self) -> &str {
        &self.0.name
    }

    /// The description of the measure.
    pub fn description(&self) -> &str {
        &self.0.description
    }

    /// The unit values are recorded in.
    pub fn unit(&self) -> &str {
        &self.0.unit
    }
}

/// A named recording point for `i64` values.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MeasureLong(Arc<MeasureDescriptor>);

impl MeasureLong {
    /// Creates a new measure for `i64` values.
    ///
    /// The same naming rules as [`MeasureDouble::new`] apply.
    pub fn new(
        name: impl Into<Cow<'static, str>>,
        description: impl Into<Cow<'static, str>>,
        unit: impl Into<Cow<'static, str>>,
    ) -> StatsResult<Self> {
        MeasureDescriptor::new(name, description, unit).map(MeasureLong)
    }

    /// The name of the measure.
    pub fn name(&self) -> &str {
        &self.0.name
    }

    /// The description of the measure.
    pub fn description(&self) -> &str {
        &self.0.description
    }

    /// The unit values are recorded in.
    pub fn unit(&self) -> &str {
        &self.0.unit
    }
}

/// Either kind of measure.
///
/// Two measures are equal when their kind and name match; description and
/// unit are informational. Registering views over a double and a long
/// measure that share a name is rejected, and recordings made through a
/// measure of the wrong kind are skipped.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Measure {
    /// A measure of `f64` values.
    Double(MeasureDouble),
    /// A measure of `i64` values.
    Long(MeasureLong),
}

impl Measure {
    fn descriptor(&self) -> &MeasureDescriptor {
        match self {
            Measure::Double(m) => &m.0,
            Measure::Long(m) => &m.0,
        }
    }

    /// The name of the measure.
    pub fn name(&self) -> &str {
        &self.descriptor().name
    }

    /// The description of the measure.
    pub fn description(&self) -> &str {
        &self.descriptor().description
    }

    /// The unit values are recorded in.
    pub fn unit(&self) -> &str {
        &self.descriptor().unit
    }

    /// The kind of value this measure records.
    pub fn kind(&self) -> MeasureKind {
        match self {
            Measure::Double(_) => MeasureKind::Double,
            Measure::Long(_) => MeasureKind::Long,
        }
    }
}

impl From<MeasureDouble> for Measure {
    fn from(measure: MeasureDouble) -> Self {
        Measure::Double(measure)
    }
}

impl From<MeasureLong> for Measure {
    fn from(measure: MeasureLong) -> Self {
        Measure::Long(measure)
    }
}
