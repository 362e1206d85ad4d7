//! Enumerations.

/// One named value of an enumeration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnumValue {
    pub name: String,
    pub value: i64,
}

/// A named set of symbolic integer values usable as a parameter type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Enumeration {
    /// Enumeration name.
    pub name: String,
    /// Values in declaration order.
    pub values: Vec<EnumValue>,
}

impl Enumeration {
    /// Creates an enumeration numbering `names` from zero.
    pub fn sequential<I, S>(name: impl Into<String>, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values = names
            .into_iter()
            .enumerate()
            .map(|(i, n)| EnumValue {
                name: n.into(),
                value: i as i64,
            })
            .collect();
        Self {
            name: name.into(),
            values,
        }
    }

    /// Symbol of the generated string table.
    pub fn strings_symbol(&self) -> String {
        format!("{}Strings", self.name)
    }

    /// Symbol of the generated value count.
    pub fn count_symbol(&self) -> String {
        format!("Num_{}", self.name)
    }
}
