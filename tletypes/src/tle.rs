use derive_more::Display;

/// Number of characters in each element line
pub const TLE_LINE_LENGTH: usize = 69;

/// Byte offset of the `YYDDD.DDDDDDDD` epoch field in line 1
pub const EPOCH_FIELD_OFFSET: usize = 18;

/// Width of the epoch field in line 1
pub const EPOCH_FIELD_LENGTH: usize = 14;

/// Two-line element set
/// https://en.wikipedia.org/wiki/Two-line_element_set
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default, Display)]
#[display(fmt = "{}", "satellite_name")]
pub struct TwoLineElementSet {
    pub satellite_name: String,
    pub line1: String,
    pub line2: String,
}

impl TwoLineElementSet {
    pub fn new<N, L1, L2>(satellite_name: N, line1: L1, line2: L2) -> Self
    where
        N: Into<String>,
        L1: Into<String>,
        L2: Into<String>,
    {
        Self {
            satellite_name: satellite_name.into(),
            line1: line1.into(),
            line2: line2.into(),
        }
    }

    /// The raw epoch field of line 1, if the line is long enough to hold one
    pub fn epoch_field(&self) -> Option<&str> {
        self.line1
            .get(EPOCH_FIELD_OFFSET..EPOCH_FIELD_OFFSET + EPOCH_FIELD_LENGTH)
    }

    /// NORAD catalog number as written in line 1
    pub fn catalog_number(&self) -> Option<&str> {
        self.line1.get(2..7).map(str::trim)
    }
}
