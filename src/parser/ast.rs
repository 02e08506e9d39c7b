//! Parsed forms of CSS grid values

use std::fmt;

/// Absolute and relative length units accepted in sizing fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthUnit {
    Px,
    Em,
    Rem,
    Percent,
    Vw,
    Vh,
    Vmin,
    Vmax,
    Ch,
    Ex,
    Cm,
    Mm,
    In,
    Pt,
    Pc,
}

impl LengthUnit {
    pub fn from_suffix(unit: &str) -> Option<Self> {
        let unit = match unit {
            "px" => LengthUnit::Px,
            "em" => LengthUnit::Em,
            "rem" => LengthUnit::Rem,
            "vw" => LengthUnit::Vw,
            "vh" => LengthUnit::Vh,
            "vmin" => LengthUnit::Vmin,
            "vmax" => LengthUnit::Vmax,
            "ch" => LengthUnit::Ch,
            "ex" => LengthUnit::Ex,
            "cm" => LengthUnit::Cm,
            "mm" => LengthUnit::Mm,
            "in" => LengthUnit::In,
            "pt" => LengthUnit::Pt,
            "pc" => LengthUnit::Pc,
            _ => return None,
        };
        Some(unit)
    }

    pub fn suffix(self) -> &'static str {
        match self {
            LengthUnit::Px => "px",
            LengthUnit::Em => "em",
            LengthUnit::Rem => "rem",
            LengthUnit::Percent => "%",
            LengthUnit::Vw => "vw",
            LengthUnit::Vh => "vh",
            LengthUnit::Vmin => "vmin",
            LengthUnit::Vmax => "vmax",
            LengthUnit::Ch => "ch",
            LengthUnit::Ex => "ex",
            LengthUnit::Cm => "cm",
            LengthUnit::Mm => "mm",
            LengthUnit::In => "in",
            LengthUnit::Pt => "pt",
            LengthUnit::Pc => "pc",
        }
    }
}

/// A length or percentage; unitless zero is stored as `0px`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Length {
    pub value: f64,
    pub unit: LengthUnit,
}

impl Length {
    pub fn new(value: f64, unit: LengthUnit) -> Self {
        Self { value, unit }
    }

    pub fn zero() -> Self {
        Self::new(0.0, LengthUnit::Px)
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value, self.unit.suffix())
    }
}

/// Minimum or maximum size of a track
#[derive(Debug, Clone, PartialEq)]
pub enum Breadth {
    Length(Length),
    Flex(f64),
    Auto,
    MinContent,
    MaxContent,
    /// `calc()`, `var()` and friends, kept opaque
    Computed(String),
}

impl Breadth {
    pub fn is_flex(&self) -> bool {
        matches!(self, Breadth::Flex(_))
    }
}

/// One track definition
#[derive(Debug, Clone, PartialEq)]
pub enum TrackSize {
    Breadth(Breadth),
    MinMax(Breadth, Breadth),
    FitContent(Breadth),
}

impl TrackSize {
    pub fn uses_flex(&self) -> bool {
        match self {
            TrackSize::Breadth(b) | TrackSize::FitContent(b) => b.is_flex(),
            TrackSize::MinMax(min, max) => min.is_flex() || max.is_flex(),
        }
    }
}

/// Repetition count of `repeat()`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepeatCount {
    Count(u32),
    AutoFit,
    AutoFill,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TrackEntry {
    LineNames(Vec<String>),
    Track(TrackSize),
    Repeat {
        count: RepeatCount,
        entries: Vec<TrackEntry>,
    },
}

impl TrackEntry {
    fn track_count(&self) -> usize {
        match self {
            TrackEntry::LineNames(_) => 0,
            TrackEntry::Track(_) => 1,
            TrackEntry::Repeat { count, entries } => {
                let inner: usize = entries.iter().map(TrackEntry::track_count).sum();
                match count {
                    RepeatCount::Count(n) => inner * (*n as usize),
                    RepeatCount::AutoFit | RepeatCount::AutoFill => inner,
                }
            }
        }
    }

    fn tracks(&self) -> Box<dyn Iterator<Item = &TrackSize> + '_> {
        match self {
            TrackEntry::LineNames(_) => Box::new(std::iter::empty()),
            TrackEntry::Track(track) => Box::new(std::iter::once(track)),
            TrackEntry::Repeat { entries, .. } => {
                Box::new(entries.iter().flat_map(TrackEntry::tracks))
            }
        }
    }
}

/// A parsed `grid-template-columns`/`grid-template-rows` value
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TrackList {
    pub entries: Vec<TrackEntry>,
}

impl TrackList {
    /// Number of explicit tracks, expanding fixed `repeat()` counts;
    /// an auto-repeat counts its pattern once
    pub fn track_count(&self) -> usize {
        self.entries.iter().map(TrackEntry::track_count).sum()
    }

    fn repeat_counts(&self) -> impl Iterator<Item = RepeatCount> + '_ {
        self.entries.iter().filter_map(|e| match e {
            TrackEntry::Repeat { count, .. } => Some(*count),
            _ => None,
        })
    }

    /// Whether the list contains `repeat(auto-fit, ...)` or `repeat(auto-fill, ...)`
    pub fn has_auto_repeat(&self) -> bool {
        self.repeat_counts()
            .any(|c| matches!(c, RepeatCount::AutoFit | RepeatCount::AutoFill))
    }

    pub fn has_auto_fit(&self) -> bool {
        self.repeat_counts().any(|c| c == RepeatCount::AutoFit)
    }

    pub fn uses_minmax(&self) -> bool {
        self.entries
            .iter()
            .flat_map(TrackEntry::tracks)
            .any(|t| matches!(t, TrackSize::MinMax(..)))
    }

    pub fn uses_flex(&self) -> bool {
        self.entries
            .iter()
            .flat_map(TrackEntry::tracks)
            .any(TrackSize::uses_flex)
    }

    /// Track count when it does not depend on the container size
    pub fn definite_track_count(&self) -> Option<usize> {
        if self.has_auto_repeat() {
            None
        } else {
            Some(self.track_count())
        }
    }
}

/// A sizing or gap value
#[derive(Debug, Clone, PartialEq)]
pub enum SizeValue {
    Length(Length),
    Keyword(String),
    Computed(String),
}

/// A grid line reference in `grid-column-start` and friends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridLine {
    Auto,
    Line(i32),
    Span(u32),
}
