//! Responsive breakpoint tiers

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

/// One of the fixed, ordered responsive size classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Breakpoint {
    Xs,
    Sm,
    Md,
    Lg,
    Xl,
    Xxl,
    Xxxl,
}

impl Breakpoint {
    /// All tiers, smallest first
    pub const ALL: [Breakpoint; 7] = [
        Breakpoint::Xs,
        Breakpoint::Sm,
        Breakpoint::Md,
        Breakpoint::Lg,
        Breakpoint::Xl,
        Breakpoint::Xxl,
        Breakpoint::Xxxl,
    ];

    /// Prefix used to build host property keys (`smColumns`, `mdEnabled`, ...)
    pub fn prefix(self) -> &'static str {
        match self {
            Breakpoint::Xs => "xs",
            Breakpoint::Sm => "sm",
            Breakpoint::Md => "md",
            Breakpoint::Lg => "lg",
            Breakpoint::Xl => "xl",
            Breakpoint::Xxl => "xxl",
            Breakpoint::Xxxl => "xxxl",
        }
    }

    /// User-facing label used in diagnostics
    pub fn label(self) -> &'static str {
        match self {
            Breakpoint::Xs => "Extra Small",
            Breakpoint::Sm => "Small",
            Breakpoint::Md => "Medium",
            Breakpoint::Lg => "Large",
            Breakpoint::Xl => "Extra Large",
            Breakpoint::Xxl => "2X Large",
            Breakpoint::Xxxl => "4K",
        }
    }

    /// Viewport width (px) at which the tier starts to apply
    pub fn min_width(self) -> u32 {
        match self {
            Breakpoint::Xs => 0,
            Breakpoint::Sm => 640,
            Breakpoint::Md => 768,
            Breakpoint::Lg => 1024,
            Breakpoint::Xl => 1280,
            Breakpoint::Xxl => 1536,
            Breakpoint::Xxxl => 2560,
        }
    }

    /// Key of the tier's on/off switch, e.g. `mdEnabled`
    pub fn enabled_key(self) -> String {
        format!("{}Enabled", self.prefix())
    }
}

impl fmt::Display for Breakpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

impl FromStr for Breakpoint {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Breakpoint::ALL
            .into_iter()
            .find(|bp| bp.prefix().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                let valid: Vec<_> = Breakpoint::ALL.iter().map(|bp| bp.prefix()).collect();
                format!("unknown breakpoint '{}' (expected one of {})", s, valid.join(", "))
            })
    }
}

/// One value per breakpoint tier
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, bound(deserialize = "T: Deserialize<'de> + Default"))]
pub struct PerBreakpoint<T> {
    pub xs: T,
    pub sm: T,
    pub md: T,
    pub lg: T,
    pub xl: T,
    pub xxl: T,
    pub xxxl: T,
}

impl<T> PerBreakpoint<T> {
    pub fn get(&self, tier: Breakpoint) -> &T {
        match tier {
            Breakpoint::Xs => &self.xs,
            Breakpoint::Sm => &self.sm,
            Breakpoint::Md => &self.md,
            Breakpoint::Lg => &self.lg,
            Breakpoint::Xl => &self.xl,
            Breakpoint::Xxl => &self.xxl,
            Breakpoint::Xxxl => &self.xxxl,
        }
    }

    pub fn get_mut(&mut self, tier: Breakpoint) -> &mut T {
        match tier {
            Breakpoint::Xs => &mut self.xs,
            Breakpoint::Sm => &mut self.sm,
            Breakpoint::Md => &mut self.md,
            Breakpoint::Lg => &mut self.lg,
            Breakpoint::Xl => &mut self.xl,
            Breakpoint::Xxl => &mut self.xxl,
            Breakpoint::Xxxl => &mut self.xxxl,
        }
    }

    /// Iterate tiers in ascending order
    pub fn iter(&self) -> impl Iterator<Item = (Breakpoint, &T)> + '_ {
        Breakpoint::ALL.into_iter().map(move |tier| (tier, self.get(tier)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tiers_are_ordered_by_width() {
        let widths: Vec<u32> = Breakpoint::ALL.iter().map(|bp| bp.min_width()).collect();
        let mut sorted = widths.clone();
        sorted.sort();
        assert_eq!(widths, sorted);
    }

    #[test]
    fn test_parse_prefix() {
        assert_eq!("md".parse::<Breakpoint>(), Ok(Breakpoint::Md));
        assert_eq!("XXXL".parse::<Breakpoint>(), Ok(Breakpoint::Xxxl));
        assert!("huge".parse::<Breakpoint>().is_err());
    }

    #[test]
    fn test_per_breakpoint_iter_order() {
        let mut values = PerBreakpoint::<u8>::default();
        *values.get_mut(Breakpoint::Lg) = 4;
        let collected: Vec<_> = values.iter().map(|(bp, v)| (bp.prefix(), *v)).collect();
        assert_eq!(collected[3], ("lg", 4));
        assert_eq!(collected.len(), 7);
    }
}
