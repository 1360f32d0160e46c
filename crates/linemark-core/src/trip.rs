//! Trip-character dispatch for the inline parser.
//!
//! Every inline rule registers the "trip" bytes that can open it. The
//! [`TripChart`] maps a first byte to the ordered list of rules willing to
//! attempt a match there, so the scanner only consults rules that could
//! possibly succeed instead of offering every position to every rule.
//!
//! The chart is built once per parser configuration and is read-only
//! afterward; rule order within an entry is the fixed priority order, and
//! the first rule to match wins.

/// The closed set of inline parsing rules.
///
/// Declaration order in [`InlineRule::ALL`] is priority order: when two
/// rules share a trip byte (strong and emphasis both trip on `*` and `_`),
/// the earlier one attempts first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InlineRule {
    /// Backslash escape of a punctuation character.
    Escape,
    /// `` `code` `` span.
    CodeSpan,
    /// `![alt](src)` image.
    Image,
    /// `[label](url)` link.
    Link,
    /// `**strong**` / `__strong__`.
    Strong,
    /// `*emphasis*` / `_emphasis_`.
    Emphasis,
}

impl InlineRule {
    /// All rules in priority order.
    pub(crate) const ALL: [InlineRule; 6] = [
        InlineRule::Escape,
        InlineRule::CodeSpan,
        InlineRule::Image,
        InlineRule::Link,
        InlineRule::Strong,
        InlineRule::Emphasis,
    ];

    /// The bytes that can open this rule.
    pub(crate) fn trip_bytes(self) -> &'static [u8] {
        match self {
            InlineRule::Escape => b"\\",
            InlineRule::CodeSpan => b"`",
            InlineRule::Image => b"!",
            InlineRule::Link => b"[",
            InlineRule::Strong => b"*_",
            InlineRule::Emphasis => b"*_",
        }
    }
}

/// Precomputed first-byte dispatch table.
///
/// Lookup is a single index; entries hold the candidate rules in priority
/// order. Only ASCII bytes can be trip characters.
pub(crate) struct TripChart {
    rules: [Vec<InlineRule>; 128],
    is_trip: [bool; 128],
}

impl TripChart {
    /// Build the chart from the registered rule set.
    pub(crate) fn new() -> Self {
        let mut rules: [Vec<InlineRule>; 128] = std::array::from_fn(|_| Vec::new());
        let mut is_trip = [false; 128];
        for rule in InlineRule::ALL {
            for &b in rule.trip_bytes() {
                debug_assert!(b < 128, "trip characters must be ASCII");
                rules[b as usize].push(rule);
                is_trip[b as usize] = true;
            }
        }
        Self { rules, is_trip }
    }

    /// Candidate rules for a first byte, in priority order. Empty for
    /// non-trip bytes.
    #[inline(always)]
    pub(crate) fn rules_for(&self, b: u8) -> &[InlineRule] {
        if b < 128 {
            &self.rules[b as usize]
        } else {
            &[]
        }
    }

    /// Whether a byte can open any inline construct.
    #[inline(always)]
    pub(crate) fn is_trip(&self, b: u8) -> bool {
        b < 128 && self.is_trip[b as usize]
    }

    /// Position of the first trip byte in `bytes`, if any.
    #[inline]
    pub(crate) fn find_next_trip(&self, bytes: &[u8]) -> Option<usize> {
        bytes.iter().position(|&b| self.is_trip(b))
    }
}
