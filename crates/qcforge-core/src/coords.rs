//! The coordinate placeholder contract between this system and its host.
//!
//! Generated input text never contains real atomic coordinates. Each file
//! that needs geometry carries exactly one `$$coords:<tag>$$` token, where
//! the tag names the formatting convention the target engine expects; the
//! host substitutes formatted coordinates after the response envelope is
//! returned, and this system never touches the token again.

/// Leading delimiter of every placeholder token.
const TOKEN_PREFIX: &str = "$$coords:";

/// Coordinate formatting conventions the host knows how to substitute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CoordsFormat {
    /// `Sxyz` — element symbol followed by plain Cartesian columns.
    Plain,
    /// `___Sxyz` — column-aligned symbol and Cartesian coordinates.
    Aligned,
    /// `Sx0y0z0` — Cartesian columns with per-axis optimization flags off.
    OptFlagsOff,
    /// `Sx1y1z1` — Cartesian columns with per-axis optimization flags on.
    OptFlagsOn,
}

impl CoordsFormat {
    /// The variant tag between `$$coords:` and the closing `$$`.
    pub fn tag(&self) -> &'static str {
        match self {
            CoordsFormat::Plain => "Sxyz",
            CoordsFormat::Aligned => "___Sxyz",
            CoordsFormat::OptFlagsOff => "Sx0y0z0",
            CoordsFormat::OptFlagsOn => "Sx1y1z1",
        }
    }

    /// The full placeholder token embedded in generated text.
    pub fn token(&self) -> String {
        format!("{}{}$$", TOKEN_PREFIX, self.tag())
    }
}

/// Counts placeholder tokens of any variant in generated text.
pub fn count_tokens(text: &str) -> usize {
    text.matches(TOKEN_PREFIX).count()
}
