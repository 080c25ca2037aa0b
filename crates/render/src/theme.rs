//! Color themes for the calendar figure.

use common::color::Color;

/// Figure colors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Theme {
    /// Background, also the face of future weeks.
    pub face: Color,
    /// Marker outlines.
    pub edge: Color,
    /// Labels, title and legend text.
    pub text: Color,
    /// Legend box outline.
    pub legend_edge: Color,
    /// Face of the "now" marker.
    pub highlight: Color,
}

impl Theme {
    /// White-on-black.
    pub const fn dark() -> Self {
        Self {
            face: Color::BLACK,
            edge: Color::WHITE,
            text: Color::WHITE,
            legend_edge: Color::rgb(204, 204, 204),
            highlight: Color::WHITE,
        }
    }

    /// Black-on-white.
    pub const fn light() -> Self {
        Self {
            face: Color::WHITE,
            edge: Color::BLACK,
            text: Color::BLACK,
            legend_edge: Color::rgb(204, 204, 204),
            highlight: Color::WHITE,
        }
    }

    pub fn is_dark(&self) -> bool {
        *self == Self::dark()
    }

    /// Legend background, slightly translucent over the grid.
    pub fn legend_face(&self) -> Color {
        self.face.with_opacity(0.8)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}
