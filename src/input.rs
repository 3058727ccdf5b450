use std::fmt;
use std::str::FromStr;

use voxpaint_pick::Intent;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerButton {
    Left,
    Right,
    Middle,
}

impl FromStr for PointerButton {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "left" | "l" => Ok(PointerButton::Left),
            "right" | "r" => Ok(PointerButton::Right),
            "middle" | "m" => Ok(PointerButton::Middle),
            other => Err(format!("unknown pointer button '{other}'")),
        }
    }
}

/// What a left click paints with.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Selection {
    #[default]
    Eraser,
    Texture(String),
}

impl Selection {
    pub fn texture(&self) -> Option<&str> {
        match self {
            Selection::Texture(name) => Some(name.as_str()),
            Selection::Eraser => None,
        }
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::Eraser => f.write_str("eraser"),
            Selection::Texture(name) => write!(f, "texture '{name}'"),
        }
    }
}

/// Click policy: left paints with the selected texture or erases when the
/// eraser is selected, right always erases, other buttons do nothing.
pub fn intent_for(button: PointerButton, selection: &Selection) -> Option<Intent> {
    match (button, selection) {
        (PointerButton::Left, Selection::Texture(_)) => Some(Intent::Place),
        (PointerButton::Left, Selection::Eraser) => Some(Intent::Remove),
        (PointerButton::Right, _) => Some(Intent::Remove),
        (PointerButton::Middle, _) => None,
    }
}
