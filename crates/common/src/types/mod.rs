use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug)]
pub struct Health {
    pub status: &'static str,
}

/// Person record as exchanged over HTTP and held by the stores.
///
/// `color_id` is the source of truth for the color; `color` is the display
/// name derived from the color table. `color_id == 0` with an empty `color`
/// means "no color assigned".
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(default)]
pub struct Person {
    pub id: i32,
    pub name: String,
    pub lastname: String,
    pub zipcode: String,
    pub city: String,
    pub color: String,
    #[serde(rename = "colorId")]
    pub color_id: i32,
}

impl Person {
    /// True when the caller supplied a color name.
    pub fn has_color_name(&self) -> bool {
        !self.color.trim().is_empty()
    }

    /// True when the caller supplied a color id.
    pub fn has_color_id(&self) -> bool {
        self.color_id != 0
    }
}
