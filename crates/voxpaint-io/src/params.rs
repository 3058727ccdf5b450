use serde::{Deserialize, Serialize};

/// Render knobs carried through save files untouched.
///
/// Missing fields fall back to their defaults when read.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SceneParameters {
    pub indirect_light_intensity: f64,
    pub sun_intensity: f64,
    pub normal_strength: f64,
    pub focus_distance: f64,
    pub f_stop: f64,
    /// Hex RGB without a leading `#`.
    pub sky_color: String,
}

impl Default for SceneParameters {
    fn default() -> Self {
        Self {
            indirect_light_intensity: 4.0,
            sun_intensity: 6.0,
            normal_strength: 2.5,
            focus_distance: 200.0,
            f_stop: 6.0,
            sky_color: "87ceeb".to_string(),
        }
    }
}

impl SceneParameters {
    /// Set a parameter by its document key. Returns false for an unknown key
    /// or a value that does not parse.
    pub fn set(&mut self, key: &str, value: &str) -> bool {
        let slot = match key {
            "indirectLightIntensity" => &mut self.indirect_light_intensity,
            "sunIntensity" => &mut self.sun_intensity,
            "normalStrength" => &mut self.normal_strength,
            "focusDistance" => &mut self.focus_distance,
            "fStop" => &mut self.f_stop,
            "skyColor" => {
                let hex = value.trim_start_matches('#');
                if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
                    return false;
                }
                self.sky_color = hex.to_ascii_lowercase();
                return true;
            }
            _ => return false,
        };
        match value.parse::<f64>() {
            Ok(v) if v.is_finite() => {
                *slot = v;
                true
            }
            _ => false,
        }
    }
}
