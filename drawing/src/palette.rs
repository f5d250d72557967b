//! Lookup tables that drive layer and type inference.
//!
//! The generator encodes layers as group classes and discipline colors. These
//! tables hold that knowledge as data so a palette change never touches the
//! inference code. [`InferenceTables::default`] carries the generator's values.
//!
//! Inference chain (first hit wins):
//!
//! | Step | Layer | Kind |
//! |------|-------|------|
//! | 1 | `data-layer` on the node | `data-type` on the node |
//! | 2 | nearest ancestor marker (`data-layer` or `layer-*` class) | class / id keywords |
//! | 3 | own class-word match | layer-implied kind for 2-point lines |
//! | 4 | stroke, then fill, against discipline palettes | tag-name fallback |
//! | 5 | architectural | |

#[cfg(test)]
#[path = "palette_test.rs"]
mod palette_test;

use crate::model::{ElementKind, Layer};

/// Color → layer, layer-marker class → layer, and keyword → kind tables.
#[derive(Debug, Clone)]
pub struct InferenceTables {
    /// Normalized `#rrggbb` colors per discipline layer, checked in order.
    pub palettes: Vec<(Layer, Vec<String>)>,
    /// Group classes that mark every descendant as belonging to a layer.
    /// `None` means "MEP, subsystem refined by color" (defaults to HVAC).
    pub markers: Vec<(String, Option<Layer>)>,
    /// Class words on the element itself that name a layer.
    pub layer_words: Vec<(String, Layer)>,
    /// Class / id keywords that name an element kind, checked in order.
    pub kind_words: Vec<(String, ElementKind)>,
}

impl Default for InferenceTables {
    fn default() -> Self {
        let palettes = vec![
            (Layer::Structural, colors(&["#8a5a3c", "#6d4a34", "#6f4f38", "#a0522d", "#8b4513"])),
            (Layer::MepHvac, colors(&["#2d6f8e", "#dceef4"])),
            (Layer::MepElectrical, colors(&["#d97927", "#fde8d1"])),
            (Layer::MepPlumbing, colors(&["#2b77c3", "#d95c5c", "#4d9c6f", "#8d8d8d", "#c0392b"])),
        ];
        let markers = [
            ("layer-arch", Some(Layer::Architectural)),
            ("layer-struct", Some(Layer::Structural)),
            ("layer-mep", None),
            ("layer-hvac", Some(Layer::MepHvac)),
            ("layer-electrical", Some(Layer::MepElectrical)),
            ("layer-plumbing", Some(Layer::MepPlumbing)),
            ("layer-axes", Some(Layer::Grid)),
            ("layer-grid", Some(Layer::Grid)),
            ("layer-dims", Some(Layer::Dimensions)),
            ("layer-legend", Some(Layer::Annotations)),
            ("layer-annotations", Some(Layer::Annotations)),
            ("layer-furniture", Some(Layer::Furniture)),
        ]
        .into_iter()
        .map(|(class, layer)| (class.to_owned(), layer))
        .collect();
        let layer_words = [
            ("structural", Layer::Structural),
            ("struct", Layer::Structural),
            ("hvac", Layer::MepHvac),
            ("electrical", Layer::MepElectrical),
            ("plumbing", Layer::MepPlumbing),
            ("axis", Layer::Grid),
            ("axes", Layer::Grid),
            ("dims", Layer::Dimensions),
            ("legend", Layer::Annotations),
            ("furniture", Layer::Furniture),
        ]
        .into_iter()
        .map(|(word, layer)| (word.to_owned(), layer))
        .collect();
        // Substring match in order: a word must precede any shorter word it contains.
        let kind_words = [
            ("elevator", ElementKind::Elevator),
            ("dimension", ElementKind::Dimension),
            ("window", ElementKind::Window),
            ("column", ElementKind::Column),
            ("stair", ElementKind::Stairs),
            ("space", ElementKind::Space),
            ("room", ElementKind::Space),
            ("wall", ElementKind::Wall),
            ("door", ElementKind::Door),
            ("beam", ElementKind::Beam),
            ("core", ElementKind::Core),
            ("duct", ElementKind::Duct),
            ("pipe", ElementKind::Pipe),
            ("grid", ElementKind::GridLine),
            ("text", ElementKind::Text),
            ("label", ElementKind::Text),
            ("dim", ElementKind::Dimension),
        ]
        .into_iter()
        .map(|(word, kind)| (word.to_owned(), kind))
        .collect();
        Self { palettes, markers, layer_words, kind_words }
    }
}

fn colors(raw: &[&str]) -> Vec<String> {
    raw.iter().map(|c| (*c).to_owned()).collect()
}

impl InferenceTables {
    /// Layer for a normalized color, if any discipline palette contains it.
    #[must_use]
    pub fn layer_for_color(&self, color: &str) -> Option<Layer> {
        self.palettes
            .iter()
            .find(|(_, colors)| colors.iter().any(|c| c == color))
            .map(|(layer, _)| *layer)
    }

    /// MEP subsystem for a color, used to refine a generic `layer-mep` marker.
    #[must_use]
    pub fn mep_layer_for_color(&self, color: &str) -> Option<Layer> {
        self.layer_for_color(color).filter(|layer| layer.is_mep())
    }

    /// Marker entry for a single class token.
    #[must_use]
    pub fn marker(&self, class: &str) -> Option<Option<Layer>> {
        self.markers
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(class))
            .map(|(_, layer)| *layer)
    }

    /// Layer named by one of the element's own class words.
    #[must_use]
    pub fn layer_for_class(&self, class: &str) -> Option<Layer> {
        class.split_ascii_whitespace().find_map(|token| {
            let token = token.to_ascii_lowercase();
            token
                .split(['-', '_'])
                .find_map(|word| self.layer_words.iter().find(|(w, _)| w == word).map(|(_, l)| *l))
        })
    }

    /// Kind named by a keyword contained in `haystack` (class list or id).
    #[must_use]
    pub fn kind_for_keywords(&self, haystack: &str) -> Option<ElementKind> {
        let haystack = haystack.to_ascii_lowercase();
        self.kind_words
            .iter()
            .find(|(word, _)| haystack.contains(word.as_str()))
            .map(|(_, kind)| *kind)
    }
}

/// Normalize a color to lower-case `#rrggbb`. Hex and named colors are
/// resolved through `svgtypes`; anything else (`none`, `url(...)`) is
/// lower-cased and trimmed but otherwise unchanged.
#[must_use]
pub fn normalize_color(raw: &str) -> String {
    let lower = raw.trim().to_ascii_lowercase();
    match lower.parse::<svgtypes::Color>() {
        Ok(color) => format!("#{:02x}{:02x}{:02x}", color.red, color.green, color.blue),
        Err(_) => lower,
    }
}
