//! Orientation-aware template library of the smart wizard

use crate::model::SlotGeometry;
use crate::types::Orientation;

/// Orientation required at one template position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrientationRule {
    Landscape,
    Portrait,
    Square,
    Any,
}

impl OrientationRule {
    pub fn accepts(self, orientation: Orientation) -> bool {
        match self {
            OrientationRule::Any => true,
            OrientationRule::Landscape => orientation == Orientation::Landscape,
            OrientationRule::Portrait => orientation == Orientation::Portrait,
            OrientationRule::Square => orientation == Orientation::Square,
        }
    }
}

/// Named multi-photo layout with the orientations it expects
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmartTemplate {
    pub name: &'static str,
    /// Selection weight; higher is tried first and picked more often
    pub priority: u32,
    pub orientations: &'static [OrientationRule],
    pub geometry: &'static [SlotGeometry],
}

impl SmartTemplate {
    pub fn slot_count(&self) -> usize {
        self.orientations.len()
    }

    /// Whether the head of `queue` matches this template position by position
    pub fn matches(&self, queue: &[Orientation]) -> bool {
        queue.len() >= self.orientations.len()
            && self
                .orientations
                .iter()
                .zip(queue)
                .all(|(rule, &orientation)| rule.accepts(orientation))
    }
}

use OrientationRule::{Any, Landscape as L, Portrait as P, Square as S};

const fn g(relx: f32, rely: f32, relwidth: f32, relheight: f32) -> SlotGeometry {
    SlotGeometry::new(relx, rely, relwidth, relheight)
}

/// All smart templates in descending priority
pub static SMART_TEMPLATES: &[SmartTemplate] = &[
    // 5 photos
    SmartTemplate {
        name: "1_landscape_4_square",
        priority: 20,
        orientations: &[L, S, S, S, S],
        geometry: &[
            g(0.05, 0.05, 0.9, 0.55),
            g(0.05, 0.65, 0.2, 0.3),
            g(0.275, 0.65, 0.2, 0.3),
            g(0.5, 0.65, 0.2, 0.3),
            g(0.725, 0.65, 0.2, 0.3),
        ],
    },
    SmartTemplate {
        name: "1_portrait_4_landscape",
        priority: 19,
        orientations: &[P, L, L, L, L],
        geometry: &[
            g(0.05, 0.05, 0.4, 0.9),
            g(0.5, 0.05, 0.45, 0.2),
            g(0.5, 0.275, 0.45, 0.2),
            g(0.5, 0.5, 0.45, 0.2),
            g(0.5, 0.725, 0.45, 0.2),
        ],
    },
    // 4 photos
    SmartTemplate {
        name: "1_landscape_3_portrait",
        priority: 15,
        orientations: &[L, P, P, P],
        geometry: &[
            g(0.05, 0.05, 0.9, 0.5),
            g(0.05, 0.6, 0.28, 0.35),
            g(0.36, 0.6, 0.28, 0.35),
            g(0.67, 0.6, 0.28, 0.35),
        ],
    },
    SmartTemplate {
        name: "2_landscape_2_portrait",
        priority: 14,
        orientations: &[L, L, P, P],
        geometry: &[
            g(0.05, 0.05, 0.55, 0.42),
            g(0.05, 0.53, 0.55, 0.42),
            g(0.65, 0.05, 0.3, 0.42),
            g(0.65, 0.53, 0.3, 0.42),
        ],
    },
    SmartTemplate {
        name: "4_any_diamond",
        priority: 13,
        orientations: &[Any, Any, Any, Any],
        geometry: &[
            g(0.25, 0.05, 0.5, 0.4),
            g(0.05, 0.3, 0.4, 0.4),
            g(0.55, 0.3, 0.4, 0.4),
            g(0.25, 0.55, 0.5, 0.4),
        ],
    },
    // 3 photos
    SmartTemplate {
        name: "1_landscape_2_portrait",
        priority: 10,
        orientations: &[L, P, P],
        geometry: &[
            g(0.05, 0.05, 0.9, 0.55),
            g(0.1, 0.65, 0.35, 0.3),
            g(0.55, 0.65, 0.35, 0.3),
        ],
    },
    SmartTemplate {
        name: "2_portrait_1_landscape",
        priority: 9,
        orientations: &[P, P, L],
        geometry: &[
            g(0.05, 0.05, 0.42, 0.9),
            g(0.53, 0.05, 0.42, 0.42),
            g(0.53, 0.53, 0.42, 0.42),
        ],
    },
    SmartTemplate {
        name: "3_portrait",
        priority: 8,
        orientations: &[P, P, P],
        geometry: &[
            g(0.05, 0.1, 0.28, 0.8),
            g(0.36, 0.1, 0.28, 0.8),
            g(0.67, 0.1, 0.28, 0.8),
        ],
    },
    // 2 photos
    SmartTemplate {
        name: "2_landscape",
        priority: 7,
        orientations: &[L, L],
        geometry: &[g(0.05, 0.05, 0.9, 0.42), g(0.05, 0.53, 0.9, 0.42)],
    },
    SmartTemplate {
        name: "2_portrait",
        priority: 6,
        orientations: &[P, P],
        geometry: &[g(0.05, 0.1, 0.42, 0.8), g(0.53, 0.1, 0.42, 0.8)],
    },
    SmartTemplate {
        name: "1_portrait_1_landscape",
        priority: 5,
        orientations: &[P, L],
        geometry: &[g(0.05, 0.05, 0.4, 0.9), g(0.5, 0.3, 0.45, 0.4)],
    },
    // 1 photo
    SmartTemplate {
        name: "1_any",
        priority: 1,
        orientations: &[Any],
        geometry: &[g(0.05, 0.05, 0.9, 0.9)],
    },
];

/// Templates matching the head of `queue`, in descending priority
pub fn candidates(queue: &[Orientation]) -> Vec<&'static SmartTemplate> {
    SMART_TEMPLATES.iter().filter(|t| t.matches(queue)).collect()
}

pub fn find_template(name: &str) -> Option<&'static SmartTemplate> {
    SMART_TEMPLATES.iter().find(|t| t.name == name)
}
