//! One-time material classification of the loaded room.
//!
//! Every mesh is matched against an ordered rule table by lower-cased name;
//! the first rule that matches decides its material and which working set it
//! joins. Interactive-target registration is checked separately so a target
//! still receives whichever material its name selects.

use crate::constants::*;
use crate::scene::{
    MeshId, Material, SceneGraph, Shading, TextureRef, TextureSampling, VideoSlot,
};

pub const TARGET_PREFIX: &str = "target_";

/// Decorative curves that glow with the logos despite their generic names.
pub const RESERVED_LOGO_CURVES: [&str; 3] = ["curve022", "curve023", "curve024"];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Category {
    Screen,
    Painting,
    Alpha,
    GlowingText,
    GlowingLogo,
    ClockHourHand,
    ClockMinuteHand,
    ClockSecondsHand,
    ChairTop,
    Baked,
}

#[derive(Clone, Copy, Debug)]
pub enum NamePattern {
    StartsWith(&'static str),
    Contains(&'static str),
    StartsWithAny(&'static [&'static str]),
}

impl NamePattern {
    /// `name` must already be lower-cased.
    pub fn matches(&self, name: &str) -> bool {
        match self {
            NamePattern::StartsWith(p) => name.starts_with(p),
            NamePattern::Contains(p) => name.contains(p),
            NamePattern::StartsWithAny(ps) => ps.iter().any(|p| name.starts_with(p)),
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Rule {
    pub pattern: NamePattern,
    pub category: Category,
}

const LOGO_PREFIXES: &[&str] = &[
    "logo_",
    RESERVED_LOGO_CURVES[0],
    RESERVED_LOGO_CURVES[1],
    RESERVED_LOGO_CURVES[2],
];

/// Evaluated top to bottom; first match wins. Unmatched names are `Baked`.
pub const RULES: &[Rule] = &[
    Rule {
        pattern: NamePattern::Contains("screen"),
        category: Category::Screen,
    },
    Rule {
        pattern: NamePattern::Contains("painting"),
        category: Category::Painting,
    },
    Rule {
        pattern: NamePattern::Contains("alpha"),
        category: Category::Alpha,
    },
    Rule {
        pattern: NamePattern::StartsWith("text_"),
        category: Category::GlowingText,
    },
    Rule {
        pattern: NamePattern::StartsWithAny(LOGO_PREFIXES),
        category: Category::GlowingLogo,
    },
    Rule {
        pattern: NamePattern::Contains("clock_hourhand"),
        category: Category::ClockHourHand,
    },
    Rule {
        pattern: NamePattern::Contains("clock_minutehand"),
        category: Category::ClockMinuteHand,
    },
    Rule {
        pattern: NamePattern::Contains("clock_secondshand"),
        category: Category::ClockSecondsHand,
    },
    Rule {
        pattern: NamePattern::Contains("chair_top"),
        category: Category::ChairTop,
    },
];

#[inline]
pub fn is_interactive_target(name: &str) -> bool {
    name.to_lowercase().starts_with(TARGET_PREFIX)
}

pub fn classify_name(name: &str) -> Category {
    let lower = name.to_lowercase();
    RULES
        .iter()
        .find(|r| r.pattern.matches(&lower))
        .map(|r| r.category)
        .unwrap_or(Category::Baked)
}

/// Material a category receives, built only from the mesh's source texture.
pub fn material_for(category: Category, source_map: Option<TextureRef>) -> Material {
    match category {
        Category::Screen => video_material(VideoSlot::Monitor),
        Category::Painting => video_material(VideoSlot::Painting),
        Category::Alpha => Material {
            color: ALPHA_TINT_RGB,
            opacity: ALPHA_OPACITY,
            transparent: true,
            double_sided: true,
            depth_write: false,
            ..Material::unlit(source_map)
        },
        Category::GlowingText => Material {
            shading: Shading::Lit,
            emissive: TEXT_GLOW_RGB,
            emissive_intensity: TEXT_GLOW_BASELINE,
            tone_mapped: false,
            ..Material::unlit(source_map)
        },
        Category::GlowingLogo => Material {
            shading: Shading::Lit,
            emissive_map: source_map,
            emissive: LOGO_GLOW_RGB,
            emissive_intensity: LOGO_GLOW_BASELINE,
            tone_mapped: false,
            ..Material::unlit(source_map)
        },
        Category::ClockHourHand
        | Category::ClockMinuteHand
        | Category::ClockSecondsHand
        | Category::ChairTop
        | Category::Baked => Material::unlit(source_map),
    }
}

fn video_material(slot: VideoSlot) -> Material {
    Material {
        opacity: VIDEO_OPACITY,
        transparent: true,
        ..Material::unlit(Some(TextureRef::Video(slot)))
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ClockHands {
    pub hour: Option<MeshId>,
    pub minute: Option<MeshId>,
    pub seconds: Option<MeshId>,
}

impl ClockHands {
    pub fn all(&self) -> Option<(MeshId, MeshId, MeshId)> {
        Some((self.hour?, self.minute?, self.seconds?))
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChairHandle {
    pub mesh: MeshId,
    pub rest_yaw: f32,
}

/// Working sets filled by the classifier and read by the per-frame core.
#[derive(Clone, Debug, Default)]
pub struct CategorySets {
    pub glowing_text: Vec<MeshId>,
    pub glowing_logo: Vec<MeshId>,
    pub interactive_targets: Vec<MeshId>,
    pub clock: ClockHands,
    pub chair: Option<ChairHandle>,
}

fn push_unique(set: &mut Vec<MeshId>, id: MeshId) {
    if !set.contains(&id) {
        set.push(id);
    }
}

impl CategorySets {
    pub fn is_empty(&self) -> bool {
        self.glowing_text.is_empty()
            && self.glowing_logo.is_empty()
            && self.interactive_targets.is_empty()
            && self.clock == ClockHands::default()
            && self.chair.is_none()
    }

    /// Which material category holds `id`, if it is in any set or handle.
    pub fn category_of(&self, id: MeshId) -> Option<Category> {
        if self.glowing_text.contains(&id) {
            return Some(Category::GlowingText);
        }
        if self.glowing_logo.contains(&id) {
            return Some(Category::GlowingLogo);
        }
        let ClockHands {
            hour,
            minute,
            seconds,
        } = self.clock;
        if hour == Some(id) {
            return Some(Category::ClockHourHand);
        }
        if minute == Some(id) {
            return Some(Category::ClockMinuteHand);
        }
        if seconds == Some(id) {
            return Some(Category::ClockSecondsHand);
        }
        match self.chair {
            Some(c) if c.mesh == id => Some(Category::ChairTop),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClassifyReport {
    pub meshes: usize,
    pub sharpened_textures: usize,
    pub targets: usize,
    pub screens: usize,
    pub paintings: usize,
    pub alpha: usize,
    pub glowing_text: usize,
    pub glowing_logo: usize,
    pub clock_hands: usize,
    pub chair: bool,
    pub baked: usize,
}

/// Classify every mesh in `scene`, rewrite its material and fill `sets`.
///
/// `max_anisotropy` comes from the rendering host's capability query.
pub fn classify_scene(
    scene: &mut SceneGraph,
    sets: &mut CategorySets,
    max_anisotropy: u16,
) -> ClassifyReport {
    let mut report = ClassifyReport::default();
    let sharpest = TextureSampling::sharpest(max_anisotropy);

    for i in 0..scene.nodes.len() {
        let (id, name, source_map, has_material, yaw) = {
            let n = &scene.nodes[i];
            (
                n.id,
                n.name.clone(),
                n.source_map,
                n.has_material,
                n.transform.rotation.y,
            )
        };
        report.meshes += 1;

        if has_material {
            if let Some(tex) = source_map {
                if let Some(image) = scene.image_mut(tex) {
                    if image.sampling != sharpest {
                        image.sampling = sharpest;
                        report.sharpened_textures += 1;
                    }
                }
            }
        }

        if is_interactive_target(&name) {
            push_unique(&mut sets.interactive_targets, id);
            report.targets += 1;
        }

        let category = classify_name(&name);
        match category {
            Category::Screen => report.screens += 1,
            Category::Painting => report.paintings += 1,
            Category::Alpha => report.alpha += 1,
            Category::GlowingText => {
                push_unique(&mut sets.glowing_text, id);
                report.glowing_text += 1;
            }
            Category::GlowingLogo => {
                push_unique(&mut sets.glowing_logo, id);
                report.glowing_logo += 1;
            }
            Category::ClockHourHand => {
                sets.clock.hour = Some(id);
                report.clock_hands += 1;
            }
            Category::ClockMinuteHand => {
                sets.clock.minute = Some(id);
                report.clock_hands += 1;
            }
            Category::ClockSecondsHand => {
                sets.clock.seconds = Some(id);
                report.clock_hands += 1;
            }
            Category::ChairTop => {
                // The rest pose is the authored yaw; a second pass must not
                // capture a mid-sway angle.
                match sets.chair {
                    Some(c) if c.mesh == id => {}
                    _ => {
                        sets.chair = Some(ChairHandle {
                            mesh: id,
                            rest_yaw: yaw,
                        })
                    }
                }
                report.chair = true;
            }
            Category::Baked => report.baked += 1,
        }

        scene.nodes[i].material = material_for(category, source_map.map(TextureRef::Image));
    }

    log::info!(
        "[classify] meshes={} targets={} glow_text={} glow_logo={} clock_hands={} chair={} sharpened={}",
        report.meshes,
        report.targets,
        report.glowing_text,
        report.glowing_logo,
        report.clock_hands,
        report.chair,
        report.sharpened_textures
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rule_order_puts_video_before_alpha() {
        assert_eq!(classify_name("Screen_Alpha"), Category::Screen);
        assert_eq!(classify_name("painting_alpha_frame"), Category::Painting);
    }

    #[test]
    fn logo_rule_accepts_reserved_curves() {
        assert_eq!(classify_name("Curve022"), Category::GlowingLogo);
        assert_eq!(classify_name("curve024.001"), Category::GlowingLogo);
        assert_eq!(classify_name("curve021"), Category::Baked);
    }

    #[test]
    fn prefix_rules_do_not_match_mid_name() {
        assert_eq!(classify_name("my_text_panel"), Category::Baked);
        assert!(!is_interactive_target("lamp_target_01"));
    }
}
