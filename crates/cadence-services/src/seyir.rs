//! Makam seyir (melodic path) templates and modulation paths

use cadence_core::{build_scale, Mode, PitchClass};
use serde::Serialize;

/// A characteristic walk through a makam's degrees
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MakamTemplate {
    pub id: &'static str,
    pub label: &'static str,
    pub description: &'static str,
    /// 0-based scale degrees
    pub degrees: &'static [i32],
}

/// A walk inside `from` that prepares a move to `to`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MakamModulation {
    pub id: &'static str,
    pub label: &'static str,
    pub description: &'static str,
    pub from: Mode,
    pub to: Mode,
    pub degrees: &'static [i32],
}

static HICAZ_TEMPLATES: [MakamTemplate; 2] = [
    MakamTemplate {
        id: "hicaz_karar",
        label: "Hicaz karar walk",
        description: "Karar, güçlü, yeden, back to karar.",
        degrees: &[0, 4, 6, 0],
    },
    MakamTemplate {
        id: "hicaz_duygusal",
        label: "Hicaz lament",
        description: "Climbs from karar to yeden and falls back through güçlü.",
        degrees: &[0, 4, 6, 4, 0],
    },
];

static USSAK_TEMPLATES: [MakamTemplate; 2] = [
    MakamTemplate {
        id: "ussak_karar",
        label: "Uşşak karar seyir",
        description: "Alternates karar and güçlü.",
        degrees: &[0, 3, 0, 3, 0],
    },
    MakamTemplate {
        id: "ussak_uzanma",
        label: "Uşşak extension",
        description: "Karar, güçlü, the upper degree, güçlü, karar.",
        degrees: &[0, 3, 5, 3, 0],
    },
];

static HUSEYNI_TEMPLATES: [MakamTemplate; 2] = [
    MakamTemplate {
        id: "huseyni_karar",
        label: "Hüseynî plain seyir",
        description: "Karar and güçlü in alternation, suited to a song opening.",
        degrees: &[0, 4, 0, 4, 0],
    },
    MakamTemplate {
        id: "huseyni_yaygin",
        label: "Hüseynî common seyir",
        description: "Karar, third degree, güçlü, third degree, karar.",
        degrees: &[0, 2, 4, 2, 0],
    },
];

static KURDI_TEMPLATES: [MakamTemplate; 2] = [
    MakamTemplate {
        id: "kurdi_karar",
        label: "Kürdi karar seyir",
        description: "Alternates karar and güçlü.",
        degrees: &[0, 3, 0, 3, 0],
    },
    MakamTemplate {
        id: "kurdi_cikis",
        label: "Kürdi ascent",
        description: "Karar, third degree, güçlü, yeden, karar.",
        degrees: &[0, 2, 3, 6, 0],
    },
];

static HICAZ_MODULATIONS: [MakamModulation; 2] = [
    MakamModulation {
        id: "hicaz_to_huseyni",
        label: "Hicaz → Hüseynî",
        description: "Rises from karar to güçlü and settles into Hüseynî.",
        from: Mode::MakamHicaz,
        to: Mode::MakamHuseyni,
        degrees: &[0, 4, 2, 0],
    },
    MakamModulation {
        id: "hicaz_to_ussak",
        label: "Hicaz → Uşşak",
        description: "Stresses güçlü, then steps down into Uşşak colour.",
        from: Mode::MakamHicaz,
        to: Mode::MakamUssak,
        degrees: &[0, 4, 3, 0],
    },
];

static USSAK_MODULATIONS: [MakamModulation; 1] = [MakamModulation {
    id: "ussak_to_huseyni",
    label: "Uşşak → Hüseynî",
    description: "From Uşşak karar towards the Hüseynî güçlü.",
    from: Mode::MakamUssak,
    to: Mode::MakamHuseyni,
    degrees: &[0, 3, 4, 0],
}];

static KURDI_MODULATIONS: [MakamModulation; 1] = [MakamModulation {
    id: "kurdi_to_hicaz",
    label: "Kürdi → Hicaz",
    description: "Short passage through the upper degrees towards Hicaz.",
    from: Mode::MakamKurdi,
    to: Mode::MakamHicaz,
    degrees: &[0, 2, 3, 0],
}];

static HUSEYNI_MODULATIONS: [MakamModulation; 1] = [MakamModulation {
    id: "huseyni_to_hicaz",
    label: "Hüseynî → Hicaz",
    description: "Climbs to güçlü and opens into Hicaz.",
    from: Mode::MakamHuseyni,
    to: Mode::MakamHicaz,
    degrees: &[0, 4, 6, 0],
}];

/// Seyir templates for a makam; empty for Western modes
pub fn templates_for_mode(mode: Mode) -> &'static [MakamTemplate] {
    match mode {
        Mode::MakamHicaz => &HICAZ_TEMPLATES,
        Mode::MakamUssak => &USSAK_TEMPLATES,
        Mode::MakamHuseyni => &HUSEYNI_TEMPLATES,
        Mode::MakamKurdi => &KURDI_TEMPLATES,
        _ => &[],
    }
}

/// Modulation paths starting in a makam; empty for Western modes
pub fn modulations_for_mode(mode: Mode) -> &'static [MakamModulation] {
    match mode {
        Mode::MakamHicaz => &HICAZ_MODULATIONS,
        Mode::MakamUssak => &USSAK_MODULATIONS,
        Mode::MakamHuseyni => &HUSEYNI_MODULATIONS,
        Mode::MakamKurdi => &KURDI_MODULATIONS,
        _ => &[],
    }
}

/// Map degrees (wrapping, negatives allowed) onto the scale of `key` in `mode`.
pub fn realize_pattern(key: PitchClass, mode: Mode, degrees: &[i32]) -> Vec<PitchClass> {
    let scale = build_scale(key, mode);
    degrees
        .iter()
        .map(|&d| scale.degree_wrapping(d).unwrap_or(key))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use PitchClass::*;

    #[test]
    fn test_every_makam_has_templates_and_modulations() {
        for mode in Mode::ALL {
            assert_eq!(!templates_for_mode(mode).is_empty(), mode.is_makam(), "{mode}");
            assert_eq!(!modulations_for_mode(mode).is_empty(), mode.is_makam(), "{mode}");
        }
    }

    #[test]
    fn test_modulations_start_in_their_makam() {
        for mode in Mode::ALL {
            for modulation in modulations_for_mode(mode) {
                assert_eq!(modulation.from, mode);
                assert_ne!(modulation.to, mode);
                assert!(modulation.to.is_makam());
            }
        }
    }

    #[test]
    fn test_realize_hicaz_karar_on_a() {
        // A hicaz: A A# C# D E F G#
        let template = &templates_for_mode(Mode::MakamHicaz)[0];
        assert_eq!(template.id, "hicaz_karar");
        assert_eq!(realize_pattern(A, Mode::MakamHicaz, template.degrees), vec![A, E, Gs, A]);
    }

    #[test]
    fn test_realize_wraps_degrees() {
        assert_eq!(realize_pattern(C, Mode::Ionian, &[7, -1, 15]), vec![C, B, D]);
    }

    #[test]
    fn test_template_degrees_stay_in_scale() {
        for mode in Mode::ALL {
            for template in templates_for_mode(mode) {
                assert!(template.degrees.iter().all(|d| (0..7).contains(d)), "{}", template.id);
            }
        }
    }
}
