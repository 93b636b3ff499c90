//! Structural degrees of the makams: karar (final), güçlü (dominant) and
//! yeden (leading tone).

use serde::Serialize;

use crate::mode::{build_scale, Mode};
use crate::note::PitchClass;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MakamMeta {
    pub mode: Mode,
    pub label: &'static str,
    /// 0-based scale degrees
    pub karar: usize,
    pub guclu: usize,
    pub yeden: Option<usize>,
}

const HICAZ: MakamMeta = MakamMeta {
    mode: Mode::MakamHicaz,
    label: "Hicaz",
    karar: 0,
    guclu: 4,
    yeden: Some(6),
};

const KURDI: MakamMeta = MakamMeta {
    mode: Mode::MakamKurdi,
    label: "Kürdi",
    karar: 0,
    guclu: 3,
    yeden: Some(6),
};

const HUSEYNI: MakamMeta = MakamMeta {
    mode: Mode::MakamHuseyni,
    label: "Hüseynî",
    karar: 0,
    guclu: 4,
    yeden: Some(6),
};

const USSAK: MakamMeta = MakamMeta {
    mode: Mode::MakamUssak,
    label: "Uşşak",
    karar: 0,
    guclu: 3,
    yeden: Some(6),
};

impl Mode {
    /// Makam metadata, `None` for Western modes
    pub fn makam_meta(&self) -> Option<&'static MakamMeta> {
        match self {
            Self::MakamHicaz => Some(&HICAZ),
            Self::MakamKurdi => Some(&KURDI),
            Self::MakamHuseyni => Some(&HUSEYNI),
            Self::MakamUssak => Some(&USSAK),
            _ => None,
        }
    }
}

/// Karar, güçlü and (when defined) yeden pitch classes for a makam on `root`.
/// Western modes have none.
pub fn power_notes(root: PitchClass, mode: Mode) -> Vec<PitchClass> {
    let Some(meta) = mode.makam_meta() else {
        return Vec::new();
    };
    let scale = build_scale(root, mode);
    let Some(first) = scale.root() else {
        return Vec::new();
    };

    let karar = scale.degree(meta.karar).unwrap_or(first);
    let guclu = scale.degree(meta.guclu).or(scale.degree(4)).unwrap_or(first);
    let mut notes = vec![karar, guclu];
    if let Some(yeden_degree) = meta.yeden {
        let last = scale.notes().last().copied().unwrap_or(first);
        notes.push(scale.degree(yeden_degree).unwrap_or(last));
    }
    notes
}

#[cfg(test)]
mod tests {
    use super::*;
    use PitchClass::*;

    #[test]
    fn test_power_notes_hicaz_on_d() {
        // D hicaz: D D# F# G A A# C#
        assert_eq!(power_notes(D, Mode::MakamHicaz), vec![D, A, Cs]);
    }

    #[test]
    fn test_power_notes_ussak_on_a() {
        // A ussak: A A# C D E F# G
        assert_eq!(power_notes(A, Mode::MakamUssak), vec![A, D, G]);
    }

    #[test]
    fn test_western_modes_have_no_power_notes() {
        for mode in Mode::ALL.into_iter().filter(|m| !m.is_makam()) {
            assert!(power_notes(C, mode).is_empty());
            assert!(mode.makam_meta().is_none());
        }
    }

    #[test]
    fn test_meta_matches_mode() {
        for mode in Mode::ALL.into_iter().filter(|m| m.is_makam()) {
            assert_eq!(mode.makam_meta().map(|m| m.mode), Some(mode));
        }
    }
}
