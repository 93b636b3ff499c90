//! Subcommand handlers and their text/JSON rendering

use anyhow::bail;
use cadence_core::{
    borrowed_chords, build_scale, degree_of, diatonic_slices, get_chord_notes,
    get_voice_led_voicing, power_notes, progression_clip, realize_progression,
    secondary_dominants, BorrowedChord, ChordStack, ChordTexture, CircleSlice, ClipTiming,
    DegreeLabel, HarmonicContext, MakamMeta, Mode, PitchClass, ProgressionClip, ProgressionStep,
    Scale, SecondaryDominant, VoicingStyle, CIRCLE_OF_FIFTHS,
};
use cadence_services::{
    modulations_for_mode, realize_pattern, templates_for_mode, ProgressionSampler, Vibe,
};
use serde::Serialize;

use crate::config::AppConfig;

pub struct Output {
    json: bool,
}

impl Output {
    pub fn new(json: bool) -> Self {
        Self { json }
    }

    fn emit<T: Serialize>(&self, report: &T, text: impl FnOnce(&T) -> String) -> anyhow::Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(report)?);
        } else {
            println!("{}", text(report));
        }
        Ok(())
    }
}

fn join<T: ToString>(items: &[T]) -> String {
    items.iter().map(ToString::to_string).collect::<Vec<_>>().join(" ")
}

// ============================================================================
// Scale / chord / degree / voice
// ============================================================================

#[derive(Serialize)]
struct ScaleReport {
    key: PitchClass,
    mode: Mode,
    scale: Scale,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    power_notes: Vec<PitchClass>,
}

pub fn scale(out: &Output, key: PitchClass, mode: Mode) -> anyhow::Result<()> {
    let report = ScaleReport {
        key,
        mode,
        scale: build_scale(key, mode),
        power_notes: power_notes(key, mode),
    };
    out.emit(&report, |r| {
        let mut text = format!("{} {}: {}", r.key, r.mode, r.scale);
        if !r.power_notes.is_empty() {
            text.push_str(&format!("\npower notes: {}", join(&r.power_notes)));
        }
        text
    })
}

#[derive(Serialize)]
struct ChordReport<'a> {
    root: &'a str,
    mode: Mode,
    texture: ChordTexture,
    notes: ChordStack,
}

pub fn chord(out: &Output, root: &str, mode: Mode, texture: ChordTexture) -> anyhow::Result<()> {
    let report = ChordReport {
        root,
        mode,
        texture,
        notes: get_chord_notes(root, mode, texture),
    };
    out.emit(&report, |r| join(&r.notes))
}

#[derive(Serialize)]
struct DegreeReport {
    key: PitchClass,
    mode: Mode,
    chord_root: PitchClass,
    degree: DegreeLabel,
}

pub fn degree(out: &Output, key: PitchClass, mode: Mode, chord_root: PitchClass) -> anyhow::Result<()> {
    let report = DegreeReport {
        key,
        mode,
        chord_root,
        degree: degree_of(key, mode, chord_root),
    };
    out.emit(&report, |r| r.degree.to_string())
}

#[derive(Serialize)]
struct VoiceReport<'a> {
    chord: &'a [PitchClass],
    previous: &'a [String],
    style: VoicingStyle,
    voicing: Vec<String>,
}

pub fn voice(
    out: &Output,
    chord: &[PitchClass],
    previous: &[String],
    style: VoicingStyle,
) -> anyhow::Result<()> {
    let names: Vec<&str> = chord.iter().map(|pc| pc.name()).collect();
    let history = (!previous.is_empty()).then_some(previous);
    let report = VoiceReport {
        chord,
        previous,
        style,
        voicing: get_voice_led_voicing(history, names.as_slice(), style),
    };
    out.emit(&report, |r| r.voicing.join(" "))
}

// ============================================================================
// Progressions
// ============================================================================

#[derive(Serialize)]
struct ProgressionReport {
    #[serde(flatten)]
    context: HarmonicContext,
    #[serde(skip_serializing_if = "Option::is_none")]
    vibe: Option<Vibe>,
    steps: Vec<ProgressionStep>,
    #[serde(skip_serializing_if = "Option::is_none")]
    clip: Option<ProgressionClip>,
}

impl ProgressionReport {
    fn new(context: &HarmonicContext, roots: &[PitchClass], timing: Option<ClipTiming>) -> Self {
        let steps = realize_progression(context, roots);
        let clip = timing.map(|t| progression_clip(&steps, t));
        Self {
            context: *context,
            vibe: None,
            steps,
            clip,
        }
    }

    fn render(&self) -> String {
        let mut lines = vec![format!(
            "{} {} ({}, {})",
            self.context.key, self.context.mode, self.context.texture, self.context.style
        )];
        for step in &self.steps {
            lines.push(format!(
                "{:<5} {:<3} {:<18} {}",
                step.degree.to_string(),
                step.root.to_string(),
                join(&step.stack),
                join(&step.voicing)
            ));
        }
        if let Some(clip) = &self.clip {
            lines.push(format!(
                "clip: {} notes, {} ticks at {} ppq, {:.2}s at {} bpm",
                clip.notes.len(),
                clip.length_ticks(),
                clip.ppq,
                clip.length_secs(),
                clip.tempo_bpm
            ));
            for note in &clip.notes {
                lines.push(format!(
                    "  {:>6} +{:<5} pitch {:>3} vel {}",
                    note.start_tick, note.duration_ticks, note.pitch, note.velocity
                ));
            }
        }
        lines.join("\n")
    }
}

pub fn progression(
    out: &Output,
    context: &HarmonicContext,
    roots: &[PitchClass],
    timing: Option<ClipTiming>,
) -> anyhow::Result<()> {
    let report = ProgressionReport::new(context, roots, timing);
    out.emit(&report, ProgressionReport::render)
}

pub fn generate(
    out: &Output,
    context: &HarmonicContext,
    vibe: Vibe,
    length: usize,
    seed: Option<u64>,
    timing: Option<ClipTiming>,
) -> anyhow::Result<()> {
    let mut sampler = seed.map(ProgressionSampler::with_seed).unwrap_or_default();
    let roots = sampler.generate(context.key, context.mode, vibe, length);
    let mut report = ProgressionReport::new(context, &roots, timing);
    report.vibe = Some(vibe);
    out.emit(&report, |r| format!("{vibe}: {}\n{}", join(&roots), r.render()))
}

// ============================================================================
// Makam
// ============================================================================

#[derive(Serialize)]
struct RealizedPath {
    id: &'static str,
    label: &'static str,
    description: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    to: Option<Mode>,
    notes: Vec<PitchClass>,
}

#[derive(Serialize)]
struct MakamReport {
    key: PitchClass,
    meta: &'static MakamMeta,
    power_notes: Vec<PitchClass>,
    templates: Vec<RealizedPath>,
    modulations: Vec<RealizedPath>,
}

pub fn makam(out: &Output, key: PitchClass, mode: Mode) -> anyhow::Result<()> {
    let Some(meta) = mode.makam_meta() else {
        bail!("{mode} is not a makam (try makam_hicaz, makam_kurdi, makam_huseyni or makam_ussak)");
    };
    let templates = templates_for_mode(mode)
        .iter()
        .map(|t| RealizedPath {
            id: t.id,
            label: t.label,
            description: t.description,
            to: None,
            notes: realize_pattern(key, mode, t.degrees),
        })
        .collect();
    let modulations = modulations_for_mode(mode)
        .iter()
        .map(|m| RealizedPath {
            id: m.id,
            label: m.label,
            description: m.description,
            to: Some(m.to),
            notes: realize_pattern(key, mode, m.degrees),
        })
        .collect();
    let report = MakamReport {
        key,
        meta,
        power_notes: power_notes(key, mode),
        templates,
        modulations,
    };
    out.emit(&report, |r| {
        let mut lines = vec![
            format!("{} {}", r.key, r.meta.label),
            format!("power notes: {}", join(&r.power_notes)),
            "seyir:".to_string(),
        ];
        for path in &r.templates {
            lines.push(format!("  {:<20} {:<16} {}", path.label, join(&path.notes), path.description));
        }
        lines.push("modulations:".to_string());
        for path in &r.modulations {
            lines.push(format!("  {:<20} {:<16} {}", path.label, join(&path.notes), path.description));
        }
        lines.join("\n")
    })
}

// ============================================================================
// Harmony / circle / config
// ============================================================================

#[derive(Serialize)]
struct HarmonyReport {
    key: PitchClass,
    borrowed: Vec<BorrowedChord>,
    secondary_dominants: Vec<SecondaryDominant>,
}

pub fn harmony(out: &Output, key: PitchClass) -> anyhow::Result<()> {
    let report = HarmonyReport {
        key,
        borrowed: borrowed_chords(key),
        secondary_dominants: secondary_dominants(key),
    };
    out.emit(&report, |r| {
        let mut lines = vec![format!("{} major", r.key), "borrowed:".to_string()];
        for chord in &r.borrowed {
            lines.push(format!("  {:<6} {}", chord.label, chord.root));
        }
        lines.push("secondary dominants:".to_string());
        for dominant in &r.secondary_dominants {
            lines.push(format!("  {:<6} {} -> {}", dominant.label, dominant.root, dominant.target));
        }
        lines.join("\n")
    })
}

#[derive(Serialize)]
struct CircleRow {
    #[serde(flatten)]
    slice: &'static CircleSlice,
    diatonic: bool,
}

pub fn circle(out: &Output, key: PitchClass, mode: Mode) -> anyhow::Result<()> {
    let diatonic = diatonic_slices(key, mode);
    let rows: Vec<CircleRow> = CIRCLE_OF_FIFTHS
        .iter()
        .map(|slice| CircleRow {
            slice,
            diatonic: diatonic.contains(&slice),
        })
        .collect();
    out.emit(&rows, |rows| {
        rows.iter()
            .map(|row| {
                format!(
                    "{} {:<3} {:<4} {}",
                    if row.diatonic { "*" } else { " " },
                    row.slice.major,
                    row.slice.minor,
                    row.slice.key_signature
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    })
}

pub fn show_config(out: &Output, config: &AppConfig) -> anyhow::Result<()> {
    if out.json {
        println!("{}", serde_json::to_string_pretty(config)?);
    } else {
        print!("{}", toml::to_string_pretty(config)?);
    }
    Ok(())
}
