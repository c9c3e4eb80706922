mod args;
mod convert;

use std::collections::HashMap;

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use music_api::{
    ChordAnalyzeResponse, ChordAssignmentDto, ChordSymbolParseResponse, FiguredBassResponse,
    HarmonizeResponse, KeySpecification, ModeDto, NotationFormatResponse, NotationParseResponse,
    VoiceLeadResponse,
};
use music_notation::{FormatOptions, ParseOptions};
use music_theory::chord;
use music_theory::mask::get_mask;
use music_voicing::figured_bass::{self, FiguredBassSymbol, VoiceLeadingStyle};
use music_voicing::harmonization::{
    DefaultChordCandidateProvider, DefaultHarmonicRhythmStrategy, DefaultMelodyFitScorer,
    DefaultTransitionScorer, MelodyNote, harmonize,
};
use music_voicing::solver::{self, SolverMode};
use music_time::Rational;

use crate::args::{
    Cli, ChordAnalyzeArgs, ChordCommands, ChordParseArgs, Commands, FiguredBassArgs, HarmonizeArgs,
    ModeArg, NotationCommands, NotationFormatArgs, NotationParseArgs, SolverModeArg, VoiceLeadArgs,
    VoiceLeadingStyleArg,
};

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Notation(args) => run_notation(args.command),
        Commands::Chord(args) => run_chord(args.command),
        Commands::Harmonize(args) => run_harmonize(args),
        Commands::VoiceLead(args) => run_voice_lead(args),
        Commands::FiguredBass(args) => run_figured_bass(args),
    }
}

fn run_notation(command: NotationCommands) -> Result<()> {
    match command {
        NotationCommands::Parse(args) => run_notation_parse(args),
        NotationCommands::Format(args) => run_notation_format(args),
    }
}

fn run_notation_parse(args: NotationParseArgs) -> Result<()> {
    let options = ParseOptions { validate_measures: args.validate_measures };
    let doc = music_notation::parse(&args.text, options)
        .map_err(|e| anyhow!(e.to_string()))
        .context("failed to parse notation text")?;

    let response = NotationParseResponse {
        time_signature: convert::time_signature_dto(&doc),
        events: convert::note_event_dtos(&doc),
        directives: convert::directive_dtos(&doc),
        measure_bars: convert::measure_bar_dtos(&doc),
    };
    print_json(&response)
}

fn run_notation_format(args: NotationFormatArgs) -> Result<()> {
    let doc = music_notation::parse(&args.text, ParseOptions::default())
        .map_err(|e| anyhow!(e.to_string()))
        .context("failed to parse notation text")?;
    let options = FormatOptions {
        prefer_letter_durations: args.prefer_letter_durations,
        group_chords: !args.no_group_chords,
    };
    let response = NotationFormatResponse { text: music_notation::format(&doc, options) };
    print_json(&response)
}

fn run_chord(command: ChordCommands) -> Result<()> {
    match command {
        ChordCommands::Parse(args) => run_chord_parse(args),
        ChordCommands::Analyze(args) => run_chord_analyze(args),
    }
}

fn run_chord_parse(args: ChordParseArgs) -> Result<()> {
    let pitches = music_chordsym::parse_pitches(&args.symbol)
        .map_err(|e| anyhow!(e.to_string()))
        .context("failed to parse chord symbol")?;
    print_json(&ChordSymbolParseResponse { pitches })
}

fn run_chord_analyze(args: ChordAnalyzeArgs) -> Result<()> {
    if args.pitches.is_empty() {
        bail!("at least one pitch is required");
    }
    let info = chord::identify(get_mask(&args.pitches));
    print_json(&ChordAnalyzeResponse {
        root_pc: info.root_pc().value(),
        quality: convert::quality_label(info.quality()).to_string(),
    })
}

fn parse_melody_note(token: &str) -> Result<MelodyNote> {
    let (pitch_part, rest) =
        token.split_once('@').ok_or_else(|| anyhow!("expected 'pitch@onset:duration', got '{token}'"))?;
    let (onset_part, duration_part) = rest
        .split_once(':')
        .ok_or_else(|| anyhow!("expected 'pitch@onset:duration', got '{token}'"))?;
    let pitch: i32 = pitch_part.trim().parse().with_context(|| format!("invalid pitch in '{token}'"))?;
    let onset = convert::parse_rational(onset_part)?;
    let duration = convert::parse_rational(duration_part)?;
    Ok(MelodyNote { onset, duration, pitch })
}

fn run_harmonize(args: HarmonizeArgs) -> Result<()> {
    let melody: Vec<MelodyNote> =
        args.notes.iter().map(|token| parse_melody_note(token)).collect::<Result<_>>()?;
    let key_spec = KeySpecification {
        tonic: args.tonic,
        mode: if args.mode == ModeArg::Major { ModeDto::Major } else { ModeDto::Minor },
    };
    let key = convert::key_signature(&key_spec)?;

    let assignments = harmonize(
        &melody,
        key,
        &DefaultHarmonicRhythmStrategy,
        &DefaultChordCandidateProvider,
        &DefaultTransitionScorer { key },
        &DefaultMelodyFitScorer,
    )
    .map_err(|e| anyhow!(e.to_string()))
    .context("harmonization failed")?;

    let dtos = assignments
        .into_iter()
        .map(|assignment| ChordAssignmentDto {
            start: convert::rational_to_dto(assignment.start),
            end: convert::rational_to_dto(assignment.end),
            root_pc: assignment.root_pc,
            quality: convert::quality_label(assignment.quality).to_string(),
            pitches: assignment.pitches,
        })
        .collect();
    print_json(&HarmonizeResponse { assignments: dtos })
}

fn parse_pitch_class_set(token: &str) -> Result<Vec<i32>> {
    token
        .split('.')
        .map(|part| part.trim().parse::<i32>().with_context(|| format!("invalid pitch class in '{token}'")))
        .collect()
}

fn run_voice_lead(args: VoiceLeadArgs) -> Result<()> {
    if args.progression.is_empty() {
        bail!("at least one chord is required");
    }
    let progression: Vec<_> = args
        .progression
        .iter()
        .map(|token| parse_pitch_class_set(token).map(|pcs| get_mask(&pcs)))
        .collect::<Result<_>>()?;
    let mode = match args.mode {
        SolverModeArg::Strict => SolverMode::Strict,
        SolverModeArg::Default => SolverMode::Default,
        SolverModeArg::Relaxed => SolverMode::Relaxed,
    };
    let voicings = solver::solve(&progression, args.key_root, mode)
        .map_err(|e| anyhow!(e.to_string()))
        .context("voice-leading solver failed")?;
    print_json(&VoiceLeadResponse { voicings })
}

fn run_figured_bass(args: FiguredBassArgs) -> Result<()> {
    let mut accidentals = HashMap::new();
    for entry in &args.accidentals {
        let (figure, symbol) = entry
            .split_once(':')
            .ok_or_else(|| anyhow!("expected 'figure:symbol', got '{entry}'"))?;
        let figure: i32 = figure.trim().parse().with_context(|| format!("invalid figure in '{entry}'"))?;
        let symbol =
            symbol.trim().chars().next().ok_or_else(|| anyhow!("empty accidental symbol in '{entry}'"))?;
        accidentals.insert(figure, symbol);
    }

    let symbol = FiguredBassSymbol {
        bass_pitch: args.bass,
        figures: args.figures,
        accidentals,
        time: Rational::ZERO,
        duration: Rational::ONE,
    };
    let style = match args.style {
        VoiceLeadingStyleArg::Smooth => VoiceLeadingStyle::Smooth,
        VoiceLeadingStyleArg::Strict => VoiceLeadingStyle::Strict,
    };
    let voicing = figured_bass::realize(
        &symbol,
        args.min_pitch,
        args.max_pitch,
        args.previous.as_deref(),
        style,
        args.max_voice_movement,
    )
    .map_err(|e| anyhow!(e.to_string()))
    .context("figured-bass realization failed")?;
    print_json(&FiguredBassResponse { voicing })
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("failed to serialize JSON output")?;
    println!("{json}");
    Ok(())
}
