use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "music-cli", version, about = "Command-line utilities for the music workspace")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Parse or format notation text.
    Notation(NotationArgs),
    /// Parse a chord symbol or analyze a raw pitch set.
    Chord(ChordArgs),
    /// Harmonize a melody with a Viterbi chord-candidate pipeline.
    Harmonize(HarmonizeArgs),
    /// Solve SATB voice-leading for a chord progression.
    VoiceLead(VoiceLeadArgs),
    /// Realize a figured-bass symbol into concrete pitches.
    FiguredBass(FiguredBassArgs),
}

#[derive(Args, Debug, Clone)]
pub struct NotationArgs {
    #[command(subcommand)]
    pub command: NotationCommands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum NotationCommands {
    /// Parse notation text and print the parsed document as JSON.
    Parse(NotationParseArgs),
    /// Parse notation text, then re-render it, printing the resulting text.
    Format(NotationFormatArgs),
}

#[derive(Args, Debug, Clone)]
pub struct NotationParseArgs {
    /// Notation source text.
    pub text: String,

    /// Check every measure's duration against the declared time signature.
    #[arg(long)]
    pub validate_measures: bool,
}

#[derive(Args, Debug, Clone)]
pub struct NotationFormatArgs {
    /// Notation source text.
    pub text: String,

    /// Prefer `:letter[.]` duration suffixes over `/N[.]` when an exact letter form exists.
    #[arg(long)]
    pub prefer_letter_durations: bool,

    /// Do not group simultaneous notes into `[...]` chord tokens.
    #[arg(long)]
    pub no_group_chords: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ChordArgs {
    #[command(subcommand)]
    pub command: ChordCommands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ChordCommands {
    /// Parse a chord symbol (e.g. `C7(b9,#11)`) into MIDI pitches.
    Parse(ChordParseArgs),
    /// Identify the root and quality of a raw pitch set.
    Analyze(ChordAnalyzeArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ChordParseArgs {
    /// Chord symbol text.
    pub symbol: String,
}

#[derive(Args, Debug, Clone)]
pub struct ChordAnalyzeArgs {
    /// MIDI pitches, comma-separated (e.g. "60,64,67").
    #[arg(value_delimiter = ',')]
    pub pitches: Vec<i32>,
}

#[derive(Args, Debug, Clone)]
pub struct HarmonizeArgs {
    /// Melody notes as `pitch@onset:duration` tokens, e.g. `60@0:1 67@1:1`.
    /// Onset/duration use `N` or `N/D` rational syntax.
    pub notes: Vec<String>,

    /// Key tonic (e.g., C, F#, Bb).
    #[arg(long, default_value = "C", value_name = "TONIC")]
    pub tonic: String,

    /// Key mode.
    #[arg(long, value_enum, default_value_t = ModeArg::Major)]
    pub mode: ModeArg,
}

#[derive(Args, Debug, Clone)]
pub struct VoiceLeadArgs {
    /// Chord progression: each chord is a `.`-separated list of pitch classes, chords
    /// separated by spaces, e.g. `0.4.7 7.11.2.5 0.4.7`.
    pub progression: Vec<String>,

    /// Key root pitch class (`0..12`), used by the transition scorer's functional bonus.
    #[arg(long, default_value_t = 0)]
    pub key_root: u8,

    /// Solver strictness/search mode.
    #[arg(long, value_enum, default_value_t = SolverModeArg::Default)]
    pub mode: SolverModeArg,
}

#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum SolverModeArg {
    Strict,
    Default,
    Relaxed,
}

#[derive(Args, Debug, Clone)]
pub struct FiguredBassArgs {
    /// Bass MIDI pitch.
    #[arg(long)]
    pub bass: i32,

    /// Figures above the bass, comma-separated (e.g. "6,4"). Empty means unfigured (5/3).
    #[arg(long, value_delimiter = ',')]
    pub figures: Vec<i32>,

    /// Accidental overrides, comma-separated `figure:symbol` pairs (e.g. "6:#").
    #[arg(long, value_delimiter = ',')]
    pub accidentals: Vec<String>,

    /// Lowest admissible upper-voice pitch.
    #[arg(long, default_value_t = 48)]
    pub min_pitch: i32,

    /// Highest admissible upper-voice pitch.
    #[arg(long, default_value_t = 84)]
    pub max_pitch: i32,

    /// Previous voicing, comma-separated MIDI pitches, used to minimize voice movement.
    #[arg(long, value_delimiter = ',')]
    pub previous: Option<Vec<i32>>,

    /// Maximum semitone movement allowed per voice when `--previous` is given.
    #[arg(long)]
    pub max_voice_movement: Option<i32>,

    /// Voice-leading style.
    #[arg(long, value_enum, default_value_t = VoiceLeadingStyleArg::Smooth)]
    pub style: VoiceLeadingStyleArg,
}

#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum VoiceLeadingStyleArg {
    Smooth,
    Strict,
}

#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum ModeArg {
    Major,
    Minor,
}
