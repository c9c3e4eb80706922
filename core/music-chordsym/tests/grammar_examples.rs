use music_chordsym::parse_pitches;
use proptest::prelude::*;

#[test]
fn every_parsed_chord_stays_sorted_and_in_midi_range() {
    for symbol in ["C", "Dm7", "Gmaj7", "C7(b9,#11)", "C|G", "Fsus4", "Bbdim7", "Aadd9", "C/E"] {
        let pitches = parse_pitches(symbol).unwrap();
        assert!(pitches.windows(2).all(|w| w[0] <= w[1]), "{symbol} produced unsorted output");
        assert!(pitches.iter().all(|&p| (0..128).contains(&p)), "{symbol} produced out-of-range pitch");
    }
}

proptest! {
    #[test]
    fn power_chords_are_always_a_root_and_fifth(root in 0u8..12) {
        let letters = ['C', 'D', 'E', 'F', 'G', 'A', 'B'];
        let letter = letters[(root as usize) % letters.len()];
        let symbol = format!("{letter}5");
        if let Ok(pitches) = parse_pitches(&symbol) {
            prop_assert_eq!(pitches.len(), 2);
            prop_assert_eq!(pitches[1] - pitches[0], 7);
        }
    }
}
