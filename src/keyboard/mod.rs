//! Note names and piano keyboard data.
//!
//! Notes are written as strings like "C#4": a note name followed by an integer
//! octave. This module converts between that form and MIDI note numbers, and
//! its submodules provide the computer-keyboard bindings and the visible key
//! map for a range of notes.

mod binds;
mod error;
mod note_map;

pub use binds::{key_bind, keys_for_note, KEY_BINDS};
pub use error::NoteError;
pub use note_map::{
    generate_note_map_from_range, NoteMap, NoteRange, PianoKey, MAX_RANGE_SEMITONES,
};

/// Note names in keyboard order.
///
/// Includes the enharmonic spellings "E#" and "B#" so that every key in the
/// binding table has a name here. They are never rendered, see
/// [`HIDDEN_NOTE_NAMES`].
pub const NOTE_NAMES: [&str; 14] = [
    "C", "C#", "D", "D#", "E", "E#", "F", "F#", "G", "G#", "A", "A#", "B", "B#",
];

/// Aliases that are bindable but excluded from the rendered key map.
pub const HIDDEN_NOTE_NAMES: [&str; 2] = ["E#", "B#"];

/// Chromatic note names, one per semitone. Index with `midi % 12`.
pub const SEMITONE_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Semitone offset from C for each entry of [`NOTE_NAMES`].
/// "B#" is 12: it sounds as the C of the next octave.
const NOTE_SEMITONES: [i32; 14] = [0, 1, 2, 3, 4, 5, 5, 6, 7, 8, 9, 10, 11, 12];

/// Returns the position of `name` in [`NOTE_NAMES`].
pub fn name_index(name: &str) -> Option<usize> {
    NOTE_NAMES.iter().position(|&n| n == name)
}

/// Whether `name` is a hidden enharmonic alias ("E#" or "B#").
pub fn is_hidden(name: &str) -> bool {
    HIDDEN_NOTE_NAMES.contains(&name)
}

/// Whether `name` is drawn as a white key. Naturals are a single letter.
pub fn is_white(name: &str) -> bool {
    name.len() == 1
}

/// Splits a note string into its name and octave.
///
/// The octave is the trailing run of digits, optionally preceded by a minus
/// sign, so "A10" and "C-1" parse as expected.
///
/// # Examples
///
/// ```
/// use pianokeys::keyboard::split_note;
///
/// assert_eq!(split_note("C#4"), Ok(("C#", 4)));
/// assert_eq!(split_note("C-1"), Ok(("C", -1)));
/// ```
pub fn split_note(note: &str) -> Result<(&str, i32), NoteError> {
    if note.is_empty() {
        return Err(NoteError::Empty);
    }

    let digits_start = note
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_ascii_digit())
        .last()
        .map(|(i, _)| i)
        .ok_or_else(|| NoteError::MissingOctave(note.to_string()))?;

    let octave_start = if note[..digits_start].ends_with('-') {
        digits_start - 1
    } else {
        digits_start
    };

    let name = &note[..octave_start];
    if name.is_empty() {
        return Err(NoteError::MissingName(note.to_string()));
    }

    let octave = note[octave_start..]
        .parse::<i32>()
        .map_err(|_| NoteError::InvalidOctave(note.to_string()))?;

    Ok((name, octave))
}

/// Returns the octave of a note string, e.g. 4 for "C#4".
pub fn get_octave(note: &str) -> Result<i32, NoteError> {
    split_note(note).map(|(_, octave)| octave)
}

/// Returns the name part of a note string, e.g. "C#" for "C#4".
pub fn get_note_name(note: &str) -> Result<&str, NoteError> {
    split_note(note).map(|(name, _)| name)
}

/// Converts a MIDI note number to a note string.
///
/// Uses the MIDI octave convention where 60 is "C4" and 69 is "A4".
/// Numbers outside 0-127 are accepted and keep counting octaves.
///
/// # Examples
///
/// ```
/// use pianokeys::keyboard::midi_to_note;
///
/// assert_eq!(midi_to_note(69), "A4");
/// assert_eq!(midi_to_note(61), "C#4");
/// ```
pub fn midi_to_note(midi: i32) -> String {
    let octave = midi.div_euclid(12) - 1;
    let name = SEMITONE_NAMES[midi.rem_euclid(12) as usize];
    format!("{}{}", name, octave)
}

/// Converts a note string to a MIDI note number.
///
/// Hidden aliases resolve to the pitch they sound: "E#4" is 65 (F4) and
/// "B#4" is 72 (C5).
pub fn note_to_midi(note: &str) -> Result<i32, NoteError> {
    let (name, octave) = split_note(note)?;
    let index = name_index(name).ok_or_else(|| NoteError::UnknownName(name.to_string()))?;

    // MIDI note = (octave + 1) * 12 + semitone
    octave
        .checked_add(1)
        .and_then(|o| o.checked_mul(12))
        .and_then(|base| base.checked_add(NOTE_SEMITONES[index]))
        .ok_or_else(|| NoteError::InvalidOctave(note.to_string()))
}
