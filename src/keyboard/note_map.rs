//! Visible key map for a range of notes.
//!
//! A [`NoteMap`] holds the rendering state of every key between two notes,
//! ordered from lowest to highest pitch. The white-key count returned with it
//! is what a renderer needs to size the keyboard.

use super::{is_hidden, is_white, name_index, split_note, NoteError, NOTE_NAMES, NOTE_SEMITONES};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Widest range the generator accepts, in semitones between the two ends.
/// Covers the full MIDI range C-1 to G9.
pub const MAX_RANGE_SEMITONES: i64 = 127;

/// Rendering state of a single piano key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PianoKey {
    /// White (natural) or black (sharp) key.
    pub white: bool,

    /// Color of the player currently pressing this key, if any.
    pub pressed_color: Option<String>,

    /// Transient highlight used by the UI.
    pub ghost: bool,
}

impl PianoKey {
    /// Creates an unpressed, non-ghost key.
    pub fn new(white: bool) -> Self {
        Self {
            white,
            pressed_color: None,
            ghost: false,
        }
    }

    /// Returns true while a pressed color is set.
    pub fn is_pressed(&self) -> bool {
        self.pressed_color.is_some()
    }
}

/// Note string to key state, in ascending pitch order.
///
/// Serializes as a map that keeps this order, and deserializes back in the
/// order the entries appear.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteMap {
    entries: Vec<(String, PianoKey)>,
}

impl NoteMap {
    /// Appends a key. Callers insert in pitch order and never repeat a note.
    fn push(&mut self, note: String, key: PianoKey) {
        self.entries.push((note, key));
    }

    /// Looks up the state of a key.
    ///
    /// # Arguments
    ///
    /// * `note` - Note string like "C#4"
    ///
    /// # Returns
    ///
    /// The key state, or None if the note is not on this keyboard
    pub fn get(&self, note: &str) -> Option<&PianoKey> {
        self.entries.iter().find(|(n, _)| n == note).map(|(_, k)| k)
    }

    /// Mutable variant of [`NoteMap::get`].
    pub fn get_mut(&mut self, note: &str) -> Option<&mut PianoKey> {
        self.entries
            .iter_mut()
            .find(|(n, _)| n == note)
            .map(|(_, k)| k)
    }

    /// Whether `note` is one of the keys on this keyboard.
    pub fn contains(&self, note: &str) -> bool {
        self.get(note).is_some()
    }

    /// Number of visible keys, white and black.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(note, key)` pairs from lowest to highest.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PianoKey)> {
        self.entries.iter().map(|(n, k)| (n.as_str(), k))
    }

    /// Iterates over the note strings from lowest to highest.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    /// Marks a key as pressed with the given color.
    ///
    /// # Arguments
    ///
    /// * `note` - Note string of the key
    /// * `color` - Color identifier chosen by the UI
    ///
    /// # Returns
    ///
    /// false if the note is not on this keyboard
    pub fn press(&mut self, note: &str, color: impl Into<String>) -> bool {
        match self.get_mut(note) {
            Some(key) => {
                key.pressed_color = Some(color.into());
                true
            }
            None => false,
        }
    }

    /// Clears the pressed color of a key.
    ///
    /// Returns false if the note is not on this keyboard.
    pub fn release(&mut self, note: &str) -> bool {
        match self.get_mut(note) {
            Some(key) => {
                key.pressed_color = None;
                true
            }
            None => false,
        }
    }

    /// Sets or clears the ghost highlight of a key.
    ///
    /// # Arguments
    ///
    /// * `note` - Note string of the key
    /// * `ghost` - New ghost state
    ///
    /// # Returns
    ///
    /// false if the note is not on this keyboard
    pub fn set_ghost(&mut self, note: &str, ghost: bool) -> bool {
        match self.get_mut(note) {
            Some(key) => {
                key.ghost = ghost;
                true
            }
            None => false,
        }
    }
}

impl Serialize for NoteMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (note, key) in &self.entries {
            map.serialize_entry(note, key)?;
        }
        map.end()
    }
}

struct NoteMapVisitor;

impl<'de> Visitor<'de> for NoteMapVisitor {
    type Value = NoteMap;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map of note strings to key states")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<NoteMap, A::Error> {
        let mut map = NoteMap::default();
        while let Some((note, key)) = access.next_entry::<String, PianoKey>()? {
            // A repeated note keeps its first position with the last value
            match map.get_mut(&note) {
                Some(existing) => *existing = key,
                None => map.push(note, key),
            }
        }
        Ok(map)
    }
}

impl<'de> Deserialize<'de> for NoteMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(NoteMapVisitor)
    }
}

/// Keys of a note range together with the number of white keys among them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteRange {
    pub note_map: NoteMap,
    pub white_keys: usize,
}

impl NoteRange {
    /// Number of black keys in the range.
    pub fn black_keys(&self) -> usize {
        self.note_map.len().saturating_sub(self.white_keys)
    }
}

fn lookup_name(name: &str) -> Result<usize, NoteError> {
    name_index(name).ok_or_else(|| {
        tracing::debug!("Unknown note name {:?}", name);
        NoteError::UnknownName(name.to_string())
    })
}

/// Pitch as a MIDI-style number, widened so huge octaves cannot overflow.
fn pitch(index: usize, octave: i32) -> i64 {
    (octave as i64 + 1) * 12 + NOTE_SEMITONES[index] as i64
}

/// Builds the key map for every visible note from `start` to `end` inclusive.
///
/// Walks octave by octave through [`NOTE_NAMES`], beginning at `start`'s name
/// in the first octave and stopping after `end`'s name in the last. The hidden
/// aliases "E#" and "B#" are skipped. A `start` above `end` gives an empty
/// range.
///
/// # Errors
///
/// Returns an error if either note cannot be parsed or uses an unknown name,
/// or if the two ends are more than [`MAX_RANGE_SEMITONES`] apart.
///
/// # Examples
///
/// ```
/// use pianokeys::keyboard::generate_note_map_from_range;
///
/// let range = generate_note_map_from_range("C3", "B3").unwrap();
/// assert_eq!(range.note_map.len(), 12);
/// assert_eq!(range.white_keys, 7);
/// ```
pub fn generate_note_map_from_range(start: &str, end: &str) -> Result<NoteRange, NoteError> {
    let (start_name, start_octave) = split_note(start)?;
    let (end_name, end_octave) = split_note(end)?;
    let start_index = lookup_name(start_name)?;
    let end_index = lookup_name(end_name)?;

    let span = pitch(end_index, end_octave) - pitch(start_index, start_octave);
    if span > MAX_RANGE_SEMITONES {
        return Err(NoteError::RangeTooLarge {
            start: start.to_string(),
            end: end.to_string(),
            max: MAX_RANGE_SEMITONES,
        });
    }

    let mut note_map = NoteMap::default();
    let mut white_keys = 0;

    for octave in start_octave..=end_octave {
        let first = if octave == start_octave { start_index } else { 0 };

        for (index, name) in NOTE_NAMES.iter().enumerate().skip(first) {
            if octave == end_octave && index > end_index {
                break;
            }
            if is_hidden(name) {
                continue;
            }

            let key = PianoKey::new(is_white(name));
            if key.white {
                white_keys += 1;
            }
            note_map.push(format!("{}{}", name, octave), key);
        }
    }

    tracing::debug!(
        start,
        end,
        keys = note_map.len(),
        white_keys,
        "Generated note map"
    );

    Ok(NoteRange {
        note_map,
        white_keys,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keyboard::{get_note_name, note_to_midi};

    #[test]
    fn test_single_octave() {
        let range = generate_note_map_from_range("C3", "B3").unwrap();
        let notes: Vec<&str> = range.note_map.keys().collect();
        assert_eq!(
            notes,
            vec![
                "C3", "C#3", "D3", "D#3", "E3", "F3", "F#3", "G3", "G#3", "A3", "A#3", "B3"
            ]
        );
        assert_eq!(range.white_keys, 7);
        assert_eq!(range.black_keys(), 5);
    }

    #[test]
    fn test_single_note() {
        let range = generate_note_map_from_range("C3", "C3").unwrap();
        assert_eq!(range.note_map.len(), 1);
        assert_eq!(range.white_keys, 1);
        assert_eq!(range.note_map.get("C3"), Some(&PianoKey::new(true)));
        let key = range.note_map.get("C3").unwrap();
        assert!(key.white);
        assert_eq!(key.pressed_color, None);
        assert!(!key.ghost);
    }

    #[test]
    fn test_multi_octave_range() {
        // A#2 up to F#6 covers every key in the binding table
        let range = generate_note_map_from_range("A#2", "F#6").unwrap();
        assert_eq!(range.note_map.keys().next(), Some("A#2"));
        assert_eq!(range.note_map.keys().last(), Some("F#6"));
        assert_eq!(range.note_map.len(), 2 + 36 + 7);
        // B2, 3 octaves of 7, then C6 D6 E6 F6
        assert_eq!(range.white_keys, 1 + 21 + 4);
    }

    #[test]
    fn test_ascending_pitch_order() {
        let range = generate_note_map_from_range("G2", "D5").unwrap();
        let pitches: Vec<i32> = range
            .note_map
            .keys()
            .map(|n| note_to_midi(n).unwrap())
            .collect();
        assert!(pitches.windows(2).all(|w| w[1] == w[0] + 1));
    }

    #[test]
    fn test_hidden_names_never_included() {
        let ranges = [
            ("C3", "B3"),
            ("E3", "F3"),
            ("B2", "C3"),
            ("E#3", "B#4"),
            ("C-1", "C1"),
        ];
        for (start, end) in ranges {
            let range = generate_note_map_from_range(start, end).unwrap();
            for note in range.note_map.keys() {
                let name = get_note_name(note).unwrap();
                assert!(name != "E#" && name != "B#", "{} in {}..{}", note, start, end);
            }
        }
    }

    #[test]
    fn test_hidden_endpoints() {
        let range = generate_note_map_from_range("E#3", "G3").unwrap();
        let notes: Vec<&str> = range.note_map.keys().collect();
        assert_eq!(notes, vec!["F3", "F#3", "G3"]);

        let range = generate_note_map_from_range("A3", "B#3").unwrap();
        let notes: Vec<&str> = range.note_map.keys().collect();
        assert_eq!(notes, vec!["A3", "A#3", "B3"]);
        assert_eq!(range.white_keys, 2);
    }

    #[test]
    fn test_multi_digit_octaves() {
        let range = generate_note_map_from_range("A9", "C10").unwrap();
        let notes: Vec<&str> = range.note_map.keys().collect();
        assert_eq!(notes, vec!["A9", "A#9", "B9", "C10"]);
    }

    #[test]
    fn test_reversed_range_is_empty() {
        let range = generate_note_map_from_range("C4", "C3").unwrap();
        assert!(range.note_map.is_empty());
        assert_eq!(range.white_keys, 0);

        let range = generate_note_map_from_range("G3", "D3").unwrap();
        assert!(range.note_map.is_empty());
    }

    #[test]
    fn test_invalid_notes() {
        assert_eq!(
            generate_note_map_from_range("H3", "C4"),
            Err(NoteError::UnknownName("H".to_string()))
        );
        assert_eq!(
            generate_note_map_from_range("C3", "Db4"),
            Err(NoteError::UnknownName("Db".to_string()))
        );
        assert_eq!(
            generate_note_map_from_range("C", "C4"),
            Err(NoteError::MissingOctave("C".to_string()))
        );
    }

    #[test]
    fn test_full_midi_range_allowed() {
        let range = generate_note_map_from_range("C-1", "G9").unwrap();
        assert_eq!(range.note_map.len(), 128);
        assert_eq!(range.note_map.keys().next(), Some("C-1"));
        assert_eq!(range.note_map.keys().last(), Some("G9"));
    }

    #[test]
    fn test_oversized_range_rejected() {
        assert_eq!(
            generate_note_map_from_range("C-1", "G#9"),
            Err(NoteError::RangeTooLarge {
                start: "C-1".to_string(),
                end: "G#9".to_string(),
                max: MAX_RANGE_SEMITONES,
            })
        );
        assert!(matches!(
            generate_note_map_from_range("C0", "C1000000"),
            Err(NoteError::RangeTooLarge { .. })
        ));
        assert!(matches!(
            generate_note_map_from_range("C-2000000000", "C2000000000"),
            Err(NoteError::RangeTooLarge { .. })
        ));
        // Far apart but reversed is still just empty
        let range = generate_note_map_from_range("C2000000000", "C-2000000000").unwrap();
        assert!(range.note_map.is_empty());
    }

    #[test]
    fn test_contains_and_iter() {
        let range = generate_note_map_from_range("E3", "G3").unwrap();
        assert!(range.note_map.contains("F#3"));
        assert!(!range.note_map.contains("E#3"));
        assert!(!range.note_map.contains("A3"));

        let pairs: Vec<(&str, bool)> = range
            .note_map
            .iter()
            .map(|(note, key)| (note, key.white))
            .collect();
        assert_eq!(
            pairs,
            vec![("E3", true), ("F3", true), ("F#3", false), ("G3", true)]
        );
    }

    #[test]
    fn test_generation_is_repeatable() {
        let first = generate_note_map_from_range("F2", "E5").unwrap();
        let second = generate_note_map_from_range("F2", "E5").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_press_release_and_ghost() {
        let mut range = generate_note_map_from_range("C4", "B4").unwrap();
        let map = &mut range.note_map;

        assert!(map.press("E4", "red"));
        assert!(map.get("E4").unwrap().is_pressed());
        assert_eq!(map.get("E4").unwrap().pressed_color.as_deref(), Some("red"));

        assert!(map.release("E4"));
        assert!(!map.get("E4").unwrap().is_pressed());

        assert!(map.set_ghost("F#4", true));
        assert!(map.get("F#4").unwrap().ghost);

        assert!(!map.press("C5", "blue"));
        assert!(!map.press("E#4", "blue"));
        assert!(!map.set_ghost("C9", true));
    }

    #[test]
    fn test_json_shape() {
        let range = generate_note_map_from_range("C3", "C#3").unwrap();
        let json = serde_json::to_string(&range).unwrap();
        assert_eq!(
            json,
            r##"{"noteMap":{"C3":{"white":true,"pressedColor":null,"ghost":false},"C#3":{"white":false,"pressedColor":null,"ghost":false}},"whiteKeys":1}"##
        );
    }

    #[test]
    fn test_note_range_deserialize_keeps_order() {
        let json = r##"{"noteMap":{"G3":{"white":true,"pressedColor":"red","ghost":false},"F#3":{"white":false,"pressedColor":null,"ghost":true}},"whiteKeys":1}"##;
        let range: NoteRange = serde_json::from_str(json).unwrap();
        assert_eq!(range.note_map.keys().collect::<Vec<_>>(), vec!["G3", "F#3"]);
        assert_eq!(range.white_keys, 1);
        assert!(range.note_map.get("G3").unwrap().is_pressed());
        assert!(range.note_map.get("F#3").unwrap().ghost);

        let generated = generate_note_map_from_range("A3", "C4").unwrap();
        let text = serde_json::to_string(&generated).unwrap();
        assert_eq!(serde_json::from_str::<NoteRange>(&text).unwrap(), generated);
    }

    #[test]
    fn test_key_state_deserialize() {
        let key: PianoKey =
            serde_json::from_str(r#"{"white":false,"pressedColor":"green","ghost":true}"#)
                .unwrap();
        assert!(!key.white);
        assert_eq!(key.pressed_color.as_deref(), Some("green"));
        assert!(key.ghost);
    }
}
