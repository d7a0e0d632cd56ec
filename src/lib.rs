//! pianokeys - Note utilities for a virtual piano keyboard.
//!
//! This library provides note-name conversions, the computer keyboard to note
//! bindings, and the visible key map a renderer draws for a range of notes.

pub mod keyboard;

// Re-export commonly used types
pub use keyboard::{
    generate_note_map_from_range, get_note_name, get_octave, key_bind, midi_to_note,
    note_to_midi, NoteError, NoteMap, NoteRange, PianoKey, KEY_BINDS, NOTE_NAMES,
};
